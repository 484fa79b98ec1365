use serde::Deserialize;

use super::{NameValue, flexible_int, impl_gateway_status, null_as_default};

/// Response of order registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Order id assigned by the gateway.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_id: String,
    /// Payment page URL to redirect the customer to.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub form_url: String,
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
}

/// Extended order status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusResponse {
    /// Merchant order number.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_number: String,
    /// Order state: 0 registered, 1 pre-authorized, 2 deposited, 3 reversed,
    /// 4 refunded, 5 ACS authorization, 6 declined.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_status: Option<i32>,
    /// Processing response code.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub action_code: i32,
    /// Processing response text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub action_code_description: String,
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
    /// Order amount in minor units.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub amount: i64,
    /// ISO 4217 numeric currency code.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub currency: i64,
    /// Registration time, milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub date: i64,
    /// Order description.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_description: String,
    /// Payer IP address.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub ip: String,
    /// Merchant-supplied order parameters.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub merchant_order_params: Vec<NameValue>,
    /// Gateway order attributes.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub attributes: Vec<NameValue>,
    /// Card details.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub card_auth_info: CardAuthInfo,
    /// Issuer bank details.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub bank_info: BankInfo,
    /// Terminal id.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub terminal_id: String,
    /// Amounts by stage.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub payment_amount_info: PaymentAmountInfo,
}

/// Card details of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAuthInfo {
    /// Masked card number.
    #[serde(default, alias = "pan", deserialize_with = "null_as_default::deserialize")]
    pub masked_pan: String,
    /// Expiry as `YYYYMM`.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub expiration: i64,
    /// Cardholder name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub cardholder_name: String,
    /// Authorization code.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub approval_code: String,
    /// Chargeback flag.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub chargeback: Option<bool>,
    /// Payment system, e.g. `VISA`.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub payment_system: String,
    /// Card product.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub product: String,
    /// Payment channel, e.g. `CARD`.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub payment_way: String,
    /// 3-D Secure details.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub secure_auth_info: SecureAuthInfo,
}

/// 3-D Secure details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureAuthInfo {
    /// Electronic commerce indicator.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub eci: i32,
    /// 3-D Secure transaction data.
    #[serde(default, rename = "threeDSInfo", deserialize_with = "null_as_default::deserialize")]
    pub three_ds_info: ThreeDsInfo,
}

/// 3-D Secure transaction data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThreeDsInfo {
    /// Transaction id.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub xid: String,
}

/// Issuer bank details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankInfo {
    /// Bank name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub bank_name: String,
    /// Bank country code.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub bank_country_code: String,
    /// Bank country name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub bank_country_name: String,
}

/// Amounts of an order by stage, in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAmountInfo {
    /// Pre-authorized amount.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub approved_amount: i64,
    /// Deposited amount.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub deposited_amount: i64,
    /// Refunded amount.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub refunded_amount: i64,
    /// Payment state name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub payment_state: String,
    /// Fee amount.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub fee_amount: i64,
}

impl_gateway_status!(OrderResponse, OrderStatusResponse);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_decodes_nested_blocks() {
        let status: OrderStatusResponse = serde_json::from_str(
            r#"{
                "errorCode": "0",
                "errorMessage": "Успешно",
                "orderNumber": "0784sse49d0s134567890",
                "orderStatus": 6,
                "actionCode": -2007,
                "actionCodeDescription": "Время сессии истекло",
                "amount": 33000,
                "currency": "643",
                "date": 1383819429914,
                "ip": "10.12.130.6",
                "merchantOrderParams": [{"name": "email", "value": "yap"}],
                "attributes": [{"name": "mdOrder", "value": "b9054496-c65a-4975-9418-1051d101f1b9"}],
                "cardAuthInfo": {"expiration": 201912, "cardholderName": "Ivan", "secureAuthInfo": {"eci": 6, "threeDSInfo": {"xid": "MDAwMDAwMDEzODM4MTk0MzAzMjM="}}},
                "bankInfo": {"bankName": "TEST BANK", "bankCountryCode": "RU"},
                "terminalId": "333333",
                "paymentAmountInfo": {"approvedAmount": 0, "depositedAmount": 0, "refundedAmount": 0, "paymentState": "DECLINED"}
            }"#,
        )
        .unwrap();

        assert_eq!(status.order_status, Some(6));
        assert_eq!(status.currency, 643);
        assert_eq!(status.date, 1_383_819_429_914);
        assert_eq!(status.card_auth_info.expiration, 201_912);
        assert_eq!(status.card_auth_info.secure_auth_info.eci, 6);
        assert_eq!(status.bank_info.bank_name, "TEST BANK");
        assert_eq!(status.payment_amount_info.payment_state, "DECLINED");
        assert_eq!(status.attributes[0].name, "mdOrder");
    }

    #[test]
    fn test_order_status_reads_nulls_as_empty() {
        let status: OrderStatusResponse = serde_json::from_str(
            r#"{
                "errorCode": 0,
                "errorMessage": null,
                "orderNumber": "1001",
                "orderStatus": null,
                "orderDescription": null,
                "merchantOrderParams": null,
                "cardAuthInfo": {"pan": null, "cardholderName": null},
                "bankInfo": null
            }"#,
        )
        .unwrap();

        assert_eq!(status.order_number, "1001");
        assert_eq!(status.order_status, None);
        assert!(status.order_description.is_empty());
        assert!(status.error_message.is_empty());
        assert!(status.merchant_order_params.is_empty());
        assert!(status.card_auth_info.masked_pan.is_empty());
        assert!(status.bank_info.bank_name.is_empty());
    }
}
