//! Refunds that do not go through a registered order: instant refunds to a
//! card and raw refunds with fiscal data.

use tracing::{info, instrument};

use super::json_field;
use crate::{
    AcquiringClient, endpoints,
    error::Result,
    schema::{AdditionalOfdParams, InstantRefundResponse, RawRefundResponse},
    transport::{ApiResponse, FormFields, JsonParams},
    validation,
};

/// Fiscal routing for a refund receipt, merged into `jsonParams`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptRouting {
    /// Cashbox that prints the receipt.
    pub cashbox_id: Option<i64>,
    /// Basket the receipt refers to.
    pub basket_id: Option<String>,
}

impl ReceiptRouting {
    fn merge_into(&self, params: &JsonParams) -> JsonParams {
        let mut params = params.clone();
        if let Some(cashbox_id) = self.cashbox_id {
            params.insert("cashboxId".to_owned(), cashbox_id.to_string());
        }
        if let Some(basket_id) = self.basket_id.as_ref().filter(|id| !id.is_empty()) {
            params.insert("basketId".to_owned(), basket_id.clone());
        }
        params
    }
}

/// Refund to a card that is not tied to an earlier payment.
///
/// The card is given either as a binding, a `seToken`, or as raw card data.
#[derive(Debug, Clone, Default)]
pub struct InstantRefund {
    /// Amount in minor units. Must be positive.
    pub amount: i64,
    /// Merchant number of the refund order, 1 to 30 characters.
    pub order_number: String,
    /// Overrides the configured language.
    pub language: Option<String>,
    /// Stored card binding.
    pub binding_id: String,
    /// Encrypted card data.
    pub se_token: String,
    /// Card number.
    pub pan: String,
    /// Card verification code.
    pub cvc: String,
    /// Card expiry as `YYYYMM`.
    pub expire: String,
    /// Cardholder name.
    pub card_holder_name: String,
    /// Receipt routing.
    pub receipt: ReceiptRouting,
    /// Extra passthrough parameters.
    pub json_params: JsonParams,
}

impl InstantRefund {
    /// Checks the amount and order number.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        validation::positive_amount("amount", self.amount)?;
        validation::identifier("orderNumber", &self.order_number)
    }
}

/// Refund of an arbitrary sum of an order, with a single fiscal position.
#[derive(Debug, Clone, Default)]
pub struct RawSumRefund {
    /// Gateway order id, 1 to 30 characters.
    pub order_id: String,
    /// Amount in minor units. Must be positive.
    pub amount: i64,
    /// Overrides the configured language.
    pub language: Option<String>,
    /// Name of the refunded position.
    pub name: String,
    /// Merchant code of the refunded position.
    pub item_code: String,
    /// VAT rate code.
    pub tax_type: Option<u8>,
    /// Receipt routing.
    pub receipt: ReceiptRouting,
    /// Fiscal data operator parameters.
    pub additional_ofd_params: Option<AdditionalOfdParams>,
    /// Extra passthrough parameters.
    pub json_params: JsonParams,
}

impl RawSumRefund {
    /// Checks the order id and amount.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        validation::identifier("orderId", &self.order_id)?;
        validation::positive_amount("amount", self.amount)
    }
}

/// Refund of one cart position of an order.
#[derive(Debug, Clone, Default)]
pub struct RawPositionRefund {
    /// Gateway order id, 1 to 30 characters.
    pub order_id: String,
    /// Amount in minor units. Must be positive.
    pub amount: i64,
    /// Cart position to refund.
    pub position_id: String,
    /// Overrides the configured language.
    pub language: Option<String>,
    /// Fiscal data operator parameters.
    pub additional_ofd_params: Option<AdditionalOfdParams>,
    /// Extra passthrough parameters.
    pub json_params: JsonParams,
}

impl RawPositionRefund {
    /// Checks the order id, amount and position id.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        validation::identifier("orderId", &self.order_id)?;
        validation::positive_amount("amount", self.amount)?;
        validation::required("positionId", &self.position_id)
    }
}

impl AcquiringClient {
    /// Refunds money to a card without a preceding payment.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive amount or an invalid
    /// order number, or any transport, gateway or decode error.
    #[instrument(skip(self, refund), fields(order_number = %refund.order_number))]
    pub async fn instant_refund(
        &self,
        refund: &InstantRefund,
    ) -> Result<ApiResponse<InstantRefundResponse>> {
        refund.validate()?;
        info!(amount = refund.amount, "sending instant refund");
        let mut fields = FormFields::new();
        fields
            .insert("amount", refund.amount)
            .insert("orderNumber", &refund.order_number)
            .insert("language", self.language(refund.language.as_deref()))
            .insert("bindingId", &refund.binding_id)
            .insert("seToken", &refund.se_token)
            .insert("pan", &refund.pan)
            .insert("cvc", &refund.cvc)
            .insert("expire", &refund.expire)
            .insert("cardHolderName", &refund.card_holder_name);
        let json_params = refund.receipt.merge_into(&refund.json_params);
        self.call_form("POST", endpoints::INSTANT_REFUND, &fields, &json_params).await
    }

    /// Refunds an arbitrary sum of an order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid order id or a non-positive
    /// amount, or any transport, gateway or decode error.
    #[instrument(skip(self, refund), fields(order_id = %refund.order_id))]
    pub async fn process_raw_sum_refund(
        &self,
        refund: &RawSumRefund,
    ) -> Result<ApiResponse<RawRefundResponse>> {
        refund.validate()?;
        info!(amount = refund.amount, "sending raw sum refund");
        let mut fields = FormFields::new();
        fields
            .insert("orderId", &refund.order_id)
            .insert("amount", refund.amount)
            .insert("language", self.language(refund.language.as_deref()))
            .insert("name", &refund.name)
            .insert("itemCode", &refund.item_code)
            .insert_opt("taxType", refund.tax_type)
            .insert_opt("additionalOfdParams", json_field(refund.additional_ofd_params.as_ref())?);
        let json_params = refund.receipt.merge_into(&refund.json_params);
        self.call_form("POST", endpoints::PROCESS_RAW_SUM_REFUND, &fields, &json_params).await
    }

    /// Refunds a single cart position of an order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid order id, a non-positive
    /// amount or a missing position id, or any transport, gateway or decode
    /// error.
    #[instrument(skip(self, refund), fields(order_id = %refund.order_id, position_id = %refund.position_id))]
    pub async fn process_raw_position_refund(
        &self,
        refund: &RawPositionRefund,
    ) -> Result<ApiResponse<RawRefundResponse>> {
        refund.validate()?;
        info!(amount = refund.amount, "sending raw position refund");
        let mut fields = FormFields::new();
        fields
            .insert("orderId", &refund.order_id)
            .insert("amount", refund.amount)
            .insert("positionId", &refund.position_id)
            .insert("language", self.language(refund.language.as_deref()))
            .insert_opt("additionalOfdParams", json_field(refund.additional_ofd_params.as_ref())?);
        self.call_form("POST", endpoints::PROCESS_RAW_POSITION_REFUND, &fields, &refund.json_params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;
    use crate::{
        AcquiringError,
        api::test_support::{client, offline_client},
    };

    #[test]
    fn test_receipt_routing_merges_params() {
        let mut params = JsonParams::new();
        params.insert("source".to_owned(), "web".to_owned());

        let routing = ReceiptRouting { cashbox_id: Some(12), basket_id: Some(String::new()) };
        let merged = routing.merge_into(&params);

        assert_eq!(merged.get("cashboxId").map(String::as_str), Some("12"));
        assert_eq!(merged.get("source").map(String::as_str), Some("web"));
        assert!(!merged.contains_key("basketId"));
    }

    #[tokio::test]
    async fn test_instant_refund() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", endpoints::INSTANT_REFUND)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("amount".to_owned(), "1500".to_owned()),
                Matcher::UrlEncoded("orderNumber".to_owned(), "refund-1".to_owned()),
                Matcher::UrlEncoded("language".to_owned(), "ru".to_owned()),
                Matcher::UrlEncoded("bindingId".to_owned(), "b-1".to_owned()),
                Matcher::UrlEncoded("jsonParams".to_owned(), r#"{"basketId":"basket-7"}"#.to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"errorCode":"0","orderId":"r-1","orderStatus":1,"approvalCode":"123456","rrn":"111222333444"}"#,
            )
            .create_async()
            .await;

        let refund = InstantRefund {
            amount: 1500,
            order_number: "refund-1".to_owned(),
            binding_id: "b-1".to_owned(),
            receipt: ReceiptRouting { basket_id: Some("basket-7".to_owned()), ..ReceiptRouting::default() },
            ..InstantRefund::default()
        };
        let response = client(&server.url()).instant_refund(&refund).await.unwrap();

        assert_eq!(response.data().order_id, "r-1");
        assert_eq!(response.data().order_status, Some(1));
        assert_eq!(response.data().rrn, "111222333444");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_instant_refund_validation() {
        let client = offline_client();

        let refund = InstantRefund { order_number: "1".to_owned(), ..InstantRefund::default() };
        let err = client.instant_refund(&refund).await.unwrap_err();
        assert!(matches!(err, AcquiringError::Validation { field: "amount", .. }));

        let refund = InstantRefund { amount: 10, ..InstantRefund::default() };
        let err = client.instant_refund(&refund).await.unwrap_err();
        assert!(matches!(err, AcquiringError::Validation { field: "orderNumber", .. }));
    }

    #[tokio::test]
    async fn test_raw_sum_refund() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", endpoints::PROCESS_RAW_SUM_REFUND)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("orderId".to_owned(), "order-1".to_owned()),
                Matcher::UrlEncoded("amount".to_owned(), "300".to_owned()),
                Matcher::UrlEncoded("taxType".to_owned(), "6".to_owned()),
                Matcher::UrlEncoded("jsonParams".to_owned(), r#"{"cashboxId":"3"}"#.to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode":0,"errorMessage":"Success"}"#)
            .create_async()
            .await;

        let refund = RawSumRefund {
            order_id: "order-1".to_owned(),
            amount: 300,
            name: "Coffee".to_owned(),
            tax_type: Some(6),
            receipt: ReceiptRouting { cashbox_id: Some(3), ..ReceiptRouting::default() },
            ..RawSumRefund::default()
        };
        let response = client(&server.url()).process_raw_sum_refund(&refund).await.unwrap();
        assert_eq!(response.data().error_message, "Success");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_raw_position_refund() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", endpoints::PROCESS_RAW_POSITION_REFUND)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("orderId".to_owned(), "order-1".to_owned()),
                Matcher::UrlEncoded("positionId".to_owned(), "2".to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode":"7","errorMessage":"Position not found"}"#)
            .create_async()
            .await;

        let refund = RawPositionRefund {
            order_id: "order-1".to_owned(),
            amount: 100,
            position_id: "2".to_owned(),
            ..RawPositionRefund::default()
        };
        let response = client(&server.url()).process_raw_position_refund(&refund).await.unwrap();

        let err = response.error_for_gateway().unwrap_err();
        assert_eq!(err.gateway_code(), Some(7));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_raw_position_refund_requires_position() {
        let refund = RawPositionRefund {
            order_id: "order-1".to_owned(),
            amount: 100,
            ..RawPositionRefund::default()
        };
        let err = offline_client().process_raw_position_refund(&refund).await.unwrap_err();
        assert!(matches!(err, AcquiringError::Validation { field: "positionId", .. }));
    }

    #[tokio::test]
    async fn test_refunds_reject_long_identifiers() {
        let client = offline_client();
        let long_id = "1".repeat(31);

        let refund = InstantRefund { amount: 10, order_number: long_id.clone(), ..InstantRefund::default() };
        let err = client.instant_refund(&refund).await.unwrap_err();
        assert!(matches!(err, AcquiringError::Validation { field: "orderNumber", .. }));

        let refund = RawSumRefund { order_id: long_id.clone(), amount: 10, ..RawSumRefund::default() };
        let err = client.process_raw_sum_refund(&refund).await.unwrap_err();
        assert!(matches!(err, AcquiringError::Validation { field: "orderId", .. }));

        let refund = RawPositionRefund {
            order_id: long_id,
            amount: 10,
            position_id: "1".to_owned(),
            ..RawPositionRefund::default()
        };
        let err = client.process_raw_position_refund(&refund).await.unwrap_err();
        assert!(matches!(err, AcquiringError::Validation { field: "orderId", .. }));
    }
}
