use serde::Deserialize;

use super::{flexible_int, impl_gateway_status, null_as_default};

/// Fiscal receipt status of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptStatusResponse {
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
    /// Merchant order number.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_number: String,
    /// Gateway order id.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_id: String,
    /// Fiscalization daemon code.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub daemon_code: String,
    /// Cash register code.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub device_code: String,
    /// Receipts issued for the order.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub receipt: Vec<Receipt>,
}

/// A single fiscal receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Receipt {
    /// 0 payment, 1 payment failed, 2 refund, 3 refund failed.
    #[serde(default, rename = "receiptStatus", deserialize_with = "null_as_default::deserialize")]
    pub receipt_status: i32,
    /// Receipt id at the fiscalization provider.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub uuid: String,
    /// Shift number.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub shift_number: i64,
    /// Receipt number within the shift.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub receipt_number: i64,
    /// Receipt timestamp.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub receipt_datetime: String,
    /// Fiscal storage number.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub fn_number: String,
    /// Cash register registration number.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub device_number: String,
    /// Fiscal document number.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub fiscal_document_number: i64,
    /// Fiscal document attribute.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub fiscal_document_attribute: String,
    /// Receipt total.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub amount_total: String,
    /// Cash register serial number.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub serial_number: String,
    /// Tax service site.
    #[serde(default, rename = "fnsSite", deserialize_with = "null_as_default::deserialize")]
    pub fns_site: String,
    /// Fiscal data operator.
    #[serde(default, rename = "OFD", deserialize_with = "null_as_default::deserialize")]
    pub ofd: Ofd,
}

/// Fiscal data operator details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ofd {
    /// Operator name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    /// Operator site.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub website: String,
    /// Operator taxpayer number.
    #[serde(default, rename = "INN", deserialize_with = "null_as_default::deserialize")]
    pub inn: String,
}

/// Response of the external receipt lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalReceiptResponse {
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
    /// Remaining response fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl_gateway_status!(ReceiptStatusResponse, ExternalReceiptResponse);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_status_decodes_receipts() {
        let response: ReceiptStatusResponse = serde_json::from_str(
            r#"{
                "errorCode": 0,
                "orderNumber": "10",
                "orderId": "c7cd1d9d-5c60-4a26-9b6b-d0d2c1a8ad45",
                "daemonCode": "test",
                "receipt": [{
                    "receiptStatus": 1,
                    "uuid": "9a3d1e0b",
                    "shift_number": 17,
                    "receipt_number": 4,
                    "fiscal_document_number": 65,
                    "amount_total": "100.00",
                    "fnsSite": "www.nalog.ru",
                    "OFD": {"name": "Taxcom", "website": "taxcom.ru", "INN": "7704211201"}
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(response.receipt.len(), 1);
        let receipt = &response.receipt[0];
        assert_eq!(receipt.shift_number, 17);
        assert_eq!(receipt.amount_total, "100.00");
        assert_eq!(receipt.ofd.inn, "7704211201");
    }

    #[test]
    fn test_external_receipt_keeps_extra_fields() {
        let response: ExternalReceiptResponse =
            serde_json::from_str(r#"{"errorCode":"0","status":"ok"}"#).unwrap();
        assert_eq!(response.error_code, 0);
        assert_eq!(response.extra["status"], "ok");
    }
}
