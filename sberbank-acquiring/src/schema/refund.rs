use serde::Deserialize;

use super::{flexible_int, impl_gateway_status, null_as_default};

/// Response of an instant refund.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantRefundResponse {
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
    /// Id of the refund order.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_id: String,
    /// Refund order state.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_status: Option<i32>,
    /// Payment system authorization code.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub approval_code: String,
    /// Reference retrieval number.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub rrn: String,
}

/// Response of raw sum and raw position refunds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRefundResponse {
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
}

impl_gateway_status!(InstantRefundResponse, RawRefundResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GatewayStatus;

    #[test]
    fn test_instant_refund_string_error_code() {
        let response: InstantRefundResponse = serde_json::from_str(
            r#"{"errorCode":"0","errorMessage":"","orderId":"abc","orderStatus":4,"approvalCode":"123456","rrn":"000111"}"#,
        )
        .unwrap();
        assert_eq!(response.error_code, 0);
        assert_eq!(response.order_status, Some(4));
        assert_eq!(response.rrn, "000111");
    }

    #[test]
    fn test_refund_responses_expose_gateway_status() {
        let instant: InstantRefundResponse =
            serde_json::from_str(r#"{"errorCode":"7","errorMessage":"Refund denied"}"#).unwrap();
        assert_eq!(GatewayStatus::error_code(&instant), 7);
        assert_eq!(GatewayStatus::error_message(&instant), "Refund denied");

        let raw: RawRefundResponse =
            serde_json::from_str(r#"{"errorCode":0,"errorMessage":null}"#).unwrap();
        assert_eq!(GatewayStatus::error_code(&raw), 0);
        assert!(GatewayStatus::error_message(&raw).is_empty());
    }
}
