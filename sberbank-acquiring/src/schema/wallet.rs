use serde::Deserialize;

use super::{GatewayStatus, OrderStatusResponse, flexible_int, null_as_default};

/// Response of every mobile wallet payment (Apple Pay, Google Pay,
/// Samsung Pay and Mir Pay).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletPaymentResponse {
    /// Whether the payment was accepted.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub success: bool,
    /// Created order, on success.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub data: Option<WalletOrderData>,
    /// Failure details.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error: Option<WalletError>,
    /// Order status block, sent by some wallets.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_status: Option<OrderStatusResponse>,
}

/// Order created by a wallet payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletOrderData {
    /// Gateway order id.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_id: String,
}

/// Failure details of a wallet payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WalletError {
    /// Error code.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub code: i64,
    /// Technical description.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub description: String,
    /// Message meant for the payer.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub message: String,
}

impl WalletPaymentResponse {
    /// Gateway order id, if the payment created one.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.order_id.as_str()).filter(|id| !id.is_empty())
    }
}

impl GatewayStatus for WalletPaymentResponse {
    fn error_code(&self) -> i64 {
        self.error.as_ref().map_or(0, |error| error.code)
    }

    fn error_message(&self) -> &str {
        match &self.error {
            Some(error) if !error.message.is_empty() => &error.message,
            Some(error) => &error.description,
            None => "",
        }
    }

    fn is_success(&self) -> bool {
        self.success
    }
}
