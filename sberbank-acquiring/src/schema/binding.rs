use serde::Deserialize;

use super::{flexible_int, impl_gateway_status, null_as_default};

/// A stored card binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// Binding id.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub binding_id: String,
    /// Masked card number.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub masked_pan: String,
    /// Expiry as `YYYYMM`.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub expiry_date: String,
    /// Merchant client id, when the gateway reports it.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub client_id: Option<String>,
}

/// Response of binding lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingsResponse {
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
    /// Matching bindings.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub bindings: Vec<Binding>,
}

/// Response of binding creation without payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBindingResponse {
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
    /// Id of the created binding.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub binding_id: String,
}

impl_gateway_status!(BindingsResponse, CreateBindingResponse);
