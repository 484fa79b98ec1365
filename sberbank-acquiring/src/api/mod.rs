//! Gateway operations.
//!
//! Each submodule defines the request types of one operation family and adds
//! the corresponding async methods to [`AcquiringClient`](crate::AcquiringClient).
//! Every operation validates its input locally first; a validation failure
//! returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
//! without touching the network.
//!
//! # Operations
//!
//! | Module | Methods |
//! |---|---|
//! | [`orders`] | `register_order`, `register_order_pre_auth`, `deposit`, `reverse_order`, `refund_order`, `get_order_status` |
//! | [`bindings`] | `bind_card`, `unbind_card`, `extend_binding`, `get_bindings`, `get_bindings_by_card_or_id`, `create_binding_no_payment` |
//! | [`card_list`] | `update_ssl_card_list` |
//! | [`enrollment`] | `verify_enrollment` |
//! | [`decline`] | `decline` |
//! | [`refunds`] | `instant_refund`, `process_raw_sum_refund`, `process_raw_position_refund` |
//! | [`receipts`] | `get_receipt_status`, `get_external_receipt` |
//! | [`mobile`] | `pay_with_apple_pay`, `pay_with_google_pay`, `pay_with_samsung_pay`, `pay_with_samsung_web_pay`, `pay_with_mir_pay`, `pay_with_mir_pay_direct` |

pub mod bindings;
pub mod card_list;
pub mod decline;
pub mod enrollment;
pub mod mobile;
pub mod orders;
pub mod receipts;
pub mod refunds;

/// Serializes an optional payload into a single JSON form value.
pub(crate) fn json_field<T: serde::Serialize>(value: Option<&T>) -> crate::Result<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| crate::AcquiringError::RequestBuild(format!("unable to encode field: {e}")))
}

/// JSON payload with the client's credentials merged in at the top level.
#[derive(serde::Serialize)]
pub(crate) struct Authenticated<'a, T> {
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    user_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    #[serde(flatten)]
    payload: &'a T,
}

impl<'a, T> Authenticated<'a, T> {
    pub(crate) fn new(credentials: crate::Credentials<'a>, payload: &'a T) -> Self {
        match credentials {
            crate::Credentials::Password { user_name, password } => {
                Self { user_name: Some(user_name), password: Some(password), token: None, payload }
            }
            crate::Credentials::Token(token) => {
                Self { user_name: None, password: None, token: Some(token), payload }
            }
        }
    }
}
