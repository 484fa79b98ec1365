//! Gateway response types and request payload schemas.
//!
//! All response types tolerate missing fields. The gateway encodes
//! `errorCode` as a number on some endpoints and as a string on others, so
//! every `errorCode` field accepts both.

mod binding;
mod bundle;
mod ofd;
mod order;
mod receipt;
mod refund;
mod wallet;

use serde::{Deserialize, Serialize};

pub use self::{
    binding::{Binding, BindingsResponse, CreateBindingResponse},
    bundle::{
        AgentInterest, CartItems, CustomerDetails, DeliveryInfo, Discount, Item, ItemAttributes,
        NameValue, OrderBundle, Quantity, Tax,
    },
    ofd::AdditionalOfdParams,
    order::{
        BankInfo, CardAuthInfo, OrderResponse, OrderStatusResponse, PaymentAmountInfo,
        SecureAuthInfo, ThreeDsInfo,
    },
    receipt::{ExternalReceiptResponse, Ofd, Receipt, ReceiptStatusResponse},
    refund::{InstantRefundResponse, RawRefundResponse},
    wallet::{WalletError, WalletOrderData, WalletPaymentResponse},
};

/// Common view of the gateway's error envelope.
pub trait GatewayStatus {
    /// Gateway error code, `0` on success.
    fn error_code(&self) -> i64;

    /// Gateway error text.
    fn error_message(&self) -> &str;

    /// Whether the response reports success beyond the error code.
    fn is_success(&self) -> bool {
        true
    }
}

macro_rules! impl_gateway_status {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::schema::GatewayStatus for $ty {
                fn error_code(&self) -> i64 {
                    self.error_code
                }

                fn error_message(&self) -> &str {
                    &self.error_message
                }
            }
        )+
    };
}

pub(crate) use impl_gateway_status;

/// Minimal gateway response: error code and message.
///
/// Returned by operations that report nothing else, such as deposit,
/// reversal and refund.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
}

/// Response of the decline operation.
pub type DeclineResponse = Response;

/// Response of the 3-D Secure enrollment check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    /// Gateway error code, `0` on success.
    #[serde(default, deserialize_with = "flexible_int::deserialize")]
    pub error_code: i64,
    /// Gateway error text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_message: String,
    /// Enrollment flag: `Y`, `N` or `U`.
    #[serde(default, alias = "enrollment", deserialize_with = "null_as_default::deserialize")]
    pub enrolled: String,
    /// Card issuer name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub emitter_name: String,
    /// Card issuer country code.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub emitter_country_code: String,
}

impl_gateway_status!(Response, EnrollmentResponse);

/// Reads an explicit `null` as the field's default value.
pub(crate) mod null_as_default {
    use serde::{Deserialize, Deserializer};

    pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Deserializers for integers the gateway sometimes sends as strings.
pub(crate) mod flexible_int {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(i64),
        Float(f64),
        Str(String),
    }

    /// Accepts a number, a numeric string, an empty string or `null`.
    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(0),
            Some(Repr::Int(value)) => Ok(value),
            #[allow(clippy::cast_possible_truncation, reason = "integral codes sent as floats")]
            Some(Repr::Float(value)) if value.fract() == 0.0 => Ok(value as i64),
            Some(Repr::Float(value)) => Err(D::Error::custom(format!("expected integer, got {value}"))),
            Some(Repr::Str(value)) => {
                let value = value.trim();
                if value.is_empty() {
                    return Ok(0);
                }
                value
                    .parse()
                    .map_err(|_| D::Error::custom(format!("expected integer, got {value:?}")))
            }
        }
    }
}
