//! Error types for the acquiring client.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type
//! is [`AcquiringError`].
//!
//! # Error Categories
//!
//! - **Local errors** ([`AcquiringError::Config`], [`AcquiringError::Validation`],
//!   [`AcquiringError::RequestBuild`], [`AcquiringError::WrongRequestKind`]):
//!   detected before anything is sent over the network
//! - **Network errors** ([`AcquiringError::Http`], [`AcquiringError::BodyRead`]):
//!   transport failures
//! - **Gateway errors** ([`AcquiringError::HttpStatus`], [`AcquiringError::Gateway`]):
//!   the gateway answered, but with a failure
//! - **Decode errors** ([`AcquiringError::Decode`]): the gateway answered with a
//!   body that does not match the expected schema
//!
//! Gateway and decode errors keep the raw HTTP response, so the body stays
//! readable after the failure through [`AcquiringError::response`].
//!
//! # Examples
//!
//! ```
//! use sberbank_acquiring::error::{AcquiringError, Result};
//!
//! fn check_amount(amount: i64) -> Result<i64> {
//!     if amount <= 0 {
//!         return Err(AcquiringError::validation("amount", "should be more 0"));
//!     }
//!     Ok(amount)
//! }
//!
//! assert!(check_amount(0).is_err());
//! ```

use thiserror::Error;

use crate::transport::RawResponse;

/// Result type alias for acquiring operations.
pub type Result<T> = std::result::Result<T, AcquiringError>;

/// Errors that can occur while talking to the acquiring gateway.
///
/// # Error Recovery
///
/// - **Transient errors** ([`Http`](Self::Http), [`BodyRead`](Self::BodyRead)):
///   retry with backoff; the gateway may or may not have processed the call
/// - **Local errors** ([`Validation`](Self::Validation), [`Config`](Self::Config)):
///   fix the input and retry
/// - **Gateway errors** ([`Gateway`](Self::Gateway), [`HttpStatus`](Self::HttpStatus)):
///   inspect the code and message; retrying the same request rarely helps
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum AcquiringError {
    /// Client configuration is invalid.
    ///
    /// Raised when neither user name/password nor a token is configured, when
    /// both are, or when the endpoint override is not a valid URL.
    ///
    /// # Recovery
    ///
    /// Fix the configuration and rebuild the client.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// A request field violates a local rule.
    ///
    /// No network traffic happens when this is returned.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Wire name of the offending field.
        field: &'static str,
        /// Violated constraint.
        reason: String,
    },

    /// The outgoing HTTP request could not be constructed.
    ///
    /// Raised for an invalid HTTP method, an unparsable URL or a payload
    /// that cannot be encoded.
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// A REST path was routed through the JSON builder.
    ///
    /// # Recovery
    ///
    /// Use the form builder for paths in the REST family.
    #[error("wrong request kind: {0}")]
    WrongRequestKind(String),

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`] for connection, DNS, TLS and timeout failures.
    /// No response is available.
    ///
    /// # Recovery
    ///
    /// Retry with exponential backoff. A timed out call may still have been
    /// processed by the gateway, so check the order status before retrying a
    /// payment.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response headers arrived but the body could not be read.
    #[error("failed to read response body (status {status}): {source}")]
    BodyRead {
        /// HTTP status code of the partial response.
        status: u16,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The gateway answered with a 4xx or 5xx status and no usable error body.
    #[error("sberbank server responded with status code {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response, body intact.
        response: Box<RawResponse>,
    },

    /// The gateway reported an application-level error.
    ///
    /// `message` is the gateway's own text, passed through verbatim. An empty
    /// message displays as `gateway error <code>`.
    #[error("{}", gateway_display(.code, .message))]
    Gateway {
        /// Gateway error code (`errorCode`).
        code: i64,
        /// Gateway error text (`errorMessage`).
        message: String,
        /// Raw response, body intact.
        response: Box<RawResponse>,
    },

    /// The response body could not be decoded into the expected type.
    #[error("failed to decode gateway response: {source}")]
    Decode {
        /// JSON decoding error.
        #[source]
        source: serde_json::Error,
        /// Raw response, body intact.
        response: Box<RawResponse>,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref, reason = "error attributes bind fields by reference")]
fn gateway_display(code: &i64, message: &str) -> String {
    if message.is_empty() { format!("gateway error {code}") } else { message.to_owned() }
}

impl AcquiringError {
    /// Creates a [`Validation`](Self::Validation) error.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation { field, reason: reason.into() }
    }

    /// Returns the raw HTTP response attached to this error, if any.
    ///
    /// Present for [`HttpStatus`](Self::HttpStatus), [`Gateway`](Self::Gateway)
    /// and [`Decode`](Self::Decode).
    #[must_use]
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::HttpStatus { response, .. }
            | Self::Gateway { response, .. }
            | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BodyRead { status, .. } => Some(*status),
            other => other.response().map(RawResponse::status),
        }
    }

    /// Returns the gateway error code for [`Gateway`](Self::Gateway) errors.
    #[must_use]
    pub fn gateway_code(&self) -> Option<i64> {
        match self {
            Self::Gateway { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` when the error was raised before any network traffic.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Validation { .. } | Self::RequestBuild(_) | Self::WrongRequestKind(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{StatusCode, header::HeaderMap};

    use super::*;

    fn raw(status: u16, body: &str) -> Box<RawResponse> {
        Box::new(RawResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body.as_bytes().to_vec(),
        ))
    }

    #[test]
    fn test_validation_display_names_field() {
        let err = AcquiringError::validation("orderNumber", "length must be between 1 and 30");
        assert_eq!(err.to_string(), "invalid orderNumber: length must be between 1 and 30");
        assert!(err.is_local());
        assert!(err.response().is_none());
    }

    #[test]
    fn test_http_status_display_contains_code() {
        let err = AcquiringError::HttpStatus { status: 400, response: raw(400, "oops") };
        assert!(err.to_string().contains("400"));
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.response().unwrap().text(), "oops");
    }

    #[test]
    fn test_gateway_message_is_verbatim() {
        let err = AcquiringError::Gateway {
            code: 5,
            message: "Доступ запрещён".to_owned(),
            response: raw(400, "{}"),
        };
        assert_eq!(err.to_string(), "Доступ запрещён");
        assert_eq!(err.gateway_code(), Some(5));
        assert!(!err.is_local());
    }

    #[test]
    fn test_gateway_empty_message_falls_back_to_code() {
        let err = AcquiringError::Gateway { code: 5, message: String::new(), response: raw(400, "{}") };
        assert_eq!(err.to_string(), "gateway error 5");
    }

    #[test]
    fn test_decode_keeps_response() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AcquiringError::Decode { source, response: raw(200, "{") };
        assert!(err.to_string().starts_with("failed to decode gateway response"));
        assert_eq!(err.response().unwrap().body(), b"{");
    }

    #[test]
    fn test_local_errors() {
        assert!(AcquiringError::Config("x".to_owned()).is_local());
        assert!(AcquiringError::RequestBuild("x".to_owned()).is_local());
        assert!(AcquiringError::WrongRequestKind("x".to_owned()).is_local());
    }
}
