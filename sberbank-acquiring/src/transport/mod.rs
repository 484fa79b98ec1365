//! Request construction and dispatch.
//!
//! Every gateway call goes through two steps:
//!
//! 1. A [`RequestBuilder`] turns the configuration, path and operation fields
//!    into a [`PreparedRequest`]. REST-family paths are form-encoded with the
//!    shared authentication fields; all other paths carry a JSON body.
//! 2. The [`HttpTransport`] sends it, buffers the whole body into a
//!    [`RawResponse`], classifies HTTP and gateway failures, and decodes the
//!    body into an [`ApiResponse`].
//!
//! The builder is a trait object on the client so tests can substitute it.

mod builder;
mod config;
mod http;

use std::borrow::Cow;

use reqwest::{
    Method, StatusCode,
    header::{CONTENT_TYPE, HeaderMap},
};
use serde::de::DeserializeOwned;
use url::Url;

pub use self::{
    builder::{DefaultRequestBuilder, FormFields, JsonParams, RESERVED_FORM_KEYS, RequestBuilder},
    config::HttpConfig,
    http::HttpTransport,
};
use crate::{
    error::{AcquiringError, Result},
    schema::GatewayStatus,
};

/// A fully built HTTP request, ready for dispatch.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Encoded request body.
    pub body: Vec<u8>,
}

impl PreparedRequest {
    /// Returns the body as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// A gateway response with its body fully buffered.
///
/// The body can be read any number of times, including after the call
/// failed.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self { status, headers, body }
    }

    /// HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// HTTP status as [`StatusCode`].
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// `Content-Type` header value, if present and valid ASCII.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
    }

    /// Returns `true` when the `Content-Type` is `application/json`.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(|ct| ct.starts_with("application/json"))
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Consumes the response and returns the body.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// A decoded gateway response together with the raw HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    data: T,
    raw: RawResponse,
}

impl<T> ApiResponse<T> {
    /// Creates a response from a decoded value and the raw response.
    #[must_use]
    pub fn new(data: T, raw: RawResponse) -> Self {
        Self { data, raw }
    }

    /// Decoded body.
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Raw HTTP response.
    #[must_use]
    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }

    /// HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.raw.status()
    }

    /// Consumes the response and returns the decoded body.
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }

    /// Consumes the response and returns both parts.
    #[must_use]
    pub fn into_parts(self) -> (T, RawResponse) {
        (self.data, self.raw)
    }
}

impl<T: GatewayStatus> ApiResponse<T> {
    /// Turns a successful HTTP response that reports a gateway error into
    /// [`AcquiringError::Gateway`].
    ///
    /// The gateway answers many failures with status 200 and a nonzero
    /// `errorCode`; this makes them errors.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Gateway`] if the decoded body reports a
    /// failure.
    pub fn error_for_gateway(self) -> Result<Self> {
        let code = self.data.error_code();
        if code == 0 && self.data.is_success() {
            return Ok(self);
        }
        let message = self.data.error_message().to_owned();
        Err(AcquiringError::Gateway { code, message, response: Box::new(self.raw) })
    }
}
