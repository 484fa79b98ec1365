//! Request builders for the two gateway request families.

use std::{collections::BTreeMap, fmt};

use reqwest::{
    Method,
    header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use url::{Url, form_urlencoded};

use super::PreparedRequest;
use crate::{
    config::{ClientConfig, Credentials},
    endpoints,
    error::{AcquiringError, Result},
};

/// Extra parameters passed through to the gateway as an opaque JSON object.
pub type JsonParams = BTreeMap<String, String>;

/// Form keys filled in by the builder itself.
pub const RESERVED_FORM_KEYS: [&str; 6] =
    ["userName", "password", "token", "currency", "sessionTimeoutSecs", "jsonParams"];

/// Operation-specific form fields, in insertion order.
///
/// Empty values are skipped, so optional fields can be inserted
/// unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(&'static str, String)>);

impl FormFields {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field unless its value is empty.
    pub fn insert(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.0.push((key, value));
        }
        self
    }

    /// Adds a field if present.
    pub fn insert_opt<V: ToString>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Returns the value of the first field named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    /// Iterates over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no fields were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Turns operation data into HTTP requests.
///
/// The client holds one as a trait object, so tests can inject a builder
/// that fails or records what it was given.
pub trait RequestBuilder: fmt::Debug + Send + Sync {
    /// Builds a form-encoded REST-family request.
    ///
    /// The body carries the authentication fields, `currency`,
    /// `sessionTimeoutSecs` and `jsonParams`, followed by `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::RequestBuild`] for an invalid method, an
    /// unparsable URL or a field that collides with a reserved key.
    fn form_request(
        &self,
        config: &ClientConfig,
        method: &str,
        path: &str,
        fields: &FormFields,
        json_params: &JsonParams,
    ) -> Result<PreparedRequest>;

    /// Builds a JSON request from an already encoded payload.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::WrongRequestKind`] for REST-family paths and
    /// [`AcquiringError::RequestBuild`] for an invalid method or URL.
    fn json_request(
        &self,
        config: &ClientConfig,
        method: &str,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<PreparedRequest>;
}

/// The standard [`RequestBuilder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRequestBuilder;

impl RequestBuilder for DefaultRequestBuilder {
    fn form_request(
        &self,
        config: &ClientConfig,
        method: &str,
        path: &str,
        fields: &FormFields,
        json_params: &JsonParams,
    ) -> Result<PreparedRequest> {
        let method = parse_method(method)?;
        let url = resolve_url(config, path)?;

        if let Some((key, _)) = fields.iter().find(|(key, _)| RESERVED_FORM_KEYS.contains(key)) {
            return Err(AcquiringError::RequestBuild(format!(
                "field {key} is reserved for authentication"
            )));
        }

        let json_params = serde_json::to_string(json_params)
            .map_err(|e| AcquiringError::RequestBuild(format!("unable to encode jsonParams: {e}")))?;

        let mut form = form_urlencoded::Serializer::new(String::new());
        match config.credentials() {
            Credentials::Password { user_name, password } => {
                form.append_pair("userName", user_name).append_pair("password", password);
            }
            Credentials::Token(token) => {
                form.append_pair("token", token);
            }
        }
        form.append_pair("currency", &config.currency.to_string())
            .append_pair("sessionTimeoutSecs", &config.session_timeout_secs.to_string())
            .append_pair("jsonParams", &json_params);
        for (key, value) in fields.iter() {
            form.append_pair(key, value);
        }

        Ok(PreparedRequest {
            method,
            url,
            headers: headers("application/x-www-form-urlencoded"),
            body: form.finish().into_bytes(),
        })
    }

    fn json_request(
        &self,
        config: &ClientConfig,
        method: &str,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<PreparedRequest> {
        if endpoints::is_rest_path(path) {
            return Err(AcquiringError::WrongRequestKind(
                "path contains rest request, use form_request instead".to_owned(),
            ));
        }

        let method = parse_method(method)?;
        let url = resolve_url(config, path)?;
        let body = serde_json::to_vec(payload)
            .map_err(|e| AcquiringError::RequestBuild(format!("unable to encode payload: {e}")))?;

        Ok(PreparedRequest { method, url, headers: headers("application/json"), body })
    }
}

fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.as_bytes())
        .map_err(|_| AcquiringError::RequestBuild(format!("invalid HTTP method: {method:?}")))
}

fn resolve_url(config: &ClientConfig, path: &str) -> Result<Url> {
    let raw = format!("{}{path}", config.base_url());
    Url::parse(&raw).map_err(|e| AcquiringError::RequestBuild(format!("unable to parse URL {raw}: {e}")))
}

fn headers(content_type: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers
}
