//! Client configuration.
//!
//! [`ClientConfig`] holds the credentials, defaults and transport settings
//! shared by every gateway call. It can be built in code or loaded from TOML:
//!
//! ```toml
//! user_name = "shop-api"
//! password = "secret"
//! currency = 643
//! language = "ru"
//! session_timeout_secs = 1200
//! sandbox = true
//!
//! [http]
//! timeout_secs = 60
//! ```

use std::{fmt, path::Path};

use serde::Deserialize;
use url::Url;

use crate::{
    currency,
    endpoints::{API_URL, SANDBOX_URL},
    error::{AcquiringError, Result},
    transport::HttpConfig,
};

/// Connection settings for an [`AcquiringClient`](crate::AcquiringClient).
///
/// Exactly one authentication method must be set: either `user_name` and
/// `password`, or `token`.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Merchant API login.
    #[serde(default)]
    pub user_name: String,

    /// Merchant API password.
    #[serde(default)]
    pub password: String,

    /// Opaque token used instead of login and password.
    #[serde(default)]
    pub token: String,

    /// ISO 4217 numeric currency code.
    #[serde(default = "default_currency")]
    pub currency: u16,

    /// Locale tag, used as the default `language` of operations that take one.
    #[serde(default = "default_language")]
    pub language: String,

    /// Lifetime of the payment page session in seconds.
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u32,

    /// Use the sandbox gateway instead of production.
    #[serde(default)]
    pub sandbox: bool,

    /// Base URL override. Takes precedence over `sandbox`.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Authentication method resolved from a [`ClientConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials<'a> {
    /// Login and password.
    Password {
        /// Merchant API login.
        user_name: &'a str,
        /// Merchant API password.
        password: &'a str,
    },
    /// Opaque token.
    Token(&'a str),
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            password: String::new(),
            token: String::new(),
            currency: default_currency(),
            language: default_language(),
            session_timeout_secs: default_session_timeout_secs(),
            sandbox: false,
            endpoint: None,
            http: HttpConfig::default(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("user_name", &self.user_name)
            .field("password", &redacted(&self.password))
            .field("token", &redacted(&self.token))
            .field("currency", &self.currency)
            .field("language", &self.language)
            .field("session_timeout_secs", &self.session_timeout_secs)
            .field("sandbox", &self.sandbox)
            .field("endpoint", &self.endpoint)
            .field("http", &self.http)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration authenticated by login and password.
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self { user_name: user_name.into(), password: password.into(), ..Self::default() }
    }

    /// Parses a configuration from a TOML string and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Config`] if the TOML is malformed or the
    /// resulting configuration is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| AcquiringError::Config(format!("invalid TOML: {e}")))?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AcquiringError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Switches to token authentication, clearing login and password.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self.user_name.clear();
        self.password.clear();
        self
    }

    /// Overrides the gateway base URL. Trailing slashes are stripped.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl AsRef<str>) -> Self {
        self.endpoint = Some(endpoint.as_ref().trim_end_matches('/').to_owned());
        self
    }

    /// Selects the sandbox gateway.
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Sets the currency code.
    #[must_use]
    pub fn with_currency(mut self, currency: u16) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the default language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the payment session lifetime.
    #[must_use]
    pub fn with_session_timeout_secs(mut self, secs: u32) -> Self {
        self.session_timeout_secs = secs;
        self
    }

    /// Validates credentials, endpoint override and HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Config`] if:
    /// - neither login/password nor token is set
    /// - both login/password and token are set
    /// - the endpoint override is not a valid URL
    /// - HTTP timeouts are out of range
    pub fn validate(&self) -> Result<()> {
        let has_password = !self.user_name.is_empty() && !self.password.is_empty();
        let has_token = !self.token.is_empty();

        if !has_password && !has_token {
            return Err(AcquiringError::Config(
                "Login/Password or Token can't be empty".to_owned(),
            ));
        }
        if has_token && (!self.user_name.is_empty() || !self.password.is_empty()) {
            return Err(AcquiringError::Config(
                "Login/Password and Token are mutually exclusive".to_owned(),
            ));
        }

        if let Some(endpoint) = &self.endpoint {
            Url::parse(endpoint)
                .map_err(|e| AcquiringError::Config(format!("unable to parse URL: {e}")))?;
        }

        self.http.validate()
    }

    /// Returns the configured authentication method.
    #[must_use]
    pub fn credentials(&self) -> Credentials<'_> {
        if self.token.is_empty() {
            Credentials::Password { user_name: &self.user_name, password: &self.password }
        } else {
            Credentials::Token(&self.token)
        }
    }

    /// Resolves the base URL: endpoint override, then sandbox, then production.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match &self.endpoint {
            Some(endpoint) => endpoint,
            None if self.sandbox => SANDBOX_URL,
            None => API_URL,
        }
    }

    pub(crate) fn normalized(mut self) -> Self {
        if let Some(endpoint) = &mut self.endpoint {
            let trimmed = endpoint.trim_end_matches('/').len();
            endpoint.truncate(trimmed);
        }
        self
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "" } else { "[REDACTED]" }
}

const fn default_currency() -> u16 {
    currency::RUB
}

fn default_language() -> String {
    "ru".to_owned()
}

const fn default_session_timeout_secs() -> u32 {
    1200
}
