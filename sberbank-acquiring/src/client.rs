//! The gateway client.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    config::ClientConfig,
    error::{AcquiringError, Result},
    transport::{
        ApiResponse, DefaultRequestBuilder, FormFields, HttpTransport, JsonParams, RequestBuilder,
    },
};

/// Client for the acquiring gateway.
///
/// Holds the configuration, a pooled HTTP transport and the request builder.
/// Cloning is cheap and clones share the connection pool, so one client can
/// serve many concurrent calls. Reconfiguration through
/// [`set_token`](Self::set_token) and [`set_endpoint`](Self::set_endpoint)
/// takes `&mut self`, which rules out changing settings under in-flight
/// calls.
///
/// Operations are async; dropping the returned future cancels the call.
///
/// # Examples
///
/// ```rust,no_run
/// use sberbank_acquiring::{AcquiringClient, ClientConfig, api::orders::Order};
///
/// # async fn example() -> sberbank_acquiring::Result<()> {
/// let config = ClientConfig::new("shop-api", "secret").with_sandbox(true);
/// let client = AcquiringClient::new(config)?;
///
/// let order = Order {
///     order_number: "1001".to_owned(),
///     amount: 10_000,
///     return_url: "https://shop.example.com/paid".to_owned(),
///     ..Order::default()
/// };
/// let response = client.register_order(&order).await?;
/// println!("pay at {}", response.data().form_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AcquiringClient {
    config: ClientConfig,
    transport: HttpTransport,
    request_builder: Arc<dyn RequestBuilder>,
}

/// Builder for [`AcquiringClient`] with custom collaborators.
#[derive(Debug)]
#[must_use = "builders do nothing until `build` is called"]
pub struct ClientBuilder {
    config: ClientConfig,
    http_client: Option<reqwest::Client>,
    request_builder: Option<Arc<dyn RequestBuilder>>,
}

impl ClientBuilder {
    /// Uses a caller-supplied HTTP client instead of building one from
    /// [`ClientConfig::http`].
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the request builder.
    pub fn request_builder(mut self, builder: impl RequestBuilder + 'static) -> Self {
        self.request_builder = Some(Arc::new(builder));
        self
    }

    /// Validates the configuration and creates the client.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Config`] for invalid configuration and
    /// [`AcquiringError::Http`] if the HTTP client cannot be created.
    pub fn build(self) -> Result<AcquiringClient> {
        let config = self.config.normalized();
        config.validate()?;

        let transport = match self.http_client {
            Some(client) => HttpTransport::from_client(client),
            None => HttpTransport::new(&config.http)?,
        };

        Ok(AcquiringClient {
            config,
            transport,
            request_builder: self
                .request_builder
                .unwrap_or_else(|| Arc::new(DefaultRequestBuilder)),
        })
    }
}

impl AcquiringClient {
    /// Creates a client with the default transport and request builder.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Config`] if the configuration is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Starts building a client with custom collaborators.
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder { config, http_client: None, request_builder: None }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Switches to token authentication, clearing login and password.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Config`] if the token is empty.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        let config = self.config.clone().with_token(token);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Overrides the gateway base URL. Trailing slashes are stripped.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Config`] if the URL does not parse.
    pub fn set_endpoint(&mut self, endpoint: impl AsRef<str>) -> Result<()> {
        let config = self.config.clone().with_endpoint(endpoint);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Language for an operation: the request's own, else the configured one.
    pub(crate) fn language<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.filter(|lang| !lang.is_empty()).unwrap_or(self.config.language.as_str())
    }

    /// Sends a form-encoded REST-family request and decodes the response.
    pub(crate) async fn call_form<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        fields: &FormFields,
        json_params: &JsonParams,
    ) -> Result<ApiResponse<T>> {
        let request =
            self.request_builder.form_request(&self.config, method, path, fields, json_params)?;
        debug!(method, path, fields = fields.len(), "sending form request");
        self.transport.execute_json(request).await
    }

    /// Sends a JSON request and decodes the response.
    pub(crate) async fn call_json<T, P>(&self, method: &str, path: &str, payload: &P) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(payload)
            .map_err(|e| AcquiringError::RequestBuild(format!("unable to encode payload: {e}")))?;
        let request = self.request_builder.json_request(&self.config, method, path, &payload)?;
        debug!(method, path, "sending JSON request");
        self.transport.execute_json(request).await
    }
}
