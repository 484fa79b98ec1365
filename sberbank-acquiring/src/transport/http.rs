//! HTTP dispatcher.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{ApiResponse, HttpConfig, PreparedRequest, RawResponse};
use crate::{
    error::{AcquiringError, Result},
    schema::Response,
};

/// Sends prepared requests and classifies gateway responses.
///
/// Cloning is cheap; clones share the connection pool.
///
/// # Examples
///
/// ```
/// use sberbank_acquiring::transport::{HttpConfig, HttpTransport};
///
/// let config = HttpConfig { timeout_secs: 60, ..HttpConfig::default() };
/// let transport = HttpTransport::new(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with its own pooled client.
    ///
    /// # Errors
    ///
    /// Returns error if the settings are out of range or the HTTP client
    /// cannot be created.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self { client })
    }

    /// Wraps a caller-supplied client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Sends a request and returns the buffered response.
    ///
    /// Statuses 400 through 599 become errors: [`AcquiringError::Gateway`]
    /// when the body is JSON with a nonzero `errorCode` or a nonempty
    /// `errorMessage`, [`AcquiringError::HttpStatus`] otherwise. Both keep
    /// the response.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Http`] on network failure and
    /// [`AcquiringError::BodyRead`] if the body cannot be read.
    #[instrument(skip(self, request), fields(method = %request.method, path = request.url.path()))]
    pub async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        let PreparedRequest { method, url, headers, body } = request;

        let response = self.client.request(method, url).headers(headers).body(body).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| AcquiringError::BodyRead { status: status.as_u16(), source })?;

        debug!(status = status.as_u16(), bytes = body.len(), "gateway responded");

        let raw = RawResponse::new(status, headers, body.to_vec());
        if status.is_client_error() || status.is_server_error() {
            return Err(classify_failure(raw));
        }
        Ok(raw)
    }

    /// Sends a request and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus
    /// [`AcquiringError::Decode`] when the body does not match `T`.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: PreparedRequest,
    ) -> Result<ApiResponse<T>> {
        let raw = self.execute(request).await?;
        decode(raw)
    }
}

/// Decodes a buffered response, keeping it on failure.
pub(crate) fn decode<T: DeserializeOwned>(raw: RawResponse) -> Result<ApiResponse<T>> {
    match raw.json::<T>() {
        Ok(data) => Ok(ApiResponse::new(data, raw)),
        Err(source) => {
            warn!(error = %source, "gateway response does not match expected schema");
            Err(AcquiringError::Decode { source, response: Box::new(raw) })
        }
    }
}

fn classify_failure(raw: RawResponse) -> AcquiringError {
    let status = raw.status();
    if raw.is_json()
        && let Ok(envelope) = raw.json::<Response>()
        && (envelope.error_code != 0 || !envelope.error_message.is_empty())
    {
        warn!(status, code = envelope.error_code, "gateway returned error");
        return AcquiringError::Gateway {
            code: envelope.error_code,
            message: envelope.error_message,
            response: Box::new(raw),
        };
    }

    warn!(status, "gateway returned error status");
    AcquiringError::HttpStatus { status, response: Box::new(raw) }
}

#[cfg(test)]
mod tests {
    use reqwest::{
        Method, StatusCode,
        header::{CONTENT_TYPE, HeaderMap, HeaderValue},
    };
    use url::Url;

    use super::*;

    fn request(base: &str, path: &str) -> PreparedRequest {
        PreparedRequest {
            method: Method::GET,
            url: Url::parse(&format!("{base}{path}")).unwrap(),
            headers: HeaderMap::new(),
            body: b"a=b".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_execute_buffers_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ok")
            .match_body("a=b")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode":0}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(&HttpConfig::default()).unwrap();
        let raw = transport.execute(request(&server.url(), "/ok")).await.unwrap();

        assert_eq!(raw.status(), 200);
        assert_eq!(raw.text(), r#"{"errorCode":0}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_json_error_body_becomes_gateway_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/fail")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode":"5","errorMessage":"Access denied"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::from_client(Client::new());
        let err = transport.execute(request(&server.url(), "/fail")).await.unwrap_err();

        assert_eq!(err.gateway_code(), Some(5));
        assert_eq!(err.to_string(), "Access denied");
        assert_eq!(err.response().unwrap().status(), 400);
    }

    #[tokio::test]
    async fn test_null_error_message_keeps_gateway_code() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/fail")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode":5,"errorMessage":null}"#)
            .create_async()
            .await;

        let transport = HttpTransport::from_client(Client::new());
        let err = transport.execute(request(&server.url(), "/fail")).await.unwrap_err();

        assert!(matches!(err, AcquiringError::Gateway { code: 5, .. }));
        assert_eq!(err.to_string(), "gateway error 5");
    }

    #[tokio::test]
    async fn test_success_body_with_null_message_decodes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode":0,"errorMessage":null}"#)
            .create_async()
            .await;

        let transport = HttpTransport::from_client(Client::new());
        let response =
            transport.execute_json::<Response>(request(&server.url(), "/ok")).await.unwrap();

        assert_eq!(response.data().error_code, 0);
        assert!(response.data().error_message.is_empty());
    }

    #[tokio::test]
    async fn test_plain_error_body_becomes_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/fail")
            .with_status(503)
            .with_header("content-type", "text/html")
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let transport = HttpTransport::from_client(Client::new());
        let err = transport.execute(request(&server.url(), "/fail")).await.unwrap_err();

        assert!(matches!(err, AcquiringError::HttpStatus { status: 503, .. }));
        assert!(err.to_string().contains("503"));
        assert_eq!(err.response().unwrap().text(), "<html>maintenance</html>");
    }

    #[tokio::test]
    async fn test_json_error_without_details_becomes_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/fail")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode":0,"errorMessage":""}"#)
            .create_async()
            .await;

        let transport = HttpTransport::from_client(Client::new());
        let err = transport.execute(request(&server.url(), "/fail")).await.unwrap_err();
        assert!(matches!(err, AcquiringError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let transport = HttpTransport::from_client(Client::new());
        let err = transport.execute(request("http://127.0.0.1:1", "/")).await.unwrap_err();
        assert!(matches!(err, AcquiringError::Http(_)));
        assert!(err.response().is_none());
    }

    #[test]
    fn test_decode_failure_keeps_body() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let raw = RawResponse::new(StatusCode::OK, headers, b"not json".to_vec());

        let err = decode::<Response>(raw).unwrap_err();
        assert!(matches!(err, AcquiringError::Decode { .. }));
        assert_eq!(err.response().unwrap().body(), b"not json");
    }
}
