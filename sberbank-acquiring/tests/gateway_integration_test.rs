//! Integration tests for the gateway client.
//!
//! Drives the public API against a mock gateway.

use mockito::Matcher;
use sberbank_acquiring::{
    AcquiringClient, AcquiringError, ClientConfig, Credentials,
    api::{
        bindings::NewBinding,
        orders::{Order, OrderRef},
    },
    endpoints,
    transport::{DefaultRequestBuilder, FormFields, JsonParams, RequestBuilder},
};

fn order() -> Order {
    Order {
        order_number: "1234".to_owned(),
        amount: 1000,
        return_url: "https://mysite.ru/return".to_owned(),
        ..Order::default()
    }
}

fn client(url: &str) -> AcquiringClient {
    AcquiringClient::new(ClientConfig::new("test-api", "test").with_endpoint(url))
        .expect("valid config")
}

#[tokio::test]
async fn test_register_then_status() {
    let mut server = mockito::Server::new_async().await;
    let register = server
        .mock("GET", endpoints::REGISTER)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"orderId":"o-1","formUrl":"https://pay/o-1"}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", endpoints::GET_ORDER_STATUS_EXTENDED)
        .match_body(Matcher::UrlEncoded("orderId".to_owned(), "o-1".to_owned()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"errorCode":"0","orderNumber":"1234","orderStatus":2,"amount":1000,"currency":"643","cardAuthInfo":{"pan":"411111**1111","expiration":"203012","cardholderName":"IVAN"}}"#,
        )
        .create_async()
        .await;

    let client = client(&server.url());
    let registered = client.register_order(&order()).await.unwrap().error_for_gateway().unwrap();
    let order_id = registered.data().order_id.clone();

    let response = client.get_order_status(&OrderRef::new(order_id)).await.unwrap();
    let status_data = response.data();
    assert_eq!(status_data.order_status, Some(2));
    assert_eq!(status_data.order_number, "1234");
    assert_eq!(status_data.card_auth_info.masked_pan, "411111**1111");

    register.assert_async().await;
    status.assert_async().await;
}

#[tokio::test]
async fn test_bad_request_with_string_error_code() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", endpoints::DEPOSIT)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"errorCode":"5","errorMessage":"Access denied"}"#)
        .create_async()
        .await;

    let err = client(&server.url()).deposit(&OrderRef::new("o-1")).await.unwrap_err();

    assert!(matches!(err, AcquiringError::Gateway { code: 5, .. }));
    assert_eq!(err.to_string(), "Access denied");
    assert_eq!(err.status(), Some(400));
    assert!(err.response().is_some());
}

#[tokio::test]
async fn test_bad_request_without_json() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", endpoints::REGISTER)
        .with_status(400)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Request</html>")
        .create_async()
        .await;

    let err = client(&server.url()).register_order(&order()).await.unwrap_err();

    assert!(err.to_string().contains("400"));
    assert_eq!(err.response().unwrap().text(), "<html>Bad Request</html>");
}

#[tokio::test]
async fn test_validation_failure_never_reaches_gateway() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;
    let post = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    let client = client(&server.url());
    let err = client.register_order(&Order { return_url: String::new(), ..order() }).await.unwrap_err();
    assert!(err.is_local());
    assert!(err.response().is_none());

    let err = client.verify_enrollment(&"4".repeat(26)).await.unwrap_err();
    assert!(err.to_string().contains("13") && err.to_string().contains("19"));

    let binding = NewBinding { client_id: "c".repeat(256), ..NewBinding::default() };
    assert!(client.create_binding_no_payment(&binding).await.is_err());

    mock.assert_async().await;
    post.assert_async().await;
}

#[test]
fn test_json_builder_rejects_rest_path() {
    let config = ClientConfig::new("test-api", "test");
    let err = DefaultRequestBuilder
        .json_request(&config, "POST", endpoints::REGISTER, &serde_json::json!({}))
        .unwrap_err();
    assert!(matches!(err, AcquiringError::WrongRequestKind(_)));
    assert!(err.to_string().contains("rest"));
}

#[test]
fn test_form_builder_with_token() {
    let config = ClientConfig::new("test-api", "test").with_token("secret-token");
    assert_eq!(config.credentials(), Credentials::Token("secret-token"));

    let mut fields = FormFields::new();
    fields.insert("orderId", "o-1");
    let request = DefaultRequestBuilder
        .form_request(&config, "GET", endpoints::DEPOSIT, &fields, &JsonParams::new())
        .unwrap();

    let body = request.body_text();
    assert!(body.contains("token=secret-token"));
    assert!(!body.contains("userName"));
    assert!(!body.contains("password"));
    assert!(body.contains("jsonParams=%7B%7D"));
    assert_eq!(request.url.as_str(), format!("{}{}", endpoints::API_URL, endpoints::DEPOSIT));
}

#[test]
fn test_endpoint_trailing_slashes() {
    let config = ClientConfig::new("test-api", "test").with_endpoint("https://google.com//");
    assert_eq!(config.base_url(), "https://google.com");

    let request = DefaultRequestBuilder
        .form_request(&config, "GET", endpoints::REVERSE, &FormFields::new(), &JsonParams::new())
        .unwrap();
    assert_eq!(request.url.as_str(), "https://google.com/payment/rest/reverse.do");
}

#[test]
fn test_config_from_toml() {
    let config = ClientConfig::from_toml(
        r#"
        token = "abc"
        language = "en"
        currency = 840
        endpoint = "https://gateway.example.com/"

        [http]
        timeout_secs = 5
        "#,
    )
    .unwrap();

    let client = AcquiringClient::new(config).unwrap();
    assert_eq!(client.config().base_url(), "https://gateway.example.com");
    assert_eq!(client.config().currency, 840);
    assert_eq!(client.config().http.timeout_secs, 5);
    assert_eq!(client.config().credentials(), Credentials::Token("abc"));
}

#[test]
fn test_config_requires_credentials() {
    let err = AcquiringClient::new(ClientConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Login/Password or Token can't be empty"));
}
