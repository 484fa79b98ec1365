//! Sberbank Acquiring: async client for the Sberbank internet acquiring
//! payment gateway.
//!
//! The crate turns typed, validated request structures into gateway HTTP
//! calls and decodes the JSON replies, including the gateway's own error
//! envelope (`errorCode` / `errorMessage`) that may arrive inside any HTTP
//! status.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  api::* request  │  Order, BindingRef, InstantRefund, ApplePayment, ...
//! └────────┬─────────┘
//!          │ validate() before any I/O
//! ┌────────▼─────────┐
//! │  RequestBuilder  │  form-encoded (/rest/ paths) or JSON (wallets, receipts)
//! └────────┬─────────┘
//!          │ PreparedRequest
//! ┌────────▼─────────┐
//! │  HttpTransport   │  pooled reqwest client, status classification
//! └────────┬─────────┘
//!          │ RawResponse
//! ┌────────▼─────────┐
//! │ ApiResponse<T>   │  decoded body + raw response
//! └──────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sberbank_acquiring::{
//!     AcquiringClient, ClientConfig,
//!     api::orders::{Order, OrderRef},
//! };
//!
//! # async fn example() -> sberbank_acquiring::Result<()> {
//! let client = AcquiringClient::new(ClientConfig::new("shop-api", "secret").with_sandbox(true))?;
//!
//! let order = Order {
//!     order_number: "1001".to_owned(),
//!     amount: 10_000,
//!     return_url: "https://shop.example.com/paid".to_owned(),
//!     ..Order::default()
//! };
//! let registered = client.register_order(&order).await?.error_for_gateway()?;
//!
//! let status = client.get_order_status(&OrderRef::new(&registered.data().order_id)).await?;
//! println!("order status: {:?}", status.data().order_status);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`ClientConfig`] deserializes from TOML:
//!
//! ```rust
//! use sberbank_acquiring::ClientConfig;
//!
//! # fn example() -> sberbank_acquiring::Result<()> {
//! let config = ClientConfig::from_toml(
//!     r#"
//!     user_name = "shop-api"
//!     password = "secret"
//!     sandbox = true
//!
//!     [http]
//!     timeout_secs = 15
//!     "#,
//! )?;
//! config.validate()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`api`]: operations, grouped by family, as methods on [`AcquiringClient`]
//! - [`schema`]: response types and request payload schemas
//! - [`transport`]: request building, HTTP execution, raw and typed responses
//! - [`config`]: credentials, endpoint, currency and HTTP settings
//! - [`error`]: error type
//! - [`endpoints`], [`currency`]: gateway constants
//!
//! # Error Handling
//!
//! Every operation returns [`Result<ApiResponse<T>>`](Result). Errors that
//! happened after the gateway answered keep its response:
//!
//! ```rust,no_run
//! use sberbank_acquiring::{AcquiringClient, AcquiringError};
//!
//! # async fn example(client: AcquiringClient) {
//! match client.verify_enrollment("4111111111111111").await {
//!     Ok(response) => println!("enrolled: {}", response.data().enrolled),
//!     Err(AcquiringError::Validation { field, reason }) => eprintln!("{field}: {reason}"),
//!     Err(AcquiringError::Gateway { code, message, .. }) => eprintln!("gateway {code}: {message}"),
//!     Err(e) => {
//!         let body = e.response().map(|raw| raw.text().into_owned());
//!         eprintln!("{e} ({body:?})");
//!     }
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod api;
mod client;
pub mod config;
pub mod currency;
pub mod endpoints;
pub mod error;
pub mod schema;
pub mod transport;
pub mod validation;

pub use client::{AcquiringClient, ClientBuilder};
pub use config::{ClientConfig, Credentials};
pub use error::{AcquiringError, Result};
pub use transport::{ApiResponse, RawResponse};
