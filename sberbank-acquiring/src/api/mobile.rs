//! Mobile wallet payments.
//!
//! Wallet endpoints take JSON bodies. Apple, Google and Samsung identify the
//! merchant through the wallet `merchant` id; Mir Pay also needs the API
//! credentials, which are taken from the client configuration.

use serde::Serialize;
use tracing::{info, instrument};

use super::Authenticated;
use crate::{
    AcquiringClient, endpoints,
    error::Result,
    schema::WalletPaymentResponse,
    transport::{ApiResponse, JsonParams},
    validation,
};

#[allow(clippy::trivially_copy_pass_by_ref, reason = "serde passes fields by reference")]
fn is_false(value: &bool) -> bool {
    !value
}

/// Apple Pay payment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePayment {
    /// Merchant order number. Required.
    pub order_number: String,
    /// Wallet merchant id. Required.
    pub merchant: String,
    /// Payment token from the wallet. Required.
    pub payment_token: String,
    /// Order description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Hold funds instead of charging them.
    #[serde(skip_serializing_if = "is_false")]
    pub pre_auth: bool,
    /// Extra parameters stored with the order.
    #[serde(skip_serializing_if = "JsonParams::is_empty")]
    pub additional_parameters: JsonParams,
}

/// Google Pay payment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayment {
    /// Merchant order number. Required.
    pub order_number: String,
    /// Wallet merchant id. Required.
    pub merchant: String,
    /// Payment token from the wallet. Required.
    pub payment_token: String,
    /// Payment page language.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    /// Order description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Merchant client id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    /// Payer IP address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ip: String,
    /// Amount in minor units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 numeric currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<u16>,
    /// Payer email.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Payer phone.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    /// Redirect after a successful 3-D Secure check.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub return_url: String,
    /// Redirect after a failed 3-D Secure check.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fail_url: String,
    /// Hold funds instead of charging them.
    #[serde(skip_serializing_if = "is_false")]
    pub pre_auth: bool,
    /// Extra parameters stored with the order.
    #[serde(skip_serializing_if = "JsonParams::is_empty")]
    pub additional_parameters: JsonParams,
}

/// Samsung Pay payment, in-app or on the web.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamsungPayment {
    /// Merchant order number. Required.
    pub order_number: String,
    /// Wallet merchant id. Required.
    pub merchant: String,
    /// Payment token from the wallet. Required.
    pub payment_token: String,
    /// Payment page language.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    /// Order description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Merchant client id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    /// Payer IP address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ip: String,
    /// Hold funds instead of charging them.
    #[serde(skip_serializing_if = "is_false")]
    pub pre_auth: bool,
    /// Extra parameters stored with the order.
    #[serde(skip_serializing_if = "JsonParams::is_empty")]
    pub additional_parameters: JsonParams,
}

/// Mir Pay payment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MirPayment {
    /// Merchant order number. Required.
    pub order_number: String,
    /// Wallet merchant id. Required.
    pub merchant: String,
    /// Payment token from the wallet. Required.
    pub payment_token: String,
    /// Payer IP address. Required.
    pub ip: String,
    /// Merchant client id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    /// Order description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Payment page language.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    /// Hold funds instead of charging them.
    #[serde(skip_serializing_if = "is_false")]
    pub pre_auth: bool,
    /// Token issuer identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tii: String,
    /// Extra parameters stored with the order.
    #[serde(skip_serializing_if = "JsonParams::is_empty")]
    pub additional_parameters: JsonParams,
}

fn require_wallet_fields(order_number: &str, merchant: &str, payment_token: &str) -> Result<()> {
    validation::required("orderNumber", order_number)?;
    validation::required("merchant", merchant)?;
    validation::required("paymentToken", payment_token)
}

impl ApplePayment {
    /// Requires order number, merchant and payment token.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first missing field.
    pub fn validate(&self) -> Result<()> {
        require_wallet_fields(&self.order_number, &self.merchant, &self.payment_token)
    }
}

impl GooglePayment {
    /// Requires order number, merchant and payment token; redirect URLs must
    /// parse when set.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        require_wallet_fields(&self.order_number, &self.merchant, &self.payment_token)?;
        validation::optional_url("returnUrl", &self.return_url)?;
        validation::optional_url("failUrl", &self.fail_url)
    }
}

impl SamsungPayment {
    /// Requires order number, merchant and payment token.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first missing field.
    pub fn validate(&self) -> Result<()> {
        require_wallet_fields(&self.order_number, &self.merchant, &self.payment_token)
    }
}

impl MirPayment {
    /// Requires order number, merchant, payment token and payer IP.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first missing field.
    pub fn validate(&self) -> Result<()> {
        require_wallet_fields(&self.order_number, &self.merchant, &self.payment_token)?;
        validation::required("ip", &self.ip)
    }
}

impl AcquiringClient {
    /// Pays for an order with an Apple Pay token.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing required field, or any
    /// transport, gateway or decode error.
    #[instrument(skip(self, payment), fields(order_number = %payment.order_number))]
    pub async fn pay_with_apple_pay(
        &self,
        payment: &ApplePayment,
    ) -> Result<ApiResponse<WalletPaymentResponse>> {
        payment.validate()?;
        info!(wallet = "apple", "sending wallet payment");
        self.call_json("POST", endpoints::APPLE_PAY, payment).await
    }

    /// Pays for an order with a Google Pay token.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing required field or a malformed
    /// redirect URL, or any transport, gateway or decode error.
    #[instrument(skip(self, payment), fields(order_number = %payment.order_number))]
    pub async fn pay_with_google_pay(
        &self,
        payment: &GooglePayment,
    ) -> Result<ApiResponse<WalletPaymentResponse>> {
        payment.validate()?;
        info!(wallet = "google", "sending wallet payment");
        self.call_json("POST", endpoints::GOOGLE_PAY, payment).await
    }

    /// Pays for an order with an in-app Samsung Pay token.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing required field, or any
    /// transport, gateway or decode error.
    #[instrument(skip(self, payment), fields(order_number = %payment.order_number))]
    pub async fn pay_with_samsung_pay(
        &self,
        payment: &SamsungPayment,
    ) -> Result<ApiResponse<WalletPaymentResponse>> {
        payment.validate()?;
        info!(wallet = "samsung", "sending wallet payment");
        self.call_json("POST", endpoints::SAMSUNG_PAY, payment).await
    }

    /// Pays for an order with a Samsung Pay token obtained on the web.
    ///
    /// # Errors
    ///
    /// Same as [`pay_with_samsung_pay`](Self::pay_with_samsung_pay).
    #[instrument(skip(self, payment), fields(order_number = %payment.order_number))]
    pub async fn pay_with_samsung_web_pay(
        &self,
        payment: &SamsungPayment,
    ) -> Result<ApiResponse<WalletPaymentResponse>> {
        payment.validate()?;
        info!(wallet = "samsung_web", "sending wallet payment");
        self.call_json("POST", endpoints::SAMSUNG_WEB_PAY, payment).await
    }

    /// Pays for an order with a Mir Pay token.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing required field, or any
    /// transport, gateway or decode error.
    #[instrument(skip(self, payment), fields(order_number = %payment.order_number))]
    pub async fn pay_with_mir_pay(&self, payment: &MirPayment) -> Result<ApiResponse<WalletPaymentResponse>> {
        self.mir_pay(endpoints::MIR_PAY, payment).await
    }

    /// Pays for an order with a Mir Pay token, skipping the payment page.
    ///
    /// # Errors
    ///
    /// Same as [`pay_with_mir_pay`](Self::pay_with_mir_pay).
    #[instrument(skip(self, payment), fields(order_number = %payment.order_number))]
    pub async fn pay_with_mir_pay_direct(
        &self,
        payment: &MirPayment,
    ) -> Result<ApiResponse<WalletPaymentResponse>> {
        self.mir_pay(endpoints::MIR_PAY_DIRECT, payment).await
    }

    async fn mir_pay(&self, path: &str, payment: &MirPayment) -> Result<ApiResponse<WalletPaymentResponse>> {
        payment.validate()?;
        info!(wallet = "mir", path, "sending wallet payment");
        let body = Authenticated::new(self.config().credentials(), payment);
        self.call_json("POST", path, &body).await
    }
}
