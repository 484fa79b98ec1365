//! Declining an unpaid order.

use tracing::{info, instrument};

use crate::{
    AcquiringClient, endpoints,
    error::{AcquiringError, Result},
    schema::DeclineResponse,
    transport::{ApiResponse, FormFields, JsonParams},
    validation,
};

/// Order to decline, identified by gateway id or merchant number.
#[derive(Debug, Clone, Default)]
pub struct DeclineRequest {
    /// Sub-merchant login.
    pub merchant_login: String,
    /// Overrides the configured language.
    pub language: Option<String>,
    /// Gateway order id.
    pub order_id: String,
    /// Merchant order number.
    pub order_number: String,
}

impl DeclineRequest {
    /// Requires an order id or number of at most 30 characters each.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`] for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.order_id.is_empty() && self.order_number.is_empty() {
            return Err(AcquiringError::validation("orderId", "pass orderId or orderNumber"));
        }
        validation::max_length("orderId", &self.order_id, validation::MAX_IDENTIFIER_LEN)?;
        validation::max_length("orderNumber", &self.order_number, validation::MAX_IDENTIFIER_LEN)
    }
}

impl AcquiringClient {
    /// Declines an order that has not been paid yet.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no order reference is given, or any
    /// transport, gateway or decode error.
    #[instrument(skip(self, request), fields(order_id = %request.order_id, order_number = %request.order_number))]
    pub async fn decline(&self, request: &DeclineRequest) -> Result<ApiResponse<DeclineResponse>> {
        request.validate()?;
        info!("declining order");
        let mut fields = FormFields::new();
        fields
            .insert("merchantLogin", &request.merchant_login)
            .insert("language", self.language(request.language.as_deref()))
            .insert("orderId", &request.order_id)
            .insert("orderNumber", &request.order_number);
        self.call_form("GET", endpoints::DECLINE, &fields, &JsonParams::new()).await
    }
}
