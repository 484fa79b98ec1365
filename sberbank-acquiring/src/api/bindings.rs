//! Stored card bindings.

use tracing::{info, instrument};

use crate::{
    AcquiringClient, endpoints,
    error::{AcquiringError, Result},
    schema::{BindingsResponse, CreateBindingResponse, Response},
    transport::{ApiResponse, FormFields, JsonParams},
    validation,
};

/// A binding to activate, deactivate or extend.
#[derive(Debug, Clone, Default)]
pub struct BindingRef {
    /// Binding id. Required.
    pub binding_id: String,
    /// New expiry as `YYYYMM`. Used by [`AcquiringClient::extend_binding`].
    pub new_expiry: String,
    /// Extra passthrough parameters.
    pub json_params: JsonParams,
}

impl BindingRef {
    /// Creates a binding reference.
    pub fn new(binding_id: impl Into<String>) -> Self {
        Self { binding_id: binding_id.into(), ..Self::default() }
    }

    /// Sets the new expiry.
    #[must_use]
    pub fn with_new_expiry(mut self, new_expiry: impl Into<String>) -> Self {
        self.new_expiry = new_expiry.into();
        self
    }

    /// Requires `bindingId`; `newExpiry`, when set, must be six digits.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`] for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        validation::required("bindingId", &self.binding_id)?;
        if !self.new_expiry.is_empty() {
            validation::expiry("newExpiry", &self.new_expiry)?;
        }
        Ok(())
    }
}

/// Binding lookup by card number or binding id.
#[derive(Debug, Clone, Default)]
pub struct BindingsLookup {
    /// Card number, 12 to 19 digits.
    pub pan: Option<String>,
    /// Binding id.
    pub binding_id: Option<String>,
    /// Include expired bindings.
    pub show_expired: Option<bool>,
}

impl BindingsLookup {
    /// Requires a card number or a binding id and checks the card number.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`] for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        let pan = self.pan.as_deref().unwrap_or_default();
        let binding_id = self.binding_id.as_deref().unwrap_or_default();
        if pan.is_empty() && binding_id.is_empty() {
            return Err(AcquiringError::validation("bindingId", "pass pan or bindingId"));
        }
        if !pan.is_empty() {
            validation::pan("pan", pan, 12, 19)?;
        }
        Ok(())
    }
}

/// A card to bind without charging it.
#[derive(Debug, Clone, Default)]
pub struct NewBinding {
    /// Merchant client id the binding belongs to. Required, at most 255
    /// characters.
    pub client_id: String,
    /// Card number, 12 to 19 digits.
    pub pan: String,
    /// Card expiry as `YYYYMM`.
    pub expiry_date: String,
    /// Cardholder name as printed on the card.
    pub card_holder_name: String,
    /// Extra passthrough parameters.
    pub json_params: JsonParams,
}

impl NewBinding {
    /// Checks client id, card number and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`] for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        validation::required("clientId", &self.client_id)?;
        validation::max_length("clientId", &self.client_id, validation::MAX_CLIENT_ID_LEN)?;
        validation::pan("pan", &self.pan, 12, 19)?;
        validation::expiry("expiryDate", &self.expiry_date)
    }
}

impl AcquiringClient {
    /// Reactivates a binding.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing binding id, or any transport,
    /// gateway or decode error.
    #[instrument(skip(self, binding), fields(binding_id = %binding.binding_id))]
    pub async fn bind_card(&self, binding: &BindingRef) -> Result<ApiResponse<Response>> {
        self.toggle_binding(endpoints::BIND_CARD, binding).await
    }

    /// Deactivates a binding.
    ///
    /// # Errors
    ///
    /// Same as [`bind_card`](Self::bind_card).
    #[instrument(skip(self, binding), fields(binding_id = %binding.binding_id))]
    pub async fn unbind_card(&self, binding: &BindingRef) -> Result<ApiResponse<Response>> {
        self.toggle_binding(endpoints::UNBIND_CARD, binding).await
    }

    async fn toggle_binding(&self, path: &str, binding: &BindingRef) -> Result<ApiResponse<Response>> {
        binding.validate()?;
        info!(path, "updating binding state");
        let mut fields = FormFields::new();
        fields.insert("bindingId", &binding.binding_id);
        self.call_form("GET", path, &fields, &binding.json_params).await
    }

    /// Changes the expiry date of a binding.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing binding id or a malformed
    /// expiry, or any transport, gateway or decode error.
    #[instrument(skip(self, binding), fields(binding_id = %binding.binding_id))]
    pub async fn extend_binding(&self, binding: &BindingRef) -> Result<ApiResponse<Response>> {
        binding.validate()?;
        validation::expiry("newExpiry", &binding.new_expiry)?;
        info!("extending binding");
        let mut fields = FormFields::new();
        fields.insert("bindingId", &binding.binding_id).insert("newExpiry", &binding.new_expiry);
        self.call_form("GET", endpoints::EXTEND_BINDING, &fields, &binding.json_params).await
    }

    /// Lists the bindings of a client.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `client_id` exceeds 255 characters, or
    /// any transport, gateway or decode error.
    #[instrument(skip(self, json_params))]
    pub async fn get_bindings(
        &self,
        client_id: &str,
        json_params: &JsonParams,
    ) -> Result<ApiResponse<BindingsResponse>> {
        validation::max_length("clientId", client_id, validation::MAX_CLIENT_ID_LEN)?;
        info!("listing bindings");
        let mut fields = FormFields::new();
        fields.insert("clientId", client_id);
        self.call_form("GET", endpoints::GET_BINDINGS, &fields, json_params).await
    }

    /// Finds bindings by card number or binding id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if neither key is given or the card number
    /// is malformed, or any transport, gateway or decode error.
    #[instrument(skip(self, lookup), fields(binding_id = ?lookup.binding_id))]
    pub async fn get_bindings_by_card_or_id(
        &self,
        lookup: &BindingsLookup,
    ) -> Result<ApiResponse<BindingsResponse>> {
        lookup.validate()?;
        info!("looking up bindings");
        let mut fields = FormFields::new();
        fields
            .insert_opt("pan", lookup.pan.as_deref())
            .insert_opt("bindingId", lookup.binding_id.as_deref())
            .insert_opt("showExpired", lookup.show_expired);
        self.call_form("POST", endpoints::GET_BINDINGS_BY_CARD_OR_ID, &fields, &JsonParams::new())
            .await
    }

    /// Stores a card for a client without charging it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid card data, or any transport,
    /// gateway or decode error.
    #[instrument(skip(self, binding), fields(client_id = %binding.client_id))]
    pub async fn create_binding_no_payment(
        &self,
        binding: &NewBinding,
    ) -> Result<ApiResponse<CreateBindingResponse>> {
        binding.validate()?;
        info!("creating binding without payment");
        let mut fields = FormFields::new();
        fields
            .insert("clientId", &binding.client_id)
            .insert("pan", &binding.pan)
            .insert("expiryDate", &binding.expiry_date)
            .insert("cardHolderName", &binding.card_holder_name);
        self.call_form("POST", endpoints::CREATE_BINDING_NO_PAYMENT, &fields, &binding.json_params)
            .await
    }
}
