//! 3-D Secure enrollment check.

use tracing::{info, instrument};

use crate::{
    AcquiringClient, endpoints,
    error::Result,
    schema::EnrollmentResponse,
    transport::{ApiResponse, FormFields, JsonParams},
    validation,
};

impl AcquiringClient {
    /// Asks whether a card takes part in 3-D Secure.
    ///
    /// The card number is not logged.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `pan` has 13 to 19 digits, or any
    /// transport, gateway or decode error.
    #[instrument(skip_all)]
    pub async fn verify_enrollment(&self, pan: &str) -> Result<ApiResponse<EnrollmentResponse>> {
        validation::pan("pan", pan, 13, 19)?;
        info!("verifying 3-D Secure enrollment");
        let mut fields = FormFields::new();
        fields.insert("pan", pan);
        self.call_form("GET", endpoints::VERIFY_ENROLLMENT, &fields, &JsonParams::new()).await
    }
}
