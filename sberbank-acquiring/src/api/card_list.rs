//! Moving an order's card into the 3-D Secure trusted list.

use tracing::{info, instrument};

use crate::{
    AcquiringClient, endpoints,
    error::Result,
    schema::Response,
    transport::{ApiResponse, FormFields, JsonParams},
    validation,
};

impl AcquiringClient {
    /// Adds the card used for `md_order` to the SSL card list, so later
    /// payments with it skip 3-D Secure.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty order id, or any transport,
    /// gateway or decode error.
    #[instrument(skip(self, json_params))]
    pub async fn update_ssl_card_list(
        &self,
        md_order: &str,
        json_params: &JsonParams,
    ) -> Result<ApiResponse<Response>> {
        validation::required("mdorder", md_order)?;
        info!("updating SSL card list");
        let mut fields = FormFields::new();
        fields.insert("mdorder", md_order);
        self.call_form("GET", endpoints::UPDATE_SSL_CARD_LIST, &fields, json_params).await
    }
}
