//! Order lifecycle: registration, completion, reversal, refund and status.

use tracing::{info, instrument};

use super::json_field;
use crate::{
    AcquiringClient,
    endpoints,
    error::Result,
    schema::{AdditionalOfdParams, OrderBundle, OrderResponse, OrderStatusResponse, Response},
    transport::{ApiResponse, FormFields, JsonParams},
    validation,
};

/// A new order to register.
#[derive(Debug, Clone, Default)]
pub struct Order {
    /// Merchant order number, unique per merchant, 1 to 30 characters.
    pub order_number: String,
    /// Amount in minor units.
    pub amount: i64,
    /// Where the payer lands after a successful payment. Required.
    pub return_url: String,
    /// Where the payer lands after a failed payment.
    pub fail_url: String,
    /// Free-form description.
    pub description: String,
    /// Payment page variant, e.g. `DESKTOP` or `MOBILE`.
    pub page_view: String,
    /// Sub-merchant login.
    pub merchant_login: String,
    /// Order expiry, `yyyy-MM-ddTHH:mm:ss`.
    pub expiration_date: String,
    /// Stored card binding to pay with.
    pub binding_id: String,
    /// Merchant client id, used to store bindings.
    pub client_id: String,
    /// Cart and customer data.
    pub order_bundle: Option<OrderBundle>,
    /// Fiscal data operator parameters.
    pub additional_ofd_params: Option<AdditionalOfdParams>,
    /// Gateway features, e.g. `AUTO_PAYMENT`.
    pub features: String,
    /// Extra passthrough parameters.
    pub json_params: JsonParams,
}

impl Order {
    /// Checks `returnUrl`, `orderNumber`, `failUrl` and the order bundle.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        validation::required("returnUrl", &self.return_url)?;
        validation::url("returnUrl", &self.return_url)?;
        validation::identifier("orderNumber", &self.order_number)?;
        validation::optional_url("failUrl", &self.fail_url)?;
        if let Some(bundle) = &self.order_bundle {
            bundle.validate()?;
        }
        Ok(())
    }

    fn form_fields(&self) -> Result<FormFields> {
        let mut fields = FormFields::new();
        fields
            .insert("orderNumber", &self.order_number)
            .insert("amount", self.amount)
            .insert("returnUrl", &self.return_url)
            .insert("failUrl", &self.fail_url)
            .insert("description", &self.description)
            .insert("pageView", &self.page_view)
            .insert("merchantLogin", &self.merchant_login)
            .insert("expirationDate", &self.expiration_date)
            .insert("bindingId", &self.binding_id)
            .insert("clientId", &self.client_id)
            .insert_opt("orderBundle", json_field(self.order_bundle.as_ref())?)
            .insert_opt("additionalOfdParams", json_field(self.additional_ofd_params.as_ref())?)
            .insert("features", &self.features);
        Ok(fields)
    }
}

/// Reference to a registered order, used by completion, reversal, refund
/// and status calls.
#[derive(Debug, Clone, Default)]
pub struct OrderRef {
    /// Gateway order id, 1 to 30 characters.
    pub order_id: String,
    /// Amount in minor units. Zero means the full order amount where the
    /// operation allows it.
    pub amount: i64,
    /// Extra passthrough parameters.
    pub json_params: JsonParams,
}

impl OrderRef {
    /// Creates a reference to `order_id` with no amount.
    pub fn new(order_id: impl Into<String>) -> Self {
        Self { order_id: order_id.into(), ..Self::default() }
    }

    /// Sets the amount.
    #[must_use]
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    fn validate(&self) -> Result<()> {
        validation::identifier("orderId", &self.order_id)
    }

    fn form_fields(&self, with_amount: bool) -> FormFields {
        let mut fields = FormFields::new();
        fields.insert("orderId", &self.order_id);
        if with_amount {
            fields.insert("amount", self.amount);
        }
        fields
    }
}

impl AcquiringClient {
    /// Registers a one-phase order and returns the payment page URL.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid order, or any transport,
    /// gateway or decode error.
    #[instrument(skip(self, order), fields(order_number = %order.order_number))]
    pub async fn register_order(&self, order: &Order) -> Result<ApiResponse<OrderResponse>> {
        self.register(endpoints::REGISTER, order).await
    }

    /// Registers a two-phase order. Funds are held until
    /// [`deposit`](Self::deposit) or released by [`reverse_order`](Self::reverse_order).
    ///
    /// # Errors
    ///
    /// Same as [`register_order`](Self::register_order).
    #[instrument(skip(self, order), fields(order_number = %order.order_number))]
    pub async fn register_order_pre_auth(&self, order: &Order) -> Result<ApiResponse<OrderResponse>> {
        self.register(endpoints::REGISTER_PRE_AUTH, order).await
    }

    async fn register(&self, path: &str, order: &Order) -> Result<ApiResponse<OrderResponse>> {
        order.validate()?;
        info!(amount = order.amount, "registering order");
        let fields = order.form_fields()?;
        self.call_form("GET", path, &fields, &order.json_params).await
    }

    /// Completes a pre-authorized order for `amount` (zero deposits the full
    /// held amount).
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing or overlong order id, or any
    /// transport, gateway or decode error.
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn deposit(&self, order: &OrderRef) -> Result<ApiResponse<Response>> {
        order.validate()?;
        info!(amount = order.amount, "depositing order");
        self.call_form("GET", endpoints::DEPOSIT, &order.form_fields(true), &order.json_params).await
    }

    /// Reverses an order.
    ///
    /// # Errors
    ///
    /// Same as [`deposit`](Self::deposit).
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn reverse_order(&self, order: &OrderRef) -> Result<ApiResponse<Response>> {
        order.validate()?;
        info!("reversing order");
        let with_amount = order.amount > 0;
        self.call_form("GET", endpoints::REVERSE, &order.form_fields(with_amount), &order.json_params)
            .await
    }

    /// Refunds `amount` of a deposited order.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the order id is invalid or the amount is
    /// not positive, or any transport, gateway or decode error.
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn refund_order(&self, order: &OrderRef) -> Result<ApiResponse<Response>> {
        order.validate()?;
        validation::positive_amount("refundAmount", order.amount)?;
        info!(amount = order.amount, "refunding order");
        let mut fields = order.form_fields(false);
        fields.insert("refundAmount", order.amount);
        self.call_form("GET", endpoints::REFUND, &fields, &order.json_params).await
    }

    /// Fetches the extended status of an order.
    ///
    /// # Errors
    ///
    /// Same as [`deposit`](Self::deposit).
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn get_order_status(&self, order: &OrderRef) -> Result<ApiResponse<OrderStatusResponse>> {
        order.validate()?;
        info!("fetching order status");
        self.call_form(
            "GET",
            endpoints::GET_ORDER_STATUS_EXTENDED,
            &order.form_fields(false),
            &order.json_params,
        )
        .await
    }
}
