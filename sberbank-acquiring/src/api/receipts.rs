//! Fiscal receipts: status lookup and external receipt registration.

use serde::Serialize;
use tracing::{info, instrument};

use super::Authenticated;
use crate::{
    AcquiringClient, endpoints,
    error::{AcquiringError, Result},
    schema::{ExternalReceiptResponse, ReceiptStatusResponse},
    transport::{ApiResponse, FormFields, JsonParams},
    validation,
};

/// Receipt lookup by order id, order number or receipt UUID.
#[derive(Debug, Clone, Default)]
pub struct ReceiptStatusRequest {
    /// Gateway order id.
    pub order_id: String,
    /// Merchant order number.
    pub order_number: String,
    /// Receipt UUID.
    pub uuid: String,
    /// Extra passthrough parameters.
    pub json_params: JsonParams,
}

impl ReceiptStatusRequest {
    /// Requires at least one lookup key; order id and number are capped at
    /// 30 characters.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`] for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.order_id.is_empty() && self.order_number.is_empty() && self.uuid.is_empty() {
            return Err(AcquiringError::validation("orderId", "pass orderNumber or orderId or UUID"));
        }
        validation::max_length("orderNumber", &self.order_number, validation::MAX_IDENTIFIER_LEN)?;
        validation::max_length("orderId", &self.order_id, validation::MAX_IDENTIFIER_LEN)
    }
}

/// Receipt printed outside the gateway, reported back for an order.
#[derive(Debug, Clone, Default)]
pub struct ExternalReceiptRequest {
    /// Overrides the configured language.
    pub language: Option<String>,
    /// Gateway order id. Required.
    pub md_order: String,
    /// Receipt data.
    pub receipt: ExternalReceipt,
    /// Cashbox that printed the receipt.
    pub cashbox_id: Option<i64>,
    /// Purchase or refund basket.
    pub basket_id: Option<i64>,
}

/// Receipt block of [`ExternalReceiptRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalReceipt {
    /// Settlement sign: `0` income, `1` refund.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<i32>,
    /// Payment kind: `1` payment, `3` refund.
    #[serde(rename = "paymentType")]
    pub payment_type: i32,
    /// Fiscal storage number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fn_number: Option<String>,
    /// Fiscal document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_document_number: Option<i64>,
    /// Fiscal document sign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_document_attribute: Option<String>,
    /// Receipt total in major units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_total: Option<f64>,
    /// Receipt timestamp, `yyyy:MM:dd HH:mm:ss`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_date_time: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptRouting {
    #[serde(skip_serializing_if = "Option::is_none")]
    cashbox_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    basket_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExternalReceiptPayload<'a> {
    language: &'a str,
    md_order: &'a str,
    receipt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    json_params: Option<String>,
}

impl ExternalReceiptRequest {
    /// Requires the order id.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`] if `md_order` is empty.
    pub fn validate(&self) -> Result<()> {
        validation::required("mdOrder", &self.md_order)
    }

    fn payload<'a>(&'a self, language: &'a str) -> Result<ExternalReceiptPayload<'a>> {
        let encode = |what: &str, e: serde_json::Error| {
            AcquiringError::RequestBuild(format!("unable to encode {what}: {e}"))
        };
        let receipt = serde_json::to_string(&self.receipt).map_err(|e| encode("receipt", e))?;
        let json_params = if self.cashbox_id.is_some() || self.basket_id.is_some() {
            let routing = ReceiptRouting { cashbox_id: self.cashbox_id, basket_id: self.basket_id };
            Some(serde_json::to_string(&routing).map_err(|e| encode("jsonParams", e))?)
        } else {
            None
        };
        Ok(ExternalReceiptPayload { language, md_order: &self.md_order, receipt, json_params })
    }
}

impl AcquiringClient {
    /// Fetches the fiscal receipts of an order.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no lookup key is given or a key is too
    /// long, or any transport, gateway or decode error.
    #[instrument(skip(self, request), fields(order_id = %request.order_id, order_number = %request.order_number))]
    pub async fn get_receipt_status(
        &self,
        request: &ReceiptStatusRequest,
    ) -> Result<ApiResponse<ReceiptStatusResponse>> {
        request.validate()?;
        info!("fetching receipt status");
        let mut fields = FormFields::new();
        fields
            .insert("orderId", &request.order_id)
            .insert("orderNumber", &request.order_number)
            .insert("uuid", &request.uuid);
        self.call_form("GET", endpoints::GET_RECEIPT_STATUS, &fields, &request.json_params).await
    }

    /// Registers a receipt printed outside the gateway. The request is sent
    /// as JSON with the client's credentials embedded.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the order id is missing, or any
    /// transport, gateway or decode error.
    #[instrument(skip(self, request), fields(md_order = %request.md_order))]
    pub async fn get_external_receipt(
        &self,
        request: &ExternalReceiptRequest,
    ) -> Result<ApiResponse<ExternalReceiptResponse>> {
        request.validate()?;
        info!("sending external receipt");
        let payload = request.payload(self.language(request.language.as_deref()))?;
        let body = Authenticated::new(self.config().credentials(), &payload);
        self.call_json("POST", endpoints::EXTERNAL_RECEIPT, &body).await
    }
}
