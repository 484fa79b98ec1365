//! Additional fiscal data operator (OFD) receipt parameters.

use serde::Serialize;

/// Extra receipt attributes forwarded to the fiscal data operator.
///
/// Serialized with the gateway's dotted key names and sent as a JSON string
/// in the `additionalOfdParams` form field. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdditionalOfdParams {
    /// Agent type code (tag 1057).
    #[serde(rename = "agent_info.type", skip_serializing_if = "Option::is_none")]
    pub agent_info_type: Option<u8>,
    /// Paying agent operation.
    #[serde(rename = "agent_info.paying.operation", skip_serializing_if = "String::is_empty")]
    pub agent_info_paying_operation: String,
    /// Paying agent phones.
    #[serde(rename = "agent_info.paying.phones", skip_serializing_if = "Vec::is_empty")]
    pub agent_info_paying_phones: Vec<String>,
    /// Payment operator phones.
    #[serde(rename = "agent_info.paymentsOperator.phones", skip_serializing_if = "Vec::is_empty")]
    pub agent_info_payments_operator_phones: Vec<String>,
    /// Money transfer operator address.
    #[serde(rename = "agent_info.MTOperator.address", skip_serializing_if = "String::is_empty")]
    pub agent_info_mt_operator_address: String,
    /// Money transfer operator taxpayer number.
    #[serde(rename = "agent_info.MTOperator.inn", skip_serializing_if = "String::is_empty")]
    pub agent_info_mt_operator_inn: String,
    /// Money transfer operator name.
    #[serde(rename = "agent_info.MTOperator.name", skip_serializing_if = "String::is_empty")]
    pub agent_info_mt_operator_name: String,
    /// Money transfer operator phones.
    #[serde(rename = "agent_info.MTOperator.phones", skip_serializing_if = "Vec::is_empty")]
    pub agent_info_mt_operator_phones: Vec<String>,
    /// Supplier phones.
    #[serde(rename = "supplier_info.phones", skip_serializing_if = "Vec::is_empty")]
    pub supplier_info_phones: Vec<String>,
    /// Cashier name.
    #[serde(rename = "cashier", skip_serializing_if = "String::is_empty")]
    pub cashier: String,
    /// Additional receipt attribute.
    #[serde(rename = "additional_check_props", skip_serializing_if = "String::is_empty")]
    pub additional_check_props: String,
    /// Additional user attribute name.
    #[serde(rename = "additional_user_props.name", skip_serializing_if = "String::is_empty")]
    pub additional_user_props_name: String,
    /// Additional user attribute value.
    #[serde(rename = "additional_user_props.value", skip_serializing_if = "String::is_empty")]
    pub additional_user_props_value: String,
    /// Cashier taxpayer number.
    #[serde(rename = "cashier_inn", skip_serializing_if = "String::is_empty")]
    pub cashier_inn: String,
    /// Buyer address.
    #[serde(rename = "client.address", skip_serializing_if = "String::is_empty")]
    pub client_address: String,
    /// Buyer birth date.
    #[serde(rename = "client.birth_date", skip_serializing_if = "String::is_empty")]
    pub client_birth_date: String,
    /// Buyer citizenship code.
    #[serde(rename = "client.citizenship", skip_serializing_if = "String::is_empty")]
    pub client_citizenship: String,
    /// Buyer identity document code.
    #[serde(rename = "client.document_code", skip_serializing_if = "String::is_empty")]
    pub client_document_code: String,
    /// Buyer identity document number.
    #[serde(rename = "client.passport_number", skip_serializing_if = "String::is_empty")]
    pub client_passport_number: String,
    /// Buyer email.
    #[serde(rename = "client.email", skip_serializing_if = "String::is_empty")]
    pub client_email: String,
    /// Buyer phone.
    #[serde(rename = "client.phone", skip_serializing_if = "String::is_empty")]
    pub client_phone: String,
    /// Buyer taxpayer number.
    #[serde(rename = "client.inn", skip_serializing_if = "String::is_empty")]
    pub client_inn: String,
    /// Buyer name.
    #[serde(rename = "client.name", skip_serializing_if = "String::is_empty")]
    pub client_name: String,
    /// Operation attribute id.
    #[serde(rename = "operatingCheckProps.name", skip_serializing_if = "String::is_empty")]
    pub operating_check_props_name: String,
    /// Operation attribute timestamp.
    #[serde(rename = "operatingCheckProps.timestamp", skip_serializing_if = "String::is_empty")]
    pub operating_check_props_timestamp: String,
    /// Operation attribute value.
    #[serde(rename = "operatingCheckProps.value", skip_serializing_if = "String::is_empty")]
    pub operating_check_props_value: String,
    /// Industry attribute document date.
    #[serde(rename = "sectoralCheckProps.date", skip_serializing_if = "String::is_empty")]
    pub sectoral_check_props_date: String,
    /// Industry attribute federal authority id.
    #[serde(rename = "sectoralCheckProps.federalId", skip_serializing_if = "String::is_empty")]
    pub sectoral_check_props_federal_id: String,
    /// Industry attribute document number.
    #[serde(rename = "sectoralCheckProps.number", skip_serializing_if = "String::is_empty")]
    pub sectoral_check_props_number: String,
    /// Industry attribute value.
    #[serde(rename = "sectoralCheckProps.value", skip_serializing_if = "String::is_empty")]
    pub sectoral_check_props_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_keys() {
        let params = AdditionalOfdParams {
            agent_info_type: Some(7),
            client_email: "buyer@example.com".to_owned(),
            supplier_info_phones: vec!["+79001234567".to_owned()],
            ..AdditionalOfdParams::default()
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["agent_info.type"], 7);
        assert_eq!(json["client.email"], "buyer@example.com");
        assert_eq!(json["supplier_info.phones"][0], "+79001234567");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
