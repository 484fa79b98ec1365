//! Order bundle: cart contents and customer details sent with registration.
//!
//! The bundle travels as a JSON string in the `orderBundle` form field and is
//! used by the gateway for fiscal receipts.

use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::{error::Result, validation};

/// Name/value pair used by several gateway structures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue {
    /// Parameter name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    /// Parameter value.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub value: String,
}

impl NameValue {
    /// Creates a pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Cart and customer data attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBundle {
    /// Order creation timestamp, `YYYY-MM-DDTHH:MM:SS`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub order_creation_date: String,
    /// Buyer details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_details: Option<CustomerDetails>,
    /// Cart positions.
    pub cart_items: CartItems,
}

/// Buyer details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    /// Preferred contact method.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contact: String,
    /// Email address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Phone number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    /// Full name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub full_name: String,
    /// Passport series and number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub passport: String,
    /// Taxpayer number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub inn: String,
    /// Delivery address.
    #[serde(rename = "delivery_info", skip_serializing_if = "Option::is_none")]
    pub delivery_info: Option<DeliveryInfo>,
}

/// Delivery address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryInfo {
    /// Delivery method.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub delivery_type: String,
    /// Two-letter country code.
    pub delivery_country: String,
    /// City.
    pub delivery_city: String,
    /// Street address.
    pub post_address: String,
}

/// Cart positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartItems {
    /// Items in the cart.
    pub items: Vec<Item>,
}

/// A single cart position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Position number within the cart.
    pub position_id: String,
    /// Item name.
    pub name: String,
    /// Extra item details.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub item_details: Vec<NameValue>,
    /// Quantity.
    pub quantity: Quantity,
    /// Total amount of the position in minor units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_amount: Option<i64>,
    /// ISO 4217 numeric currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_currency: Option<u16>,
    /// Merchant item code.
    pub item_code: String,
    /// Unit price in minor units.
    pub item_price: String,
    /// Fiscal attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_attributes: Option<ItemAttributes>,
    /// Discount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    /// Agent commission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_interest: Option<AgentInterest>,
    /// VAT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Tax>,
}

/// Quantity of a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Quantity {
    /// Number of units.
    pub value: i64,
    /// Unit of measure.
    pub measure: String,
}

/// Discount applied to a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// Discount kind.
    pub discount_type: String,
    /// Discount value.
    pub discount_value: String,
}

/// Agent commission of a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInterest {
    /// Commission kind.
    pub interest_type: String,
    /// Commission value.
    pub interest_value: String,
}

/// Fiscal attributes of a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemAttributes {
    /// Attribute list.
    pub attributes: Vec<NameValue>,
}

/// VAT of a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    /// VAT rate code, 0 to 10.
    pub tax_type: u8,
    /// VAT amount in minor units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_sum: Option<i64>,
}

impl OrderBundle {
    /// Validates customer details and every cart item.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        validation::optional_length("orderCreationDate", &self.order_creation_date, 1, 21)?;
        if let Some(customer) = &self.customer_details {
            customer.validate()?;
        }
        self.cart_items.items.iter().try_for_each(Item::validate)
    }
}

impl CustomerDetails {
    /// Validates contact data; at least one of email or phone is required.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Validation`](crate::AcquiringError::Validation)
    /// for the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.email.is_empty() && self.phone.is_empty() {
            return Err(crate::AcquiringError::validation("email", "email or phone is required"));
        }
        if !self.email.is_empty() {
            validation::max_length("email", &self.email, 40)?;
            validation::email("email", &self.email)?;
        }
        if !self.phone.is_empty() {
            validation::phone("phone", &self.phone)?;
        }
        validation::max_length("contact", &self.contact, 40)?;
        validation::max_length("fullName", &self.full_name, 100)?;
        validation::max_length("passport", &self.passport, 100)?;
        validation::max_length("inn", &self.inn, 12)?;
        if let Some(delivery) = &self.delivery_info {
            delivery.validate()?;
        }
        Ok(())
    }
}

impl DeliveryInfo {
    fn validate(&self) -> Result<()> {
        validation::max_length("delivery_type", &self.delivery_type, 20)?;
        validation::length("delivery_country", &self.delivery_country, 1, 20)?;
        validation::length("delivery_city", &self.delivery_city, 1, 40)?;
        validation::length("post_address", &self.post_address, 1, 255)
    }
}

impl Item {
    fn validate(&self) -> Result<()> {
        validation::optional_length("positionId", &self.position_id, 1, 20)?;
        validation::length("name", &self.name, 1, 100)?;
        validation::length("itemCode", &self.item_code, 1, 100)?;
        validation::length("itemPrice", &self.item_price, 1, 18)?;
        validation::length("measure", &self.quantity.measure, 1, 20)?;
        if self.quantity.value <= 0 {
            return Err(crate::AcquiringError::validation("quantity", "value should be more 0"));
        }
        for detail in &self.item_details {
            validation::length("itemDetailsParams.name", &detail.name, 1, 255)?;
            validation::length("itemDetailsParams.value", &detail.value, 1, 255)?;
        }
        if let Some(discount) = &self.discount {
            validation::max_length("discountType", &discount.discount_type, 20)?;
            validation::length("discountValue", &discount.discount_value, 1, 20)?;
        }
        if let Some(interest) = &self.agent_interest {
            validation::length("interestType", &interest.interest_type, 1, 20)?;
            validation::length("interestValue", &interest.interest_value, 1, 20)?;
        }
        if let Some(tax) = &self.tax
            && tax.tax_type > 10
        {
            return Err(crate::AcquiringError::validation("taxType", "must be between 0 and 10"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item {
            position_id: "1".to_owned(),
            name: "Coffee".to_owned(),
            quantity: Quantity { value: 2, measure: "pcs".to_owned() },
            item_code: "SKU-1".to_owned(),
            item_price: "15000".to_owned(),
            tax: Some(Tax { tax_type: 6, tax_sum: None }),
            ..Item::default()
        }
    }

    #[test]
    fn test_bundle_serializes_camel_case() {
        let bundle = OrderBundle {
            customer_details: Some(CustomerDetails {
                email: "buyer@example.com".to_owned(),
                ..CustomerDetails::default()
            }),
            cart_items: CartItems { items: vec![item()] },
            ..OrderBundle::default()
        };

        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["customerDetails"]["email"], "buyer@example.com");
        assert_eq!(json["cartItems"]["items"][0]["itemCode"], "SKU-1");
        assert_eq!(json["cartItems"]["items"][0]["tax"]["taxType"], 6);
        assert!(json.get("orderCreationDate").is_none());
        assert!(json["cartItems"]["items"][0].get("discount").is_none());
    }

    #[test]
    fn test_bundle_validation() {
        let mut bundle = OrderBundle { cart_items: CartItems { items: vec![item()] }, ..OrderBundle::default() };
        assert!(bundle.validate().is_ok());

        bundle.cart_items.items[0].item_code.clear();
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn test_customer_details_require_contact() {
        assert!(CustomerDetails::default().validate().is_err());

        let customer = CustomerDetails { phone: "+79001234567".to_owned(), ..CustomerDetails::default() };
        assert!(customer.validate().is_ok());

        let customer = CustomerDetails { email: "nope".to_owned(), ..CustomerDetails::default() };
        assert!(customer.validate().is_err());
    }
}
