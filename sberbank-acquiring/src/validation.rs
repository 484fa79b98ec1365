//! Field-level validation rules shared by request types.
//!
//! Every helper returns [`AcquiringError::Validation`] naming the wire field.
//! Lengths count characters.

use url::Url;

use crate::error::{AcquiringError, Result};

/// Maximum length of order numbers and order ids.
pub const MAX_IDENTIFIER_LEN: usize = 30;

/// Maximum length of a merchant client id.
pub const MAX_CLIENT_ID_LEN: usize = 255;

pub(crate) fn required(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AcquiringError::validation(field, "cannot be blank"));
    }
    Ok(())
}

pub(crate) fn length(field: &'static str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AcquiringError::validation(
            field,
            format!("length must be between {min} and {max}"),
        ));
    }
    Ok(())
}

/// Applies [`length`] only when the value is non-empty.
pub(crate) fn optional_length(field: &'static str, value: &str, min: usize, max: usize) -> Result<()> {
    if value.is_empty() { Ok(()) } else { length(field, value, min, max) }
}

pub(crate) fn max_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(AcquiringError::validation(field, format!("is too long (max {max})")));
    }
    Ok(())
}

/// Required identifier of at most [`MAX_IDENTIFIER_LEN`] characters.
pub(crate) fn identifier(field: &'static str, value: &str) -> Result<()> {
    required(field, value)?;
    length(field, value, 1, MAX_IDENTIFIER_LEN)
}

pub(crate) fn positive_amount(field: &'static str, amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(AcquiringError::validation(field, "amount should be more 0"));
    }
    Ok(())
}

pub(crate) fn url(field: &'static str, value: &str) -> Result<()> {
    match Url::parse(value) {
        Ok(url) if url.has_host() => Ok(()),
        Ok(_) => Err(AcquiringError::validation(field, "must be a valid URL")),
        Err(e) => Err(AcquiringError::validation(field, format!("must be a valid URL: {e}"))),
    }
}

/// Applies [`url`] only when the value is non-empty.
pub(crate) fn optional_url(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() { Ok(()) } else { url(field, value) }
}

pub(crate) fn digits(field: &'static str, value: &str) -> Result<()> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AcquiringError::validation(field, "must contain only digits"));
    }
    Ok(())
}

/// Card number of `min..=max` digits.
pub(crate) fn pan(field: &'static str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AcquiringError::validation(
            field,
            format!("pan length shouldn't be less {min} or more {max} symbols"),
        ));
    }
    digits(field, value)
}

/// Card expiry as exactly six digits (`YYYYMM`).
pub(crate) fn expiry(field: &'static str, value: &str) -> Result<()> {
    if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AcquiringError::validation(field, "must be exactly 6 digits (YYYYMM)"));
    }
    Ok(())
}

pub(crate) fn email(field: &'static str, value: &str) -> Result<()> {
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if !valid || value.chars().any(char::is_whitespace) {
        return Err(AcquiringError::validation(field, "must be a valid email address"));
    }
    Ok(())
}

/// Russian phone number: `+7`, `7` or `8` followed by ten digits.
pub(crate) fn phone(field: &'static str, value: &str) -> Result<()> {
    let rest = value
        .strip_prefix("+7")
        .or_else(|| value.strip_prefix('7'))
        .or_else(|| value.strip_prefix('8'));
    match rest {
        Some(rest) if rest.len() == 10 && rest.bytes().all(|b| b.is_ascii_digit()) => Ok(()),
        _ => Err(AcquiringError::validation(field, "must be +7, 7 or 8 followed by 10 digits")),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_identifier_bounds() {
        assert!(identifier("orderNumber", "").is_err());
        assert!(identifier("orderNumber", "1").is_ok());
        assert!(identifier("orderNumber", &"a".repeat(30)).is_ok());
        assert!(identifier("orderNumber", &"a".repeat(31)).is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(identifier("orderNumber", &"я".repeat(30)).is_ok());
    }

    #[test]
    fn test_positive_amount() {
        assert!(positive_amount("amount", 0).is_err());
        assert!(positive_amount("amount", -1).is_err());
        assert!(positive_amount("amount", 1).is_ok());
    }

    #[test]
    fn test_url() {
        assert!(url("returnUrl", "https://mysite.ru/return").is_ok());
        assert!(url("returnUrl", "not a url").is_err());
        assert!(url("returnUrl", "mailto:shop@example.com").is_err());
        assert!(optional_url("failUrl", "").is_ok());
    }

    #[test]
    fn test_pan_message_names_bounds() {
        let err = pan("pan", &"4".repeat(26), 13, 19).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("13"));
        assert!(message.contains("19"));
        assert!(pan("pan", "4111111111111111", 13, 19).is_ok());
        assert!(pan("pan", "4111-1111-1111-1", 13, 19).is_err());
    }

    #[test]
    fn test_expiry() {
        assert!(expiry("newExpiry", "202512").is_ok());
        assert!(expiry("newExpiry", "20251").is_err());
        assert!(expiry("newExpiry", "2025-1").is_err());
    }

    #[test]
    fn test_email_and_phone() {
        assert!(email("email", "buyer@example.com").is_ok());
        assert!(email("email", "buyer@").is_err());
        assert!(email("email", "buyer example.com").is_err());
        assert!(phone("phone", "+79001234567").is_ok());
        assert!(phone("phone", "89001234567").is_ok());
        assert!(phone("phone", "9001234567").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_identifiers_over_limit_rejected(value in "[a-zA-Z0-9]{31,64}") {
            let err = identifier("orderNumber", &value).unwrap_err();
            let is_length_error = matches!(err, AcquiringError::Validation { field: "orderNumber", .. });
            prop_assert!(is_length_error);
        }

        #[test]
        fn prop_identifiers_within_limit_accepted(value in "[a-zA-Z0-9]{1,30}") {
            prop_assert!(identifier("orderNumber", &value).is_ok());
        }
    }
}
