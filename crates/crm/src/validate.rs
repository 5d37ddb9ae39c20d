//! Field-level form validation.
//!
//! Mirrors the limits the original forms enforced. Each check collects every
//! problem instead of stopping at the first, so a form can surface all of its
//! errors at once. Email uniqueness is deliberately not checked here; that is
//! the account service's call to make against live data.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use clementine_core::Email;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"^\+?[0-9\s\-()]{10,}$").unwrap()
});

const MIN_PASSWORD_LEN: usize = 6;

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Login form: parseable email, password of at least six characters.
#[must_use]
pub fn login(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    errors
}

/// Client form fields.
///
/// `password` is optional here because the edit form omits it; creation
/// requires it and passes `Some`.
#[must_use]
pub fn client_form(
    name: &str,
    email: &str,
    phone: Option<&str>,
    password: Option<&str>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_length(&mut errors, "name", name, 3, 100);
    check_email(&mut errors, email);
    if let Some(phone) = phone.filter(|p| !p.is_empty()) {
        if !PHONE_RE.is_match(phone) {
            errors.push(FieldError::new("phone", "invalid phone number"));
        }
    }
    if let Some(password) = password {
        check_password(&mut errors, password);
    }

    errors
}

/// Product form fields.
#[must_use]
pub fn product_form(
    name: &str,
    description: &str,
    price: Decimal,
    image_url: Option<&str>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_length(&mut errors, "name", name, 3, 150);
    check_length(&mut errors, "description", description, 10, 500);
    if price <= Decimal::ZERO {
        errors.push(FieldError::new("price", "price must be greater than 0"));
    }
    if let Some(url) = image_url.filter(|u| !u.is_empty()) {
        if Url::parse(url).is_err() {
            errors.push(FieldError::new("image_url", "invalid image URL"));
        }
    }

    errors
}

/// Quick sale form fields.
#[must_use]
pub fn sale_form(product_id: &str, quantity: u32) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if product_id.is_empty() {
        errors.push(FieldError::new("product_id", "select a product"));
    }
    if quantity == 0 {
        errors.push(FieldError::new(
            "quantity",
            "quantity must be greater than 0",
        ));
    }

    errors
}

fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    if Email::parse(email.trim()).is_err() {
        errors.push(FieldError::new("email", "invalid email"));
    }
}

fn check_password(errors: &mut Vec<FieldError>, password: &str) {
    if password.len() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
}

fn check_length(errors: &mut Vec<FieldError>, field: &'static str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min {
        errors.push(FieldError::new(
            field,
            format!("must be at least {min} characters"),
        ));
    } else if len > max {
        errors.push(FieldError::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_login_accepts_valid_input() {
        assert!(login("user@example.com", "secret123").is_empty());
    }

    #[test]
    fn test_login_collects_every_error() {
        let errors = login("not-an-email", "short");
        assert_eq!(fields(&errors), vec!["email", "password"]);
    }

    #[test]
    fn test_client_form_name_bounds() {
        assert_eq!(
            fields(&client_form("ab", "a@b.com", None, None)),
            vec!["name"]
        );
        let long = "x".repeat(101);
        assert_eq!(
            fields(&client_form(&long, "a@b.com", None, None)),
            vec!["name"]
        );
        assert!(client_form("abc", "a@b.com", None, None).is_empty());
    }

    #[test]
    fn test_client_form_phone_rule() {
        let ok = |p| client_form("Valid Name", "a@b.com", Some(p), None);
        assert!(ok("+52 555 123 4567").is_empty());
        assert!(ok("(555) 123-4567").is_empty());
        assert!(ok("").is_empty());
        assert_eq!(fields(&ok("12345")), vec!["phone"]);
        assert_eq!(fields(&ok("abc defg hij")), vec!["phone"]);
    }

    #[test]
    fn test_client_form_password_only_checked_when_present() {
        assert!(client_form("Valid Name", "a@b.com", None, None).is_empty());
        assert_eq!(
            fields(&client_form("Valid Name", "a@b.com", None, Some("short"))),
            vec!["password"]
        );
    }

    #[test]
    fn test_product_form() {
        assert!(
            product_form(
                "Laptop Pro X500",
                "High-performance laptop for professionals",
                "25999.99".parse().unwrap(),
                Some("https://images.example.com/laptop.jpg"),
            )
            .is_empty()
        );

        let errors = product_form("ab", "too short", Decimal::ZERO, Some("not a url"));
        assert_eq!(
            fields(&errors),
            vec!["name", "description", "price", "image_url"]
        );
    }

    #[test]
    fn test_product_form_empty_image_url_is_fine() {
        assert!(
            product_form(
                "Valid Name",
                "A sufficiently long description",
                "1".parse().unwrap(),
                Some(""),
            )
            .is_empty()
        );
    }

    #[test]
    fn test_sale_form() {
        assert!(sale_form("p1", 1).is_empty());
        assert_eq!(fields(&sale_form("", 0)), vec!["product_id", "quantity"]);
    }
}
