use rust_decimal::Decimal;

use super::{
    AddItemRequest, LoginRequest, Product, RegisterRequest, ValidationError, ValidationResult,
};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MAX_PRODUCT_NAME_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_IMAGE_URL_LENGTH: usize = 500;
pub const MIN_PRICE: Decimal = Decimal::ZERO;
pub const MAX_PRICE: Decimal = Decimal::from_parts(99999999, 0, 0, false, 2); // 999999.99
pub const MIN_RATING: f32 = 0.0;
pub const MAX_RATING: f32 = 5.0;
pub const MAX_SESSION_ID_LENGTH: usize = 64;
pub const MAX_PRODUCT_ID_LENGTH: usize = 64;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_ACCOUNT_NAME_LENGTH: usize = 100;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Quantity bounds for a single cart line. Mutations carrying a quantity
/// outside this range are ignored rather than reported as errors.
pub const MIN_LINE_QUANTITY: u32 = 1;
pub const MAX_LINE_QUANTITY: u32 = 999;

impl Validate for Product {
    fn validate(&self) -> ValidationResult<()> {
        validate_product_id(&self.id)?;
        validate_product_name(&self.name)?;
        validate_description(&self.description)?;
        validate_price(&self.price)?;
        validate_image(&self.image)?;
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        Ok(())
    }
}

impl Validate for AddItemRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_product_id(&self.product_id)?;
        Ok(())
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_account_name(&self.name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

/// Whether a requested quantity falls inside the accepted line range.
/// Out-of-range values make the surrounding cart mutation a no-op.
pub fn quantity_in_range(quantity: i64) -> bool {
    quantity >= i64::from(MIN_LINE_QUANTITY) && quantity <= i64::from(MAX_LINE_QUANTITY)
}

/// Validate session ID format. Session IDs name files in the durable
/// mirror, so the character set is restricted to path-safe characters.
pub fn validate_session_id(session_id: &str) -> ValidationResult<()> {
    let trimmed = session_id.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "session_id".to_string(),
        });
    }

    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "session_id".to_string(),
            expected:
                "Session ID must contain only alphanumeric characters, hyphens, and underscores"
                    .to_string(),
        });
    }

    if trimmed.len() > MAX_SESSION_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "session_id".to_string(),
            max_length: MAX_SESSION_ID_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

/// Validate product ID format
pub fn validate_product_id(product_id: &str) -> ValidationResult<()> {
    let trimmed = product_id.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "product_id".to_string(),
        });
    }

    if trimmed.len() > MAX_PRODUCT_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "product_id".to_string(),
            max_length: MAX_PRODUCT_ID_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    if trimmed.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(ValidationError::InvalidValue {
            field: "product_id".to_string(),
            value: product_id.to_string(),
            reason: "Contains whitespace or control characters".to_string(),
        });
    }

    Ok(())
}

/// Validate product name
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "product_name".to_string(),
        });
    }

    if trimmed.len() > MAX_PRODUCT_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "product_name".to_string(),
            max_length: MAX_PRODUCT_NAME_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    if trimmed
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::InvalidValue {
            field: "product_name".to_string(),
            value: name.to_string(),
            reason: "Contains invalid control characters".to_string(),
        });
    }

    Ok(())
}

/// Validate product description
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let trimmed = description.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "product_description".to_string(),
        });
    }

    if trimmed.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "product_description".to_string(),
            max_length: MAX_DESCRIPTION_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

/// Validate product price. Zero is allowed; prices are currency-agnostic
/// units with at most two decimal places.
pub fn validate_price(price: &Decimal) -> ValidationResult<()> {
    if *price < MIN_PRICE || *price > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "product_price".to_string(),
            min: MIN_PRICE.to_string(),
            max: MAX_PRICE.to_string(),
            value: price.to_string(),
        });
    }

    if price.scale() > 2 {
        return Err(ValidationError::InvalidValue {
            field: "product_price".to_string(),
            value: price.to_string(),
            reason: "Price cannot have more than 2 decimal places".to_string(),
        });
    }

    Ok(())
}

/// Validate product image URL
pub fn validate_image(image: &str) -> ValidationResult<()> {
    let trimmed = image.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "product_image".to_string(),
        });
    }

    if trimmed.len() > MAX_IMAGE_URL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "product_image".to_string(),
            max_length: MAX_IMAGE_URL_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

/// Validate product rating
pub fn validate_rating(rating: f32) -> ValidationResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "product_rating".to_string(),
            min: MIN_RATING.to_string(),
            max: MAX_RATING.to_string(),
            value: rating.to_string(),
        });
    }

    Ok(())
}

/// Validate account display name
pub fn validate_account_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "name".to_string(),
        });
    }

    if trimmed.len() > MAX_ACCOUNT_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max_length: MAX_ACCOUNT_NAME_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max_length: MAX_EMAIL_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || domain.contains('@') || trimmed.contains(' ') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            expected: "local-part@domain".to_string(),
        });
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "password".to_string(),
        });
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max_length: MAX_PASSWORD_LENGTH,
            actual_length: password.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quantity_in_range() {
        assert!(quantity_in_range(1));
        assert!(quantity_in_range(50));
        assert!(quantity_in_range(i64::from(MAX_LINE_QUANTITY)));

        assert!(!quantity_in_range(0));
        assert!(!quantity_in_range(-1));
        assert!(!quantity_in_range(i64::from(MAX_LINE_QUANTITY) + 1));
    }

    #[test]
    fn test_validate_session_id() {
        // Valid IDs
        assert!(validate_session_id("session-123").is_ok());
        assert!(validate_session_id("a_B_9").is_ok());

        // Invalid IDs
        assert!(validate_session_id("").is_err());
        assert!(validate_session_id("   ").is_err());
        assert!(validate_session_id("../escape").is_err());
        assert!(validate_session_id("has space").is_err());
        assert!(validate_session_id(&"a".repeat(MAX_SESSION_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("1").is_ok());
        assert!(validate_product_id("17").is_ok());
        assert!(validate_product_id("sku-123").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("bad id").is_err());
        assert!(validate_product_id(&"a".repeat(MAX_PRODUCT_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Wrist Pro Handle").is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"a".repeat(MAX_PRODUCT_NAME_LENGTH + 1)).is_err());
        assert!(validate_product_name("Test\x00Handle").is_err());
    }

    #[test]
    fn test_validate_price() {
        // Zero is a legal price
        assert!(validate_price(&dec!(0.00)).is_ok());
        assert!(validate_price(&dec!(1899.99)).is_ok());

        assert!(validate_price(&dec!(-1.00)).is_err());
        assert!(validate_price(&dec!(1000000.00)).is_err());
        assert!(validate_price(&dec!(9.999)).is_err()); // Too many decimal places
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(5.0).is_ok());

        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(5.1).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user name@example.com").is_err());
    }

    #[test]
    fn test_add_item_request_validation() {
        let valid_request = AddItemRequest {
            product_id: "1".to_string(),
            quantity: 2,
            size: crate::models::SizeVariant::Standard,
        };
        assert!(valid_request.validate().is_ok());

        let invalid_request = AddItemRequest {
            product_id: "".to_string(),
            quantity: 2,
            size: crate::models::SizeVariant::Standard,
        };
        assert!(invalid_request.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_request = RegisterRequest {
            name: "Jo Boer".to_string(),
            email: "jo@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid_request.validate().is_ok());

        let invalid_request = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid_request
        };
        assert!(invalid_request.validate().is_err());
    }
}
