//! Request validation helpers
//!
//! Small field-level checks shared by the handlers. Structural rules that
//! must hold for stored data (amount totals, stock floors, status
//! transitions) live in the repository layer, not here.

use shared::{AppError, AppResult};

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_TEXT_LEN: usize = 1000;
pub const MAX_RESI_LEN: usize = 64;

/// Require a non-empty trimmed string within a length bound
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if trimmed.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum length of {max_len}"
        )));
    }
    Ok(())
}

/// Length-check an optional string if present
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value {
        if v.len() > max_len {
            return Err(AppError::validation(format!(
                "{field} exceeds maximum length of {max_len}"
            )));
        }
    }
    Ok(())
}

/// Require a strictly positive integer
pub fn validate_positive(value: i64, field: &str) -> AppResult<()> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

/// Require a non-negative integer (amounts in minor units)
pub fn validate_non_negative(value: i64, field: &str) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("ok", "name", 10).is_ok());
        assert!(validate_required_text("   ", "name", 10).is_err());
        assert!(validate_required_text("toolongvalue", "name", 5).is_err());
    }

    #[test]
    fn test_numeric_bounds() {
        assert!(validate_positive(1, "quantity").is_ok());
        assert!(validate_positive(0, "quantity").is_err());
        assert!(validate_non_negative(0, "price").is_ok());
        assert!(validate_non_negative(-1, "price").is_err());
    }
}
