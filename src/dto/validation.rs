//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest display name accepted anywhere.
const MAX_NAME_LENGTH: usize = 64;

/// Validates that a display name is non-blank and of reasonable length.
///
/// # Examples
///
/// ```ignore
/// validate_display_name("Edda Marsh") // Ok
/// validate_display_name("   ")        // Err - blank
/// ```
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("name_blank");
        err.message = Some("Name must not be blank".into());
        return Err(err);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("name_length");
        err.message =
            Some(format!("Name must be at most {MAX_NAME_LENGTH} characters").into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_display_name_valid() {
        assert!(validate_display_name("Edda Marsh").is_ok());
        assert!(validate_display_name("X").is_ok());
    }

    #[test]
    fn test_validate_display_name_blank() {
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("   ").is_err());
        assert!(validate_display_name("\t\n").is_err());
    }

    #[test]
    fn test_validate_display_name_too_long() {
        assert!(validate_display_name(&"a".repeat(65)).is_err());
        assert!(validate_display_name(&"a".repeat(64)).is_ok());
    }
}
