//! Input contract for texts entering the engine.

use thiserror::Error;

use crate::config::Limits;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Text cannot be empty")]
    Empty,
    #[error("Text is too long. Maximum {max} characters allowed")]
    TooLong { max: usize },
    #[error("Text must be at least {min} characters long")]
    TooShort { min: usize },
}

/// Check `text` against `limits`. Length is counted in chars; the minimum
/// applies to the trimmed text.
pub fn validate_text(text: &str, limits: &Limits) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if text.chars().count() > limits.max_chars {
        return Err(ValidationError::TooLong {
            max: limits.max_chars,
        });
    }
    if trimmed.chars().count() < limits.min_chars {
        return Err(ValidationError::TooShort {
            min: limits.min_chars,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        let l = Limits::default();
        assert_eq!(validate_text("   \n", &l), Err(ValidationError::Empty));
        assert_eq!(validate_text(" ab ", &l), Err(ValidationError::TooShort { min: 3 }));
        assert!(validate_text("abc", &l).is_ok());
        assert!(validate_text(&"é".repeat(10_000), &l).is_ok());
        assert_eq!(
            validate_text(&"a".repeat(10_001), &l),
            Err(ValidationError::TooLong { max: 10_000 })
        );
    }

    #[test]
    fn messages_read_well() {
        assert_eq!(
            ValidationError::TooShort { min: 3 }.to_string(),
            "Text must be at least 3 characters long"
        );
    }
}
