//! Bridge from `validator` derive output to [`CoreError::Validation`].

use validator::{Validate, ValidationError};

use crate::error::CoreError;

/// Custom `validator` rule rejecting NaN and infinities, which slip past
/// `range` checks.
pub fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

/// Run `validator` rules on an input DTO.
///
/// Field errors are flattened into one message, sorted by field name so the
/// text is stable: `"email: email; name: length"`.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(|errors| {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let codes: Vec<&str> = errs.iter().map(|e| &*e.code).collect();
                format!("{field}: {}", codes.join(", "))
            })
            .collect();
        parts.sort();
        CoreError::Validation(parts.join("; "))
    })
}
