//! Translation from `validator` derive output into the unified error shape.

use estately_core::error::{AppError, FieldError};
use validator::ValidationErrors;

/// Flatten `validator` errors into one field-tagged validation error.
pub fn from_validation_errors(errors: &ValidationErrors) -> AppError {
    let mut fields: Vec<FieldError> = Vec::new();
    for (field, issues) in errors.field_errors() {
        for issue in issues {
            let message = issue
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {field}"));
            fields.push(FieldError::new(field.to_string(), message));
        }
    }
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    AppError::validation_fields(fields)
}
