//! Validation Utilities

use validator::ValidationErrors;

use super::error::AppError;

/// Convert validation errors to AppError.
///
/// Only the first failing field is reported, ordered by field name so the
/// message is stable across runs.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let message = fields
        .first()
        .and_then(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field))
            })
        })
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}
