use crate::error::{ApiError, ApiResult};

/// Strips every non-digit character from a raw CPF.
///
/// Accepts the punctuated form commonly typed by users
/// (`123.456.789-01`) as well as the bare digit string.
pub fn sanitize_cpf(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validates an already-sanitized CPF: exactly 11 numeric digits.
pub fn validate_cpf(digits: &str) -> ApiResult<()> {
    if digits.len() != 11 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::ValidationError(
            "CPF must contain exactly 11 numeric digits".to_string(),
        ));
    }
    Ok(())
}

/// Sanitizes and validates in one step, returning the normalized digits.
pub fn normalize_cpf(raw: &str) -> ApiResult<String> {
    let digits = sanitize_cpf(raw);
    validate_cpf(&digits)?;
    Ok(digits)
}
