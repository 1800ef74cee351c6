// Operator input parsing and validation

use crate::error::{AppError, Result};

/// Maximum length of an assignment key or queue name
pub const MAX_NAME_LEN: usize = 128;

/// Split a comma-separated expression list as typed by an operator.
///
/// All whitespace inside a token is removed and empty tokens are dropped:
/// `"paid_* , free_*/2,,"` -> `["paid_*", "free_*/2"]`
pub fn parse_expression_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|token| token.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Validate an assignment key
pub fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(AppError::Validation(
            "Assignment key cannot be empty".to_string(),
        ));
    }

    if key.len() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Assignment key too long (max {} chars)",
            MAX_NAME_LEN
        )));
    }

    Ok(())
}

/// Validate a concrete queue name for registration.
///
/// Names that would be read back as expressions (`*`, leading `!` or `@`)
/// are rejected.
pub fn validate_queue_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::Validation("Queue name cannot be empty".to_string()));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Queue name too long (max {} chars)",
            MAX_NAME_LEN
        )));
    }

    if name.contains('*') || name.starts_with('!') || name.starts_with('@') {
        return Err(AppError::Validation(format!(
            "Queue name '{}' contains expression syntax",
            name
        )));
    }

    if name.chars().any(char::is_whitespace) {
        return Err(AppError::Validation(format!(
            "Queue name '{}' contains whitespace",
            name
        )));
    }

    Ok(())
}
