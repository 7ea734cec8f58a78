//! Participant display-name rule, applied by the server to `hello`/`done`
//! payloads and by the client to its `--name` argument.

use thiserror::Error;

/// Maximum name length, in characters
pub const MAX_NAME_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("participant name must not be empty")]
    Empty,

    #[error("participant name is too long ({actual} > {max} chars)")]
    TooLong { max: usize, actual: usize },
}

/// Trim `raw` and check it is non-empty and at most `MAX_NAME_LENGTH` characters.
pub fn normalize_name(raw: &str) -> Result<String, NameError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }

    let actual = trimmed.chars().count();
    if actual > MAX_NAME_LENGTH {
        return Err(NameError::TooLong {
            max: MAX_NAME_LENGTH,
            actual,
        });
    }

    Ok(trimmed.to_string())
}
