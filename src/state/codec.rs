//! Boolean encoding shared by all state backends.

use super::StateError;

const TRUTHY: [&str; 6] = ["1", "yes", "y", "true", "t", "on"];
const FALSY: [&str; 6] = ["0", "no", "n", "false", "f", "off"];

/// Canonical token for a state value.
pub fn encode(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Parse a stored token.
///
/// Surrounding whitespace is ignored and matching is case-insensitive.
/// An empty string decodes to `false`.
pub fn decode(raw: &str) -> Result<bool, StateError> {
    let token = raw.trim().to_ascii_lowercase();
    if token.is_empty() || FALSY.contains(&token.as_str()) {
        return Ok(false);
    }
    if TRUTHY.contains(&token.as_str()) {
        return Ok(true);
    }
    Err(StateError::InvalidValue(raw.to_string()))
}
