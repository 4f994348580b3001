//! Input Validation
//!
//! Pure checks for the `id`, `w` and `h` query parameters. Nothing here
//! corrects input: a value is either accepted verbatim or rejected.

use crate::error::{Result, TagError};

/// Strips the ASCII whitespace and NUL bytes query values may carry at
/// either end. Unicode spaces are kept so they fail validation.
pub fn trim_param(raw: &str) -> &str {
    raw.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// Whether `c` may appear in a product id.
fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Accepts an id made only of `[A-Za-z0-9_-]`.
///
/// The sanitized form (disallowed characters stripped) must be non-empty and
/// identical to the input, otherwise the id is rejected as `InvalidId`.
pub fn validate_product_id(raw: &str) -> Result<String> {
    let sanitized: String = raw.chars().filter(|c| is_id_char(*c)).collect();
    if sanitized.is_empty() || sanitized != raw {
        return Err(TagError::InvalidId);
    }
    Ok(sanitized)
}

/// Parses a width in `[1, max_width]`.
pub fn validate_width(raw: &str, max_width: u32) -> Result<u32> {
    parse_bounded(raw, max_width).ok_or(TagError::InvalidWidth)
}

/// Parses a height in `[1, max_height]`.
pub fn validate_height(raw: &str, max_height: u32) -> Result<u32> {
    parse_bounded(raw, max_height).ok_or(TagError::InvalidHeight)
}

fn parse_bounded(raw: &str, max: u32) -> Option<u32> {
    let value: i64 = trim_param(raw).parse().ok()?;
    if (1..=i64::from(max)).contains(&value) {
        u32::try_from(value).ok()
    } else {
        None
    }
}
