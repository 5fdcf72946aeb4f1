//! Node naming rules
//!
//! Names end up as identifiers in the exported skin, so they follow the same
//! rule as imported asset names: no leading digit or hyphen, no whitespace,
//! and only letters, digits, `-` and `_`.

use crate::{LayoutError, Result};
use regex_lite::Regex;
use std::sync::OnceLock;

const NAME_PATTERN: &str = r"^[A-Za-z_ñáéíóúüÑÁÉÍÓÚÜ][A-Za-z0-9_\-ñáéíóúüÑÁÉÍÓÚÜ]*$";

fn name_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(NAME_PATTERN).ok()).as_ref()
}

/// Check whether a name is usable as a node identifier
pub fn is_valid_name(name: &str) -> bool {
    name_regex().is_some_and(|re| re.is_match(name))
}

/// Validate a name, returning it unchanged when it is acceptable
pub fn validate_name(name: &str) -> Result<&str> {
    if is_valid_name(name) {
        Ok(name)
    } else {
        Err(LayoutError::InvalidName(name.to_string()))
    }
}

/// Strip a file extension (and a `.9` nine-patch marker) from a file name
pub fn proper_name(file_name: &str) -> &str {
    let stem = match file_name.rfind('.') {
        Some(dot) if file_name[dot + 1..].chars().all(|c| c.is_ascii_alphanumeric()) => {
            &file_name[..dot]
        }
        _ => file_name,
    };
    stem.strip_suffix(".9").unwrap_or(stem)
}
