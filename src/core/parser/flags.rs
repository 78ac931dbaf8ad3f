//! Flag spelling for named parameters.
//!
//! A one-character name is written `-x`; longer names are written `--name`.

use crate::config::{LONG_FLAG_PREFIX, SHORT_FLAG_PREFIX};

/// Flag token that names the parameter `name`.
pub fn flag_for(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("{}{}", SHORT_FLAG_PREFIX, name)
    } else {
        format!("{}{}", LONG_FLAG_PREFIX, name)
    }
}

/// Whether a token is written like a flag (`-x` or `--anything`).
pub fn is_flag(token: &str) -> bool {
    token.starts_with(LONG_FLAG_PREFIX)
        || (token.starts_with(SHORT_FLAG_PREFIX) && token.chars().count() == 2)
}

/// Parameter name carried by a flag token.
pub fn flag_name(token: &str) -> Option<&str> {
    if let Some(name) = token.strip_prefix(LONG_FLAG_PREFIX) {
        return Some(name);
    }
    if is_flag(token) {
        return token.strip_prefix(SHORT_FLAG_PREFIX);
    }
    None
}
