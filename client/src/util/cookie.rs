//! Cookie-string parsing for the dual-credential scheme.
//!
//! The backend sets an HttpOnly session cookie plus a readable `token`
//! cookie; this module extracts both from `Cookie`-style strings and
//! `Set-Cookie` headers without pulling in a full cookie crate.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Extract a named cookie's value from an `a=b; c=d` cookie string.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    for part in header.split(';') {
        if let Some((key, value)) = part.split_once('=') {
            if key.trim() == name {
                return Some(value.trim().to_owned());
            }
        }
    }
    None
}

/// Extract the `name=value` pair from a `Set-Cookie` header, dropping
/// attributes (`Path`, `HttpOnly`, `Max-Age`, ...).
pub fn set_cookie_pair(header: &str) -> Option<(String, String)> {
    let first = header.split(';').next()?;
    let (name, value) = first.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_owned(), value.trim().to_owned()))
}

/// Extract a specific cookie's value from a `Set-Cookie` header.
pub fn set_cookie_value(header: &str, name: &str) -> Option<String> {
    let (cookie_name, value) = set_cookie_pair(header)?;
    (cookie_name == name).then_some(value)
}
