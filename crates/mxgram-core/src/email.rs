//! Email address format checks.

use regex::Regex;

/// Basic format check: local part, `@`, domain with a dot and a 2+ letter TLD.
///
/// Intentionally strict ASCII; internationalized domains and quoted local
/// parts are out of scope.
pub fn is_valid_format(email: &str) -> bool {
    let re = Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("valid regex");
    re.is_match(email)
}

/// Everything after the first `@`; empty when there is none.
///
/// Unreachable fallback after `is_valid_format`, kept for direct callers.
pub fn extract_domain(email: &str) -> &str {
    match email.split_once('@') {
        Some((_, domain)) => domain,
        None => "",
    }
}
