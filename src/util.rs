//! Internal utilities.

use std::cmp::Ordering;

/// Compares two hostnames ignoring case.
///
/// Case folding uses Unicode lowercase mappings, so `"ÄBC.de"` and
/// `"äbc.de"` compare equal as well as plain ASCII names.
#[must_use]
pub fn compare_hostnames(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Returns `true` if both hostnames are equal ignoring case.
#[must_use]
pub fn hostnames_equal(a: &str, b: &str) -> bool {
    compare_hostnames(a, b) == Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ignores_case() {
        assert!(hostnames_equal("ABC.com", "abc.com"));
        assert!(!hostnames_equal("abd.com", "abc.com"));
        assert!(hostnames_equal("ÄBC.de", "äbc.de"));
    }

    #[test]
    fn ordering() {
        assert_eq!(compare_hostnames("Alpha", "beta"), Ordering::Less);
        assert_eq!(compare_hostnames("gamma", "BETA"), Ordering::Greater);
        assert_eq!(compare_hostnames("abc", "abcd"), Ordering::Less);
    }
}
