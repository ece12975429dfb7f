/// Checks if a domain matches a wildcard pattern
///
/// Two pattern forms are supported:
/// 1. Exact: "example.com" matches only "example.com"
/// 2. Wildcard: "*.example.com" matches the bare domain and any depth of
///    subdomain ("example.com", "blog.example.com", "api.v2.example.com")
///
/// Domains are expected to be lowercase already; matching is case-sensitive.
///
/// # Examples
///
/// ```
/// use kumo_atlas::url::matches_wildcard;
///
/// assert!(matches_wildcard("example.com", "example.com"));
/// assert!(matches_wildcard("*.example.com", "blog.example.com"));
/// assert!(!matches_wildcard("*.example.com", "example.org"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    let Some(base) = pattern.strip_prefix("*.") else {
        return candidate == pattern;
    };

    if candidate == base {
        return true;
    }

    // Subdomain match: candidate must end with ".<base>"
    candidate
        .strip_suffix(base)
        .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches_wildcard("example.com", "example.com"));
        assert!(!matches_wildcard("example.com", "other.com"));
        assert!(!matches_wildcard("example.com", "blog.example.com"));
    }

    #[test]
    fn test_wildcard_matches_bare_domain() {
        assert!(matches_wildcard("*.example.com", "example.com"));
    }

    #[test]
    fn test_wildcard_matches_subdomains() {
        assert!(matches_wildcard("*.example.com", "blog.example.com"));
        assert!(matches_wildcard("*.example.com", "deep.nested.example.com"));
    }

    #[test]
    fn test_wildcard_rejects_other_domains() {
        assert!(!matches_wildcard("*.example.com", "example.org"));
        assert!(!matches_wildcard("*.example.com", "notexample.com"));
        assert!(!matches_wildcard("*.example.com", "example.com.org"));
    }

    #[test]
    fn test_wildcard_rejects_partial_label() {
        // "myexample.com" ends with "example.com" but is a different domain
        assert!(!matches_wildcard("*.example.com", "myexample.com"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!matches_wildcard("example.com", "EXAMPLE.COM"));
    }

    #[test]
    fn test_empty_strings() {
        assert!(!matches_wildcard("*.example.com", ""));
        assert!(!matches_wildcard("", "example.com"));
        assert!(matches_wildcard("", ""));
    }

    #[test]
    fn test_multi_label_base() {
        assert!(matches_wildcard("*.co.uk", "co.uk"));
        assert!(matches_wildcard("*.co.uk", "example.co.uk"));
        assert!(!matches_wildcard("*.co.uk", "co.jp"));
    }
}
