//! Input validation utilities
//!
//! Provides sanitisation of caller-supplied redirect targets.

/// Resolves the `next` parameter to a local redirect target.
///
/// Absent, empty, or off-site values (absolute URLs, protocol-relative
/// `//host` paths, backslash tricks) fall back to `base_url`.
pub fn sanitize_next(next: Option<&str>, base_url: &str) -> String {
    match next.map(str::trim) {
        Some(target) if is_local_path(target) => target.to_string(),
        _ => base_url.to_string(),
    }
}

fn is_local_path(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_base_url() {
        assert_eq!(sanitize_next(None, "/"), "/");
        assert_eq!(sanitize_next(Some(""), "/app/"), "/app/");
        assert_eq!(sanitize_next(Some("   "), "/app/"), "/app/");
    }

    #[test]
    fn test_keeps_local_paths() {
        assert_eq!(sanitize_next(Some("/foo"), "/"), "/foo");
        assert_eq!(sanitize_next(Some("/tree?path=a%20b"), "/"), "/tree?path=a%20b");
    }

    #[test]
    fn test_rejects_off_site_targets() {
        for target in [
            "https://evil.example/",
            "//evil.example",
            "/\\evil.example",
            "javascript:alert(1)",
            "foo",
            "/foo\r\nSet-Cookie: x=y",
        ] {
            assert_eq!(sanitize_next(Some(target), "/"), "/", "{target:?}");
        }
    }
}
