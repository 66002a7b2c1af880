//! Network utilities
//!
//! Provides network-related utility functions.

use std::net::IpAddr;

/// Whether a configured bind address means "listen on every interface".
pub fn is_all_interfaces(bind_address: &str) -> bool {
    let trimmed = bind_address.trim();
    if trimmed.is_empty() || trimmed == "*" {
        return true;
    }

    let unbracketed = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    unbracketed
        .parse::<IpAddr>()
        .map(|ip| ip.is_unspecified())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_interfaces() {
        for addr in ["", " ", "*", "0.0.0.0", "::", "[::]"] {
            assert!(is_all_interfaces(addr), "{addr:?}");
        }
    }

    #[test]
    fn test_specific_interfaces() {
        for addr in ["127.0.0.1", "::1", "192.168.1.10", "localhost", "[::1]"] {
            assert!(!is_all_interfaces(addr), "{addr:?}");
        }
    }
}
