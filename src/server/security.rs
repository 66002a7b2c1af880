//! Startup security advisories
//!
//! Inspects the deployment once before the listener starts.

use log::error;

use crate::utils::network::is_all_interfaces;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryKind {
    Unencrypted,
    Unauthenticated,
}

/// A non-blocking warning about a risky configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
}

/// Lists the advisories for a deployment. Both may fire at once.
pub fn check_deployment_security(
    bind_address: &str,
    tls_enabled: bool,
    password_configured: bool,
) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    if !is_all_interfaces(bind_address) {
        return advisories;
    }

    if !tls_enabled {
        advisories.push(Advisory {
            kind: AdvisoryKind::Unencrypted,
            message: "listening on all interfaces without encryption".into(),
        });
    }

    if !password_configured {
        advisories.push(Advisory {
            kind: AdvisoryKind::Unauthenticated,
            message: "listening on all interfaces without authentication".into(),
        });
    }

    advisories
}

/// Emits advisories at the highest log severity
pub fn log_advisories(advisories: &[Advisory]) {
    for advisory in advisories {
        error!("Security advisory: {}", advisory.message);
    }
}
