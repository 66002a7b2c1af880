//! Server core functionality
//!
//! This module contains the HTTP adapter around the login flow: routing,
//! signed cookies, startup advisories, and the listener.

pub mod cookie;
pub mod core;
pub mod handlers;
pub mod security;

pub use cookie::SessionCookies;
pub use self::core::Server;
pub use handlers::{AppState, router};
pub use security::{Advisory, AdvisoryKind, check_deployment_security};
