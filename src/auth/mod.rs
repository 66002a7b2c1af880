//! Authentication system
//!
//! Handles the configured credential, password verification, and session tokens.

pub mod credentials;
pub mod session;
pub mod validator;

pub use credentials::{Credential, HashAlgorithm};
pub use session::SessionToken;
pub use validator::{hash_password, verify};
