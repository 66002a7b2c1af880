pub mod auth;
pub mod config;
pub mod error;
pub mod login;
pub mod server;
pub mod utils;

pub use config::{GateConfig, is_auth_required};
pub use error::GateError;
pub use login::Authenticator;
pub use server::Server;
