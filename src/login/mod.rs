//! Login flow
//!
//! The authentication contract: whether a password is required, verifying it,
//! and telling the host layer what to do next.

pub mod actions;
pub mod handlers;
pub mod page;

pub use actions::{Action, LoginRequest, Message, MessageKind};
pub use handlers::Authenticator;
pub use page::{Page, render_login_page};
