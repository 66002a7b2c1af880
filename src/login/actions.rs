//! Login request and outcome types
//!
//! The Authenticator never touches HTTP directly. It consumes a `LoginRequest`
//! and answers with an `Action` that the host layer carries out.

use std::fmt;

use crate::auth::SessionToken;

/// Text shown when the submitted password does not match.
pub const INVALID_PASSWORD: &str = "Invalid password";

/// Request-scoped login input. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    /// Redirect destination supplied by the caller
    pub next: Option<String>,
    /// Submitted plaintext password, absent when the form field is missing
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn typed_password(&self) -> &str {
        self.password.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Error => f.write_str("error"),
        }
    }
}

/// Message rendered above the login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// What the host layer must do to complete a login request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send the browser on to `target`
    Redirect { target: String },
    /// Show the login form
    RenderPage {
        next: String,
        message: Option<Message>,
    },
    /// Store `token` in the signed session cookie, then redirect to `target`
    SetCookieAndRedirect { token: SessionToken, target: String },
}
