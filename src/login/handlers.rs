//! Login handlers for the password gate.
//!
//! The Authenticator decides, per request, whether to show the login form,
//! redirect onward, or issue a new session. It holds only the immutable
//! credential loaded at startup, so one instance serves every request.

use log::{info, warn};

use super::actions::{Action, INVALID_PASSWORD, LoginRequest, Message};
use super::page::{Page, render_login_page};
use crate::auth::{self, Credential, SessionToken};
use crate::config::GateConfig;
use crate::error::GateError;
use crate::utils::validation::sanitize_next;

#[derive(Debug, Clone)]
pub struct Authenticator {
    credential: Credential,
    base_url: String,
}

impl Authenticator {
    pub fn new(credential: Credential, base_url: impl Into<String>) -> Self {
        Self {
            credential,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.credential(), config.base_url.clone())
    }

    /// Whether a password is configured. When false every login succeeds.
    pub fn is_auth_required(&self) -> bool {
        self.credential.is_configured()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Local redirect target for this request, defaulting to the base path.
    pub fn next_target(&self, request: &LoginRequest) -> String {
        sanitize_next(request.next.as_deref(), &self.base_url)
    }

    /// Handles `GET /login`.
    ///
    /// # Arguments
    ///
    /// * `request` - The login request carrying the `next` target.
    /// * `current_user` - Session already verified by the cookie transport, if any.
    pub fn handle_get(&self, request: &LoginRequest, current_user: Option<&SessionToken>) -> Action {
        let next = self.next_target(request);

        match current_user {
            Some(_) => Action::Redirect { target: next },
            None => Action::RenderPage {
                next,
                message: None,
            },
        }
    }

    /// Handles `POST /login`.
    ///
    /// With no password configured the caller is let through without any check.
    /// A wrong password re-renders the form and never issues a session.
    pub fn handle_post(&self, request: &LoginRequest) -> Action {
        let next = self.next_target(request);

        if !self.is_auth_required() {
            return Action::Redirect { target: next };
        }

        if auth::verify(self.credential.as_str(), request.typed_password()) {
            info!("Login succeeded, issuing new session");
            Action::SetCookieAndRedirect {
                token: SessionToken::generate(),
                target: next,
            }
        } else {
            warn!("Rejected login attempt with invalid password");
            Action::RenderPage {
                next,
                message: Some(Message::error(INVALID_PASSWORD)),
            }
        }
    }

    /// Renders the login form for `next_target` with an optional message.
    pub fn render_login_page(
        &self,
        next_target: &str,
        message: Option<&Message>,
    ) -> Result<Page, GateError> {
        render_login_page(&self.base_url, next_target, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{HashAlgorithm, hash_password};

    fn gate_with_password(password: &str) -> Authenticator {
        let hash = hash_password(password, HashAlgorithm::Sha256).unwrap();
        Authenticator::new(Credential::new(hash), "/")
    }

    fn open_gate() -> Authenticator {
        Authenticator::new(Credential::disabled(), "/")
    }

    fn post(password: Option<&str>, next: Option<&str>) -> LoginRequest {
        LoginRequest {
            next: next.map(String::from),
            password: password.map(String::from),
        }
    }

    #[test]
    fn test_get_renders_form_when_anonymous() {
        let action = gate_with_password("pw").handle_get(&post(None, Some("/foo")), None);
        assert_eq!(
            action,
            Action::RenderPage {
                next: "/foo".into(),
                message: None
            }
        );
    }

    #[test]
    fn test_get_redirects_when_already_authenticated() {
        let session = SessionToken::generate();
        let action = gate_with_password("pw").handle_get(&post(None, Some("/foo")), Some(&session));
        assert_eq!(action, Action::Redirect { target: "/foo".into() });
    }

    #[test]
    fn test_get_defaults_next_to_base_url() {
        let gate = Authenticator::new(Credential::disabled(), "/app/");
        let action = gate.handle_get(&LoginRequest::default(), None);
        assert_eq!(
            action,
            Action::RenderPage {
                next: "/app/".into(),
                message: None
            }
        );
    }

    #[test]
    fn test_post_without_password_configured_always_redirects() {
        let gate = open_gate();
        for password in [None, Some(""), Some("anything")] {
            let action = gate.handle_post(&post(password, Some("/foo")));
            assert_eq!(action, Action::Redirect { target: "/foo".into() });
        }
    }

    #[test]
    fn test_post_correct_password_issues_session() {
        let gate = gate_with_password("s3cret");
        match gate.handle_post(&post(Some("s3cret"), Some("/foo"))) {
            Action::SetCookieAndRedirect { target, .. } => assert_eq!(target, "/foo"),
            other => panic!("expected session, got {:?}", other),
        }
    }

    #[test]
    fn test_consecutive_logins_get_distinct_tokens() {
        let gate = gate_with_password("s3cret");
        let token = || match gate.handle_post(&post(Some("s3cret"), None)) {
            Action::SetCookieAndRedirect { token, .. } => token,
            other => panic!("expected session, got {:?}", other),
        };
        assert_ne!(token(), token());
    }

    #[test]
    fn test_post_wrong_password_renders_error() {
        let gate = gate_with_password("s3cret");
        for password in [None, Some(""), Some("s3cretx")] {
            let action = gate.handle_post(&post(password, Some("/foo")));
            assert_eq!(
                action,
                Action::RenderPage {
                    next: "/foo".into(),
                    message: Some(Message::error("Invalid password")),
                }
            );
        }
    }

    #[test]
    fn test_post_malformed_hash_looks_like_wrong_password() {
        let gate = Authenticator::new(Credential::new("plaintext"), "/");
        assert!(gate.is_auth_required());
        let action = gate.handle_post(&post(Some("plaintext"), None));
        assert_eq!(
            action,
            Action::RenderPage {
                next: "/".into(),
                message: Some(Message::error(INVALID_PASSWORD)),
            }
        );
    }

    #[test]
    fn test_post_ignores_off_site_next() {
        let action = open_gate().handle_post(&post(None, Some("https://evil.example/")));
        assert_eq!(action, Action::Redirect { target: "/".into() });
    }

    #[test]
    fn test_is_auth_required_matches_credential() {
        assert!(!open_gate().is_auth_required());
        assert!(gate_with_password("pw").is_auth_required());
    }
}
