//! Login page rendering
//!
//! Supplies the template variables; askama does the rendering.

use askama::Template;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::actions::Message;
use crate::error::GateError;

/// Characters left untouched when escaping `next` into a query string.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    base_url: &'a str,
    next: &'a str,
    message: Option<&'a Message>,
}

/// A rendered HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub html: String,
}

/// Renders the login form. An empty `next_target` falls back to `base_url`.
pub fn render_login_page(
    base_url: &str,
    next_target: &str,
    message: Option<&Message>,
) -> Result<Page, GateError> {
    let target = if next_target.is_empty() {
        base_url
    } else {
        next_target
    };
    let escaped = url_escape(target);

    let html = LoginTemplate {
        base_url,
        next: &escaped,
        message,
    }
    .render()?;

    Ok(Page { html })
}

pub fn url_escape(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_escape() {
        assert_eq!(url_escape("/tree/a b?x=1"), "%2Ftree%2Fa%20b%3Fx%3D1");
        assert_eq!(url_escape("plain-name_1.0~"), "plain-name_1.0~");
    }

    #[test]
    fn test_render_without_message() {
        let page = render_login_page("/", "/foo", None).unwrap();
        assert!(page.html.contains("login?next=%2Ffoo\""));
        assert!(page.html.contains("name=\"password\""));
        assert!(!page.html.contains("Invalid password"));
    }

    #[test]
    fn test_render_defaults_next_to_base() {
        let page = render_login_page("/app/", "", None).unwrap();
        assert!(page.html.contains("login?next=%2Fapp%2F\""));
    }

    #[test]
    fn test_render_with_error_message() {
        let message = Message::error("Invalid password");
        let page = render_login_page("/", "/", Some(&message)).unwrap();
        assert!(page.html.contains("Invalid password"));
        assert!(page.html.contains("class=\"message error\""));
    }
}
