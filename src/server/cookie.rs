//! Signed session cookies
//!
//! The cookie carries `token|issued_at|hmac`. The HMAC-SHA256 tag makes
//! tampering detectable. `issued_at` bounds the cookie's lifetime. There is
//! no server-side session table.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use chrono::Utc;
use hmac::{Hmac, Mac};
use log::info;
use rand::RngCore;
use sha2::Sha256;

use crate::auth::SessionToken;
use crate::config::GateConfig;
use crate::error::GateError;

type HmacSha256 = Hmac<Sha256>;

const GENERATED_SECRET_BYTES: usize = 32;

/// Tolerated clock skew for cookies stamped slightly in the future.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Issues, verifies, and clears the session cookie.
#[derive(Clone)]
pub struct SessionCookies {
    mac: HmacSha256,
    name: String,
    path: String,
    secure: bool,
    max_age_secs: i64,
}

impl SessionCookies {
    pub fn new(
        key: &[u8],
        name: impl Into<String>,
        path: impl Into<String>,
        secure: bool,
        max_age_secs: i64,
    ) -> Result<Self, GateError> {
        if key.is_empty() {
            return Err(GateError::InvalidConfig("cookie secret cannot be empty".into()));
        }
        let mac = HmacSha256::new_from_slice(key)
            .map_err(|e| GateError::InvalidConfig(format!("unusable cookie secret: {}", e)))?;

        Ok(Self {
            mac,
            name: name.into(),
            path: path.into(),
            secure,
            max_age_secs,
        })
    }

    pub fn from_config(config: &GateConfig) -> Result<Self, GateError> {
        let key = match config.cookie_secret_bytes()? {
            Some(key) => key,
            None => {
                info!("No cookie_secret configured; generated one, sessions end on restart");
                let mut key = vec![0u8; GENERATED_SECRET_BYTES];
                rand::thread_rng().fill_bytes(&mut key);
                key
            }
        };

        Self::new(
            &key,
            config.cookie_name.clone(),
            config.base_url.clone(),
            config.tls,
            config.cookie_max_age_secs(),
        )
    }

    /// `Set-Cookie` value storing `token`
    pub fn issue(&self, token: &SessionToken) -> String {
        let value = self.sign(token, Utc::now().timestamp());
        self.header_value(&value, self.max_age_secs)
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear(&self) -> String {
        self.header_value("", 0)
    }

    /// The verified session carried by the request, if any.
    pub fn session_from(&self, headers: &HeaderMap) -> Option<SessionToken> {
        let now = Utc::now().timestamp();
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == self.name)
            .find_map(|(_, value)| self.verify(value, now))
    }

    fn sign(&self, token: &SessionToken, issued_at: i64) -> String {
        let payload = format!("{}|{}", token, issued_at);
        let tag = hex::encode(self.tag(&payload).finalize().into_bytes());
        format!("{}|{}", payload, tag)
    }

    fn verify(&self, value: &str, now: i64) -> Option<SessionToken> {
        let (payload, tag_hex) = value.rsplit_once('|')?;
        let tag = hex::decode(tag_hex).ok()?;
        self.tag(payload).verify_slice(&tag).ok()?;

        let (token, issued_at) = payload.split_once('|')?;
        let issued_at: i64 = issued_at.parse().ok()?;
        if issued_at > now + MAX_CLOCK_SKEW_SECS || now - issued_at > self.max_age_secs {
            return None;
        }

        SessionToken::parse(token)
    }

    fn tag(&self, payload: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac
    }

    fn header_value(&self, value: &str, max_age_secs: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path={}; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, value, self.path, max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const DAY: i64 = 24 * 60 * 60;

    fn cookies(secure: bool) -> SessionCookies {
        SessionCookies::new(&[7u8; 32], "gate", "/", secure, 30 * DAY).unwrap()
    }

    fn headers_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_signed_value_verifies() {
        let cookies = cookies(false);
        let token = SessionToken::generate();
        let now = Utc::now().timestamp();
        let value = cookies.sign(&token, now);
        assert_eq!(cookies.verify(&value, now), Some(token));
    }

    #[test]
    fn test_tampered_value_rejected() {
        let cookies = cookies(false);
        let now = Utc::now().timestamp();
        let value = cookies.sign(&SessionToken::generate(), now);

        let other = SessionToken::generate().to_string();
        let (_, rest) = value.split_once('|').unwrap();
        let forged = format!("{}|{}", other, rest);
        assert_eq!(cookies.verify(&forged, now), None);
        assert_eq!(cookies.verify("garbage", now), None);
        assert_eq!(cookies.verify("a|b|zz", now), None);
    }

    #[test]
    fn test_other_key_rejected() {
        let now = Utc::now().timestamp();
        let value = cookies(false).sign(&SessionToken::generate(), now);
        let other = SessionCookies::new(&[9u8; 32], "gate", "/", false, 30 * DAY).unwrap();
        assert_eq!(other.verify(&value, now), None);
    }

    #[test]
    fn test_expired_value_rejected() {
        let cookies = cookies(false);
        let now = Utc::now().timestamp();
        let value = cookies.sign(&SessionToken::generate(), now - 31 * DAY);
        assert_eq!(cookies.verify(&value, now), None);

        let future = cookies.sign(&SessionToken::generate(), now + DAY);
        assert_eq!(cookies.verify(&future, now), None);
    }

    #[test]
    fn test_session_from_headers() {
        let cookies = cookies(false);
        let token = SessionToken::generate();
        let issued = cookies.issue(&token);
        let value = issued
            .strip_prefix("gate=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();

        let headers = headers_with(&format!("theme=dark; gate={}", value));
        assert_eq!(cookies.session_from(&headers), Some(token));
        assert_eq!(cookies.session_from(&headers_with("gate=forged")), None);
        assert_eq!(cookies.session_from(&HeaderMap::new()), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let issued = cookies(true).issue(&SessionToken::generate());
        assert!(issued.starts_with("gate="));
        assert!(issued.contains("HttpOnly"));
        assert!(issued.contains("Path=/"));
        assert!(issued.contains(&format!("Max-Age={}", 30 * DAY)));
        assert!(issued.ends_with("; Secure"));

        assert!(!cookies(false).issue(&SessionToken::generate()).contains("Secure"));
        assert!(cookies(false).clear().contains("Max-Age=0"));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(SessionCookies::new(&[], "gate", "/", false, DAY).is_err());
    }
}
