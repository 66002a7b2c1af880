//! Credential storage and parsing
//!
//! Handles the single configured password hash and the hash formats it may take.

use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// Hash algorithms understood by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
    Argon2,
    Bcrypt,
}

impl HashAlgorithm {
    pub fn tag(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Argon2 => "argon2",
            HashAlgorithm::Bcrypt => "bcrypt",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for HashAlgorithm {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            "argon2" => Ok(HashAlgorithm::Argon2),
            "bcrypt" => Ok(HashAlgorithm::Bcrypt),
            other => Err(AuthError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// A stored hash split into its algorithm and the algorithm-specific remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedHash<'a> {
    /// `algorithm:salt:hexdigest`
    Salted {
        algorithm: HashAlgorithm,
        salt: &'a str,
        digest: &'a str,
    },
    /// `argon2:<PHC string>`
    Argon2(&'a str),
    /// `bcrypt:<modular crypt string>`
    Bcrypt(&'a str),
}

/// Splits a stored hash into its parts. Returns `None` for anything malformed.
pub fn parse_hash(stored: &str) -> Option<ParsedHash<'_>> {
    let (tag, rest) = stored.split_once(':')?;
    let algorithm = tag.parse::<HashAlgorithm>().ok()?;

    match algorithm {
        HashAlgorithm::Argon2 if !rest.is_empty() => Some(ParsedHash::Argon2(rest)),
        HashAlgorithm::Bcrypt if !rest.is_empty() => Some(ParsedHash::Bcrypt(rest)),
        HashAlgorithm::Argon2 | HashAlgorithm::Bcrypt => None,
        salted => {
            let (salt, digest) = rest.split_once(':')?;
            if digest.is_empty() || digest.contains(':') {
                return None;
            }
            Some(ParsedHash::Salted {
                algorithm: salted,
                salt,
                digest,
            })
        }
    }
}

/// The configured password hash. Empty means authentication is disabled.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    hash: String,
}

impl Credential {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// No password configured
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        !self.hash.is_empty()
    }

    /// Whether the stored hash is in a format `verify` understands.
    pub fn is_well_formed(&self) -> bool {
        parse_hash(&self.hash).is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

// Keeps the hash out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("configured", &self.is_configured())
            .finish()
    }
}
