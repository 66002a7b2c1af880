//! Password validator
//!
//! Verifies a submitted password against the configured hash and produces
//! new hashes for the configuration file.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::RngCore;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use super::credentials::{HashAlgorithm, ParsedHash, parse_hash};
use crate::error::AuthError;

/// Number of random bytes in a salt for the salted digest formats (12 hex chars).
const SALT_BYTES: usize = 6;

const ARGON2_SALT_BYTES: usize = 16;

#[cfg(not(test))]
const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const BCRYPT_COST: u32 = 4;

/// Checks `candidate` against `stored_hash`.
///
/// Empty, malformed, or unsupported hashes never match. No input panics.
pub fn verify(stored_hash: &str, candidate: &str) -> bool {
    let Some(parsed) = parse_hash(stored_hash) else {
        return false;
    };

    match parsed {
        ParsedHash::Salted {
            algorithm,
            salt,
            digest,
        } => match salted_digest(algorithm, candidate, salt) {
            Some(computed) => {
                constant_time_eq(computed.as_bytes(), digest.to_ascii_lowercase().as_bytes())
            }
            None => false,
        },
        ParsedHash::Argon2(phc) => match PasswordHash::new(phc) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        },
        ParsedHash::Bcrypt(hash) => bcrypt::verify(candidate, hash).unwrap_or(false),
    }
}

/// Hashes `passphrase` into a string suitable for the `password` setting.
pub fn hash_password(passphrase: &str, algorithm: HashAlgorithm) -> Result<String, AuthError> {
    let hashed = match algorithm {
        HashAlgorithm::Argon2 => {
            let mut salt_bytes = [0u8; ARGON2_SALT_BYTES];
            rand::thread_rng().fill_bytes(&mut salt_bytes);
            let salt = SaltString::encode_b64(&salt_bytes)?;
            Argon2::default()
                .hash_password(passphrase.as_bytes(), &salt)?
                .to_string()
        }
        HashAlgorithm::Bcrypt => bcrypt::hash(passphrase, BCRYPT_COST)?,
        salted => {
            let mut salt_bytes = [0u8; SALT_BYTES];
            rand::thread_rng().fill_bytes(&mut salt_bytes);
            let salt = hex::encode(salt_bytes);
            let digest = salted_digest(salted, passphrase, &salt)
                .ok_or_else(|| AuthError::UnsupportedAlgorithm(salted.to_string()))?;
            return Ok(format!("{}:{}:{}", salted, salt, digest));
        }
    };

    Ok(format!("{}:{}", algorithm, hashed))
}

/// Lowercase hex of `H(passphrase ++ salt)` for the salted digest family.
fn salted_digest(algorithm: HashAlgorithm, passphrase: &str, salt: &str) -> Option<String> {
    match algorithm {
        HashAlgorithm::Sha1 => Some(digest_hex::<Sha1>(passphrase, salt)),
        HashAlgorithm::Sha256 => Some(digest_hex::<Sha256>(passphrase, salt)),
        HashAlgorithm::Sha512 => Some(digest_hex::<Sha512>(passphrase, salt)),
        HashAlgorithm::Argon2 | HashAlgorithm::Bcrypt => None,
    }
}

fn digest_hex<D: Digest>(passphrase: &str, salt: &str) -> String {
    let mut hasher = D::new();
    hasher.update(passphrase.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
