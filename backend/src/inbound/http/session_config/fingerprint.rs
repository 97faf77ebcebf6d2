//! Short, non-reversible identifier for the active session key.
//!
//! Operators compare fingerprints across replicas to confirm they share a
//! signing key; the key material itself never reaches the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// Lowercase hex of the first eight bytes of `SHA-256(signing key)`.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use project_registry::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fingerprint = key_fingerprint(&Key::derive_from(&[7_u8; 64]));
/// assert_eq!(fingerprint.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
