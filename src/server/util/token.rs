//! Primitives shared by every hashed token kind.
//!
//! Raw tokens are only ever handed to the client (in a cookie or an emailed link);
//! the database stores the SHA-256 digest so a leaked table cannot be replayed.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes behind every raw token.
pub const TOKEN_BYTES: usize = 64;

/// Generates a fresh raw token.
///
/// # Returns
/// - `String` - 64 random bytes encoded as unpadded base64url (86 characters)
pub fn generate_raw_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hashes a raw token for storage and lookup.
///
/// # Returns
/// - `String` - Lower-case hex SHA-256 digest (64 characters)
pub fn hash_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Appends the raw token to a frontend URL as the `token` query parameter.
///
/// # Arguments
/// - `base_url` - Configured link target, which may already carry a query string
/// - `raw` - Raw token to embed
pub fn build_link(base_url: &str, raw: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    let encoded: String = url::form_urlencoded::byte_serialize(raw.as_bytes()).collect();
    format!("{}{}token={}", base_url, separator, encoded)
}
