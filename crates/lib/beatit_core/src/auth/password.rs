//! Password hashing via Argon2id.
//!
//! Salts are app-managed 16-byte values; hashes are raw 32-byte Argon2id
//! output. Both are stored base64-encoded on the user record.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::{Rng, rng};

use crate::error::CoreError;

/// Argon2id memory cost in KiB (64 MiB).
const MEMORY_KIB: u32 = 64 * 1024;
/// Argon2id iteration count.
const ITERATIONS: u32 = 4;
/// Argon2id lanes.
const PARALLELISM: u32 = 8;
/// Derived hash length in bytes.
const HASH_LEN: usize = 32;
/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Generate a random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rng().fill(&mut salt[..]);
    salt
}

/// Base64-encode a salt for storage on the user record.
pub fn encode_salt(salt: &[u8]) -> String {
    BASE64.encode(salt)
}

/// Derive the base64-encoded Argon2id hash of `password` with `salt`.
/// Deterministic for a given (password, salt) pair.
pub fn hash_password(password: &str, salt: &[u8]) -> Result<String, CoreError> {
    let mut out = [0u8; HASH_LEN];
    hasher()?
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| CoreError::Internal(format!("argon2 hash: {e}")))?;
    Ok(BASE64.encode(out))
}

/// Verify `password` against the stored base64 hash and salt.
///
/// Malformed base64 is a caller error, reported as a mismatch rather than a
/// hard failure. The hash comparison is constant-time.
pub fn verify_password(password: &str, stored_hash_b64: &str, stored_salt_b64: &str) -> bool {
    let Ok(salt) = BASE64.decode(stored_salt_b64) else {
        return false;
    };
    let Ok(stored_hash) = BASE64.decode(stored_hash_b64) else {
        return false;
    };
    let mut out = [0u8; HASH_LEN];
    let Ok(argon) = hasher() else {
        return false;
    };
    if argon
        .hash_password_into(password.as_bytes(), &salt, &mut out)
        .is_err()
    {
        return false;
    }
    constant_time_eq(&out, &stored_hash)
}

fn hasher() -> Result<Argon2<'static>, CoreError> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, Some(HASH_LEN))
        .map_err(|e| CoreError::Internal(format!("argon2 params: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_is_16_bytes_and_unique() {
        let a = generate_salt();
        let b = generate_salt();
        assert_eq!(a.len(), 16);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_deterministic_for_same_salt() {
        let salt = generate_salt();
        let h1 = hash_password("secret-password", &salt).unwrap();
        let h2 = hash_password("secret-password", &salt).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn verify_roundtrip() {
        let salt = generate_salt();
        let hash = hash_password("secret-password", &salt).unwrap();
        let salt_b64 = BASE64.encode(salt);

        assert!(verify_password("secret-password", &hash, &salt_b64));
        assert!(!verify_password("wrong-password", &hash, &salt_b64));
    }

    #[test]
    fn verify_fails_with_different_salt() {
        let salt = generate_salt();
        let other_salt = generate_salt();
        let hash = hash_password("secret-password", &salt).unwrap();

        assert!(!verify_password(
            "secret-password",
            &hash,
            &BASE64.encode(other_salt)
        ));
    }

    #[test]
    fn verify_fails_with_mutated_hash() {
        let salt = generate_salt();
        let hash = hash_password("secret-password", &salt).unwrap();
        let mut mutated = hash.into_bytes();
        mutated[0] = if mutated[0] == b'A' { b'B' } else { b'A' };
        let mutated = String::from_utf8(mutated).unwrap();

        assert!(!verify_password(
            "secret-password",
            &mutated,
            &BASE64.encode(salt)
        ));
    }

    #[test]
    fn malformed_base64_salt_is_a_mismatch_not_a_panic() {
        let salt = generate_salt();
        let hash = hash_password("secret-password", &salt).unwrap();
        assert!(!verify_password("secret-password", &hash, "!!not-base64!!"));
    }

    #[test]
    fn constant_time_eq_basic() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hello!"));
    }
}
