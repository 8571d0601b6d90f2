//! Password, OTP and generated-credential helpers

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Hash password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify password using argon2
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// 4-digit one-time code, zero padded
pub fn generate_otp() -> String {
    format!("{:04}", rand::thread_rng().gen_range(0..10_000))
}

/// SHA-256 hex digest of an OTP
pub fn hash_otp(otp: &str) -> String {
    hex::encode(Sha256::digest(otp.trim().as_bytes()))
}

/// 8 lowercase hex chars, handed out once to new sales accounts
pub fn generate_password() -> String {
    let bytes: [u8; 4] = rand::thread_rng().r#gen();
    hex::encode(bytes)
}

/// `{prefix}-{year}-{6 upper hex}`, e.g. `SE-2025-4F1A9C`
pub fn generate_referral_id(prefix: &str, year: i32) -> String {
    let bytes: [u8; 3] = rand::thread_rng().r#gen();
    format!("{prefix}-{year}-{}", hex::encode_upper(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
        assert!(!verify_password("secret1", "not-a-hash"));
    }

    #[test]
    fn test_otp_format() {
        for _ in 0..50 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 4);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_otp_hash_is_stable() {
        assert_eq!(hash_otp("1234"), hash_otp("1234"));
        assert_ne!(hash_otp("1234"), hash_otp("1235"));
        assert_eq!(hash_otp("1234").len(), 64);
    }

    #[test]
    fn test_generated_password() {
        let pw = generate_password();
        assert_eq!(pw.len(), 8);
        assert!(pw.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_referral_id_format() {
        let id = generate_referral_id("SE", 2025);
        assert!(id.starts_with("SE-2025-"));
        let suffix = &id["SE-2025-".len()..];
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }
}
