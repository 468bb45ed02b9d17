use rand::distributions::{Alphanumeric, DistString};
use sha2::{Digest, Sha256};
use std::fmt::Write;

const SALT_LENGTH: usize = 16;

/// Salted password digest as stored with an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStore {
    pub salt: String,
    pub hashed: String,
}

/// Hash a new password with a fresh random salt
pub fn secure_password(password: &str) -> PasswordStore {
    let salt = Alphanumeric.sample_string(&mut rand::thread_rng(), SALT_LENGTH);
    let hashed = digest(password, &salt);
    PasswordStore { salt, hashed }
}

/// Check a password attempt against a stored digest
pub fn verify_password(password: &str, salt: &str, hashed: &str) -> bool {
    digest(password, salt) == hashed
}

fn digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());

    hasher
        .finalize()
        .iter()
        .fold(String::with_capacity(64), |mut out, byte| {
            let _ = write!(out, "{:02x}", byte);
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_round_trip() {
        let store = secure_password("gators123");

        assert_eq!(store.salt.len(), SALT_LENGTH);
        assert_eq!(store.hashed.len(), 64);
        assert!(verify_password("gators123", &store.salt, &store.hashed));
        assert!(!verify_password("gators124", &store.salt, &store.hashed));
    }

    #[test]
    fn test_salts_differ() {
        let a = secure_password("same");
        let b = secure_password("same");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hashed, b.hashed);
    }

    #[test]
    fn test_known_digest() {
        // sha256("abc") with an empty salt
        assert_eq!(
            digest("abc", ""),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
