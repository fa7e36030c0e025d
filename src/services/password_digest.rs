use std::fmt;
use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

/// How the `password` column of the employee table is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestScheme {
    /// Unsalted hex MD5, as written by MySQL `md5()`. Only for existing stores.
    #[default]
    Md5,
    /// PHC-format Argon2 hash.
    Argon2,
}

impl DigestScheme {
    /// Checks a plaintext secret against a stored digest.
    pub fn verify(&self, secret: &str, stored: &str) -> bool {
        match self {
            DigestScheme::Md5 => {
                let expected = md5_hex(secret);
                let stored = stored.to_ascii_lowercase();
                expected.as_bytes().ct_eq(stored.as_bytes()).into()
            }
            DigestScheme::Argon2 => {
                let parsed = match PasswordHash::new(stored) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        tracing::warn!("Unparsable argon2 hash in store: {}", e);
                        return false;
                    }
                };
                Argon2::default()
                    .verify_password(secret.as_bytes(), &parsed)
                    .is_ok()
            }
        }
    }

    /// Produces the value to store for `secret`.
    pub fn digest(&self, secret: &str) -> Result<String, password_hash::Error> {
        match self {
            DigestScheme::Md5 => Ok(md5_hex(secret)),
            DigestScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
                Ok(hash.to_string())
            }
        }
    }
}

impl FromStr for DigestScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(DigestScheme::Md5),
            "argon2" => Ok(DigestScheme::Argon2),
            other => Err(format!("Unknown password digest: {}", other)),
        }
    }
}

impl fmt::Display for DigestScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestScheme::Md5 => f.write_str("md5"),
            DigestScheme::Argon2 => f.write_str("argon2"),
        }
    }
}

fn md5_hex(secret: &str) -> String {
    format!("{:x}", Md5::digest(secret.as_bytes()))
}
