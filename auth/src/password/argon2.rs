use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed hash with the default cost parameters that no password matches.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$Y2F0YWxvZy1kZWNveS0xNg$veuboir4+nPln+fE08SK4RZWF912xyB3PN9svDOpHdc";

/// Password hashing implementation.
///
/// Argon2id with the crate default cost (19 MiB, 2 passes), which puts a
/// single verification in the tens of milliseconds on server hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a freshly generated random salt.
    ///
    /// Two calls with the same input produce different strings; compare
    /// with [`PasswordHasher::verify`], never by string equality.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC hash.
    ///
    /// Parameters and salt are read from the hash itself and the digest
    /// comparison is constant time. A hash that cannot be parsed yields
    /// `false`.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend one full verification on a password that has no stored hash.
    ///
    /// Lets a lookup miss cost the same as a wrong password. Always `false`.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let _ = self.verify(password, DECOY_HASH);
        false
    }
}
