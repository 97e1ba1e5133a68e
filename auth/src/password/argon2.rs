use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id (v0x13) with a fixed work factor:
/// 19 456 KiB of memory, 2 iterations, 1 lane.
/// Every call to [`PasswordHasher::hash`] draws a fresh random salt.
pub struct PasswordHasher {
    memory_cost_kib: u32,
    iterations: u32,
    parallelism: u32,
    decoy_hash: OnceLock<Option<String>>,
}

impl PasswordHasher {
    pub const MEMORY_COST_KIB: u32 = 19_456;
    pub const ITERATIONS: u32 = 2;
    pub const PARALLELISM: u32 = 1;

    /// Create a new password hasher with the documented work factor.
    pub fn new() -> Self {
        Self {
            memory_cost_kib: Self::MEMORY_COST_KIB,
            iterations: Self::ITERATIONS,
            parallelism: Self::PARALLELISM,
            decoy_hash: OnceLock::new(),
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(
            self.memory_cost_kib,
            self.iterations,
            self.parallelism,
            None,
        )
        .map_err(|e| PasswordError::HashingFailed(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a plaintext password securely.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Parameter, entropy or resource failure
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch is `false`, never an error. A stored value that is not a
    /// valid PHC string cannot match any password and is also `false`.
    ///
    /// The parameters embedded in the stored hash are the ones used for
    /// verification, so hashes produced under an older work factor still verify.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification against a hash no password was issued for.
    ///
    /// Lets a caller spend the same work on an unknown account as on a known
    /// one. The decoy is hashed once, on first use, with this hasher's work
    /// factor.
    pub fn verify_decoy(&self, password: &str) {
        if let Some(decoy) = self.decoy_hash() {
            let _ = self.verify(password, decoy);
        }
    }

    fn decoy_hash(&self) -> Option<&str> {
        self.decoy_hash
            .get_or_init(|| self.hash(DECOY_PASSWORD).ok())
            .as_deref()
    }
}

const DECOY_PASSWORD: &str = "decoy-credential-for-unknown-accounts";

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "Aa1!aaaa";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("Aa1!aaab", &hash));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("Aa1!aaaa").expect("Failed to hash password");

        assert_ne!(hash, "Aa1!aaaa");
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("Aa1!aaaa").expect("Failed to hash password");
        let second = hasher.hash("Aa1!aaaa").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("Aa1!aaaa", &first));
        assert!(hasher.verify("Aa1!aaaa", &second));
    }

    #[test]
    fn test_verify_invalid_hash_is_false() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_decoy_hash_costs_the_same_as_a_real_hash() {
        let hasher = PasswordHasher::new();
        assert!(hasher.decoy_hash.get().is_none());

        hasher.verify_decoy("Aa1!aaaa");

        let decoy = hasher
            .decoy_hash()
            .expect("Decoy hash was not computed")
            .to_string();
        assert!(decoy.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(!hasher.verify("Aa1!aaaa", &decoy));

        // Computed once and reused
        hasher.verify_decoy("Bb2@bbbb");
        assert_eq!(hasher.decoy_hash(), Some(decoy.as_str()));
    }
}
