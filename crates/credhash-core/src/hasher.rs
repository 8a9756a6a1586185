//! Configured hashing service.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::codec::encode;
use crate::error::Result;
use crate::kdf::derive;
use crate::params::{CostProfile, HashParameters};
use crate::salt::{OsSaltSource, SaltSource};
use crate::verify;

/// Hashes new secrets under one cost profile and salt source.
///
/// Cheap to clone and safe to share between threads; it holds no mutable
/// state.
#[derive(Clone)]
pub struct CredentialHasher {
    profile: CostProfile,
    salt_source: Arc<dyn SaltSource>,
}

impl Default for CredentialHasher {
    /// Default cost profile, OS salt source.
    fn default() -> Self {
        Self {
            profile: CostProfile::default(),
            salt_source: Arc::new(OsSaltSource),
        }
    }
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl CredentialHasher {
    /// Create a hasher for `profile`, salting from the OS.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidProfile` if the profile is outside the
    /// KDF's limits.
    pub fn new(profile: CostProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            profile,
            salt_source: Arc::new(OsSaltSource),
        })
    }

    /// Replace the salt source.
    pub fn with_salt_source(mut self, salt_source: Arc<dyn SaltSource>) -> Self {
        self.salt_source = salt_source;
        self
    }

    pub fn profile(&self) -> &CostProfile {
        &self.profile
    }

    /// Hash `secret` with a fresh salt and return the encoded credential.
    ///
    /// # Errors
    ///
    /// - `CredentialError::RandomSource` if no salt could be drawn
    /// - `CredentialError::Derivation` if the KDF rejects the profile
    pub fn hash_and_encode(&self, secret: &[u8]) -> Result<String> {
        let params = HashParameters::generate(&self.profile, self.salt_source.as_ref())?;
        let hash = Zeroizing::new(derive(secret, &params)?);

        tracing::debug!(
            memory_cost = params.memory_cost(),
            iterations = params.iterations(),
            parallelism = params.parallelism(),
            "hashed new credential"
        );

        Ok(encode(&hash, &params))
    }

    /// Check `candidate` against a stored credential. See [`verify::check`].
    pub fn check(&self, candidate: &[u8], encoded: &str) -> Result<bool> {
        verify::check(candidate, encoded)
    }

    /// Whether a stored credential differs from this hasher's profile.
    pub fn needs_rehash(&self, encoded: &str) -> Result<bool> {
        verify::needs_rehash(encoded, &self.profile)
    }
}

/// Hash `secret` under the default profile with an OS-drawn salt.
///
/// # Errors
///
/// Returns `CredentialError::RandomSource` if the OS generator fails.
pub fn hash_and_encode(secret: &[u8]) -> Result<String> {
    CredentialHasher::default().hash_and_encode(secret)
}
