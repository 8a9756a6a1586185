//! Hash parameters and cost profiles.
//!
//! A [`HashParameters`] value describes one derivation: its salt and its
//! cost knobs. It is built once (fresh salt at hashing time, or parsed back
//! out of a stored credential) and never changed afterwards.
//!
//! A [`CostProfile`] is the template new parameters are built from. Raising
//! the profile does not invalidate existing credentials, because decoding
//! reads the costs from the stored string itself.

use serde::{Deserialize, Serialize};

use crate::error::{CredentialError, Result};
use crate::salt::{OsSaltSource, SaltSource};

/// Default time cost (passes over memory).
pub const DEFAULT_ITERATIONS: u32 = 5;

/// Default memory cost in KiB (32 MiB).
pub const DEFAULT_MEMORY_COST: u32 = 32 * 1024;

/// Default number of lanes.
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Default salt length in bytes.
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Default derived hash length in bytes.
pub const DEFAULT_OUTPUT_LENGTH: usize = 32;

/// Shortest salt the derivation primitive accepts.
pub const MIN_SALT_LENGTH: usize = 8;

/// Shortest output the derivation primitive produces.
pub const MIN_OUTPUT_LENGTH: usize = 4;

/// Largest lane count the derivation primitive accepts.
pub const MAX_PARALLELISM: u32 = 0x00FF_FFFF;

/// Largest memory cost, in KiB (1 GiB), that will be derived.
///
/// Argon2 allocates the whole block matrix up front, so a stored credential
/// naming a larger cost is refused before derivation rather than attempted.
/// Profiles above this limit are rejected too, so every new hash stays
/// verifiable.
pub const MAX_MEMORY_COST: u32 = 1024 * 1024;

/// Cost settings used when hashing a new secret.
///
/// Deserializes with per-field defaults so a config file only needs to name
/// the knobs it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostProfile {
    pub iterations: u32,
    /// KiB of working memory.
    pub memory_cost: u32,
    pub parallelism: u32,
    pub salt_length: usize,
    pub output_length: usize,
}

impl Default for CostProfile {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            memory_cost: DEFAULT_MEMORY_COST,
            parallelism: DEFAULT_PARALLELISM,
            salt_length: DEFAULT_SALT_LENGTH,
            output_length: DEFAULT_OUTPUT_LENGTH,
        }
    }
}

impl CostProfile {
    /// Check the profile against the limits of the derivation primitive.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidProfile` naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(CredentialError::InvalidProfile(
                "iterations must be at least 1".to_string(),
            ));
        }
        if self.parallelism == 0 || self.parallelism > MAX_PARALLELISM {
            return Err(CredentialError::InvalidProfile(format!(
                "parallelism must be between 1 and {} (got {})",
                MAX_PARALLELISM, self.parallelism
            )));
        }
        if u64::from(self.memory_cost) < 8 * u64::from(self.parallelism) {
            return Err(CredentialError::InvalidProfile(format!(
                "memory_cost must be at least 8 KiB per lane ({} KiB for {} lanes, got {})",
                8 * u64::from(self.parallelism),
                self.parallelism,
                self.memory_cost
            )));
        }
        if self.memory_cost > MAX_MEMORY_COST {
            return Err(CredentialError::InvalidProfile(format!(
                "memory_cost must be at most {} KiB (got {})",
                MAX_MEMORY_COST, self.memory_cost
            )));
        }
        if self.salt_length < MIN_SALT_LENGTH {
            return Err(CredentialError::InvalidProfile(format!(
                "salt_length must be at least {} bytes (got {})",
                MIN_SALT_LENGTH, self.salt_length
            )));
        }
        if self.output_length < MIN_OUTPUT_LENGTH {
            return Err(CredentialError::InvalidProfile(format!(
                "output_length must be at least {} bytes (got {})",
                MIN_OUTPUT_LENGTH, self.output_length
            )));
        }
        Ok(())
    }

    /// True when `params` was produced with exactly this profile's costs
    /// and lengths.
    pub fn matches(&self, params: &HashParameters) -> bool {
        params.iterations() == self.iterations
            && params.memory_cost() == self.memory_cost
            && params.parallelism() == self.parallelism
            && params.salt().len() == self.salt_length
            && params.output_length() == self.output_length
    }
}

/// Salt and cost parameters for one derivation.
#[derive(Clone, PartialEq, Eq)]
pub struct HashParameters {
    salt: Vec<u8>,
    iterations: u32,
    memory_cost: u32,
    parallelism: u32,
    output_length: usize,
}

impl HashParameters {
    /// Assemble parameters from explicit values.
    ///
    /// No range checks happen here; the derivation primitive rejects values
    /// it cannot use.
    pub fn new(
        salt: impl Into<Vec<u8>>,
        iterations: u32,
        memory_cost: u32,
        parallelism: u32,
        output_length: usize,
    ) -> Self {
        Self {
            salt: salt.into(),
            iterations,
            memory_cost,
            parallelism,
            output_length,
        }
    }

    /// Build parameters for a new hash: validated profile costs plus a fresh
    /// salt drawn from `source`.
    pub fn generate(profile: &CostProfile, source: &dyn SaltSource) -> Result<Self> {
        profile.validate()?;
        let salt = source.random_bytes(profile.salt_length)?;
        Ok(Self::new(
            salt,
            profile.iterations,
            profile.memory_cost,
            profile.parallelism,
            profile.output_length,
        ))
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Working memory in KiB.
    pub fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    /// Number of hash bytes the derivation produces.
    pub fn output_length(&self) -> usize {
        self.output_length
    }

    /// Refuse costs above the verification ceiling.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::CostLimitExceeded` when `memory_cost` is
    /// above [`MAX_MEMORY_COST`].
    pub fn check_limits(&self) -> Result<()> {
        if self.memory_cost > MAX_MEMORY_COST {
            return Err(CredentialError::CostLimitExceeded(format!(
                "memory_cost {} KiB is above the {} KiB limit",
                self.memory_cost, MAX_MEMORY_COST
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for HashParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashParameters")
            .field("salt_length", &self.salt.len())
            .field("iterations", &self.iterations)
            .field("memory_cost", &self.memory_cost)
            .field("parallelism", &self.parallelism)
            .field("output_length", &self.output_length)
            .finish()
    }
}

/// Parameters for a new hash under the default profile, salted from the OS.
///
/// # Errors
///
/// Returns `CredentialError::RandomSource` if the OS generator fails.
pub fn new_default_parameters() -> Result<HashParameters> {
    HashParameters::generate(&CostProfile::default(), &OsSaltSource)
}
