//! Key derivation using Argon2id.
//!
//! The derivation is memory-hard: every call touches `memory_cost` KiB of
//! memory `iterations` times, which makes guessing secrets expensive on GPUs
//! and ASICs. This is the only slow step in the crate; callers serving
//! requests should run it on a worker thread.

use argon2::{Algorithm, Argon2, Version};

use crate::error::{CredentialError, Result};
use crate::params::HashParameters;

/// Algorithm tag written into (and required from) encoded credentials.
pub const ALGORITHM_TAG: &str = "argon2id";

/// Argon2 version number (0x13) written into encoded credentials.
pub const ALGORITHM_VERSION: u32 = 0x13;

/// Derive `params.output_length()` bytes from `secret`.
///
/// Same secret and parameters always give the same bytes.
///
/// # Errors
///
/// Returns `CredentialError::Derivation` when Argon2 rejects the parameters
/// (for example fewer than 8 KiB of memory per lane, a salt shorter than
/// 8 bytes, or an output shorter than 4 bytes). The message never includes
/// the secret.
///
/// # Examples
///
/// ```
/// use credhash_core::{derive, HashParameters};
///
/// let params = HashParameters::new(b"unique-salt-1234".to_vec(), 1, 64, 1, 32);
/// let hash = derive(b"my-passphrase", &params).unwrap();
/// assert_eq!(hash.len(), 32);
/// ```
pub fn derive(secret: &[u8], params: &HashParameters) -> Result<Vec<u8>> {
    let argon2_params = argon2::Params::new(
        params.memory_cost(),
        params.iterations(),
        params.parallelism(),
        Some(params.output_length()),
    )
    .map_err(|e| CredentialError::Derivation(format!("Invalid Argon2 parameters: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    tracing::trace!(
        memory_cost = params.memory_cost(),
        iterations = params.iterations(),
        parallelism = params.parallelism(),
        output_length = params.output_length(),
        "deriving credential hash"
    );

    let mut hash = vec![0u8; params.output_length()];
    argon2
        .hash_password_into(secret, params.salt(), &mut hash)
        .map_err(|e| CredentialError::Derivation(e.to_string()))?;

    Ok(hash)
}
