//! Verification of candidate secrets against stored credentials.

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::codec::decode;
use crate::error::{CredentialError, Result};
use crate::kdf::derive;
use crate::params::CostProfile;

/// Check `candidate` against a stored credential.
///
/// Returns `Ok(true)` on a match and `Ok(false)` for a wrong secret. The
/// comparison takes the same time wherever the derived bytes first differ.
///
/// # Errors
///
/// - `CredentialError::Verification` if the stored string does not decode.
///   A corrupted record is never reported as a plain mismatch.
/// - `CredentialError::CostLimitExceeded` if the stored memory cost is above
///   [`MAX_MEMORY_COST`](crate::params::MAX_MEMORY_COST). Nothing is derived.
/// - `CredentialError::Derivation` if the stored costs are unusable by the
///   KDF (for example a salt shorter than 8 bytes, fewer than 8 KiB per
///   lane, or a hash shorter than 4 bytes).
///
/// # Examples
///
/// ```
/// use credhash_core::{check, CostProfile, CredentialHasher};
///
/// let hasher = CredentialHasher::new(CostProfile {
///     iterations: 1,
///     memory_cost: 64,
///     ..CostProfile::default()
/// })
/// .unwrap();
/// let stored = hasher.hash_and_encode(b"12345678").unwrap();
///
/// assert!(check(b"12345678", &stored).unwrap());
/// assert!(!check(b"12345679", &stored).unwrap());
/// ```
pub fn check(candidate: &[u8], encoded: &str) -> Result<bool> {
    let (expected, params) = decode(encoded).map_err(CredentialError::Verification)?;
    params.check_limits()?;
    let derived = Zeroizing::new(derive(candidate, &params)?);

    let matched = constant_time_eq(&derived, &expected);
    tracing::debug!(matched, "checked candidate against stored credential");
    Ok(matched)
}

/// Report whether a stored credential was made with costs other than
/// `profile`'s, so it can be re-hashed after the next successful check.
///
/// # Errors
///
/// Returns `CredentialError::Decode` if the stored string does not decode.
pub fn needs_rehash(encoded: &str, profile: &CostProfile) -> Result<bool> {
    let (_, params) = decode(encoded)?;
    let outdated = !profile.matches(&params);
    if outdated {
        tracing::debug!(
            stored = ?params,
            target = ?profile,
            "stored credential uses outdated costs"
        );
    }
    Ok(outdated)
}

/// Equality that inspects every byte of equal-length inputs.
///
/// Differing lengths return `false` immediately; lengths are not secret.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
