//! Salt generation.
//!
//! Salts come from a [`SaltSource`] handed to whoever builds parameters, so
//! production code reads the operating system generator while tests can
//! substitute a fixed or failing source.

use crate::error::{CredentialError, Result};

/// A source of salt bytes.
pub trait SaltSource: Send + Sync {
    /// Fill `buf` entirely with fresh random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<()>;

    /// Return `n` fresh random bytes.
    fn random_bytes(&self, n: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; n];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }
}

/// The operating system CSPRNG (`getrandom(2)`, `BCryptGenRandom`, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSaltSource;

impl SaltSource for OsSaltSource {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        getrandom::getrandom(buf).map_err(|e| {
            tracing::error!(error = %e, "OS random source failed");
            CredentialError::RandomSource(e.to_string())
        })
    }
}

/// Draw `n` bytes from the operating system generator.
///
/// There is no fallback: if the OS source fails the error is returned.
pub fn random_bytes(n: usize) -> Result<Vec<u8>> {
    OsSaltSource.random_bytes(n)
}

/// A salt source that repeats one byte pattern. Only for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone)]
pub struct FixedSaltSource {
    pattern: Vec<u8>,
}

#[cfg(any(test, feature = "test-support"))]
impl FixedSaltSource {
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl SaltSource for FixedSaltSource {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        if self.pattern.is_empty() {
            return Err(CredentialError::RandomSource(
                "fixed salt pattern is empty".to_string(),
            ));
        }
        for (byte, value) in buf.iter_mut().zip(self.pattern.iter().cycle()) {
            *byte = *value;
        }
        Ok(())
    }
}
