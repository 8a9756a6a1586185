//! Error types for credential hashing operations.
//!
//! Decoding a stored credential has its own closed enum, [`DecodeError`], so
//! callers can tell a corrupted record apart from a wrong secret. Everything
//! else is a [`CredentialError`]. Neither type ever carries secret material.

use thiserror::Error;

/// Result type alias for credential operations.
pub type Result<T> = std::result::Result<T, CredentialError>;

/// Stable classification of every failure this crate can report.
///
/// Useful for metrics labels and log fields where the full error message
/// (which may quote a corrupted record) is not wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The OS entropy source failed
    RandomSourceFailure,
    /// Wrong segment count or missing leading `$`
    FormatInvalid,
    /// Algorithm tag other than `argon2id`
    UnsupportedAlgorithm,
    /// Version other than 19, or unparsable
    UnsupportedVersion,
    /// Malformed cost segment
    ParametersInvalid,
    /// Salt is not valid base64
    SaltInvalid,
    /// Hash is not valid base64
    HashInvalid,
    /// The KDF rejected the parameters
    DerivationFailure,
    /// Stored costs are above the verification ceiling
    CostLimitExceeded,
    /// Cost profile out of range
    InvalidProfile,
}

impl ErrorKind {
    /// Short snake_case name, suitable for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RandomSourceFailure => "random_source_failure",
            Self::FormatInvalid => "format_invalid",
            Self::UnsupportedAlgorithm => "unsupported_algorithm",
            Self::UnsupportedVersion => "unsupported_version",
            Self::ParametersInvalid => "parameters_invalid",
            Self::SaltInvalid => "salt_invalid",
            Self::HashInvalid => "hash_invalid",
            Self::DerivationFailure => "derivation_failure",
            Self::CostLimitExceeded => "cost_limit_exceeded",
            Self::InvalidProfile => "invalid_profile",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an encoded credential string was rejected.
///
/// Variants are listed in the order the decoder checks them; decoding stops
/// at the first violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Wrong number of `$`-delimited segments (or no leading `$`)
    #[error("Malformed credential: expected 6 '$'-delimited segments, found {segments}")]
    FormatInvalid { segments: usize },

    /// Algorithm tag is not the one this crate derives with
    #[error("Unsupported algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    /// Version segment is unparsable or names another algorithm version
    #[error("Unsupported algorithm version: {0:?}")]
    UnsupportedVersion(String),

    /// Cost parameter segment is not `m=<u32>,t=<u32>,p=<u32>`
    #[error("Invalid cost parameters {segment:?}: {reason}")]
    ParametersInvalid { segment: String, reason: String },

    /// Salt segment is not unpadded standard base64
    #[error("Invalid salt encoding: {0}")]
    SaltInvalid(String),

    /// Hash segment is not unpadded standard base64
    #[error("Invalid hash encoding: {0}")]
    HashInvalid(String),
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FormatInvalid { .. } => ErrorKind::FormatInvalid,
            Self::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Self::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Self::ParametersInvalid { .. } => ErrorKind::ParametersInvalid,
            Self::SaltInvalid(_) => ErrorKind::SaltInvalid,
            Self::HashInvalid(_) => ErrorKind::HashInvalid,
        }
    }
}

/// Core error type for credential operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The OS entropy source could not produce salt bytes
    #[error("Random source failure: {0}")]
    RandomSource(String),

    /// A stored credential could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Verification could not start because the stored credential is malformed.
    ///
    /// Distinct from a wrong secret, which is reported as `Ok(false)`.
    #[error("Stored credential rejected: {0}")]
    Verification(#[source] DecodeError),

    /// The KDF primitive rejected the parameters (a configuration error)
    #[error("Key derivation failed: {0}")]
    Derivation(String),

    /// A stored credential names costs above the verification ceiling
    #[error("Stored credential costs exceed limit: {0}")]
    CostLimitExceeded(String),

    /// A cost profile is outside the range the KDF accepts
    #[error("Invalid cost profile: {0}")]
    InvalidProfile(String),
}

impl CredentialError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RandomSource(_) => ErrorKind::RandomSourceFailure,
            Self::Decode(err) | Self::Verification(err) => err.kind(),
            Self::Derivation(_) => ErrorKind::DerivationFailure,
            Self::CostLimitExceeded(_) => ErrorKind::CostLimitExceeded,
            Self::InvalidProfile(_) => ErrorKind::InvalidProfile,
        }
    }

    /// The decode failure behind this error, if the stored string was at fault.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode(err) | Self::Verification(err) => Some(err),
            _ => None,
        }
    }
}
