//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use credhash_core::CredentialError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config file)
    NotFound { message: String, hint: String },

    /// Secret did not match the stored credential
    AuthFailed(String),

    /// Stored credential could not be decoded
    IntegrityFailed { message: String, detail: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::AuthFailed(message) => write!(f, "{}", message),
            CliError::IntegrityFailed { message, detail } => write!(f, "{}: {}", message, detail),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed(message.into())
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed(_) => exit_codes::AUTH_FAILED,
            CliError::IntegrityFailed { .. } => exit_codes::INTEGRITY_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Map a core error onto the CLI's exit-code classes.
///
/// Malformed stored credentials become `IntegrityFailed`, bad cost profiles
/// become `InvalidInput`; anything else stays a general error.
pub fn credential_error(err: CredentialError) -> anyhow::Error {
    if let Some(decode) = err.decode_error() {
        return CliError::IntegrityFailed {
            message: format!("Stored credential is malformed ({})", decode.kind()),
            detail: decode.to_string(),
        }
        .into();
    }
    match err {
        CredentialError::InvalidProfile(message) => {
            CliError::invalid_input(format!("Invalid cost profile in config: {}", message)).into()
        }
        CredentialError::CostLimitExceeded(detail) => CliError::IntegrityFailed {
            message: "Stored credential is unusable (cost_limit_exceeded)".to_string(),
            detail,
        }
        .into(),
        other => anyhow::Error::new(other),
    }
}

/// Map an error raised while checking a stored credential.
///
/// A derivation failure here means the stored costs are unusable, so it is an
/// integrity failure rather than a general error.
pub fn stored_credential_error(err: CredentialError) -> anyhow::Error {
    match err {
        CredentialError::Derivation(detail) => CliError::IntegrityFailed {
            message: "Stored credential is unusable (derivation_failure)".to_string(),
            detail,
        }
        .into(),
        other => credential_error(other),
    }
}

/// Exit code for an error returned from a command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>()
        .map(CliError::exit_code)
        .unwrap_or(1)
}
