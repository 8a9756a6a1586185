//! Constants used throughout the CLI.

/// Environment variable holding the secret for non-interactive use.
pub const SECRET_ENV: &str = "CREDHASH_SECRET";

/// Minimum length accepted for a new secret, in characters.
pub const MIN_SECRET_LENGTH: usize = 8;

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Config file named on the command line does not exist.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Secret does not match the stored credential.
    pub const AUTH_FAILED: i32 = 5;

    /// Stored credential is malformed or tampered with.
    pub const INTEGRITY_FAILED: i32 = 6;
}
