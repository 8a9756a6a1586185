//! # credhash core
//!
//! Salted, memory-hard hashing of credentials into a single self-describing
//! string, and verification of candidate secrets against that string.
//!
//! ## Architecture
//!
//! - **params**: `HashParameters` (salt + costs) and `CostProfile` templates
//! - **salt**: salt sources (OS CSPRNG, injectable for tests)
//! - **kdf**: Argon2id derivation
//! - **codec**: `$argon2id$v=19$m=..,t=..,p=..$salt$hash` encoding and strict decoding
//! - **verify**: constant-time verification and rehash detection
//! - **hasher**: `CredentialHasher`, the configured entry point
//!
//! ## Security Model
//!
//! - Argon2id with per-credential random salts
//! - The plaintext secret only ever crosses the API as an argument; it is
//!   never stored, logged, or included in an error
//! - Derived bytes are compared in constant time
//! - A malformed stored credential is an error, never a silent mismatch
//!
//! ## Example
//!
//! ```no_run
//! let stored = credhash_core::hash_and_encode(b"correct horse battery staple")?;
//! assert!(credhash_core::check(b"correct horse battery staple", &stored)?);
//! # Ok::<(), credhash_core::CredentialError>(())
//! ```

pub mod codec;
pub mod error;
pub mod hasher;
pub mod kdf;
pub mod params;
pub mod salt;
pub mod verify;

pub use codec::{decode, encode, inspect, CredentialInfo};
pub use error::{CredentialError, DecodeError, ErrorKind, Result};
pub use hasher::{hash_and_encode, CredentialHasher};
pub use kdf::{derive, ALGORITHM_TAG, ALGORITHM_VERSION};
pub use params::{new_default_parameters, CostProfile, HashParameters, MAX_MEMORY_COST};
pub use salt::{random_bytes, OsSaltSource, SaltSource};
pub use verify::{check, needs_rehash};

#[cfg(any(test, feature = "test-support"))]
pub use salt::FixedSaltSource;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
