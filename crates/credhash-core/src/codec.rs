//! Encoded credential format.
//!
//! A credential is stored as one string:
//!
//! ```text
//! $argon2id$v=19$m=32768,t=5,p=1$<base64 salt>$<base64 hash>
//! ```
//!
//! Base64 uses the standard alphabet without padding. The hash length is not
//! written anywhere; decoding takes the output length from the decoded hash
//! itself, so a length field can never disagree with the bytes it describes.
//!
//! Decoding is strict. The string is first cut into its six fields, then each
//! field is checked in order, and the first violation is returned as a
//! [`DecodeError`] naming the field (and, for the cost field, the byte offset)
//! at fault.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde::Serialize;

use crate::error::DecodeError;
use crate::kdf::{ALGORITHM_TAG, ALGORITHM_VERSION};
use crate::params::HashParameters;

/// Number of `$`-delimited segments, counting the empty one before the
/// leading `$`.
const SEGMENT_COUNT: usize = 6;

/// Serialize a derived hash and its parameters.
///
/// # Examples
///
/// ```
/// use credhash_core::{encode, HashParameters};
///
/// let params = HashParameters::new(b"123".to_vec(), 5, 32768, 1, 3);
/// assert_eq!(
///     encode(b"abc", &params),
///     "$argon2id$v=19$m=32768,t=5,p=1$MTIz$YWJj"
/// );
/// ```
pub fn encode(hash: &[u8], params: &HashParameters) -> String {
    format!(
        "${}$v={}$m={},t={},p={}${}${}",
        ALGORITHM_TAG,
        ALGORITHM_VERSION,
        params.memory_cost(),
        params.iterations(),
        params.parallelism(),
        STANDARD_NO_PAD.encode(params.salt()),
        STANDARD_NO_PAD.encode(hash)
    )
}

/// Parse an encoded credential back into its hash bytes and parameters.
///
/// The returned parameters' `output_length` equals the hash length.
///
/// # Errors
///
/// Checks run in this order, returning the first failure:
/// 1. `FormatInvalid`: not exactly six `$`-delimited segments starting with `$`
/// 2. `UnsupportedAlgorithm`: tag is not `argon2id`
/// 3. `UnsupportedVersion`: version is not `v=19`
/// 4. `ParametersInvalid`: cost field is not `m=<n>,t=<n>,p=<n>` with non-zero `u32`s
/// 5. `SaltInvalid`: salt is not unpadded standard base64
/// 6. `HashInvalid`: hash is not unpadded standard base64
pub fn decode(encoded: &str) -> Result<(Vec<u8>, HashParameters), DecodeError> {
    decode_fields(encoded).map_err(|err| {
        tracing::debug!(kind = %err.kind(), "rejected encoded credential");
        err
    })
}

fn decode_fields(encoded: &str) -> Result<(Vec<u8>, HashParameters), DecodeError> {
    let fields = Fields::split(encoded)?;

    if fields.tag.text != ALGORITHM_TAG {
        return Err(DecodeError::UnsupportedAlgorithm(fields.tag.text.to_string()));
    }

    parse_version(fields.version.text)?;

    let costs = Costs::parse(fields.params)?;

    let salt = STANDARD_NO_PAD
        .decode(fields.salt.text)
        .map_err(|e| DecodeError::SaltInvalid(e.to_string()))?;

    let hash = STANDARD_NO_PAD
        .decode(fields.hash.text)
        .map_err(|e| DecodeError::HashInvalid(e.to_string()))?;

    let params = HashParameters::new(
        salt,
        costs.iterations,
        costs.memory_cost,
        costs.parallelism,
        hash.len(),
    );

    Ok((hash, params))
}

/// One field of an encoded credential and where it starts.
#[derive(Debug, Clone, Copy)]
struct Field<'a> {
    text: &'a str,
    offset: usize,
}

#[derive(Debug)]
struct Fields<'a> {
    tag: Field<'a>,
    version: Field<'a>,
    params: Field<'a>,
    salt: Field<'a>,
    hash: Field<'a>,
}

impl<'a> Fields<'a> {
    fn split(encoded: &'a str) -> Result<Self, DecodeError> {
        let mut fields: Vec<Field<'a>> = Vec::with_capacity(SEGMENT_COUNT);
        let mut start = 0;
        for (index, _) in encoded.match_indices('$') {
            fields.push(Field {
                text: &encoded[start..index],
                offset: start,
            });
            start = index + 1;
        }
        fields.push(Field {
            text: &encoded[start..],
            offset: start,
        });

        match fields.as_slice() {
            [lead, tag, version, params, salt, hash] if lead.text.is_empty() => Ok(Self {
                tag: *tag,
                version: *version,
                params: *params,
                salt: *salt,
                hash: *hash,
            }),
            _ => Err(DecodeError::FormatInvalid {
                segments: fields.len(),
            }),
        }
    }
}

fn parse_version(text: &str) -> Result<(), DecodeError> {
    let version = text
        .strip_prefix("v=")
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u32>().ok());

    match version {
        Some(ALGORITHM_VERSION) => Ok(()),
        _ => Err(DecodeError::UnsupportedVersion(text.to_string())),
    }
}

/// The `m=..,t=..,p=..` field.
#[derive(Debug, PartialEq, Eq)]
struct Costs {
    memory_cost: u32,
    iterations: u32,
    parallelism: u32,
}

impl Costs {
    fn parse(field: Field<'_>) -> Result<Self, DecodeError> {
        let invalid = |reason: String| DecodeError::ParametersInvalid {
            segment: field.text.to_string(),
            reason,
        };

        let mut cursor = Cursor::new(field);
        cursor.expect("m=").map_err(invalid)?;
        let memory_cost = cursor.number().map_err(invalid)?;
        cursor.expect(",t=").map_err(invalid)?;
        let iterations = cursor.number().map_err(invalid)?;
        cursor.expect(",p=").map_err(invalid)?;
        let parallelism = cursor.number().map_err(invalid)?;
        cursor.finish().map_err(invalid)?;

        for (name, value) in [("m", memory_cost), ("t", iterations), ("p", parallelism)] {
            if value == 0 {
                return Err(invalid(format!("{} must be greater than zero", name)));
            }
        }

        Ok(Self {
            memory_cost,
            iterations,
            parallelism,
        })
    }
}

/// Reads a field left to right, reporting failures by absolute byte offset
/// within the encoded credential.
struct Cursor<'a> {
    field: Field<'a>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(field: Field<'a>) -> Self {
        Self { field, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.field.text[self.pos..]
    }

    fn offset(&self) -> usize {
        self.field.offset + self.pos
    }

    fn expect(&mut self, literal: &str) -> Result<(), String> {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(format!("expected {:?} at offset {}", literal, self.offset()))
        }
    }

    fn number(&mut self) -> Result<u32, String> {
        let digits = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return Err(format!("expected digits at offset {}", self.offset()));
        }
        let text = &self.rest()[..digits];
        let value = text
            .parse::<u32>()
            .map_err(|_| format!("{} at offset {} does not fit in 32 bits", text, self.offset()))?;
        self.pos += digits;
        Ok(value)
    }

    fn finish(&self) -> Result<(), String> {
        if self.rest().is_empty() {
            Ok(())
        } else {
            Err(format!("unexpected trailing input at offset {}", self.offset()))
        }
    }
}

/// Non-secret summary of a stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialInfo {
    pub algorithm: &'static str,
    pub version: u32,
    pub memory_cost: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt_length: usize,
    pub output_length: usize,
}

impl From<&HashParameters> for CredentialInfo {
    fn from(params: &HashParameters) -> Self {
        Self {
            algorithm: ALGORITHM_TAG,
            version: ALGORITHM_VERSION,
            memory_cost: params.memory_cost(),
            iterations: params.iterations(),
            parallelism: params.parallelism(),
            salt_length: params.salt().len(),
            output_length: params.output_length(),
        }
    }
}

/// Decode a credential and describe its parameters without exposing salt or
/// hash bytes.
pub fn inspect(encoded: &str) -> Result<CredentialInfo, DecodeError> {
    let (_, params) = decode(encoded)?;
    Ok(CredentialInfo::from(&params))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN: &str = "$argon2id$v=19$m=32768,t=5,p=1$MTIz$YWJj";

    fn default_costs(salt: &[u8], output_length: usize) -> HashParameters {
        HashParameters::new(salt.to_vec(), 5, 32768, 1, output_length)
    }

    #[test]
    fn test_encode_golden_vector() {
        assert_eq!(encode(b"abc", &default_costs(b"123", 3)), GOLDEN);
    }

    #[test]
    fn test_decode_golden_vector() {
        let (hash, params) = decode(GOLDEN).unwrap();
        assert_eq!(hash, b"abc");
        assert_eq!(params, default_costs(b"123", 3));
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let salt = hex::decode("00ff10203040506070809a0b0c0d0e0f").unwrap();
        let hash = hex::decode("deadbeef00112233445566778899aabbccddeeff").unwrap();
        let params = HashParameters::new(salt, 7, 65536, 4, hash.len());

        let (decoded_hash, decoded_params) = decode(&encode(&hash, &params)).unwrap();

        assert_eq!(decoded_hash, hash);
        assert_eq!(decoded_params, params);
    }

    #[test]
    fn test_output_length_follows_hash_length() {
        // Encoding with a mismatched output_length cannot survive: the
        // decoded length is always the hash's real length.
        let params = default_costs(b"saltsalt", 64);
        let (_, decoded) = decode(&encode(b"twelve bytes", &params)).unwrap();
        assert_eq!(decoded.output_length(), 12);
    }

    #[test]
    fn test_older_costs_still_decode() {
        let (_, params) = decode("$argon2id$v=19$m=4096,t=3,p=2$MTIz$YWJj").unwrap();
        assert_eq!(params.memory_cost(), 4096);
        assert_eq!(params.iterations(), 3);
        assert_eq!(params.parallelism(), 2);
    }

    #[test]
    fn test_decode_empty_is_format_invalid() {
        assert_eq!(
            decode(""),
            Err(DecodeError::FormatInvalid { segments: 1 })
        );
    }

    #[test]
    fn test_decode_segment_count() {
        let too_few = "$argon2id$v=19$m=32768,t=5,p=1$MTIz";
        let too_many = "$argon2id$v=19$m=32768,t=5,p=1$MTIz$YWJj$";
        let no_leading = "argon2id$v=19$m=32768,t=5,p=1$MTIz$YWJj$x";

        assert!(matches!(decode(too_few), Err(DecodeError::FormatInvalid { segments: 5 })));
        assert!(matches!(decode(too_many), Err(DecodeError::FormatInvalid { segments: 7 })));
        assert!(matches!(decode(no_leading), Err(DecodeError::FormatInvalid { .. })));
    }

    #[test]
    fn test_decode_unsupported_algorithm() {
        let result = decode("$2b$v=19$m=32768,t=5,p=1$MTIz$YWJj");
        assert_eq!(result, Err(DecodeError::UnsupportedAlgorithm("2b".to_string())));

        let result = decode("$argon2i$v=19$m=32768,t=5,p=1$MTIz$YWJj");
        assert!(matches!(result, Err(DecodeError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_decode_unsupported_version() {
        for version in ["v=2", "v=16", "v=", "v=1x", "19", "x=19", "v=+19", "v=99999999999"] {
            let encoded = format!("$argon2id${}$m=32768,t=5,p=1$MTIz$YWJj", version);
            assert!(
                matches!(decode(&encoded), Err(DecodeError::UnsupportedVersion(_))),
                "{} should be rejected",
                version
            );
        }
    }

    #[test]
    fn test_decode_parameters_invalid() {
        for costs in [
            "ohai",
            "",
            "m=32768,t=5",
            "t=5,m=32768,p=1",
            "m=32768,t=5,p=1,",
            "m=32768,t=5,p=1,k=2",
            "m=32768, t=5,p=1",
            "m=-1,t=5,p=1",
            "m=32768,t=5,p=",
            "m=4294967296,t=5,p=1",
            "m=0,t=5,p=1",
            "m=32768,t=0,p=1",
            "m=32768,t=5,p=0",
            "M=32768,t=5,p=1",
        ] {
            let encoded = format!("$argon2id$v=19${}$MTIz$YWJj", costs);
            assert!(
                matches!(decode(&encoded), Err(DecodeError::ParametersInvalid { .. })),
                "{:?} should be rejected",
                costs
            );
        }
    }

    #[test]
    fn test_parameters_error_reports_offset() {
        let err = decode("$argon2id$v=19$m=32768,x=5,p=1$MTIz$YWJj").unwrap_err();
        match err {
            DecodeError::ParametersInvalid { segment, reason } => {
                assert_eq!(segment, "m=32768,x=5,p=1");
                assert!(reason.contains("offset 22"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_salt_invalid() {
        for salt in ["MT!z", "MTIz=", "M", "MTI="] {
            let encoded = format!("$argon2id$v=19$m=32768,t=5,p=1${}$YWJj", salt);
            assert!(
                matches!(decode(&encoded), Err(DecodeError::SaltInvalid(_))),
                "{:?} should be rejected",
                salt
            );
        }
    }

    #[test]
    fn test_decode_hash_invalid() {
        for hash in ["YW*j", "YWJj==", "Y"] {
            let encoded = format!("$argon2id$v=19$m=32768,t=5,p=1$MTIz${}", hash);
            assert!(
                matches!(decode(&encoded), Err(DecodeError::HashInvalid(_))),
                "{:?} should be rejected",
                hash
            );
        }
    }

    #[test]
    fn test_checks_run_in_order() {
        // Bad tag, version and salt at once: the tag is reported.
        let result = decode("$bcrypt$v=1$m=1,t=1,p=1$!!$!!");
        assert!(matches!(result, Err(DecodeError::UnsupportedAlgorithm(_))));

        // Bad costs and salt: the costs are reported.
        let result = decode("$argon2id$v=19$ohai$!!$!!");
        assert!(matches!(result, Err(DecodeError::ParametersInvalid { .. })));
    }

    #[test]
    fn test_non_ascii_input_does_not_panic() {
        let result = decode("$argon2id$v=19$m=3276\u{00e9},t=5,p=1$MTIz$YWJj");
        assert!(matches!(result, Err(DecodeError::ParametersInvalid { .. })));

        let result = decode("$argon2id$v=19$m=32768,t=5,p=1$\u{1f600}$YWJj");
        assert!(matches!(result, Err(DecodeError::SaltInvalid(_))));
    }

    #[test]
    fn test_inspect_reports_lengths_only() {
        let info = inspect(GOLDEN).unwrap();
        assert_eq!(info.algorithm, "argon2id");
        assert_eq!(info.version, 19);
        assert_eq!(info.memory_cost, 32768);
        assert_eq!(info.iterations, 5);
        assert_eq!(info.parallelism, 1);
        assert_eq!(info.salt_length, 3);
        assert_eq!(info.output_length, 3);

        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("MTIz"));
        assert!(!json.contains("YWJj"));
    }
}
