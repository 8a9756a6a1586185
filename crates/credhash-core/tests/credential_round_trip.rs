use std::sync::Arc;

use credhash_core::{
    check, decode, encode, hash_and_encode, new_default_parameters, CostProfile,
    CredentialError, CredentialHasher, DecodeError, ErrorKind, FixedSaltSource, HashParameters,
    MAX_MEMORY_COST,
};

fn cheap_hasher() -> CredentialHasher {
    CredentialHasher::new(CostProfile {
        iterations: 1,
        memory_cost: 64,
        ..CostProfile::default()
    })
    .expect("cheap profile should be valid")
}

/// Replace the byte at `index` with `replacement`.
fn flip(encoded: &str, index: usize, replacement: char) -> String {
    let mut flipped = String::with_capacity(encoded.len());
    flipped.push_str(&encoded[..index]);
    flipped.push(replacement);
    flipped.push_str(&encoded[index + 1..]);
    flipped
}

/// Byte range of the `n`th `$`-delimited segment (0 = empty lead).
fn segment_range(encoded: &str, n: usize) -> std::ops::Range<usize> {
    let mut start = 0;
    for (i, segment) in encoded.split('$').enumerate() {
        if i == n {
            return start..start + segment.len();
        }
        start += segment.len() + 1;
    }
    panic!("segment {} missing from {}", n, encoded);
}

#[test]
fn test_default_profile_check() {
    let stored = hash_and_encode(b"12345678").expect("hash should succeed");
    assert!(stored.starts_with("$argon2id$v=19$m=32768,t=5,p=1$"));

    assert!(check(b"12345678", &stored).expect("check should succeed"));
    assert!(!check(b"12345679", &stored).expect("check should succeed"));
}

#[test]
fn test_default_parameters_round_trip() {
    let params = new_default_parameters().expect("salt should be available");
    let hash = credhash_core::derive(b"12345678", &params).expect("derive should succeed");

    let (decoded_hash, decoded_params) = decode(&encode(&hash, &params)).expect("decode");
    assert_eq!(decoded_hash, hash);
    assert_eq!(decoded_params, params);
}

#[test]
fn test_golden_encoding() {
    let params = HashParameters::new(b"123".to_vec(), 5, 32768, 1, 3);
    assert_eq!(
        encode(b"abc", &params),
        "$argon2id$v=19$m=32768,t=5,p=1$MTIz$YWJj"
    );
}

#[test]
fn test_golden_decode_failures() {
    assert_eq!(decode("").unwrap_err().kind(), ErrorKind::FormatInvalid);
    assert_eq!(
        decode("$2b$v=19$m=32768,t=5,p=1$MTIz$YWJj").unwrap_err().kind(),
        ErrorKind::UnsupportedAlgorithm
    );
    assert_eq!(
        decode("$argon2id$v=2$m=32768,t=5,p=1$MTIz$YWJj").unwrap_err().kind(),
        ErrorKind::UnsupportedVersion
    );
    assert_eq!(
        decode("$argon2id$v=19$ohai$MTIz$YWJj").unwrap_err().kind(),
        ErrorKind::ParametersInvalid
    );
}

#[test]
fn test_salt_uniqueness() {
    let hasher = cheap_hasher();
    let first = hasher.hash_and_encode(b"hunter22").expect("hash");
    let second = hasher.hash_and_encode(b"hunter22").expect("hash");

    assert_ne!(first, second);
    assert!(check(b"hunter22", &first).expect("check"));
    assert!(check(b"hunter22", &second).expect("check"));
}

#[test]
fn test_tampering_is_detected_per_segment() {
    let stored = cheap_hasher().hash_and_encode(b"tamper-me").expect("hash");

    let cases = [
        (1, 'x', ErrorKind::UnsupportedAlgorithm),
        (2, 'x', ErrorKind::UnsupportedVersion),
        (3, 'x', ErrorKind::ParametersInvalid),
        (4, '!', ErrorKind::SaltInvalid),
        (5, '!', ErrorKind::HashInvalid),
    ];

    for (segment, replacement, expected) in cases {
        for index in segment_range(&stored, segment) {
            let tampered = flip(&stored, index, replacement);
            let err = decode(&tampered).expect_err("tampered credential should not decode");
            assert_eq!(err.kind(), expected, "tampered at {}: {}", index, tampered);

            let err = check(b"tamper-me", &tampered).expect_err("check should fail");
            assert!(matches!(err, CredentialError::Verification(_)));
            assert_eq!(err.kind(), expected);
        }
    }
}

#[test]
fn test_tampered_hash_bytes_do_not_match() {
    let hasher = cheap_hasher();
    let stored = hasher.hash_and_encode(b"tamper-me").expect("hash");
    let (hash, params) = decode(&stored).expect("decode");

    let mut altered = hash.clone();
    let last = altered.len() - 1;
    altered[last] ^= 0x01;

    let forged = encode(&altered, &params);
    assert!(!check(b"tamper-me", &forged).expect("check"));
}

#[test]
fn test_credential_verifies_after_profile_change() {
    let old = CredentialHasher::new(CostProfile {
        iterations: 2,
        memory_cost: 128,
        ..CostProfile::default()
    })
    .expect("profile");
    let stored = old.hash_and_encode(b"legacy-secret").expect("hash");

    let current = cheap_hasher();
    assert!(current.check(b"legacy-secret", &stored).expect("check"));
    assert!(current.needs_rehash(&stored).expect("needs_rehash"));
}

#[test]
fn test_fixed_salt_source_from_outside_the_crate() {
    let hasher = cheap_hasher().with_salt_source(Arc::new(FixedSaltSource::new(b"0123456789abcdef".to_vec())));
    let stored = hasher.hash_and_encode(b"secret").expect("hash");
    assert!(stored.contains("$MDEyMzQ1Njc4OWFiY2RlZg$"));
}

#[test]
fn test_malformed_is_distinct_from_mismatch() {
    let result = check(b"secret", "$argon2id$v=19$m=64,t=1,p=1$c2FsdHNhbHQ$!!!!");
    match result {
        Err(CredentialError::Verification(DecodeError::HashInvalid(_))) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_unusable_stored_costs_are_errors_not_mismatches() {
    let cases = [
        (
            "$argon2id$v=19$m=4294967295,t=1,p=1$c2FsdHNhbHRzYWx0$YWJjZGVmZ2hpamtsbW5vcA",
            ErrorKind::CostLimitExceeded,
        ),
        (
            "$argon2id$v=19$m=8,t=1,p=2$c2FsdHNhbHRzYWx0$YWJjZGVmZ2hpamtsbW5vcA",
            ErrorKind::DerivationFailure,
        ),
        (
            "$argon2id$v=19$m=64,t=1,p=1$c2FsdHNhbHRzYWx0$YWJj",
            ErrorKind::DerivationFailure,
        ),
    ];

    for (stored, expected) in cases {
        decode(stored).expect("stored string is well-formed");
        match check(b"12345678", stored) {
            Err(err) => assert_eq!(err.kind(), expected, "{}", stored),
            Ok(matched) => panic!("{} checked as {} instead of failing", stored, matched),
        }
    }
}

#[test]
fn test_profile_memory_cost_capped() {
    let at_limit = CostProfile {
        memory_cost: MAX_MEMORY_COST,
        ..CostProfile::default()
    };
    assert!(at_limit.validate().is_ok());

    let above = CostProfile {
        memory_cost: MAX_MEMORY_COST + 1,
        ..CostProfile::default()
    };
    assert!(matches!(
        CredentialHasher::new(above),
        Err(CredentialError::InvalidProfile(_))
    ));
}
