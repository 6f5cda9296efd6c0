//! Tests for HMAC token verification and the algorithm policy of the verifier

mod common;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use hex_literal::hex;
use hmac::{Hmac, Mac};
use jwt_register::{Claims, JwtError, KeyRegister, ValidationOptions};
use proptest::prelude::*;
use serde_json::json;
use sha2::Sha256;

fn alice_register() -> KeyRegister {
    let mut register = KeyRegister::new();
    register.add_secret(b"s3cr3t".to_vec());
    register
}

fn hs256(secret: &[u8], input: &str) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
    mac.update(input.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

#[test]
fn test_alice_round_trip_and_bit_flip() {
    let register = alice_register();
    let token = Claims::new()
        .subject("alice")
        .expires_at(&(Utc::now() + Duration::hours(1)))
        .hmac_sign("HS256", b"s3cr3t")
        .unwrap();

    let claims = register.check(&token).unwrap();
    assert_eq!(claims.sub.as_deref(), Some("alice"));
    assert_eq!(claims.key_id, None);
    assert!(claims.validate(&ValidationOptions::default()).is_ok());

    assert_eq!(
        register.check(common::flip_signature_bit(&token)),
        Err(JwtError::SignatureMismatch)
    );
}

#[test]
fn test_rfc7515_example_token() {
    // RFC 7515 appendix A.1; the header has a CRLF inside its JSON
    let key = hex!(
        "0323354b2b0fa5bc837e0665777ba68f5ab328e6f054c928a90f84b2d2502ebf"
        "d3fb5a92d20647ef968ab4c377623d223d2e2172052e4f08c0cd9af567d080a3"
    );
    let token = "eyJ0eXAiOiJKV1QiLA0KICJhbGciOiJIUzI1NiJ9.\
        eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ.\
        dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";

    let mut register = KeyRegister::new();
    register.add_secret(key.to_vec());
    let claims = register.check(token).unwrap();

    assert_eq!(claims.iss.as_deref(), Some("joe"));
    assert_eq!(claims.number("exp"), Some(1_300_819_380.0));
    assert_eq!(claims.extra.get("http://example.com/is_root"), Some(&json!(true)));
    // long expired, and verification alone does not care
    assert_eq!(
        claims.validate(&ValidationOptions::default()),
        Err(JwtError::Expired)
    );
}

#[test]
fn test_signature_covers_received_bytes() {
    let register = alice_register();
    let compact_json = r#"{"sub":"alice"}"#;
    let spaced_json = r#"{ "sub": "alice" }"#;
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);

    let signed = format!("{header}.{}", URL_SAFE_NO_PAD.encode(compact_json));
    let signature = URL_SAFE_NO_PAD.encode(hs256(b"s3cr3t", &signed));
    assert!(register.check(format!("{signed}.{signature}")).is_ok());

    // same claims, different encoding
    let respaced = format!("{header}.{}.{signature}", URL_SAFE_NO_PAD.encode(spaced_json));
    assert_eq!(register.check(respaced), Err(JwtError::SignatureMismatch));
}

#[test]
fn test_unsecured_always_rejected() {
    let register = alice_register();
    for signature in [&b""[..], &b"anything"[..]] {
        let token = common::assemble(r#"{"alg":"none"}"#, r#"{"sub":"mallory"}"#, signature);
        assert_eq!(register.check(&token), Err(JwtError::Unsecured));
    }
    let token = common::assemble(r#"{"alg":"none"}"#, "{}", b"");
    assert_eq!(KeyRegister::new().check(token), Err(JwtError::Unsecured));
}

#[test]
fn test_unknown_and_case_variant_algorithms() {
    let register = alice_register();
    for alg in ["PS256", "hs256", "HS-256", "EdDSA", ""] {
        let token = common::assemble(&format!(r#"{{"alg":"{alg}"}}"#), "{}", b"sig");
        assert_eq!(
            register.check(&token),
            Err(JwtError::AlgorithmUnknown(alg.to_string())),
            "{alg}"
        );
    }
}

#[test]
fn test_critical_extension_rejected() {
    let register = alice_register();
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","crit":["exp"],"exp":1}"#);
    let signed = format!("{header}.{}", URL_SAFE_NO_PAD.encode("{}"));
    let signature = URL_SAFE_NO_PAD.encode(hs256(b"s3cr3t", &signed));
    assert_eq!(
        register.check(format!("{signed}.{signature}")),
        Err(JwtError::CriticalExtension("exp".to_string()))
    );
}

#[test]
fn test_structural_errors() {
    let register = alice_register();
    for token in [
        "",
        "only.two",
        "a.b.c.d",
        "!!!.e30.c2ln",
        "e30.e30.c2ln", // header without alg
        "bm90IGpzb24.e30.c2ln",
    ] {
        assert!(
            matches!(register.check(token), Err(JwtError::Malformed(_))),
            "{token:?}"
        );
    }
}

#[test]
fn test_valid_signature_over_invalid_claims() {
    let register = alice_register();
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
    for payload in ["not json", "[1,2]", r#"{"exp":"tomorrow"}"#] {
        let signed = format!("{header}.{}", URL_SAFE_NO_PAD.encode(payload));
        let signature = URL_SAFE_NO_PAD.encode(hs256(b"s3cr3t", &signed));
        assert!(
            matches!(
                register.check(format!("{signed}.{signature}")),
                Err(JwtError::Malformed(_))
            ),
            "{payload}"
        );
    }
}

#[test]
fn test_any_registered_secret_matches() {
    let mut register = KeyRegister::new();
    register.add_secret("first");
    register.add_secret("second");
    register.add_secret("third");
    let token = Claims::new()
        .with_key_id("k2")
        .hmac_sign("HS384", b"second")
        .unwrap();
    assert_eq!(register.check(&token).unwrap().key_id.as_deref(), Some("k2"));

    let token = Claims::new().hmac_sign("HS384", b"fourth").unwrap();
    assert_eq!(register.check(&token), Err(JwtError::SignatureMismatch));
}

#[test]
fn test_hmac_token_against_asymmetric_register() {
    let mut register = KeyRegister::new();
    register
        .load_pem(common::RSA_A_CERT.as_bytes(), b"")
        .unwrap();
    let token = Claims::new().hmac_sign("HS256", b"s3cr3t").unwrap();
    assert_eq!(register.check(&token), Err(JwtError::SignatureMismatch));
}

const ALGS: [&str; 3] = ["HS256", "HS384", "HS512"];

proptest! {
    #[test]
    fn test_sign_then_check_returns_claims(
        secret in proptest::collection::vec(any::<u8>(), 1..96),
        subject in "\\PC{0,40}",
        alg in proptest::sample::select(ALGS.to_vec()),
        count in 0u32..1000,
    ) {
        let mut register = KeyRegister::new();
        register.add_secret(secret.clone());
        let claims = Claims::new().subject(subject).claim("count", json!(count));
        let token = claims.hmac_sign(alg, &secret).unwrap();
        prop_assert_eq!(register.check(&token).unwrap(), claims);
    }

    #[test]
    fn test_payload_change_never_verifies(
        secret in proptest::collection::vec(any::<u8>(), 1..64),
        subject in "[a-z]{1,24}",
        position in any::<prop::sample::Index>(),
    ) {
        let mut register = KeyRegister::new();
        register.add_secret(secret.clone());
        let token = Claims::new().subject(subject).hmac_sign("HS256", &secret).unwrap();

        let first = token.find('.').unwrap();
        let last = token.rfind('.').unwrap();
        let at = first + 1 + position.index(last - first - 1);
        let mut bytes = token.into_bytes();
        bytes[at] = if bytes[at] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        prop_assert_eq!(register.check(&tampered), Err(JwtError::SignatureMismatch));
    }
}
