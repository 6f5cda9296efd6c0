//! Tests for verifying through a register that is loaded while in use

mod common;

use jwt_register::{Claims, JwtError, KeyError, KeyRegister, SharedRegister};
use std::sync::Arc;

#[test]
fn test_snapshots_are_stable() {
    let shared = SharedRegister::default();
    let before = shared.snapshot();
    assert_eq!(shared.load_pem(common::RSA_A_CERT.as_bytes(), b""), Ok(1));

    assert_eq!(before.rsa_count(), 0);
    assert_eq!(shared.snapshot().rsa_count(), 1);
}

#[test]
fn test_failed_load_publishes_partial_state() {
    let shared = SharedRegister::new(KeyRegister::new());
    let data = common::concat(&[common::EC_P256, common::DSA_PRIVATE]);
    let err = shared.load_pem(&data, b"").unwrap_err();
    assert_eq!(err.loaded, 1);
    assert!(matches!(err.kind, KeyError::UnsupportedBlock(_)));
    assert_eq!(shared.snapshot().ecdsa_count(), 1);
}

#[test]
fn test_update_returns_closure_result() {
    let shared = SharedRegister::from(KeyRegister::new());
    let count = shared.update(|register| {
        register.add_secret("a");
        register.add_secret("b");
        register.secret_count()
    });
    assert_eq!(count, 2);
    assert!(format!("{shared:?}").contains("secrets: 2"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_verification_during_loads() {
    let shared = Arc::new(SharedRegister::default());
    shared.add_secret(b"s3cr3t".to_vec());
    let token = Claims::new().subject("alice").hmac_sign("HS256", b"s3cr3t").unwrap();
    let late = Claims::new()
        .subject("bob")
        .rsa_sign("RS256", &common::rsa_key(common::RSA_B))
        .unwrap();

    let mut readers = Vec::new();
    for _ in 0..4 {
        let shared = Arc::clone(&shared);
        let token = token.clone();
        let late = late.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                assert_eq!(shared.check(&token).unwrap().sub.as_deref(), Some("alice"));
                match shared.check(&late) {
                    Ok(claims) => assert_eq!(claims.sub.as_deref(), Some("bob")),
                    Err(e) => assert_eq!(e, JwtError::SignatureMismatch),
                }
                tokio::task::yield_now().await;
            }
        }));
    }

    let writer = {
        let shared = Arc::clone(&shared);
        tokio::task::spawn_blocking(move || {
            for _ in 0..10 {
                shared.load_pem(common::EC_P256.as_bytes(), b"").unwrap();
            }
            shared.load_pem(common::RSA_B.as_bytes(), b"").unwrap();
        })
    };

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    let register = shared.snapshot();
    assert_eq!(register.ecdsa_count(), 10);
    assert_eq!(register.rsa_count(), 1);
    assert_eq!(shared.check(&late).unwrap().sub.as_deref(), Some("bob"));
}
