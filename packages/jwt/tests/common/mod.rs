//! Shared fixtures for the integration tests

#![allow(dead_code)]

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jwt_register::{EcdsaPrivateKey, RsaPrivateKey};
use rsa::pkcs1::DecodeRsaPrivateKey;

pub const RSA_A: &str = include_str!("../data/rsa_a.pem");
pub const RSA_A_CERT: &str = include_str!("../data/rsa_a_cert.pem");
pub const RSA_A_AES256: &str = include_str!("../data/rsa_a_aes256.pem");
pub const RSA_B: &str = include_str!("../data/rsa_b.pem");
pub const EC_P256: &str = include_str!("../data/ec_p256.pem");
pub const EC_P256_PUB: &str = include_str!("../data/ec_p256_pub.pem");
pub const EC_P384: &str = include_str!("../data/ec_p384.pem");
pub const EC_P384_DES3: &str = include_str!("../data/ec_p384_des3.pem");
pub const EC_P521: &str = include_str!("../data/ec_p521.pem");
pub const DSA_PRIVATE: &str = include_str!("../data/dsa.pem");
pub const DSA_PUBLIC: &str = include_str!("../data/dsa_pub.pem");

/// Password of the encrypted fixtures
pub const PASSWORD: &[u8] = b"hunter2";

pub fn rsa_key(pem: &str) -> RsaPrivateKey {
    RsaPrivateKey::from_pkcs1_pem(pem).expect("RSA fixture")
}

pub fn ec_key(pem: &str) -> EcdsaPrivateKey {
    EcdsaPrivateKey::from_sec1_pem(pem).expect("EC fixture")
}

pub fn concat(blocks: &[&str]) -> Vec<u8> {
    blocks.concat().into_bytes()
}

/// Path of a fixture file
pub fn data_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// Token with one bit of its decoded signature flipped
pub fn flip_signature_bit(token: &str) -> String {
    let (signed, signature) = token.rsplit_once('.').expect("three segments");
    let mut signature = URL_SAFE_NO_PAD.decode(signature).expect("base64url");
    signature[0] ^= 0x01;
    format!("{signed}.{}", URL_SAFE_NO_PAD.encode(signature))
}

/// Token from raw header and payload JSON and signature bytes
pub fn assemble(header: &str, payload: &str, signature: &[u8]) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload),
        URL_SAFE_NO_PAD.encode(signature)
    )
}
