//! Issuing tokens

use crate::algorithm::{Family, HashAlg};
use crate::claims::Claims;
use crate::error::{JwtError, JwtResult};
use crate::header::Header;
use crate::keys::EcdsaPrivateKey;
use crate::token::encode_segment;
use crate::verify;
use rsa::RsaPrivateKey;

impl Claims {
    fn resolve(family: Family, alg: &str) -> JwtResult<HashAlg> {
        family
            .lookup(alg)
            .ok_or_else(|| JwtError::AlgorithmUnknown(alg.to_string()))
    }

    /// Header and payload segments joined by a dot
    fn signing_input(&self, alg: &str) -> JwtResult<String> {
        let mut header = Header::new(alg);
        header.kid.clone_from(&self.key_id);
        let header =
            serde_json::to_vec(&header).map_err(|e| JwtError::Serialization(e.to_string()))?;
        let payload =
            serde_json::to_vec(self).map_err(|e| JwtError::Serialization(e.to_string()))?;

        let mut input = encode_segment(&header);
        input.push('.');
        input.push_str(&encode_segment(&payload));
        Ok(input)
    }

    fn finish(mut input: String, signature: &[u8]) -> String {
        input.push('.');
        input.push_str(&encode_segment(signature));
        input
    }

    /// Issue a token signed with an HMAC secret.
    ///
    /// # Errors
    ///
    /// [`JwtError::AlgorithmUnknown`] unless `alg` is HS256, HS384 or HS512.
    pub fn hmac_sign(&self, alg: &str, secret: &[u8]) -> JwtResult<String> {
        let hash = Self::resolve(Family::Hmac, alg)?;
        let input = self.signing_input(alg)?;
        let signature = verify::hmac::sign(hash, secret, input.as_bytes())?;
        Ok(Self::finish(input, &signature))
    }

    /// Issue a token signed with an RSA private key (PKCS #1 v1.5).
    ///
    /// # Errors
    ///
    /// [`JwtError::AlgorithmUnknown`] unless `alg` is RS256, RS384 or RS512,
    /// [`JwtError::Signing`] when the key is too small for the hash.
    pub fn rsa_sign(&self, alg: &str, key: &RsaPrivateKey) -> JwtResult<String> {
        let hash = Self::resolve(Family::Rsa, alg)?;
        let input = self.signing_input(alg)?;
        let signature = verify::rsa::sign(hash, key, input.as_bytes())?;
        Ok(Self::finish(input, &signature))
    }

    /// Issue a token signed with an ECDSA private key.
    ///
    /// # Errors
    ///
    /// [`JwtError::AlgorithmUnknown`] unless `alg` is ES256, ES384 or ES512,
    /// [`JwtError::Signing`] when the key is not on the identifier's curve.
    pub fn ecdsa_sign(&self, alg: &str, key: &EcdsaPrivateKey) -> JwtResult<String> {
        let hash = Self::resolve(Family::Ecdsa, alg)?;
        let input = self.signing_input(alg)?;
        let signature = verify::ecdsa::sign(hash, key, input.as_bytes())?;
        Ok(Self::finish(input, &signature))
    }
}
