//! RSASSA-PKCS1-v1_5

use crate::algorithm::HashAlg;
use crate::error::{JwtError, JwtResult};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};

fn scheme(hash: HashAlg) -> Pkcs1v15Sign {
    match hash {
        HashAlg::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlg::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlg::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

pub(crate) fn sign(hash: HashAlg, key: &RsaPrivateKey, content: &[u8]) -> JwtResult<Vec<u8>> {
    key.sign(scheme(hash), &hash.digest(content))
        .map_err(|e| JwtError::signing(e.to_string()))
}

/// A signature of the wrong length or padding fails for that key only.
pub(crate) fn verify(
    hash: HashAlg,
    content: &[u8],
    signature: &[u8],
    keys: &[RsaPublicKey],
) -> JwtResult<()> {
    let digest = hash.digest(content);
    if keys
        .iter()
        .any(|key| key.verify(scheme(hash), &digest, signature).is_ok())
    {
        Ok(())
    } else {
        Err(JwtError::SignatureMismatch)
    }
}
