//! Legacy OpenSSL PEM encryption (RFC 1423 `Proc-Type: 4,ENCRYPTED`).
//!
//! The key is derived with OpenSSL's `EVP_BytesToKey` (MD5, one iteration)
//! from the password and the first eight bytes of the IV. Payloads are CBC
//! with PKCS #7 padding, so a wrong password nearly always shows up as bad
//! padding.

use crate::error::KeyError;
use cbc::cipher::{BlockCipher, BlockDecryptMut, KeyInit, KeyIvInit, block_padding::Pkcs7};
use md5::{Digest, Md5};
use zeroize::Zeroizing;

const SALT_LEN: usize = 8;

/// Ciphers accepted in a `DEK-Info` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cipher {
    DesCbc,
    DesEde3Cbc,
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
}

impl Cipher {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "DES-CBC" => Cipher::DesCbc,
            "DES-EDE3-CBC" => Cipher::DesEde3Cbc,
            "AES-128-CBC" => Cipher::Aes128Cbc,
            "AES-192-CBC" => Cipher::Aes192Cbc,
            "AES-256-CBC" => Cipher::Aes256Cbc,
            _ => return None,
        })
    }

    fn key_len(self) -> usize {
        match self {
            Cipher::DesCbc => 8,
            Cipher::DesEde3Cbc | Cipher::Aes192Cbc => 24,
            Cipher::Aes128Cbc => 16,
            Cipher::Aes256Cbc => 32,
        }
    }

    fn iv_len(self) -> usize {
        match self {
            Cipher::DesCbc | Cipher::DesEde3Cbc => 8,
            _ => 16,
        }
    }
}

/// `EVP_BytesToKey` with MD5 and a single round
fn derive_key(password: &[u8], salt: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(Vec::with_capacity(len + 16));
    let mut prev: Option<md5::digest::Output<Md5>> = None;
    while key.len() < len {
        let mut hasher = Md5::new();
        if let Some(prev) = &prev {
            hasher.update(prev);
        }
        hasher.update(password);
        hasher.update(salt);
        let block = hasher.finalize();
        key.extend_from_slice(&block);
        prev = Some(block);
    }
    key.truncate(len);
    key
}

fn cbc_decrypt<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Zeroizing<Vec<u8>>, KeyError>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| KeyError::Pem("DEK-Info IV has the wrong length".to_string()))?;
    let mut buf = Zeroizing::new(data.to_vec());
    let len = decryptor
        .decrypt_padded_mut::<Pkcs7>(buf.as_mut_slice())
        .map_err(|_| KeyError::IncorrectPassword)?
        .len();
    buf.truncate(len);
    Ok(buf)
}

/// Decrypt the body of a block whose `DEK-Info` header is `dek_info`.
///
/// An empty password on an encrypted block is [`KeyError::PasswordRequired`].
pub(crate) fn decrypt_block(
    dek_info: &str,
    data: &[u8],
    password: &[u8],
) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    let (name, iv_hex) = dek_info
        .split_once(',')
        .ok_or_else(|| KeyError::Pem(format!("malformed DEK-Info {dek_info:?}")))?;
    let cipher = Cipher::from_name(name.trim())
        .ok_or_else(|| KeyError::UnsupportedCipher(name.trim().to_string()))?;
    let iv = hex::decode(iv_hex.trim()).map_err(|e| KeyError::Pem(format!("DEK-Info IV: {e}")))?;
    if iv.len() != cipher.iv_len() {
        return Err(KeyError::Pem("DEK-Info IV has the wrong length".to_string()));
    }
    if password.is_empty() {
        return Err(KeyError::PasswordRequired);
    }
    if data.is_empty() || data.len() % cipher.iv_len() != 0 {
        return Err(KeyError::Pem("encrypted body is not whole cipher blocks".to_string()));
    }

    let key = derive_key(password, &iv[..SALT_LEN], cipher.key_len());
    match cipher {
        Cipher::DesCbc => cbc_decrypt::<des::Des>(&key, &iv, data),
        Cipher::DesEde3Cbc => cbc_decrypt::<des::TdesEde3>(&key, &iv, data),
        Cipher::Aes128Cbc => cbc_decrypt::<aes::Aes128>(&key, &iv, data),
        Cipher::Aes192Cbc => cbc_decrypt::<aes::Aes192>(&key, &iv, data),
        Cipher::Aes256Cbc => cbc_decrypt::<aes::Aes256>(&key, &iv, data),
    }
}
