//! JSON Web Token verification against a register of credentials.
//!
//! This crate provides:
//! - A [`KeyRegister`] of HMAC secrets, RSA and ECDSA public keys
//! - PEM loading of certificates, public keys and (encrypted) private keys
//! - Verification with HS/RS/ES 256, 384 and 512 through closed algorithm tables
//! - Token issuing and time-based claim validation
//! - A [`SharedRegister`] for loading keys while tokens are verified
//!
//! ```
//! use jwt_register::{Claims, KeyRegister};
//!
//! let mut register = KeyRegister::new();
//! register.add_secret(b"s3cr3t".to_vec());
//!
//! let token = Claims::new().subject("alice").hmac_sign("HS256", b"s3cr3t")?;
//! let claims = register.check(&token)?;
//! assert_eq!(claims.sub.as_deref(), Some("alice"));
//! # Ok::<(), jwt_register::JwtError>(())
//! ```

pub mod algorithm;
mod check;
pub mod claims;
pub mod config;
mod error;
pub mod header;
pub mod keys;
mod register;
mod shared;
mod sign;
mod token;
pub mod validation;
mod verify;

pub use algorithm::{Family, HashAlg};
pub use claims::{Claims, NumericTime};
pub use config::{PemFile, RegisterConfig, Sensitive};
pub use error::*;
pub use header::Header;
pub use keys::{Curve, EcdsaPrivateKey, EcdsaPublicKey, PublicKey};
pub use register::KeyRegister;
pub use shared::SharedRegister;
pub use validation::ValidationOptions;

// Key types used in the public API
pub use rsa::{RsaPrivateKey, RsaPublicKey};
