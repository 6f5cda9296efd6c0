//! Register configuration: where the credentials come from.
//!
//! ```json
//! {
//!   "secrets": ["czNjcjN0"],
//!   "pem_files": [
//!     { "path": "/etc/app/issuer.pem" },
//!     { "path": "/etc/app/signer.pem", "password": "hunter2" }
//!   ]
//! }
//! ```

use crate::error::ConfigError;
use crate::register::KeyRegister;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};
use zeroize::Zeroizing;

/// String wiped from memory on drop and redacted from `Debug` output
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Sensitive(Zeroizing<String>);

impl Sensitive {
    /// The secret value
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Sensitive {
    fn from(value: String) -> Self {
        Self(Zeroizing::new(value))
    }
}

impl From<&str> for Sensitive {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl fmt::Debug for Sensitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sensitive(***)")
    }
}

/// A PEM file with an optional decryption password
#[derive(Debug, Clone, Deserialize)]
pub struct PemFile {
    /// File to read
    pub path: PathBuf,
    /// Password for encrypted blocks; when set, every block must be encrypted
    #[serde(default)]
    pub password: Option<Sensitive>,
}

/// Credential sources for a [`KeyRegister`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterConfig {
    /// HMAC secrets, base64url without padding
    #[serde(default)]
    pub secrets: Vec<Sensitive>,
    /// PEM files, loaded in order
    #[serde(default)]
    pub pem_files: Vec<PemFile>,
}

impl RegisterConfig {
    /// Parse a JSON configuration document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] when the document does not describe a configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a register from the configured sources.
    ///
    /// # Errors
    ///
    /// The first secret that is not base64url, or the first file that cannot
    /// be read or loaded. No register is returned in that case.
    pub async fn load(&self) -> Result<KeyRegister, ConfigError> {
        let mut register = KeyRegister::new();

        for (index, secret) in self.secrets.iter().enumerate() {
            let bytes = URL_SAFE_NO_PAD
                .decode(secret.expose())
                .map_err(|source| ConfigError::Secret { index, source })?;
            register.add_secret(bytes);
        }

        for file in &self.pem_files {
            let data = Zeroizing::new(fs::read(&file.path).await.map_err(|source| {
                ConfigError::Io {
                    path: file.path.clone(),
                    source,
                }
            })?);
            let password = file.password.as_ref().map_or("", Sensitive::expose);
            let loaded = register
                .load_pem(&data, password.as_bytes())
                .map_err(|source| ConfigError::Load {
                    path: file.path.clone(),
                    source,
                })?;
            debug!(path = %file.path.display(), loaded, "loaded PEM file");
        }

        info!(
            secrets = register.secret_count(),
            rsas = register.rsa_count(),
            ecdsas = register.ecdsa_count(),
            "key register configured"
        );
        Ok(register)
    }
}
