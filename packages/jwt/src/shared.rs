//! Register shared between verifying threads and a loader.
//!
//! Readers take lock-free snapshots, so verification never waits for a load.
//! Writers copy the current register, change the copy and swap it in.

use crate::claims::Claims;
use crate::error::{JwtResult, LoadError};
use crate::register::KeyRegister;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Thread-safe [`KeyRegister`] that can be extended while tokens are verified.
///
/// Each verification sees one complete register: the one before or the one
/// after a change, never a register that is half way through a load.
///
/// # Example
///
/// ```
/// use jwt_register::{KeyRegister, SharedRegister};
///
/// let shared = SharedRegister::new(KeyRegister::new());
/// shared.add_secret(b"s3cr3t".to_vec());
/// assert_eq!(shared.snapshot().secret_count(), 1);
/// ```
pub struct SharedRegister {
    current: ArcSwap<KeyRegister>,
    writer: Mutex<()>,
}

impl SharedRegister {
    /// Share `initial`.
    #[must_use]
    pub fn new(initial: KeyRegister) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            writer: Mutex::new(()),
        }
    }

    /// The register as of now
    #[must_use]
    pub fn snapshot(&self) -> Arc<KeyRegister> {
        self.current.load_full()
    }

    /// Verify against the current register.
    ///
    /// # Errors
    ///
    /// As [`KeyRegister::check`].
    pub fn check(&self, token: impl AsRef<[u8]>) -> JwtResult<Claims> {
        self.current.load().check(token)
    }

    /// Apply `change` to a copy of the register and publish the copy.
    ///
    /// Changes are serialized; concurrent readers keep their snapshot.
    pub fn update<R>(&self, change: impl FnOnce(&mut KeyRegister) -> R) -> R {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = KeyRegister::clone(&self.current.load());
        let out = change(&mut next);
        debug!(
            secrets = next.secret_count(),
            rsas = next.rsa_count(),
            ecdsas = next.ecdsa_count(),
            "publishing key register"
        );
        self.current.store(Arc::new(next));
        out
    }

    /// Append an HMAC secret.
    pub fn add_secret(&self, secret: impl Into<Vec<u8>>) {
        self.update(|register| register.add_secret(secret));
    }

    /// Load PEM blocks as [`KeyRegister::load_pem`] does.
    ///
    /// # Errors
    ///
    /// As [`KeyRegister::load_pem`]. Credentials from blocks before the
    /// failing one are published all the same.
    pub fn load_pem(&self, data: &[u8], password: &[u8]) -> Result<usize, LoadError> {
        self.update(|register| register.load_pem(data, password))
    }
}

impl Default for SharedRegister {
    fn default() -> Self {
        Self::new(KeyRegister::new())
    }
}

impl From<KeyRegister> for SharedRegister {
    fn from(register: KeyRegister) -> Self {
        Self::new(register)
    }
}

impl std::fmt::Debug for SharedRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedRegister")
            .field(&*self.current.load())
            .finish()
    }
}
