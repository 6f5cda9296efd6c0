//! Temporal validation options and checks.

use crate::claims::{Claims, NumericTime};
use crate::error::{JwtError, JwtResult};
use chrono::{DateTime, Duration, Utc};

/// Options for checking the time-based claims of a verified token.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Leeway for clock skew, applied to every time-based claim.
    pub leeway: Duration,
    /// Validate expiry.
    pub validate_exp: bool,
    /// Validate not-before.
    pub validate_nbf: bool,
    /// Reject issued-at times in the future.
    pub validate_iat: bool,
    /// Reject tokens without an expiry.
    pub require_exp: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            leeway: Duration::seconds(60),
            validate_exp: true,
            validate_nbf: true,
            validate_iat: false,
            require_exp: false,
        }
    }
}

impl ValidationOptions {
    /// Create strict validation options with no leeway.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            leeway: Duration::zero(),
            validate_exp: true,
            validate_nbf: true,
            validate_iat: true,
            require_exp: true,
        }
    }

    /// Set the time leeway for validation.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set whether to validate expiration.
    #[must_use]
    pub fn validate_expiration(mut self, validate: bool) -> Self {
        self.validate_exp = validate;
        self
    }

    /// Set whether to validate not-before.
    #[must_use]
    pub fn validate_not_before(mut self, validate: bool) -> Self {
        self.validate_nbf = validate;
        self
    }

    /// Set whether to validate issued-at.
    #[must_use]
    pub fn validate_issued_at(mut self, validate: bool) -> Self {
        self.validate_iat = validate;
        self
    }

    /// Set whether an expiry must be present.
    #[must_use]
    pub fn require_expiration(mut self, require: bool) -> Self {
        self.require_exp = require;
        self
    }
}

fn leeway_secs(leeway: Duration) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let secs = leeway.num_milliseconds() as f64 / 1000.0;
    secs
}

impl Claims {
    /// Check the time-based claims against the current time.
    ///
    /// # Errors
    ///
    /// See [`Claims::validate_at`].
    pub fn validate(&self, options: &ValidationOptions) -> JwtResult<()> {
        self.validate_at(Utc::now(), options)
    }

    /// Check the time-based claims against `now`.
    ///
    /// A token is expired from `exp + leeway` on, and not valid before
    /// `nbf - leeway`.
    ///
    /// # Errors
    ///
    /// [`JwtError::MissingClaim`], [`JwtError::Expired`],
    /// [`JwtError::NotYetValid`] or [`JwtError::IssuedInFuture`].
    pub fn validate_at(&self, now: DateTime<Utc>, options: &ValidationOptions) -> JwtResult<()> {
        let NumericTime(now) = NumericTime::from_datetime(&now);
        let leeway = leeway_secs(options.leeway);

        if options.require_exp && self.exp.is_none() {
            return Err(JwtError::MissingClaim("exp".to_string()));
        }
        if options.validate_exp {
            if let Some(NumericTime(exp)) = self.exp {
                if now >= exp + leeway {
                    return Err(JwtError::Expired);
                }
            }
        }
        if options.validate_nbf {
            if let Some(NumericTime(nbf)) = self.nbf {
                if now + leeway < nbf {
                    return Err(JwtError::NotYetValid);
                }
            }
        }
        if options.validate_iat {
            if let Some(NumericTime(iat)) = self.iat {
                if iat > now + leeway {
                    return Err(JwtError::IssuedInFuture);
                }
            }
        }
        Ok(())
    }
}
