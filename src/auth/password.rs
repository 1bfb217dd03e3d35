//! Password hashing and verification using Argon2id

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::OnceCell;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::config::AppConfig;

/// Wall-clock budget for a single default-cost verification in an optimized build.
pub const VERIFY_LATENCY_BUDGET: std::time::Duration = std::time::Duration::from_secs(2);

const DUMMY_SECRET: &str = "event-hub-dummy-secret";

#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid hash parameters: {0}")]
    InvalidParams(String),

    #[error("stored password hash is malformed")]
    InvalidRecord,

    #[error("failed to hash password: {0}")]
    Hashing(String),
}

/// Argon2 cost factors.
///
/// The default is the Argon2 library default (19 MiB, 2 passes, 1 lane),
/// which lands in the same tens-of-milliseconds range as bcrypt cost 10 on
/// server hardware. Raise `memory_kib` / `iterations` to harden production,
/// use [`HashCost::testing`] to keep test suites fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashCost {
    /// Minimal cost for tests. Never use for stored credentials.
    pub const fn testing() -> Self {
        Self {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            memory_kib: config.security.hash_memory_kib,
            iterations: config.security.hash_iterations,
            parallelism: config.security.hash_parallelism,
        }
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password hasher with configurable parameters
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    dummy_record: OnceCell<String>,
}

impl PasswordHasher {
    pub fn new(cost: HashCost) -> Result<Self, HashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| HashError::InvalidParams(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Ok(Self {
            argon2,
            dummy_record: OnceCell::new(),
        })
    }

    /// Hash a password. Every call draws a fresh salt, so the same input
    /// never produces the same record twice.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                HashError::Hashing(e.to_string())
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored PHC record.
    ///
    /// The salt and cost are read from the record itself, so records hashed
    /// under an older cost keep verifying after the configured cost changes.
    pub fn verify(&self, password: &str, record: &str) -> Result<bool, HashError> {
        let parsed_hash = PasswordHash::new(record).map_err(|e| {
            tracing::debug!("Failed to parse password hash: {:?}", e);
            HashError::InvalidRecord
        })?;

        if parsed_hash.salt.is_none() || parsed_hash.hash.is_none() {
            return Err(HashError::InvalidRecord);
        }

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => {
                tracing::debug!("Password hash could not be verified: {:?}", e);
                Err(HashError::InvalidRecord)
            }
        }
    }

    /// Spend one verification against a throwaway record. Used when the
    /// account does not exist so that path costs the same as a wrong password.
    pub fn verify_dummy(&self, password: &str) -> Result<(), HashError> {
        let record = self.dummy_record.get_or_try_init(|| self.hash(DUMMY_SECRET))?;
        self.verify(password, record)?;
        Ok(())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
            dummy_record: OnceCell::new(),
        }
    }
}

/// Password strength policy
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl PasswordPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            min_length: config.security.password_min_length,
        }
    }

    /// Record a violation for `field` instead of failing fast, so callers can
    /// report it together with every other invalid field.
    pub fn check(&self, field: &'static str, password: &str, errors: &mut ValidationErrors) {
        if password.chars().count() < self.min_length {
            let mut err = ValidationError::new("length");
            err.message = Some(
                format!("password must be at least {} characters", self.min_length).into(),
            );
            err.add_param("min".into(), &self.min_length);
            errors.add(field, err);
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}
