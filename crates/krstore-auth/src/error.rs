//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email is empty or not an address.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// Sign-up without a name.
    #[error("name is required")]
    MissingName,

    /// Empty password.
    #[error("password is required")]
    MissingPassword,

    /// Sign-up confirmation differs from the password.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] krstore_cache::CacheError),
}

impl AuthError {
    /// Check if this is a form validation failure rather than a storage problem.
    pub fn is_validation(&self) -> bool {
        !matches!(self, AuthError::Cache(_))
    }
}
