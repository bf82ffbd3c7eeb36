//! Error types for binding operations.

use kestrel_types::IndexError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A write the environment store refused.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnvError {
    /// Empty, or contains `=` or NUL.
    #[error("invalid environment variable name: {name:?}")]
    InvalidName { name: String },
    /// Value contains NUL.
    #[error("value of environment variable {name} contains a NUL byte")]
    InvalidValue { name: String },
}

/// Failure of a binding `get` or `set`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    /// `set` on a read-only binding.
    #[error("read-only; cannot be set")]
    ReadOnly,
    /// A cell's validator rejected the candidate value.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Passed through from the container behind an element binding.
    #[error(transparent)]
    Index(#[from] IndexError),
    /// Passed through from the environment store.
    #[error(transparent)]
    Env(#[from] EnvError),
}

/// Result alias for binding operations.
pub type BindResult<T> = Result<T, BindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(BindError::ReadOnly.to_string(), "read-only; cannot be set");
        assert_eq!(
            BindError::InvalidValue("must be a number".into()).to_string(),
            "invalid value: must be a number"
        );
    }

    #[test]
    fn test_delegated_errors_display_verbatim() {
        let inner = IndexError::NoSuchKey { key: "k".into() };
        assert_eq!(BindError::from(inner.clone()).to_string(), inner.to_string());

        let env = EnvError::InvalidName { name: "A=B".into() };
        assert_eq!(BindError::from(env.clone()).to_string(), env.to_string());
    }
}
