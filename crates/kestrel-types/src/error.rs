//! Error types raised by indexed containers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of an indexed get or set on a container.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexError {
    /// The index value cannot address this container (e.g. `1.5` into a list).
    #[error("bad index: {index}")]
    BadIndex { index: String },
    /// Integral list index outside `-len..len`.
    #[error("index out of range: {index} (length {len})")]
    OutOfRange { index: i64, len: usize },
    /// Map read of a key that is not present.
    #[error("no such key: {key}")]
    NoSuchKey { key: String },
}

/// Result alias for container operations.
pub type IndexResult<T> = Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_display() {
        assert_eq!(
            IndexError::OutOfRange { index: -4, len: 3 }.to_string(),
            "index out of range: -4 (length 3)"
        );
        assert_eq!(
            IndexError::NoSuchKey { key: "home".into() }.to_string(),
            "no such key: home"
        );
    }

    #[test]
    fn test_index_error_json_shape() {
        let err = IndexError::BadIndex { index: "1.5".into() };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "bad_index", "index": "1.5" }));
    }
}
