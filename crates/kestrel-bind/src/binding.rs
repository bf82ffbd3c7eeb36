//! The binding contract and the in-memory variants.

use crate::error::{BindError, BindResult};
use kestrel_types::Value;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::trace;

/// A gettable/settable handle to one value.
///
/// `get` only fails for element bindings, whose container may reject the
/// stored index. `set` failures are variant-specific.
pub trait Binding: Send + Sync {
    fn get(&self) -> BindResult<Value>;
    fn set(&self, value: Value) -> BindResult<()>;
}

/// Accepts or rejects a candidate value; the `Err` text becomes the
/// message of [`BindError::InvalidValue`].
pub type Validator = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

// ── Cell ──────────────────────────────────────────────────────────────────

/// A binding backed by its own storage slot, optionally validated.
pub struct CellBinding {
    slot: RwLock<Value>,
    validator: Option<Validator>,
}

impl CellBinding {
    pub fn new(value: Value) -> Self {
        Self {
            slot: RwLock::new(value),
            validator: None,
        }
    }

    /// Every later `set` must pass `validator`. The initial value is
    /// stored as given.
    pub fn with_validator<F>(value: Value, validator: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            slot: RwLock::new(value),
            validator: Some(Arc::new(validator)),
        }
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }
}

impl Binding for CellBinding {
    fn get(&self) -> BindResult<Value> {
        Ok(self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, value: Value) -> BindResult<()> {
        if let Some(validator) = &self.validator {
            if let Err(msg) = validator(&value) {
                trace!(kind = value.kind(), %msg, "cell rejected value");
                return Err(BindError::InvalidValue(msg));
            }
        }
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = value;
        Ok(())
    }
}

impl fmt::Debug for CellBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellBinding")
            .field("slot", &self.slot)
            .field("validated", &self.has_validator())
            .finish()
    }
}

// ── Read-only ─────────────────────────────────────────────────────────────

/// A binding whose value is fixed at construction.
#[derive(Debug, Clone)]
pub struct ReadOnlyBinding {
    value: Value,
}

impl ReadOnlyBinding {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Binding for ReadOnlyBinding {
    fn get(&self) -> BindResult<Value> {
        Ok(self.value.clone())
    }

    fn set(&self, value: Value) -> BindResult<()> {
        trace!(kind = value.kind(), "set on read-only binding");
        Err(BindError::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers_only(v: &Value) -> Result<(), String> {
        match v {
            Value::Number(_) => Ok(()),
            other => Err(format!("expected number, got {}", other.kind())),
        }
    }

    #[test]
    fn test_cell_set_then_get() {
        let cell = CellBinding::new(Value::Nil);
        cell.set(Value::from("x")).unwrap();
        assert_eq!(cell.get().unwrap(), Value::from("x"));
    }

    #[test]
    fn test_cell_validator_accepts() {
        let cell = CellBinding::with_validator(Value::Number(0.0), numbers_only);
        assert!(cell.has_validator());
        cell.set(Value::Number(7.0)).unwrap();
        assert_eq!(cell.get().unwrap(), Value::Number(7.0));
    }

    #[test]
    fn test_cell_validator_rejects_and_keeps_slot() {
        let cell = CellBinding::with_validator(Value::Number(1.0), numbers_only);
        let err = cell.set(Value::from("one")).unwrap_err();
        assert_eq!(
            err,
            BindError::InvalidValue("expected number, got string".into())
        );
        assert_eq!(err.to_string(), "invalid value: expected number, got string");
        assert_eq!(cell.get().unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_cell_initial_value_not_validated() {
        let cell = CellBinding::with_validator(Value::from("seed"), numbers_only);
        assert_eq!(cell.get().unwrap(), Value::from("seed"));
    }

    #[test]
    fn test_read_only() {
        let ro = ReadOnlyBinding::new(Value::Bool(true));
        assert_eq!(ro.set(Value::Bool(false)), Err(BindError::ReadOnly));
        assert_eq!(ro.get().unwrap(), Value::Bool(true));
    }
}
