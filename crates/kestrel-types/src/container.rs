//! Indexed containers that element bindings delegate to.

use crate::error::{IndexError, IndexResult};
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Indexed get/set over a compound value.
///
/// Errors belong to the container; callers pass them through untouched.
pub trait IndexedContainer: Send + Sync {
    /// Read the element at `index`.
    fn index_one(&self, index: &Value) -> IndexResult<Value>;

    /// Overwrite the element at `index` with `value`.
    fn index_set(&self, index: &Value, value: Value) -> IndexResult<()>;
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

// ══════════════════════════════════════════════════════════════════════════════
// List
// ══════════════════════════════════════════════════════════════════════════════

/// A shared, growable list. Clones alias the same storage.
#[derive(Debug, Clone, Default)]
pub struct ListContainer {
    items: Arc<RwLock<Vec<Value>>>,
}

impl ListContainer {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<Value> {
        read(&self.items).clone()
    }

    pub fn len(&self) -> usize {
        read(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.items).is_empty()
    }

    /// Append an element.
    pub fn push(&self, value: Value) {
        write(&self.items).push(value);
    }
}

/// Resolve an index value against a list of `len` elements.
///
/// Accepts integral numbers and numeric strings; negative indices count
/// from the end.
fn resolve_index(index: &Value, len: usize) -> IndexResult<usize> {
    let bad = || IndexError::BadIndex {
        index: index.to_string(),
    };
    let raw = match index {
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 => *n as i64,
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| bad())?,
        _ => return Err(bad()),
    };
    let len_i = len as i64;
    let pos = if raw < 0 { raw + len_i } else { raw };
    if pos < 0 || pos >= len_i {
        return Err(IndexError::OutOfRange { index: raw, len });
    }
    Ok(pos as usize)
}

impl IndexedContainer for ListContainer {
    fn index_one(&self, index: &Value) -> IndexResult<Value> {
        let items = read(&self.items);
        let pos = resolve_index(index, items.len())?;
        Ok(items[pos].clone())
    }

    fn index_set(&self, index: &Value, value: Value) -> IndexResult<()> {
        let mut items = write(&self.items);
        let pos = resolve_index(index, items.len())?;
        items[pos] = value;
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Map
// ══════════════════════════════════════════════════════════════════════════════

/// A shared string-keyed map. Keys are the string form of the index.
#[derive(Debug, Clone, Default)]
pub struct MapContainer {
    entries: Arc<RwLock<BTreeMap<String, Value>>>,
}

impl MapContainer {
    pub fn new(entries: BTreeMap<String, Value>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        read(&self.entries).clone()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        read(&self.entries).contains_key(key)
    }
}

impl IndexedContainer for MapContainer {
    fn index_one(&self, index: &Value) -> IndexResult<Value> {
        let key = index.to_string();
        read(&self.entries)
            .get(&key)
            .cloned()
            .ok_or(IndexError::NoSuchKey { key })
    }

    fn index_set(&self, index: &Value, value: Value) -> IndexResult<()> {
        write(&self.entries).insert(index.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_index_negative() {
        assert_eq!(resolve_index(&Value::Number(-1.0), 3), Ok(2));
        assert_eq!(resolve_index(&Value::from("0"), 3), Ok(0));
    }

    #[test]
    fn test_resolve_index_out_of_range() {
        assert_eq!(
            resolve_index(&Value::Number(3.0), 3),
            Err(IndexError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            resolve_index(&Value::Number(-4.0), 3),
            Err(IndexError::OutOfRange { index: -4, len: 3 })
        );
    }

    #[test]
    fn test_resolve_index_bad() {
        assert_eq!(
            resolve_index(&Value::Number(1.5), 3),
            Err(IndexError::BadIndex {
                index: "1.5".into()
            })
        );
        assert!(matches!(
            resolve_index(&Value::Bool(true), 3),
            Err(IndexError::BadIndex { .. })
        ));
    }
}
