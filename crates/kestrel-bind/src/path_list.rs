//! Colon-separated search-path variables kept in sync with a shared list.
//!
//! A `PathListEnvBinding` writes through to the environment like a plain
//! [`EnvBinding`], then republishes the written string, split on
//! [`PATH_LIST_SEPARATOR`], into a [`PathList`]. Every binding built on
//! the same `PathList` (and every other holder of it) sees the update.

use crate::binding::Binding;
use crate::env::{EnvBinding, EnvStore};
use crate::error::BindResult;
use kestrel_types::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tracing::debug;

pub const PATH_LIST_SEPARATOR: char = ':';

/// Split on the separator with no trimming and no collapsing.
///
/// `""` yields `[""]` and `"a::b"` yields `["a", "", "b"]`.
pub fn split_path_list(s: &str) -> Vec<String> {
    s.split(PATH_LIST_SEPARATOR).map(str::to_owned).collect()
}

/// Shared ordered list of path entries. Clones alias the same list.
#[derive(Debug, Clone, Default)]
pub struct PathList {
    entries: Arc<RwLock<Vec<String>>>,
}

impl PathList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: Arc::new(RwLock::new(entries.into_iter().map(Into::into).collect())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<String>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current entries.
    pub fn entries(&self) -> Vec<String> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Whether `other` is a handle to this same list.
    pub fn same_list(&self, other: &PathList) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// The entries as a list value, for evaluators exposing the list as a
    /// variable of its own.
    pub fn to_value(&self) -> Value {
        Value::string_list(self.read().iter().cloned())
    }

    /// Entries joined back into the separator-delimited form.
    pub fn join(&self) -> String {
        self.read().join(&PATH_LIST_SEPARATOR.to_string())
    }

    /// Replace the contents in place; the list identity is unchanged.
    pub fn replace(&self, entries: Vec<String>) {
        *self.entries.write().unwrap_or_else(PoisonError::into_inner) = entries;
    }
}

/// An environment binding that also republishes its value into a
/// [`PathList`] on every successful write.
///
/// Reads come from the environment only; the list is never consulted.
#[derive(Debug, Clone)]
pub struct PathListEnvBinding {
    env: EnvBinding,
    paths: PathList,
}

impl PathListEnvBinding {
    pub fn new(name: impl Into<String>, store: Arc<dyn EnvStore>, paths: PathList) -> Self {
        Self {
            env: EnvBinding::new(name, store),
            paths,
        }
    }

    pub fn name(&self) -> &str {
        self.env.name()
    }

    /// The shared list this binding republishes into.
    pub fn paths(&self) -> &PathList {
        &self.paths
    }
}

impl Binding for PathListEnvBinding {
    fn get(&self) -> BindResult<Value> {
        self.env.get()
    }

    fn set(&self, value: Value) -> BindResult<()> {
        let s = value.to_string();
        self.env.write_str(&s)?;
        let entries = split_path_list(&s);
        debug!(name = %self.env.name(), entries = entries.len(), "path list republished");
        self.paths.replace(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_semantics() {
        assert_eq!(split_path_list("/usr/bin:/bin"), vec!["/usr/bin", "/bin"]);
        assert_eq!(split_path_list(""), vec![""]);
        assert_eq!(split_path_list("a::b"), vec!["a", "", "b"]);
        assert_eq!(split_path_list(":a:"), vec!["", "a", ""]);
        assert_eq!(split_path_list(" a : b "), vec![" a ", " b "]);
    }

    #[test]
    fn test_path_list_identity() {
        let a = PathList::from_entries(["/bin"]);
        let b = a.clone();
        let c = PathList::from_entries(["/bin"]);
        assert!(a.same_list(&b));
        assert!(!a.same_list(&c));
    }

    #[test]
    fn test_path_list_join_and_value() {
        let l = PathList::from_entries(["/usr/bin", "", "/bin"]);
        assert_eq!(l.join(), "/usr/bin::/bin");
        assert_eq!(l.to_value(), Value::string_list(["/usr/bin", "", "/bin"]));
        assert_eq!(l.len(), 3);
        assert!(PathList::new().is_empty());
    }
}
