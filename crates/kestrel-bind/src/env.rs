//! Environment-backed bindings and the store they read and write through.

use crate::binding::Binding;
use crate::error::{BindResult, EnvError};
use kestrel_types::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::debug;

/// Owner of environment variable reads and writes.
///
/// Bindings never touch the process environment directly; they go through
/// a store, so tests and sandboxed evaluators can substitute [`MemoryEnv`].
pub trait EnvStore: Send + Sync {
    /// Current value of `name`, or `None` if unset.
    fn get(&self, name: &str) -> Option<String>;

    /// Overwrite `name` with `value`.
    fn set(&self, name: &str, value: &str) -> Result<(), EnvError>;
}

/// Reject entries the operating system cannot represent.
fn check_entry(name: &str, value: &str) -> Result<(), EnvError> {
    if name.is_empty() || name.contains(['=', '\0']) {
        return Err(EnvError::InvalidName {
            name: name.to_string(),
        });
    }
    if value.contains('\0') {
        return Err(EnvError::InvalidValue {
            name: name.to_string(),
        });
    }
    Ok(())
}

// ── Process environment ───────────────────────────────────────────────────

/// Serializes all access to the real process environment.
static PROCESS_ENV_LOCK: Mutex<()> = Mutex::new(());

/// The real process environment.
///
/// All `ProcessEnv` handles share one lock, so reads and writes made
/// through them never interleave.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        let _guard = PROCESS_ENV_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&self, name: &str, value: &str) -> Result<(), EnvError> {
        check_entry(name, value)?;
        let _guard = PROCESS_ENV_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::env::set_var(name, value);
        Ok(())
    }
}

// ── In-memory environment ─────────────────────────────────────────────────

/// An isolated environment. Clones share the same variables.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with initial variables.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: Arc::new(RwLock::new(vars)),
        }
    }

    /// Copy of every variable currently set.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn set(&self, name: &str, value: &str) -> Result<(), EnvError> {
        check_entry(name, value)?;
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

// ── Binding ───────────────────────────────────────────────────────────────

/// A binding mirrored to one environment variable.
///
/// Reads of an unset variable yield the empty string.
#[derive(Clone)]
pub struct EnvBinding {
    name: String,
    store: Arc<dyn EnvStore>,
}

impl EnvBinding {
    pub fn new(name: impl Into<String>, store: Arc<dyn EnvStore>) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    /// Bound to the real process environment.
    pub fn process(name: impl Into<String>) -> Self {
        Self::new(name, Arc::new(ProcessEnv))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn write_str(&self, s: &str) -> BindResult<()> {
        self.store.set(&self.name, s)?;
        debug!(name = %self.name, "environment variable set");
        Ok(())
    }
}

impl Binding for EnvBinding {
    fn get(&self) -> BindResult<Value> {
        Ok(Value::String(self.store.get(&self.name).unwrap_or_default()))
    }

    fn set(&self, value: Value) -> BindResult<()> {
        self.write_str(&value.to_string())
    }
}

impl fmt::Debug for EnvBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_entry() {
        assert!(check_entry("PATH", "/bin").is_ok());
        assert!(check_entry("EMPTY", "").is_ok());
        assert_eq!(
            check_entry("", "x"),
            Err(EnvError::InvalidName { name: "".into() })
        );
        assert_eq!(
            check_entry("A=B", "x"),
            Err(EnvError::InvalidName { name: "A=B".into() })
        );
        assert_eq!(
            check_entry("A", "x\0y"),
            Err(EnvError::InvalidValue { name: "A".into() })
        );
    }

    #[test]
    fn test_memory_env_clones_share_vars() {
        let env = MemoryEnv::from_pairs([("HOME", "/root")]);
        let alias = env.clone();
        alias.set("HOME", "/home/k").unwrap();
        assert_eq!(env.get("HOME").as_deref(), Some("/home/k"));
        assert_eq!(env.get("UNSET"), None);
    }

    #[test]
    fn test_unset_reads_empty_string() {
        let b = EnvBinding::new("KESTREL_UNSET", Arc::new(MemoryEnv::new()));
        assert_eq!(b.get().unwrap(), Value::from(""));
    }
}
