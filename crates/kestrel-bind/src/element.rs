use crate::binding::Binding;
use crate::error::BindResult;
use kestrel_types::{IndexedContainer, Value};
use std::fmt;
use std::sync::Arc;

/// A binding to one element of a shared container.
///
/// Holds no storage of its own: every `get` and `set` goes straight to the
/// container, and container errors come back unchanged.
#[derive(Clone)]
pub struct ElementBinding {
    container: Arc<dyn IndexedContainer>,
    index: Value,
}

impl ElementBinding {
    pub fn new(container: Arc<dyn IndexedContainer>, index: Value) -> Self {
        Self { container, index }
    }

    pub fn index(&self) -> &Value {
        &self.index
    }
}

impl Binding for ElementBinding {
    fn get(&self) -> BindResult<Value> {
        Ok(self.container.index_one(&self.index)?)
    }

    fn set(&self, value: Value) -> BindResult<()> {
        Ok(self.container.index_set(&self.index, value)?)
    }
}

impl fmt::Debug for ElementBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementBinding")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
