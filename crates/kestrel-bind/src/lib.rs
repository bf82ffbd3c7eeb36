//! Kestrel variable bindings.
//!
//! A binding is a gettable/settable handle to a language-level value.
//! The evaluator holds every binding as `dyn Binding` and never needs to
//! know whether the value lives in a heap cell, a container element or
//! an environment variable.

mod binding;
mod element;
mod env;
mod error;
mod path_list;

pub use binding::{Binding, CellBinding, ReadOnlyBinding, Validator};
pub use element::ElementBinding;
pub use env::{EnvBinding, EnvStore, MemoryEnv, ProcessEnv};
pub use error::{BindError, BindResult, EnvError};
pub use path_list::{split_path_list, PathList, PathListEnvBinding, PATH_LIST_SEPARATOR};

pub use kestrel_types::{IndexError, IndexedContainer, Value};
