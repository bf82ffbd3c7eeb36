//! Shared types for the Kestrel binding layer.
//!
//! This crate defines the language-level `Value`, the indexed-container
//! capability that element bindings delegate to, and two concrete
//! shared containers (list and map).

mod container;
mod error;
mod value;

pub use container::{IndexedContainer, ListContainer, MapContainer};
pub use error::{IndexError, IndexResult};
pub use value::Value;
