//! Entity schema metadata.
//!
//! Each entity type is described by an [`EntityDescriptor`]: logical name,
//! primary key, property → attribute table and navigation → relationship
//! table. Descriptors are collected into a [`Schema`], which also owns the
//! factory used to create records during rehydration and the junction name
//! table used for many-to-many links.
//!
//! # Example
//!
//! ```ignore
//! use xrmquery::metadata::Schema;
//!
//! let schema = Schema::builder()
//!     .register::<Account>()
//!     .register::<Contact>()
//!     .build()?;
//! ```

mod descriptor;
mod junction;
mod loader;
mod registry;

pub use descriptor::{AttributeDescriptor, EntityDescriptor, RelationshipDescriptor};
pub use junction::JunctionNames;
pub use loader::{SchemaLoadError, SchemaLoader};
pub use registry::{EntityFactory, Schema, SchemaBuilder};
