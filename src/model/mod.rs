//! Record and value types shared by the untyped and typed layers.

mod early_bound;
mod entity;
mod value;

pub use early_bound::EarlyBound;
pub(crate) use early_bound::new_entity;
pub use entity::{
    AttributeCollection, Entity, EntityCollection, EntityRole, RelatedEntities, Relationship,
};
pub use value::{AliasedValue, EntityReference, OptionSetValue, Value};
