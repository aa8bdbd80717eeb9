//! The contract generated entity types fulfil.

use uuid::Uuid;

use super::entity::Entity;
use crate::metadata::EntityDescriptor;

/// A strongly-typed entity: a thin wrapper over an untyped [`Entity`] whose
/// attribute getters proxy into the attribute bag.
///
/// Implementors also expose `const` member tokens
/// ([`Attribute`](crate::typed::Attribute),
/// [`Navigation`](crate::typed::Navigation)) used to build typed queries.
pub trait EarlyBound: Sized {
    /// The platform logical name of this entity type.
    const LOGICAL_NAME: &'static str;

    /// Schema metadata for this type.
    fn descriptor() -> EntityDescriptor;

    /// Wrap an untyped record.
    fn from_entity(entity: Entity) -> Self;

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    fn into_entity(self) -> Entity;

    fn id(&self) -> Uuid {
        self.entity().id
    }
}

/// Factory for a blank record of `T`, as stored in the schema registry.
pub(crate) fn new_entity<T: EarlyBound>() -> Entity {
    Entity::new(T::LOGICAL_NAME)
}
