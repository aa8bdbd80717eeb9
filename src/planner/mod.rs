//! Query planner - converts a typed query into the platform's query tree.
//!
//! Two passes over the link tree:
//! 1. Alias assignment: every link gets a unique alias and a relationship
//!    path, recorded in an [`AliasMap`] for rehydration.
//! 2. Resolution: every link's navigation is wired to entity and attribute
//!    names, expanding many-to-many links into two hops.

pub mod alias;
pub mod assembler;
pub mod resolver;

pub use alias::{alias_for, assign_aliases, AliasMap, MAX_ALIASES};
pub use assembler::{CompiledQuery, QueryAssembler};
pub use resolver::{Hop, LinkResolver, RelationshipKind, ResolvedLink, Wiring};
