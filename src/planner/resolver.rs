//! Link resolution: relationship metadata → from/to wiring.
//!
//! Which side carries the foreign key decides the link's shape:
//!
//! | mirror attribute | forward attribute | kind         | wiring                                   |
//! |------------------|-------------------|--------------|------------------------------------------|
//! | yes              | -                 | one-to-many  | parent.pk → child.fk                     |
//! | no               | yes               | many-to-one  | parent.fk → child.pk                     |
//! | no               | no                | many-to-many | parent.pk → junction.parent_pk, then junction.child_pk → child.pk |
//!
//! The target type need not declare the mirror navigation at all; a one-sided
//! relationship without a foreign key is joined through its junction.

use log::trace;

use crate::error::{QueryError, QueryResult};
use crate::metadata::Schema;
use crate::query::{self, ColumnSet, JoinOperator};
use crate::typed::{columns_to_untyped, LinkSpec, NavigationRef};

/// Shape of a resolved relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// One join hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub from_entity: String,
    pub from_attribute: String,
    pub to_entity: String,
    pub to_attribute: String,
}

impl Hop {
    fn new(
        from_entity: &str,
        from_attribute: &str,
        to_entity: &str,
        to_attribute: &str,
    ) -> Self {
        Self {
            from_entity: from_entity.to_string(),
            from_attribute: from_attribute.to_string(),
            to_entity: to_entity.to_string(),
            to_attribute: to_attribute.to_string(),
        }
    }

    fn into_link(self, join_operator: JoinOperator) -> query::LinkEntity {
        query::LinkEntity::new(
            self.from_entity,
            self.from_attribute,
            self.to_entity,
            self.to_attribute,
            join_operator,
        )
    }
}

/// How a navigation joins its owner to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wiring {
    pub kind: RelationshipKind,
    /// Parent → junction hop, many-to-many only.
    pub junction: Option<Hop>,
    /// The hop reaching the target entity.
    pub target: Hop,
}

/// An untyped link tagged with the kind of relationship behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLink {
    pub kind: RelationshipKind,
    pub link: query::LinkEntity,
}

pub struct LinkResolver<'a> {
    schema: &'a Schema,
}

impl<'a> LinkResolver<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Work out the wiring of a navigation from the relationship tables of
    /// both sides.
    pub fn wiring(&self, navigation: &NavigationRef) -> QueryResult<Wiring> {
        let missing =
            || QueryError::missing_relationship(navigation.owner, navigation.property);

        let parent = self.schema.descriptor(navigation.owner)?;
        let relationship = parent
            .relationship_for(navigation.property)
            .ok_or_else(missing)?;
        let schema_name = relationship.schema_name.as_str();

        let forward = parent
            .find_relationship(schema_name, relationship.role)
            .ok_or_else(missing)?;
        if forward.target != navigation.target {
            return Err(QueryError::TargetMismatch {
                relationship: schema_name.to_string(),
                expected: navigation.target.to_string(),
                found: forward.target.clone(),
            });
        }

        let child = self.schema.descriptor(&forward.target)?;
        let mirror = child.find_mirror(schema_name, relationship.role);

        if let Some(foreign_key) = mirror.and_then(|m| m.attribute.as_deref()) {
            return Ok(Wiring {
                kind: RelationshipKind::OneToMany,
                junction: None,
                target: Hop::new(
                    &parent.logical_name,
                    &parent.primary_key,
                    &child.logical_name,
                    foreign_key,
                ),
            });
        }

        if let Some(foreign_key) = forward.attribute.as_deref() {
            return Ok(Wiring {
                kind: RelationshipKind::ManyToOne,
                junction: None,
                target: Hop::new(
                    &parent.logical_name,
                    foreign_key,
                    &child.logical_name,
                    &child.primary_key,
                ),
            });
        }

        let junction = self
            .schema
            .junctions()
            .resolve(schema_name, relationship.junction.as_deref());
        trace!("{} joins through junction '{}'", navigation, junction);

        Ok(Wiring {
            kind: RelationshipKind::ManyToMany,
            junction: Some(Hop::new(
                &parent.logical_name,
                &parent.primary_key,
                &junction,
                &parent.primary_key,
            )),
            target: Hop::new(
                &junction,
                &child.primary_key,
                &child.logical_name,
                &child.primary_key,
            ),
        })
    }

    /// Resolve a link and its sub-links into untyped link entities.
    ///
    /// Columns, criteria, orders, the alias and sub-links attach to the hop
    /// reaching the target. A junction hop is a left outer join with no
    /// alias and no columns.
    pub fn resolve(&self, spec: &LinkSpec) -> QueryResult<ResolvedLink> {
        let wiring = self.wiring(&spec.navigation)?;

        let mut link = wiring
            .target
            .into_link(spec.join_operator.unwrap_or_default());
        link.entity_alias = spec.entity_alias.clone();
        link.columns = match &spec.columns {
            Some(members) => columns_to_untyped(members, self.schema)?,
            None => ColumnSet::all(),
        };

        link.link_criteria = spec.criteria.to_untyped(self.schema)?;
        for condition in &spec.conditions {
            link.link_criteria
                .add_condition(condition.to_untyped(self.schema)?);
        }

        link.orders = spec
            .orders
            .iter()
            .map(|o| o.to_untyped(self.schema))
            .collect::<QueryResult<_>>()?;

        for sub_link in &spec.link_entities {
            link.link_entities.push(self.resolve(sub_link)?.link);
        }

        let link = match wiring.junction {
            Some(hop) => {
                let mut outer = hop.into_link(JoinOperator::LeftOuter);
                outer.link_entities.push(link);
                outer
            }
            None => link,
        };

        Ok(ResolvedLink {
            kind: wiring.kind,
            link,
        })
    }
}
