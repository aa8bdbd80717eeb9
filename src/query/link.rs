//! Link entities: joins in the untyped query tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::filter::{indent, FilterExpression, OrderExpression};
use super::ColumnSet;

/// Type of join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinOperator {
    #[default]
    Inner,
    LeftOuter,
    Natural,
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner => f.write_str("inner"),
            Self::LeftOuter => f.write_str("left_outer"),
            Self::Natural => f.write_str("natural"),
        }
    }
}

/// A join from one entity attribute to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntity {
    pub link_from_entity_name: String,
    pub link_from_attribute_name: String,
    pub link_to_entity_name: String,
    pub link_to_attribute_name: String,
    #[serde(default)]
    pub join_operator: JoinOperator,
    #[serde(default)]
    pub columns: ColumnSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_alias: Option<String>,
    #[serde(default)]
    pub link_criteria: FilterExpression,
    #[serde(default)]
    pub orders: Vec<OrderExpression>,
    #[serde(default)]
    pub link_entities: Vec<LinkEntity>,
}

impl LinkEntity {
    pub fn new(
        link_from_entity_name: impl Into<String>,
        link_from_attribute_name: impl Into<String>,
        link_to_entity_name: impl Into<String>,
        link_to_attribute_name: impl Into<String>,
        join_operator: JoinOperator,
    ) -> Self {
        Self {
            link_from_entity_name: link_from_entity_name.into(),
            link_from_attribute_name: link_from_attribute_name.into(),
            link_to_entity_name: link_to_entity_name.into(),
            link_to_attribute_name: link_to_attribute_name.into(),
            join_operator,
            columns: ColumnSet::default(),
            entity_alias: None,
            link_criteria: FilterExpression::default(),
            orders: Vec::new(),
            link_entities: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.entity_alias = Some(alias.into());
        self
    }

    pub fn with_columns(mut self, columns: ColumnSet) -> Self {
        self.columns = columns;
        self
    }

    pub(crate) fn render(&self, out: &mut Vec<String>, depth: usize) {
        out.push(format!(
            "{}link {} {} {}.{} -> {}.{} {}",
            indent(depth),
            self.entity_alias.as_deref().unwrap_or("-"),
            self.join_operator,
            self.link_from_entity_name,
            self.link_from_attribute_name,
            self.link_to_entity_name,
            self.link_to_attribute_name,
            self.columns,
        ));
        self.link_criteria.render(out, depth + 1);
        for order in &self.orders {
            out.push(format!("{}{}", indent(depth + 1), order));
        }
        for link in &self.link_entities {
            link.render(out, depth + 1);
        }
    }
}
