//! Conditions, filters and orders of the untyped query tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Value;

/// Comparison applied by a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
    Null,
    NotNull,
    BeginsWith,
    EndsWith,
    Contains,
    DoesNotContain,
}

impl ConditionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "not_equal",
            Self::GreaterThan => "greater_than",
            Self::GreaterEqual => "greater_equal",
            Self::LessThan => "less_than",
            Self::LessEqual => "less_equal",
            Self::Like => "like",
            Self::NotLike => "not_like",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Between => "between",
            Self::NotBetween => "not_between",
            Self::Null => "null",
            Self::NotNull => "not_null",
            Self::BeginsWith => "begins_with",
            Self::EndsWith => "ends_with",
            Self::Contains => "contains",
            Self::DoesNotContain => "does_not_contain",
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How conditions and child filters of a filter combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

/// One attribute compared against a value list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionExpression {
    pub attribute_name: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub values: Vec<Value>,
}

impl ConditionExpression {
    pub fn new(
        attribute_name: impl Into<String>,
        operator: ConditionOperator,
        values: Vec<Value>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            operator,
            values,
        }
    }
}

impl fmt::Display for ConditionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute_name, self.operator)?;
        if !self.values.is_empty() {
            let values: Vec<String> = self.values.iter().map(ToString::to_string).collect();
            write!(f, " {}", values.join(", "))?;
        }
        Ok(())
    }
}

/// A boolean combination of conditions and nested filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterExpression {
    pub filter_operator: LogicalOperator,
    pub conditions: Vec<ConditionExpression>,
    pub filters: Vec<FilterExpression>,
}

impl FilterExpression {
    pub fn new(filter_operator: LogicalOperator) -> Self {
        Self {
            filter_operator,
            ..Default::default()
        }
    }

    pub fn add_condition(&mut self, condition: ConditionExpression) {
        self.conditions.push(condition);
    }

    pub fn add_filter(&mut self, filter: FilterExpression) {
        self.filters.push(filter);
    }

    /// True when the filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.filters.iter().all(FilterExpression::is_empty)
    }

    pub(crate) fn render(&self, out: &mut Vec<String>, depth: usize) {
        if self.is_empty() {
            return;
        }
        out.push(format!("{}filter {}", indent(depth), self.filter_operator));
        for condition in &self.conditions {
            out.push(format!("{}{}", indent(depth + 1), condition));
        }
        for filter in &self.filters {
            filter.render(out, depth + 1);
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Ascending,
    Descending,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

/// Sort on one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderExpression {
    pub attribute_name: String,
    #[serde(default)]
    pub order_type: OrderType,
}

impl OrderExpression {
    pub fn new(attribute_name: impl Into<String>, order_type: OrderType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            order_type,
        }
    }
}

impl fmt::Display for OrderExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order {} {}", self.attribute_name, self.order_type)
    }
}

pub(crate) fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
