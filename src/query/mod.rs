//! The platform's untyped, string-keyed query tree.
//!
//! These are the shapes the execution boundary accepts. They serialize with
//! serde so a transport can ship them as JSON, and they render to an
//! indented text form for logging and snapshot tests:
//!
//! ```text
//! ee_test [ee_name] top 10
//!   filter and
//!     ee_name equal 'x'
//!   order ee_name ascending
//!   link A inner ee_test.ee_testid -> ee_testchild.ee_testid [*]
//! ```

mod filter;
mod link;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use filter::{
    ConditionExpression, ConditionOperator, FilterExpression, LogicalOperator, OrderExpression,
    OrderType,
};
pub use link::{JoinOperator, LinkEntity};

use filter::indent;

/// Attributes to return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSet {
    pub all_columns: bool,
    pub columns: Vec<String>,
}

impl ColumnSet {
    /// Every attribute.
    pub fn all() -> Self {
        Self {
            all_columns: true,
            columns: Vec::new(),
        }
    }

    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            all_columns: false,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ColumnSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_columns {
            f.write_str("[*]")
        } else {
            write!(f, "[{}]", self.columns.join(", "))
        }
    }
}

/// Page selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingInfo {
    pub page_number: u32,
    pub count: u32,
    pub paging_cookie: Option<String>,
    pub return_total_record_count: bool,
}

impl PagingInfo {
    pub fn new(page_number: u32, count: u32) -> Self {
        Self {
            page_number,
            count,
            ..Default::default()
        }
    }

    fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

/// A complete untyped query for one root entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryExpression {
    pub entity_name: String,
    pub column_set: ColumnSet,
    pub criteria: FilterExpression,
    pub orders: Vec<OrderExpression>,
    pub link_entities: Vec<LinkEntity>,
    pub page_info: PagingInfo,
    pub top_count: Option<u32>,
    pub distinct: bool,
}

impl QueryExpression {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            ..Default::default()
        }
    }

    pub fn add_order(&mut self, attribute_name: impl Into<String>, order_type: OrderType) {
        self.orders
            .push(OrderExpression::new(attribute_name, order_type));
    }

    pub fn add_link(&mut self, link: LinkEntity) {
        self.link_entities.push(link);
    }

    /// Every link in the tree, depth first.
    pub fn links(&self) -> Vec<&LinkEntity> {
        fn walk<'a>(links: &'a [LinkEntity], out: &mut Vec<&'a LinkEntity>) {
            for link in links {
                out.push(link);
                walk(&link.link_entities, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.link_entities, &mut out);
        out
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = format!("{} {}", self.entity_name, self.column_set);
        if self.distinct {
            header.push_str(" distinct");
        }
        if let Some(top) = self.top_count {
            header.push_str(&format!(" top {}", top));
        }

        let mut lines = vec![header];
        if !self.page_info.is_unset() {
            let mut page = format!(
                "{}page {} count {}",
                indent(1),
                self.page_info.page_number,
                self.page_info.count
            );
            if self.page_info.return_total_record_count {
                page.push_str(" total");
            }
            lines.push(page);
        }
        self.criteria.render(&mut lines, 1);
        for order in &self.orders {
            lines.push(format!("{}{}", indent(1), order));
        }
        for link in &self.link_entities {
            link.render(&mut lines, 1);
        }

        f.write_str(&lines.join("\n"))
    }
}
