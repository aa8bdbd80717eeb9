//! Many-to-many junction entity naming.
//!
//! Custom many-to-many relationships are backed by a junction entity named
//! after the relationship schema. Several built-in relationships break that
//! convention; they are listed here and can be extended from configuration.

use std::collections::HashMap;

use log::debug;

const ASSOCIATION_SUFFIX: &str = "_association";

/// Built-in relationships whose junction entity is not named after them.
static IRREGULAR_JUNCTIONS: &[(&str, &str)] = &[
    ("knowledgearticle_category", "KnowledgeArticleCategory"),
    (
        "ChannelAccessProfile_Privilege",
        "ChannelAccessProfileEntityAccessLevel",
    ),
    (
        "contact_subscription_association",
        "SubscriptionManuallyTrackedObject",
    ),
    ("serviceplan_appmodule", "ServicePlanAppModules"),
    (
        "sample_product_knowledgebaserecord",
        "msdyn_sample_product_knowledgebaserecord",
    ),
];

/// Relationship schema name → junction entity name table.
///
/// Keys are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct JunctionNames {
    irregular: HashMap<String, String>,
}

impl Default for JunctionNames {
    fn default() -> Self {
        let irregular = IRREGULAR_JUNCTIONS
            .iter()
            .map(|(schema, junction)| (schema.to_lowercase(), junction.to_string()))
            .collect();
        Self { irregular }
    }
}

impl JunctionNames {
    /// A table with no irregular entries.
    pub fn empty() -> Self {
        Self {
            irregular: HashMap::new(),
        }
    }

    /// Add or replace an irregular mapping.
    pub fn insert(&mut self, schema_name: impl AsRef<str>, junction: impl Into<String>) {
        self.irregular
            .insert(schema_name.as_ref().to_lowercase(), junction.into());
    }

    pub fn extend<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (schema_name, junction) in entries {
            self.insert(schema_name, junction);
        }
    }

    pub fn get(&self, schema_name: &str) -> Option<&str> {
        self.irregular
            .get(&schema_name.to_lowercase())
            .map(String::as_str)
    }

    /// Junction entity logical name for a many-to-many relationship.
    ///
    /// An explicit override wins; otherwise an `_association` suffix is
    /// stripped, then the irregular table is consulted, and finally the
    /// schema name itself is used. The result is lower-cased.
    pub fn resolve(&self, schema_name: &str, junction_override: Option<&str>) -> String {
        if let Some(junction) = junction_override {
            return junction.to_lowercase();
        }

        if let Some(stripped) = schema_name.strip_suffix(ASSOCIATION_SUFFIX) {
            return stripped.to_lowercase();
        }

        if let Some(junction) = self.get(schema_name) {
            return junction.to_lowercase();
        }

        debug!(
            "no junction mapping for '{}', using the relationship schema name",
            schema_name
        );
        schema_name.to_lowercase()
    }
}
