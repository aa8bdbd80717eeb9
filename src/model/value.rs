//! Attribute values carried by entity records and query conditions.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A typed pointer to another record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    pub logical_name: String,
    pub id: Uuid,
    /// Primary name of the referenced record, when the platform supplies it.
    #[serde(default)]
    pub name: Option<String>,
}

impl EntityReference {
    pub fn new(logical_name: impl Into<String>, id: Uuid) -> Self {
        Self {
            logical_name: logical_name.into(),
            id,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A picklist value as stored by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionSetValue(pub i32);

impl OptionSetValue {
    pub fn value(&self) -> i32 {
        self.0
    }
}

/// A value returned under a link-entity alias, tagged with the entity and
/// attribute it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasedValue {
    pub entity_logical_name: String,
    pub attribute_logical_name: String,
    pub value: Box<Value>,
}

impl AliasedValue {
    pub fn new(
        entity_logical_name: impl Into<String>,
        attribute_logical_name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            entity_logical_name: entity_logical_name.into(),
            attribute_logical_name: attribute_logical_name.into(),
            value: Box::new(value.into()),
        }
    }
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    BigInt(i64),
    Double(f64),
    String(String),
    Guid(Uuid),
    EntityReference(EntityReference),
    OptionSet(OptionSetValue),
    /// A typed enum member; sent to the platform as its integer.
    Enum(i32),
    Aliased(AliasedValue),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_aliased(&self) -> bool {
        matches!(self, Value::Aliased(_))
    }

    pub fn as_aliased(&self) -> Option<&AliasedValue> {
        match self {
            Value::Aliased(aliased) => Some(aliased),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(i) | Value::Enum(i) => Some(*i),
            Value::OptionSet(o) => Some(o.0),
            _ => None,
        }
    }

    pub fn as_guid(&self) -> Option<Uuid> {
        match self {
            Value::Guid(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_entity_reference(&self) -> Option<&EntityReference> {
        match self {
            Value::EntityReference(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_option_set(&self) -> Option<OptionSetValue> {
        match self {
            Value::OptionSet(o) => Some(*o),
            _ => None,
        }
    }

    /// Reduce a typed value to the shape the platform expects in a condition:
    /// references become their identifier, enum members their integer.
    pub fn into_condition_value(self) -> Value {
        match self {
            Value::EntityReference(r) => Value::Guid(r.id),
            Value::Enum(i) => Value::Int(i),
            other => other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int(i) | Value::Enum(i) => write!(f, "{}", i),
            Value::BigInt(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "'{}'", s),
            Value::Guid(id) => write!(f, "{}", id),
            Value::EntityReference(r) => write!(f, "{}({})", r.logical_name, r.id),
            Value::OptionSet(o) => write!(f, "option({})", o.0),
            Value::Aliased(a) => write!(
                f,
                "{}.{}={}",
                a.entity_logical_name, a.attribute_logical_name, a.value
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::BigInt(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(id: Uuid) -> Self {
        Value::Guid(id)
    }
}

impl From<EntityReference> for Value {
    fn from(r: EntityReference) -> Self {
        Value::EntityReference(r)
    }
}

impl From<OptionSetValue> for Value {
    fn from(o: OptionSetValue) -> Self {
        Value::OptionSet(o)
    }
}

impl From<AliasedValue> for Value {
    fn from(a: AliasedValue) -> Self {
        Value::Aliased(a)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
