//! Typed member tokens and their translation to attribute logical names.
//!
//! Generated entity types expose their properties as `const` tokens:
//!
//! ```ignore
//! impl Account {
//!     pub const NAME: Attribute<Account, String> = Attribute::new("Name");
//!     pub const CONTACTS: Navigation<Account, Contact> = Navigation::new("Contacts");
//! }
//! ```
//!
//! A token is turned into a [`MemberExpr`] and translated against the
//! [`Schema`] when the query is compiled.

use std::fmt;
use std::marker::PhantomData;

use uuid::Uuid;

use crate::error::{QueryError, QueryResult};
use crate::metadata::Schema;
use crate::model::EarlyBound;

/// Property name of the identifier every entity inherits.
pub const ID_PROPERTY: &str = "Id";

/// A member access, possibly wrapped in type conversions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberExpr {
    Property {
        /// Logical name of the entity the member is accessed on.
        owner: &'static str,
        property: &'static str,
        /// Declared on the base entity rather than the generated type.
        declared_on_base: bool,
    },
    Convert(Box<MemberExpr>),
}

impl MemberExpr {
    pub fn property(owner: &'static str, property: &'static str) -> Self {
        MemberExpr::Property {
            owner,
            property,
            declared_on_base: false,
        }
    }

    /// Wrap in a conversion.
    pub fn convert(self) -> Self {
        MemberExpr::Convert(Box::new(self))
    }

    fn unwrap_conversions(&self) -> (&'static str, &'static str, bool) {
        match self {
            MemberExpr::Property {
                owner,
                property,
                declared_on_base,
            } => (owner, property, *declared_on_base),
            MemberExpr::Convert(inner) => inner.unwrap_conversions(),
        }
    }

    /// Logical name of the entity the member belongs to.
    pub fn owner(&self) -> &'static str {
        self.unwrap_conversions().0
    }

    /// Attribute logical name behind this member.
    ///
    /// The identifier inherited from the base entity has no entry of its own
    /// in the attribute table and resolves to the owner's primary key.
    pub fn logical_name(&self, schema: &Schema) -> QueryResult<String> {
        let (owner, property, declared_on_base) = self.unwrap_conversions();
        let descriptor = schema.descriptor(owner)?;

        if let Some(name) = descriptor.attribute_name(property) {
            return Ok(name.to_string());
        }
        if declared_on_base {
            return Ok(descriptor.primary_key.clone());
        }

        Err(QueryError::missing_attribute(owner, property))
    }
}

impl fmt::Display for MemberExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberExpr::Property { owner, property, .. } => write!(f, "{}.{}", owner, property),
            MemberExpr::Convert(inner) => write!(f, "convert({})", inner),
        }
    }
}

/// A typed attribute property of `T` holding values of type `V`.
pub struct Attribute<T, V> {
    property: &'static str,
    declared_on_base: bool,
    converted: bool,
    _marker: PhantomData<fn() -> (T, V)>,
}

impl<T, V> Clone for Attribute<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Attribute<T, V> {}

impl<T, V> fmt::Debug for Attribute<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("property", &self.property)
            .field("converted", &self.converted)
            .finish()
    }
}

impl<T: EarlyBound, V> Attribute<T, V> {
    pub const fn new(property: &'static str) -> Self {
        Self {
            property,
            declared_on_base: false,
            converted: false,
            _marker: PhantomData,
        }
    }

    /// The same attribute read through a value conversion, as when an
    /// enum-typed property is compared as its integer.
    pub const fn converted(self) -> Self {
        Self {
            property: self.property,
            declared_on_base: self.declared_on_base,
            converted: true,
            _marker: PhantomData,
        }
    }

    pub fn property(&self) -> &'static str {
        self.property
    }

    pub fn expr(&self) -> MemberExpr {
        let expr = MemberExpr::Property {
            owner: T::LOGICAL_NAME,
            property: self.property,
            declared_on_base: self.declared_on_base,
        };
        if self.converted {
            expr.convert()
        } else {
            expr
        }
    }

    /// Drop the value type.
    pub fn erase(self) -> Member<T> {
        Member {
            expr: self.expr(),
            _marker: PhantomData,
        }
    }

    pub fn logical_name(&self, schema: &Schema) -> QueryResult<String> {
        self.expr().logical_name(schema)
    }
}

impl<T: EarlyBound> Attribute<T, Uuid> {
    /// The identifier every entity inherits.
    pub const fn id() -> Self {
        Self {
            property: ID_PROPERTY,
            declared_on_base: true,
            converted: false,
            _marker: PhantomData,
        }
    }
}

/// An attribute of `T` with its value type erased, for heterogeneous lists
/// such as column sets.
pub struct Member<T> {
    expr: MemberExpr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Member<T> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Member").field(&self.expr).finish()
    }
}

impl<T> Member<T> {
    pub fn expr(&self) -> &MemberExpr {
        &self.expr
    }

    pub fn into_expr(self) -> MemberExpr {
        self.expr
    }

    pub fn logical_name(&self, schema: &Schema) -> QueryResult<String> {
        self.expr.logical_name(schema)
    }
}

impl<T: EarlyBound, V> From<Attribute<T, V>> for Member<T> {
    fn from(attribute: Attribute<T, V>) -> Self {
        attribute.erase()
    }
}

/// A navigation property from `T` to related `U` records.
///
/// The same token type serves collection-valued and single-valued
/// navigations; `U` is always the element type.
pub struct Navigation<T, U> {
    property: &'static str,
    _marker: PhantomData<fn() -> (T, U)>,
}

impl<T, U> Clone for Navigation<T, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, U> Copy for Navigation<T, U> {}

impl<T, U> fmt::Debug for Navigation<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Navigation").field(&self.property).finish()
    }
}

impl<T: EarlyBound, U: EarlyBound> Navigation<T, U> {
    pub const fn new(property: &'static str) -> Self {
        Self {
            property,
            _marker: PhantomData,
        }
    }

    pub fn property(&self) -> &'static str {
        self.property
    }

    pub fn reference(&self) -> NavigationRef {
        NavigationRef {
            owner: T::LOGICAL_NAME,
            property: self.property,
            target: U::LOGICAL_NAME,
        }
    }
}

/// A navigation with its types erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationRef {
    pub owner: &'static str,
    pub property: &'static str,
    pub target: &'static str,
}

impl fmt::Display for NavigationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.property)
    }
}
