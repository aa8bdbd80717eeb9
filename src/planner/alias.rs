//! Alias assignment over the link tree.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{QueryError, QueryResult};
use crate::metadata::Schema;
use crate::query::JoinOperator;
use crate::typed::LinkSpec;

/// Aliases available to one query: `A`-`Z`, then `a`-`z`.
pub const MAX_ALIASES: usize = 52;

/// Alias character for the `index`-th link of a query.
pub fn alias_for(index: usize) -> Option<char> {
    const LETTERS: usize = 26;
    let offset = match index {
        i if i < LETTERS => b'A' + i as u8,
        i if i < MAX_ALIASES => b'a' + (i - LETTERS) as u8,
        _ => return None,
    };
    Some(offset as char)
}

/// Alias → dotted relationship path (`schema[:Role]` segments).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap(BTreeMap<char, String>);

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: char, path: impl Into<String>) {
        self.0.insert(alias, path.into());
    }

    pub fn get(&self, alias: char) -> Option<&str> {
        self.0.get(&alias).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.0.iter().map(|(a, p)| (*a, p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(a, p)| (a, p.into())).collect())
    }
}

/// Assign an alias to every link, depth first in declaration order, and
/// fill in `default_join` where no join operator was set.
///
/// Aliases come from a single counter shared by the whole tree.
pub fn assign_aliases(
    links: &mut [LinkSpec],
    schema: &Schema,
    default_join: JoinOperator,
) -> QueryResult<AliasMap> {
    let mut walker = AliasWalker {
        schema,
        default_join,
        next: 0,
        aliases: AliasMap::new(),
    };
    walker.walk(links, None)?;

    debug!("assigned {} link aliases", walker.aliases.len());
    Ok(walker.aliases)
}

struct AliasWalker<'a> {
    schema: &'a Schema,
    default_join: JoinOperator,
    next: usize,
    aliases: AliasMap,
}

impl AliasWalker<'_> {
    fn walk(&mut self, links: &mut [LinkSpec], parent_path: Option<&str>) -> QueryResult<()> {
        for link in links {
            let alias = alias_for(self.next).ok_or(QueryError::AliasesExhausted(MAX_ALIASES))?;
            self.next += 1;

            let segment = self.path_segment(link)?;
            let path = match parent_path {
                Some(parent) => format!("{}.{}", parent, segment),
                None => segment,
            };

            link.entity_alias = Some(alias.to_string());
            if link.join_operator.is_none() {
                link.join_operator = Some(self.default_join);
            }
            self.aliases.insert(alias, path.clone());

            self.walk(&mut link.link_entities, Some(&path))?;
        }
        Ok(())
    }

    fn path_segment(&self, link: &LinkSpec) -> QueryResult<String> {
        let navigation = &link.navigation;
        let relationship = self
            .schema
            .descriptor(navigation.owner)?
            .relationship_for(navigation.property)
            .ok_or_else(|| {
                QueryError::missing_relationship(navigation.owner, navigation.property)
            })?;

        Ok(relationship.relationship().path_segment())
    }
}
