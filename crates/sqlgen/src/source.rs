//! FROM-clause items: tables, function sources, subqueries and joins.
//!
//! Every source is used through an [`AliasedSource`], which pairs it with an
//! optional alias and hands out columns bound to that alias. Statements keep
//! a [`SourceRegistry`] mapping alias-or-name to source so columns can be
//! looked up by key.
//!
//! # Example
//! ```
//! use sqlgen::{AliasedSource, Filter, Join, Table};
//!
//! let customer = AliasedSource::aliased(Table::new("Customer")?, "c")?;
//! let order = AliasedSource::aliased(Table::new("Order")?, "o")?;
//! let join = Join::start(customer.clone())
//!     .inner_join(order.clone())?
//!     .on(Filter::equal_to(customer.column("Id")?, order.column("CustomerId")?))?;
//! assert!(join.sources().contains("c"));
//! # Ok::<(), sqlgen::BuildError>(())
//! ```

use crate::error::{BuildError, BuildResult};
use crate::expr::{AllColumns, Column, Function};
use crate::filter::Filter;
use crate::ident::{Ident, IntoIdent};
use crate::stmt::{Query, SelectBuilder, SetOperation};
use std::sync::Arc;

/// A named table, optionally schema-qualified (`dbo.Customer`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    name: Ident,
}

impl Table {
    pub fn new(name: impl IntoIdent) -> BuildResult<Self> {
        Ok(Self {
            name: name.into_ident()?,
        })
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }
}

/// Anything that can follow FROM by itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Table(Table),
    /// Table-valued function: `name(args)`
    Function(Function),
    /// Derived table: `(SELECT ...)`
    Query(Query),
}

impl From<Table> for Source {
    fn from(table: Table) -> Self {
        Source::Table(table)
    }
}

impl From<Function> for Source {
    fn from(function: Function) -> Self {
        Source::Function(function)
    }
}

impl From<Query> for Source {
    fn from(query: Query) -> Self {
        Source::Query(query)
    }
}

impl From<SelectBuilder> for Source {
    fn from(select: SelectBuilder) -> Self {
        Source::Query(select.into())
    }
}

impl From<SetOperation> for Source {
    fn from(op: SetOperation) -> Self {
        Source::Query(op.into())
    }
}

/// A source with an optional alias.
///
/// Cloning is cheap; clones compare equal and share the same key.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedSource {
    source: Arc<Source>,
    alias: Option<Ident>,
}

impl AliasedSource {
    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: Arc::new(source.into()),
            alias: None,
        }
    }

    pub fn aliased(source: impl Into<Source>, alias: impl IntoIdent) -> BuildResult<Self> {
        Ok(Self {
            source: Arc::new(source.into()),
            alias: Some(alias.into_ident()?),
        })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }

    /// Registry key: the alias, or the table name for unaliased tables.
    ///
    /// The key is the name as rendered, quotes included: an alias of
    /// `"Order Details"` is looked up as `"\"Order Details\""`. Unaliased
    /// function and subquery sources have no key.
    pub fn key(&self) -> Option<String> {
        match (&self.alias, self.source.as_ref()) {
            (Some(alias), _) => Some(alias.to_sql()),
            (None, Source::Table(table)) => Some(table.name().to_sql()),
            (None, _) => None,
        }
    }

    /// A column of this source, qualified by its key inside SELECT.
    pub fn column(&self, name: impl IntoIdent) -> BuildResult<Column> {
        Ok(Column::bound(
            self.key().map(Arc::from),
            name.into_ident()?,
        ))
    }

    /// `<key>.*`
    pub fn all_columns(&self) -> AllColumns {
        AllColumns::bound(self.key().map(Arc::from))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

/// An item in a FROM clause or on the left of a join.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinItem {
    Source(AliasedSource),
    Join(Box<Join>),
}

impl JoinItem {
    pub fn inner_join(self, right: AliasedSource) -> BuildResult<Join> {
        Join::new(self, right, JoinKind::Inner)
    }

    pub fn left_outer_join(self, right: AliasedSource) -> BuildResult<Join> {
        Join::new(self, right, JoinKind::LeftOuter)
    }

    pub fn right_outer_join(self, right: AliasedSource) -> BuildResult<Join> {
        Join::new(self, right, JoinKind::RightOuter)
    }

    pub fn full_outer_join(self, right: AliasedSource) -> BuildResult<Join> {
        Join::new(self, right, JoinKind::FullOuter)
    }

    pub fn cross_join(self, right: AliasedSource) -> BuildResult<Join> {
        Join::new(self, right, JoinKind::Cross)
    }

    pub(crate) fn is_source(&self, source: &AliasedSource) -> bool {
        matches!(self, JoinItem::Source(s) if s == source)
    }
}

impl From<AliasedSource> for JoinItem {
    fn from(source: AliasedSource) -> Self {
        JoinItem::Source(source)
    }
}

impl From<Join> for JoinItem {
    fn from(join: Join) -> Self {
        JoinItem::Join(Box::new(join))
    }
}

/// `<left> <kind> JOIN <right> [ON <filter>]`, optionally parenthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    left: JoinItem,
    right: AliasedSource,
    kind: JoinKind,
    on: Option<Filter>,
    wrap_in_parentheses: bool,
    sources: SourceRegistry,
}

impl Join {
    /// Begin a join chain at `source`.
    pub fn start(source: AliasedSource) -> JoinItem {
        JoinItem::Source(source)
    }

    /// Join `right` onto `left`; fails if `right`'s key is already used.
    pub fn new(left: impl Into<JoinItem>, right: AliasedSource, kind: JoinKind) -> BuildResult<Self> {
        let left = left.into();
        let mut sources = match &left {
            JoinItem::Join(join) => join.sources.clone(),
            JoinItem::Source(source) => {
                let mut registry = SourceRegistry::new();
                registry.insert(source.clone())?;
                registry
            }
        };
        sources.insert(right.clone())?;
        Ok(Self {
            left,
            right,
            kind,
            on: None,
            wrap_in_parentheses: false,
            sources,
        })
    }

    /// Attach the ON predicate; CROSS JOIN takes none.
    pub fn on(mut self, filter: Filter) -> BuildResult<Self> {
        if self.kind == JoinKind::Cross {
            return Err(BuildError::invalid_join("CROSS JOIN cannot have an ON clause"));
        }
        self.on = Some(filter);
        Ok(self)
    }

    pub fn inner_join(self, right: AliasedSource) -> BuildResult<Join> {
        JoinItem::from(self).inner_join(right)
    }

    pub fn left_outer_join(self, right: AliasedSource) -> BuildResult<Join> {
        JoinItem::from(self).left_outer_join(right)
    }

    pub fn right_outer_join(self, right: AliasedSource) -> BuildResult<Join> {
        JoinItem::from(self).right_outer_join(right)
    }

    pub fn full_outer_join(self, right: AliasedSource) -> BuildResult<Join> {
        JoinItem::from(self).full_outer_join(right)
    }

    pub fn cross_join(self, right: AliasedSource) -> BuildResult<Join> {
        JoinItem::from(self).cross_join(right)
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap_in_parentheses = true;
        self
    }

    pub fn set_wrap_in_parentheses(&mut self, wrap: bool) -> &mut Self {
        self.wrap_in_parentheses = wrap;
        self
    }

    pub fn wrap_in_parentheses(&self) -> bool {
        self.wrap_in_parentheses
    }

    pub fn left(&self) -> &JoinItem {
        &self.left
    }

    pub fn right(&self) -> &AliasedSource {
        &self.right
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn on_filter(&self) -> Option<&Filter> {
        self.on.as_ref()
    }

    /// Sources taking part in this join, by key.
    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }
}

/// Alias-or-name to source map preserving insertion order.
///
/// Keys are unique. Removing an entry never touches columns or filters that
/// were built from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRegistry {
    entries: Vec<(String, AliasedSource)>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source` under its key. Keyless sources are accepted and
    /// ignored.
    pub fn insert(&mut self, source: AliasedSource) -> BuildResult<()> {
        let Some(key) = source.key() else {
            return Ok(());
        };
        if self.contains(&key) {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "sqlgen.build", key = %key, "duplicate source key");
            return Err(BuildError::duplicate_source(key));
        }
        self.entries.push((key, source));
        Ok(())
    }

    /// Look up a source by its rendered key (see [`AliasedSource::key`]).
    pub fn get(&self, key: &str) -> Option<&AliasedSource> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, source)| source)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AliasedSource> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasedSource> {
        self.entries.iter().map(|(_, source)| source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
