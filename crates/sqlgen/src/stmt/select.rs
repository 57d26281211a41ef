//! SELECT statement builder.

use crate::error::BuildResult;
use crate::expr::{Expr, Function, remove_first};
use crate::filter::Filter;
use crate::ident::{Ident, IntoIdent};
use crate::order::OrderBy;
use crate::source::{AliasedSource, Join, JoinItem, SourceRegistry, Table};
use crate::stmt::{DistinctQualifier, Query};

/// `TOP <count> [PERCENT] [WITH TIES]`
#[derive(Debug, Clone, PartialEq)]
pub struct Top {
    count: Expr,
    percent: bool,
    with_ties: bool,
}

impl Top {
    pub fn new(count: impl Into<Expr>) -> Self {
        Self {
            count: count.into(),
            percent: false,
            with_ties: false,
        }
    }

    /// Interpret the count as a percentage.
    pub fn percent(mut self) -> Self {
        self.percent = true;
        self
    }

    pub fn with_ties(mut self) -> Self {
        self.with_ties = true;
        self
    }

    pub fn count(&self) -> &Expr {
        &self.count
    }

    pub fn is_percent(&self) -> bool {
        self.percent
    }

    pub fn is_with_ties(&self) -> bool {
        self.with_ties
    }
}

/// One entry of the SELECT list: `<expr> [AS alias]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedProjection {
    expr: Expr,
    alias: Option<Ident>,
}

impl AliasedProjection {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            alias: None,
        }
    }

    pub fn aliased(expr: impl Into<Expr>, alias: impl IntoIdent) -> BuildResult<Self> {
        Ok(Self {
            expr: expr.into(),
            alias: Some(alias.into_ident()?),
        })
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }
}

/// SELECT statement builder.
///
/// Collections are independent: removing a source leaves projections and
/// filters that reference it in place.
///
/// # Example
/// ```
/// use sqlgen::{Filter, SelectBuilder};
///
/// let mut select = SelectBuilder::new();
/// let customer = select.add_table_as("Customer", "c")?;
/// select.add_projection(customer.column("Name")?);
/// select.add_where(Filter::equal_to(customer.column("Id")?, 1));
/// assert_eq!(sqlgen::render(&select), "SELECT c.Name FROM Customer c WHERE c.Id = 1");
/// # Ok::<(), sqlgen::BuildError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectBuilder {
    /// ALL / DISTINCT
    distinct: DistinctQualifier,
    /// TOP clause
    top: Option<Top>,
    /// SELECT list
    projections: Vec<AliasedProjection>,
    /// FROM items, in insertion order
    from: Vec<JoinItem>,
    /// Keyed sources visible to this statement
    sources: SourceRegistry,
    /// WHERE conditions, joined with AND
    where_filters: Vec<Filter>,
    /// GROUP BY items
    group_by: Vec<Expr>,
    /// HAVING conditions, joined with AND
    having_filters: Vec<Filter>,
    /// ORDER BY items
    order_by: Vec<OrderBy>,
    wrap_in_parentheses: bool,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== FROM ====================

    /// Add a table to FROM and return it for column lookups.
    pub fn add_table(&mut self, name: impl IntoIdent) -> BuildResult<AliasedSource> {
        let source = AliasedSource::new(Table::new(name)?);
        self.add_source(source.clone())?;
        Ok(source)
    }

    pub fn add_table_as(
        &mut self,
        name: impl IntoIdent,
        alias: impl IntoIdent,
    ) -> BuildResult<AliasedSource> {
        let source = AliasedSource::aliased(Table::new(name)?, alias)?;
        self.add_source(source.clone())?;
        Ok(source)
    }

    /// Add a table-valued function to FROM.
    pub fn add_function(&mut self, function: Function) -> BuildResult<AliasedSource> {
        let source = AliasedSource::new(function);
        self.add_source(source.clone())?;
        Ok(source)
    }

    pub fn add_function_as(
        &mut self,
        function: Function,
        alias: impl IntoIdent,
    ) -> BuildResult<AliasedSource> {
        let source = AliasedSource::aliased(function, alias)?;
        self.add_source(source.clone())?;
        Ok(source)
    }

    /// Add a derived table to FROM.
    pub fn add_select(&mut self, query: impl Into<Query>) -> BuildResult<AliasedSource> {
        let source = AliasedSource::new(query.into());
        self.add_source(source.clone())?;
        Ok(source)
    }

    pub fn add_select_as(
        &mut self,
        query: impl Into<Query>,
        alias: impl IntoIdent,
    ) -> BuildResult<AliasedSource> {
        let source = AliasedSource::aliased(query.into(), alias)?;
        self.add_source(source.clone())?;
        Ok(source)
    }

    /// Add a prepared source to FROM; fails if its key is already used.
    pub fn add_source(&mut self, source: AliasedSource) -> BuildResult<&mut Self> {
        self.sources.insert(source.clone())?;
        self.from.push(JoinItem::Source(source));
        Ok(self)
    }

    /// Add a join to FROM, registering every source it contains.
    ///
    /// Nothing is registered if any of the join's keys is already used.
    pub fn add_join(&mut self, join: Join) -> BuildResult<&mut Self> {
        let mut registry = self.sources.clone();
        for source in join.sources().iter() {
            registry.insert(source.clone())?;
        }
        self.sources = registry;
        self.from.push(JoinItem::Join(Box::new(join)));
        Ok(self)
    }

    /// Unregister `key` and drop FROM items that are that source.
    ///
    /// Returns the removed source. Joins that contain it are kept.
    pub fn remove_source(&mut self, key: &str) -> Option<AliasedSource> {
        let source = self.sources.remove(key)?;
        self.from.retain(|item| !item.is_source(&source));
        Some(source)
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn from_items(&self) -> &[JoinItem] {
        &self.from
    }

    // ==================== SELECT list ====================

    pub fn add_projection(&mut self, expr: impl Into<Expr>) -> &mut Self {
        self.projections.push(AliasedProjection::new(expr));
        self
    }

    pub fn add_projection_as(
        &mut self,
        expr: impl Into<Expr>,
        alias: impl IntoIdent,
    ) -> BuildResult<&mut Self> {
        self.projections.push(AliasedProjection::aliased(expr, alias)?);
        Ok(self)
    }

    /// Remove the first projection whose expression equals `expr`.
    pub fn remove_projection(&mut self, expr: &Expr) -> bool {
        match self.projections.iter().position(|p| p.expr() == expr) {
            Some(idx) => {
                self.projections.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn projections(&self) -> &[AliasedProjection] {
        &self.projections
    }

    pub fn set_distinct(&mut self, distinct: DistinctQualifier) -> &mut Self {
        self.distinct = distinct;
        self
    }

    pub fn distinct(&self) -> DistinctQualifier {
        self.distinct
    }

    pub fn set_top(&mut self, top: Option<Top>) -> &mut Self {
        self.top = top;
        self
    }

    pub fn top(&self) -> Option<&Top> {
        self.top.as_ref()
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    pub fn add_where(&mut self, filter: Filter) -> &mut Self {
        self.where_filters.push(filter);
        self
    }

    pub fn remove_where(&mut self, filter: &Filter) -> bool {
        remove_first(&mut self.where_filters, filter)
    }

    pub fn where_filters(&self) -> &[Filter] {
        &self.where_filters
    }

    pub fn add_group_by(&mut self, expr: impl Into<Expr>) -> &mut Self {
        self.group_by.push(expr.into());
        self
    }

    pub fn remove_group_by(&mut self, expr: &Expr) -> bool {
        remove_first(&mut self.group_by, expr)
    }

    pub fn group_by(&self) -> &[Expr] {
        &self.group_by
    }

    pub fn add_having(&mut self, filter: Filter) -> &mut Self {
        self.having_filters.push(filter);
        self
    }

    pub fn remove_having(&mut self, filter: &Filter) -> bool {
        remove_first(&mut self.having_filters, filter)
    }

    pub fn having_filters(&self) -> &[Filter] {
        &self.having_filters
    }

    // ==================== ORDER BY ====================

    pub fn add_order_by(&mut self, order_by: OrderBy) -> &mut Self {
        self.order_by.push(order_by);
        self
    }

    pub fn remove_order_by(&mut self, order_by: &OrderBy) -> bool {
        remove_first(&mut self.order_by, order_by)
    }

    pub fn order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    // ==================== Nesting ====================

    /// Parenthesize when rendered as a command or set-operation operand.
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_table_registers_key() {
        let mut select = SelectBuilder::new();
        let t = select.add_table("Customer").unwrap();
        assert_eq!(t.key().as_deref(), Some("Customer"));
        assert!(select.sources().contains("Customer"));
        assert_eq!(select.from_items().len(), 1);
    }

    #[test]
    fn duplicate_alias_rejected() {
        let mut select = SelectBuilder::new();
        select.add_table_as("Customer", "c").unwrap();
        let err = select.add_table_as("Contact", "c").unwrap_err();
        assert!(err.is_duplicate_source());
        assert_eq!(select.from_items().len(), 1);
    }

    #[test]
    fn add_join_is_all_or_nothing() {
        let mut select = SelectBuilder::new();
        select.add_table("T2").unwrap();
        let t1 = AliasedSource::new(Table::new("T1").unwrap());
        let t2 = AliasedSource::new(Table::new("T2").unwrap());
        let join = Join::start(t1).inner_join(t2).unwrap();
        assert!(select.add_join(join).is_err());
        assert!(!select.sources().contains("T1"));
        assert_eq!(select.from_items().len(), 1);
    }

    #[test]
    fn remove_source_keeps_projections() {
        let mut select = SelectBuilder::new();
        let t = select.add_table("T").unwrap();
        select.add_projection(t.column("c").unwrap());
        assert!(select.remove_source("T").is_some());
        assert!(select.from_items().is_empty());
        assert_eq!(select.projections().len(), 1);
        assert!(select.remove_source("T").is_none());
    }

    #[test]
    fn unkeyed_sources_repeat() {
        let mut select = SelectBuilder::new();
        let f = Function::new("GetData").unwrap();
        select.add_function(f.clone()).unwrap();
        select.add_function(f).unwrap();
        assert_eq!(select.from_items().len(), 2);
        assert!(select.sources().is_empty());
    }

    #[test]
    fn remove_projection_by_expr() {
        let mut select = SelectBuilder::new();
        select.add_projection(1).add_projection(2);
        assert!(select.remove_projection(&Expr::number(1)));
        assert!(!select.remove_projection(&Expr::number(1)));
        assert_eq!(select.projections().len(), 1);
    }
}
