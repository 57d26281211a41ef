//! UPDATE statement builder.

use crate::error::BuildResult;
use crate::expr::{Column, Expr, remove_first};
use crate::filter::Filter;
use crate::ident::IntoIdent;
use crate::source::{AliasedSource, Table};

/// `<column> = <value>` in a SET clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Setter {
    column: Column,
    value: Expr,
}

impl Setter {
    pub fn new(column: Column, value: impl Into<Expr>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn value(&self) -> &Expr {
        &self.value
    }
}

/// `UPDATE <table> [alias] SET c1 = v1, ... [WHERE ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBuilder {
    target: AliasedSource,
    setters: Vec<Setter>,
    where_filters: Vec<Filter>,
}

impl UpdateBuilder {
    pub fn new(table: Table) -> Self {
        Self {
            target: AliasedSource::new(table),
            setters: Vec::new(),
            where_filters: Vec::new(),
        }
    }

    pub fn aliased(table: Table, alias: impl IntoIdent) -> BuildResult<Self> {
        Ok(Self {
            target: AliasedSource::aliased(table, alias)?,
            setters: Vec::new(),
            where_filters: Vec::new(),
        })
    }

    pub fn target(&self) -> &AliasedSource {
        &self.target
    }

    pub fn add_setter(&mut self, column: Column, value: impl Into<Expr>) -> &mut Self {
        self.setters.push(Setter::new(column, value));
        self
    }

    pub fn remove_setter(&mut self, setter: &Setter) -> bool {
        remove_first(&mut self.setters, setter)
    }

    pub fn setters(&self) -> &[Setter] {
        &self.setters
    }

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
}
