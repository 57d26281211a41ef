//! DELETE statement builder.

use crate::error::BuildResult;
use crate::expr::remove_first;
use crate::filter::Filter;
use crate::ident::IntoIdent;
use crate::source::{AliasedSource, Table};

/// `DELETE FROM <table> [alias] [WHERE ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteBuilder {
    target: AliasedSource,
    where_filters: Vec<Filter>,
}

impl DeleteBuilder {
    pub fn new(table: Table) -> Self {
        Self {
            target: AliasedSource::new(table),
            where_filters: Vec::new(),
        }
    }

    pub fn aliased(table: Table, alias: impl IntoIdent) -> BuildResult<Self> {
        Ok(Self {
            target: AliasedSource::aliased(table, alias)?,
            where_filters: Vec::new(),
        })
    }

    pub fn target(&self) -> &AliasedSource {
        &self.target
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
