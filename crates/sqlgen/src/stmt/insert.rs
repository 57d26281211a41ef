//! INSERT statement builder.

use crate::error::BuildResult;
use crate::expr::{Column, ValueList, remove_first};
use crate::ident::IntoIdent;
use crate::source::{AliasedSource, Table};
use crate::stmt::{Query, SelectBuilder, SetOperation};

/// Rows to insert: `VALUES(...)` or a query.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertValues {
    List(ValueList),
    Query(Query),
}

impl From<ValueList> for InsertValues {
    fn from(list: ValueList) -> Self {
        InsertValues::List(list)
    }
}

impl From<Query> for InsertValues {
    fn from(query: Query) -> Self {
        InsertValues::Query(query)
    }
}

impl From<SelectBuilder> for InsertValues {
    fn from(select: SelectBuilder) -> Self {
        InsertValues::Query(select.into())
    }
}

impl From<SetOperation> for InsertValues {
    fn from(op: SetOperation) -> Self {
        InsertValues::Query(op.into())
    }
}

/// `INSERT INTO <table> [alias] [(columns)] VALUES(...) | (SELECT ...)`
///
/// # Example
/// ```
/// use sqlgen::{InsertBuilder, Table, ValueList};
///
/// let values: ValueList = [1, 2].into_iter().collect();
/// let mut insert = InsertBuilder::new(Table::new("Item")?, values);
/// let a = insert.target().column("A")?;
/// let b = insert.target().column("B")?;
/// insert.add_column(a).add_column(b);
/// assert_eq!(sqlgen::render(&insert), "INSERT INTO Item (A, B) VALUES(1, 2)");
/// # Ok::<(), sqlgen::BuildError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InsertBuilder {
    target: AliasedSource,
    columns: Vec<Column>,
    values: InsertValues,
}

impl InsertBuilder {
    pub fn new(table: Table, values: impl Into<InsertValues>) -> Self {
        Self {
            target: AliasedSource::new(table),
            columns: Vec::new(),
            values: values.into(),
        }
    }

    pub fn aliased(
        table: Table,
        alias: impl IntoIdent,
        values: impl Into<InsertValues>,
    ) -> BuildResult<Self> {
        Ok(Self {
            target: AliasedSource::aliased(table, alias)?,
            columns: Vec::new(),
            values: values.into(),
        })
    }

    /// The target table, for building columns.
    pub fn target(&self) -> &AliasedSource {
        &self.target
    }

    pub fn add_column(&mut self, column: Column) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn remove_column(&mut self, column: &Column) -> bool {
        remove_first(&mut self.columns, column)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn values(&self) -> &InsertValues {
        &self.values
    }
}
