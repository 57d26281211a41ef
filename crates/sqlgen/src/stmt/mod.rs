//! Statement builders.
//!
//! - [`SelectBuilder`]: SELECT with DISTINCT/TOP, projections, FROM, WHERE,
//!   GROUP BY, HAVING and ORDER BY
//! - [`InsertBuilder`], [`UpdateBuilder`], [`DeleteBuilder`]: DML
//! - [`SetOperation`]: UNION / INTERSECT / EXCEPT / MINUS of two queries
//!
//! A [`Query`] is anything that yields rows and can therefore be nested as a
//! subquery. A [`Statement`] is any renderable command; the renderer borrows
//! it through [`StatementRef`].

mod delete;
mod insert;
mod select;
mod set_op;
mod update;

pub use delete::DeleteBuilder;
pub use insert::{InsertBuilder, InsertValues};
pub use select::{AliasedProjection, SelectBuilder, Top};
pub use set_op::{SetOperation, SetOperator};
pub use update::{Setter, UpdateBuilder};

/// `ALL` / `DISTINCT` modifier on SELECT and set operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DistinctQualifier {
    /// No modifier keyword.
    #[default]
    Default,
    All,
    Distinct,
}

/// A row-producing statement usable as a subquery.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Select(Box<SelectBuilder>),
    SetOperation(Box<SetOperation>),
}

impl Query {
    pub fn wrap_in_parentheses(&self) -> bool {
        match self {
            Query::Select(select) => select.wrap_in_parentheses(),
            Query::SetOperation(op) => op.wrap_in_parentheses(),
        }
    }
}

impl From<SelectBuilder> for Query {
    fn from(select: SelectBuilder) -> Self {
        Query::Select(Box::new(select))
    }
}

impl From<SetOperation> for Query {
    fn from(op: SetOperation) -> Self {
        Query::SetOperation(Box::new(op))
    }
}

/// Any renderable command.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectBuilder),
    Insert(InsertBuilder),
    Update(UpdateBuilder),
    Delete(DeleteBuilder),
    SetOperation(SetOperation),
}

impl From<SelectBuilder> for Statement {
    fn from(select: SelectBuilder) -> Self {
        Statement::Select(select)
    }
}

impl From<InsertBuilder> for Statement {
    fn from(insert: InsertBuilder) -> Self {
        Statement::Insert(insert)
    }
}

impl From<UpdateBuilder> for Statement {
    fn from(update: UpdateBuilder) -> Self {
        Statement::Update(update)
    }
}

impl From<DeleteBuilder> for Statement {
    fn from(delete: DeleteBuilder) -> Self {
        Statement::Delete(delete)
    }
}

impl From<SetOperation> for Statement {
    fn from(op: SetOperation) -> Self {
        Statement::SetOperation(op)
    }
}

impl From<Query> for Statement {
    fn from(query: Query) -> Self {
        match query {
            Query::Select(select) => Statement::Select(*select),
            Query::SetOperation(op) => Statement::SetOperation(*op),
        }
    }
}

/// The type of command being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    SetOperation,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
            StatementKind::SetOperation => "set_operation",
        }
    }
}

/// Borrowed view of a statement, accepted by the render entry points.
#[derive(Debug, Clone, Copy)]
pub enum StatementRef<'a> {
    Select(&'a SelectBuilder),
    Insert(&'a InsertBuilder),
    Update(&'a UpdateBuilder),
    Delete(&'a DeleteBuilder),
    SetOperation(&'a SetOperation),
}

impl StatementRef<'_> {
    pub fn kind(&self) -> StatementKind {
        match self {
            StatementRef::Select(_) => StatementKind::Select,
            StatementRef::Insert(_) => StatementKind::Insert,
            StatementRef::Update(_) => StatementKind::Update,
            StatementRef::Delete(_) => StatementKind::Delete,
            StatementRef::SetOperation(_) => StatementKind::SetOperation,
        }
    }
}

impl<'a> From<&'a SelectBuilder> for StatementRef<'a> {
    fn from(select: &'a SelectBuilder) -> Self {
        StatementRef::Select(select)
    }
}

impl<'a> From<&'a InsertBuilder> for StatementRef<'a> {
    fn from(insert: &'a InsertBuilder) -> Self {
        StatementRef::Insert(insert)
    }
}

impl<'a> From<&'a UpdateBuilder> for StatementRef<'a> {
    fn from(update: &'a UpdateBuilder) -> Self {
        StatementRef::Update(update)
    }
}

impl<'a> From<&'a DeleteBuilder> for StatementRef<'a> {
    fn from(delete: &'a DeleteBuilder) -> Self {
        StatementRef::Delete(delete)
    }
}

impl<'a> From<&'a SetOperation> for StatementRef<'a> {
    fn from(op: &'a SetOperation) -> Self {
        StatementRef::SetOperation(op)
    }
}

impl<'a> From<&'a Query> for StatementRef<'a> {
    fn from(query: &'a Query) -> Self {
        match query {
            Query::Select(select) => StatementRef::Select(select),
            Query::SetOperation(op) => StatementRef::SetOperation(op),
        }
    }
}

impl<'a> From<&'a Statement> for StatementRef<'a> {
    fn from(stmt: &'a Statement) -> Self {
        match stmt {
            Statement::Select(select) => StatementRef::Select(select),
            Statement::Insert(insert) => StatementRef::Insert(insert),
            Statement::Update(update) => StatementRef::Update(update),
            Statement::Delete(delete) => StatementRef::Delete(delete),
            Statement::SetOperation(op) => StatementRef::SetOperation(op),
        }
    }
}
