//! # sqlgen
//!
//! Build SQL statements as typed node graphs and render them to text.
//!
//! ## Features
//!
//! - **Closed node types**: expressions, filters, sources and statements are
//!   enums matched exhaustively by the renderer
//! - **Explicit parentheses**: arithmetic always wraps itself; filter groups,
//!   joins and nested set operations wrap only when asked
//! - **Dialect switches**: [`RenderOptions`] toggles `AS` before aliases,
//!   `INNER JOIN` vs `JOIN`, and more
//! - **Infallible rendering**: every error surfaces while building the graph
//!
//! ## Example
//!
//! ```
//! use sqlgen::{Filter, OrderBy, SelectBuilder};
//!
//! let mut select = SelectBuilder::new();
//! let customer = select.add_table_as("Customer", "c")?;
//! select
//!     .add_projection(customer.column("Name")?)
//!     .add_where(Filter::like(customer.column("Name")?, sqlgen::Expr::string("A%")))
//!     .add_order_by(OrderBy::ascending(customer.column("Name")?));
//!
//! assert_eq!(
//!     sqlgen::render(&select),
//!     "SELECT c.Name FROM Customer c WHERE c.Name LIKE 'A%' ORDER BY c.Name ASC"
//! );
//! # Ok::<(), sqlgen::BuildError>(())
//! ```
//!
//! ## Builder collections
//!
//! Projections, sources and filters are independent lists owned by the
//! statement. Removing a source does not remove projections or filters that
//! reference it; keeping them consistent is up to the caller.

pub mod error;
pub mod expr;
pub mod filter;
pub mod ident;
pub mod options;
pub mod order;
pub mod render;
pub mod source;
pub mod stmt;
pub mod token;
pub mod window;

pub use error::{BuildError, BuildResult};
pub use expr::{
    AllColumns, Arithmetic, ArithmeticOp, Column, ConditionalBranch, ConditionalCase, Expr,
    Function, MatchBranch, MatchCase, NumericLiteral, Placeholder, StringLiteral, ValueList,
    ValueProvider,
};
pub use filter::{ComparisonOp, Conjunction, Filter, FilterGroup, Predicate, Quantifier};
pub use ident::{Ident, IdentPart, IntoIdent};
pub use options::RenderOptions;
pub use order::{NullPlacement, Order, OrderBy};
pub use render::{Formatter, render};
pub use source::{AliasedSource, Join, JoinItem, JoinKind, Source, SourceRegistry, Table};
pub use stmt::{
    AliasedProjection, DeleteBuilder, DistinctQualifier, InsertBuilder, InsertValues, Query,
    SelectBuilder, SetOperation, SetOperator, Setter, Statement, StatementKind, StatementRef, Top,
    UpdateBuilder,
};
pub use token::{Token, TokenKind, TokenStream};
pub use window::{FrameBound, FrameExtent, FrameUnit, Window, WindowFrame};

#[cfg(test)]
mod tests;
