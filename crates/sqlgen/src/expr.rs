//! Value expressions: literals, columns, function calls, arithmetic, CASE
//! and scalar subqueries.
//!
//! [`Expr`] is a closed sum type; the renderer matches every variant.

use crate::error::{BuildError, BuildResult};
use crate::filter::Filter;
use crate::ident::{Ident, IntoIdent};
use crate::stmt::{Query, SelectBuilder, SetOperation};
use crate::window::Window;
use std::sync::Arc;

/// A value-producing node usable in projections, filters, GROUP BY,
/// ORDER BY, setters, function arguments and value lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Numeric(NumericLiteral),
    String(StringLiteral),
    Null,
    Placeholder(Placeholder),
    Column(Column),
    AllColumns(AllColumns),
    Function(Function),
    Arithmetic(Arithmetic),
    /// Unary minus.
    Negation(Box<Expr>),
    MatchCase(MatchCase),
    ConditionalCase(ConditionalCase),
    /// A query used as a scalar value; always rendered in parentheses.
    Subquery(Query),
}

impl Expr {
    pub fn number(value: impl Into<NumericLiteral>) -> Self {
        Expr::Numeric(value.into())
    }

    /// A floating-point literal; NaN and infinities are rejected.
    pub fn float(value: f64) -> BuildResult<Self> {
        Ok(Expr::Numeric(NumericLiteral::try_from(value)?))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::String(StringLiteral::new(value))
    }

    pub fn null() -> Self {
        Expr::Null
    }

    pub fn add(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Arithmetic::new(ArithmeticOp::Add, left, right).into()
    }

    pub fn subtract(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Arithmetic::new(ArithmeticOp::Subtract, left, right).into()
    }

    pub fn multiply(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Arithmetic::new(ArithmeticOp::Multiply, left, right).into()
    }

    pub fn divide(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Arithmetic::new(ArithmeticOp::Divide, left, right).into()
    }

    pub fn modulus(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Arithmetic::new(ArithmeticOp::Modulus, left, right).into()
    }

    pub fn negate(operand: impl Into<Expr>) -> Self {
        Expr::Negation(Box::new(operand.into()))
    }
}

/// Numeric literal, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericLiteral(String);

impl NumericLiteral {
    pub fn text(&self) -> &str {
        &self.0
    }
}

macro_rules! numeric_literal_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NumericLiteral {
                fn from(value: $t) -> Self {
                    NumericLiteral(value.to_string())
                }
            }

            impl From<$t> for Expr {
                fn from(value: $t) -> Self {
                    Expr::Numeric(value.into())
                }
            }
        )*
    };
}

numeric_literal_from!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! numeric_literal_try_from_float {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for NumericLiteral {
                type Error = BuildError;

                fn try_from(value: $t) -> BuildResult<Self> {
                    if !value.is_finite() {
                        return Err(BuildError::invalid_literal(format!(
                            "`{value}` has no SQL numeric form"
                        )));
                    }
                    Ok(NumericLiteral(value.to_string()))
                }
            }
        )*
    };
}

numeric_literal_try_from_float!(f32, f64);

/// String literal; rendered single-quoted with `'` doubled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral(String);

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub(crate) fn to_sql(&self) -> String {
        format!("'{}'", self.0.replace('\'', "''"))
    }
}

/// Parameter marker copied into the output as-is (`@id`, `:id`, `$1`, `?`).
///
/// A marker is one of `@ : $ ?` followed by ASCII letters, digits or `_`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder(String);

impl Placeholder {
    pub fn new(marker: impl Into<String>) -> BuildResult<Self> {
        let marker = marker.into();
        let mut chars = marker.chars();
        let valid = matches!(chars.next(), Some('@' | ':' | '$' | '?'))
            && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
        if !valid {
            return Err(BuildError::invalid_identifier(format!(
                "invalid placeholder `{marker}`"
            )));
        }
        Ok(Self(marker))
    }

    pub fn marker(&self) -> &str {
        &self.0
    }
}

/// A column reference.
///
/// Columns handed out by [`AliasedSource::column`](crate::AliasedSource::column)
/// remember the alias (or table name) of their source and render qualified
/// inside SELECT statements. The reference is a copy of the key: removing the
/// source from a statement leaves the column as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    qualifier: Option<Arc<str>>,
    name: Ident,
    qualify: Option<bool>,
}

impl Column {
    /// Create a column not bound to any source.
    pub fn new(name: impl IntoIdent) -> BuildResult<Self> {
        Ok(Self {
            qualifier: None,
            name: name.into_ident()?,
            qualify: None,
        })
    }

    pub(crate) fn bound(qualifier: Option<Arc<str>>, name: Ident) -> Self {
        Self {
            qualifier,
            name,
            qualify: None,
        }
    }

    /// Force qualification on or off regardless of the statement kind.
    pub fn with_qualify(mut self, qualify: bool) -> Self {
        self.qualify = Some(qualify);
        self
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn qualify(&self) -> Option<bool> {
        self.qualify
    }
}

/// `*` or `<source>.*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllColumns {
    qualifier: Option<Arc<str>>,
}

impl AllColumns {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bound(qualifier: Option<Arc<str>>) -> Self {
        Self { qualifier }
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

/// A function call, optionally windowed: `name(args) [OVER (...)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: Ident,
    arguments: Vec<Expr>,
    window: Option<Window>,
}

impl Function {
    pub fn new(name: impl IntoIdent) -> BuildResult<Self> {
        Ok(Self {
            name: name.into_ident()?,
            arguments: Vec::new(),
            window: None,
        })
    }

    /// Append an argument (consuming form).
    pub fn arg(mut self, argument: impl Into<Expr>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn add_argument(&mut self, argument: impl Into<Expr>) -> &mut Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn remove_argument(&mut self, argument: &Expr) -> bool {
        remove_first(&mut self.arguments, argument)
    }

    /// Attach an `OVER (...)` window (consuming form).
    pub fn over(mut self, window: Window) -> Self {
        self.window = Some(window);
        self
    }

    pub fn set_window(&mut self, window: Option<Window>) -> &mut Self {
        self.window = window;
        self
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn arguments(&self) -> &[Expr] {
        &self.arguments
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
}

impl ArithmeticOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
            ArithmeticOp::Modulus => "%",
        }
    }
}

/// Binary arithmetic; always rendered as `(left op right)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arithmetic {
    op: ArithmeticOp,
    left: Box<Expr>,
    right: Box<Expr>,
}

impl Arithmetic {
    pub fn new(op: ArithmeticOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn op(&self) -> ArithmeticOp {
        self.op
    }

    pub fn left(&self) -> &Expr {
        &self.left
    }

    pub fn right(&self) -> &Expr {
        &self.right
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchBranch {
    pub value: Expr,
    pub result: Expr,
}

/// `CASE <value> WHEN v THEN r ... [ELSE d] END`
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    value: Box<Expr>,
    branches: Vec<MatchBranch>,
    default: Option<Box<Expr>>,
}

impl MatchCase {
    pub fn new(value: impl Into<Expr>) -> Self {
        Self {
            value: Box::new(value.into()),
            branches: Vec::new(),
            default: None,
        }
    }

    pub fn add_branch(&mut self, value: impl Into<Expr>, result: impl Into<Expr>) -> &mut Self {
        self.branches.push(MatchBranch {
            value: value.into(),
            result: result.into(),
        });
        self
    }

    pub fn remove_branch(&mut self, branch: &MatchBranch) -> bool {
        remove_first(&mut self.branches, branch)
    }

    pub fn set_default(&mut self, default: Option<Expr>) -> &mut Self {
        self.default = default.map(Box::new);
        self
    }

    pub fn value(&self) -> &Expr {
        &self.value
    }

    pub fn branches(&self) -> &[MatchBranch] {
        &self.branches
    }

    pub fn default_value(&self) -> Option<&Expr> {
        self.default.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    pub condition: Filter,
    pub result: Expr,
}

/// `CASE WHEN <filter> THEN r ... [ELSE d] END`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalCase {
    branches: Vec<ConditionalBranch>,
    default: Option<Box<Expr>>,
}

impl ConditionalCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_branch(&mut self, condition: Filter, result: impl Into<Expr>) -> &mut Self {
        self.branches.push(ConditionalBranch {
            condition,
            result: result.into(),
        });
        self
    }

    pub fn remove_branch(&mut self, branch: &ConditionalBranch) -> bool {
        remove_first(&mut self.branches, branch)
    }

    pub fn set_default(&mut self, default: Option<Expr>) -> &mut Self {
        self.default = default.map(Box::new);
        self
    }

    pub fn branches(&self) -> &[ConditionalBranch] {
        &self.branches
    }

    pub fn default_value(&self) -> Option<&Expr> {
        self.default.as_deref()
    }
}

/// Parenthesized, comma-separated list of values: `(v1, v2, ...)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueList {
    values: Vec<Expr>,
}

impl ValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, value: impl Into<Expr>) -> &mut Self {
        self.values.push(value.into());
        self
    }

    pub fn remove_value(&mut self, value: &Expr) -> bool {
        remove_first(&mut self.values, value)
    }

    pub fn values(&self) -> &[Expr] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<E: Into<Expr>> FromIterator<E> for ValueList {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Right-hand side of IN and quantified comparisons.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueProvider {
    /// `(v1, v2, ...)`
    List(ValueList),
    /// `(SELECT ...)`
    Query(Query),
    /// `name(args)`, no extra parentheses
    Function(Function),
}

impl From<ValueList> for ValueProvider {
    fn from(list: ValueList) -> Self {
        ValueProvider::List(list)
    }
}

impl From<Function> for ValueProvider {
    fn from(function: Function) -> Self {
        ValueProvider::Function(function)
    }
}

impl From<Query> for ValueProvider {
    fn from(query: Query) -> Self {
        ValueProvider::Query(query)
    }
}

impl From<SelectBuilder> for ValueProvider {
    fn from(select: SelectBuilder) -> Self {
        ValueProvider::Query(select.into())
    }
}

impl From<SetOperation> for ValueProvider {
    fn from(op: SetOperation) -> Self {
        ValueProvider::Query(op.into())
    }
}

impl From<NumericLiteral> for Expr {
    fn from(value: NumericLiteral) -> Self {
        Expr::Numeric(value)
    }
}

impl From<StringLiteral> for Expr {
    fn from(value: StringLiteral) -> Self {
        Expr::String(value)
    }
}

impl From<Placeholder> for Expr {
    fn from(value: Placeholder) -> Self {
        Expr::Placeholder(value)
    }
}

impl From<Column> for Expr {
    fn from(value: Column) -> Self {
        Expr::Column(value)
    }
}

impl From<AllColumns> for Expr {
    fn from(value: AllColumns) -> Self {
        Expr::AllColumns(value)
    }
}

impl From<Function> for Expr {
    fn from(value: Function) -> Self {
        Expr::Function(value)
    }
}

impl From<Arithmetic> for Expr {
    fn from(value: Arithmetic) -> Self {
        Expr::Arithmetic(value)
    }
}

impl From<MatchCase> for Expr {
    fn from(value: MatchCase) -> Self {
        Expr::MatchCase(value)
    }
}

impl From<ConditionalCase> for Expr {
    fn from(value: ConditionalCase) -> Self {
        Expr::ConditionalCase(value)
    }
}

impl From<Query> for Expr {
    fn from(value: Query) -> Self {
        Expr::Subquery(value)
    }
}

impl From<SelectBuilder> for Expr {
    fn from(value: SelectBuilder) -> Self {
        Expr::Subquery(value.into())
    }
}

impl From<SetOperation> for Expr {
    fn from(value: SetOperation) -> Self {
        Expr::Subquery(value.into())
    }
}

/// Remove the first element equal to `item`; returns whether one was found.
pub(crate) fn remove_first<T: PartialEq>(items: &mut Vec<T>, item: &T) -> bool {
    match items.iter().position(|x| x == item) {
        Some(idx) => {
            items.remove(idx);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_literal_text() {
        assert_eq!(NumericLiteral::from(42i32).text(), "42");
        assert_eq!(NumericLiteral::from(-7i64).text(), "-7");
        assert_eq!(NumericLiteral::from(12usize).text(), "12");
    }

    #[test]
    fn string_literal_escapes_quotes() {
        assert_eq!(StringLiteral::new("Hello").to_sql(), "'Hello'");
        assert_eq!(StringLiteral::new("O'Brien").to_sql(), "'O''Brien'");
    }

    #[test]
    fn float_literals() {
        assert_eq!(NumericLiteral::try_from(2.5f64).unwrap().text(), "2.5");
        assert_eq!(NumericLiteral::try_from(-0.25f32).unwrap().text(), "-0.25");
        assert_eq!(Expr::float(1.0).unwrap(), Expr::number(1));
    }

    #[test]
    fn float_rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Expr::float(bad).unwrap_err();
            assert!(err.is_invalid_literal(), "{bad} should be rejected");
        }
        assert!(NumericLiteral::try_from(f32::NAN).is_err());
    }

    #[test]
    fn placeholder_markers() {
        for good in ["@id", ":name", "$1", "?", "@p_0"] {
            assert_eq!(Placeholder::new(good).unwrap().marker(), good);
        }
        for bad in ["", "id", "@a b", "--", "-1", "/*", "@x'", "@x--", "$1;"] {
            let err = Placeholder::new(bad).unwrap_err();
            assert!(err.is_invalid_identifier(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn function_rejects_bad_names() {
        assert!(Function::new("COUNT").is_ok());
        assert!(Function::new("").is_err());
        assert!(Function::new("COUNT(*)").is_err());
    }

    #[test]
    fn remove_argument_drops_first_match_only() {
        let mut f = Function::new("COALESCE").unwrap().arg(1).arg(2).arg(1);
        assert!(f.remove_argument(&Expr::number(1)));
        assert_eq!(f.arguments(), &[Expr::number(2), Expr::number(1)]);
        assert!(!f.remove_argument(&Expr::null()));
    }

    #[test]
    fn value_list_from_iter() {
        let list: ValueList = [1, 2, 3].into_iter().collect();
        assert_eq!(list.values().len(), 3);
        assert!(!list.is_empty());
    }
}
