//! UNION / INTERSECT / EXCEPT / MINUS.

use crate::stmt::{DistinctQualifier, Query};
use crate::token::kw;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
    Minus,
}

impl SetOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            SetOperator::Union => kw::UNION,
            SetOperator::Intersect => kw::INTERSECT,
            SetOperator::Except => kw::EXCEPT,
            SetOperator::Minus => kw::MINUS,
        }
    }
}

/// `<left> <OP> [ALL|DISTINCT] <right>`
///
/// Operands are never parenthesized implicitly. A nested set operation that
/// needs grouping must be marked with [`SetOperation::wrapped`].
///
/// # Example
/// ```
/// use sqlgen::{DistinctQualifier, SelectBuilder, SetOperation};
///
/// let mut one = SelectBuilder::new();
/// one.add_projection(1);
/// let union = SetOperation::union(one.clone(), one).with_distinct(DistinctQualifier::All);
/// assert_eq!(sqlgen::render(&union), "SELECT 1 UNION ALL SELECT 1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    operator: SetOperator,
    left: Query,
    right: Query,
    distinct: DistinctQualifier,
    wrap_in_parentheses: bool,
}

impl SetOperation {
    pub fn new(operator: SetOperator, left: impl Into<Query>, right: impl Into<Query>) -> Self {
        Self {
            operator,
            left: left.into(),
            right: right.into(),
            distinct: DistinctQualifier::Default,
            wrap_in_parentheses: false,
        }
    }

    pub fn union(left: impl Into<Query>, right: impl Into<Query>) -> Self {
        Self::new(SetOperator::Union, left, right)
    }

    pub fn intersect(left: impl Into<Query>, right: impl Into<Query>) -> Self {
        Self::new(SetOperator::Intersect, left, right)
    }

    pub fn except(left: impl Into<Query>, right: impl Into<Query>) -> Self {
        Self::new(SetOperator::Except, left, right)
    }

    pub fn minus(left: impl Into<Query>, right: impl Into<Query>) -> Self {
        Self::new(SetOperator::Minus, left, right)
    }

    pub fn with_distinct(mut self, distinct: DistinctQualifier) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn set_distinct(&mut self, distinct: DistinctQualifier) -> &mut Self {
        self.distinct = distinct;
        self
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

    pub fn operator(&self) -> SetOperator {
        self.operator
    }

    pub fn left(&self) -> &Query {
        &self.left
    }

    pub fn right(&self) -> &Query {
        &self.right
    }

    pub fn distinct(&self) -> DistinctQualifier {
        self.distinct
    }
}
