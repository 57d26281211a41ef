//! Predicates for WHERE, HAVING, ON and CASE WHEN.
//!
//! A [`Filter`] pairs a [`Predicate`] with an opt-in `wrap_in_parentheses`
//! flag. Parentheses are never inferred from nesting: a group only gets
//! them when the caller asks.
//!
//! Two negation forms exist and render differently:
//! - inline flags (`not_between`, `not_like`, `is_not_null`, `not_in`) put
//!   `NOT` inside the predicate: `x NOT BETWEEN 1 AND 2`
//! - [`Filter::not`] prefixes another filter: `NOT x = 1`
//!
//! # Example
//! ```
//! use sqlgen::{Conjunction, Filter, FilterGroup};
//!
//! let mut group = FilterGroup::new(Conjunction::Or);
//! group.add_filter(Filter::equal_to(1, 1));
//! group.add_filter(Filter::equal_to(2, 2));
//! let filter = Filter::from(group).wrapped();
//! assert!(filter.wrap_in_parentheses());
//! ```

use crate::expr::{Expr, ValueProvider, remove_first};
use crate::stmt::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
}

impl ComparisonOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "<>",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessThanEqual => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterThanEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    All,
    Any,
    Some,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

/// The predicate itself, without the caller's parenthesization choice.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `left op right`
    Compare {
        left: Expr,
        op: ComparisonOp,
        right: Expr,
    },
    /// `subject [NOT] BETWEEN low AND high`
    Between {
        subject: Expr,
        low: Expr,
        high: Expr,
        negated: bool,
    },
    /// `subject [NOT] LIKE pattern`
    Like {
        subject: Expr,
        pattern: Expr,
        negated: bool,
    },
    /// `subject IS [NOT] NULL`
    Null { subject: Expr, negated: bool },
    /// `subject [NOT] IN values`
    In {
        subject: Expr,
        values: ValueProvider,
        negated: bool,
    },
    /// `EXISTS(query)`
    Exists(Query),
    /// `subject op ALL|ANY|SOME (values)`
    Quantified {
        subject: Expr,
        op: ComparisonOp,
        quantifier: Quantifier,
        values: ValueProvider,
    },
    Group(FilterGroup),
    /// `NOT <filter>`; the child keeps its own parenthesization.
    Not(Box<Filter>),
}

/// A predicate plus its opt-in parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    predicate: Predicate,
    wrap_in_parentheses: bool,
}

impl Filter {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            wrap_in_parentheses: false,
        }
    }

    pub fn compare(left: impl Into<Expr>, op: ComparisonOp, right: impl Into<Expr>) -> Self {
        Self::new(Predicate::Compare {
            left: left.into(),
            op,
            right: right.into(),
        })
    }

    pub fn equal_to(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(left, ComparisonOp::Equal, right)
    }

    pub fn not_equal_to(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(left, ComparisonOp::NotEqual, right)
    }

    pub fn less_than(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(left, ComparisonOp::LessThan, right)
    }

    pub fn less_than_equal_to(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(left, ComparisonOp::LessThanEqual, right)
    }

    pub fn greater_than(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(left, ComparisonOp::GreaterThan, right)
    }

    pub fn greater_than_equal_to(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(left, ComparisonOp::GreaterThanEqual, right)
    }

    pub fn between(subject: impl Into<Expr>, low: impl Into<Expr>, high: impl Into<Expr>) -> Self {
        Self::new(Predicate::Between {
            subject: subject.into(),
            low: low.into(),
            high: high.into(),
            negated: false,
        })
    }

    pub fn not_between(
        subject: impl Into<Expr>,
        low: impl Into<Expr>,
        high: impl Into<Expr>,
    ) -> Self {
        Self::new(Predicate::Between {
            subject: subject.into(),
            low: low.into(),
            high: high.into(),
            negated: true,
        })
    }

    pub fn like(subject: impl Into<Expr>, pattern: impl Into<Expr>) -> Self {
        Self::new(Predicate::Like {
            subject: subject.into(),
            pattern: pattern.into(),
            negated: false,
        })
    }

    pub fn not_like(subject: impl Into<Expr>, pattern: impl Into<Expr>) -> Self {
        Self::new(Predicate::Like {
            subject: subject.into(),
            pattern: pattern.into(),
            negated: true,
        })
    }

    pub fn is_null(subject: impl Into<Expr>) -> Self {
        Self::new(Predicate::Null {
            subject: subject.into(),
            negated: false,
        })
    }

    pub fn is_not_null(subject: impl Into<Expr>) -> Self {
        Self::new(Predicate::Null {
            subject: subject.into(),
            negated: true,
        })
    }

    pub fn in_values(subject: impl Into<Expr>, values: impl Into<ValueProvider>) -> Self {
        Self::new(Predicate::In {
            subject: subject.into(),
            values: values.into(),
            negated: false,
        })
    }

    pub fn not_in_values(subject: impl Into<Expr>, values: impl Into<ValueProvider>) -> Self {
        Self::new(Predicate::In {
            subject: subject.into(),
            values: values.into(),
            negated: true,
        })
    }

    pub fn exists(query: impl Into<Query>) -> Self {
        Self::new(Predicate::Exists(query.into()))
    }

    pub fn quantified(
        subject: impl Into<Expr>,
        op: ComparisonOp,
        quantifier: Quantifier,
        values: impl Into<ValueProvider>,
    ) -> Self {
        Self::new(Predicate::Quantified {
            subject: subject.into(),
            op,
            quantifier,
            values: values.into(),
        })
    }

    /// Prefix `NOT` to another filter.
    pub fn not(inner: Filter) -> Self {
        Self::new(Predicate::Not(Box::new(inner)))
    }

    /// Wrap this filter in parentheses when rendered.
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

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl From<Predicate> for Filter {
    fn from(predicate: Predicate) -> Self {
        Filter::new(predicate)
    }
}

impl From<FilterGroup> for Filter {
    fn from(group: FilterGroup) -> Self {
        Filter::new(Predicate::Group(group))
    }
}

/// Children joined by `AND` or `OR`, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGroup {
    conjunction: Conjunction,
    filters: Vec<Filter>,
}

impl FilterGroup {
    pub fn new(conjunction: Conjunction) -> Self {
        Self {
            conjunction,
            filters: Vec::new(),
        }
    }

    pub fn and() -> Self {
        Self::new(Conjunction::And)
    }

    pub fn or() -> Self {
        Self::new(Conjunction::Or)
    }

    pub fn add_filter(&mut self, filter: Filter) -> &mut Self {
        self.filters.push(filter);
        self
    }

    pub fn remove_filter(&mut self, filter: &Filter) -> bool {
        remove_first(&mut self.filters, filter)
    }

    pub fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FromIterator<Filter> for FilterGroup {
    /// Collect into an `AND` group.
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            conjunction: Conjunction::And,
            filters: iter.into_iter().collect(),
        }
    }
}
