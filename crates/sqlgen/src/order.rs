//! ORDER BY items, shared by SELECT statements and windows.

use crate::expr::Expr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// No direction keyword.
    #[default]
    Default,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NullPlacement {
    /// No NULLS clause.
    #[default]
    Default,
    First,
    Last,
}

/// `<expr> [ASC|DESC] [NULLS FIRST|LAST]`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    expr: Expr,
    order: Order,
    null_placement: NullPlacement,
}

impl OrderBy {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            order: Order::Default,
            null_placement: NullPlacement::Default,
        }
    }

    pub fn ascending(expr: impl Into<Expr>) -> Self {
        Self::new(expr).with_order(Order::Ascending)
    }

    pub fn descending(expr: impl Into<Expr>) -> Self {
        Self::new(expr).with_order(Order::Descending)
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_null_placement(mut self, placement: NullPlacement) -> Self {
        self.null_placement = placement;
        self
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn null_placement(&self) -> NullPlacement {
        self.null_placement
    }
}
