//! Window specifications attached to functions with `OVER (...)`.

use crate::expr::{Expr, remove_first};
use crate::order::OrderBy;

/// `PARTITION BY ... ORDER BY ... <frame>`; each part is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Window {
    partitions: Vec<Expr>,
    order_by: Vec<OrderBy>,
    frame: Option<WindowFrame>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_partition(&mut self, expr: impl Into<Expr>) -> &mut Self {
        self.partitions.push(expr.into());
        self
    }

    pub fn remove_partition(&mut self, expr: &Expr) -> bool {
        remove_first(&mut self.partitions, expr)
    }

    pub fn add_order_by(&mut self, order_by: OrderBy) -> &mut Self {
        self.order_by.push(order_by);
        self
    }

    pub fn remove_order_by(&mut self, order_by: &OrderBy) -> bool {
        remove_first(&mut self.order_by, order_by)
    }

    pub fn set_frame(&mut self, frame: Option<WindowFrame>) -> &mut Self {
        self.frame = frame;
        self
    }

    pub fn partitions(&self) -> &[Expr] {
        &self.partitions
    }

    pub fn order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    pub fn frame(&self) -> Option<&WindowFrame> {
        self.frame.as_ref()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FrameUnit {
    #[default]
    Rows,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameExtent {
    /// `BETWEEN <start> AND <end>`
    Between { start: FrameBound, end: FrameBound },
    /// `<start>` alone
    PrecedingOnly(FrameBound),
}

/// `ROWS BETWEEN <start> AND <end>` or `ROWS <start>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowFrame {
    unit: FrameUnit,
    extent: FrameExtent,
}

impl WindowFrame {
    pub fn between(start: FrameBound, end: FrameBound) -> Self {
        Self {
            unit: FrameUnit::Rows,
            extent: FrameExtent::Between { start, end },
        }
    }

    pub fn preceding_only(start: FrameBound) -> Self {
        Self {
            unit: FrameUnit::Rows,
            extent: FrameExtent::PrecedingOnly(start),
        }
    }

    pub fn with_unit(mut self, unit: FrameUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn unit(&self) -> FrameUnit {
        self.unit
    }

    pub fn extent(&self) -> FrameExtent {
        self.extent
    }
}

/// One edge of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameBound {
    CurrentRow,
    Preceding(u64),
    Following(u64),
    UnboundedPreceding,
    UnboundedFollowing,
}
