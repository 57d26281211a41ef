//! Value expressions, windows, ORDER BY items and value providers.

use super::{RenderContext, comma_separated, filter, stmt};
use crate::expr::{Column, Expr, Function, ValueProvider};
use crate::order::{NullPlacement, Order, OrderBy};
use crate::token::{Token, TokenStream, kw};
use crate::window::{FrameBound, FrameExtent, FrameUnit, Window};

pub(crate) fn expr(e: &Expr, ctx: RenderContext<'_>, out: &mut TokenStream) {
    match e {
        Expr::Numeric(n) => {
            out.push(Token::literal(n.text()));
        }
        Expr::String(s) => {
            out.push(Token::literal(s.to_sql()));
        }
        Expr::Null => {
            out.push(Token::keyword(kw::NULL));
        }
        Expr::Placeholder(p) => {
            out.push(Token::literal(p.marker()));
        }
        Expr::Column(c) => column(c, ctx, out),
        Expr::AllColumns(all) => {
            if let Some(qualifier) = all.qualifier() {
                out.push(Token::identifier(qualifier)).push(Token::dot());
            }
            out.push(Token::identifier("*"));
        }
        Expr::Function(f) => function(f, ctx, out),
        Expr::Arithmetic(a) => {
            out.push(Token::open_paren());
            expr(a.left(), ctx, out);
            out.push(Token::operator(a.op().as_str()));
            expr(a.right(), ctx, out);
            out.push(Token::close_paren());
        }
        Expr::Negation(operand) => {
            out.push(Token::unary_operator("-"));
            let mut inner = TokenStream::new();
            expr(operand, ctx, &mut inner);
            // `--` would start a comment
            let glued_minus = inner
                .iter()
                .next()
                .is_some_and(|token| token.text().starts_with('-'));
            if glued_minus {
                out.push(Token::open_paren());
                out.append(inner);
                out.push(Token::close_paren());
            } else {
                out.append(inner);
            }
        }
        Expr::MatchCase(case) => {
            out.push(Token::keyword(kw::CASE));
            expr(case.value(), ctx, out);
            for branch in case.branches() {
                out.push(Token::keyword(kw::WHEN));
                expr(&branch.value, ctx, out);
                out.push(Token::keyword(kw::THEN));
                expr(&branch.result, ctx, out);
            }
            if let Some(default) = case.default_value() {
                out.push(Token::keyword(kw::ELSE));
                expr(default, ctx, out);
            }
            out.push(Token::keyword(kw::END));
        }
        Expr::ConditionalCase(case) => {
            out.push(Token::keyword(kw::CASE));
            for branch in case.branches() {
                out.push(Token::keyword(kw::WHEN));
                filter::filter(&branch.condition, ctx, out);
                out.push(Token::keyword(kw::THEN));
                expr(&branch.result, ctx, out);
            }
            if let Some(default) = case.default_value() {
                out.push(Token::keyword(kw::ELSE));
                expr(default, ctx, out);
            }
            out.push(Token::keyword(kw::END));
        }
        Expr::Subquery(query) => {
            out.push(Token::open_paren());
            stmt::query(query, ctx, out);
            out.push(Token::close_paren());
        }
    }
}

pub(crate) fn column(c: &Column, ctx: RenderContext<'_>, out: &mut TokenStream) {
    if c.qualify().unwrap_or(ctx.qualify_columns) {
        if let Some(qualifier) = c.qualifier() {
            out.push(Token::identifier(qualifier)).push(Token::dot());
        }
    }
    out.push(Token::identifier(c.name().to_sql()));
}

pub(crate) fn function(f: &Function, ctx: RenderContext<'_>, out: &mut TokenStream) {
    out.push(Token::callee(f.name().to_sql()));
    out.push(Token::open_paren());
    comma_separated(f.arguments(), out, |arg, out| expr(arg, ctx, out));
    out.push(Token::close_paren());
    if let Some(w) = f.window() {
        out.push(Token::keyword(kw::OVER)).push(Token::open_paren());
        window(w, ctx, out);
        out.push(Token::close_paren());
    }
}

fn window(w: &Window, ctx: RenderContext<'_>, out: &mut TokenStream) {
    if !w.partitions().is_empty() {
        out.push(Token::keyword(kw::PARTITION)).push(Token::keyword(kw::BY));
        comma_separated(w.partitions(), out, |p, out| expr(p, ctx, out));
    }
    if !w.order_by().is_empty() {
        out.push(Token::keyword(kw::ORDER)).push(Token::keyword(kw::BY));
        comma_separated(w.order_by(), out, |o, out| order_by(o, ctx, out));
    }
    if let Some(frame) = w.frame() {
        out.push(Token::keyword(match frame.unit() {
            FrameUnit::Rows => kw::ROWS,
            FrameUnit::Range => kw::RANGE,
        }));
        match frame.extent() {
            FrameExtent::Between { start, end } => {
                out.push(Token::keyword(kw::BETWEEN));
                frame_bound(start, out);
                out.push(Token::keyword(kw::AND));
                frame_bound(end, out);
            }
            FrameExtent::PrecedingOnly(start) => frame_bound(start, out),
        }
    }
}

fn frame_bound(bound: FrameBound, out: &mut TokenStream) {
    match bound {
        FrameBound::CurrentRow => {
            out.push(Token::keyword(kw::CURRENT)).push(Token::keyword(kw::ROW));
        }
        FrameBound::Preceding(n) => {
            out.push(Token::literal(n.to_string()))
                .push(Token::keyword(kw::PRECEDING));
        }
        FrameBound::Following(n) => {
            out.push(Token::literal(n.to_string()))
                .push(Token::keyword(kw::FOLLOWING));
        }
        FrameBound::UnboundedPreceding => {
            out.push(Token::keyword(kw::UNBOUNDED))
                .push(Token::keyword(kw::PRECEDING));
        }
        FrameBound::UnboundedFollowing => {
            out.push(Token::keyword(kw::UNBOUNDED))
                .push(Token::keyword(kw::FOLLOWING));
        }
    }
}

pub(crate) fn order_by(item: &OrderBy, ctx: RenderContext<'_>, out: &mut TokenStream) {
    expr(item.expr(), ctx, out);
    match item.order() {
        Order::Default => {}
        Order::Ascending => {
            out.push(Token::keyword(kw::ASC));
        }
        Order::Descending => {
            out.push(Token::keyword(kw::DESC));
        }
    }
    match item.null_placement() {
        NullPlacement::Default => {}
        NullPlacement::First => {
            out.push(Token::keyword(kw::NULLS)).push(Token::keyword(kw::FIRST));
        }
        NullPlacement::Last => {
            out.push(Token::keyword(kw::NULLS)).push(Token::keyword(kw::LAST));
        }
    }
}

/// `(v1, ...)`, `(SELECT ...)` or `name(args)`.
pub(crate) fn value_provider(values: &ValueProvider, ctx: RenderContext<'_>, out: &mut TokenStream) {
    match values {
        ValueProvider::List(list) => {
            out.push(Token::open_paren());
            comma_separated(list.values(), out, |v, out| expr(v, ctx, out));
            out.push(Token::close_paren());
        }
        ValueProvider::Query(query) => {
            out.push(Token::open_paren());
            stmt::query(query, ctx, out);
            out.push(Token::close_paren());
        }
        ValueProvider::Function(f) => function(f, ctx, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{ConditionalCase, MatchCase, Placeholder};
    use crate::filter::Filter;
    use crate::options::RenderOptions;
    use crate::window::WindowFrame;

    fn sql(e: impl Into<Expr>) -> String {
        let options = RenderOptions::default();
        let mut out = TokenStream::new();
        expr(&e.into(), RenderContext::new(&options), &mut out);
        out.to_sql()
    }

    #[test]
    fn literals() {
        assert_eq!(sql(1), "1");
        assert_eq!(sql(Expr::string("it's")), "'it''s'");
        assert_eq!(sql(Expr::null()), "NULL");
        assert_eq!(sql(Placeholder::new("@id").unwrap()), "@id");
    }

    #[test]
    fn arithmetic_is_always_parenthesized() {
        assert_eq!(sql(Expr::add(1, Expr::multiply(2, 3))), "(1 + (2 * 3))");
        assert_eq!(sql(Expr::modulus(7, 2)), "(7 % 2)");
    }

    #[test]
    fn negation() {
        assert_eq!(sql(Expr::negate(Expr::add(1, 2))), "-(1 + 2)");
        assert_eq!(sql(Expr::negate(5)), "-5");
        assert_eq!(sql(Expr::negate(-5)), "-(-5)");
        assert_eq!(sql(Expr::negate(Expr::negate(5))), "-(-5)");
        assert_eq!(sql(Expr::negate(Expr::float(-0.5).unwrap())), "-(-0.5)");
        assert_eq!(
            sql(Expr::negate(Expr::negate(Expr::negate(1)))),
            "-(-(-1))"
        );
        assert_eq!(sql(Expr::negate(Placeholder::new("$1").unwrap())), "-$1");
    }

    #[test]
    fn unbound_column_and_star() {
        assert_eq!(sql(Column::new("Name").unwrap()), "Name");
        assert_eq!(sql(crate::expr::AllColumns::new()), "*");
    }

    #[test]
    fn column_qualify_override() {
        let options = RenderOptions::default();
        let ctx = RenderContext::new(&options).qualified(false);
        let col = Column::bound(Some("t".into()), crate::ident::Ident::parse("c").unwrap());
        let mut out = TokenStream::new();
        column(&col.clone().with_qualify(true), ctx, &mut out);
        assert_eq!(out.to_sql(), "t.c");
        let mut out = TokenStream::new();
        column(&col, ctx, &mut out);
        assert_eq!(out.to_sql(), "c");
    }

    #[test]
    fn function_with_window() {
        let mut window = Window::new();
        window.add_partition(Column::new("x").unwrap());
        window.add_order_by(OrderBy::descending(Column::new("y").unwrap()));
        window.set_frame(Some(WindowFrame::between(
            FrameBound::Preceding(2),
            FrameBound::Following(3),
        )));
        let f = Function::new("SUM").unwrap().arg(Column::new("z").unwrap()).over(window);
        assert_eq!(
            sql(f),
            "SUM(z) OVER (PARTITION BY x ORDER BY y DESC ROWS BETWEEN 2 PRECEDING AND 3 FOLLOWING)"
        );
    }

    #[test]
    fn range_frame() {
        let mut window = Window::new();
        window.set_frame(Some(
            WindowFrame::preceding_only(FrameBound::UnboundedPreceding).with_unit(FrameUnit::Range),
        ));
        let f = Function::new("COUNT").unwrap().arg(1).over(window);
        assert_eq!(sql(f), "COUNT(1) OVER (RANGE UNBOUNDED PRECEDING)");
    }

    #[test]
    fn empty_window() {
        let f = Function::new("ROW_NUMBER").unwrap().over(Window::new());
        assert_eq!(sql(f), "ROW_NUMBER() OVER ()");
    }

    #[test]
    fn case_forms() {
        let mut m = MatchCase::new(Column::new("c").unwrap());
        m.add_branch(1, Expr::string("one")).set_default(Some(Expr::string("many")));
        assert_eq!(sql(m), "CASE c WHEN 1 THEN 'one' ELSE 'many' END");

        let mut c = ConditionalCase::new();
        c.add_branch(Filter::less_than(Column::new("c").unwrap(), 0), Expr::string("neg"));
        assert_eq!(sql(c), "CASE WHEN c < 0 THEN 'neg' END");
    }
}
