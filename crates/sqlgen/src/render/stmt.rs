//! Statements, in fixed clause order.

use super::{RenderContext, comma_separated, expr, filter, source, wrapped_if};
use crate::filter::{Conjunction, Filter};
use crate::stmt::{
    DeleteBuilder, DistinctQualifier, InsertBuilder, InsertValues, Query, SelectBuilder,
    SetOperation, StatementRef, UpdateBuilder,
};
use crate::token::{Token, TokenStream, kw};

/// A top-level command; queries honor their own wrap flag here.
pub(crate) fn statement(stmt: StatementRef<'_>, ctx: RenderContext<'_>, out: &mut TokenStream) {
    match stmt {
        StatementRef::Select(s) => {
            wrapped_if(s.wrap_in_parentheses(), out, |out| select(s, ctx, out));
        }
        StatementRef::SetOperation(op) => {
            wrapped_if(op.wrap_in_parentheses(), out, |out| set_operation(op, ctx, out));
        }
        StatementRef::Insert(i) => insert(i, ctx, out),
        StatementRef::Update(u) => update(u, ctx, out),
        StatementRef::Delete(d) => delete(d, ctx, out),
    }
}

/// Query body for contexts that supply their own parentheses.
pub(crate) fn query(q: &Query, ctx: RenderContext<'_>, out: &mut TokenStream) {
    match q {
        Query::Select(s) => select(s, ctx, out),
        Query::SetOperation(op) => set_operation(op, ctx, out),
    }
}

fn operand(q: &Query, ctx: RenderContext<'_>, out: &mut TokenStream) {
    wrapped_if(q.wrap_in_parentheses(), out, |out| query(q, ctx, out));
}

fn select(s: &SelectBuilder, ctx: RenderContext<'_>, out: &mut TokenStream) {
    let ctx = ctx.qualified(true);

    out.push(Token::keyword(kw::SELECT));
    match s.distinct() {
        DistinctQualifier::Default => {}
        DistinctQualifier::All => {
            out.push(Token::keyword(kw::ALL));
        }
        DistinctQualifier::Distinct => {
            out.push(Token::keyword(kw::DISTINCT));
        }
    }
    if let Some(top) = s.top() {
        out.push(Token::keyword(kw::TOP));
        expr::expr(top.count(), ctx, out);
        if top.is_percent() {
            out.push(Token::keyword(kw::PERCENT));
        }
        if top.is_with_ties() {
            out.push(Token::keyword(kw::WITH)).push(Token::keyword(kw::TIES));
        }
    }
    comma_separated(s.projections(), out, |p, out| {
        expr::expr(p.expr(), ctx, out);
        if let Some(alias) = p.alias() {
            if ctx.options.alias_projections_using_as {
                out.push(Token::keyword(kw::AS));
            }
            out.push(Token::identifier(alias.to_sql()));
        }
    });

    if !s.from_items().is_empty() {
        out.push(Token::keyword(kw::FROM));
        comma_separated(s.from_items(), out, |item, out| source::join_item(item, ctx, out));
    }
    where_clause(kw::WHERE, s.where_filters(), ctx, out);
    if !s.group_by().is_empty() {
        out.push(Token::keyword(kw::GROUP)).push(Token::keyword(kw::BY));
        comma_separated(s.group_by(), out, |g, out| expr::expr(g, ctx, out));
    }
    where_clause(kw::HAVING, s.having_filters(), ctx, out);
    if !s.order_by().is_empty() {
        out.push(Token::keyword(kw::ORDER)).push(Token::keyword(kw::BY));
        comma_separated(s.order_by(), out, |o, out| expr::order_by(o, ctx, out));
    }
}

/// `WHERE`/`HAVING` followed by the filters joined with AND; nothing if
/// every filter renders empty.
fn where_clause(
    keyword: &'static str,
    filters: &[Filter],
    ctx: RenderContext<'_>,
    out: &mut TokenStream,
) {
    let predicate = filter::conjoined(filters, Conjunction::And, ctx);
    if !predicate.is_empty() {
        out.push(Token::keyword(keyword));
        out.append(predicate);
    }
}

fn set_operation(op: &SetOperation, ctx: RenderContext<'_>, out: &mut TokenStream) {
    operand(op.left(), ctx, out);
    out.push(Token::keyword(op.operator().keyword()));
    match op.distinct() {
        DistinctQualifier::Default => {}
        DistinctQualifier::All => {
            out.push(Token::keyword(kw::ALL));
        }
        DistinctQualifier::Distinct => {
            out.push(Token::keyword(kw::DISTINCT));
        }
    }
    operand(op.right(), ctx, out);
}

fn insert(i: &InsertBuilder, ctx: RenderContext<'_>, out: &mut TokenStream) {
    let ctx = ctx.qualified(ctx.options.qualify_insert_columns);

    out.push(Token::keyword(kw::INSERT)).push(Token::keyword(kw::INTO));
    source::aliased_source(i.target(), ctx, out);
    if !i.columns().is_empty() {
        out.push(Token::open_paren());
        comma_separated(i.columns(), out, |c, out| expr::column(c, ctx, out));
        out.push(Token::close_paren());
    }
    match i.values() {
        InsertValues::List(list) => {
            out.push(Token::callee(kw::VALUES)).push(Token::open_paren());
            comma_separated(list.values(), out, |v, out| expr::expr(v, ctx, out));
            out.push(Token::close_paren());
        }
        InsertValues::Query(q) => {
            out.push(Token::open_paren());
            query(q, ctx, out);
            out.push(Token::close_paren());
        }
    }
}

fn update(u: &UpdateBuilder, ctx: RenderContext<'_>, out: &mut TokenStream) {
    let ctx = ctx.qualified(ctx.options.qualify_update_columns);

    out.push(Token::keyword(kw::UPDATE));
    source::aliased_source(u.target(), ctx, out);
    out.push(Token::keyword(kw::SET));
    comma_separated(u.setters(), out, |setter, out| {
        expr::column(setter.column(), ctx, out);
        out.push(Token::operator("="));
        expr::expr(setter.value(), ctx, out);
    });
    where_clause(kw::WHERE, u.where_filters(), ctx, out);
}

fn delete(d: &DeleteBuilder, ctx: RenderContext<'_>, out: &mut TokenStream) {
    let ctx = ctx.qualified(ctx.options.qualify_delete_columns);

    out.push(Token::keyword(kw::DELETE)).push(Token::keyword(kw::FROM));
    source::aliased_source(d.target(), ctx, out);
    where_clause(kw::WHERE, d.where_filters(), ctx, out);
}
