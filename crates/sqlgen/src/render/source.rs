//! FROM items and joins.

use super::{RenderContext, expr, filter, stmt, wrapped_if};
use crate::source::{AliasedSource, Join, JoinItem, JoinKind, Source};
use crate::token::{Token, TokenStream, kw};

pub(crate) fn aliased_source(s: &AliasedSource, ctx: RenderContext<'_>, out: &mut TokenStream) {
    match s.source() {
        Source::Table(table) => {
            out.push(Token::identifier(table.name().to_sql()));
        }
        Source::Function(f) => expr::function(f, ctx, out),
        Source::Query(query) => {
            out.push(Token::open_paren());
            stmt::query(query, ctx, out);
            out.push(Token::close_paren());
        }
    }
    if let Some(alias) = s.alias() {
        if ctx.options.alias_column_sources_using_as {
            out.push(Token::keyword(kw::AS));
        }
        out.push(Token::identifier(alias.to_sql()));
    }
}

pub(crate) fn join_item(item: &JoinItem, ctx: RenderContext<'_>, out: &mut TokenStream) {
    match item {
        JoinItem::Source(s) => aliased_source(s, ctx, out),
        JoinItem::Join(j) => join(j, ctx, out),
    }
}

fn join(j: &Join, ctx: RenderContext<'_>, out: &mut TokenStream) {
    wrapped_if(j.wrap_in_parentheses(), out, |out| {
        join_item(j.left(), ctx, out);
        join_keywords(j.kind(), ctx, out);
        aliased_source(j.right(), ctx, out);
        if let Some(on) = j.on_filter() {
            let mut predicate = TokenStream::new();
            filter::filter(on, ctx, &mut predicate);
            if !predicate.is_empty() {
                out.push(Token::keyword(kw::ON));
                out.append(predicate);
            }
        }
    });
}

fn join_keywords(kind: JoinKind, ctx: RenderContext<'_>, out: &mut TokenStream) {
    let side = match kind {
        JoinKind::Inner => {
            if ctx.options.verbose_inner_join {
                out.push(Token::keyword(kw::INNER));
            }
            None
        }
        JoinKind::LeftOuter => Some(kw::LEFT),
        JoinKind::RightOuter => Some(kw::RIGHT),
        JoinKind::FullOuter => Some(kw::FULL),
        JoinKind::Cross => {
            out.push(Token::keyword(kw::CROSS));
            None
        }
    };
    if let Some(side) = side {
        out.push(Token::keyword(side));
        if ctx.options.verbose_outer_join {
            out.push(Token::keyword(kw::OUTER));
        }
    }
    out.push(Token::keyword(kw::JOIN));
}
