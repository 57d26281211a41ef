//! Predicates.
//!
//! A filter that renders no tokens (an empty group, or `NOT` over one) is
//! skipped by its parent along with the conjunction that would precede it.

use super::{RenderContext, expr, stmt};
use crate::filter::{Conjunction, Filter, Predicate, Quantifier};
use crate::token::{Token, TokenStream, kw};

pub(crate) fn filter(f: &Filter, ctx: RenderContext<'_>, out: &mut TokenStream) {
    let mut inner = TokenStream::new();
    predicate(f.predicate(), ctx, &mut inner);
    if inner.is_empty() {
        return;
    }
    if f.wrap_in_parentheses() {
        out.push(Token::open_paren());
        out.append(inner);
        out.push(Token::close_paren());
    } else {
        out.append(inner);
    }
}

/// Join the non-empty renderings of `filters` with `conjunction`.
pub(crate) fn conjoined(
    filters: &[Filter],
    conjunction: Conjunction,
    ctx: RenderContext<'_>,
) -> TokenStream {
    let keyword = match conjunction {
        Conjunction::And => kw::AND,
        Conjunction::Or => kw::OR,
    };
    let mut out = TokenStream::new();
    for f in filters {
        let mut child = TokenStream::new();
        filter(f, ctx, &mut child);
        if child.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(Token::keyword(keyword));
        }
        out.append(child);
    }
    out
}

fn predicate(p: &Predicate, ctx: RenderContext<'_>, out: &mut TokenStream) {
    match p {
        Predicate::Compare { left, op, right } => {
            expr::expr(left, ctx, out);
            out.push(Token::operator(op.as_str()));
            expr::expr(right, ctx, out);
        }
        Predicate::Between {
            subject,
            low,
            high,
            negated,
        } => {
            expr::expr(subject, ctx, out);
            if *negated {
                out.push(Token::keyword(kw::NOT));
            }
            out.push(Token::keyword(kw::BETWEEN));
            expr::expr(low, ctx, out);
            out.push(Token::keyword(kw::AND));
            expr::expr(high, ctx, out);
        }
        Predicate::Like {
            subject,
            pattern,
            negated,
        } => {
            expr::expr(subject, ctx, out);
            if *negated {
                out.push(Token::keyword(kw::NOT));
            }
            out.push(Token::keyword(kw::LIKE));
            expr::expr(pattern, ctx, out);
        }
        Predicate::Null { subject, negated } => {
            expr::expr(subject, ctx, out);
            out.push(Token::keyword(kw::IS));
            if *negated {
                out.push(Token::keyword(kw::NOT));
            }
            out.push(Token::keyword(kw::NULL));
        }
        Predicate::In {
            subject,
            values,
            negated,
        } => {
            expr::expr(subject, ctx, out);
            if *negated {
                out.push(Token::keyword(kw::NOT));
            }
            out.push(Token::keyword(kw::IN));
            expr::value_provider(values, ctx, out);
        }
        Predicate::Exists(query) => {
            out.push(Token::callee(kw::EXISTS)).push(Token::open_paren());
            stmt::query(query, ctx, out);
            out.push(Token::close_paren());
        }
        Predicate::Quantified {
            subject,
            op,
            quantifier,
            values,
        } => {
            expr::expr(subject, ctx, out);
            out.push(Token::operator(op.as_str()));
            out.push(Token::keyword(match quantifier {
                Quantifier::All => kw::ALL,
                Quantifier::Any => kw::ANY,
                Quantifier::Some => kw::SOME,
            }));
            expr::value_provider(values, ctx, out);
        }
        Predicate::Group(group) => {
            out.append(conjoined(group.filters(), group.conjunction(), ctx));
        }
        Predicate::Not(child) => {
            let mut inner = TokenStream::new();
            filter(child, ctx, &mut inner);
            if !inner.is_empty() {
                out.push(Token::keyword(kw::NOT));
                out.append(inner);
            }
        }
    }
}
