//! Lexical output of the renderer.
//!
//! Nodes never write text directly. They append [`Token`]s to a
//! [`TokenStream`], and [`TokenStream::to_sql`] joins the tokens with single
//! spaces, dropping the space wherever the token kinds say it does not belong:
//!
//! - after `(` and around `.`
//! - before `)` and `,`
//! - between a callee (`COUNT`, `EXISTS`, `VALUES`) and its `(`
//! - after a unary operator

use std::fmt;

/// Keyword and punctuation text used by the renderer.
pub mod kw {
    pub const ALL: &str = "ALL";
    pub const AND: &str = "AND";
    pub const ANY: &str = "ANY";
    pub const AS: &str = "AS";
    pub const ASC: &str = "ASC";
    pub const BETWEEN: &str = "BETWEEN";
    pub const BY: &str = "BY";
    pub const CASE: &str = "CASE";
    pub const CROSS: &str = "CROSS";
    pub const CURRENT: &str = "CURRENT";
    pub const DELETE: &str = "DELETE";
    pub const DESC: &str = "DESC";
    pub const DISTINCT: &str = "DISTINCT";
    pub const ELSE: &str = "ELSE";
    pub const END: &str = "END";
    pub const EXCEPT: &str = "EXCEPT";
    pub const EXISTS: &str = "EXISTS";
    pub const FIRST: &str = "FIRST";
    pub const FOLLOWING: &str = "FOLLOWING";
    pub const FROM: &str = "FROM";
    pub const FULL: &str = "FULL";
    pub const GROUP: &str = "GROUP";
    pub const HAVING: &str = "HAVING";
    pub const IN: &str = "IN";
    pub const INNER: &str = "INNER";
    pub const INSERT: &str = "INSERT";
    pub const INTERSECT: &str = "INTERSECT";
    pub const INTO: &str = "INTO";
    pub const IS: &str = "IS";
    pub const JOIN: &str = "JOIN";
    pub const LAST: &str = "LAST";
    pub const LEFT: &str = "LEFT";
    pub const LIKE: &str = "LIKE";
    pub const MINUS: &str = "MINUS";
    pub const NOT: &str = "NOT";
    pub const NULL: &str = "NULL";
    pub const NULLS: &str = "NULLS";
    pub const ON: &str = "ON";
    pub const OR: &str = "OR";
    pub const ORDER: &str = "ORDER";
    pub const OUTER: &str = "OUTER";
    pub const OVER: &str = "OVER";
    pub const PARTITION: &str = "PARTITION";
    pub const PERCENT: &str = "PERCENT";
    pub const PRECEDING: &str = "PRECEDING";
    pub const RANGE: &str = "RANGE";
    pub const RIGHT: &str = "RIGHT";
    pub const ROW: &str = "ROW";
    pub const ROWS: &str = "ROWS";
    pub const SELECT: &str = "SELECT";
    pub const SET: &str = "SET";
    pub const SOME: &str = "SOME";
    pub const THEN: &str = "THEN";
    pub const TIES: &str = "TIES";
    pub const TOP: &str = "TOP";
    pub const UNBOUNDED: &str = "UNBOUNDED";
    pub const UNION: &str = "UNION";
    pub const UPDATE: &str = "UPDATE";
    pub const VALUES: &str = "VALUES";
    pub const WHEN: &str = "WHEN";
    pub const WHERE: &str = "WHERE";
    pub const WITH: &str = "WITH";
}

/// Category of a token; drives spacing in [`TokenStream::to_sql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    /// Name glued to the `(` that follows it: function names, `EXISTS`, `VALUES`.
    Callee,
    Identifier,
    Literal,
    Operator,
    /// Prefix operator glued to its operand.
    UnaryOperator,
    Comma,
    Dot,
    OpenParen,
    CloseParen,
}

/// An atomic piece of rendered SQL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn keyword(text: &'static str) -> Self {
        Self::new(TokenKind::Keyword, text)
    }

    pub fn callee(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Callee, text)
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Identifier, text)
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Literal, text)
    }

    pub fn operator(text: &'static str) -> Self {
        Self::new(TokenKind::Operator, text)
    }

    pub fn unary_operator(text: &'static str) -> Self {
        Self::new(TokenKind::UnaryOperator, text)
    }

    pub fn comma() -> Self {
        Self::new(TokenKind::Comma, ",")
    }

    pub fn dot() -> Self {
        Self::new(TokenKind::Dot, ".")
    }

    pub fn open_paren() -> Self {
        Self::new(TokenKind::OpenParen, "(")
    }

    pub fn close_paren() -> Self {
        Self::new(TokenKind::CloseParen, ")")
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a space separates `self` from the token that follows it.
    fn spaced_before(&self, next: &Token) -> bool {
        use TokenKind::*;
        match (self.kind, next.kind) {
            (OpenParen | Dot | UnaryOperator, _) => false,
            (_, CloseParen | Comma | Dot) => false,
            (Callee, OpenParen) => false,
            _ => true,
        }
    }
}

/// Ordered, append-only sequence of tokens.
///
/// Appending never reorders or deduplicates; concatenation via
/// [`TokenStream::append`] is how parent nodes compose their children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append every token of `other`, consuming it.
    pub fn append(&mut self, mut other: TokenStream) -> &mut Self {
        self.tokens.append(&mut other.tokens);
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Serialize to SQL text.
    pub fn to_sql(&self) -> String {
        let cap = self.tokens.iter().map(|t| t.text.len() + 1).sum();
        let mut out = String::with_capacity(cap);
        let mut prev: Option<&Token> = None;
        for token in &self.tokens {
            if let Some(p) = prev {
                if p.spaced_before(token) {
                    out.push(' ');
                }
            }
            out.push_str(&token.text);
            prev = Some(token);
        }
        out
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl Extend<Token> for TokenStream {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_space_separated() {
        let stream: TokenStream = [Token::keyword(kw::SELECT), Token::literal("1")]
            .into_iter()
            .collect();
        assert_eq!(stream.to_sql(), "SELECT 1");
    }

    #[test]
    fn punctuation_spacing() {
        let stream: TokenStream = [
            Token::callee("IsNull"),
            Token::open_paren(),
            Token::identifier("T"),
            Token::dot(),
            Token::identifier("c"),
            Token::comma(),
            Token::literal("123"),
            Token::close_paren(),
            Token::keyword(kw::IN),
            Token::open_paren(),
            Token::literal("1"),
            Token::close_paren(),
        ]
        .into_iter()
        .collect();
        assert_eq!(stream.to_sql(), "IsNull(T.c, 123) IN (1)");
    }

    #[test]
    fn unary_operator_glues_to_operand() {
        let stream: TokenStream = [
            Token::unary_operator("-"),
            Token::open_paren(),
            Token::literal("1"),
            Token::operator("+"),
            Token::literal("2"),
            Token::close_paren(),
        ]
        .into_iter()
        .collect();
        assert_eq!(stream.to_sql(), "-(1 + 2)");
    }

    #[test]
    fn append_preserves_order() {
        let mut head = TokenStream::new();
        head.push(Token::keyword(kw::NOT));
        let mut tail = TokenStream::new();
        tail.push(Token::literal("1"))
            .push(Token::operator("="))
            .push(Token::literal("1"));
        head.append(tail);
        assert_eq!(head.len(), 4);
        assert_eq!(head.to_sql(), "NOT 1 = 1");
    }

    #[test]
    fn empty_stream_is_empty_text() {
        assert_eq!(TokenStream::new().to_sql(), "");
        assert!(TokenStream::new().is_empty());
    }
}
