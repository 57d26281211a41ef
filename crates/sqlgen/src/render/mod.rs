//! Graph to token stream to text.
//!
//! Every node family has one render function that matches all of its
//! variants and appends tokens to a shared [`TokenStream`]. Rendering reads
//! the graph and the options and never fails.

mod expr;
mod filter;
mod source;
mod stmt;

use crate::options::RenderOptions;
use crate::stmt::StatementRef;
use crate::token::{Token, TokenStream};

/// Per-call state threaded through the traversal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RenderContext<'a> {
    pub(crate) options: &'a RenderOptions,
    /// Whether bound columns print their source qualifier.
    pub(crate) qualify_columns: bool,
}

impl<'a> RenderContext<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            qualify_columns: true,
        }
    }

    fn qualified(self, qualify_columns: bool) -> Self {
        Self {
            qualify_columns,
            ..self
        }
    }
}

/// Renders statements with a fixed set of [`RenderOptions`].
///
/// A `Formatter` holds no per-render state, so one instance can be shared
/// across threads.
///
/// # Example
/// ```
/// use sqlgen::{Formatter, RenderOptions, SelectBuilder};
///
/// let mut select = SelectBuilder::new();
/// let t = select.add_table_as("Table", "t")?;
/// select.add_projection(t.column("Column")?);
///
/// let formatter = Formatter::with_options(
///     RenderOptions::new().with_alias_column_sources_using_as(true),
/// );
/// assert_eq!(formatter.render(&select), "SELECT t.Column FROM Table AS t");
/// # Ok::<(), sqlgen::BuildError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    options: RenderOptions,
}

impl Formatter {
    /// Formatter with baseline options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a statement to tokens.
    pub fn tokens<'a>(&self, statement: impl Into<StatementRef<'a>>) -> TokenStream {
        let mut out = TokenStream::new();
        stmt::statement(statement.into(), RenderContext::new(&self.options), &mut out);
        out
    }

    /// Render a statement to SQL text.
    pub fn render<'a>(&self, statement: impl Into<StatementRef<'a>>) -> String {
        let statement = statement.into();
        let tokens = self.tokens(statement);
        let sql = tokens.to_sql();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlgen.render",
            kind = statement.kind().as_str(),
            tokens = tokens.len(),
            sql = %truncate_sql(&sql, MAX_LOGGED_SQL),
            "rendered statement"
        );

        sql
    }
}

/// Render a statement with baseline options.
///
/// ```
/// use sqlgen::SelectBuilder;
///
/// let mut select = SelectBuilder::new();
/// select.add_projection(sqlgen::Expr::add(1, 1));
/// assert_eq!(sqlgen::render(&select), "SELECT (1 + 1)");
/// ```
pub fn render<'a>(statement: impl Into<StatementRef<'a>>) -> String {
    Formatter::new().render(statement)
}

#[cfg(feature = "tracing")]
const MAX_LOGGED_SQL: usize = 200;

#[cfg(feature = "tracing")]
fn truncate_sql(sql: &str, max_bytes: usize) -> std::borrow::Cow<'_, str> {
    if sql.len() <= max_bytes {
        return std::borrow::Cow::Borrowed(sql);
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    std::borrow::Cow::Owned(format!("{}...", &sql[..end]))
}

/// Append `items` separated by commas.
fn comma_separated<T>(
    items: &[T],
    out: &mut TokenStream,
    mut each: impl FnMut(&T, &mut TokenStream),
) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(Token::comma());
        }
        each(item, out);
    }
}

/// Append `inner`, parenthesized when `wrap` is set.
fn wrapped_if(wrap: bool, out: &mut TokenStream, inner: impl FnOnce(&mut TokenStream)) {
    if wrap {
        out.push(Token::open_paren());
    }
    inner(out);
    if wrap {
        out.push(Token::close_paren());
    }
}
