//! SQL names for tables, columns, functions and aliases.
//!
//! [`Ident`] accepts plain names (`Customer`), dotted names (`dbo.Customer`)
//! and double-quoted parts (`"Order Details"`):
//!
//! - Unquoted parts must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts may hold anything except NUL; `"` is escaped as `""`
//!
//! # Example
//! ```
//! use sqlgen::Ident;
//!
//! let t = Ident::parse("dbo.Customer")?;
//! assert_eq!(t.to_sql(), "dbo.Customer");
//!
//! let q = Ident::parse(r#"sales."Order Details""#)?;
//! assert_eq!(q.to_sql(), r#"sales."Order Details""#);
//! # Ok::<(), sqlgen::BuildError>(())
//! ```

use crate::error::{BuildError, BuildResult};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// One dot-separated segment of an [`Ident`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentPart {
    Unquoted(String),
    Quoted(String),
}

/// A validated SQL name, possibly schema-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    parts: Vec<IdentPart>,
}

impl Ident {
    /// Create a single quoted part, e.g. `"Order Details"`.
    pub fn quoted(name: &str) -> BuildResult<Self> {
        if name.is_empty() {
            return Err(BuildError::invalid_identifier("empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(BuildError::invalid_identifier(
                "identifier cannot contain NUL",
            ));
        }
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// Parse a possibly dotted, possibly quoted name.
    pub fn parse(s: &str) -> BuildResult<Self> {
        if s.is_empty() {
            return Err(BuildError::invalid_identifier("identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(BuildError::invalid_identifier(
                "identifier cannot contain NUL",
            ));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();
        loop {
            let part = if chars.peek() == Some(&'"') {
                chars.next();
                parse_quoted(&mut chars)?
            } else {
                parse_unquoted(&mut chars)?
            };
            parts.push(part);

            match chars.next() {
                None => break,
                Some('.') if chars.peek().is_some() => {}
                Some('.') => {
                    return Err(BuildError::invalid_identifier(format!(
                        "trailing '.' in `{s}`"
                    )));
                }
                Some(c) => {
                    return Err(BuildError::invalid_identifier(format!(
                        "unexpected '{c}' after quoted part in `{s}`"
                    )));
                }
            }
        }

        Ok(Self { parts })
    }

    /// The segments of this name, outermost first.
    pub fn parts(&self) -> &[IdentPart] {
        &self.parts
    }

    /// The last segment, unquoted (the table name of `dbo.Customer`).
    pub fn base_name(&self) -> &str {
        match self.parts.last() {
            Some(IdentPart::Unquoted(s)) | Some(IdentPart::Quoted(s)) => s,
            None => "",
        }
    }

    /// Render the name as SQL text.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Unquoted(s) => out.push_str(s),
                IdentPart::Quoted(s) => {
                    out.push('"');
                    out.push_str(&s.replace('"', "\"\""));
                    out.push('"');
                }
            }
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>) -> BuildResult<IdentPart> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('"') if chars.peek() == Some(&'"') => {
                chars.next();
                name.push('"');
            }
            Some('"') => break,
            Some(c) => name.push(c),
            None => return Err(BuildError::invalid_identifier("unclosed quoted identifier")),
        }
    }
    if name.is_empty() {
        return Err(BuildError::invalid_identifier("empty quoted identifier"));
    }
    Ok(IdentPart::Quoted(name))
}

fn parse_unquoted(chars: &mut Peekable<Chars<'_>>) -> BuildResult<IdentPart> {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c == '.' {
            break;
        }
        let valid = if name.is_empty() {
            c == '_' || c.is_alphabetic()
        } else {
            c == '_' || c == '$' || c.is_alphanumeric()
        };
        if !valid {
            return Err(BuildError::invalid_identifier(format!(
                "invalid character '{c}' in identifier"
            )));
        }
        name.push(c);
        chars.next();
    }
    if name.is_empty() {
        return Err(BuildError::invalid_identifier("empty identifier segment"));
    }
    Ok(IdentPart::Unquoted(name))
}

/// Convert an input into an [`Ident`].
///
/// Every name-taking constructor in this crate accepts `impl IntoIdent`.
pub trait IntoIdent {
    fn into_ident(self) -> BuildResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> BuildResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> BuildResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> BuildResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> BuildResult<Ident> {
        Ident::parse(&self)
    }
}

impl IntoIdent for &String {
    fn into_ident(self) -> BuildResult<Ident> {
        Ident::parse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        let ident = Ident::parse("Customer").unwrap();
        assert_eq!(ident.to_sql(), "Customer");
        assert_eq!(ident.base_name(), "Customer");
    }

    #[test]
    fn schema_qualified() {
        let ident = Ident::parse("dbo.Customer").unwrap();
        assert_eq!(ident.to_sql(), "dbo.Customer");
        assert_eq!(ident.parts().len(), 2);
        assert_eq!(ident.base_name(), "Customer");
    }

    #[test]
    fn quoted_part_with_escape() {
        let ident = Ident::parse(r#"sales."Order ""Details""""#).unwrap();
        assert_eq!(ident.to_sql(), r#"sales."Order ""Details""""#);
        assert_eq!(ident.base_name(), r#"Order "Details""#);
    }

    #[test]
    fn quoted_constructor() {
        let ident = Ident::quoted("two words").unwrap();
        assert_eq!(ident.to_sql(), r#""two words""#);
    }

    #[test]
    fn dollar_after_first_char() {
        assert_eq!(Ident::parse("row$num").unwrap().to_sql(), "row$num");
    }

    #[test]
    fn unicode_letters() {
        assert_eq!(Ident::parse("Café").unwrap().to_sql(), "Café");
        assert_eq!(Ident::parse("ventes.Müller_2").unwrap().base_name(), "Müller_2");
        assert!(Ident::parse("٣x").is_err());
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "1abc", "a b", "a..b", "a.", "\"open", "\"\"", "\"a\"b", "x\0y"] {
            let err = Ident::parse(bad).unwrap_err();
            assert!(err.is_invalid_identifier(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn string_conversions() {
        assert_eq!("t".into_ident().unwrap().to_sql(), "t");
        assert_eq!(String::from("s.t").into_ident().unwrap().to_sql(), "s.t");
        assert!(String::new().into_ident().is_err());
    }
}
