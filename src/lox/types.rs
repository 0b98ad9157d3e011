//! Types shared between the phases of Compilo.
//!
//! Currently this is only the decoded payload of literal tokens, which the
//! parser will eventually lift into its own literal expressions.

use core::fmt::{Display, Formatter};

/// The decoded value of a literal token.
///
/// Tokens that are not literals carry no payload at all, which is expressed
/// as `Option<LoxLiteral>` on the [`Token`](crate::lox::token::tokens::Token).
#[derive(Clone, Debug, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "adding a new variant MUST be handled and is a breaking change."
)]
pub enum LoxLiteral {
    /// A number, represented as a double-precision floating point number.
    Number(f64),
    /// The contents of a string, without the surrounding quotes.
    /// No escape sequences are supported.
    String(String),
}

impl LoxLiteral {
    /// The numeric value, if this is a number literal.
    #[must_use]
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            LoxLiteral::Number(value) => Some(value),
            LoxLiteral::String(_) => None,
        }
    }

    /// The string contents, if this is a string literal.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            LoxLiteral::String(ref value) => Some(value.as_str()),
            LoxLiteral::Number(_) => None,
        }
    }
}

impl Display for LoxLiteral {
    /// Numbers always print with a fractional part (`42.0`), strings print
    /// their raw contents.
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match *self {
            LoxLiteral::Number(value) => write!(f, "{value:?}"),
            LoxLiteral::String(ref value) => write!(f, "{value}"),
        }
    }
}
