//! Data types representing tokens available in the Lox language.
use core::fmt::{Display, Formatter};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::lox::types::LoxLiteral;
use crate::lox::util::map;

/// Lookup table for keywords to distinguish them from identifiers.
///
/// Lookups are exact and case-sensitive: `Var` is an identifier.
pub static KEYWORDS: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    map! {
        "nil"    => TokenKind::Nil,
        "false"  => TokenKind::False,
        "true"   => TokenKind::True,

        "and"    => TokenKind::And,
        "or"     => TokenKind::Or,

        "if"     => TokenKind::If,
        "else"   => TokenKind::Else,
        "for"    => TokenKind::For,
        "while"  => TokenKind::While,
        "return" => TokenKind::Return,

        "class"  => TokenKind::Class,
        "fun"    => TokenKind::Fun,
        "var"    => TokenKind::Var,

        "print"  => TokenKind::Print,
        "super"  => TokenKind::Super,
        "this"   => TokenKind::This,
    }
});

/// The closed set of lexical categories a token can belong to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the token set of the language is fixed; a new kind is a breaking change."
)]
pub enum TokenKind {
    // Grouping
    /// `"("`
    LeftParen,
    /// `")"`
    RightParen,
    /// `"{"`
    LeftBrace,
    /// `"}"`
    RightBrace,

    // Punctuation
    /// `","`
    Comma,
    /// `"."`
    Dot,
    /// `";"`
    Semicolon,

    // Arith Operators
    /// `"-"`
    Minus,
    /// `"+"`
    Plus,
    /// `"*"`
    Star,
    /// `"/"`
    Slash,

    // One or two character operators
    /// `"!"`
    Bang,
    /// `"!="`
    BangEqual,
    /// `"="`
    Equal,
    /// `"=="`
    EqualEqual,
    /// `"<"`
    Less,
    /// `"<="`
    LessEqual,
    /// `">"`
    Greater,
    /// `">="`
    GreaterEqual,

    // Literals
    /// A double-quoted string literal.
    String,
    /// A decimal number literal.
    Number,
    /// A name that is not a reserved word.
    Identifier,

    // Keywords
    /// `"and"`
    And,
    /// `"class"`
    Class,
    /// `"else"`
    Else,
    /// `"false"`
    False,
    /// `"for"`
    For,
    /// `"fun"`
    Fun,
    /// `"if"`
    If,
    /// `"nil"`
    Nil,
    /// `"or"`
    Or,
    /// `"print"`
    Print,
    /// `"return"`
    Return,
    /// `"super"`
    Super,
    /// `"this"`
    This,
    /// `"true"`
    True,
    /// `"var"`
    Var,
    /// `"while"`
    While,

    /// End of Input, either end of line in REPL mode, or End of File in normal mode.
    Eof,
}

impl TokenKind {
    /// The canonical upper-case name of this kind, e.g. `LEFT_PAREN`.
    #[must_use]
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        }
    }

    /// Is this kind one of the reserved words?
    #[must_use]
    #[inline]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::And
                | TokenKind::Class
                | TokenKind::Else
                | TokenKind::False
                | TokenKind::For
                | TokenKind::Fun
                | TokenKind::If
                | TokenKind::Nil
                | TokenKind::Or
                | TokenKind::Print
                | TokenKind::Return
                | TokenKind::Super
                | TokenKind::This
                | TokenKind::True
                | TokenKind::Var
                | TokenKind::While
        )
    }
}

impl Display for TokenKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical unit, as produced by the [`Scanner`](crate::lox::token::lexer::Scanner).
///
/// Tokens are never modified once they are emitted.
#[derive(Clone, Debug, PartialEq)]
#[expect(
    clippy::exhaustive_structs,
    reason = "the parser destructures tokens; all four fields are part of the contract."
)]
pub struct Token {
    /// Lexical category of this token.
    pub kind: TokenKind,
    /// The exact source text this token was scanned from.
    /// Empty for the synthetic [`TokenKind::Eof`] token.
    pub lexeme: String,
    /// Decoded value, present only for [`TokenKind::Number`] and [`TokenKind::String`].
    pub literal: Option<LoxLiteral>,
    /// 1-based line on which the lexeme starts.
    pub line: usize,
}

impl Token {
    /// Construct a token without a literal payload.
    #[must_use]
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &str, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.to_owned(),
            literal: None,
            line,
        }
    }

    /// Construct the synthetic end-of-input token.
    #[must_use]
    #[inline]
    pub fn eof(line: usize) -> Self {
        Token::new(TokenKind::Eof, "", line)
    }

    /// Attach a decoded literal to this token.
    #[must_use]
    #[inline]
    pub fn with_literal(self, literal: LoxLiteral) -> Self {
        Token {
            literal: Some(literal),
            ..self
        }
    }
}

impl Display for Token {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "<{} @ {}>", self.lexeme, self.line)
    }
}
