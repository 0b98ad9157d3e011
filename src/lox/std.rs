//! The canonical token dump format shared by Lox implementations:
//! `KIND lexeme literal`, one token per line, with `null` for tokens
//! that carry no literal.

use crate::lox::token::tokens::Token;

/// Renders a value in the canonical Lox dump format.
pub trait LoxStdDisplay {
    /// The canonical single-line representation.
    fn std_display(&self) -> String;
}

impl LoxStdDisplay for Token {
    #[inline]
    fn std_display(&self) -> String {
        let Token {
            kind,
            ref lexeme,
            ref literal,
            ..
        } = *self;

        match *literal {
            Some(ref literal) => format!("{kind} {lexeme} {literal}"),
            None => format!("{kind} {lexeme} null"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::LoxStdDisplay;
    use crate::lox::token::lexer::tokenize;

    fn dump(source: &str) -> Vec<String> {
        tokenize(source)
            .expect("Tokenizing failed")
            .iter()
            .map(LoxStdDisplay::std_display)
            .collect()
    }

    #[test]
    fn canonical_dump() {
        assert_eq!(
            dump("var answer = 42;\nprint \"hi\" + 3.5;"),
            vec![
                "VAR var null",
                "IDENTIFIER answer null",
                "EQUAL = null",
                "NUMBER 42 42.0",
                "SEMICOLON ; null",
                "PRINT print null",
                "STRING \"hi\" hi",
                "PLUS + null",
                "NUMBER 3.5 3.5",
                "SEMICOLON ; null",
                "EOF  null",
            ]
        );
    }
}
