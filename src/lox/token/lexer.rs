//! Encapsulates all behaviour necessary to properly lex Lox code.
//!
//! Note: Lexing is also commonly categorized as tokenizing. The engine doing
//! the work is the [Scanner], which follows the Scanner class of the book;
//! [tokenize] is the one-shot convenience wrapper around it.
//!
//! ```rust
//! use compilo::lox::token::lexer::Scanner;
//! use compilo::lox::token::tokens::TokenKind;
//!
//! let mut scanner = Scanner::new("var x = \"foo\";");
//! let tokens = scanner.scan_tokens();
//! assert_eq!(tokens.len(), 6);
//! assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::Eof));
//! assert!(!scanner.had_error());
//! ```
#![allow(
    clippy::min_ident_chars,
    reason = "short names do not decrease readability here."
)]

use core::mem;

use thiserror::Error;
use tracing::{debug, trace};

use crate::lox::token::tokens::{Token, TokenKind, KEYWORDS};
use crate::lox::types::LoxLiteral;

/// Errors that can happen during lexing.
///
/// None of them stop the scan; the offending input is skipped and
/// scanning resumes right after it.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum LexingError {
    /// A character that starts no token.
    #[error("[line {line}] Error: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The skipped character.
        character: char,
        /// Line the character is on.
        line: usize,
    },
    /// A string was started but not terminated until the end of input/file.
    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString {
        /// Line the input ended on.
        line: usize,
    },
    /// Digits that could not be converted into a number.
    #[error("[line {line}] Error: Invalid number literal '{literal}'.")]
    InvalidNumber {
        /// The rejected source text.
        literal: String,
        /// Line the literal is on.
        line: usize,
    },
}

impl LexingError {
    /// The line this error is reported at.
    #[must_use]
    #[inline]
    pub fn line(&self) -> usize {
        match *self {
            LexingError::UnexpectedCharacter { line, .. }
            | LexingError::UnterminatedString { line }
            | LexingError::InvalidNumber { line, .. } => line,
        }
    }
}

/// Tokenizes the given source code of Lox into either a [Vec] of [`Tokens`](Token),
/// or returns all [`LexingErrors`](LexingError) if any did occur.
/// Thus, you cannot proceed with the list of tokens if lexing had any errors.
///
/// # Errors
///
/// Every [`LexingError`] recorded during the scan, in source order, if there
/// was at least one.
#[inline]
pub fn tokenize<S: AsRef<str>>(source: S) -> Result<Vec<Token>, Vec<LexingError>> {
    let mut scanner = Scanner::new(source.as_ref());
    let tokens = scanner.scan_tokens();

    if scanner.had_error() {
        Err(scanner.into_errors())
    } else {
        Ok(tokens)
    }
}

/// Single-pass scanner over a borrowed source buffer.
///
/// `start` and `current` are byte offsets into the source and always lie on
/// character boundaries; `start..current` is the lexeme being recognized.
#[derive(Debug)]
pub struct Scanner<'src> {
    /// The complete source code.
    source: &'src str,
    /// Offset of the first character of the current lexeme.
    start: usize,
    /// Offset of the next unconsumed character.
    current: usize,
    /// Line of the next unconsumed character, 1-based.
    line: usize,
    /// Line the current lexeme started on.
    token_line: usize,
    /// Tokens emitted so far.
    tokens: Vec<Token>,
    /// Errors recorded during the last scan.
    errors: Vec<LexingError>,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner over the given source. Nothing is scanned until
    /// [`scan_tokens`](Scanner::scan_tokens) is called.
    #[must_use]
    #[inline]
    pub fn new(source: &'src str) -> Self {
        Scanner {
            source,
            start: 0,
            current: 0,
            line: 1,
            token_line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scans the whole source, returning every token followed by a single
    /// [`TokenKind::Eof`].
    ///
    /// Errors do not abort the scan; they are available from
    /// [`errors`](Scanner::errors) afterwards. Calling this again rescans
    /// the source from the beginning.
    #[inline]
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        self.start = 0;
        self.current = 0;
        self.line = 1;
        self.errors.clear();

        while !self.is_at_end() {
            self.start = self.current;
            self.token_line = self.line;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line));
        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            lines = self.line,
            "finished scanning"
        );
        mem::take(&mut self.tokens)
    }

    /// Errors recorded by the last scan, in source order.
    #[must_use]
    #[inline]
    pub fn errors(&self) -> &[LexingError] {
        &self.errors
    }

    /// Did the last scan record any error?
    #[must_use]
    #[inline]
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consumes the scanner, handing out its recorded errors.
    #[must_use]
    #[inline]
    pub fn into_errors(self) -> Vec<LexingError> {
        self.errors
    }

    /// Recognizes a single lexeme, emitting at most one token.
    ///
    /// In case of an error, the characters stay consumed, so that lexing can continue
    /// past the error.
    fn scan_token(&mut self) {
        let Some(char) = self.advance() else {
            return;
        };

        match char {
            // Grouping
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),

            // Punctuation
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            ';' => self.add_token(TokenKind::Semicolon),

            // Arith Operators
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            '*' => self.add_token(TokenKind::Star),

            // Comments run until the end of the line; the newline itself is left
            // for the main loop.
            '/' if self.next_char_is('/') => self.advance_while(|c| c != '\n'),
            '/' => self.add_token(TokenKind::Slash),

            // One or two character operators
            '!' if self.next_char_is('=') => self.add_token(TokenKind::BangEqual),
            '!'                           => self.add_token(TokenKind::Bang),
            '=' if self.next_char_is('=') => self.add_token(TokenKind::EqualEqual),
            '='                           => self.add_token(TokenKind::Equal),
            '<' if self.next_char_is('=') => self.add_token(TokenKind::LessEqual),
            '<'                           => self.add_token(TokenKind::Less),
            '>' if self.next_char_is('=') => self.add_token(TokenKind::GreaterEqual),
            '>'                           => self.add_token(TokenKind::Greater),

            // Whitespace, newlines are counted by advance
            ' ' | '\t' | '\r' | '\n' => {}

            // Literals
            '"' => self.string(),
            c if is_digit(c) => self.number(),

            // Identifiers and Keywords
            c if is_alpha(c) => self.identifier(),

            // ERROR
            character => self.error(LexingError::UnexpectedCharacter {
                character,
                line: self.line,
            }),
        }
    }

    /// Scans the rest of a string literal, the opening quote is already consumed.
    fn string(&mut self) {
        self.advance_while(|c| c != '"');

        if !self.next_char_is('"') {
            self.error(LexingError::UnterminatedString { line: self.line });
            return;
        }

        // Both quotes are a single byte each.
        let value = self
            .source
            .get(self.start.saturating_add(1)..self.current.saturating_sub(1))
            .unwrap_or_default()
            .to_owned();
        self.add_literal_token(TokenKind::String, LoxLiteral::String(value));
    }

    /// Scans the rest of a number literal, the first digit is already consumed.
    ///
    /// A `.` is only part of the number if a digit follows it, so `42.` is
    /// scanned as a number followed by a dot.
    fn number(&mut self) {
        self.advance_while(is_digit);
        if self.peek_next().is_some_and(is_digit) && self.next_char_is('.') {
            self.advance_while(is_digit);
        }

        let literal = self.lexeme();
        match literal.parse::<f64>() {
            Ok(value) => self.add_literal_token(TokenKind::Number, LoxLiteral::Number(value)),
            Err(err) => {
                debug!(literal, %err, "number literal rejected");
                self.error(LexingError::InvalidNumber {
                    literal: literal.to_owned(),
                    line: self.line,
                });
            }
        }
    }

    /// Scans the rest of an identifier and decides whether it is a keyword.
    fn identifier(&mut self) {
        self.advance_while(is_alpha_num);

        let kind = KEYWORDS
            .get(self.lexeme())
            .copied()
            .unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    /// The source text of the lexeme being recognized.
    fn lexeme(&self) -> &'src str {
        self.source.get(self.start..self.current).unwrap_or_default()
    }

    /// Is the whole source consumed?
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// The next character, without consuming it.
    fn peek(&self) -> Option<char> {
        self.source.get(self.current..)?.chars().next()
    }

    /// The character one beyond the next, without consuming anything.
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.current..)?.chars().nth(1)
    }

    /// Consumes the next character, updating the line counter.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "offsets are bounded by the source length, and the line count by its newlines."
    )]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Consumes the next character only if it is exactly the supplied character.
    fn next_char_is(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current = self.current.saturating_add(expected.len_utf8());
            true
        } else {
            false
        }
    }

    /// Consumes characters for as long as they match the predicate.
    fn advance_while<P: Fn(char) -> bool>(&mut self, predicate: P) {
        while self.peek().is_some_and(&predicate) {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Emits a token without a literal payload.
    fn add_token(&mut self, kind: TokenKind) {
        self.push_token(Token::new(kind, self.lexeme(), self.token_line));
    }

    /// Emits a literal token carrying its decoded value.
    fn add_literal_token(&mut self, kind: TokenKind, literal: LoxLiteral) {
        self.push_token(Token::new(kind, self.lexeme(), self.token_line).with_literal(literal));
    }

    /// Appends an emitted token.
    fn push_token(&mut self, token: Token) {
        trace!(kind = %token.kind, lexeme = token.lexeme.as_str(), line = token.line, "token");
        self.tokens.push(token);
    }

    /// Records a recoverable error.
    fn error(&mut self, error: LexingError) {
        debug!(%error, "lexing error");
        self.errors.push(error);
    }
}

/// Is the character an ASCII digit?
#[inline]
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Is the character a letter?
///
/// This is Unicode `Alphabetic`, which is wider than the letter categories
/// alone: it also accepts marks such as U+093E (DEVANAGARI VOWEL SIGN AA)
/// and letter-like numerals such as U+2160. Std has no general-category
/// lookup, and the wider set never splits a word that is all letters.
#[inline]
fn is_alpha(c: char) -> bool {
    c.is_alphabetic()
}

/// Is the character a letter or an ASCII digit?
#[inline]
fn is_alpha_num(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

#[cfg(test)]
mod test {
    use super::{tokenize, LexingError, Scanner};
    use crate::lox::errors::UnterminatedError;
    use crate::lox::token::tokens::TokenKind::{self, *};
    use crate::lox::types::LoxLiteral;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source)
            .scan_tokens()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn literals(source: &str) -> Vec<Option<LoxLiteral>> {
        tokenize(source)
            .expect("Tokenizing failed")
            .into_iter()
            .map(|token| token.literal)
            .collect()
    }

    fn errors(source: &str) -> Vec<LexingError> {
        let mut scanner = Scanner::new(source);
        let _tokens = scanner.scan_tokens();
        scanner.into_errors()
    }

    #[test]
    fn simple_tokenizations() {
        assert_eq!(
            kinds("var foo = 20;"),
            vec![Var, Identifier, Equal, Number, Semicolon, Eof]
        );
        assert_eq!(
            literals("var foo = 20"),
            vec![None, None, None, Some(LoxLiteral::Number(20.0)), None]
        );
    }

    #[test]
    fn single_character_tokens() {
        assert_eq!(
            kinds("(){},.-+;*"),
            vec![
                LeftParen, RightParen, LeftBrace, RightBrace, Comma, Dot, Minus, Plus,
                Semicolon, Star, Eof
            ]
        );
    }

    #[test]
    fn one_or_two_character_operators() {
        assert_eq!(
            kinds("! != = == < <= > >="),
            vec![
                Bang, BangEqual, Equal, EqualEqual, Less, LessEqual, Greater, GreaterEqual, Eof
            ]
        );
        assert_eq!(kinds("!==="), vec![BangEqual, EqualEqual, Eof]);
    }

    #[test]
    fn numbers() {
        assert_eq!(
            literals("42 3.1415 0.99"),
            vec![
                Some(LoxLiteral::Number(42.0)),
                Some(LoxLiteral::Number(3.1415)),
                Some(LoxLiteral::Number(0.99)),
                None,
            ]
        );
    }

    #[test]
    fn trailing_dot_is_not_part_of_a_number() {
        let tokens = tokenize("42.").expect("Tokenizing failed");
        assert_eq!(
            tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
            vec![Number, Dot, Eof]
        );
        assert_eq!(tokens[0].lexeme, "42");
        assert_eq!(kinds("12.abs"), vec![Number, Dot, Identifier, Eof]);
    }

    #[test]
    fn strings() {
        let tokens = tokenize("\"Hello, World!\" \"Another string\"").expect("Tokenizing failed");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, String);
        assert_eq!(tokens[0].lexeme, "\"Hello, World!\"");
        assert_eq!(tokens[0].literal, Some(LoxLiteral::String("Hello, World!".to_owned())));
        assert_eq!(tokens[1].literal, Some(LoxLiteral::String("Another string".to_owned())));
        assert_eq!(literals("\"\""), vec![Some(LoxLiteral::String(std::string::String::new())), None]);
    }

    #[test]
    fn strings_do_not_process_escapes() {
        assert_eq!(
            literals(r#""a\nb""#),
            vec![Some(LoxLiteral::String(r"a\nb".to_owned())), None]
        );
    }

    #[test]
    fn multi_line_strings_start_on_their_first_line() {
        let tokens = tokenize("\"one\ntwo\nthree\" x").expect("Tokenizing failed");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[0].literal, Some(LoxLiteral::String("one\ntwo\nthree".to_owned())));
        assert_eq!(tokens[1].kind, Identifier);
        assert_eq!(tokens[1].line, 3);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn unterminated_string() {
        let mut scanner = Scanner::new("\"abc");
        let tokens = scanner.scan_tokens();
        assert_eq!(tokens.iter().map(|token| token.kind).collect::<Vec<_>>(), vec![Eof]);
        assert_eq!(scanner.errors(), &[LexingError::UnterminatedString { line: 1 }]);

        assert_eq!(
            errors("print 1;\n\"abc\ndef"),
            vec![LexingError::UnterminatedString { line: 3 }]
        );
    }

    #[test]
    fn whitespace_and_newlines_count_lines() {
        let tokens = tokenize("var x = 10;\nvar y = 20;\n\nvar z = x + y;").expect("Tokenizing failed");
        assert_eq!(tokens.len(), 18);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[5].kind, Var);
        assert_eq!(tokens[5].line, 2);
        assert_eq!(tokens[10].kind, Var);
        assert_eq!(tokens[10].line, 4);
        assert_eq!(tokens[17].kind, Eof);
        assert_eq!(tokens[17].line, 4);
    }

    #[test]
    fn unexpected_characters_are_reported_and_skipped() {
        let mut scanner = Scanner::new("@ # $ %");
        let tokens = scanner.scan_tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            scanner.errors(),
            &[
                LexingError::UnexpectedCharacter { character: '@', line: 1 },
                LexingError::UnexpectedCharacter { character: '#', line: 1 },
                LexingError::UnexpectedCharacter { character: '$', line: 1 },
                LexingError::UnexpectedCharacter { character: '%', line: 1 },
            ]
        );
        assert_eq!(
            scanner.errors()[0].to_string(),
            "[line 1] Error: Unexpected character '@'."
        );
    }

    #[test]
    fn one_bad_character_yields_one_error() {
        let mut scanner = Scanner::new("1 @ 2\n_x");
        let tokens = scanner.scan_tokens();
        assert_eq!(
            tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
            vec![Number, Number, Identifier, Eof]
        );
        assert_eq!(
            scanner.errors(),
            &[
                LexingError::UnexpectedCharacter { character: '@', line: 1 },
                LexingError::UnexpectedCharacter { character: '_', line: 2 },
            ]
        );
    }

    #[test]
    fn comments_and_slashes() {
        assert_eq!(kinds("// nothing to see here"), vec![Eof]);
        assert_eq!(kinds("a / b // divide\nc"), vec![Identifier, Slash, Identifier, Identifier, Eof]);

        let tokens = tokenize("// first\n// second\nx").expect("Tokenizing failed");
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("and class else false for fun if nil or print return super this true var while"),
            vec![
                And, Class, Else, False, For, Fun, If, Nil, Or, Print, Return, Super, This, True,
                Var, While, Eof
            ]
        );
        assert_eq!(
            kinds("orchid Var classy x1 fun2"),
            vec![Identifier, Identifier, Identifier, Identifier, Identifier, Eof]
        );
    }

    #[test]
    fn identifiers_take_unicode_letters() {
        let tokens = tokenize("café = 1").expect("Tokenizing failed");
        assert_eq!(tokens[0].kind, Identifier);
        assert_eq!(tokens[0].lexeme, "café");
        assert_eq!(
            errors("€"),
            vec![LexingError::UnexpectedCharacter { character: '€', line: 1 }]
        );
    }

    #[test]
    fn empty_and_blank_sources_yield_only_eof() {
        assert_eq!(kinds(""), vec![Eof]);
        assert_eq!(kinds(" \t\r\n"), vec![Eof]);

        let tokens = tokenize("\n\n\n").expect("Tokenizing failed");
        assert_eq!(tokens[0].line, 4);
        assert_eq!(tokens[0].lexeme, "");
        assert_eq!(tokens[0].literal, None);
    }

    #[test]
    fn rescanning_starts_over() {
        let mut scanner = Scanner::new("a @\nb");
        let first = scanner.scan_tokens();
        assert_eq!(scanner.errors().len(), 1);
        let second = scanner.scan_tokens();
        assert_eq!(first, second);
        assert_eq!(scanner.errors().len(), 1);
    }

    #[test]
    fn tokenize_collects_every_error() {
        let errs = tokenize("@\n#\n\"open").expect_err("Tokenizing should fail");
        assert_eq!(errs.iter().map(LexingError::line).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(errs[2].to_string(), "[line 3] Error: Unterminated string.");
    }

    #[test]
    fn invalid_number_message() {
        let error = LexingError::InvalidNumber {
            literal: "1x".to_owned(),
            line: 2,
        };
        assert_eq!(error.to_string(), "[line 2] Error: Invalid number literal '1x'.");
        assert_eq!(error.line(), 2);
        assert!(!error.is_unterminated());
    }
}
