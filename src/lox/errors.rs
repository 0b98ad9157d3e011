//! Errors that can occur during the lifetime of the tool.
use std::io::{Error as IOError, ErrorKind};
use std::process::ExitCode;

use itertools::Itertools;
use thiserror::Error;

use crate::lox::token::lexer;

/// An error that occurred inside the Compilo engine.
/// This enum will be extended bit by bit as new phases
/// get added.
///
/// To support the [`std::process::Termination`] trait such that we can use
/// exit codes as specified by the
/// [`<sysexits.h>`](https://man.freebsd.org/cgi/man.cgi?query=sysexits&apropos=0&sektion=0&manpath=FreeBSD+4.3-RELEASE&format=html)
/// header, a `From<EngineError> for ExitCode` implementation is provided.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// An error in how the tool is called.
    #[error("Usage: {0} [script]")]
    UsageError(String),
    /// Errors that happened when trying to load the file
    /// or read the REPL line.
    #[error("Error reading source: {0}")]
    FileError(#[from] IOError),
    /// Errors that happened during the lexing phase.
    #[error("{}", .0.iter().join("\n"))]
    LexingErrors(Vec<lexer::LexingError>),
}

impl EngineError {
    /// Turns the error into a String that can be printed to standard error.
    #[must_use]
    #[inline]
    pub fn display_error(&self) -> String {
        self.to_string()
    }

    /// The `sysexits.h` code the process should exit with.
    #[must_use]
    #[inline]
    #[expect(
        clippy::wildcard_enum_match_arm,
        reason = "ErrorKind is non-exhaustive; every kind not listed is a generic I/O failure."
    )]
    pub fn exit_code(&self) -> u8 {
        match *self {
            EngineError::UsageError(_) => 64, // EX_USAGE
            EngineError::LexingErrors(_) => 65, // EX_DATAERR
            // 66 only covers missing or unreadable files,
            // anything else going wrong during I/O is 74.
            EngineError::FileError(ref err) => match err.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied | ErrorKind::InvalidData => 66, // EX_NOINPUT
                _ => 74, // EX_IOERR
            },
        }
    }
}

impl From<Vec<lexer::LexingError>> for EngineError {
    #[inline]
    fn from(value: Vec<lexer::LexingError>) -> Self {
        EngineError::LexingErrors(value)
    }
}

impl From<EngineError> for ExitCode {
    #[inline]
    fn from(value: EngineError) -> Self {
        ExitCode::from(value.exit_code())
    }
}

// Continuation helpers for the REPL

/// Whether an error occurred because the input was too short.
/// Such errors can be recoverable by allowing further input on the REPL.
pub trait UnterminatedError {
    /// Was this error caused by sudden end of input?
    fn is_unterminated(&self) -> bool;
}

impl UnterminatedError for EngineError {
    #[inline]
    fn is_unterminated(&self) -> bool {
        if let EngineError::LexingErrors(ref errs) = *self {
            errs.is_unterminated()
        } else {
            false
        }
    }
}

impl UnterminatedError for [lexer::LexingError] {
    /// Only a lone unterminated error can be fixed by more input; anything
    /// else is reported right away.
    #[inline]
    fn is_unterminated(&self) -> bool {
        matches!(*self, [ref only] if only.is_unterminated())
    }
}

impl UnterminatedError for lexer::LexingError {
    #[inline]
    fn is_unterminated(&self) -> bool {
        use lexer::LexingError;
        match *self {
            LexingError::UnexpectedCharacter { .. } | LexingError::InvalidNumber { .. } => false,
            LexingError::UnterminatedString { .. } => true,
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::{Error as IOError, ErrorKind};

    use super::{EngineError, UnterminatedError};
    use crate::lox::token::lexer::{tokenize, LexingError};

    fn lexing_error(source: &str) -> EngineError {
        tokenize(source).map_err(EngineError::from).expect_err("Tokenizing should fail")
    }

    #[test]
    fn lexing_errors_are_listed_one_per_line() {
        assert_eq!(
            lexing_error("@\n#").display_error(),
            "[line 1] Error: Unexpected character '@'.\n[line 2] Error: Unexpected character '#'."
        );
    }

    #[test]
    fn exit_codes_follow_sysexits() {
        assert_eq!(lexing_error("@").exit_code(), 65);
        assert_eq!(EngineError::UsageError("compilo".to_owned()).exit_code(), 64);
        assert_eq!(EngineError::from(IOError::from(ErrorKind::NotFound)).exit_code(), 66);
        assert_eq!(EngineError::from(IOError::from(ErrorKind::PermissionDenied)).exit_code(), 66);
        assert_eq!(EngineError::from(IOError::from(ErrorKind::InvalidData)).exit_code(), 66);
        assert_eq!(EngineError::from(IOError::from(ErrorKind::BrokenPipe)).exit_code(), 74);
        assert_eq!(EngineError::from(IOError::from(ErrorKind::Other)).exit_code(), 74);
    }

    #[test]
    fn only_a_lone_unterminated_string_asks_for_more_input() {
        assert!(lexing_error("\"open").is_unterminated());
        assert!(!lexing_error("@ \"open").is_unterminated());
        assert!(!lexing_error("@").is_unterminated());
        assert!(LexingError::UnterminatedString { line: 1 }.is_unterminated());
        assert!(!EngineError::UsageError("compilo".to_owned()).is_unterminated());
    }
}
