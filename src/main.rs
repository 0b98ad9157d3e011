//! Command line driver for Compilo: scans a file or REPL input and prints
//! the resulting tokens, reporting lexing errors through the exit code.
#![deny(
    warnings,
)]
#![deny(
    future_incompatible,
    keyword_idents,
    let_underscore,
    nonstandard_style,
)]
#![deny(
    clippy::all,
    clippy::pedantic,
)]
#![warn(unused)]

use clap::error::ErrorKind as ClapErrorKind;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use compilo::lox::errors::{EngineError, UnterminatedError};
use compilo::lox::std::LoxStdDisplay;
use compilo::lox::token::lexer;
use compilo::lox::token::tokens::Token;

use std::ffi::OsString;
use std::fs;
use std::io::{self, Error as IOError, Write};
use std::process::{ExitCode, Termination};

/// Load a file and run it through the scanner, printing every token.
/// TODO: Hand the tokens to the parser once it exists.
fn run_file(file: &str) -> Result<(), EngineError> {
    let source = fs::read_to_string(file)?;
    info!(file, bytes = source.len(), "scanning source file");

    let tokens = lexer::tokenize(&source)?;
    print_tokens(&tokens)?;
    Ok(())
}

/// Run the REPL Prompt.
///
/// A line that ends inside a string literal is continued on the next line
/// (prompted by `. `) instead of being reported. End of input quits.
fn run_prompt() -> Result<(), EngineError> {
    let stdin = io::stdin();
    let mut input = String::new();
    let mut line = String::new();
    loop {
        print!("{}", if input.is_empty() { "> " } else { ". " });
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            if !input.is_empty() {
                report_input(&input, false)?;
            }
            println!();
            break Ok(());
        }
        input.push_str(&line);

        if report_input(&input, true)? {
            input.clear();
        } else {
            debug!(bytes = input.len(), "waiting for continuation line");
        }
    }
}

/// Scans one complete REPL input and prints its tokens or errors.
///
/// Returns `false` without printing anything if `allow_continuation` is set and
/// the input only failed because it ended too early.
fn report_input(input: &str, allow_continuation: bool) -> Result<bool, IOError> {
    match lexer::tokenize(input) {
        Ok(tokens) => print_tokens(&tokens)?,
        Err(errs) if allow_continuation && errs.is_unterminated() => return Ok(false),
        Err(errs) => eprintln!("{}", EngineError::from(errs).display_error()),
    }
    Ok(true)
}

/// Print the tokens in the canonical dump format, one per line.
fn print_tokens(tokens: &[Token]) -> Result<(), IOError> {
    let mut out = io::stdout().lock();
    for token in tokens {
        writeln!(out, "{}", token.std_display())?;
    }
    out.flush()
}

/// Installs the stderr log subscriber using the given `EnvFilter` directives.
fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Isomorphic to `Result<(), EngineError>`,
/// this allows for overriding the [Termination]
/// trait impl and report custom exit codes instead.
///
/// As this is only supposed to be used on the very
/// outer shell, the success value is dropped.
#[derive(Debug)]
enum EngineResult {
    /// Ok variant.
    Ok,
    /// Error variant
    Err(EngineError),
}

impl Termination for EngineResult {
    fn report(self) -> ExitCode {
        if let EngineResult::Err(err) = self {
            eprintln!("{}", err.display_error());
            err.into()
        } else {
            ExitCode::SUCCESS
        }
    }
}

impl<T, E> From<Result<T, E>> for EngineResult
where
    EngineError: From<E>,
{
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(_) => EngineResult::Ok,
            Err(err) => EngineResult::Err(err.into()),
        }
    }
}

/// compilo scans Lox source code into tokens. Given a file it prints the
/// file's tokens; without arguments it starts an interactive prompt that
/// tokenizes every line entered.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct LoxArgs {
    /// Subcommands, mutually exclusive with [`source_file`].
    #[command(subcommand)]
    command: Option<LoxCommands>,

    /// Source File for the program; the REPL is started if omitted.
    source_file: Option<String>,

    /// Log filter directives, e.g. `compilo=debug`.
    #[arg(long = "log", env = "COMPILO_LOG", default_value = "warn", global = true)]
    log_filter: String,
}

/// Available commands in Compilo
#[derive(Subcommand, Debug)]
enum LoxCommands {
    /// run the lox repl.
    Repl,
    /// tokenize the given file and print its contents.
    Tokenize {
        /// File to scan.
        source_file: String,
    },
}

/// What the driver should do once the command line is understood.
#[derive(Debug, PartialEq)]
enum Invocation {
    /// Scan the given file.
    File(String),
    /// Start the REPL.
    Repl,
    /// Help or version text was printed; nothing left to do.
    Done,
}

/// The usage error reported for any command line that cannot be run.
fn usage_error() -> EngineError {
    EngineError::UsageError(env!("CARGO_PKG_NAME").to_owned())
}

/// Reads the command line, mapping everything clap rejects onto
/// [`EngineError::UsageError`] so it exits with `EX_USAGE`.
///
/// Help and version requests are printed here and yield [`Invocation::Done`].
/// The log filter is returned alongside the invocation.
fn parse_args<I, T>(args: I) -> Result<(Invocation, String), EngineError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let LoxArgs {
        command,
        source_file,
        log_filter,
    } = match LoxArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok((Invocation::Done, String::new()));
        }
        Err(err) => {
            eprint!("{err}");
            return Err(usage_error());
        }
    };

    let invocation = match (command, source_file) {
        (None, Some(source_file))
        | (Some(LoxCommands::Tokenize { source_file }), None) => Invocation::File(source_file),

        (Some(LoxCommands::Repl) | None, None) => Invocation::Repl,

        // e.g. `compilo script.lox repl`
        (Some(_), Some(_)) => return Err(usage_error()),
    };
    Ok((invocation, log_filter))
}

fn main() -> EngineResult {
    let (invocation, log_filter) = match parse_args(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => return EngineResult::Err(err),
    };

    match invocation {
        Invocation::File(source_file) => {
            init_logging(&log_filter);
            run_file(&source_file).into()
        }
        Invocation::Repl => {
            init_logging(&log_filter);
            run_prompt().into()
        }
        Invocation::Done => EngineResult::Ok,
    }
}
