use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{ArgAction, Parser};
use core_interp::{
    error::Error,
    interpreter::lexer::{Lexer, TokenKind},
    logging,
};

/// core-tokens prints the tokens of a Core program, one per line, up to and
/// including the end-of-stream token.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The Core program to tokenize.
    source: PathBuf,

    /// Print each token's kind and text instead of its numeric code.
    #[arg(long)]
    names: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match tokenize(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        },
    }
}

fn tokenize(args: &Args) -> Result<(), Error> {
    let source = fs::read_to_string(&args.source).map_err(|source| Error::Open { path: args.source
                                                                                          .clone(),
                                                                                   source })?;
    let mut out = BufWriter::new(io::stdout().lock());
    let mut lexer = Lexer::new(&source)?;
    loop {
        let token = lexer.current();
        let written = if args.names {
            writeln!(out, "{:<12} {}", token.kind, token.text)
        } else {
            writeln!(out, "{}", token.kind.code())
        };
        written.map_err(Error::Output)?;
        if token.kind == TokenKind::Eof {
            break;
        }
        if let Err(e) = lexer.advance() {
            out.flush().map_err(Error::Output)?;
            return Err(e.into());
        }
    }
    out.flush().map_err(Error::Output)
}
