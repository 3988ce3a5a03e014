use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter},
    path::PathBuf,
    process::ExitCode,
};

use clap::{ArgAction, Parser};
use core_interp::{
    config::Config,
    error::Error,
    interpreter::{parser::parse, tree::DEFAULT_CAPACITY},
    logging, run,
};
use tracing::debug;

/// core-interp parses a Core program, pretty-prints it, and executes it
/// against a file of input integers.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The Core program to run.
    source: PathBuf,

    /// Whitespace-separated integers consumed by the program's `read`
    /// statements.
    data: PathBuf,

    /// Increase logging verbosity (-v: debug, -vv+: trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Maximum number of nodes in the syntax tree.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CAPACITY)]
    max_nodes: usize,

    /// Skip printing the program before executing it.
    #[arg(long)]
    no_print: bool,

    /// Write the syntax tree to standard error, one node per line.
    #[arg(long)]
    dump_tree: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match drive(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        },
    }
}

fn drive(args: &Args) -> Result<(), Error> {
    let source = fs::read_to_string(&args.source).map_err(|source| Error::Open { path: args.source
                                                                                          .clone(),
                                                                                   source })?;
    let parsed = parse(&source, args.max_nodes)?;
    if args.dump_tree {
        eprint!("{}", parsed.tree);
    }

    let data = File::open(&args.data).map_err(|source| Error::Open { path: args.data.clone(),
                                                                      source })?;
    let config = Config { max_nodes: args.max_nodes,
                          print:     !args.no_print, };
    let stats = run(&parsed,
                    BufReader::new(data),
                    BufWriter::new(io::stdout().lock()),
                    &config)?;
    debug!(?stats, "done");
    Ok(())
}
