use std::fs;

use clap::{Parser, ValueEnum};
use scopewalk::{Options, check_with, interpreter::parser::DEFAULT_MAX_DEPTH, regenerate_source_with,
                run_with};

/// What to do with the program once it parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Check scopes, run the program and print every variable.
    Run,
    /// Only check scopes.
    Check,
    /// Print the program back with scope-level annotations.
    Regen,
}

/// scopewalk parses, checks and runs programs written in a small Pascal
/// subset, or prints them back annotated with scope levels.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells scopewalk to read the program from a file instead of taking it
    /// inline.
    #[arg(short, long)]
    file: bool,

    /// Which pipeline to run.
    #[arg(short, long, value_enum, default_value_t = Mode::Run)]
    mode: Mode,

    /// How deeply the program may nest.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    contents: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let options = Options { max_depth: args.max_depth };
    let outcome = match args.mode {
        Mode::Run => run_with(&source, options).map(|store| {
                                                    for (name, value) in store {
                                                        println!("{name} = {value}");
                                                    }
                                                }),
        Mode::Check => check_with(&source, options).map(|_| ()),
        Mode::Regen => regenerate_source_with(&source, options).map(|text| println!("{text}")),
    };

    if let Err(e) = outcome {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
