use std::{fs, path::PathBuf};

use clap::Parser;
use exprewrite::{
    config::Config,
    error::Error,
    interpreter::{
        rewrite::loader::COMMENT_MARKER,
        session::{Outcome, Session, definition::DEFINITION_OPERATOR},
    },
};
use tracing_subscriber::EnvFilter;

/// exprewrite evaluates and simplifies mathematical expressions, with
/// user-defined functions and constants.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells exprewrite to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints the simplified expression instead of its value.
    #[arg(short, long)]
    simplify: bool,

    /// Replaces the default simplification rules with a rule file.
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Maximum number of rule applications per ruleset pass.
    #[arg(short, long)]
    ceiling: Option<usize>,

    /// Logs rule applications and definitions to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Pipe mode only prints the value of the last line of the script.
    #[arg(short, long)]
    pipe_mode: bool,

    contents: String,
}

fn read_or_exit(path: &str, what: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| {
                                eprintln!("Failed to read the {what} '{path}'. Perhaps this file does not exist?");
                                std::process::exit(1);
                            })
}

fn run(session: &mut Session, script: &str, args: &Args) -> Result<(), Error> {
    let mut last = None;

    for line in script.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        if args.simplify && !line.contains(DEFINITION_OPERATOR) {
            let tree = session.simplify(line)?;
            println!("{}", session.render(&tree));
            continue;
        }
        if let Outcome::Value(value) = session.execute(line)? {
            if args.pipe_mode {
                last = Some(value);
            } else {
                println!("{value}");
            }
        }
    }

    if let Some(value) = last {
        println!("{value}");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                                                  EnvFilter::new(default_level)
                                              }))
                             .with_writer(std::io::stderr)
                             .init();

    let mut config = Config::default();
    if let Some(ceiling) = args.ceiling {
        config = config.with_rewrite_ceiling(ceiling);
    }
    let mut session = Session::new(config);

    if let Some(path) = &args.rules {
        let text = read_or_exit(&path.to_string_lossy(), "rule file");
        for error in session.load_rules(&text) {
            eprintln!("{error}");
        }
    }

    let script = if args.file {
        read_or_exit(&args.contents, "input file")
    } else {
        args.contents.clone()
    };

    if let Err(e) = run(&mut session, &script, &args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
