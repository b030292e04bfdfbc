use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};
use tracing::Level;

use littlelisp::{run, Environment, ParserState, Tokenizer};

/// littlelisp is a tiny interpreter for a parenthesized, Lisp-like language
/// with closures, `let` and `if`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Trace every function call and its result on stderr.
    #[arg(short, long)]
    debug: bool,

    /// Runs the given source file instead of starting the interactive prompt.
    #[arg(short, long)]
    source_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.debug { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match args.source_file {
        Some(path) => run_script(&path),
        None => match run_repl() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {err}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_script(path: &Path) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };
    match run(&source, None) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run_repl() -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    let env = Environment::library();
    let mut tokenizer = Tokenizer::new();
    let mut source = String::new();
    let mut pending = false;

    loop {
        let readline = rl.readline(if pending { "... " } else { "> " });
        match readline {
            Ok(line) => {
                if line.trim().is_empty() && !pending {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                source.push_str(&line);
                source.push('\n');

                match tokenizer.tokenize(std::iter::once(line)) {
                    ParserState::ContinuationNeeded => {
                        pending = true;
                        continue;
                    }
                    ParserState::Error(err) => {
                        eprintln!("{err}");
                        tokenizer = Tokenizer::new();
                        source.clear();
                        pending = false;
                        continue;
                    }
                    ParserState::Ok => {}
                }

                pending = false;
                tokenizer = Tokenizer::new();
                let result = run(&source, Some(&env));
                source.clear();
                match result {
                    Ok(value) => println!("{value}"),
                    Err(err) => eprintln!("{err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
