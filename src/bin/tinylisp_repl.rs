// Line-oriented front end: reads one line at a time, dispatches it
// through parser -> compiler -> evaluator, and prints results. Each line
// stops at its first evaluation error; the session then continues with
// the next line against the same environment.

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::process::ExitCode;

use tinylisp::runtime::Interpreter;

#[derive(Parser)]
#[command(name = "tinylisp-repl")]
#[command(about = "Interactive REPL for the tinylisp language")]
struct Args {
    /// Evaluate the given source text instead of reading interactively
    #[arg(short, long)]
    expr: Option<String>,

    /// Read and evaluate lines from a file instead of interactively
    file: Option<PathBuf>,

    /// Echo parsed expressions before evaluating them
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let interpreter = Interpreter::new();

    if let Some(source) = &args.expr {
        run_lines(&interpreter, source, args.verbose);
        return ExitCode::SUCCESS;
    }

    if let Some(path) = &args.file {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("failed to read {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        };
        run_lines(&interpreter, &source, args.verbose);
        return ExitCode::SUCCESS;
    }

    run_interactive(&interpreter, args.verbose)
}

fn run_interactive(interpreter: &Interpreter, verbose: bool) -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("failed to initialize line editor: {}", err);
            return ExitCode::FAILURE;
        }
    };

    loop {
        match editor.readline("tinylisp> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                run_line(interpreter, &line, verbose);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                eprintln!("readline error: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }
}

fn run_lines(interpreter: &Interpreter, source: &str, verbose: bool) {
    for line in source.lines() {
        run_line(interpreter, line, verbose);
    }
}

/// Evaluate one line: print every result, stop the line at its first
/// error, and leave already-applied side effects in place.
fn run_line(interpreter: &Interpreter, line: &str, verbose: bool) {
    let sexps = match tinylisp::parser::parse(line) {
        Ok(sexps) => sexps,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };
    for sexp in &sexps {
        if verbose {
            println!("parsed: {}", sexp);
        }
        match interpreter.run(sexp) {
            Ok(value) => println!("{}", value),
            Err(err) => {
                println!("{}", err);
                break;
            }
        }
    }
}
