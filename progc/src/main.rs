mod cli;
mod repl;
mod rlpl;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use prog_core::{
    environment::prelude::Environment,
    eval::prelude::run_file,
    parser::prelude::parse_module,
    utils::prelude::Error
};

#[derive(Parser)]
enum Command {
    /// Runs a source file
    Run {
        /// Path of source file
        path: PathBuf,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Parses a source file and prints it back
    Parse {
        /// Path of source file
        path: PathBuf,
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
}

fn main() {
    match Command::parse() {
        Command::Run { path } => run_command(path),
        Command::Repl => {
            let _ = repl::start();
        },
        Command::Parse { path, print_ast } => parse_command(path, print_ast),
        Command::Rlpl => {
            let _ = rlpl::start();
        }
    }
}

fn run_command(path: PathBuf) {
    let interrupted = Arc::new(AtomicBool::new(false));

    {
        let interrupted = Arc::clone(&interrupted);
        let _ = ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst));
    }

    cli::print_running(&path.to_string_lossy());
    let start = std::time::Instant::now();

    let env = Rc::new(RefCell::new(Environment::new()));
    let check = move || interrupted.load(Ordering::SeqCst);

    if let Err(err) = run_file(path, &env, Some(Box::new(check))) {
        print_error(&err);
        std::process::exit(1);
    }

    cli::print_finished(std::time::Instant::now() - start);
}

fn parse_command(path: PathBuf, print_ast: bool) {
    cli::print_parsing(&path.to_string_lossy());
    let start = std::time::Instant::now();

    let src = match std::fs::read_to_string(&path) {
        Ok(src) => src,
        Err(err) => {
            print_error(&Error::StdIo { err: err.kind() });
            std::process::exit(1);
        }
    };

    match parse_module(&src) {
        Ok(parsed) => {
            if print_ast {
                println!("{:#?}", parsed.module.program);
            } else {
                println!("{}", parsed.module.program);
            }
        },
        Err(error) => {
            print_error(&Error::Parse { path, src, error });
            std::process::exit(1);
        }
    }

    cli::print_parsed(std::time::Instant::now() - start);
}

fn print_error(error: &Error) {
    let buffer_writer = cli::stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    error.pretty(&mut buffer);

    buffer_writer
        .print(&buffer)
        .expect("Writing error to stderr");
}
