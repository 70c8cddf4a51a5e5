use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use prog_core::{
    environment::prelude::Environment,
    eval::prelude::Interpreter,
    parser::prelude::parse_module,
    utils::prelude::Error
};

const PROMPT: &str = ">> ";

/// One environment lives for the whole session, so bindings survive
/// between prompts and reported errors.
pub fn start() -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let env = Rc::new(RefCell::new(Environment::new()));

    loop {
        let mut input = String::from("");

        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        if stdin.read_line(&mut input)? == 0 {
            // End of input closes the session
            return Ok(());
        }

        if let Some('\n') = input.chars().next_back() {
            input.pop();
        }
        if let Some('\r') = input.chars().next_back() {
            input.pop();
        }

        match input.as_str() {
            "" => {},
            ".exit" => return Ok(()),
            line => {
                let parsed = match parse_module(line) {
                    Ok(parsed) => parsed,
                    Err(error) => {
                        report(Error::Parse {
                            path: "<repl>".into(),
                            src: line.to_string(),
                            error
                        });

                        continue;
                    }
                };

                let stdout = std::io::stdout();
                let mut output = stdout.lock();
                let mut source = stdin.lock();

                let result = Interpreter::new(&mut output, &mut source)
                    .run(&parsed.module.program, &env);

                drop(source);
                drop(output);

                if let Err(error) = result {
                    report(Error::Runtime {
                        path: "<repl>".into(),
                        src: line.to_string(),
                        error
                    });
                }
            }
        }
    }
}

fn report(error: Error) {
    let buffer_writer = crate::cli::stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    error.pretty(&mut buffer);

    buffer_writer
        .print(&buffer)
        .expect("Writing error to stderr");
}
