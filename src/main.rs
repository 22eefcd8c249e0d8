use lilt::environment::Environment;
use lilt::printer::{self, PrintMode};
use lilt::{cmdline, interpreter};
use std::rc::Rc;

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();
    let base = Environment::base();
    let env = Environment::spawn_from(&base);

    if let Some(path) = std::env::args().nth(1) {
        return run_file(&path, &env);
    }

    let interface = cmdline::setup()?;
    cmdline::repl(&interface, |line| {
        if line.trim().is_empty() {
            return String::new();
        }
        match interpreter::read_eval(line, Some(&env)) {
            Ok(value) => printer::pr_str(&value, PrintMode::Readable),
            Err(e) => report(&e),
        }
    });
    cmdline::save_history(&interface)
}

fn run_file(path: &str, env: &Rc<Environment>) -> std::io::Result<()> {
    let source = std::fs::read_to_string(path)?;
    // The reader returns a single top-level form, so a file is one big do.
    let program = format!("(do {})", source);
    match interpreter::read_eval(&program, Some(env)) {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{}", report(&e));
            std::process::exit(1);
        }
    }
}

fn report(error: &interpreter::Error) -> String {
    let message = format!("error: {}", error);
    if atty::is(atty::Stream::Stdout) {
        ansi_term::Colour::Red.paint(message).to_string()
    } else {
        message
    }
}
