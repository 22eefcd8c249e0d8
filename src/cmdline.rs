use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::path::PathBuf;

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("lilt")?;
    interface.set_prompt("ƒ ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    }
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|mut path| {
        path.push(".lilt_history");
        path
    })
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

pub fn repl<T: Terminal>(interface: &Interface<T>, mut processor: impl FnMut(&str) -> String) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                interface.add_history_unique(line.clone());
                let output = processor(&line);
                if !output.is_empty() {
                    writeln!(interface, "{}", output).ok();
                }
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}
