//! Interactive session
//!
//! Lines accumulate in a buffer until every `{` is closed, then the buffer
//! runs as one unit in the same VM, so definitions persist between entries.

use crate::repl_helper::{brace_depth, ReplHelper};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use tracing::{debug, warn};
use tulip_vm::builtins::create_builtin_registry;
use tulip_vm::{Value, Vm};

const PROMPT: &str = ">>> ";
const CONTINUATION: &str = "... ";

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tulip_history"))
}

pub fn run(vm: &mut Vm) -> Result<()> {
    let names = create_builtin_registry()
        .iter()
        .map(|builtin| builtin.name.clone())
        .chain(["math".to_string(), "args".to_string()])
        .collect::<Vec<_>>();

    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new(names)));

    let history = history_path();
    if let Some(path) = &history {
        if let Err(err) = rl.load_history(path) {
            debug!("no history loaded from {}: {}", path.display(), err);
        }
    }

    println!("TulipScript {} (Ctrl-D to exit)", env!("CARGO_PKG_VERSION"));

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { PROMPT } else { CONTINUATION };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                warn!("line editor failed: {}", err);
                break;
            }
        };

        if buffer.is_empty() && line.trim().is_empty() {
            continue;
        }
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }
        buffer.push_str(&line);
        buffer.push('\n');

        match brace_depth(&buffer) {
            depth if depth > 0 => continue,
            depth if depth < 0 => {
                eprintln!("Unmatched '}}'.");
                buffer.clear();
                continue;
            }
            _ => {}
        }

        match vm.run(&buffer, "<repl>") {
            Ok(Value::Null) => {}
            Ok(value) => println!("{}", value),
            Err(err) => eprintln!("{}", err),
        }
        buffer.clear();
    }

    if let Some(path) = &history {
        if let Err(err) = rl.save_history(path) {
            warn!("cannot save history to {}: {}", path.display(), err);
        }
    }
    Ok(())
}
