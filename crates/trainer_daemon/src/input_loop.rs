//! Keystrokes to command lines.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{error, info};

use crate::console::Console;
use crate::state::Runtime;

/// Longest line the prompt accepts.
const MAX_LINE: usize = 32;

/// Line buffer behind the prompt.
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Applies one key. Returns a finished command line, if this key ended one.
    /// Ctrl-C produces `exit` whatever is in the buffer.
    pub fn apply(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(code, KeyCode::Char('c' | 'C')) {
                self.buffer.clear();
                return Some("exit".to_string());
            }
            return None;
        }
        match code {
            KeyCode::Enter => {
                let line = self.buffer.trim().to_string();
                self.buffer.clear();
                (!line.is_empty()).then_some(line)
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                None
            }
            KeyCode::Char(c)
                if (c.is_ascii_graphic() || c == ' ') && self.buffer.len() < MAX_LINE =>
            {
                self.buffer.push(c);
                None
            }
            _ => None,
        }
    }
}

/// Waits for the start gate, then reads keys until the runtime stops,
/// posting each finished line to the mailbox. A terminal read error stops
/// the whole program.
pub fn run_input_loop(runtime: &Runtime, console: &Console, poll: Duration) -> io::Result<()> {
    runtime.gate.wait();
    info!("input loop started");
    let mut editor = LineEditor::default();
    let result = read_keys(runtime, console, poll, &mut editor);
    if let Err(err) = &result {
        error!(%err, "terminal input failed");
        runtime.shutdown();
    }
    info!("input loop stopped");
    result
}

fn read_keys(
    runtime: &Runtime,
    console: &Console,
    poll: Duration,
    editor: &mut LineEditor,
) -> io::Result<()> {
    while runtime.is_running() {
        if !event::poll(poll)? {
            continue;
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                if let Some(line) = editor.apply(code, modifiers) {
                    runtime.mailbox.post(line);
                }
                console.draw_prompt(editor.buffer())?;
            }
            Event::Resize(..) => runtime.request_redraw(),
            _ => {}
        }
    }
    Ok(())
}

pub fn spawn_input_loop(
    runtime: Arc<Runtime>,
    console: Arc<Console>,
    poll: Duration,
) -> io::Result<std::thread::JoinHandle<io::Result<()>>> {
    std::thread::Builder::new()
        .name("input".to_string())
        .spawn(move || run_input_loop(&runtime, &console, poll))
}
