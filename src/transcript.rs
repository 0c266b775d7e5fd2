//! Plain-text rendering of replay states, used by `loop-replay`.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::player::state_at;
use crate::state::{ExecutionState, Frame};
use crate::step::Script;

const EMPTY: &str = "(empty)";

fn frame_list<'a>(frames: impl Iterator<Item = &'a Frame>) -> String {
    let labels: Vec<&str> = frames.map(Frame::label).collect();
    if labels.is_empty() {
        EMPTY.to_string()
    } else {
        labels.join(" | ")
    }
}

/// Render one state. The stack is listed top-first, queues front-first.
pub fn render_state(state: &ExecutionState) -> String {
    let console = if state.console.is_empty() {
        EMPTY.to_string()
    } else {
        state.console.join(", ")
    };
    format!(
        "  stack:      {}\n  microtasks: {}\n  callbacks:  {}\n  console:    {console}\n  focus:      {}\n",
        frame_list(state.stack_top_first()),
        frame_list(state.microtasks.iter()),
        frame_list(state.callbacks.iter()),
        state.focus,
    )
}

/// Header line for step `index` (0-based) of `script`.
pub fn step_header(script: Script, index: usize) -> String {
    let title = script.step(index).map(|s| s.title()).unwrap_or("");
    format!("[{}/{}] {}", index + 1, script.len(), title)
}

/// Render every step of `script` with the state after it.
pub fn render_transcript(script: Script) -> String {
    let mut out = String::new();
    for (i, step) in script.steps().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{}\n  {}\n",
            step_header(script, i),
            step.description()
        ));
        out.push_str(&render_state(&state_at(script, i + 1)));
    }
    out
}

/// Write a transcript, creating missing parent directories.
pub fn save_transcript(path: &Path, text: &str) -> Result<()> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, text).map_err(io_err)
}
