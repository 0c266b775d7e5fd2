//! The observable state bag rendered at every step.

use std::collections::VecDeque;
use std::fmt;

/// A named unit of displayed work. Only the label matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame(String);

impl Frame {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Frame {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which part of the runtime the current step is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    #[default]
    Stack,
    Microtask,
    Callback,
}

impl Focus {
    pub fn name(&self) -> &'static str {
        match self {
            Focus::Stack => "stack",
            Focus::Microtask => "microtask",
            Focus::Callback => "callback",
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Call stack, both task queues, console output and the focus marker.
///
/// `stack` is stored bottom-first; use [`ExecutionState::stack_top_first`]
/// for display order. Both queues are stored front-first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionState {
    pub stack: Vec<Frame>,
    pub microtasks: VecDeque<Frame>,
    pub callbacks: VecDeque<Frame>,
    pub console: Vec<String>,
    pub focus: Focus,
}

impl ExecutionState {
    /// The all-empty state every replay starts from.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
            && self.microtasks.is_empty()
            && self.callbacks.is_empty()
            && self.console.is_empty()
    }

    pub fn stack_top_first(&self) -> impl Iterator<Item = &Frame> {
        self.stack.iter().rev()
    }
}
