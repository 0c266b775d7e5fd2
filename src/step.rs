//! Authored steps over the fixed example program.
//!
//! Each [`Step`] is one hand-written transition of the visualization. A
//! [`Script`] is an ordered table of steps; replaying it from the empty
//! state walks the example program through the event loop.
//!
//! Steps are positional: each one assigns the literal call stack, queues
//! and focus of its place in the table, whatever the state held before.
//! Only the console is appended to.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::state::{ExecutionState, Focus, Frame};

/// The program every script walks through. Step line numbers are 1-based
/// into this text.
pub const EXAMPLE_PROGRAM: &str = r#"console.log("Start");
setTimeout(() => {
  console.log("Timeout");
}, 0);
Promise.resolve().then(() => {
  console.log("Promise");
});
console.log("End");"#;

const GLOBAL: &str = "global()";
const LOG_START: &str = r#"console.log("Start")"#;
const SET_TIMEOUT: &str = "setTimeout(callback, 0)";
const PROMISE_THEN: &str = "Promise.resolve().then(callback)";
const LOG_END: &str = r#"console.log("End")"#;
const PROMISE_CALLBACK: &str = r#"() => console.log("Promise")"#;
const LOG_PROMISE: &str = r#"console.log("Promise")"#;
const TIMEOUT_CALLBACK: &str = r#"() => console.log("Timeout")"#;
const LOG_TIMEOUT: &str = r#"console.log("Timeout")"#;

/// One authored transition.
///
/// Steps after synchronous code carry `on_global`: whether the global
/// context is still at the bottom of the stack while they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Push the global execution context.
    PushGlobal,
    /// Run `console.log("Start")`.
    LogStart,
    /// Call `setTimeout`, queueing its callback.
    ScheduleTimeout,
    /// Call `Promise.resolve().then`, queueing its continuation.
    ScheduleMicrotask,
    /// Run `console.log("End")`.
    LogEnd,
    /// Synchronous code is done; the whole stack unwinds.
    ExitScript,
    /// Synchronous code is done; only the global context stays.
    FinishSync,
    /// The promise continuation leaves the microtask queue for the stack.
    RunMicrotask { on_global: bool },
    /// Run `console.log("Promise")` inside the continuation.
    LogPromise { on_global: bool },
    /// The continuation and its log frame return.
    FinishMicrotask { on_global: bool },
    /// The timer callback leaves the callback queue for the stack.
    RunCallback { on_global: bool },
    /// Run `console.log("Timeout")` inside the callback.
    LogTimeout { on_global: bool },
    /// The callback and its log frame return.
    FinishCallback { on_global: bool },
    /// Pop the global execution context.
    PopGlobal,
}

/// Replace stack, queues and focus with literal contents.
fn assign(
    state: &mut ExecutionState,
    stack: &[&str],
    microtasks: &[&str],
    callbacks: &[&str],
    focus: Focus,
) {
    state.stack = stack.iter().map(|l| Frame::from(*l)).collect();
    state.microtasks = microtasks.iter().map(|l| Frame::from(*l)).collect();
    state.callbacks = callbacks.iter().map(|l| Frame::from(*l)).collect();
    state.focus = focus;
}

/// `frames`, with the global context under them when `on_global` is set.
fn above_global<'a>(on_global: bool, frames: &[&'a str]) -> Vec<&'a str> {
    let base: &[&str] = if on_global { &[GLOBAL] } else { &[] };
    base.iter().chain(frames).copied().collect()
}

impl Step {
    /// Apply this step's effect to `state`.
    pub fn apply(&self, state: &mut ExecutionState) {
        use Focus::{Callback, Microtask, Stack};

        match *self {
            Step::PushGlobal => assign(state, &[GLOBAL], &[], &[], Stack),
            Step::LogStart => {
                assign(state, &[GLOBAL, LOG_START], &[], &[], Stack);
                state.console.push("Start".to_string());
            }
            Step::ScheduleTimeout => {
                assign(state, &[GLOBAL, SET_TIMEOUT], &[], &[TIMEOUT_CALLBACK], Callback)
            }
            Step::ScheduleMicrotask => assign(
                state,
                &[GLOBAL, PROMISE_THEN],
                &[PROMISE_CALLBACK],
                &[TIMEOUT_CALLBACK],
                Microtask,
            ),
            Step::LogEnd => {
                assign(
                    state,
                    &[GLOBAL, LOG_END],
                    &[PROMISE_CALLBACK],
                    &[TIMEOUT_CALLBACK],
                    Stack,
                );
                state.console.push("End".to_string());
            }
            Step::ExitScript => {
                assign(state, &[], &[PROMISE_CALLBACK], &[TIMEOUT_CALLBACK], Stack)
            }
            Step::FinishSync => assign(
                state,
                &[GLOBAL],
                &[PROMISE_CALLBACK],
                &[TIMEOUT_CALLBACK],
                Stack,
            ),
            Step::RunMicrotask { on_global } => assign(
                state,
                &above_global(on_global, &[PROMISE_CALLBACK]),
                &[],
                &[TIMEOUT_CALLBACK],
                Microtask,
            ),
            Step::LogPromise { on_global } => {
                assign(
                    state,
                    &above_global(on_global, &[PROMISE_CALLBACK, LOG_PROMISE]),
                    &[],
                    &[TIMEOUT_CALLBACK],
                    Stack,
                );
                state.console.push("Promise".to_string());
            }
            Step::FinishMicrotask { on_global } => assign(
                state,
                &above_global(on_global, &[]),
                &[],
                &[TIMEOUT_CALLBACK],
                Stack,
            ),
            Step::RunCallback { on_global } => assign(
                state,
                &above_global(on_global, &[TIMEOUT_CALLBACK]),
                &[],
                &[],
                Callback,
            ),
            Step::LogTimeout { on_global } => {
                assign(
                    state,
                    &above_global(on_global, &[TIMEOUT_CALLBACK, LOG_TIMEOUT]),
                    &[],
                    &[],
                    Stack,
                );
                state.console.push("Timeout".to_string());
            }
            Step::FinishCallback { on_global } => {
                assign(state, &above_global(on_global, &[]), &[], &[], Stack)
            }
            Step::PopGlobal => assign(state, &[], &[], &[], Stack),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::PushGlobal => "Global execution context",
            Step::LogStart => LOG_START,
            Step::ScheduleTimeout => SET_TIMEOUT,
            Step::ScheduleMicrotask => PROMISE_THEN,
            Step::LogEnd => LOG_END,
            Step::ExitScript => "Script finished",
            Step::FinishSync => "Synchronous code finished",
            Step::RunMicrotask { .. } => "Run microtask",
            Step::LogPromise { .. } => LOG_PROMISE,
            Step::FinishMicrotask { .. } => "Microtask finished",
            Step::RunCallback { .. } => "Run callback",
            Step::LogTimeout { .. } => LOG_TIMEOUT,
            Step::FinishCallback { .. } => "Callback finished",
            Step::PopGlobal => "Global context popped",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Step::PushGlobal => {
                "The script starts: the global execution context is pushed onto the call stack."
            }
            Step::LogStart => "console.log runs synchronously and prints \"Start\".",
            Step::ScheduleTimeout => {
                "setTimeout hands its callback to the timer; with a 0ms delay it lands in the callback queue."
            }
            Step::ScheduleMicrotask => {
                "The promise is already resolved, so its .then continuation goes to the microtask queue."
            }
            Step::LogEnd => "console.log runs synchronously and prints \"End\".",
            Step::ExitScript => {
                "All synchronous code has run and the call stack is empty. The event loop takes over."
            }
            Step::FinishSync => {
                "All synchronous code has run. Only the global context is left on the stack."
            }
            Step::RunMicrotask { .. } => {
                "The microtask queue is drained first: the promise continuation moves onto the stack."
            }
            Step::LogPromise { .. } => "The continuation prints \"Promise\".",
            Step::FinishMicrotask { .. } => "The continuation returns. The microtask queue is now empty.",
            Step::RunCallback { .. } => {
                "With no microtasks left, the event loop takes the timer callback from the callback queue."
            }
            Step::LogTimeout { .. } => "The timer callback prints \"Timeout\".",
            Step::FinishCallback { .. } => "The callback returns. Both queues are now empty.",
            Step::PopGlobal => "The global execution context is popped. Nothing is left to run.",
        }
    }

    /// 1-based line of [`EXAMPLE_PROGRAM`] this step highlights.
    pub fn line(&self) -> Option<usize> {
        match self {
            Step::LogStart => Some(1),
            Step::ScheduleTimeout | Step::RunCallback { .. } => Some(2),
            Step::LogTimeout { .. } => Some(3),
            Step::FinishCallback { .. } => Some(4),
            Step::ScheduleMicrotask | Step::RunMicrotask { .. } => Some(5),
            Step::LogPromise { .. } => Some(6),
            Step::FinishMicrotask { .. } => Some(7),
            Step::LogEnd => Some(8),
            Step::PushGlobal | Step::ExitScript | Step::FinishSync | Step::PopGlobal => None,
        }
    }
}

const EARLY_GLOBAL_POP: &[Step] = &[
    Step::PushGlobal,
    Step::LogStart,
    Step::ScheduleTimeout,
    Step::ScheduleMicrotask,
    Step::LogEnd,
    Step::ExitScript,
    Step::RunMicrotask { on_global: false },
    Step::LogPromise { on_global: false },
    Step::FinishMicrotask { on_global: false },
    Step::RunCallback { on_global: false },
    Step::LogTimeout { on_global: false },
    Step::FinishCallback { on_global: false },
];

const LATE_GLOBAL_POP: &[Step] = &[
    Step::PushGlobal,
    Step::LogStart,
    Step::ScheduleTimeout,
    Step::ScheduleMicrotask,
    Step::LogEnd,
    Step::FinishSync,
    Step::RunMicrotask { on_global: true },
    Step::LogPromise { on_global: true },
    Step::FinishMicrotask { on_global: true },
    Step::RunCallback { on_global: true },
    Step::LogTimeout { on_global: true },
    Step::FinishCallback { on_global: true },
    Step::PopGlobal,
];

/// An authored ordering of steps over [`EXAMPLE_PROGRAM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Script {
    /// The global context is popped as soon as synchronous code ends.
    #[default]
    EarlyGlobalPop,
    /// The global context stays under the queued work and is popped last.
    LateGlobalPop,
}

impl Script {
    pub const ALL: [Script; 2] = [Script::EarlyGlobalPop, Script::LateGlobalPop];

    pub fn steps(&self) -> &'static [Step] {
        match self {
            Script::EarlyGlobalPop => EARLY_GLOBAL_POP,
            Script::LateGlobalPop => LATE_GLOBAL_POP,
        }
    }

    pub fn len(&self) -> usize {
        self.steps().len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps().is_empty()
    }

    pub fn step(&self, index: usize) -> Option<Step> {
        self.steps().get(index).copied()
    }

    /// Short name accepted by [`Script::from_str`].
    pub fn key(&self) -> &'static str {
        match self {
            Script::EarlyGlobalPop => "early",
            Script::LateGlobalPop => "late",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Script::EarlyGlobalPop => "Global popped after sync code",
            Script::LateGlobalPop => "Global popped last",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Script {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "early" => Ok(Script::EarlyGlobalPop),
            "late" => Ok(Script::LateGlobalPop),
            _ => Err(Error::UnknownScript(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_lengths() {
        assert_eq!(Script::EarlyGlobalPop.len(), 12);
        assert_eq!(Script::LateGlobalPop.len(), 13);
    }

    #[test]
    fn test_step_out_of_range() {
        assert_eq!(
            Script::EarlyGlobalPop.step(11),
            Some(Step::FinishCallback { on_global: false })
        );
        assert_eq!(Script::EarlyGlobalPop.step(12), None);
        assert_eq!(Script::LateGlobalPop.step(12), Some(Step::PopGlobal));
    }

    #[test]
    fn test_parse_script() {
        assert_eq!("early".parse::<Script>().unwrap(), Script::EarlyGlobalPop);
        assert_eq!(" LATE ".parse::<Script>().unwrap(), Script::LateGlobalPop);
        let err = "eager".parse::<Script>().unwrap_err();
        assert!(matches!(err, Error::UnknownScript(ref s) if s == "eager"));
    }

    #[test]
    fn test_script_key_round_trips() {
        for script in Script::ALL {
            assert_eq!(script.key().parse::<Script>().unwrap(), script);
        }
    }

    #[test]
    fn test_highlighted_lines_exist_in_program() {
        let line_count = EXAMPLE_PROGRAM.lines().count();
        assert_eq!(line_count, 8);
        for script in Script::ALL {
            for step in script.steps() {
                if let Some(line) = step.line() {
                    assert!((1..=line_count).contains(&line), "{step:?} -> {line}");
                }
            }
        }
    }

    #[test]
    fn test_log_steps_highlight_their_console_call() {
        let lines: Vec<&str> = EXAMPLE_PROGRAM.lines().collect();
        for step in [
            Step::LogStart,
            Step::LogEnd,
            Step::LogPromise { on_global: false },
            Step::LogTimeout { on_global: true },
        ] {
            let line = step.line().unwrap();
            assert!(
                lines[line - 1].contains(step.title()),
                "{step:?} highlights '{}'",
                lines[line - 1]
            );
        }
    }

    #[test]
    fn test_schedule_timeout_queues_callback() {
        let mut state = ExecutionState::new();
        Step::PushGlobal.apply(&mut state);
        Step::LogStart.apply(&mut state);
        Step::ScheduleTimeout.apply(&mut state);
        assert_eq!(state.stack, vec![Frame::from(GLOBAL), Frame::from(SET_TIMEOUT)]);
        assert_eq!(state.callbacks.len(), 1);
        assert!(state.microtasks.is_empty());
        assert_eq!(state.focus, Focus::Callback);
    }

    #[test]
    fn test_run_microtask_ignores_prior_queue() {
        let mut state = ExecutionState::new();
        state.stack.push("leftover".into());
        state.microtasks.push_back("stale".into());
        state.microtasks.push_back(PROMISE_CALLBACK.into());
        Step::RunMicrotask { on_global: false }.apply(&mut state);
        assert!(state.microtasks.is_empty());
        assert_eq!(state.stack, vec![Frame::from(PROMISE_CALLBACK)]);
        assert_eq!(state.callbacks, vec![Frame::from(TIMEOUT_CALLBACK)]);
        assert_eq!(state.focus, Focus::Microtask);

        Step::RunCallback { on_global: true }.apply(&mut state);
        assert_eq!(
            state.stack,
            vec![Frame::from(GLOBAL), Frame::from(TIMEOUT_CALLBACK)]
        );
        assert!(state.callbacks.is_empty());
    }

    #[test]
    fn test_only_console_accumulates() {
        let mut state = ExecutionState::new();
        state.console.push("earlier".to_string());
        Step::LogPromise { on_global: true }.apply(&mut state);
        assert_eq!(state.console, vec!["earlier", "Promise"]);
        assert_eq!(
            state.stack,
            vec![
                Frame::from(GLOBAL),
                Frame::from(PROMISE_CALLBACK),
                Frame::from(LOG_PROMISE)
            ]
        );
    }

    #[test]
    fn test_every_step_has_description() {
        for script in Script::ALL {
            for step in script.steps() {
                assert!(!step.title().is_empty());
                assert!(step.description().ends_with('.'));
            }
        }
    }
}
