//! Step player: replays a script one step per tick.
//!
//! States:
//! - `Idle`: nothing scheduled. Start moves to `Playing`.
//! - `Playing`: every tick applies the next step. Reaching the end of the
//!   table moves to `Completed`.
//! - `Completed`: terminal until reset.
//!
//! Pause returns to `Idle` keeping index and state. Reset returns to
//! `Idle` with index 0 and the empty state from anywhere.

use tracing::{debug, info};

use crate::state::ExecutionState;
use crate::step::{Script, Step};

/// Result of applying the step at an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Applied(ExecutionState),
    /// The index is past the end of the table. Nothing was applied.
    Completed,
}

/// Apply the step at `index` of `script` to a copy of `state`.
pub fn advance(script: Script, state: &ExecutionState, index: usize) -> Advance {
    match script.step(index) {
        Some(step) => {
            let mut next = state.clone();
            step.apply(&mut next);
            Advance::Applied(next)
        }
        None => Advance::Completed,
    }
}

/// The all-empty state with index 0.
pub fn reset() -> (ExecutionState, usize) {
    (ExecutionState::new(), 0)
}

/// Replay the first `index` steps from a cold start.
///
/// `index` is clamped to the script length.
pub fn state_at(script: Script, index: usize) -> ExecutionState {
    let mut state = ExecutionState::new();
    for step in script.steps().iter().take(index) {
        step.apply(&mut state);
    }
    state
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Idle,
    Playing,
    Completed,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The player was not playing. Nothing changed.
    Ignored,
    /// A step was applied and more remain.
    Stepped,
    /// The last step was applied; the player is now completed.
    Finished,
}

/// Owns the execution state and the replay position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlayer {
    script: Script,
    state: ExecutionState,
    index: usize,
    status: PlayerStatus,
}

impl Default for StepPlayer {
    fn default() -> Self {
        Self::new(Script::default())
    }
}

impl StepPlayer {
    pub fn new(script: Script) -> Self {
        let (state, index) = reset();
        Self {
            script,
            state,
            index,
            status: PlayerStatus::Idle,
        }
    }

    pub fn script(&self) -> Script {
        self.script
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn total_steps(&self) -> usize {
        self.script.len()
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlayerStatus::Playing
    }

    /// The step applied most recently, if any.
    pub fn current_step(&self) -> Option<Step> {
        self.index.checked_sub(1).and_then(|i| self.script.step(i))
    }

    /// Start signal. Returns `true` if the player is now playing.
    pub fn start(&mut self) -> bool {
        if self.status == PlayerStatus::Idle {
            info!(index = self.index, script = %self.script, "player started");
            self.status = PlayerStatus::Playing;
            true
        } else {
            false
        }
    }

    /// Pause signal. Keeps index and state.
    pub fn pause(&mut self) {
        if self.status == PlayerStatus::Playing {
            info!(index = self.index, "player paused");
            self.status = PlayerStatus::Idle;
        }
    }

    /// Play/pause button: start when idle, pause when playing.
    pub fn toggle(&mut self) {
        match self.status {
            PlayerStatus::Idle => {
                self.start();
            }
            PlayerStatus::Playing => self.pause(),
            PlayerStatus::Completed => {}
        }
    }

    /// Reset signal. Valid from every status.
    pub fn reset(&mut self) {
        info!(script = %self.script, "player reset");
        let (state, index) = reset();
        self.state = state;
        self.index = index;
        self.status = PlayerStatus::Idle;
    }

    /// Reset and switch to another script.
    pub fn load(&mut self, script: Script) {
        self.script = script;
        self.reset();
    }

    /// Timer tick. Only acts while playing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != PlayerStatus::Playing {
            return TickOutcome::Ignored;
        }
        self.apply_next()
    }

    /// Manual single step while idle.
    pub fn step(&mut self) -> TickOutcome {
        if self.status != PlayerStatus::Idle {
            return TickOutcome::Ignored;
        }
        self.apply_next()
    }

    fn apply_next(&mut self) -> TickOutcome {
        match advance(self.script, &self.state, self.index) {
            Advance::Applied(next) => {
                debug!(
                    index = self.index,
                    step = ?self.script.step(self.index),
                    focus = %next.focus,
                    "step applied"
                );
                self.state = next;
                self.index += 1;
                if self.index >= self.script.len() {
                    self.complete();
                    TickOutcome::Finished
                } else {
                    TickOutcome::Stepped
                }
            }
            // Unreachable through tick/step: the Applied arm completes the
            // player on the last step, and both reject Completed. Kept so an
            // index already at the end still settles in Completed.
            Advance::Completed => {
                self.complete();
                TickOutcome::Finished
            }
        }
    }

    fn complete(&mut self) {
        info!(steps = self.index, "player completed");
        self.status = PlayerStatus::Completed;
    }

    /// "Step 3 of 12", or empty before the first step.
    pub fn progress_label(&self) -> String {
        if self.index == 0 {
            String::new()
        } else {
            format!("Step {} of {}", self.index, self.script.len())
        }
    }
}
