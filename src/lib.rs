//! # event-loop-rs
//!
//! A step-by-step replay of the JavaScript concurrency model.
//!
//! A fixed example program is walked through the call stack, the
//! microtask queue and the callback queue by a hand-authored table of
//! steps. There is no interpreter: every step is a fixed transition of the
//! observable [`ExecutionState`], replayed one per timer tick by the
//! [`StepPlayer`].
//!
//! ## Example
//!
//! ```
//! use event_loop_rs::{Script, StepPlayer};
//!
//! let mut player = StepPlayer::new(Script::EarlyGlobalPop);
//! player.start();
//! while player.is_playing() {
//!     player.tick();
//! }
//!
//! assert_eq!(player.state().console, ["Start", "End", "Promise", "Timeout"]);
//! ```

pub mod config;
pub mod error;
pub mod player;
pub mod state;
pub mod step;
pub mod transcript;

pub use config::{DEFAULT_INTERVAL_MS, MAX_INTERVAL_MS, MIN_INTERVAL_MS, PlayerConfig};
pub use error::{Error, Result};
pub use player::{Advance, PlayerStatus, StepPlayer, TickOutcome, advance, reset, state_at};
pub use state::{ExecutionState, Focus, Frame};
pub use step::{EXAMPLE_PROGRAM, Script, Step};
pub use transcript::{render_state, render_transcript, save_transcript, step_header};
