//! Main application component.

use event_loop_rs::config::clamp_interval;
use event_loop_rs::{Focus, PlayerConfig, PlayerStatus, Script, StepPlayer, TickOutcome};
use gloo::console;
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use crate::components::{CodePanel, ConsolePanel, FramePanel, StepCaption};
use crate::controls::Controls;

/// User and timer signals the app reacts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Signal {
    Toggle,
    Step,
    Reset,
    Tick,
    SelectScript(Script),
    SetInterval(u64),
}

/// Main application state.
#[derive(Clone, PartialEq)]
pub struct AppState {
    pub player: StepPlayer,
    /// Delay between ticks in milliseconds.
    pub interval_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        let config = PlayerConfig::default();
        Self {
            player: StepPlayer::new(config.script),
            interval_ms: config.interval_ms(),
        }
    }
}

impl AppState {
    /// Apply a signal. Returns what a tick did, for logging.
    pub fn handle(&mut self, signal: Signal) -> Option<TickOutcome> {
        match signal {
            Signal::Toggle => self.player.toggle(),
            Signal::Step => return Some(self.player.step()),
            Signal::Reset => self.player.reset(),
            Signal::Tick => return Some(self.player.tick()),
            Signal::SelectScript(script) => self.player.load(script),
            Signal::SetInterval(ms) => self.interval_ms = clamp_interval(ms),
        }
        None
    }

    /// Frame labels, stack top-first.
    fn stack_labels(&self) -> Vec<String> {
        self.player
            .state()
            .stack_top_first()
            .map(|f| f.label().to_string())
            .collect()
    }

    fn microtask_labels(&self) -> Vec<String> {
        self.player
            .state()
            .microtasks
            .iter()
            .map(|f| f.label().to_string())
            .collect()
    }

    fn callback_labels(&self) -> Vec<String> {
        self.player
            .state()
            .callbacks
            .iter()
            .map(|f| f.label().to_string())
            .collect()
    }
}

/// Build a callback that applies `signal` to the shared state.
fn signal_callback<IN: 'static>(
    state: &UseStateHandle<AppState>,
    signal: impl Fn(IN) -> Signal + 'static,
) -> Callback<IN> {
    let state = state.clone();
    Callback::from(move |input: IN| {
        let signal = signal(input);
        console::log!(format!("{signal:?}"));
        let mut new_state = (*state).clone();
        new_state.handle(signal);
        state.set(new_state);
    })
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(AppState::default);

    let on_toggle = signal_callback(&state, |_: ()| Signal::Toggle);
    let on_step = signal_callback(&state, |_: ()| Signal::Step);
    let on_reset = signal_callback(&state, |_: ()| Signal::Reset);
    let on_script = signal_callback(&state, Signal::SelectScript);
    let on_interval = signal_callback(&state, Signal::SetInterval);

    // Playback timer: at most one Timeout is pending. Any change to status,
    // index or delay cancels it in cleanup and schedules a fresh one.
    {
        let state = state.clone();
        let status = state.player.status();
        let index = state.player.index();
        let interval_ms = state.interval_ms;

        use_effect_with(
            (status, index, interval_ms),
            move |(status, _index, interval_ms)| {
                let timeout_handle: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

                if *status == PlayerStatus::Playing {
                    let state = state.clone();
                    let handle = Timeout::new(*interval_ms as u32, move || {
                        let mut new_state = (*state).clone();
                        if new_state.handle(Signal::Tick) == Some(TickOutcome::Finished) {
                            console::log!("replay finished");
                        }
                        state.set(new_state);
                    });
                    *timeout_handle.borrow_mut() = Some(handle);
                }

                let cleanup_handle = timeout_handle.clone();
                move || {
                    if let Some(handle) = cleanup_handle.borrow_mut().take() {
                        handle.cancel();
                    }
                }
            },
        );
    }

    let player = &state.player;
    let focus = player.state().focus;
    let current = player.current_step();

    html! {
        <div class="app">
            <header class="header">
                <div class="header-left">
                    <h1>{ "event-loop-rs" }</h1>
                    <p class="subtitle">{ "Call Stack, Microtasks and the Callback Queue" }</p>
                </div>
            </header>

            <main class="main">
                <Controls
                    status={player.status()}
                    index={player.index()}
                    total={player.total_steps()}
                    script={player.script()}
                    interval_ms={state.interval_ms}
                    progress={player.progress_label()}
                    on_toggle={on_toggle}
                    on_step={on_step}
                    on_reset={on_reset}
                    on_script={on_script}
                    on_interval={on_interval}
                />

                <StepCaption
                    title={current.map(|s| AttrValue::from(s.title()))}
                    description={current.map(|s| AttrValue::from(s.description()))}
                />

                <div class="panels">
                    <CodePanel highlight={current.and_then(|s| s.line())} />

                    <FramePanel
                        title="Call Stack"
                        hint="top first"
                        class={classes!("stack-panel")}
                        frames={state.stack_labels()}
                        focused={focus == Focus::Stack}
                    />

                    <div class="queues">
                        <FramePanel
                            title="Microtask Queue"
                            hint="drained first"
                            class={classes!("microtask-panel")}
                            frames={state.microtask_labels()}
                            focused={focus == Focus::Microtask}
                        />
                        <FramePanel
                            title="Callback Queue"
                            hint="timers, I/O"
                            class={classes!("callback-panel")}
                            frames={state.callback_labels()}
                            focused={focus == Focus::Callback}
                        />
                    </div>

                    <ConsolePanel lines={player.state().console.clone()} />
                </div>
            </main>

            <footer class="footer">
                <div class="footer-row">
                    <span>{ "Fixed example program | Hand-authored steps | No interpreter" }</span>
                </div>
                <div class="footer-row">
                    <span class="footer-left">{ "MIT License" }</span>
                    <span class="footer-build">
                        { format!("Build: {}@{} {}", env!("BUILD_HOST"), env!("BUILD_COMMIT"), env!("BUILD_TIMESTAMP")) }
                    </span>
                </div>
            </footer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_loop_rs::{DEFAULT_INTERVAL_MS, MAX_INTERVAL_MS, MIN_INTERVAL_MS};

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.interval_ms, DEFAULT_INTERVAL_MS);
        assert_eq!(state.player.status(), PlayerStatus::Idle);
        assert_eq!(state.player.index(), 0);
    }

    #[test]
    fn test_tick_ignored_until_toggled() {
        let mut state = AppState::default();
        assert_eq!(state.handle(Signal::Tick), Some(TickOutcome::Ignored));
        state.handle(Signal::Toggle);
        assert_eq!(state.handle(Signal::Tick), Some(TickOutcome::Stepped));
        assert_eq!(state.player.index(), 1);
    }

    #[test]
    fn test_play_to_completion() {
        let mut state = AppState::default();
        state.handle(Signal::Toggle);
        let mut ticks = 0;
        while state.player.is_playing() {
            state.handle(Signal::Tick);
            ticks += 1;
        }
        assert_eq!(ticks, state.player.total_steps());
        assert_eq!(state.player.status(), PlayerStatus::Completed);
        assert_eq!(
            state.player.state().console,
            vec!["Start", "End", "Promise", "Timeout"]
        );
    }

    #[test]
    fn test_select_script_resets() {
        let mut state = AppState::default();
        state.handle(Signal::Step);
        state.handle(Signal::Step);
        state.handle(Signal::SelectScript(Script::LateGlobalPop));
        assert_eq!(state.player.script(), Script::LateGlobalPop);
        assert_eq!(state.player.index(), 0);
    }

    #[test]
    fn test_interval_clamped() {
        let mut state = AppState::default();
        state.handle(Signal::SetInterval(1));
        assert_eq!(state.interval_ms, MIN_INTERVAL_MS);
        state.handle(Signal::SetInterval(u64::MAX));
        assert_eq!(state.interval_ms, MAX_INTERVAL_MS);
    }

    #[test]
    fn test_labels_follow_display_order() {
        let mut state = AppState::default();
        for _ in 0..5 {
            state.handle(Signal::Step);
        }
        assert_eq!(
            state.stack_labels(),
            vec![r#"console.log("End")"#.to_string(), "global()".to_string()]
        );
        assert_eq!(state.microtask_labels().len(), 1);
        assert_eq!(state.callback_labels().len(), 1);
    }
}
