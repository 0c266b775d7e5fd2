//! Playback controls: play/pause, step, reset, script and delay.

use event_loop_rs::{MAX_INTERVAL_MS, MIN_INTERVAL_MS, PlayerStatus, Script};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ControlsProps {
    pub status: PlayerStatus,
    pub index: usize,
    pub total: usize,
    pub script: Script,
    pub interval_ms: u64,
    pub progress: String,
    pub on_toggle: Callback<()>,
    pub on_step: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_script: Callback<Script>,
    pub on_interval: Callback<u64>,
}

#[function_component(Controls)]
pub fn controls(props: &ControlsProps) -> Html {
    let on_toggle = {
        let cb = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_step = {
        let cb = props.on_step.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let on_script_change = {
        let cb = props.on_script.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(script) = target.value().parse::<Script>() {
                cb.emit(script);
            }
        })
    };

    let on_interval_input = {
        let cb = props.on_interval.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            if let Ok(ms) = target.value().parse::<u64>() {
                cb.emit(ms);
            }
        })
    };

    let playing = props.status == PlayerStatus::Playing;
    let completed = props.status == PlayerStatus::Completed;
    let toggle_label = if playing { "\u{23F8} Pause" } else { "\u{25B6} Play" };

    html! {
        <div class="controls">
            <button class="ctl-btn ctl-btn-play" onclick={on_toggle}
                disabled={completed}
                title="Play or pause the animation">
                { toggle_label }
            </button>
            <button class="ctl-btn ctl-btn-step" onclick={on_step}
                disabled={playing || completed}
                title="Apply the next step">
                { "Step \u{23ED}" }
            </button>
            <button class="ctl-btn ctl-btn-reset" onclick={on_reset}
                disabled={props.index == 0 && !playing}
                title="Back to step 0">
                { "Reset" }
            </button>
            <select class="script-select" onchange={on_script_change}
                title="Step ordering (resets the animation)">
                { for Script::ALL.iter().map(|script| html! {
                    <option value={script.key()} selected={*script == props.script}>
                        { script.label() }
                    </option>
                })}
            </select>
            <div class="speed-control">
                <label class="speed-label">{ "Delay:" }</label>
                <input
                    type="range"
                    class="speed-slider"
                    min={MIN_INTERVAL_MS.to_string()}
                    max={MAX_INTERVAL_MS.to_string()}
                    step="250"
                    value={props.interval_ms.to_string()}
                    oninput={on_interval_input}
                />
                <span class="speed-value">{ format!("{:.2}s", props.interval_ms as f64 / 1000.0) }</span>
            </div>
            <span class="step-counter">
                if completed {
                    { format!("Done ({} steps)", props.total) }
                } else {
                    { &props.progress }
                }
            </span>
        </div>
    }
}
