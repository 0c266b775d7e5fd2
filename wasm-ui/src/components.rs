//! UI Components for the event loop animation.

use event_loop_rs::EXAMPLE_PROGRAM;
use yew::prelude::*;

/// Example program with the current step's line highlighted.
#[derive(Properties, PartialEq)]
pub struct CodePanelProps {
    /// 1-based line to highlight.
    pub highlight: Option<usize>,
}

#[function_component(CodePanel)]
pub fn code_panel(props: &CodePanelProps) -> Html {
    html! {
        <div class="panel code-panel">
            <div class="panel-header">
                <h2>{ "Example" }</h2>
            </div>
            <div class="panel-content">
                <pre class="code">
                    { for EXAMPLE_PROGRAM.lines().enumerate().map(|(i, line)| {
                        let number = i + 1;
                        let active = props.highlight == Some(number);
                        html! {
                            <div class={classes!("code-line", active.then_some("active"))}>
                                <span class="line-number">{ number }</span>
                                <span class="line-text">{ line }</span>
                            </div>
                        }
                    })}
                </pre>
            </div>
        </div>
    }
}

/// A column of frames: the call stack or one of the queues.
#[derive(Properties, PartialEq)]
pub struct FramePanelProps {
    pub title: AttrValue,
    pub hint: AttrValue,
    /// Frames in display order.
    pub frames: Vec<String>,
    pub focused: bool,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(FramePanel)]
pub fn frame_panel(props: &FramePanelProps) -> Html {
    html! {
        <div class={classes!("panel", "frame-panel", props.class.clone(), props.focused.then_some("focused"))}>
            <div class="panel-header">
                <h2>{ props.title.clone() }</h2>
                <span class="hint">{ props.hint.clone() }</span>
            </div>
            <div class="panel-content">
                if props.frames.is_empty() {
                    <span class="no-data">{ "empty" }</span>
                } else {
                    { for props.frames.iter().map(|label| {
                        html! { <div class="frame">{ label }</div> }
                    })}
                }
            </div>
        </div>
    }
}

/// Console output lines.
#[derive(Properties, PartialEq)]
pub struct ConsolePanelProps {
    pub lines: Vec<String>,
}

#[function_component(ConsolePanel)]
pub fn console_panel(props: &ConsolePanelProps) -> Html {
    html! {
        <div class="panel console-panel">
            <div class="panel-header">
                <h2>{ "Console" }</h2>
            </div>
            <div class="panel-content">
                <pre class="console-output">
                    { for props.lines.iter().map(|line| html! { <div>{ line }</div> }) }
                </pre>
            </div>
        </div>
    }
}

/// Title and description of the step just applied.
#[derive(Properties, PartialEq)]
pub struct StepCaptionProps {
    pub title: Option<AttrValue>,
    pub description: Option<AttrValue>,
}

#[function_component(StepCaption)]
pub fn step_caption(props: &StepCaptionProps) -> Html {
    match (&props.title, &props.description) {
        (Some(title), Some(description)) => html! {
            <div class="step-caption">
                <h3 class="step-title">{ title.clone() }</h3>
                <p class="step-description">{ description.clone() }</p>
            </div>
        },
        _ => html! {
            <div class="step-caption">
                <p class="step-description hint">
                    { "Press Play to run the example, or Step to advance one transition." }
                </p>
            </div>
        },
    }
}
