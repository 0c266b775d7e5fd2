//! Web UI for event-loop-rs
//!
//! A Yew-based animation of the JavaScript event loop: call stack,
//! microtask queue, callback queue and console, stepped on a timer.

mod app;
mod components;
mod controls;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Mount the Yew app
    yew::Renderer::<app::App>::new().render();
}
