//! CLI tool to replay the event loop walkthrough in the terminal.
//!
//! Usage:
//!   loop-replay
//!   loop-replay --script late --interval-ms 500
//!   loop-replay --script early -o transcript.txt

use std::path::PathBuf;
use std::process;
use std::thread;

use clap::Parser;
use event_loop_rs::{
    PlayerConfig, Script, StepPlayer, TickOutcome, render_state, render_transcript,
    save_transcript, step_header,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Replay the event loop walkthrough one step per tick.
#[derive(Parser)]
#[command(name = "loop-replay")]
struct Cli {
    /// Step ordering to replay: early or late
    #[arg(short, long, default_value = "early")]
    script: Script,

    /// Delay between ticks in milliseconds
    #[arg(short, long, default_value_t = event_loop_rs::DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// Write the full transcript to a file instead of replaying
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not wait between ticks
    #[arg(long)]
    instant: bool,

    /// Log every applied step on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// `RUST_LOG` when it parses, the verbosity default otherwise.
fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)))
}

fn init_tracing(verbose: bool) {
    let filter = log_filter(verbose);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match PlayerConfig::new(cli.interval_ms, cli.script) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Some(path) = &cli.output {
        let text = render_transcript(config.script);
        if let Err(e) = save_transcript(path, &text) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
        eprintln!(
            "Wrote {} steps ({}) to {}",
            config.script.len(),
            config.script.label(),
            path.display()
        );
        return;
    }

    replay(config, cli.instant);
}

fn replay(config: PlayerConfig, instant: bool) {
    let mut player = StepPlayer::new(config.script);
    println!("Script: {} ({} steps)", config.script.label(), player.total_steps());
    println!();
    print!("{}", render_state(player.state()));

    player.start();
    loop {
        if !instant {
            thread::sleep(config.interval);
        }
        let index = player.index();
        let outcome = player.tick();
        debug!(?outcome, "tick");
        if outcome == TickOutcome::Ignored {
            break;
        }
        if let Some(step) = player.current_step() {
            println!();
            println!("{}", step_header(config.script, index));
            println!("  {}", step.description());
            print!("{}", render_state(player.state()));
        }
        if outcome == TickOutcome::Finished {
            break;
        }
    }
}
