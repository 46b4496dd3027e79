//! Headless runner (default binary).
//!
//! Plays one session with the autopilot through the gravity runner, logs
//! events (`RUST_LOG=debug`) and prints the final snapshot as JSON.

mod cli;

use anyhow::{Context, Result};
use log::info;

use blockfall::core::Session;
use blockfall::engine::{Autopilot, LogSink, Runner};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = cli::parse_args(&args)? else {
        println!("{}", cli::USAGE);
        return Ok(());
    };

    let config = cli::load_config(args.config.as_deref())?;
    let session = Session::new(config, args.seed).context("invalid game config")?;
    let mut runner = Runner::new(session, LogSink);

    let placed = run(&mut runner, &Autopilot::default(), args.steps);

    let session = runner.session();
    info!(
        "placed {} pieces over {} ticks: score {} lines {} level {} ({:?})",
        placed,
        runner.ticks(),
        session.score(),
        session.lines(),
        session.level(),
        session.state()
    );

    let json = serde_json::to_string_pretty(&session.snapshot())?;
    println!("{}", json);
    Ok(())
}

/// Let one gravity interval pass, then place the active piece; repeat
fn run(runner: &mut Runner<LogSink>, pilot: &Autopilot, steps: u32) -> u32 {
    let mut placed = 0;
    while placed < steps && runner.session().is_running() {
        runner.advance(runner.session().gravity_interval_ms());

        let Some(placement) = pilot.plan(runner.session()) else {
            break;
        };
        for command in placement.commands() {
            runner.submit(command);
        }
        placed += 1;
    }
    placed
}
