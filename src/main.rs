//! Sky Hop headless runner
//!
//! Runs the autopilot against the simulation with a logging render sink.
//! Usage: sky-hop [--seed N] [--frames N] [--tuning PATH] [--realtime]

use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use sky_hop::Tuning;
use sky_hop::platform::{LogSink, NoInput, Runner};
use sky_hop::sim::GameState;

#[derive(Debug)]
struct Args {
    seed: Option<u64>,
    frames: u64,
    tuning: Option<String>,
    realtime: bool,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args {
        seed: None,
        frames: 3600,
        tuning: None,
        realtime: false,
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => args.seed = Some(it.next().ok_or("--seed needs a value")?.parse()?),
            "--frames" => args.frames = it.next().ok_or("--frames needs a value")?.parse()?,
            "--tuning" => args.tuning = Some(it.next().ok_or("--tuning needs a path")?),
            "--realtime" => args.realtime = true,
            other => return Err(format!("unknown argument: {}", other).into()),
        }
    }
    Ok(args)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = parse_args()?;

    let tuning = match &args.tuning {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            Tuning::from_json(&std::fs::read_to_string(path)?)?
        }
        None => Tuning::default(),
    };

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Sky Hop (headless) starting, seed {}", seed);

    let mut runner = Runner::new(GameState::new(tuning, seed)?).idle(true);
    if args.realtime {
        runner = runner.realtime();
    }

    let mut sink = LogSink::default();
    runner.run(&mut NoInput, &mut sink, Some(args.frames));

    log::info!(
        "Stopped after {} frames: phase {:?}, score {}, {} platforms live",
        runner.frames(),
        runner.state.phase,
        runner.state.score,
        runner.state.platforms.len()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web shell; the library is the deliverable there
}
