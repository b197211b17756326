//! Headless runner: drives a session with simulated hands and logs what the
//! cloud is doing.
//!
//! ```text
//! particle-genesis [config.json] [--shape NAME] [--count N] [--seconds N]
//!                  [--cycle-shapes] [--no-camera] [--save PATH]
//! ```
//!
//! Set `RUST_LOG=debug` for regeneration details.

use particle_genesis::prelude::*;
use std::error::Error;

const USAGE: &str = "Usage: particle-genesis [config.json] [--shape NAME] [--count N] \
                     [--seconds N] [--cycle-shapes] [--no-camera] [--save PATH]";

/// Seconds between shape switches with `--cycle-shapes`.
const SHAPE_CYCLE_SECS: f32 = 5.0;

#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    shape: Option<String>,
    count: Option<usize>,
    seconds: Option<f32>,
    cycle_shapes: bool,
    no_camera: bool,
    save_path: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("{} needs a value", arg));
        match arg.as_str() {
            "--shape" => args.shape = Some(value()?),
            "--count" => {
                let raw = value()?;
                args.count = Some(raw.parse().map_err(|_| format!("bad count '{}'", raw))?);
            }
            "--seconds" => {
                let raw = value()?;
                args.seconds = Some(raw.parse().map_err(|_| format!("bad duration '{}'", raw))?);
            }
            "--save" => args.save_path = Some(value()?),
            "--cycle-shapes" => args.cycle_shapes = true,
            "--no-camera" => args.no_camera = true,
            other if other.starts_with("--") => return Err(format!("unknown flag '{}'", other)),
            path => args.config_path = Some(path.to_string()),
        }
    }
    Ok(args)
}

fn build_config(args: &Args) -> Result<ParticleConfig, Box<dyn Error>> {
    let mut config = match &args.config_path {
        Some(path) => ParticleConfig::load(path)?,
        None => ParticleConfig::default(),
    };
    if let Some(shape) = &args.shape {
        config.shape = shape.parse()?;
    }
    if let Some(count) = args.count {
        config.count = count;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = build_config(&args)?;
    if let Some(path) = &args.save_path {
        config.save(path)?;
        log::info!("Saved config to {}", path);
    }

    let detector: Result<Box<dyn LandmarkDetector>, DetectorError> = if args.no_camera {
        Err(DetectorError::CameraUnavailable("disabled with --no-camera".into()))
    } else {
        Ok(Box::new(SimulatedHands::default()))
    };

    let settings = SessionSettings::default();
    let max_frames = args
        .seconds
        .map(|secs| (secs.max(0.0) * settings.target_fps) as u64);

    let mut session = Session::start(config, detector, settings)?;

    let mut shapes = ShapeKind::ALL.into_iter().cycle();
    let mut next_report = 1.0;
    let mut next_shape = SHAPE_CYCLE_SECS;
    let mut failure = None;

    session.run(max_frames, |time, session| {
        if time.elapsed >= next_report {
            next_report += 1.0;
            log::info!(
                "t={:5.1}s fps={:5.1} hands={:<3} expansion={:.3} extent={:.2}",
                time.elapsed,
                session.fps(),
                if session.hands_present() { "yes" } else { "no" },
                session.gestures().current_expansion(),
                session.system().extent(),
            );
        }

        if args.cycle_shapes && time.elapsed >= next_shape {
            next_shape += SHAPE_CYCLE_SECS;
            let shape = shapes
                .find(|&shape| shape != session.config().shape)
                .unwrap_or_default();
            if let Err(e) = session.apply(&ConfigUpdate::shape(shape)) {
                failure = Some(e);
                return ControlFlow::Break(());
            }
            log::info!("Switched to {}", shape);
        }
        ControlFlow::Continue(())
    });

    session.stop();
    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
