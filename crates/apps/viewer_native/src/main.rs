use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gpu::Renderer;
use runtime::{EventBus, EventKind, Frame, FrameLoop};
use scene::splash::Splash;
use scene::{EarthScene, Mode, SceneConfig, TransitionStatus, ViewState};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the animated Earth scene")]
struct Args {
    /// Scene config (JSON). Defaults to the stock landing scene.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds of scene time to simulate
    #[arg(long, default_value_t = 8.0)]
    seconds: f64,

    /// Frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Switch to normal mode when the splash timer runs out (default)
    #[arg(long, conflicts_with = "normal_at")]
    splash: bool,

    /// Switch to normal mode at this time instead of waiting for the splash
    #[arg(long)]
    normal_at: Option<f64>,

    /// Emit one JSON line per frame with the camera state
    #[arg(long)]
    json: bool,

    /// Dump the traced scene events as JSON when done
    #[arg(long)]
    events: bool,
}

#[derive(Serialize)]
struct FrameSample {
    frame: u64,
    time_s: f64,
    mode: Mode,
    splash_opacity: f64,
    view: ViewState,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// The mode the page reports for `frame`: the splash timer unless
/// `--normal-at` overrides it.
fn page_mode(args: &Args, splash: &Splash, frame: Frame) -> Mode {
    match args.normal_at {
        Some(at) if !args.splash && frame.time.seconds() >= at => Mode::Normal,
        Some(_) if !args.splash => Mode::Onboarding,
        _ => splash.mode(),
    }
}

/// Step the splash through `frame`, recording the frame its hold runs out.
fn advance_splash(splash: &mut Splash, frame: Frame, bus: &mut EventBus) {
    let before = splash.mode();
    let after = splash.advance(frame.dt_s);
    if before == Mode::Onboarding && after == Mode::Normal {
        bus.emit(frame, EventKind::Splash, "splash dismissed");
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            info!("loading scene config from {}", path.display());
            SceneConfig::load(path)?
        }
        None => SceneConfig::default(),
    };

    let mut splash = Splash::new(config.splash.clone());
    let mut scene = EarthScene::new(config)?;
    let mut bus = EventBus::new();
    let frames = FrameLoop::new(args.fps, args.seconds);
    info!(
        frames = frames.frame_count(),
        fps = args.fps,
        "simulating {}s of scene time",
        args.seconds
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for frame in frames {
        scene.set_mode(page_mode(args, &splash, frame), frame, &mut bus);

        if scene.update(frame, &mut bus) == TransitionStatus::Completed {
            info!(frame = frame.index, "camera transition finished");
        }
        advance_splash(&mut splash, frame, &mut bus);

        if args.json {
            let sample = FrameSample {
                frame: frame.index,
                time_s: scene.time().seconds(),
                mode: scene.mode(),
                splash_opacity: splash.opacity(),
                view: scene.view_state(),
            };
            writeln!(out, "{}", serde_json::to_string(&sample)?)?;
        }
    }

    let render = Renderer::collect(&scene);
    info!(
        commands = render.commands.len(),
        fov = render.camera.fov_y_rad.to_degrees(),
        "final frame collected"
    );

    if args.events {
        writeln!(out, "{}", serde_json::to_string_pretty(bus.events())?)?;
    }
    Ok(())
}
