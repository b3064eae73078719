//! Flappy Demo entry point
//!
//! Headless native demo: the autopilot plays a few runs at the target tick
//! rate while frames go to the log or to stdout as JSON lines.

use clap::Parser;

use flappy_demo::Settings;
use flappy_demo::platform::{NoActivation, SystemClock};
use flappy_demo::renderer::{JsonRenderer, LogRenderer, Renderer};
use flappy_demo::runner::{RunOptions, run};
use flappy_demo::sim::Game;

#[derive(Parser)]
#[command(name = "flappy-demo")]
#[command(about = "Watch the autopilot fly through the tubes")]
struct Args {
    /// JSON settings file (missing fields use defaults)
    #[arg(short, long)]
    settings: Option<String>,

    /// Seed for tube heights
    #[arg(long)]
    seed: Option<u64>,

    /// Number of runs before exiting
    #[arg(short, long, default_value_t = 3)]
    runs: u32,

    /// Emit every frame as a JSON line on stdout
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => match Settings::load_from_path(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.max_runs = Some(args.runs.max(1));

    let mut game = match Game::new(settings) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    log::info!("Flappy Demo starting ({} runs)", args.runs.max(1));

    let mut renderer: Box<dyn Renderer> = if args.json {
        Box::new(JsonRenderer::new(std::io::stdout().lock()))
    } else {
        Box::new(LogRenderer::new())
    };
    let options = RunOptions {
        idle_mode: true,
        max_ticks: None,
    };

    let summary = run(
        &mut game,
        &mut NoActivation,
        &SystemClock::new(),
        renderer.as_mut(),
        &options,
    );

    log::info!(
        "Finished {} run(s) in {} ticks, best score {}",
        summary.runs_finished,
        summary.ticks,
        summary.highest_score
    );
}
