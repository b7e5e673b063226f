//! Terminal Flappy Bird (default binary).
//!
//! Click (or press space) to flap, dodge the pipes, click RESTART after a
//! crash. `q` or `Esc` quits.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use flappy_arcade::clock::FrameClock;
use flappy_arcade::input::InputState;
use flappy_arcade::render::PixelBuf;
use flappy_arcade::scene::Scene;
use flappy_arcade::term::{self, TerminalSession};
use flappy_arcade::{Config, Game};

#[derive(Parser, Debug)]
#[command(about = "Flappy Bird in the terminal", version)]
struct Args {
    /// TOML file overriding any of the default tuning values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for pipe offsets (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Override the frame rate from the config
    #[arg(long)]
    fps: Option<u32>,
    /// Write logs here; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut cfg = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(fps) = args.fps {
        cfg.timing.fps = fps;
        cfg.validate().context("invalid --fps")?;
    }

    if args.print_config {
        print!("{}", cfg.to_toml_string()?);
        return Ok(());
    }

    let game = match args.seed {
        Some(seed) => Game::new(cfg, seed),
        None => Game::from_entropy(cfg),
    };

    let mut session = TerminalSession::enter().context("entering raw terminal mode")?;
    let result = run(&mut session, game);

    // Always try to restore terminal state.
    let _ = session.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(session: &mut TerminalSession, mut game: Game) -> Result<()> {
    let (pw, ph) = session.pixel_size()?;
    let mut buf = PixelBuf::new(pw, ph);
    let scene = Scene::new(game.config());
    let mut input = InputState::new();
    let mut clock = FrameClock::new(game.config().timing.fps);
    info!(pw, ph, fps = game.config().timing.fps, "session started");

    loop {
        let mut viewport = Scene::viewport(game.config(), &buf);
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Resize(cols, rows) => {
                    let (npw, nph) = term::pixel_size(cols, rows);
                    buf.resize(npw, nph);
                    // Mouse events later in this batch map through the new size.
                    viewport = Scene::viewport(game.config(), &buf);
                    debug!(pw = npw, ph = nph, "resized");
                }
                other => input.handle(&other, &viewport),
            }
        }

        let frame = input.frame();
        if frame.quit {
            info!(score = game.score(), best = game.best(), "quit");
            return Ok(());
        }

        game.tick(clock.now_ms(), &frame);

        scene.draw(&game, &mut buf);
        buf.render(session.out())?;

        clock.wait();
    }
}
