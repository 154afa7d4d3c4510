mod board;
mod config;
mod console;
mod input_loop;
mod main_loop;
mod mascot;
mod screen;
mod state;
mod tick_loop;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{execute, terminal};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::prelude::*;
use trainer_control::{shared_devices, snapshot_devices, Game, SharedDevices};
use trainer_core::{DeviceRegistry, GameConfig};

use crate::board::StatusBoard;
use crate::config::Overrides;
use crate::console::Console;
use crate::mascot::Mascot;
use crate::screen::Layout;
use crate::state::Runtime;

/// Key reads wait at most this long, so the input loop notices shutdown quickly.
const INPUT_POLL: Duration = Duration::from_millis(10);

#[derive(Parser)]
#[command(name = "trainer", about = "Equipment fault diagnosis trainer")]
struct Cli {
    /// JSON game config. Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Device drift interval in milliseconds.
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Main loop poll interval in milliseconds.
    #[arg(long)]
    poll_ms: Option<u64>,
    /// Device to put on the board, by name. Repeatable; order is board order.
    #[arg(long = "device", value_name = "NAME")]
    devices: Vec<String>,
    /// Write logs here. Logging is off without it, since stdout is the game screen.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file: {}", path.display()))?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

/// Raw mode and the alternate screen for as long as this lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("switching terminal to raw mode")?;
        let guard = Self;
        execute!(io::stdout(), terminal::EnterAlternateScreen)
            .context("entering alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

struct Loops {
    input: JoinHandle<io::Result<()>>,
    tick: JoinHandle<()>,
    main: JoinHandle<()>,
}

fn spawn_loops(
    runtime: &Arc<Runtime>,
    mut game: Game<StdRng>,
    devices: &SharedDevices,
    config: &GameConfig,
    console: &Arc<Console>,
) -> Result<Loops> {
    let poll = config.poll_interval();
    let input = input_loop::spawn_input_loop(runtime.clone(), console.clone(), INPUT_POLL)
        .context("spawning input loop")?;
    let tick = tick_loop::spawn_tick_loop(
        runtime.clone(),
        devices.clone(),
        config.tick_interval(),
        poll,
    )
    .context("spawning tick loop")?;
    let main = {
        let runtime = runtime.clone();
        std::thread::Builder::new()
            .name("main".to_string())
            .spawn(move || main_loop::run_main_loop(&mut game, &runtime, poll))
            .context("spawning main loop")?
    };
    Ok(Loops { input, tick, main })
}

/// Starts the loops, opens the gate, and joins everything once the main
/// loop returns.
fn run(
    game: Game<StdRng>,
    devices: &SharedDevices,
    config: &GameConfig,
    console: &Arc<Console>,
) -> Result<()> {
    let runtime = Arc::new(Runtime::new());
    let loops = match spawn_loops(&runtime, game, devices, config, console) {
        Ok(loops) => loops,
        Err(err) => {
            runtime.shutdown();
            return Err(err);
        }
    };
    runtime.gate.open();
    info!("loops started");

    let main = loops.main.join();
    runtime.shutdown();
    let tick = loops.tick.join();
    let input = loops.input.join();
    info!("loops joined");

    main.map_err(|_| anyhow!("main loop panicked"))?;
    tick.map_err(|_| anyhow!("tick loop panicked"))?;
    input
        .map_err(|_| anyhow!("input loop panicked"))?
        .context("reading terminal input")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let overrides = Overrides {
        tick_ms: cli.tick_ms,
        poll_ms: cli.poll_ms,
        devices: cli.devices,
    };
    let config = config::resolve(cli.config.as_deref(), &overrides)?;
    let registry = DeviceRegistry::builtin();
    let devices = registry
        .create_all(&config.devices)
        .with_context(|| format!("known devices: {}", registry.names().join(", ")))?;
    info!(devices = ?config.devices, "devices created");
    let devices = shared_devices(devices);

    let console = Arc::new(Console::stdout(Layout::for_board(&snapshot_devices(
        &devices,
    ))));
    let mascot = Arc::new(Mascot::new(console.clone()));
    let board = Arc::new(StatusBoard::new(console.clone(), devices.clone()));
    let mut game = Game::new(devices.clone(), config.clone(), StdRng::from_entropy());
    game.subscribers().register(&mascot);
    game.subscribers().register(&board);

    let terminal = TerminalGuard::enter()?;
    let result = console
        .draw_frame()
        .context("drawing the screen")
        .and_then(|()| run(game, &devices, &config, &console));
    drop(terminal);

    if result.is_ok() {
        println!("Bye");
    }
    result
}
