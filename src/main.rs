mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use tracing_subscriber::EnvFilter;

use alien_invasion::interfaces::{InputSource, Renderer};
use alien_invasion::settings::{Bounds, Settings};
use alien_invasion::simulation::{Control, Simulation};

use display::TerminalRenderer;
use input::ChannelInput;

#[derive(Parser)]
#[command(name = "alien_invasion")]
#[command(about = "Shoot down the descending alien fleet before it reaches you")]
struct Args {
    /// Ships available at the start of a game
    #[arg(long)]
    lives: Option<u32>,
    /// Projectiles allowed on screen at once
    #[arg(long)]
    bullets: Option<usize>,
    /// Horizontal fleet speed, world units per second (a cell is 8×16)
    #[arg(long)]
    fleet_speed: Option<f32>,
    /// How far the fleet drops on every reversal, world units
    #[arg(long)]
    drop_step: Option<f32>,
    /// Ship speed, world units per second
    #[arg(long)]
    ship_speed: Option<f32>,
    /// Projectile speed, world units per second
    #[arg(long)]
    projectile_speed: Option<f32>,
    /// Simulation ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,
    /// Write logs here (filtered by RUST_LOG, default `info`)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(lives) = self.lives {
            settings.starting_lives = lives;
        }
        if let Some(bullets) = self.bullets {
            settings.bullets_allowed = bullets;
        }
        if let Some(speed) = self.fleet_speed {
            settings.fleet_speed = speed;
        }
        if let Some(step) = self.drop_step {
            settings.drop_step = step;
        }
        if let Some(speed) = self.ship_speed {
            settings.ship_speed = speed;
        }
        if let Some(speed) = self.projectile_speed {
            settings.projectile_speed = speed;
        }
        if let Some(rate) = self.tick_rate {
            settings.tick_rate = rate;
        }
        settings
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run ticks at a fixed rate until the player quits.
fn game_loop<I, R>(
    sim: &mut Simulation,
    input: &mut I,
    renderer: &mut R,
) -> std::result::Result<(), R::Error>
where
    I: InputSource,
    R: Renderer,
{
    let frame = Duration::from_secs_f32(sim.settings().tick_seconds());
    loop {
        let frame_start = Instant::now();

        if sim.frame(input, renderer)? == Control::Quit {
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let settings = args.settings();
    let (width, height) = terminal::size().context("failed to query terminal size")?;
    let bounds = Bounds::new(
        width as f32 * settings.glyph_width,
        height as f32 * settings.glyph_height,
    );
    let mut sim = Simulation::new(settings, bounds).context("invalid game settings")?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let result = play(&mut out, &mut sim, width, height);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn play<W: Write>(out: &mut W, sim: &mut Simulation, width: u16, height: u16) -> Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events where the terminal supports them; everywhere
    // else the input adapter synthesises releases.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }

    let mut input = ChannelInput::spawn(!keyboard_enhanced);
    let (cell_w, cell_h) = (sim.settings().glyph_width, sim.settings().glyph_height);
    let mut renderer = TerminalRenderer::new(&mut *out, width, height, cell_w, cell_h);
    let result = game_loop(sim, &mut input, &mut renderer).context("failed to draw frame");

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    result
}
