mod chain;
mod collision;
mod config;
mod game;
mod growth;
mod input;
mod render;
mod segment;
mod sim;
mod torus;

use clap::Parser;
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{error, info, warn};
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::*;
use crate::game::{Game, GameState};
use crate::input::HeldKeys;

/// A snake of overlapping circles gliding over a wrap-around plane.
#[derive(Parser, Debug)]
#[command(name = "torsnek", version, about)]
struct Cli {
    /// Plane width.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: f64,
    /// Plane height.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: f64,
    /// Segments in a new snake.
    #[arg(long, default_value_t = DEFAULT_INITIAL_LENGTH)]
    initial_length: usize,
    /// Distance the head moves per tick.
    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: f64,
    /// Radians turned per tick while a turn key is held.
    #[arg(long, default_value_t = DEFAULT_TURN_RATE)]
    turn_rate: f64,
    #[arg(long, default_value_t = DEFAULT_SEGMENT_RADIUS)]
    segment_radius: f64,
    /// Half the spacing between neighbouring segments.
    #[arg(long, default_value_t = DEFAULT_CLIP_RADIUS)]
    clip_radius: f64,
    #[arg(long, default_value_t = DEFAULT_APPLE_RADIUS)]
    apple_radius: f64,
    #[arg(long, default_value_t = DEFAULT_SEGMENTS_PER_APPLE)]
    segments_per_apple: usize,
    /// First body index the head can collide with (derived from the radii if unset).
    #[arg(long)]
    safe_zone: Option<usize>,
    /// Seed for apple placement; replays a whole session.
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// How long a key press counts as held when the terminal cannot report releases.
    #[arg(long, default_value_t = 200)]
    hold_ms: u64,
    #[arg(long, default_value = "torsnek.log")]
    log_file: PathBuf,
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Cli {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            width: self.width,
            height: self.height,
            initial_length: self.initial_length,
            step: self.step,
            turn_rate: self.turn_rate,
            segment_radius: self.segment_radius,
            clip_radius: self.clip_radius,
            apple_radius: self.apple_radius,
            segments_per_apple: self.segments_per_apple,
            safe_zone: self.safe_zone,
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    WriteLogger::init(cli.log_level, Config::default(), File::create(&cli.log_file)?)?;

    info!("Starting torsnek");

    let config = cli.sim_config();
    if let Err(e) = config.validate() {
        error!("Rejected configuration: {}", e);
        return Err(e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let releases_reported = supports_keyboard_enhancement().unwrap_or(false);
    if releases_reported {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        warn!(
            "Terminal does not report key releases, holding turns for {}ms per press",
            cli.hold_ms
        );
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let keys = HeldKeys::new(releases_reported, Duration::from_millis(cli.hold_ms));
    let mut game = Game::new(config, keys);

    let result = run(&mut terminal, &mut game, Duration::from_millis(cli.tick_ms));

    // Cleanup terminal
    if releases_reported {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    if let Some(score) = game.last_score() {
        println!("Game Over\nScore: {}", score);
    }
    info!("Exiting torsnek");

    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    game: &mut Game,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| game.render(f))?;

        // Handle input until the next tick is due
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                game.handle_input(key, Instant::now());
            }
        }

        if last_tick.elapsed() >= tick_rate {
            game.update(Instant::now());
            last_tick = Instant::now();
        }

        if let GameState::Exit = game.state {
            break;
        }
    }

    Ok(())
}
