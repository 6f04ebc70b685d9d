use std::error::Error;

use clap::Parser;
use engine::app::{AppConfig, AppFlow, GameApp, InputFrame, run_game};
use engine::graphics::Renderer2d;
use log::{info, warn};
use winit::dpi::PhysicalSize;

use twenty48::board::Board;
use twenty48::board_ui::draw_game;
use twenty48::input::{is_quit_key, map_key_to_direction};
use twenty48::settings::{PlayerSettings, SettingsStore};
use twenty48::state::GameState;

/// Sliding-tile puzzle. Move with WASD or the arrow keys, quit with Escape.
#[derive(Debug, Parser)]
#[command(name = "twenty48", version)]
struct Cli {
    /// Board rows (overrides the settings file).
    #[arg(long)]
    rows: Option<usize>,
    /// Board columns (overrides the settings file).
    #[arg(long)]
    cols: Option<usize>,
    /// Seed for tile placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save_settings: bool,
}

impl Cli {
    fn apply(&self, mut settings: PlayerSettings) -> PlayerSettings {
        if let Some(rows) = self.rows {
            settings.board.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.board.cols = cols;
        }
        settings.sanitized()
    }
}

struct Twenty48App {
    rows: usize,
    cols: usize,
    seed: Option<u64>,
}

impl Twenty48App {
    fn new_board(&self) -> Board {
        let board = match self.seed {
            Some(seed) => Board::seeded(self.rows, self.cols, seed),
            None => Board::try_new(self.rows, self.cols),
        };
        match board {
            Ok(board) => board,
            // Settings are sanitized to at least 1x1 before the app is built.
            Err(err) => panic!("{err}"),
        }
    }
}

impl GameApp for Twenty48App {
    type State = GameState;

    fn init_state(&mut self) -> Self::State {
        GameState::new(self.new_board())
    }

    fn update_state(&mut self, state: &mut Self::State, input: &InputFrame) -> AppFlow {
        for &key in &input.keys_pressed {
            if is_quit_key(key) {
                return AppFlow::Exit;
            }
            if let Some(direction) = map_key_to_direction(key) {
                let outcome = state.apply(direction);
                if outcome.game_over {
                    info!("GAME OVER, score {}", state.score());
                }
            }
        }
        AppFlow::Continue
    }

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d) {
        draw_game(renderer, state);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let store = SettingsStore::from_env();
    let settings = cli.apply(store.load());
    if cli.save_settings {
        match store.save(&settings) {
            Ok(()) => info!("saved settings to {}", store.path().display()),
            Err(err) => warn!("could not save settings to {}: {err}", store.path().display()),
        }
    }

    info!(
        "starting {}x{} board at {} ticks/s",
        settings.board.rows, settings.board.cols, settings.tick_rate
    );

    let config = AppConfig {
        title: "2048".to_string(),
        desired_size: PhysicalSize::new(settings.window.width, settings.window.height),
        clamp_to_monitor: true,
        vsync: settings.window.vsync,
        tick_rate: settings.tick_rate,
    };
    let app = Twenty48App {
        rows: settings.board.rows,
        cols: settings.board.cols,
        seed: cli.seed,
    };
    run_game(config, app)
}
