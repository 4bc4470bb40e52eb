//! Headless autoplay.
//!
//! Plays a seeded session with random swipes and logs every turn. Useful
//! for eyeballing the rules without a UI.
//!
//! ```text
//! rpsls-tiles [SEED] [TURNS]
//! RUST_LOG=debug rpsls-tiles 42 200
//! ```

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rpsls_tiles::{
    Actuator, Direction, GameConfig, GameManager, GameRng, Grid, MemoryStorage, Metadata,
    RandomSource,
};

const DEFAULT_SEED: u64 = 42;
const DEFAULT_TURNS: usize = 500;

/// Logs each rendered frame instead of drawing it.
struct LogActuator {
    frames: usize,
}

impl Actuator for LogActuator {
    fn actuate(&mut self, grid: &Grid, metadata: &Metadata) {
        self.frames += 1;
        info!(
            frame = self.frames,
            score = metadata.score,
            best = metadata.best_score,
            charges = metadata.counters.total(),
            over = metadata.over,
            "\n{grid}"
        );
    }

    fn continue_game(&mut self) {
        info!("continue");
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let turns = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TURNS);

    info!(seed, turns, "starting autoplay");

    let game = GameManager::new(
        GameConfig::default(),
        LogActuator { frames: 0 },
        MemoryStorage::new(),
        GameRng::new(seed),
    );
    let mut game = match game {
        Ok(game) => game,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    // Swipes come from their own stream so the session's draws stay
    // identical to an interactive game with the same seed.
    let mut swipes = GameRng::new(seed.wrapping_add(1));
    let mut played = 0;
    let mut encounters = 0;

    while played < turns && !game.is_game_terminated() {
        let index = swipes.next_index(Direction::ALL.len()).unwrap_or(0);
        if let Some(outcome) = game.move_tiles(Direction::ALL[index]) {
            encounters += outcome.encounters.len();
        }
        played += 1;

        // Charges start at zero; recharge once so encounters show up.
        if played == turns / 2 && !game.is_keep_playing() {
            game.keep_playing();
        }
    }

    info!(
        played,
        encounters,
        score = game.score(),
        over = game.is_over(),
        "autoplay finished"
    );
}
