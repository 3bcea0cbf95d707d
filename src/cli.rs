use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};

use crate::engine::board::{Board, DEFAULT_GOAL, DEFAULT_SIZE};
use crate::engine::error::Result;
use crate::engine::grid::Card;
use crate::engine::spawn::SpawnPolicy;
use crate::scores::ScoreStore;
use crate::tui::colors::ColorMode;

/// Play 2048 in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct Cli {
    /// Number of rows and columns on the board.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub(crate) size: usize,

    /// Tile value that wins the game; must be a power of two.
    #[arg(long, default_value_t = DEFAULT_GOAL)]
    pub(crate) goal: Card,

    /// Probability that a new tile is a 4 rather than a 2 [default: 0.1]
    #[arg(long)]
    pub(crate) four_probability: Option<f64>,

    /// Color mode matching the terminal background.
    #[arg(long, value_enum, default_value_t = ColorMode::Default)]
    pub(crate) mode: ColorMode,

    /// File holding the best score [default: ~/.term2048.scores]
    #[arg(long)]
    pub(crate) scores_file: Option<PathBuf>,

    /// Do not read or write the best score.
    #[arg(long, conflicts_with = "scores_file")]
    pub(crate) no_scores: bool,

    /// Seed for the random number generator, for reproducible games.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// File that receives log output.
    #[arg(long, default_value = "term48.log")]
    pub(crate) log_file: PathBuf,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

impl Cli {
    pub(crate) fn board(&self) -> Result<Board> {
        let rng: Box<dyn RngCore> = match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(thread_rng()),
        };
        match self.four_probability {
            Some(p) => Board::with_policy(self.size, self.goal, SpawnPolicy::new(p)?, rng),
            None => Board::new(self.size, self.goal, rng),
        }
    }

    pub(crate) fn score_store(&self) -> Option<ScoreStore> {
        if self.no_scores {
            return None;
        }
        Some(match &self.scores_file {
            Some(path) => ScoreStore::new(path),
            None => ScoreStore::user_default(),
        })
    }
}
