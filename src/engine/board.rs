use rand::RngCore;

use super::direction::Direction;
use super::error::{EngineError, Result};
use super::grid::{Card, Grid, Idx, Score};
use super::spawn::SpawnPolicy;

pub(crate) const DEFAULT_SIZE: usize = 4;
pub(crate) const DEFAULT_GOAL: Card = 2048;

const INITIAL_TILES: usize = 2;

/// Board represents a 2048 board: a square grid of cards, the card value that wins the game and
/// the random source used to spawn new cards.
pub(crate) struct Board {
    rng: Box<dyn RngCore>,
    grid: Grid,
    goal: Card,
    policy: SpawnPolicy,
}

impl Board {
    /// Initialize a new `size` x `size` board with two random cards using the given random
    /// number generator.
    pub(crate) fn new(size: usize, goal: Card, rng: impl RngCore + 'static) -> Result<Self> {
        Self::with_policy(size, goal, SpawnPolicy::default(), rng)
    }

    pub(crate) fn with_policy(
        size: usize,
        goal: Card,
        policy: SpawnPolicy,
        rng: impl RngCore + 'static,
    ) -> Result<Self> {
        check_size(size)?;
        check_goal(goal)?;
        let mut board = Self {
            rng: Box::new(rng),
            grid: Grid::new(size),
            goal,
            policy,
        };
        for _ in 0..INITIAL_TILES {
            board.spawn();
        }
        log::info!(
            "new {0}x{0} board, goal {1}, four-tile probability {2}",
            size,
            goal,
            board.policy.four_probability()
        );
        Ok(board)
    }

    /// Build a board from explicit rows of cards without spawning anything.
    #[cfg(test)]
    pub(crate) fn from_cells(
        cells: Vec<Vec<Card>>,
        goal: Card,
        policy: SpawnPolicy,
        rng: impl RngCore + 'static,
    ) -> Result<Self> {
        let size = cells.len();
        check_size(size)?;
        check_goal(goal)?;
        if let Some(row) = cells.iter().find(|row| row.len() != size) {
            return Err(EngineError::invalid(format!(
                "board must be square: found a row of {} cells in a board of {} rows",
                row.len(),
                size
            )));
        }
        if let Some(card) = cells
            .iter()
            .flatten()
            .find(|card| **card != 0 && (**card < 2 || !card.is_power_of_two()))
        {
            return Err(EngineError::invalid(format!(
                "{} is not a valid card value",
                card
            )));
        }
        Ok(Self {
            rng: Box::new(rng),
            grid: Grid::from_slots(cells),
            goal,
            policy,
        })
    }

    pub(crate) fn size(&self) -> usize {
        self.grid.size()
    }

    pub(crate) fn goal(&self) -> Card {
        self.goal
    }

    /// The card at column `x`, row `y`; 0 when the slot is empty.
    pub(crate) fn get_cell(&self, x: usize, y: usize) -> Result<Card> {
        self.grid
            .try_get(&Idx(x, y))
            .ok_or(EngineError::OutOfBounds {
                x,
                y,
                size: self.size(),
            })
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Card]> {
        self.grid.rows()
    }

    pub(crate) fn max_tile(&self) -> Card {
        self.grid.max()
    }

    /// shift slides every card toward the given direction, merging equal neighbours, and returns
    /// the score earned by the merges. A shift that changes nothing returns 0 and does not
    /// spawn a new card.
    pub(crate) fn shift(&mut self, direction: Direction) -> Score {
        let shift = self.grid.shift(direction);
        if !shift.changed {
            log::debug!("shifting {} changed nothing", direction);
            return 0;
        }
        log::debug!("shifted {}, scored {}", direction, shift.score);
        self.spawn();
        shift.score
    }

    /// Whether shifting in at least one direction would change the board.
    pub(crate) fn can_move(&self) -> bool {
        Direction::ALL
            .into_iter()
            .any(|direction| self.grid.clone().shift(direction).changed)
    }

    pub(crate) fn won(&self) -> bool {
        self.grid.max() >= self.goal
    }

    fn spawn(&mut self) {
        // every merge or slide that changes the grid vacates at least one slot
        let (idx, value) = self
            .policy
            .spawn(&mut self.grid, &mut *self.rng)
            .expect("spawning requires at least one empty slot");
        log::debug!("spawned {} at {}", value, idx);
    }
}

fn check_size(size: usize) -> Result<()> {
    if size < 2 {
        return Err(EngineError::invalid(format!(
            "board size must be at least 2, got {}",
            size
        )));
    }
    Ok(())
}

fn check_goal(goal: Card) -> Result<()> {
    if goal < 4 || !goal.is_power_of_two() {
        return Err(EngineError::invalid(format!(
            "goal must be a power of two of at least 4, got {}",
            goal
        )));
    }
    Ok(())
}
