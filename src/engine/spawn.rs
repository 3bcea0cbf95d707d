use rand::distributions::Distribution;
use rand::distributions::WeightedIndex;
use rand::seq::IteratorRandom;
use rand::Rng;

use super::error::{EngineError, Result};
use super::grid::{Card, Grid, Idx};

const NEW_CARD_CHOICES: [Card; 2] = [2, 4];

const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// SpawnPolicy decides where new tiles appear and what value they carry.
#[derive(Clone, Debug)]
pub(crate) struct SpawnPolicy {
    four_probability: f64,
    new_card_weighted_index: WeightedIndex<f64>,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::new(DEFAULT_FOUR_PROBABILITY)
            .expect("DEFAULT_FOUR_PROBABILITY should always be a valid probability")
    }
}

impl SpawnPolicy {
    /// Spawn a 4 with probability `four_probability` and a 2 otherwise.
    pub(crate) fn new(four_probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&four_probability) {
            return Err(EngineError::invalid(format!(
                "four-tile probability must be within [0, 1], got {}",
                four_probability
            )));
        }
        let new_card_weighted_index =
            WeightedIndex::new([1.0 - four_probability, four_probability])
                .map_err(|e| EngineError::invalid(e.to_string()))?;
        Ok(Self {
            four_probability,
            new_card_weighted_index,
        })
    }

    pub(crate) fn four_probability(&self) -> f64 {
        self.four_probability
    }

    pub(crate) fn new_card<R: Rng + ?Sized>(&self, rng: &mut R) -> Card {
        NEW_CARD_CHOICES[self.new_card_weighted_index.sample(rng)]
    }

    /// Place a new card on an empty slot chosen uniformly at random. Returns `None` when the
    /// grid is full and nothing was placed.
    pub(crate) fn spawn<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Option<(Idx, Card)> {
        let idx = grid.empty().choose(rng)?;
        let value = self.new_card(rng);
        grid.set(&idx, value);
        Some((idx, value))
    }
}
