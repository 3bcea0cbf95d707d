use super::direction::Direction;

/// The value of a single slot; 0 is an empty slot.
pub(crate) type Card = u32;

pub(crate) type Score = u64;

/// The largest card a grid can hold. Two of them never merge.
pub(crate) const MAX_CARD: Card = 1 << (Card::BITS - 1);

/// Column and row of a slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Idx(pub(crate) usize, pub(crate) usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// The outcome of sliding every line of a grid in one direction.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Shift {
    pub(crate) score: Score,
    pub(crate) changed: bool,
}

/// Square 2d array of slots, indexed as `slots[y][x]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: usize,
    slots: Vec<Vec<Card>>,
}

impl Grid {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            slots: vec![vec![0; size]; size],
        }
    }

    /// Callers are expected to have checked that `slots` is square.
    #[cfg(test)]
    pub(crate) fn from_slots(slots: Vec<Vec<Card>>) -> Self {
        Self {
            size: slots.len(),
            slots,
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn try_get(&self, idx: &Idx) -> Option<Card> {
        self.slots.get(idx.1)?.get(idx.0).copied()
    }

    pub(crate) fn get(&self, idx: &Idx) -> Card {
        self.slots[idx.1][idx.0]
    }

    pub(crate) fn set(&mut self, idx: &Idx, value: Card) {
        self.slots[idx.1][idx.0] = value;
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Card]> {
        self.slots.iter().map(|row| row.as_slice())
    }

    pub(crate) fn max(&self) -> Card {
        self.slots.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Indices of every empty slot in row-major order.
    pub(crate) fn empty(&self) -> impl Iterator<Item = Idx> + '_ {
        self.slots.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value == 0)
                .map(move |(x, _)| Idx(x, y))
        })
    }

    /// The slots of row or column `n`, ordered from the edge tiles move toward when shifting in
    /// `direction`.
    fn line(&self, direction: Direction, n: usize) -> Vec<Idx> {
        let last = self.size - 1;
        (0..self.size)
            .map(|offset| match direction {
                Direction::Left => Idx(offset, n),
                Direction::Right => Idx(last - offset, n),
                Direction::Up => Idx(n, offset),
                Direction::Down => Idx(n, last - offset),
            })
            .collect()
    }

    /// Slides and merges every line toward the edge named by `direction`. Nothing is spawned
    /// here; `changed` tells the caller whether a new tile is due.
    pub(crate) fn shift(&mut self, direction: Direction) -> Shift {
        let mut shift = Shift::default();
        for n in 0..self.size {
            let line = self.line(direction, n);
            let values = line.iter().map(|idx| self.get(idx)).collect::<Vec<Card>>();
            let (merged, score) = merge_line(&values);
            shift.score += score;
            for (idx, value) in line.iter().zip(merged) {
                if self.get(idx) != value {
                    shift.changed = true;
                    self.set(idx, value);
                }
            }
        }
        shift
    }
}

/// Compacts one line whose first element sits at the edge the tiles travel toward. A slot
/// produced by a merge is never merged again in the same pass, so `[v, v, v]` becomes
/// `[2v, v, 0]`. Cards of `MAX_CARD` stay as they are since their sum does not fit a `Card`.
fn merge_line(line: &[Card]) -> (Vec<Card>, Score) {
    let mut score: Score = 0;
    // (value, produced by a merge)
    let mut stacked: Vec<(Card, bool)> = Vec::with_capacity(line.len());
    for value in line.iter().copied().filter(|v| *v != 0) {
        match stacked.last_mut() {
            Some(top) if !top.1 && top.0 == value && value < MAX_CARD => {
                top.0 += value;
                top.1 = true;
                score += Score::from(top.0);
            }
            _ => stacked.push((value, false)),
        }
    }
    let mut merged = stacked.into_iter().map(|(v, _)| v).collect::<Vec<Card>>();
    merged.resize(line.len(), 0);
    (merged, score)
}
