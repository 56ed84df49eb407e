use std::ops::{Deref, Index, Range};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{IllegalMove, InvalidPitId, TurnState};

/// Number of slots on the board: twelve pits and two stores.
pub const NUM_SLOTS: usize = 14;
pub const PITS_PER_SIDE: usize = 6;
pub const INITIAL_SEEDS_PER_PIT: u32 = 6;
pub const SOUTH_STORE: usize = 6;
pub const NORTH_STORE: usize = 13;

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Owns pits 1-6 (indices 0-5) and the store at index 6. Moves first.
    South,
    /// Owns pits 8-13 (indices 7-12) and the store at index 13.
    North,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::South => Side::North,
            Side::North => Side::South,
        }
    }

    pub fn store_index(self) -> usize {
        match self {
            Side::South => SOUTH_STORE,
            Side::North => NORTH_STORE,
        }
    }

    /// The board indices of the six playable pits of this side.
    pub fn pit_indices(self) -> Range<usize> {
        match self {
            Side::South => 0..SOUTH_STORE,
            Side::North => SOUTH_STORE + 1..NORTH_STORE,
        }
    }

    pub fn owns_pit(self, index: usize) -> bool {
        self.pit_indices().contains(&index)
    }
}

/// A playable pit, identified the way clients see it: 1-based, in [1-6, 8-13].
///
/// Stores (7 and 14) cannot be represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitId(u8);

impl PitId {
    pub fn new(id: u8) -> Result<Self, InvalidPitId> {
        match id {
            1..=6 | 8..=13 => Ok(PitId(id)),
            _ => Err(InvalidPitId::OutOfRange(id as i64)),
        }
    }

    /// The pit at the given 0-based board index, if that index is a pit.
    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_add(1)
            .and_then(|id| u8::try_from(id).ok())
            .and_then(|id| PitId::new(id).ok())
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The 0-based board index.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn side(self) -> Side {
        if self.0 <= 6 {
            Side::South
        } else {
            Side::North
        }
    }
}

impl TryFrom<u8> for PitId {
    type Error = InvalidPitId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PitId::new(id)
    }
}

impl TryFrom<i64> for PitId {
    type Error = InvalidPitId;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u8::try_from(id)
            .map_err(|_| InvalidPitId::OutOfRange(id))
            .and_then(PitId::new)
    }
}

impl From<PitId> for u8 {
    fn from(pit: PitId) -> u8 {
        pit.0
    }
}

impl FromStr for PitId {
    type Err = InvalidPitId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: i64 = s
            .parse()
            .map_err(|_| InvalidPitId::NotANumber(String::from(s)))?;
        PitId::try_from(id)
    }
}

impl std::fmt::Display for PitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pit directly across the board from the pit at `index`.
pub fn opposite_pit(index: usize) -> usize {
    debug_assert!(Side::South.owns_pit(index) || Side::North.owns_pit(index));
    2 * PITS_PER_SIDE - index
}

/// The slots that receive seeds, in order, when `mover` sows from the pit at `start`.
///
/// The iterator is endless; take as many slots as there are seeds. The
/// opponent's store is passed over, so one lap is 13 slots long.
pub fn sowing_path(start: usize, mover: Side) -> SowingPath {
    SowingPath {
        next: (start + 1) % NUM_SLOTS,
        skipped: mover.other().store_index(),
    }
}

#[derive(Clone, Debug)]
pub struct SowingPath {
    next: usize,
    skipped: usize,
}

impl Iterator for SowingPath {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next == self.skipped {
            self.next = (self.next + 1) % NUM_SLOTS;
        }
        let index = self.next;
        self.next = (index + 1) % NUM_SLOTS;
        Some(index)
    }
}

/// Result of a finished game, decided by the stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won(Side),
    Tie,
}

/// The seed counts of all fourteen slots, indexed 0-13.
///
/// Indices 0-5 are south's pits, 6 is south's store, 7-12 are north's pits
/// and 13 is north's store. A board is a plain value: playing a move never
/// modifies it, see [`Board::calculate()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([u32; NUM_SLOTS]);

/// A move that has been checked and played out on a copy of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveCalculation {
    /// The board after sowing and capturing.
    pub board: Board,
    /// Whose turn it is after this move, or `Finished`.
    pub next_state: TurnState,
    pub mover: Side,
    /// The slot that received the last seed.
    pub last_index: usize,
    pub capture: Option<Capture>,
}

/// Seeds moved into the mover's store because the last seed landed in an
/// empty pit of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capture {
    /// Index of the pit the last seed landed in.
    pub pit: usize,
    /// Index of the pit across from it.
    pub opposite: usize,
    /// The number of seeds banked, including the one that landed.
    pub seeds: u32,
}

impl Default for Board {
    fn default() -> Self {
        let mut slots = [INITIAL_SEEDS_PER_PIT; NUM_SLOTS];
        slots[SOUTH_STORE] = 0;
        slots[NORTH_STORE] = 0;
        Board(slots)
    }
}

impl Board {
    /// The starting layout: six seeds in every pit, both stores empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn from_slots(slots: [u32; NUM_SLOTS]) -> Self {
        Board(slots)
    }

    pub fn slots(&self) -> [u32; NUM_SLOTS] {
        self.0
    }

    pub fn store(&self, side: Side) -> u32 {
        self.0[side.store_index()]
    }

    /// Seeds in the six pits of `side`, not counting the store.
    pub fn side_total(&self, side: Side) -> u32 {
        self.0[side.pit_indices()].iter().sum()
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// The game is over when a side has run out of seeds in its pits, or when
    /// one store holds more than half of all seeds.
    pub fn is_terminal(&self) -> bool {
        let total = self.total();
        self.side_total(Side::South) == 0
            || self.side_total(Side::North) == 0
            || 2 * self.store(Side::South) > total
            || 2 * self.store(Side::North) > total
    }

    /// Compares the stores. Seeds left in pits are not counted.
    pub fn outcome(&self) -> Outcome {
        match self.store(Side::South).cmp(&self.store(Side::North)) {
            std::cmp::Ordering::Less => Outcome::Won(Side::North),
            std::cmp::Ordering::Equal => Outcome::Tie,
            std::cmp::Ordering::Greater => Outcome::Won(Side::South),
        }
    }

    /// Check a move and work out all of its effects.
    ///
    /// This is the core function of this type. Checks happen in this order:
    /// the game must not be finished, the pit must belong to the player whose
    /// turn it is, and the pit must not be empty. Then the seeds are sown
    /// counter-clockwise, skipping the opponent's store, a capture is made if
    /// the last seed landed in an empty pit of the mover, and finally the next
    /// turn state is decided.
    ///
    /// `self` is left untouched; the returned calculation holds the new board.
    pub fn calculate(&self, state: TurnState, pit: PitId) -> Result<MoveCalculation, IllegalMove> {
        let mover = state.mover().ok_or(IllegalMove::GameFinished)?;
        if pit.side() != mover {
            return Err(IllegalMove::WrongPlayer { pit, state });
        }
        let start = pit.index();
        let seeds = self.0[start];
        if seeds == 0 {
            return Err(IllegalMove::EmptyPit { pit });
        }

        let mut slots = self.0;
        slots[start] = 0;
        let mut last_index = start;
        for index in sowing_path(start, mover).take(seeds as usize) {
            slots[index] += 1;
            last_index = index;
        }

        // A single seed means the pit was empty before the last seed landed
        let capture = if mover.owns_pit(last_index) && slots[last_index] == 1 {
            let opposite = opposite_pit(last_index);
            let seeds = slots[opposite] + 1;
            slots[mover.store_index()] += seeds;
            slots[last_index] = 0;
            slots[opposite] = 0;
            Some(Capture {
                pit: last_index,
                opposite,
                seeds,
            })
        } else {
            None
        };

        let board = Board(slots);
        let next_state = if board.is_terminal() {
            TurnState::Finished
        } else if last_index == mover.store_index() {
            state
        } else {
            TurnState::to_move(mover.other())
        };

        Ok(MoveCalculation {
            board,
            next_state,
            mover,
            last_index,
            capture,
        })
    }
}

impl Index<usize> for Board {
    type Output = u32;

    fn index(&self, index: usize) -> &u32 {
        &self.0[index]
    }
}

impl Deref for Board {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MoveCalculation {
    /// The mover gets another turn because the last seed went into their store.
    pub fn extra_turn(&self) -> bool {
        self.next_state == TurnState::to_move(self.mover)
    }

    /// Take the new board and turn state.
    pub fn execute(self) -> (Board, TurnState) {
        (self.board, self.next_state)
    }
}
