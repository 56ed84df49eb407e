use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use kalah::{Board, TurnState};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Builder;

/// Opaque identifier of a stored game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// A random version 4 UUID in its usual hyphenated form.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
        GameId(uuid.hyphenated().to_string())
    }

    /// Accepts any id that is not blank. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| GameId(String::from(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A game as it is stored between requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub board: Board,
    pub state: TurnState,
}

impl GameRecord {
    /// A fresh game: the starting layout, south to move.
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            board: Board::new(),
            state: TurnState::SouthTurn,
        }
    }
}

/// In-memory storage of all games, keyed by id.
///
/// All access goes through one lock, so a read-modify-write in
/// [`GameStore::update()`] can't interleave with another one on the same game.
#[derive(Debug, Default)]
pub struct GameStore {
    games: Mutex<HashMap<GameId, GameRecord>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    // The map is only written after a new record has been fully computed, so
    // it is consistent even if another thread panicked while holding the lock.
    fn lock(&self) -> MutexGuard<'_, HashMap<GameId, GameRecord>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores the record, replacing any record with the same id.
    pub fn insert(&self, record: GameRecord) {
        self.lock().insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &GameId) -> Option<GameRecord> {
        self.lock().get(id).cloned()
    }

    /// Replaces the record with the one computed by `apply`.
    ///
    /// Returns `None` if there is no game with this id. When `apply` fails,
    /// the stored record stays as it was.
    pub fn update<E>(
        &self,
        id: &GameId,
        apply: impl FnOnce(&GameRecord) -> Result<GameRecord, E>,
    ) -> Option<Result<GameRecord, E>> {
        let mut games = self.lock();
        let record = games.get_mut(id)?;
        Some(apply(record).map(|new_record| {
            *record = new_record.clone();
            new_record
        }))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
