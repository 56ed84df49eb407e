use std::sync::{Mutex, PoisonError};

use kalah::{apply_move, ErrorView, GameView, PitId, Request, Response};
use rand::rngs::StdRng;
use tracing::{debug, instrument, trace};

use crate::error::JudgeError;
use crate::store::{GameId, GameRecord, GameStore};

/// Checks requests from clients, runs them against the stored games and
/// turns the results into responses.
///
/// All methods take `&self`, so one judge can serve several threads.
pub struct Judge {
    store: GameStore,
    rng: Mutex<StdRng>,
    base_url: String,
}

impl Judge {
    pub fn new(rng: StdRng, base_url: impl Into<String>) -> Self {
        Self {
            store: GameStore::new(),
            rng: Mutex::new(rng),
            base_url: base_url.into(),
        }
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// Starts and stores a new game.
    #[instrument(skip(self))]
    pub fn create(&self) -> GameRecord {
        debug!("Create new game request");
        let id = GameId::random(&mut *self.rng.lock().unwrap_or_else(PoisonError::into_inner));
        let record = GameRecord::new(id);
        self.store.insert(record.clone());
        debug!(game_id = %record.id, "New game has been created");
        record
    }

    /// Plays a pit in a stored game and stores the result.
    ///
    /// The ids are checked before the game is looked up: a blank game id or
    /// pit id is an invalid identifier, a pit id that is not a number in
    /// [1-6, 8-13] is an invalid pit id.
    #[instrument(skip(self))]
    pub fn make_move(&self, game_id: &str, pit_id: &str) -> Result<GameRecord, JudgeError> {
        debug!("Move request");
        let game_id = parse_game_id(game_id)?;
        if pit_id.trim().is_empty() {
            debug!("Move request has empty pit id");
            return Err(JudgeError::InvalidIdentifier { what: "pit id" });
        }
        let pit: PitId = pit_id.parse().map_err(|err| {
            debug!(%err, "Move request has invalid pit id");
            JudgeError::from(err)
        })?;

        let result = self.store.update(&game_id, |record| -> Result<_, JudgeError> {
            let (board, state) = apply_move(&record.board, record.state, pit)?;
            Ok(GameRecord {
                id: record.id.clone(),
                board,
                state,
            })
        });
        match result {
            None => {
                debug!(%game_id, "Game record was not found");
                Err(JudgeError::RecordNotFound { game_id })
            }
            Some(Err(err)) => {
                debug!(%err, "Move was rejected");
                Err(err)
            }
            Some(Ok(record)) => {
                debug!(%pit, state = %record.state, "Move has been successfully performed");
                trace!("\n{}", record.board);
                Ok(record)
            }
        }
    }

    /// Looks up a stored game.
    #[instrument(skip(self))]
    pub fn status(&self, game_id: &str) -> Result<GameRecord, JudgeError> {
        let game_id = parse_game_id(game_id)?;
        self.store.get(&game_id).ok_or_else(|| {
            debug!(%game_id, "Game record was not found");
            JudgeError::RecordNotFound { game_id }
        })
    }

    pub fn view(&self, record: &GameRecord) -> GameView {
        GameView::new(record.id.as_str(), &self.base_url, &record.board, record.state)
    }

    /// Answers a request. Returns `None` for [`Request::Bye`].
    pub fn handle(&self, req: Request) -> Option<Response> {
        let result = match req {
            Request::NewGame => Ok(self.create()),
            Request::Move { game_id, pit_id } => self.make_move(&game_id, &pit_id),
            Request::Status { game_id } => self.status(&game_id),
            Request::Bye => return None,
        };
        Some(match result {
            Ok(record) => Response::Game(self.view(&record)),
            Err(err) => Response::Error(ErrorView::from(&err)),
        })
    }
}

fn parse_game_id(raw: &str) -> Result<GameId, JudgeError> {
    GameId::parse(raw).ok_or_else(|| {
        debug!("Request has empty game id");
        JudgeError::InvalidIdentifier { what: "game id" }
    })
}
