use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Board, IllegalMove, Outcome, TurnState, NUM_SLOTS};

/// Request sent to the judge, one JSON object per line.
///
/// Identifiers are passed through as the client wrote them; checking them is
/// the judge's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Start a new game in the starting layout, south to move.
    ///
    /// The response is a [`GameView`].
    NewGame,
    /// Play a pit in an existing game.
    ///
    /// The response is a [`GameView`] of the game after the move.
    Move { game_id: String, pit_id: String },
    /// Look up a game without changing it.
    Status { game_id: String },
    /// The judge should shut down.
    Bye,
}

/// Answer to a [`Request`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Game(GameView),
    Error(ErrorView),
}

/// A game as shown to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub id: String,
    pub url: String,
    /// Seed counts keyed by 1-based slot number, 1 through 14.
    pub status: BTreeMap<u8, u32>,
    pub state: TurnState,
    /// Only present once the game has finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub winner: Option<Outcome>,
}

impl GameView {
    pub fn new(id: &str, base_url: &str, board: &Board, state: TurnState) -> Self {
        Self {
            id: String::from(id),
            url: format!("{}/games/{}", base_url, id),
            status: status_map(board),
            state,
            winner: state.is_finished().then(|| board.outcome()),
        }
    }
}

/// Renders the board with 1-based slot numbers.
pub fn status_map(board: &Board) -> BTreeMap<u8, u32> {
    (0..NUM_SLOTS).map(|i| (i as u8 + 1, board[i])).collect()
}

/// The kinds of failures a client can see. Each has its own stable status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request line was not a valid [`Request`].
    MalformedRequest,
    /// Missing or blank game or pit id.
    InvalidIdentifier,
    InvalidPitId,
    RecordNotFound,
    GameFinished,
    /// Wrong player's pit, or an empty pit.
    InvalidMove,
}

impl ErrorKind {
    /// The HTTP-style status code for this kind of error.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::MalformedRequest | ErrorKind::InvalidIdentifier | ErrorKind::InvalidPitId => 400,
            ErrorKind::RecordNotFound => 404,
            ErrorKind::GameFinished | ErrorKind::InvalidMove => 409,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            ErrorKind::MalformedRequest => "Malformed request",
            ErrorKind::InvalidIdentifier => "Invalid entity Id",
            ErrorKind::InvalidPitId => "Invalid pitId. Should be in [1-6,8-13] range",
            ErrorKind::RecordNotFound => "Game record was not found",
            ErrorKind::GameFinished => "The game has finished",
            ErrorKind::InvalidMove => "PitId conflicts current game state",
        }
    }
}

impl From<&IllegalMove> for ErrorKind {
    fn from(err: &IllegalMove) -> Self {
        match err {
            IllegalMove::GameFinished => ErrorKind::GameFinished,
            IllegalMove::WrongPlayer { .. } | IllegalMove::EmptyPit { .. } => ErrorKind::InvalidMove,
        }
    }
}

/// A failed request as shown to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorView {
    pub kind: ErrorKind,
    pub status: u16,
    pub message: String,
}

impl ErrorView {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: kind.status_code(),
            message: message.into(),
        }
    }
}

impl From<ErrorKind> for ErrorView {
    fn from(kind: ErrorKind) -> Self {
        ErrorView::new(kind, kind.reason())
    }
}
