use crate::{PitId, TurnState};

/// The error type for [`Board::calculate()`](crate::Board::calculate), i.e. for playing a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    /// No moves can be made once the game is over.
    GameFinished,
    /// The pit belongs to the player who is not on turn.
    WrongPlayer { pit: PitId, state: TurnState },
    EmptyPit { pit: PitId },
}

impl IllegalMove {
    /// Whether the move conflicts with the board, as opposed to the game being over.
    ///
    /// The caller can recover from these by picking another pit.
    pub fn is_invalid_move(&self) -> bool {
        !matches!(self, IllegalMove::GameFinished)
    }
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::GameFinished => write!(f, "The game has already finished"),
            IllegalMove::WrongPlayer { pit, state } => {
                write!(f, "Pit {} cannot be played, it is {}", pit, state)
            }
            IllegalMove::EmptyPit { pit } => write!(f, "Pit {} is empty", pit),
        }
    }
}

/// A pit identifier that does not name a playable pit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidPitId {
    NotANumber(String),
    /// Outside of [1-6, 8-13]. Stores can't be played.
    OutOfRange(i64),
}

impl std::error::Error for InvalidPitId {}

impl std::fmt::Display for InvalidPitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidPitId::NotANumber(raw) => write!(f, "Pit id '{}' is not a number", raw),
            InvalidPitId::OutOfRange(id) => {
                write!(f, "Pit id {} is outside of the allowed range [1-6,8-13]", id)
            }
        }
    }
}
