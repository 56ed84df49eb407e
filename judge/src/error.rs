use kalah::{ErrorKind, ErrorView, IllegalMove, InvalidPitId};

use crate::store::GameId;

#[derive(Debug)]
/// Error type for one request.
pub enum JudgeError {
    /// A game or pit id was missing or blank.
    InvalidIdentifier { what: &'static str },
    InvalidPitId(InvalidPitId),
    RecordNotFound { game_id: GameId },
    IllegalMove(IllegalMove),
}

impl JudgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JudgeError::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            JudgeError::InvalidPitId(_) => ErrorKind::InvalidPitId,
            JudgeError::RecordNotFound { .. } => ErrorKind::RecordNotFound,
            JudgeError::IllegalMove(err) => ErrorKind::from(err),
        }
    }
}

impl std::error::Error for JudgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JudgeError::InvalidPitId(err) => Some(err),
            JudgeError::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for JudgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JudgeError::InvalidIdentifier { what } => write!(f, "The {} is empty", what),
            JudgeError::InvalidPitId(err) => write!(f, "{}", err),
            JudgeError::RecordNotFound { game_id } => write!(f, "No game with id '{}'", game_id),
            JudgeError::IllegalMove(err) => write!(f, "{}", err),
        }
    }
}

impl From<InvalidPitId> for JudgeError {
    fn from(err: InvalidPitId) -> Self {
        JudgeError::InvalidPitId(err)
    }
}

impl From<IllegalMove> for JudgeError {
    fn from(err: IllegalMove) -> Self {
        JudgeError::IllegalMove(err)
    }
}

impl From<&JudgeError> for ErrorView {
    fn from(err: &JudgeError) -> Self {
        ErrorView::new(err.kind(), err.to_string())
    }
}
