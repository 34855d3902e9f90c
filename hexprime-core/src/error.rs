//! Error types for match and session operations

/// Result alias used across the core
pub type Result<T> = std::result::Result<T, GameError>;

/// Recoverable failures reported to the command layer.
///
/// None of these leave partial state behind: an operation that fails
/// has not touched the board, the move log or the session list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the given board size {0} is not valid")]
    InvalidBoardSize(usize),

    #[error("the players name can not be equal: {0}")]
    DuplicatePlayerName(String),

    #[error("the name {0} is reserved for an artificial player")]
    ReservedPlayerName(String),

    #[error("a player name can not be empty")]
    EmptyPlayerName,

    #[error("the game {0} is over and can not be played anymore")]
    GameOver(String),

    #[error("the given coordinates {x} {y} are not valid")]
    InvalidCoordinates { x: i64, y: i64 },

    #[error("tile {x} {y} already placed")]
    CellOccupied { x: usize, y: usize },

    #[error("the swap function is only valid in the second game turn")]
    SwapNotAllowed,

    #[error("the given game name is not valid")]
    EmptySessionName,

    #[error("the game name {0} already exists")]
    SessionExists(String),

    #[error("the game {0} does not exist")]
    UnknownSession(String),

    #[error("the game {0} is over and can not be switched")]
    SessionFinished(String),

    #[error("the game {0} is the current game and can not be switched")]
    AlreadyActive(String),

    #[error("the current game has no movements yet")]
    NoMoves,

    #[error("the given number of movements to show ({0}) is not valid")]
    InvalidHistoryCount(i64),

    #[error("{0} is not an artificial player")]
    NotAutomated(String),
}
