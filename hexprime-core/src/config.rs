//! Match configuration: board size, seats and the first session's name

use crate::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{GameError, Result};
use crate::strategy::Strategy;

/// Name given to the session a match starts with
pub const DEFAULT_SESSION_NAME: &str = "Prime";

/// Everything needed to open a match
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Side length of every board in the match
    pub board_size: usize,
    /// Always human; moves first in the initial session
    pub player_one: String,
    /// Automated when named after a strategy
    pub player_two: String,
    pub initial_session: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: MIN_BOARD_SIZE,
            player_one: "Alice".to_string(),
            player_two: "Bob".to_string(),
            initial_session: DEFAULT_SESSION_NAME.to_string(),
        }
    }
}

impl MatchConfig {
    pub fn new(
        board_size: usize,
        player_one: impl Into<String>,
        player_two: impl Into<String>,
    ) -> Self {
        Self {
            board_size,
            player_one: player_one.into(),
            player_two: player_two.into(),
            ..Default::default()
        }
    }

    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_initial_session(mut self, name: impl Into<String>) -> Self {
        self.initial_session = name.into();
        self
    }

    /// Strategy of the second seat, picked by its name
    pub fn player_two_strategy(&self) -> Strategy {
        Strategy::from_name(&self.player_two).unwrap_or_default()
    }

    /// Odd sides in `[MIN_BOARD_SIZE, MAX_BOARD_SIZE]`
    pub fn is_valid_board_size(size: usize) -> bool {
        (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) && size % 2 == 1
    }

    /// Check the configuration before anything is built from it
    pub fn validate(&self) -> Result<()> {
        if !Self::is_valid_board_size(self.board_size) {
            return Err(GameError::InvalidBoardSize(self.board_size));
        }
        if self.player_one.is_empty() || self.player_two.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        if Strategy::is_reserved_name(&self.player_one) {
            return Err(GameError::ReservedPlayerName(self.player_one.clone()));
        }
        if self.player_one == self.player_two {
            return Err(GameError::DuplicatePlayerName(self.player_one.clone()));
        }
        if self.initial_session.is_empty() {
            return Err(GameError::EmptySessionName);
        }
        Ok(())
    }
}
