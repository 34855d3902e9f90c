//! Session manager: the two match players, every open session and the active one
//!
//! All command-layer operations go through here. Each one either applies
//! completely or returns an error with nothing changed.

use std::fmt;

use crate::board::Coord;
use crate::config::MatchConfig;
use crate::coordinator::{Coordinator, Decision};
use crate::error::{GameError, Result};
use crate::game::{Game, PlayerId};
use crate::strategy::Strategy;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A match participant. The opponent is always the other seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    strategy: Strategy,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn is_automated(&self) -> bool {
        self.strategy.is_automated()
    }
}

/// One line of the move history
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub player: String,
    pub x: usize,
    pub y: usize,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.player, self.x, self.y)
    }
}

/// Result of an accepted placement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub player: String,
    pub at: Coord,
    /// Set when this placement won the session
    pub winner: Option<String>,
}

impl PlacementOutcome {
    pub fn won_game(&self) -> bool {
        self.winner.is_some()
    }
}

/// What an automated turn did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AutomatedTurn {
    Placed(PlacementOutcome),
    Swapped { player: String },
    Passed { player: String },
}

/// An open session as listed to the players
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub name: String,
    pub moves: usize,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.moves)
    }
}

// ============================================================================
// SESSION MANAGER
// ============================================================================

pub struct SessionManager {
    /// Indexed by `PlayerId::index`
    players: [Player; 2],
    board_size: usize,
    /// Insertion order, unique by name
    sessions: Vec<Game>,
    active: usize,
    /// Present when player two is automated
    coordinator: Option<Coordinator>,
}

impl SessionManager {
    /// Validate the configuration and open the initial session
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;

        let strategy = config.player_two_strategy();
        let players = [
            Player::new(config.player_one, Strategy::Human),
            Player::new(config.player_two, strategy),
        ];
        let coordinator = strategy
            .is_automated()
            .then(|| Coordinator::new(PlayerId::Two, strategy));
        let first = Game::new(config.initial_session, PlayerId::One, config.board_size);

        tracing::debug!(
            session = %first.name(),
            size = config.board_size,
            player_one = %players[0].name(),
            player_two = %players[1].name(),
            "match opened"
        );

        Ok(Self {
            players,
            board_size: config.board_size,
            sessions: vec![first],
            active: 0,
            coordinator,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn active_game(&self) -> &Game {
        &self.sessions[self.active]
    }

    pub fn session(&self, name: &str) -> Option<&Game> {
        self.sessions.iter().find(|g| g.name() == name)
    }

    pub fn sessions(&self) -> &[Game] {
        &self.sessions
    }

    /// Player to move in the active session
    pub fn current_player(&self) -> &Player {
        self.player(self.active_game().current_player())
    }

    /// Name of the winner of the active session, once it is over
    pub fn winner_name(&self) -> Option<&str> {
        self.active_game().winner().map(|id| self.player(id).name())
    }

    pub fn has_automated_player(&self) -> bool {
        self.coordinator.is_some()
    }

    /// Does the active session wait on the automated player?
    pub fn is_automated_turn(&self) -> bool {
        let game = self.active_game();
        !game.is_over()
            && self
                .coordinator
                .is_some_and(|c| c.player() == game.current_player())
    }

    fn active_game_mut(&mut self) -> &mut Game {
        &mut self.sessions[self.active]
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Place the current player's token at signed coordinates
    pub fn place_token(&mut self, x: i64, y: i64) -> Result<PlacementOutcome> {
        let game = self.active_game();
        if game.is_over() {
            return Err(GameError::GameOver(game.name().to_string()));
        }
        let at = game
            .board()
            .coord(x, y)
            .ok_or(GameError::InvalidCoordinates { x, y })?;
        self.place_at(at)
    }

    fn place_at(&mut self, at: Coord) -> Result<PlacementOutcome> {
        let mover = self.active_game().current_player();
        self.active_game_mut().place(at)?;

        Ok(PlacementOutcome {
            player: self.player(mover).name().to_string(),
            at,
            winner: self.winner_name().map(str::to_string),
        })
    }

    /// Apply the pie rule. Returns the name of the player who swapped.
    pub fn request_swap(&mut self) -> Result<String> {
        let swapper = self.active_game_mut().swap()?;
        Ok(self.player(swapper).name().to_string())
    }

    // ========================================================================
    // SESSIONS
    // ========================================================================

    /// Open a new session and make it active.
    ///
    /// If the active session is over, its winner moves first in the new one.
    pub fn start_new_session(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(GameError::EmptySessionName);
        }
        if self.session(name).is_some() {
            return Err(GameError::SessionExists(name.to_string()));
        }

        let first = self.active_game().winner().unwrap_or(PlayerId::One);
        self.sessions.push(Game::new(name, first, self.board_size));
        self.active = self.sessions.len() - 1;

        tracing::debug!(session = name, first = %self.player(first).name(), "session started");
        Ok(())
    }

    /// Make another open session the active one
    pub fn switch_session(&mut self, name: &str) -> Result<()> {
        let index = self
            .sessions
            .iter()
            .position(|g| g.name() == name)
            .ok_or_else(|| GameError::UnknownSession(name.to_string()))?;
        if self.sessions[index].is_over() {
            return Err(GameError::SessionFinished(name.to_string()));
        }
        if index == self.active {
            return Err(GameError::AlreadyActive(name.to_string()));
        }

        self.active = index;
        tracing::debug!(session = name, "session switched");
        Ok(())
    }

    /// Sessions still in play, in the order they were opened
    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        self.sessions
            .iter()
            .filter(|g| !g.is_over())
            .map(|g| SessionSummary {
                name: g.name().to_string(),
                moves: g.moves().len(),
            })
            .collect()
    }

    // ========================================================================
    // HISTORY
    // ========================================================================

    /// Logged moves of the active session, most recent first.
    ///
    /// `None` yields only the latest move. A count must lie in `1..=moves`.
    pub fn query_history(&self, count: Option<i64>) -> Result<Vec<HistoryEntry>> {
        let moves = self.active_game().moves();
        let take = match count {
            None => 1,
            Some(n) => match usize::try_from(n) {
                Ok(n) if n >= 1 && n <= moves.len() => n,
                _ => return Err(GameError::InvalidHistoryCount(n)),
            },
        };
        if moves.is_empty() {
            return Err(GameError::NoMoves);
        }

        Ok(moves
            .iter()
            .rev()
            .take(take)
            .map(|m| HistoryEntry {
                player: self.player(m.player).name().to_string(),
                x: m.at.x,
                y: m.at.y,
            })
            .collect())
    }

    // ========================================================================
    // AUTOMATED PLAYER
    // ========================================================================

    fn automated_coordinator(&self) -> Result<Coordinator> {
        let game = self.active_game();
        if game.is_over() {
            return Err(GameError::GameOver(game.name().to_string()));
        }
        match self.coordinator {
            Some(c) if c.player() == game.current_player() => Ok(c),
            _ => Err(GameError::NotAutomated(self.current_player().name().to_string())),
        }
    }

    /// Ask the automated player what it would do, without applying it
    pub fn request_automated_move(&mut self) -> Result<Decision> {
        let coordinator = self.automated_coordinator()?;
        Ok(coordinator.decide(self.active_game_mut()))
    }

    /// Let the automated player take its turn
    pub fn play_automated_turn(&mut self) -> Result<AutomatedTurn> {
        let coordinator = self.automated_coordinator()?;
        let player = self.player(coordinator.player()).name().to_string();

        match coordinator.decide(self.active_game_mut()) {
            Decision::Place(at) => self.place_at(at).map(AutomatedTurn::Placed),
            Decision::Swap => {
                self.active_game_mut().swap()?;
                Ok(AutomatedTurn::Swapped { player })
            }
            Decision::Pass => Ok(AutomatedTurn::Passed { player }),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
