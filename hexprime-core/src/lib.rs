//! HEXPRIME Core - Hex connection game engine
//!
//! This crate provides everything below the command layer:
//! - Board geometry (offset square grid with parity neighbor tables)
//! - Connectivity search (breadth-first reachability, priority-queue shortest path)
//! - Game sessions with the pie rule and win detection
//! - Decision strategies and the automated-player coordinator
//! - The session manager the command layer drives

pub mod board;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod game;
pub mod manager;
pub mod search;
pub mod strategy;

// Re-exports for convenient access
pub use board::{Board, Cell, Coord, Token, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use config::{MatchConfig, DEFAULT_SESSION_NAME};
pub use coordinator::{Coordinator, Decision, Tier};
pub use error::{GameError, Result};
pub use game::{Game, MoveRecord, PlayerId};
pub use manager::{
    AutomatedTurn, HistoryEntry, PlacementOutcome, Player, SessionManager, SessionSummary,
};
pub use search::{breadth_first_path, breadth_first_search, shortest_path, Reachability};
pub use strategy::{Probe, Strategy, GREEDY_SCAN_NAME, PATH_DIRECTED_NAME};
