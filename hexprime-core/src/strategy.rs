//! Decision strategies for automated players
//!
//! Every probe places a hypothetical token on the live board of the game
//! being decided and must hand the board back exactly as it found it.
//! [`Probe`] owns that contract: each write is recorded and undone in
//! reverse order when the probe goes out of scope, including on early
//! return.

use std::ops::{Deref, DerefMut};

use crate::board::{Board, Coord, Token};
use crate::game::{Game, PlayerId};
use crate::search::shortest_path_to_any;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Player name that selects the greedy scanning strategy
pub const GREEDY_SCAN_NAME: &str = "BogoAI";

/// Player name that selects the path-directed strategy
pub const PATH_DIRECTED_NAME: &str = "HeroAI";

// ============================================================================
// PROBE GUARD
// ============================================================================

/// Scoped hypothetical edits on a game's live board
pub struct Probe<'a> {
    game: &'a mut Game,
    /// (cell, content before the write), oldest first
    saved: Vec<(Coord, Token)>,
}

impl<'a> Probe<'a> {
    pub fn new(game: &'a mut Game) -> Self {
        Self {
            game,
            saved: Vec::new(),
        }
    }

    /// Overwrite a cell, remembering what it held
    pub fn set(&mut self, at: Coord, token: Token) {
        let previous = self.game.board().token(at);
        self.saved.push((at, previous));
        self.game.board_mut().set_token(at, token);
    }

    /// Number of writes still to be undone
    pub fn pending(&self) -> usize {
        self.saved.len()
    }
}

impl Deref for Probe<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl DerefMut for Probe<'_> {
    fn deref_mut(&mut self) -> &mut Game {
        self.game
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        while let Some((at, previous)) = self.saved.pop() {
            self.game.board_mut().set_token(at, previous);
        }
    }
}

// ============================================================================
// STRATEGY
// ============================================================================

/// How a player picks its moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Moves come from the command layer
    #[default]
    Human,
    /// Win, block, swap on even openings, otherwise mirror through the center
    GreedyScan,
    /// Win, block, otherwise extend the own chain toward the target edge
    PathDirected,
}

impl Strategy {
    /// Strategy selected by a reserved player name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            GREEDY_SCAN_NAME => Some(Strategy::GreedyScan),
            PATH_DIRECTED_NAME => Some(Strategy::PathDirected),
            _ => None,
        }
    }

    pub fn reserved_name(self) -> Option<&'static str> {
        match self {
            Strategy::Human => None,
            Strategy::GreedyScan => Some(GREEDY_SCAN_NAME),
            Strategy::PathDirected => Some(PATH_DIRECTED_NAME),
        }
    }

    pub fn is_reserved_name(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    pub fn is_automated(self) -> bool {
        self != Strategy::Human
    }

    // ========================================================================
    // PROBES
    // ========================================================================

    /// First empty cell, column by column, where `me`'s token wins immediately
    pub fn winning_move(self, game: &mut Game, me: PlayerId) -> Option<Coord> {
        if !self.is_automated() {
            return None;
        }
        let token = game.token_of(me);
        game.board()
            .empty_coords_by_column()
            .into_iter()
            .find(|&at| wins_with(game, at, token))
    }

    /// Smallest empty cell (by `x`, then `y`) where the opponent would win next turn
    pub fn blocking_move(self, game: &mut Game, me: PlayerId) -> Option<Coord> {
        if !self.is_automated() {
            return None;
        }
        let threat = game.token_of(me).rival();
        game.board()
            .empty_coords()
            .into_iter()
            .filter(|&at| wins_with(game, at, threat))
            .min()
    }

    /// Take over the opponent's opening stone when its coordinate sum is even
    pub fn should_swap(self, game: &Game, me: PlayerId) -> bool {
        if self != Strategy::GreedyScan || !game.can_swap() {
            return false;
        }
        match game.moves() {
            [opening] => opening.player != me && opening.at.parity_sum() % 2 == 0,
            _ => false,
        }
    }

    /// First stone of a player that has not placed anything yet
    pub fn opening_move(self, game: &Game, me: PlayerId) -> Option<Coord> {
        match self {
            Strategy::PathDirected if game.last_move_of(me).is_none() => {
                game.board().first_empty_by_column()
            }
            _ => None,
        }
    }

    /// Move used when nothing more urgent applies
    pub fn fallback_move(self, game: &mut Game, me: PlayerId) -> Option<Coord> {
        match self {
            Strategy::Human => None,
            Strategy::GreedyScan => mirror_move(game),
            Strategy::PathDirected => path_move(game, me),
        }
    }
}

/// Would placing `token` at `at` complete a connection?
fn wins_with(game: &mut Game, at: Coord, token: Token) -> bool {
    let mut probe = Probe::new(game);
    probe.set(at, token);
    probe.is_won()
}

// ============================================================================
// GREEDY SCAN
// ============================================================================

fn mirror_move(game: &Game) -> Option<Coord> {
    let board = game.board();
    game.last_move()
        .map(|last| board.mirror(last.at))
        .filter(|&mirrored| board.is_empty_at(mirrored))
        .or_else(|| board.first_empty())
}

// ============================================================================
// PATH DIRECTED
// ============================================================================

/// Is `at` on the far edge `token` is heading for? X heads south, O heads east.
pub fn on_target_edge(board: &Board, at: Coord, token: Token) -> bool {
    let last = board.size() - 1;
    match token {
        Token::X => at.y == last,
        Token::O => at.x == last,
        Token::Empty | Token::Win => false,
    }
}

/// Neighbors of `from` that start a shortest empty route to the target edge.
///
/// Only routes of the overall shortest length survive. A neighbor that is
/// one of `own` cells contributes its whole route instead of itself. Empty
/// when `from` already sits on the target edge.
fn forward_candidates(board: &Board, from: Coord, token: Token, own: &[Coord]) -> Vec<Coord> {
    if on_target_edge(board, from, token) {
        return Vec::new();
    }

    let mut best: Option<usize> = None;
    let mut candidates = Vec::new();
    for neighbor in board.neighbors(from).filter(|&n| board.is_empty_at(n)) {
        let route = shortest_path_to_any(board, neighbor, Token::Empty, |at| {
            on_target_edge(board, at, token)
        });
        if route.is_empty() {
            continue;
        }
        match best {
            Some(len) if route.len() > len => continue,
            Some(len) if route.len() == len => {}
            _ => {
                best = Some(route.len());
                candidates.clear();
            }
        }
        if own.contains(&neighbor) {
            candidates.extend(route);
        } else {
            candidates.push(neighbor);
        }
    }
    candidates
}

fn path_move(game: &mut Game, me: PlayerId) -> Option<Coord> {
    let token = game.token_of(me);
    let Some(last) = game.last_move_of(me) else {
        return game.board().first_empty_by_column();
    };

    let forward = forward_candidates(game.board(), last, token, &[]);
    if let Some(best) = forward.into_iter().min() {
        return Some(best);
    }

    repair_move(game, me, token).or_else(|| game.board().first_empty_by_column())
}

/// Lift own stones, most recent first and cumulatively, until one of the
/// vacated cells opens a route to a cell the player does not already hold
fn repair_move(game: &mut Game, me: PlayerId, token: Token) -> Option<Coord> {
    let own = game.moves_of(me);
    let mut probe = Probe::new(game);
    for &cell in &own {
        probe.set(cell, Token::Empty);
        let pick = forward_candidates(probe.board(), cell, token, &own)
            .into_iter()
            .filter(|c| !own.contains(c))
            .min();
        if pick.is_some() {
            tracing::trace!(from = %cell, vacated = probe.pending(), "repair route found");
            return pick;
        }
    }
    None
}

// ============================================================================
// TESTS
// ============================================================================
