//! One match: players, token assignment, move log and win detection

use rustc_hash::FxHashSet;

use crate::board::{Board, Coord, Token};
use crate::error::{GameError, Result};
use crate::search::breadth_first_search;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Seat of a match player. The two seats are each other's opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One = 0,
    Two = 1,
}

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One logged placement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub player: PlayerId,
    pub at: Coord,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// A single named match on its own board
#[derive(Clone, Debug)]
pub struct Game {
    name: String,

    /// Moves first and starts out holding `Token::X`
    first: PlayerId,
    second: PlayerId,

    /// Token per player, indexed by `PlayerId::index`
    tokens: [Token; 2],

    board: Board,

    /// Mirror of every placement; painted with the winning region once the game ends
    winning_board: Board,

    turn_count: usize,
    moves: Vec<MoveRecord>,
    current: PlayerId,

    /// Set the first time a marking win check succeeds
    winner: Option<Token>,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn new(name: impl Into<String>, first: PlayerId, size: usize) -> Self {
        let second = first.opponent();
        let mut tokens = [Token::Empty; 2];
        tokens[first.index()] = Token::X;
        tokens[second.index()] = Token::O;

        Self {
            name: name.into(),
            first,
            second,
            tokens,
            board: Board::new(size),
            winning_board: Board::new(size),
            turn_count: 0,
            moves: Vec::new(),
            current: first,
            winner: None,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Live board access for probing strategies; see [`crate::strategy::Probe`]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn winning_board(&self) -> &Board {
        &self.winning_board
    }

    pub fn first_player(&self) -> PlayerId {
        self.first
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn token_of(&self, player: PlayerId) -> Token {
        self.tokens[player.index()]
    }

    pub fn player_with(&self, token: Token) -> Option<PlayerId> {
        [PlayerId::One, PlayerId::Two]
            .into_iter()
            .find(|&p| self.token_of(p) == token)
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    /// Move log, oldest first
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<MoveRecord> {
        self.moves.last().copied()
    }

    /// Most recent cell placed by `player`
    pub fn last_move_of(&self, player: PlayerId) -> Option<Coord> {
        self.moves
            .iter()
            .rev()
            .find(|m| m.player == player)
            .map(|m| m.at)
    }

    /// Every cell placed by `player`, most recent first
    pub fn moves_of(&self, player: PlayerId) -> Vec<Coord> {
        self.moves
            .iter()
            .rev()
            .filter(|m| m.player == player)
            .map(|m| m.at)
            .collect()
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner_token(&self) -> Option<Token> {
        self.winner
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner.and_then(|token| self.player_with(token))
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Place the current player's token, then run the marking win check.
    ///
    /// Returns the winning token if this placement ended the game.
    pub fn place(&mut self, at: Coord) -> Result<Option<Token>> {
        if self.is_over() {
            return Err(GameError::GameOver(self.name.clone()));
        }
        if !self.board.is_empty_at(at) {
            return Err(GameError::CellOccupied { x: at.x, y: at.y });
        }

        let player = self.current;
        let token = self.token_of(player);
        let placed = self.board.cell(at);
        self.board.set_token(placed, token);
        self.winning_board.set_token(placed, token);
        self.moves.push(MoveRecord { player, at });
        self.turn_count += 1;
        self.current = player.opponent();

        tracing::debug!(game = %self.name, ?player, x = at.x, y = at.y, "token placed");

        Ok(self.check_and_mark())
    }

    /// The swap window: exactly one placement, nothing else yet
    pub fn can_swap(&self) -> bool {
        !self.is_over() && self.moves.len() == 1 && self.turn_count == 1
    }

    /// Apply the pie rule. Returns the player who took over the opening stone.
    pub fn swap(&mut self) -> Result<PlayerId> {
        if !self.can_swap() {
            return Err(GameError::SwapNotAllowed);
        }

        let swapper = self.current;
        self.tokens[self.first.index()] = Token::O;
        self.tokens[self.second.index()] = Token::X;
        self.turn_count += 1;
        self.current = self.current.opponent();

        let opening = self.moves[0];
        self.moves = vec![MoveRecord {
            player: opening.player.opponent(),
            at: opening.at,
        }];

        tracing::debug!(game = %self.name, ?swapper, "tokens swapped");

        Ok(swapper)
    }

    // ========================================================================
    // WIN DETECTION
    // ========================================================================

    /// Cheap win check, no mutation: does either token connect its edges?
    pub fn is_won(&self) -> bool {
        self.has_won(Token::O) || self.has_won(Token::X)
    }

    pub fn has_won(&self, token: Token) -> bool {
        self.winning_path(token).is_some()
    }

    /// Marking win check. On the first success the winning board is painted
    /// and the game becomes terminal; later calls just report the winner.
    pub fn check_and_mark(&mut self) -> Option<Token> {
        if self.winner.is_some() {
            return self.winner;
        }

        for token in [Token::O, Token::X] {
            if let Some(path) = self.winning_path(token) {
                self.winning_board.mark_winning_cells(&path);
                self.winning_board.mark_winning_region(token);
                self.winner = Some(token);
                tracing::info!(game = %self.name, ?token, turns = self.turn_count, "game won");
                break;
            }
        }

        self.winner
    }

    /// Edge cells a token has to join: north/south rows for X, west/east columns for O
    fn target_edges(&self, token: Token) -> (Vec<Coord>, Vec<Coord>) {
        let n = self.size();
        match token {
            Token::X => (
                (0..n).map(|i| Coord::new(i, 0)).collect(),
                (0..n).map(|j| Coord::new(j, n - 1)).collect(),
            ),
            Token::O => (
                (0..n).map(|i| Coord::new(0, i)).collect(),
                (0..n).map(|j| Coord::new(n - 1, j)).collect(),
            ),
            Token::Empty | Token::Win => (Vec::new(), Vec::new()),
        }
    }

    /// First (start, end) edge pair joined by `token`, as a path.
    ///
    /// Starts are tried in edge order and ends in edge order for each start.
    /// A start already inside a component that failed is skipped, since it
    /// would reach exactly the same cells.
    fn winning_path(&self, token: Token) -> Option<Vec<Coord>> {
        if self.turn_count < self.size() {
            return None;
        }

        let (starts, ends) = self.target_edges(token);
        let ends: Vec<Coord> = ends
            .into_iter()
            .filter(|&end| self.board.token(end) == token)
            .collect();
        if ends.is_empty() {
            return None;
        }

        let mut explored: FxHashSet<Coord> = FxHashSet::default();
        for start in starts {
            if self.board.token(start) != token || explored.contains(&start) {
                continue;
            }
            let reach = breadth_first_search(&self.board, start, token);
            if let Some(&end) = ends.iter().find(|&&end| reach.reaches(end)) {
                return Some(reach.path_to(end));
            }
            explored.extend(reach.discovered());
        }

        None
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, cells: &[(usize, usize)]) -> Option<Token> {
        let mut result = None;
        for &(x, y) in cells {
            result = game.place(Coord::new(x, y)).unwrap();
        }
        result
    }

    #[test]
    fn test_game_creation() {
        let game = Game::new("Prime", PlayerId::One, 5);
        assert_eq!(game.current_player(), PlayerId::One);
        assert_eq!(game.token_of(PlayerId::One), Token::X);
        assert_eq!(game.token_of(PlayerId::Two), Token::O);
        assert_eq!(game.turn_count(), 0);
        assert!(game.moves().is_empty());
        assert!(!game.is_over());
    }

    #[test]
    fn test_place_alternates_players() {
        let mut game = Game::new("Prime", PlayerId::One, 5);
        play(&mut game, &[(0, 0), (1, 0)]);
        assert_eq!(game.turn_count(), 2);
        assert_eq!(game.current_player(), PlayerId::One);
        assert_eq!(game.board().token(Coord::new(0, 0)), Token::X);
        assert_eq!(game.board().token(Coord::new(1, 0)), Token::O);
        assert_eq!(game.winning_board().token(Coord::new(1, 0)), Token::O);
        assert_eq!(game.last_move_of(PlayerId::Two), Some(Coord::new(1, 0)));
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut game = Game::new("Prime", PlayerId::One, 5);
        play(&mut game, &[(2, 2)]);
        let err = game.place(Coord::new(2, 2)).unwrap_err();
        assert_eq!(err, GameError::CellOccupied { x: 2, y: 2 });
        assert_eq!(game.turn_count(), 1);
        assert_eq!(game.moves().len(), 1);
    }

    #[test]
    fn test_x_wins_north_to_south() {
        let mut game = Game::new("Prime", PlayerId::One, 5);
        let winner = play(
            &mut game,
            &[(0, 0), (2, 0), (0, 1), (2, 1), (0, 2), (2, 2), (0, 3), (2, 3)],
        );
        assert_eq!(winner, None);
        assert!(!game.is_won());

        let winner = game.place(Coord::new(0, 4)).unwrap();
        assert_eq!(winner, Some(Token::X));
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(PlayerId::One));
        for y in 0..5 {
            assert_eq!(game.winning_board().token(Coord::new(0, y)), Token::Win);
        }
        assert_eq!(game.winning_board().token(Coord::new(2, 2)), Token::O);
        // the live board keeps the stones
        assert_eq!(game.board().token(Coord::new(0, 4)), Token::X);

        let err = game.place(Coord::new(4, 4)).unwrap_err();
        assert_eq!(err, GameError::GameOver("Prime".to_string()));
    }

    #[test]
    fn test_o_wins_west_to_east() {
        let mut game = Game::new("Prime", PlayerId::One, 5);
        let winner = play(
            &mut game,
            &[(0, 0), (0, 2), (0, 1), (1, 2), (0, 3), (2, 2), (1, 4), (3, 2), (3, 4), (4, 2)],
        );
        assert_eq!(winner, Some(Token::O));
        assert_eq!(game.winner(), Some(PlayerId::Two));
    }

    #[test]
    fn test_no_win_below_turn_threshold() {
        let mut game = Game::new("Prime", PlayerId::One, 5);
        for y in 0..5 {
            game.board_mut().set_token(Coord::new(1, y), Token::X);
        }
        // five X stones but no turns recorded
        assert!(!game.is_won());
        assert_eq!(game.check_and_mark(), None);
    }

    #[test]
    fn test_swap_rule() {
        let mut game = Game::new("Prime", PlayerId::One, 5);
        assert!(!game.can_swap());
        play(&mut game, &[(1, 1)]);
        assert!(game.can_swap());

        let swapper = game.swap().unwrap();
        assert_eq!(swapper, PlayerId::Two);
        assert_eq!(game.token_of(PlayerId::One), Token::O);
        assert_eq!(game.token_of(PlayerId::Two), Token::X);
        assert_eq!(game.turn_count(), 2);
        assert_eq!(game.current_player(), PlayerId::One);
        assert_eq!(
            game.moves(),
            &[MoveRecord { player: PlayerId::Two, at: Coord::new(1, 1) }]
        );
        assert_eq!(game.board().token(Coord::new(1, 1)), Token::X);
        assert_eq!(game.swap(), Err(GameError::SwapNotAllowed));
    }

    #[test]
    fn test_swap_rejected_after_two_moves() {
        let mut game = Game::new("Prime", PlayerId::One, 5);
        play(&mut game, &[(1, 1), (2, 2)]);
        assert_eq!(game.swap(), Err(GameError::SwapNotAllowed));
        assert_eq!(game.turn_count(), 2);
    }

    #[test]
    fn test_second_seat_can_open() {
        let game = Game::new("Rematch", PlayerId::Two, 5);
        assert_eq!(game.first_player(), PlayerId::Two);
        assert_eq!(game.current_player(), PlayerId::Two);
        assert_eq!(game.token_of(PlayerId::Two), Token::X);
    }
}
