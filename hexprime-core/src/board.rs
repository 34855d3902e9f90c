//! Hex board geometry on a rhombic grid stored as an offset square grid

use std::fmt;

/// Smallest playable board side
pub const MIN_BOARD_SIZE: usize = 5;

/// Largest playable board side
pub const MAX_BOARD_SIZE: usize = 12345;

/// Neighbor deltas (dx, dy) for cells on even rows.
///
/// Both tables describe the same six neighbors; the order differs and
/// breadth-first discovery follows it.
pub const EVEN_ROW_DIRECTIONS: [(isize, isize); 6] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (-1, 1),
];

/// Neighbor deltas (dx, dy) for cells on odd rows
pub const ODD_ROW_DIRECTIONS: [(isize, isize); 6] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 1),
    (1, -1),
    (-1, 0),
];

/// Grid coordinates. `y` is the row, `x` the position inside the row.
///
/// The derived ordering compares `x` first, then `y`: the
/// north-westernmost of two cells is the smaller one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Delta table for this cell's row parity
    pub fn directions(&self) -> &'static [(isize, isize); 6] {
        if self.y % 2 == 0 {
            &EVEN_ROW_DIRECTIONS
        } else {
            &ODD_ROW_DIRECTIONS
        }
    }

    /// Sum of both coordinates
    pub fn parity_sum(&self) -> usize {
        self.x + self.y
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Content of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Token {
    #[default]
    Empty,
    /// Connects the north row to the south row
    X,
    /// Connects the west column to the east column
    O,
    /// Part of a painted winning region
    Win,
}

impl Token {
    /// Single-character glyph used by the board rendering
    pub fn glyph(self) -> char {
        match self {
            Token::Empty => '.',
            Token::X => 'X',
            Token::O => 'O',
            Token::Win => '*',
        }
    }

    /// The other player token. Non-player tokens map to themselves.
    pub fn rival(self) -> Self {
        match self {
            Token::X => Token::O,
            Token::O => Token::X,
            other => other,
        }
    }
}

/// A cell snapshot: fixed coordinates plus the content it held when read.
///
/// Identity is the coordinate pair only; two cells at the same coordinates
/// compare equal whatever their content. A `Cell` is a copy, never a view:
/// re-read through [`Board::cell`] after mutating the board.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    coord: Coord,
    content: Token,
}

impl Cell {
    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn content(&self) -> Token {
        self.content
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}

impl std::hash::Hash for Cell {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}

impl From<Cell> for Coord {
    fn from(cell: Cell) -> Self {
        cell.coord
    }
}

impl From<&Cell> for Coord {
    fn from(cell: &Cell) -> Self {
        cell.coord
    }
}

/// Square grid of `size * size` cells, created once and never resized
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    /// Row-major contents, index `y * size + x`
    cells: Vec<Token>,
}

impl Board {
    /// Create an empty board. Size validation happens in [`crate::MatchConfig`].
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Token::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Checked conversion from signed coordinates
    pub fn coord(&self, x: i64, y: i64) -> Option<Coord> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.size && y < self.size).then_some(Coord::new(x, y))
    }

    fn index(&self, at: Coord) -> usize {
        debug_assert!(at.x < self.size && at.y < self.size, "{at:?} off board");
        at.y * self.size + at.x
    }

    /// Content at the given coordinates
    pub fn token(&self, at: Coord) -> Token {
        self.cells[self.index(at)]
    }

    /// Snapshot of the cell at the given coordinates
    pub fn cell(&self, at: Coord) -> Cell {
        Cell {
            coord: at,
            content: self.token(at),
        }
    }

    pub fn is_empty_at(&self, at: Coord) -> bool {
        self.token(at) == Token::Empty
    }

    /// Overwrite the board's own cell at `at`'s coordinates
    pub fn set_token(&mut self, at: impl Into<Coord>, token: Token) {
        let idx = self.index(at.into());
        self.cells[idx] = token;
    }

    /// In-range neighbors, in the parity table's order
    pub fn neighbors(&self, at: Coord) -> impl Iterator<Item = Coord> + '_ {
        at.directions().iter().filter_map(move |&(dx, dy)| {
            let x = at.x.checked_add_signed(dx)?;
            let y = at.y.checked_add_signed(dy)?;
            (x < self.size && y < self.size).then_some(Coord::new(x, y))
        })
    }

    /// All coordinates, row by row from the north
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Coord::new(x, y)))
    }

    /// All cells, row by row from the north
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.coords().map(|at| self.cell(at))
    }

    /// Empty coordinates, row by row from the north
    pub fn empty_coords(&self) -> Vec<Coord> {
        self.coords().filter(|&at| self.is_empty_at(at)).collect()
    }

    /// First empty cell, row by row from the north
    pub fn first_empty(&self) -> Option<Coord> {
        self.coords().find(|&at| self.is_empty_at(at))
    }

    /// All coordinates, column by column from the west
    pub fn coords_by_column(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |x| (0..size).map(move |y| Coord::new(x, y)))
    }

    /// Empty coordinates, column by column from the west
    pub fn empty_coords_by_column(&self) -> Vec<Coord> {
        self.coords_by_column().filter(|&at| self.is_empty_at(at)).collect()
    }

    /// First empty cell, column by column from the west
    pub fn first_empty_by_column(&self) -> Option<Coord> {
        self.coords_by_column().find(|&at| self.is_empty_at(at))
    }

    /// Raw contents in row-major order
    pub fn tokens(&self) -> &[Token] {
        &self.cells
    }

    pub fn center(&self) -> Coord {
        let mid = (self.size - 1) / 2;
        Coord::new(mid, mid)
    }

    /// Point reflection through the center cell
    pub fn mirror(&self, at: Coord) -> Coord {
        Coord::new(self.size - 1 - at.x, self.size - 1 - at.y)
    }

    /// Paint every cell of a confirmed path with the win marker
    pub fn mark_winning_cells(&mut self, path: &[Coord]) {
        for &at in path {
            self.set_token(at, Token::Win);
        }
    }

    /// Spread the win marker to every `winner` cell connected to a marked cell
    pub fn mark_winning_region(&mut self, winner: Token) {
        let mut frontier: Vec<Coord> = self
            .coords()
            .filter(|&at| self.token(at) == Token::Win)
            .collect();

        while let Some(at) = frontier.pop() {
            let absorbed: Vec<Coord> = self
                .neighbors(at)
                .filter(|&n| self.token(n) == winner)
                .collect();
            for n in absorbed {
                self.set_token(n, Token::Win);
                frontier.push(n);
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            if y > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", " ".repeat(y))?;
            for x in 0..self.size {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.token(Coord::new(x, y)).glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_starts_empty() {
        for size in [5, 7, 11] {
            let board = Board::new(size);
            assert_eq!(board.cells().count(), size * size);
            assert!(board.cells().all(|c| c.content() == Token::Empty));
        }
    }

    #[test]
    fn test_neighbor_symmetry() {
        let board = Board::new(7);
        for at in board.coords() {
            for n in board.neighbors(at) {
                assert!(
                    board.neighbors(n).any(|back| back == at),
                    "{at:?} -> {n:?} is not symmetric"
                );
            }
        }
    }

    #[test]
    fn test_neighbor_counts() {
        let board = Board::new(5);
        assert_eq!(board.neighbors(Coord::new(2, 2)).count(), 6);
        assert_eq!(board.neighbors(Coord::new(0, 0)).count(), 2);
        assert_eq!(board.neighbors(Coord::new(4, 4)).count(), 2);
        assert_eq!(board.neighbors(Coord::new(4, 0)).count(), 3);
    }

    #[test]
    fn test_neighbor_order_follows_parity() {
        let board = Board::new(5);
        let even: Vec<_> = board.neighbors(Coord::new(2, 2)).collect();
        assert_eq!(even[1], Coord::new(3, 1));
        let odd: Vec<_> = board.neighbors(Coord::new(2, 1)).collect();
        assert_eq!(odd[1], Coord::new(3, 1));
        assert_eq!(odd[4], Coord::new(3, 0));
    }

    #[test]
    fn test_cell_identity_ignores_content() {
        let mut board = Board::new(5);
        let before = board.cell(Coord::new(1, 2));
        board.set_token(before, Token::X);
        let after = board.cell(Coord::new(1, 2));
        assert_eq!(before, after);
        assert_eq!(before.content(), Token::Empty);
        assert_eq!(after.content(), Token::X);
    }

    #[test]
    fn test_render() {
        let mut board = Board::new(5);
        board.set_token(Coord::new(0, 0), Token::X);
        board.set_token(Coord::new(4, 1), Token::O);
        board.set_token(Coord::new(2, 4), Token::Win);
        let expected = "X . . . .\n . . . . O\n  . . . . .\n   . . . . .\n    . . * . .";
        assert_eq!(board.to_string(), expected);
        assert_eq!(board.to_string(), board.to_string());
    }

    #[test]
    fn test_mirror_through_center() {
        let board = Board::new(7);
        assert_eq!(board.center(), Coord::new(3, 3));
        assert_eq!(board.mirror(Coord::new(0, 1)), Coord::new(6, 5));
        assert_eq!(board.mirror(board.center()), board.center());
    }

    #[test]
    fn test_mark_winning_region_absorbs_connected_cells() {
        let mut board = Board::new(5);
        for y in 0..5 {
            board.set_token(Coord::new(0, y), Token::X);
        }
        board.set_token(Coord::new(1, 2), Token::X);
        board.set_token(Coord::new(4, 4), Token::X);
        board.set_token(Coord::new(2, 2), Token::O);

        board.mark_winning_cells(&[Coord::new(0, 0)]);
        board.mark_winning_region(Token::X);

        for y in 0..5 {
            assert_eq!(board.token(Coord::new(0, y)), Token::Win);
        }
        assert_eq!(board.token(Coord::new(1, 2)), Token::Win);
        assert_eq!(board.token(Coord::new(4, 4)), Token::X);
        assert_eq!(board.token(Coord::new(2, 2)), Token::O);
    }

    #[test]
    fn test_coord_bounds() {
        let board = Board::new(5);
        assert_eq!(board.coord(4, 0), Some(Coord::new(4, 0)));
        assert_eq!(board.coord(5, 0), None);
        assert_eq!(board.coord(-1, 2), None);
    }

    #[test]
    fn test_scan_orders() {
        let mut board = Board::new(5);
        let rows: Vec<Coord> = board.coords().take(3).collect();
        assert_eq!(rows, vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]);
        let columns: Vec<Coord> = board.coords_by_column().take(3).collect();
        assert_eq!(columns, vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]);

        board.set_token(Coord::new(0, 0), Token::X);
        assert_eq!(board.first_empty(), Some(Coord::new(1, 0)));
        assert_eq!(board.first_empty_by_column(), Some(Coord::new(0, 1)));
        assert_eq!(board.empty_coords_by_column().len(), 24);
    }
}
