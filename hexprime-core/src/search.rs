//! Connectivity search over the cells holding one target token
//!
//! Both searches only traverse cells whose content equals the caller's
//! target token. With a player token they answer "are these two edge cells
//! joined by a chain of stones"; with `Token::Empty` they plan a route
//! through free cells.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{Board, Coord, Token};

/// Every edge of the hex graph costs the same
const STEP_COST: usize = 1;

// ============================================================================
// BREADTH-FIRST REACHABILITY
// ============================================================================

/// Discovery tree produced by one breadth-first pass
#[derive(Clone, Debug)]
pub struct Reachability {
    /// Discovered cell -> the cell it was first seen from (`None` for the start)
    discovered: FxHashMap<Coord, Option<Coord>>,
}

impl Reachability {
    pub fn reaches(&self, end: Coord) -> bool {
        self.discovered.contains_key(&end)
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    /// Every discovered cell, the start included
    pub fn discovered(&self) -> impl Iterator<Item = Coord> + '_ {
        self.discovered.keys().copied()
    }

    /// Predecessor chain from the start to `end`, empty when `end` was never discovered
    pub fn path_to(&self, end: Coord) -> Vec<Coord> {
        if !self.reaches(end) {
            return Vec::new();
        }
        let mut path = vec![end];
        let mut current = end;
        while let Some(&Some(prev)) = self.discovered.get(&current) {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Explore outward from `start` through cells holding `target`.
///
/// A cell is discovered at most once; the first cell it is seen from
/// becomes its predecessor, so ties follow queue order.
pub fn breadth_first_search(board: &Board, start: Coord, target: Token) -> Reachability {
    let mut discovered = FxHashMap::default();
    discovered.insert(start, None);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for neighbor in board.neighbors(current) {
            if board.token(neighbor) != target || discovered.contains_key(&neighbor) {
                continue;
            }
            discovered.insert(neighbor, Some(current));
            queue.push_back(neighbor);
        }
    }

    Reachability { discovered }
}

/// Path of `target` cells from `start` to `end`, or empty if they are not connected
pub fn breadth_first_path(board: &Board, start: Coord, end: Coord, target: Token) -> Vec<Coord> {
    breadth_first_search(board, start, target).path_to(end)
}

// ============================================================================
// PRIORITY-QUEUE SHORTEST PATH
// ============================================================================

/// Priority-queue pass from `start` over `target` cells.
///
/// Stops as soon as a cell other than the start satisfying `is_goal` is
/// settled and reports it; its predecessor chain is final at that point.
/// Equal distances are settled in the order they were queued.
fn settle_until(
    board: &Board,
    start: Coord,
    target: Token,
    is_goal: impl Fn(Coord) -> bool,
) -> (FxHashMap<Coord, Coord>, Option<Coord>) {
    let mut distances: FxHashMap<Coord, usize> = FxHashMap::default();
    let mut predecessors: FxHashMap<Coord, Coord> = FxHashMap::default();
    let mut settled: FxHashSet<Coord> = FxHashSet::default();
    let mut heap = BinaryHeap::new();
    let mut sequence: u64 = 0;

    distances.insert(start, 0);
    heap.push(Reverse((0usize, sequence, start)));

    while let Some(Reverse((distance, _, current))) = heap.pop() {
        if !settled.insert(current) {
            continue;
        }
        if current != start && is_goal(current) {
            return (predecessors, Some(current));
        }

        for neighbor in board.neighbors(current) {
            if settled.contains(&neighbor) || board.token(neighbor) != target {
                continue;
            }
            let candidate = distance + STEP_COST;
            let improves = distances.get(&neighbor).map_or(true, |&known| candidate < known);
            if !improves {
                continue;
            }

            distances.insert(neighbor, candidate);
            predecessors.insert(neighbor, current);
            sequence += 1;
            heap.push(Reverse((candidate, sequence, neighbor)));
        }
    }

    (predecessors, None)
}

/// Single-source shortest path restricted to `target` cells.
///
/// Returns the predecessor map if `end` was reached, otherwise an empty
/// map. The start never receives a predecessor, so `start == end` also
/// yields an empty map.
pub fn shortest_path_predecessors(
    board: &Board,
    start: Coord,
    end: Coord,
    target: Token,
) -> FxHashMap<Coord, Coord> {
    match settle_until(board, start, target, |at| at == end) {
        (predecessors, Some(_)) => predecessors,
        (_, None) => FxHashMap::default(),
    }
}

/// Shortest route of `target` cells from `start` to the nearest cell
/// accepted by `is_goal`; just `[start]` when the start already is one.
/// Empty if no goal is reachable.
pub fn shortest_path_to_any(
    board: &Board,
    start: Coord,
    target: Token,
    is_goal: impl Fn(Coord) -> bool,
) -> Vec<Coord> {
    if is_goal(start) {
        return vec![start];
    }
    match settle_until(board, start, target, is_goal) {
        (predecessors, Some(goal)) => path_from_predecessors(&predecessors, start, goal),
        (_, None) => Vec::new(),
    }
}

/// Walk a predecessor map back from `end`.
///
/// The result runs start to end. It is empty unless the chain really
/// begins at `start`; `start == end` yields the single cell.
pub fn path_from_predecessors(
    predecessors: &FxHashMap<Coord, Coord>,
    start: Coord,
    end: Coord,
) -> Vec<Coord> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&prev) = predecessors.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();

    if path.first() == Some(&start) && path.last() == Some(&end) {
        path
    } else {
        Vec::new()
    }
}

/// Shortest route of `target` cells from `start` to `end`, empty if none
pub fn shortest_path(board: &Board, start: Coord, end: Coord, target: Token) -> Vec<Coord> {
    let predecessors = shortest_path_predecessors(board, start, end, target);
    path_from_predecessors(&predecessors, start, end)
}
