// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Test Fixtures
//!
//! Small, fully specified puzzles shared by the test suites and benchmarks of
//! the workspace. Enabled in downstream crates through the `fixtures` feature.
//!
//! - `LinearChain`: `0 -> 1 -> ... -> n`, goal `n`, one `Advance` move per state.
//! - `TwoCycle`: `A <-> B` with no goal; exhausts after two states.
//! - `BinaryTree`: a complete binary tree of bit strings with exactly one goal
//!   leaf, reachable by exactly one path.
//! - `SlidingPuzzle`: the classic `width x height` tile puzzle with a Manhattan
//!   distance estimate.
//! - `Grid`: a walled grid parsed from ASCII art with a Manhattan estimate.
//! - `Counting`: wraps any space and records how often each state was reported new.

use crate::cost::CostModel;
use crate::space::SearchSpace;
use crate::visited::VisitedSet;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Plays `moves` from the initial state of `space` and returns the final state.
///
/// Panics if a move is not legal in the state it is played from.
pub fn replay<S>(space: &S, moves: &[S::Move]) -> S::State
where
    S: SearchSpace,
    S::Move: PartialEq + std::fmt::Debug,
{
    let mut state = space.initial_state();
    for mv in moves {
        assert!(
            space.legal_moves(&state).contains(mv),
            "called `replay` with illegal move {:?}",
            mv
        );
        state = space.apply_move(&state, mv);
    }
    state
}

/// The only move of a [`LinearChain`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ChainMove {
    Advance,
}

/// States `0..=length`; each state but the last can advance by one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LinearChain {
    length: u32,
}

impl LinearChain {
    #[inline]
    pub fn new(length: u32) -> Self {
        Self { length }
    }
}

impl SearchSpace for LinearChain {
    type State = u32;
    type Move = ChainMove;

    fn initial_state(&self) -> u32 {
        0
    }

    fn is_goal(&self, state: &u32) -> bool {
        *state == self.length
    }

    fn legal_moves(&self, state: &u32) -> Vec<ChainMove> {
        if *state < self.length {
            vec![ChainMove::Advance]
        } else {
            Vec::new()
        }
    }

    fn apply_move(&self, state: &u32, _mv: &ChainMove) -> u32 {
        state + 1
    }
}

impl CostModel for LinearChain {
    type Cost = u32;

    fn move_cost(&self, _state: &u32, _mv: &ChainMove) -> u32 {
        1
    }

    fn estimate(&self, state: &u32) -> u32 {
        self.length - state
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CycleState {
    A,
    B,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CycleMove {
    ToA,
    ToB,
}

/// Two states that lead into each other forever; no goal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TwoCycle;

impl SearchSpace for TwoCycle {
    type State = CycleState;
    type Move = CycleMove;

    fn initial_state(&self) -> CycleState {
        CycleState::A
    }

    fn is_goal(&self, _state: &CycleState) -> bool {
        false
    }

    fn legal_moves(&self, state: &CycleState) -> Vec<CycleMove> {
        match state {
            CycleState::A => vec![CycleMove::ToB],
            CycleState::B => vec![CycleMove::ToA],
        }
    }

    fn apply_move(&self, _state: &CycleState, mv: &CycleMove) -> CycleState {
        match mv {
            CycleMove::ToA => CycleState::A,
            CycleMove::ToB => CycleState::B,
        }
    }
}

impl CostModel for TwoCycle {
    type Cost = u32;

    fn move_cost(&self, _state: &CycleState, _mv: &CycleMove) -> u32 {
        1
    }
}

/// A node of a [`BinaryTree`]: the bits chosen so far and how many there are.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TreeNode {
    pub depth: u8,
    pub bits: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Branch {
    Zero,
    One,
}

/// A complete binary tree of the given height whose single goal is the leaf
/// spelling `target` (most significant choice first).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BinaryTree {
    height: u8,
    target: u64,
}

impl BinaryTree {
    /// # Panics
    ///
    /// Panics if `height` exceeds 63 or `target` does not fit in `height` bits.
    pub fn new(height: u8, target: u64) -> Self {
        assert!(
            height < 64,
            "called `BinaryTree::new` with height {} (max 63)",
            height
        );
        assert!(
            target < (1u64 << height),
            "called `BinaryTree::new` with target {} that does not fit in {} bits",
            target,
            height
        );
        Self { height, target }
    }

    /// Returns the unique move sequence leading to the goal leaf.
    pub fn expected_path(&self) -> Vec<Branch> {
        (0..self.height)
            .rev()
            .map(|shift| {
                if (self.target >> shift) & 1 == 1 {
                    Branch::One
                } else {
                    Branch::Zero
                }
            })
            .collect()
    }

    /// Returns the number of nodes in the tree.
    pub fn num_nodes(&self) -> u64 {
        (1u64 << (self.height + 1)) - 1
    }
}

impl SearchSpace for BinaryTree {
    type State = TreeNode;
    type Move = Branch;

    fn initial_state(&self) -> TreeNode {
        TreeNode { depth: 0, bits: 0 }
    }

    fn is_goal(&self, state: &TreeNode) -> bool {
        state.depth == self.height && state.bits == self.target
    }

    fn legal_moves(&self, state: &TreeNode) -> Vec<Branch> {
        if state.depth < self.height {
            vec![Branch::Zero, Branch::One]
        } else {
            Vec::new()
        }
    }

    fn apply_move(&self, state: &TreeNode, mv: &Branch) -> TreeNode {
        let bit = match mv {
            Branch::Zero => 0,
            Branch::One => 1,
        };
        TreeNode {
            depth: state.depth + 1,
            bits: (state.bits << 1) | bit,
        }
    }
}

/// The direction the blank moves in a [`SlidingPuzzle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Slide {
    Up,
    Down,
    Left,
    Right,
}

/// The `width x height` sliding tile puzzle. Tile `0` is the blank; the goal is
/// `1, 2, ..., n - 1, 0` in row-major order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SlidingPuzzle {
    width: usize,
    height: usize,
    start: Vec<u8>,
}

impl SlidingPuzzle {
    /// # Panics
    ///
    /// Panics if `tiles` is not a permutation of `0..width * height`.
    pub fn new(width: usize, height: usize, tiles: Vec<u8>) -> Self {
        let n = width * height;
        assert_eq!(
            tiles.len(),
            n,
            "called `SlidingPuzzle::new` with {} tiles for a {}x{} board",
            tiles.len(),
            width,
            height
        );
        let mut sorted = tiles.clone();
        sorted.sort_unstable();
        assert!(
            sorted.iter().enumerate().all(|(i, &t)| t as usize == i),
            "called `SlidingPuzzle::new` with tiles that are not a permutation of 0..{}",
            n
        );
        Self {
            width,
            height,
            start: tiles,
        }
    }

    /// Returns the solved configuration of a `width x height` board.
    pub fn solved_tiles(width: usize, height: usize) -> Vec<u8> {
        let n = width * height;
        (1..n as u8).chain(std::iter::once(0)).collect()
    }

    /// Starts from the solved board and plays `slides`, skipping illegal ones.
    pub fn scrambled(width: usize, height: usize, slides: &[Slide]) -> Self {
        let solved = Self::new(width, height, Self::solved_tiles(width, height));
        let mut tiles = solved.start.clone();
        for slide in slides {
            if solved.legal_moves(&tiles).contains(slide) {
                tiles = solved.apply_move(&tiles, slide);
            }
        }
        Self::new(width, height, tiles)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn blank(&self, tiles: &[u8]) -> usize {
        tiles.iter().position(|&t| t == 0).unwrap_or(0)
    }

    fn target_of(&self, tile: u8) -> usize {
        if tile == 0 {
            self.width * self.height - 1
        } else {
            tile as usize - 1
        }
    }
}

impl SearchSpace for SlidingPuzzle {
    type State = Vec<u8>;
    type Move = Slide;

    fn initial_state(&self) -> Vec<u8> {
        self.start.clone()
    }

    fn is_goal(&self, state: &Vec<u8>) -> bool {
        state
            .iter()
            .enumerate()
            .all(|(i, &t)| self.target_of(t) == i)
    }

    fn legal_moves(&self, state: &Vec<u8>) -> Vec<Slide> {
        let blank = self.blank(state);
        let (row, col) = (blank / self.width, blank % self.width);
        let mut moves = Vec::with_capacity(4);
        if row > 0 {
            moves.push(Slide::Up);
        }
        if row + 1 < self.height {
            moves.push(Slide::Down);
        }
        if col > 0 {
            moves.push(Slide::Left);
        }
        if col + 1 < self.width {
            moves.push(Slide::Right);
        }
        moves
    }

    fn apply_move(&self, state: &Vec<u8>, mv: &Slide) -> Vec<u8> {
        let blank = self.blank(state);
        let target = match mv {
            Slide::Up => blank - self.width,
            Slide::Down => blank + self.width,
            Slide::Left => blank - 1,
            Slide::Right => blank + 1,
        };
        let mut next = state.clone();
        next.swap(blank, target);
        next
    }
}

impl CostModel for SlidingPuzzle {
    type Cost = u32;

    fn move_cost(&self, _state: &Vec<u8>, _mv: &Slide) -> u32 {
        1
    }

    fn estimate(&self, state: &Vec<u8>) -> u32 {
        state
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != 0)
            .map(|(i, &t)| {
                let goal = self.target_of(t);
                let dr = (i / self.width).abs_diff(goal / self.width);
                let dc = (i % self.width).abs_diff(goal % self.width);
                (dr + dc) as u32
            })
            .sum()
    }
}

/// A compass step on a [`Grid`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Step {
    North,
    East,
    South,
    West,
}

/// A rectangular grid with walls, a start cell and a goal cell.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    walls: FxHashSet<(i32, i32)>,
    start: (i32, i32),
    goal: Option<(i32, i32)>,
}

impl Grid {
    /// Parses a grid from ASCII art: `#` wall, `S` start, `G` goal, anything else open.
    ///
    /// # Panics
    ///
    /// Panics if the art contains no `S`.
    pub fn parse(art: &str) -> Self {
        let mut walls = FxHashSet::default();
        let mut start = None;
        let mut goal = None;
        let mut width = 0;
        let mut height = 0;

        for (row, line) in art
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
        {
            height = row as i32 + 1;
            for (col, ch) in line.chars().enumerate() {
                width = width.max(col as i32 + 1);
                let cell = (col as i32, row as i32);
                match ch {
                    '#' => {
                        walls.insert(cell);
                    }
                    'S' => start = Some(cell),
                    'G' => goal = Some(cell),
                    _ => {}
                }
            }
        }

        let start = start.expect("called `Grid::parse` without a start cell `S`");
        Self {
            width,
            height,
            walls,
            start,
            goal,
        }
    }

    #[inline]
    fn is_open(&self, cell: (i32, i32)) -> bool {
        cell.0 >= 0
            && cell.1 >= 0
            && cell.0 < self.width
            && cell.1 < self.height
            && !self.walls.contains(&cell)
    }

    #[inline]
    fn step(cell: (i32, i32), step: Step) -> (i32, i32) {
        match step {
            Step::North => (cell.0, cell.1 - 1),
            Step::East => (cell.0 + 1, cell.1),
            Step::South => (cell.0, cell.1 + 1),
            Step::West => (cell.0 - 1, cell.1),
        }
    }
}

impl SearchSpace for Grid {
    type State = (i32, i32);
    type Move = Step;

    fn initial_state(&self) -> (i32, i32) {
        self.start
    }

    fn is_goal(&self, state: &(i32, i32)) -> bool {
        self.goal == Some(*state)
    }

    fn legal_moves(&self, state: &(i32, i32)) -> Vec<Step> {
        [Step::North, Step::East, Step::South, Step::West]
            .into_iter()
            .filter(|&s| self.is_open(Self::step(*state, s)))
            .collect()
    }

    fn apply_move(&self, state: &(i32, i32), mv: &Step) -> (i32, i32) {
        Self::step(*state, *mv)
    }
}

impl CostModel for Grid {
    type Cost = u32;

    fn move_cost(&self, _state: &(i32, i32), _mv: &Step) -> u32 {
        1
    }

    fn estimate(&self, state: &(i32, i32)) -> u32 {
        match self.goal {
            Some(goal) => state.0.abs_diff(goal.0) + state.1.abs_diff(goal.1),
            None => 0,
        }
    }
}

/// Wraps a space and records, per state, how often `already_seen` reported it new.
pub struct Counting<S>
where
    S: SearchSpace,
{
    inner: S,
    new_reports: Mutex<FxHashMap<S::State, u32>>,
    expansions: AtomicU64,
}

impl<S> Counting<S>
where
    S: SearchSpace,
{
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            new_reports: Mutex::new(FxHashMap::default()),
            expansions: AtomicU64::new(0),
        }
    }

    /// Returns the largest number of "new" reports any single state received.
    pub fn max_new_reports(&self) -> u32 {
        self.lock().values().copied().max().unwrap_or(0)
    }

    /// Returns the number of distinct states reported new at least once.
    pub fn distinct_new(&self) -> usize {
        self.lock().len()
    }

    /// Returns how often `legal_moves` was called.
    pub fn expansions(&self) -> u64 {
        self.expansions.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxHashMap<S::State, u32>> {
        self.new_reports
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<S> SearchSpace for Counting<S>
where
    S: SearchSpace,
{
    type State = S::State;
    type Move = S::Move;

    fn initial_state(&self) -> S::State {
        self.inner.initial_state()
    }

    fn is_goal(&self, state: &S::State) -> bool {
        self.inner.is_goal(state)
    }

    fn legal_moves(&self, state: &S::State) -> Vec<S::Move> {
        self.expansions.fetch_add(1, Ordering::Relaxed);
        self.inner.legal_moves(state)
    }

    fn apply_move(&self, state: &S::State, mv: &S::Move) -> S::State {
        self.inner.apply_move(state, mv)
    }

    fn already_seen(&self, state: &S::State, visited: &VisitedSet<S::State>) -> bool {
        let seen = self.inner.already_seen(state, visited);
        if !seen {
            *self.lock().entry(state.clone()).or_insert(0) += 1;
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_chain_replays_to_goal() {
        let chain = LinearChain::new(2);
        let end = replay(&chain, &[ChainMove::Advance, ChainMove::Advance]);
        assert!(chain.is_goal(&end));
        assert!(chain.legal_moves(&end).is_empty());
    }

    #[test]
    fn test_two_cycle_alternates() {
        let cycle = TwoCycle;
        let end = replay(&cycle, &[CycleMove::ToB, CycleMove::ToA, CycleMove::ToB]);
        assert_eq!(end, CycleState::B);
        assert!(!cycle.is_goal(&end));
    }

    #[test]
    fn test_binary_tree_expected_path_reaches_goal() {
        let tree = BinaryTree::new(5, 0b10110);
        let path = tree.expected_path();
        assert_eq!(
            path,
            vec![Branch::One, Branch::Zero, Branch::One, Branch::One, Branch::Zero]
        );
        assert!(tree.is_goal(&replay(&tree, &path)));
        assert_eq!(tree.num_nodes(), 63);
    }

    #[test]
    fn test_sliding_puzzle_scramble_and_estimate() {
        let solved = SlidingPuzzle::new(3, 2, SlidingPuzzle::solved_tiles(3, 2));
        assert!(solved.is_goal(&solved.initial_state()));
        assert_eq!(solved.estimate(&solved.initial_state()), 0);

        let scrambled = SlidingPuzzle::scrambled(3, 2, &[Slide::Left, Slide::Up]);
        let start = scrambled.initial_state();
        assert!(!scrambled.is_goal(&start));
        assert_eq!(scrambled.estimate(&start), 2);

        let back =
            scrambled.apply_move(&scrambled.apply_move(&start, &Slide::Down), &Slide::Right);
        assert!(scrambled.is_goal(&back));
    }

    #[test]
    fn test_sliding_puzzle_corner_moves() {
        let puzzle = SlidingPuzzle::new(2, 2, vec![0, 1, 2, 3]);
        assert_eq!(
            puzzle.legal_moves(&puzzle.initial_state()),
            vec![Slide::Down, Slide::Right]
        );
    }

    #[test]
    fn test_grid_parse_and_moves() {
        let grid = Grid::parse(
            "
            S.#
            ..G
            ",
        );
        assert_eq!(grid.initial_state(), (0, 0));
        assert_eq!(grid.legal_moves(&(0, 0)), vec![Step::East, Step::South]);
        assert_eq!(grid.legal_moves(&(1, 0)), vec![Step::South, Step::West]);
        assert!(grid.is_goal(&(2, 1)));
        assert_eq!(grid.estimate(&(0, 0)), 3);
    }

    #[test]
    fn test_counting_records_new_reports() {
        let counting = Counting::new(LinearChain::new(3));
        let visited = VisitedSet::new();
        assert!(!counting.already_seen(&1, &visited));
        assert!(counting.already_seen(&1, &visited));
        assert!(!counting.already_seen(&2, &visited));
        assert_eq!(counting.distinct_new(), 2);
        assert_eq!(counting.max_new_reports(), 1);

        let _ = counting.legal_moves(&0);
        assert_eq!(counting.expansions(), 1);
    }
}
