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

/// A solved search: the ordered moves from the initial state and the goal reached.
///
/// An empty move list means the initial state already satisfied the goal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution<S, M> {
    /// The moves to play, in order, starting from the initial state.
    moves: Vec<M>,
    /// The goal state reached after playing every move.
    goal: S,
}

impl<S, M> Solution<S, M> {
    /// Constructs a new `Solution`.
    #[inline]
    pub fn new(moves: Vec<M>, goal: S) -> Self {
        Self { moves, goal }
    }

    /// Returns the moves of this solution in play order.
    #[inline]
    pub fn moves(&self) -> &[M] {
        &self.moves
    }

    /// Returns the goal state reached by this solution.
    #[inline]
    pub fn goal(&self) -> &S {
        &self.goal
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if the initial state was already a goal.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Consumes the solution and returns its moves.
    #[inline]
    pub fn into_moves(self) -> Vec<M> {
        self.moves
    }

    /// Consumes the solution and returns its moves and goal state.
    #[inline]
    pub fn into_parts(self) -> (Vec<M>, S) {
        (self.moves, self.goal)
    }
}

impl<S, M> std::fmt::Display for Solution<S, M>
where
    M: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution(moves: {}, path: {:?})",
            self.moves.len(),
            self.moves
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Solution;

    #[test]
    fn test_accessors() {
        let solution = Solution::new(vec!['l', 'r'], 42u32);
        assert_eq!(solution.len(), 2);
        assert!(!solution.is_empty());
        assert_eq!(solution.moves(), &['l', 'r']);
        assert_eq!(*solution.goal(), 42);

        let (moves, goal) = solution.clone().into_parts();
        assert_eq!(moves, vec!['l', 'r']);
        assert_eq!(goal, 42);
        assert_eq!(solution.into_moves(), vec!['l', 'r']);
    }

    #[test]
    fn test_empty_solution_means_initial_state_was_goal() {
        let solution = Solution::<u8, char>::new(Vec::new(), 0);
        assert!(solution.is_empty());
        assert_eq!(solution.len(), 0);
    }

    #[test]
    fn test_display_lists_moves() {
        let solution = Solution::new(vec![1, 2, 3], ());
        assert_eq!(format!("{}", solution), "Solution(moves: 3, path: [1, 2, 3])");
    }
}
