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

/// The search strategy an `Engine` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverKind {
    /// Single-threaded depth-first search.
    #[default]
    DepthFirst,
    /// Hybrid depth/breadth-first search on a worker pool.
    Concurrent,
    /// Cheapest-first search.
    AStar,
}

impl SolverKind {
    pub const ALL: [SolverKind; 3] = [
        SolverKind::DepthFirst,
        SolverKind::Concurrent,
        SolverKind::AStar,
    ];

    /// Returns the short name used by `Display` and `FromStr`.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            SolverKind::DepthFirst => "dfs",
            SolverKind::Concurrent => "concurrent",
            SolverKind::AStar => "astar",
        }
    }

    /// Returns `true` if the strategy uses more than the calling thread.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, SolverKind::Concurrent)
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a `SolverKind` from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown solver kind `{0}` (expected one of: dfs, concurrent, astar)")]
pub struct UnknownSolverKind(pub String);

impl std::str::FromStr for SolverKind {
    type Err = UnknownSolverKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" | "sequential" => Ok(SolverKind::DepthFirst),
            "concurrent" | "parallel" | "hybrid" => Ok(SolverKind::Concurrent),
            "astar" | "a*" => Ok(SolverKind::AStar),
            _ => Err(UnknownSolverKind(s.to_string())),
        }
    }
}
