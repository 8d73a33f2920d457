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

//! # Concurrent Solver Configuration
//!
//! `ConcurrentConfig` is assembled through `ConcurrentConfigBuilder` and
//! validated once in `build()`, so a solver never runs with a depth-breadth
//! factor outside `[0, 1]`, an empty pool, or a queue that cannot hold a job.
//!
//! ```rust
//! use wayfinder_parallel::config::{ConcurrentConfig, SaturationPolicy};
//!
//! let config = ConcurrentConfig::builder()
//!     .with_depth_breadth_factor(0.25)
//!     .with_num_workers(4)
//!     .with_saturation_policy(SaturationPolicy::RunInline)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.num_workers(), 4);
//! ```

/// Why a configuration was rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("depth-breadth factor must be a finite number in [0, 1], got {0}")]
    InvalidDepthBreadthFactor(f64),
    #[error("the worker pool needs at least one worker")]
    ZeroWorkers,
    #[error("the job queue needs a capacity of at least one")]
    ZeroQueueCapacity,
}

/// Probability that a child expansion is handed to the pool instead of
/// being continued on the current worker.
///
/// `0` is pure depth-first continuation, `1` submits every child.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DepthBreadthFactor(f64);

impl DepthBreadthFactor {
    pub const DEPTH_FIRST: Self = Self(0.0);
    pub const BREADTH_FIRST: Self = Self(1.0);

    #[inline]
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidDepthBreadthFactor(value))
        }
    }

    #[inline(always)]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Decides whether a child is submitted, given a source of uniform draws
    /// in `[0, 1)`.
    ///
    /// A child is submitted iff `f > 0` and the draw `r <= f`. The draw is only
    /// taken when the outcome is not already fixed by `f` alone.
    #[inline]
    pub fn submits<D>(self, draw: D) -> bool
    where
        D: FnOnce() -> f64,
    {
        if self.0 <= 0.0 {
            false
        } else if self.0 >= 1.0 {
            true
        } else {
            draw() <= self.0
        }
    }
}

impl Default for DepthBreadthFactor {
    fn default() -> Self {
        Self(0.4)
    }
}

impl std::fmt::Display for DepthBreadthFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for DepthBreadthFactor {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// What happens to a child that should be submitted while the job queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SaturationPolicy {
    /// Drop the child. The search degrades towards depth-first and may miss
    /// a goal that is only reachable through the dropped branch.
    #[default]
    Discard,
    /// Continue the child on the current worker instead.
    RunInline,
}

impl std::fmt::Display for SaturationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaturationPolicy::Discard => write!(f, "Discard"),
            SaturationPolicy::RunInline => write!(f, "RunInline"),
        }
    }
}

/// Validated configuration of a `ConcurrentSolver`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcurrentConfig {
    depth_breadth_factor: DepthBreadthFactor,
    num_workers: usize,
    queue_capacity: usize,
    saturation_policy: SaturationPolicy,
    refresh_mask: u64,
    worker_stack_size: Option<usize>,
}

impl Default for ConcurrentConfig {
    fn default() -> Self {
        Self {
            depth_breadth_factor: DepthBreadthFactor::default(),
            num_workers: default_num_workers(),
            queue_capacity: ConcurrentConfig::DEFAULT_QUEUE_CAPACITY,
            saturation_policy: SaturationPolicy::default(),
            refresh_mask: ConcurrentConfig::DEFAULT_REFRESH_MASK,
            worker_stack_size: None,
        }
    }
}

impl ConcurrentConfig {
    pub const DEFAULT_QUEUE_CAPACITY: usize = 4096;
    pub const DEFAULT_REFRESH_MASK: u64 = 0x3FF;

    #[inline]
    pub fn builder() -> ConcurrentConfigBuilder {
        ConcurrentConfigBuilder::new()
    }

    #[inline]
    pub fn depth_breadth_factor(&self) -> DepthBreadthFactor {
        self.depth_breadth_factor
    }

    #[inline]
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    #[inline]
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    #[inline]
    pub fn saturation_policy(&self) -> SaturationPolicy {
        self.saturation_policy
    }

    /// Refreshes are only attempted on tries with all of these bits clear.
    #[inline]
    pub fn refresh_mask(&self) -> u64 {
        self.refresh_mask
    }

    #[inline]
    pub fn worker_stack_size(&self) -> Option<usize> {
        self.worker_stack_size
    }
}

impl std::fmt::Display for ConcurrentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ConcurrentConfig(factor: {}, workers: {}, queue: {}, policy: {})",
            self.depth_breadth_factor, self.num_workers, self.queue_capacity, self.saturation_policy
        )
    }
}

#[inline]
fn default_num_workers() -> usize {
    num_cpus::get().max(1)
}

/// Builder for `ConcurrentConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcurrentConfigBuilder {
    depth_breadth_factor: f64,
    num_workers: usize,
    queue_capacity: usize,
    saturation_policy: SaturationPolicy,
    refresh_mask: u64,
    worker_stack_size: Option<usize>,
}

impl Default for ConcurrentConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConcurrentConfigBuilder {
    /// Creates a builder holding the default configuration.
    #[inline]
    pub fn new() -> Self {
        let defaults = ConcurrentConfig::default();
        Self {
            depth_breadth_factor: defaults.depth_breadth_factor.get(),
            num_workers: defaults.num_workers,
            queue_capacity: defaults.queue_capacity,
            saturation_policy: defaults.saturation_policy,
            refresh_mask: defaults.refresh_mask,
            worker_stack_size: defaults.worker_stack_size,
        }
    }

    #[inline]
    pub fn with_depth_breadth_factor(mut self, factor: f64) -> Self {
        self.depth_breadth_factor = factor;
        self
    }

    #[inline]
    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    #[inline]
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    #[inline]
    pub fn with_saturation_policy(mut self, policy: SaturationPolicy) -> Self {
        self.saturation_policy = policy;
        self
    }

    #[inline]
    pub fn with_refresh_mask(mut self, refresh_mask: u64) -> Self {
        self.refresh_mask = refresh_mask;
        self
    }

    #[inline]
    pub fn with_worker_stack_size(mut self, bytes: usize) -> Self {
        self.worker_stack_size = Some(bytes);
        self
    }

    /// Validates the settings and builds the configuration.
    pub fn build(self) -> Result<ConcurrentConfig, ConfigError> {
        let depth_breadth_factor = DepthBreadthFactor::new(self.depth_breadth_factor)?;
        if self.num_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }

        Ok(ConcurrentConfig {
            depth_breadth_factor,
            num_workers: self.num_workers,
            queue_capacity: self.queue_capacity,
            saturation_policy: self.saturation_policy,
            refresh_mask: self.refresh_mask,
            worker_stack_size: self.worker_stack_size,
        })
    }
}
