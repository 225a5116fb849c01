//! Configuration for the concurrency stress harness.

use serde::Serialize;

use crate::error::{Error, Result};

/// How traversal workers read a shared strict container.
///
/// Weakly-consistent containers are always traversed live; they need no
/// copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalMode {
    /// Copy the container under its lock, then traverse the private copy.
    /// Conflicts are impossible.
    Snapshot,
    /// Traverse the shared container itself, re-taking its lock for every
    /// step. Conflicts are expected and tolerated.
    Live,
}

/// Stress harness configuration.
///
/// # Example
///
/// ```ignore
/// let config = StressConfig::builder()
///     .initial_size(1_000)
///     .insertions(50)
///     .live()
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StressConfig {
    initial_size: usize,
    insertions: usize,
    traversal_workers: usize,
    mode: TraversalMode,
    yield_between: bool,
}

impl StressConfig {
    /// Create a builder starting from the defaults.
    pub fn builder() -> StressConfigBuilder {
        StressConfigBuilder::new()
    }

    /// Elements the shared container starts with (values `1..=initial_size`)
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Insertions performed by the mutator
    pub fn insertions(&self) -> usize {
        self.insertions
    }

    /// Number of traversal workers
    pub fn traversal_workers(&self) -> usize {
        self.traversal_workers
    }

    /// Traversal mode for strict containers
    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Whether workers yield between steps
    pub fn yield_between(&self) -> bool {
        self.yield_between
    }

    /// Value inserted by the mutator at step `index`.
    ///
    /// Always outside `1..=initial_size` and distinct per step, so every
    /// insertion changes membership.
    pub fn insertion_value(&self, index: usize) -> u64 {
        (index as u64 + 11) * self.initial_size as u64
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            initial_size: 10_000,
            insertions: 100,
            traversal_workers: 2,
            mode: TraversalMode::Snapshot,
            yield_between: true,
        }
    }
}

/// Builder for [`StressConfig`].
#[derive(Debug, Clone, Default)]
pub struct StressConfigBuilder {
    config: StressConfig,
}

impl StressConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial container size.
    pub fn initial_size(mut self, size: usize) -> Self {
        self.config.initial_size = size;
        self
    }

    /// Set the number of mutator insertions.
    pub fn insertions(mut self, count: usize) -> Self {
        self.config.insertions = count;
        self
    }

    /// Set the number of traversal workers.
    pub fn traversal_workers(mut self, count: usize) -> Self {
        self.config.traversal_workers = count;
        self
    }

    /// Set the traversal mode.
    pub fn mode(mut self, mode: TraversalMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Traverse shared strict containers directly.
    pub fn live(self) -> Self {
        self.mode(TraversalMode::Live)
    }

    /// Traverse private copies of shared strict containers (default).
    pub fn snapshot(self) -> Self {
        self.mode(TraversalMode::Snapshot)
    }

    /// Enable or disable voluntary yields between steps.
    pub fn yield_between(mut self, enabled: bool) -> Self {
        self.config.yield_between = enabled;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<StressConfig> {
        let config = self.config;
        if config.initial_size == 0 {
            return Err(Error::InvalidConfig(
                "initial_size must be greater than zero".into(),
            ));
        }
        if config.traversal_workers == 0 {
            return Err(Error::InvalidConfig(
                "traversal_workers must be greater than zero".into(),
            ));
        }
        let largest = (config.insertions as u64)
            .checked_add(11)
            .and_then(|factor| factor.checked_mul(config.initial_size as u64));
        if largest.is_none() {
            return Err(Error::InvalidConfig(format!(
                "{} insertions over {} elements overflow the value space",
                config.insertions, config.initial_size
            )));
        }
        Ok(config)
    }
}
