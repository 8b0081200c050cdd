//! Sampling configuration: seed, chunking and parallelism.
//!
//! Model and contract inputs live in [`mc_core::SimulationParameters`]; this
//! type only controls *how* the M samples are drawn.

use mc_core::{SimulationError, SimulationResult};

/// Default number of samples per RNG stream.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Upper bound on the chunk size.
pub const MAX_CHUNK_SIZE: usize = 1 << 20;

/// Monte Carlo sampling configuration.
///
/// Samples are grouped into fixed-size chunks and chunk `k` draws from RNG
/// stream `k` of the run seed. The sample sequence therefore depends on the
/// seed and the chunk size only, never on whether the chunks are processed
/// sequentially or by a thread pool.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .seed(42)
///     .parallel(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed(), Some(42));
/// assert!(config.parallel());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    seed: Option<u64>,
    parallel: bool,
    chunk_size: usize,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the run seed, if fixed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether chunks are processed on the rayon thread pool.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the number of samples per chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidParameter` if the chunk size is 0 or
    /// exceeds [`MAX_CHUNK_SIZE`].
    pub fn validate(&self) -> SimulationResult<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(SimulationError::invalid_parameter(
                "chunk_size",
                format!(
                    "must be in 1..={}, got {}",
                    MAX_CHUNK_SIZE, self.chunk_size
                ),
            ));
        }
        Ok(())
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Builder for [`MonteCarloConfig`].
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    seed: Option<u64>,
    parallel: bool,
    chunk_size: Option<usize>,
}

impl MonteCarloConfigBuilder {
    /// Fixes the run seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the seed if one is given; `None` leaves it to entropy.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel sampling.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the number of samples per chunk.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidParameter` if validation fails.
    pub fn build(self) -> SimulationResult<MonteCarloConfig> {
        let config = MonteCarloConfig {
            seed: self.seed,
            parallel: self.parallel,
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
        };
        config.validate()?;
        Ok(config)
    }
}
