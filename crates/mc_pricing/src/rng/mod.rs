//! # Random Number Generation
//!
//! Seeded standard normal draws for the path generator.
//!
//! - **Reproducibility**: every stream is derived from a 64-bit run seed
//! - **Stream splitting**: [`SimRng::for_stream`] gives each sampling chunk its
//!   own generator, so the draw sequence does not depend on thread count
//! - **Batch fills**: zero-allocation `fill_normal` over caller-owned slices
//!
//! ## Usage Example
//!
//! ```rust
//! use mc_pricing::rng::SimRng;
//!
//! let mut rng = SimRng::from_seed(12345);
//! let mut normals = vec![0.0; 100];
//! rng.fill_normal(&mut normals);
//! assert_eq!(rng.seed(), 12345);
//! ```

mod prng;

pub use prng::{entropy_seed, SimRng};
