//! Per-worker scratch buffers for trajectory generation.
//!
//! A [`PathWorkspace`] holds the normal draws of one sample plus the primal
//! and antithetic trajectories built from them. Each sampling chunk owns
//! exactly one workspace, so no buffer is shared between concurrently
//! processed samples and the inner loop performs no heap allocation.

use super::paths::Trajectory;

/// Reusable buffers for one sampling worker.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::mc::PathWorkspace;
///
/// let mut workspace = PathWorkspace::new(100);
/// assert_eq!(workspace.n_steps(), 100);
///
/// workspace.ensure_capacity(252);
/// assert_eq!(workspace.normals().len(), 252);
/// ```
#[derive(Clone, Debug)]
pub struct PathWorkspace {
    normals: Vec<f64>,
    primal: Trajectory,
    antithetic: Trajectory,
}

impl PathWorkspace {
    /// Creates a workspace sized for `n_steps` steps per trajectory.
    pub fn new(n_steps: usize) -> Self {
        Self {
            normals: vec![0.0; n_steps],
            primal: Trajectory::with_capacity(n_steps + 1),
            antithetic: Trajectory::with_capacity(n_steps + 1),
        }
    }

    /// Resizes the normal buffer to exactly `n_steps` draws.
    ///
    /// Trajectory buffers grow on demand and never shrink.
    pub fn ensure_capacity(&mut self, n_steps: usize) {
        self.normals.resize(n_steps, 0.0);
    }

    /// Number of steps the workspace is currently sized for.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.normals.len()
    }

    /// Normal draws of the most recent sample.
    #[inline]
    pub fn normals(&self) -> &[f64] {
        &self.normals
    }

    /// Mutable access to the normal buffer.
    #[inline]
    pub fn normals_mut(&mut self) -> &mut [f64] {
        &mut self.normals
    }

    /// Most recently generated primal trajectory.
    #[inline]
    pub fn primal(&self) -> &Trajectory {
        &self.primal
    }

    /// Most recently generated antithetic trajectory.
    #[inline]
    pub fn antithetic(&self) -> &Trajectory {
        &self.antithetic
    }

    /// Splits the workspace into the draw buffer and both trajectory buffers.
    #[inline]
    pub(crate) fn split_mut(&mut self) -> (&[f64], &mut Trajectory, &mut Trajectory) {
        (&self.normals, &mut self.primal, &mut self.antithetic)
    }
}
