//! PathObserver: streaming statistics over a trajectory.
//!
//! Statistics are accumulated incrementally as prices are observed, so a
//! payoff never needs more than one pass over the observations:
//!
//! - **Arithmetic average**: running sum / count
//! - **Geometric average**: exp(running log sum / count)
//! - **Maximum** / **Minimum**: running extrema
//! - **Terminal**: last observed price

use num_traits::Float;

use crate::mc::Trajectory;

/// Streaming accumulator for path statistics.
///
/// Every observation, including the initial spot, participates in the
/// averages and the extrema.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::mc::Trajectory;
/// use mc_pricing::path_dependent::PathObserver;
///
/// let path = Trajectory::from_observations(vec![2.0_f64, 8.0]).unwrap();
/// let observer = PathObserver::from_trajectory(&path);
/// assert!((observer.geometric_average() - 4.0).abs() < 1e-12);
/// assert_eq!(observer.minimum(), 2.0);
/// assert_eq!(observer.terminal(), 8.0);
/// ```
#[derive(Clone, Debug)]
pub struct PathObserver<T: Float> {
    running_sum: T,
    running_log_sum: T,
    running_max: T,
    running_min: T,
    count: usize,
    terminal: T,
}

impl<T: Float> PathObserver<T> {
    /// Creates an empty observer.
    #[inline]
    pub fn new() -> Self {
        Self {
            running_sum: T::zero(),
            running_log_sum: T::zero(),
            running_max: T::neg_infinity(),
            running_min: T::infinity(),
            count: 0,
            terminal: T::zero(),
        }
    }

    /// Builds an observer from a full trajectory in a single pass.
    #[inline]
    pub fn from_trajectory(trajectory: &Trajectory<T>) -> Self {
        let mut observer = Self::new();
        for &price in trajectory.observations() {
            observer.observe(price);
        }
        observer
    }

    /// Records one price. The most recent observation becomes the terminal.
    #[inline]
    pub(crate) fn observe(&mut self, price: T) {
        self.running_sum = self.running_sum + price;
        self.running_log_sum = self.running_log_sum + price.ln();
        self.running_max = self.running_max.max(price);
        self.running_min = self.running_min.min(price);
        self.terminal = price;
        self.count += 1;
    }

    /// Arithmetic mean of the observations (zero when empty).
    #[inline]
    pub fn arithmetic_average(&self) -> T {
        match T::from(self.count) {
            Some(n) if self.count > 0 => self.running_sum / n,
            _ => T::zero(),
        }
    }

    /// Geometric mean of the observations (zero when empty).
    #[inline]
    pub fn geometric_average(&self) -> T {
        match T::from(self.count) {
            Some(n) if self.count > 0 => (self.running_log_sum / n).exp(),
            _ => T::zero(),
        }
    }

    /// Largest observation (−∞ when empty).
    #[inline]
    pub fn maximum(&self) -> T {
        self.running_max
    }

    /// Smallest observation (+∞ when empty).
    #[inline]
    pub fn minimum(&self) -> T {
        self.running_min
    }

    /// Last observation (zero when empty).
    #[inline]
    pub fn terminal(&self) -> T {
        self.terminal
    }

    /// Number of observations recorded.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<T: Float> Default for PathObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}
