//! Standard normal distribution functions.
//!
//! Generic over `T: Float` so the closed-form references can be evaluated in
//! `f32` as well as `f64`. The error function uses the Abramowitz and Stegun
//! rational approximation (formula 7.1.26), maximum absolute error 1.5e-7.

use num_traits::Float;

/// Abramowitz and Stegun 7.1.26 coefficients, a1..a5.
const AS_COEFFS: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

/// Abramowitz and Stegun 7.1.26 scale factor.
const AS_P: f64 = 0.327_591_1;

#[inline]
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// erfc(|x|) evaluated with Horner's scheme.
#[inline]
fn erfc_non_negative<T: Float>(abs_x: T) -> T {
    let t = T::one() / (T::one() + constant::<T>(AS_P) * abs_x);
    let poly = AS_COEFFS
        .iter()
        .rev()
        .fold(T::zero(), |acc, &a| acc * t + constant::<T>(a));
    t * poly * (-abs_x * abs_x).exp()
}

/// Complementary error function, erfc(x) = 1 − erf(x).
///
/// Negative arguments use the reflection erfc(−x) = 2 − erfc(x).
#[inline]
pub fn erfc<T: Float>(x: T) -> T {
    let tail = erfc_non_negative(x.abs());
    if x < T::zero() {
        constant::<T>(2.0) - tail
    } else {
        tail
    }
}

/// Error function, erf(x) = (2/√π) ∫₀ˣ e^(−t²) dt.
#[inline]
pub fn erf<T: Float>(x: T) -> T {
    T::one() - erfc(x)
}

/// Standard normal cumulative distribution function Φ(x) = P(Z ≤ x).
///
/// Computed as ½·erfc(−x/√2), which keeps the lower tail accurate instead of
/// losing it to cancellation in 1 − Φ(−x).
///
/// # Examples
/// ```
/// use mc_core::math::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let arg = -x / constant::<T>(std::f64::consts::SQRT_2);
    constant::<T>(0.5) * erfc(arg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // ==========================================================
    // erf / erfc
    // ==========================================================

    #[test]
    fn test_erf_reference_values() {
        assert_relative_eq!(erf(0.0_f64), 0.0, epsilon = 1e-7);
        assert_relative_eq!(erf(0.5_f64), 0.520_499_877_813_046_5, epsilon = 2e-7);
        assert_relative_eq!(erf(1.0_f64), 0.842_700_792_949_714_9, epsilon = 2e-7);
        assert_relative_eq!(erf(2.0_f64), 0.995_322_265_018_952_7, epsilon = 2e-7);
    }

    #[test]
    fn test_erf_is_odd() {
        for x in [0.1, 0.7, 1.3, 2.2, 3.5] {
            assert_relative_eq!(erf(-x), -erf(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_erfc_far_tail() {
        assert!(erfc(6.0_f64) >= 0.0);
        assert!(erfc(6.0_f64) < 1e-15);
        assert_relative_eq!(erfc(-6.0_f64), 2.0, epsilon = 1e-15);
    }

    // ==========================================================
    // norm_cdf
    // ==========================================================

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841_344_746_068_542_9, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.158_655_253_931_457_07, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.96_f64), 0.975_002_104_851_780_1, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022_750_131_948_179_195, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_bounds_at_extremes() {
        for x in [-40.0_f64, -10.0, 10.0, 40.0] {
            let value = norm_cdf(x);
            assert!((0.0..=1.0).contains(&value), "Φ({}) = {}", x, value);
        }
        assert!(norm_cdf(-10.0_f64) < 1e-7);
        assert!(norm_cdf(10.0_f64) > 1.0 - 1e-7);
    }

    #[test]
    fn test_norm_cdf_f32() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_cdf_derivative_matches_density() {
        let h = 1e-4;
        for x in [-2.0_f64, -0.5, 0.0, 0.5, 2.0] {
            let slope = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            let density = (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt();
            assert_relative_eq!(slope, density, epsilon = 1e-4);
        }
    }

    proptest! {
        #[test]
        fn prop_norm_cdf_symmetric(x in -8.0_f64..8.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-6);
        }

        #[test]
        fn prop_norm_cdf_non_decreasing(x in -8.0_f64..8.0, dx in 0.0_f64..1.0) {
            prop_assert!(norm_cdf(x + dx) >= norm_cdf(x) - 1e-12);
        }
    }
}
