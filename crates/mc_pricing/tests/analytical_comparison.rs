//! Analytical comparison tests for Monte Carlo pricing.
//!
//! Closed forms with known reference values, and Monte Carlo estimates that
//! must converge to them.
//!
//! # Test Categories
//!
//! 1. **Black-Scholes**: European put and call, put delta
//! 2. **Geometric Asian**: both discrete closed forms and the control-variate run
//! 3. **Barrier**: continuous and shifted-barrier down-and-out call

use approx::assert_relative_eq;
use mc_core::SimulationParameters;
use mc_pricing::analytical::{
    control_bias, discrete_barrier_shift, down_out_call, down_out_call_discrete,
    geometric_asian_call, geometric_asian_call_including_spot, BlackScholes,
};
use mc_pricing::mc::{DeltaMode, MonteCarloConfig, MonteCarloPricer};

fn pricer(seed: u64) -> MonteCarloPricer {
    let config = MonteCarloConfig::builder()
        .seed(seed)
        .parallel(true)
        .build()
        .unwrap();
    MonteCarloPricer::new(config).unwrap()
}

/// S = 50, E = 52, σ = 0.1, r = 0.06, T = 1, one step.
fn european_params(n_samples: usize) -> SimulationParameters {
    SimulationParameters::builder()
        .spot(50.0)
        .strike(52.0)
        .volatility(0.1)
        .rate(0.06)
        .maturity(1.0)
        .n_steps(1)
        .n_samples(n_samples)
        .bump(0.1)
        .build()
        .unwrap()
}

/// S = E = 4, σ = 0.25, r = 0.03, T = 1, Δt = 0.01.
fn asian_params(n_samples: usize) -> SimulationParameters {
    SimulationParameters::builder()
        .spot(4.0)
        .strike(4.0)
        .volatility(0.25)
        .rate(0.03)
        .maturity(1.0)
        .time_step(0.01)
        .n_samples(n_samples)
        .build()
        .unwrap()
}

/// S = 55, E = 52, B = 49, σ = 0.1, r = 0.06, T = 1, N = 100.
fn barrier_params(n_samples: usize) -> SimulationParameters {
    SimulationParameters::builder()
        .spot(55.0)
        .strike(52.0)
        .volatility(0.1)
        .rate(0.06)
        .maturity(1.0)
        .n_steps(100)
        .n_samples(n_samples)
        .barrier(49.0)
        .build()
        .unwrap()
}

// ============================================================================
// Black-Scholes
// ============================================================================

#[test]
fn test_black_scholes_reference_values() {
    let bs = BlackScholes::from_params(&european_params(100));
    assert_relative_eq!(bs.price_call(52.0, 1.0), 2.529_913_993_122_935_5, epsilon = 1e-5);
    assert_relative_eq!(bs.price_put(52.0, 1.0), 1.501_669_739_503_871_2, epsilon = 1e-5);
    assert_relative_eq!(bs.put_delta(52.0, 1.0), -0.398_283_384_327_177_1, epsilon = 1e-6);
}

#[test]
fn test_put_call_parity() {
    let bs = BlackScholes::from_params(&european_params(100));
    let parity = 50.0 - 52.0 * (-0.06_f64).exp();
    assert_relative_eq!(
        bs.price_call(52.0, 1.0) - bs.price_put(52.0, 1.0),
        parity,
        epsilon = 1e-10
    );
}

#[test]
fn test_european_mc_vs_black_scholes() {
    let params = european_params(50_000);
    let report = pricer(42).price_european(&params).unwrap();

    for (estimate, closed_form, label) in [
        (report.put, report.bs_put, "put"),
        (report.call, report.bs_call, "call"),
    ] {
        let error = (estimate.mean() - closed_form).abs();
        let tolerance = 4.0 * estimate.std_error();
        assert!(
            error < tolerance,
            "European {}: MC={:.4}, BS={:.4}, Error={:.4}, Tolerance={:.4}",
            label,
            estimate.mean(),
            closed_form,
            error,
            tolerance
        );
    }
}

#[test]
fn test_delta_mc_vs_black_scholes() {
    let params = european_params(50_000);
    let report = pricer(17)
        .estimate_delta(&params, DeltaMode::CommonRandomNumbers)
        .unwrap();

    // Forward difference bias is O(h·Γ/2), small next to the sampling error here.
    let error = (report.delta.delta() - report.closed_form).abs();
    assert!(
        error < 0.03,
        "Delta: MC={:.4}, BS={:.4}",
        report.delta.delta(),
        report.closed_form
    );
    assert_relative_eq!(report.delta.bump(), 0.1);
}

// ============================================================================
// Geometric Asian
// ============================================================================

#[test]
fn test_geometric_asian_reference_value() {
    let geo = geometric_asian_call(&asian_params(10_000));
    assert_relative_eq!(geo.price, 0.246_043_988_396_978_52, epsilon = 1e-6);
}

#[test]
fn test_control_bias_reference_value() {
    let params = asian_params(10_000);
    let with_spot = geometric_asian_call_including_spot(&params);
    assert_relative_eq!(with_spot.price, 0.243_374_000_808_490_75, epsilon = 1e-6);
    assert_relative_eq!(control_bias(&params), 0.002_669_988, epsilon = 1e-5);
}

#[test]
fn test_geometric_asian_mc_vs_analytical() {
    let params = asian_params(20_000);
    let report = pricer(7).price_asian(&params).unwrap();

    // The simulated payoff averages the spot too, so it converges to the
    // closed form on the full grid.
    let error = (report.geometric.mean() - report.geometric_grid_closed_form).abs();
    let tolerance = 4.0 * report.geometric.std_error();
    assert!(
        error < tolerance,
        "Geometric Asian: MC={:.5}, Analytical={:.5}, Error={:.5}, Tolerance={:.5}",
        report.geometric.mean(),
        report.geometric_grid_closed_form,
        error,
        tolerance
    );
}

#[test]
fn test_asian_control_variate_agrees_with_crude() {
    let params = asian_params(20_000);
    let report = pricer(8).price_asian(&params).unwrap();

    // Arithmetic average dominates the geometric one.
    assert!(report.crude.mean() > report.geometric_closed_form);

    let ratio = report.variance_ratio.unwrap();
    assert!(ratio < 0.05, "variance ratio {}", ratio);

    // Per sample, adjusted − crude = closed form − geometric payoff.
    let offset = report.control_variate.mean() - report.crude.mean();
    let expected_offset = report.geometric_closed_form - report.geometric.mean();
    assert!((offset - expected_offset).abs() < 1e-9);

    // The offset estimates the control bias, up to the geometric sampling error.
    let bias = report.control_bias;
    assert_relative_eq!(bias, control_bias(&params), epsilon = 1e-15);
    assert!(
        (offset - bias).abs() < 4.0 * report.geometric.std_error(),
        "offset {:.5} vs bias {:.5}",
        offset,
        bias
    );

    // The bias is several control-variate standard errors wide.
    assert!(bias > 3.0 * report.control_variate.std_error());
}

// ============================================================================
// Barrier
// ============================================================================

#[test]
fn test_down_out_call_reference_values() {
    let params = barrier_params(100);
    assert_relative_eq!(down_out_call(&params, 49.0), 6.262_656_071_441_833, epsilon = 1e-5);
    assert_relative_eq!(
        down_out_call_discrete(&params).unwrap(),
        6.284_123_045_958_776,
        epsilon = 1e-5
    );
}

#[test]
fn test_discrete_shift_moves_barrier_away() {
    let shifted = discrete_barrier_shift(49.0, 0.1, 0.01);
    assert!(shifted < 49.0);
    assert_relative_eq!(shifted, 49.0 * (-0.5826 * 0.1 * 0.01_f64.sqrt()).exp(), epsilon = 1e-12);
}

#[test]
fn test_barrier_mc_vs_discrete_closed_form() {
    let params = barrier_params(20_000);
    let pricer = pricer(2024);

    for report in [
        pricer.price_barrier(&params).unwrap(),
        pricer.price_barrier_antithetic(&params).unwrap(),
    ] {
        let error = (report.estimate.mean() - report.closed_form_discrete).abs();
        let tolerance = 4.0 * report.estimate.std_error() + 0.02;
        assert!(
            error < tolerance,
            "Barrier (antithetic = {}): MC={:.4}, Analytical={:.4}, Error={:.4}",
            report.antithetic,
            report.estimate.mean(),
            report.closed_form_discrete,
            error
        );
    }
}

#[test]
fn test_barrier_worth_less_than_vanilla() {
    let params = barrier_params(100);
    let vanilla = BlackScholes::from_params(&params).price_call(52.0, 1.0);
    assert!(down_out_call(&params, 49.0) < vanilla);
    assert!(down_out_call_discrete(&params).unwrap() < vanilla);
}
