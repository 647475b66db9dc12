//! Property-based tests for pricing invariants.
//!
//! These tests verify relationships that must hold for any valid inputs:
//! - Put-call parity for European prices, lattice and closed form
//! - American value is at least the European value
//! - Zero volatility prices the discounted forward payoff
//! - The lattice converges to the closed form
//! - Implied volatility recovers the volatility that produced a price

use approx::assert_relative_eq;
use binomia_pricing::prelude::*;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

// With at least 5 steps, r sqrt(dt) < sigma for every generated market, so
// the risk-neutral probabilities stay inside [0, 1].

fn market() -> impl Strategy<Value = PricingParams> {
    (
        20.0f64..200.0,
        0.6f64..1.6,
        -0.02f64..0.12,
        0.1f64..0.6,
        0.1f64..3.0,
    )
        .prop_map(|(spot, moneyness, rate, volatility, maturity)| {
            PricingParams::new(spot, spot * moneyness, rate, volatility, maturity)
        })
}

fn kind() -> impl Strategy<Value = OptionKind> {
    prop_oneof![Just(OptionKind::Call), Just(OptionKind::Put)]
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_lattice_put_call_parity(params in market(), steps in 5usize..120) {
        let call = price_lattice(OptionKind::Call, ExerciseStyle::European, &params, steps).unwrap();
        let put = price_lattice(OptionKind::Put, ExerciseStyle::European, &params, steps).unwrap();

        let gap = put_call_parity_gap(call, put, &params);
        prop_assert!(gap.abs() < 1e-8 * params.spot, "parity gap {gap}");
    }

    #[test]
    fn prop_closed_form_put_call_parity(params in market()) {
        let call = price_black_scholes(OptionKind::Call, &params).unwrap();
        let put = price_black_scholes(OptionKind::Put, &params).unwrap();

        let gap = put_call_parity_gap(call, put, &params);
        prop_assert!(gap.abs() < 1e-9 * params.spot, "parity gap {gap}");
    }

    #[test]
    fn prop_american_at_least_european(params in market(), kind in kind(), steps in 5usize..120) {
        let european = price_lattice(kind, ExerciseStyle::European, &params, steps).unwrap();
        let american = price_lattice(kind, ExerciseStyle::American, &params, steps).unwrap();

        prop_assert!(american >= european - 1e-12);
    }

    #[test]
    fn prop_american_at_least_intrinsic(params in market(), kind in kind(), steps in 5usize..120) {
        let american = price_lattice(kind, ExerciseStyle::American, &params, steps).unwrap();
        let intrinsic = Payoff::from(kind).intrinsic(params.spot, params.strike);

        prop_assert!(american >= intrinsic - 1e-12);
    }

    #[test]
    fn prop_zero_volatility_is_discounted_forward_payoff(
        params in market(),
        kind in kind(),
        exercise in prop_oneof![Just(ExerciseStyle::European), Just(ExerciseStyle::American)],
        steps in 1usize..500,
    ) {
        let params = params.with_volatility(0.0);
        let price = price_lattice(kind, exercise, &params, steps).unwrap();
        let expected = params.discount_factor() * Payoff::from(kind).intrinsic(params.forward(), params.strike);

        prop_assert_eq!(price, expected);
    }

    #[test]
    fn prop_lattice_converges_to_closed_form(params in market(), kind in kind()) {
        let closed = price_black_scholes(kind, &params).unwrap();
        let lattice = price_lattice(kind, ExerciseStyle::European, &params, 800).unwrap();

        // CRR error is O(1/n) with an oscillating constant
        prop_assert!((lattice - closed).abs() < 2e-3 * params.spot, "lattice {lattice} vs closed {closed}");
    }

    #[test]
    fn prop_prices_are_non_negative(params in market(), kind in kind(), steps in 5usize..120) {
        for exercise in [ExerciseStyle::European, ExerciseStyle::American] {
            prop_assert!(price_lattice(kind, exercise, &params, steps).unwrap() >= 0.0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_implied_vol_round_trip(params in market(), kind in kind()) {
        let pricer = BlackScholesPricer::new(kind);
        let target = pricer.price(&params).unwrap();

        // Skip prices with no volatility information left in them
        let vega = binomia_math::distributions::norm_pdf(
            binomia_pricing::analytic::d1_d2(&params).unwrap().0,
        ) * params.spot * params.maturity.sqrt();
        prop_assume!(vega > 1e-2);

        let result = implied_volatility(&pricer, &params, target).unwrap();

        prop_assert!(result.converged);
        prop_assert!((result.volatility - params.volatility).abs() < 1e-5,
            "recovered {} from {}", result.volatility, params.volatility);
    }
}

#[test]
fn test_parity_holds_for_hull_lattice() {
    let params = PricingParams::new(42.0, 40.0, 0.1, 0.2, 0.5);
    let call = price_lattice(OptionKind::Call, ExerciseStyle::European, &params, 100).unwrap();
    let put = price_lattice(OptionKind::Put, ExerciseStyle::European, &params, 100).unwrap();

    assert_relative_eq!(put_call_parity_gap(call, put, &params), 0.0, epsilon = 1e-10);
}
