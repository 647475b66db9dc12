//! Black-Scholes-Merton closed form for European options.

use binomia_math::distributions::norm_cdf;

use crate::error::{PricingError, PricingResult};
use crate::types::{OptionKind, PricingParams};

/// Black-Scholes `d1` and `d2`.
///
/// ```text
/// d1 = (ln(S/K) + (r + sigma^2 / 2) t) / (sigma sqrt(t))
/// d2 = d1 - sigma sqrt(t)
/// ```
///
/// # Errors
///
/// - [`PricingError::NumericalDomain`] when `sigma sqrt(t)` is zero
/// - [`PricingError::InvalidParameter`] if the inputs fail validation
pub fn d1_d2(params: &PricingParams) -> PricingResult<(f64, f64)> {
    let PricingParams {
        spot,
        strike,
        rate,
        volatility,
        maturity,
    } = *params;

    // Zero maturity is a domain error here, not an invalid parameter
    check_domain(volatility, maturity)?;
    params.validate()?;

    let vol_sqrt_t = volatility * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * maturity) / vol_sqrt_t;
    Ok((d1, d1 - vol_sqrt_t))
}

fn check_domain(volatility: f64, maturity: f64) -> PricingResult<()> {
    if volatility == 0.0 || maturity == 0.0 {
        return Err(PricingError::numerical_domain(format!(
            "closed form undefined for volatility {volatility} and maturity {maturity}"
        )));
    }
    Ok(())
}

/// European option price under Black-Scholes-Merton.
///
/// ```text
/// call = S N(d1) - K exp(-r t) N(d2)
/// put  = K exp(-r t) N(-d2) - S N(-d1)
/// ```
///
/// Unlike the lattice, the closed form has no zero-volatility limit built in:
/// `sigma = 0` or `t = 0` is reported as an error rather than priced.
///
/// # Errors
///
/// - [`PricingError::InvalidParameter`] if the inputs fail validation
/// - [`PricingError::NumericalDomain`] if volatility or maturity is zero
///
/// # Example
///
/// ```rust
/// use binomia_pricing::analytic::black_scholes_price;
/// use binomia_pricing::prelude::*;
///
/// let params = PricingParams::new(42.0, 40.0, 0.1, 0.2, 0.5);
/// let call = black_scholes_price(OptionKind::Call, &params).unwrap();
/// assert!((call - 4.76).abs() < 0.01);
/// ```
pub fn black_scholes_price(kind: OptionKind, params: &PricingParams) -> PricingResult<f64> {
    let (d1, d2) = d1_d2(params)?;
    let discounted_strike = params.strike * params.discount_factor();

    let price = match kind {
        OptionKind::Call => params.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionKind::Put => discounted_strike * norm_cdf(-d2) - params.spot * norm_cdf(-d1),
    };
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hull_example() {
        // Hull, Options Futures and Other Derivatives, Example 15.6
        let params = PricingParams::new(42.0, 40.0, 0.1, 0.2, 0.5);

        let (d1, d2) = d1_d2(&params).unwrap();
        assert_relative_eq!(d1, 0.7693, epsilon = 1e-4);
        assert_relative_eq!(d2, 0.6278, epsilon = 1e-4);

        let call = black_scholes_price(OptionKind::Call, &params).unwrap();
        let put = black_scholes_price(OptionKind::Put, &params).unwrap();
        assert_relative_eq!(call, 4.76, epsilon = 0.005);
        assert_relative_eq!(put, 0.81, epsilon = 0.005);
    }

    #[test]
    fn test_put_call_parity() {
        let params = PricingParams::new(50.0, 53.0, 0.2, 0.3, 5.0);
        let call = black_scholes_price(OptionKind::Call, &params).unwrap();
        let put = black_scholes_price(OptionKind::Put, &params).unwrap();

        let forward_value = params.spot - params.strike * params.discount_factor();
        assert_relative_eq!(call - put, forward_value, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volatility_is_domain_error() {
        let params = PricingParams::new(42.0, 40.0, 0.1, 0.0, 0.5);
        assert!(matches!(
            black_scholes_price(OptionKind::Call, &params),
            Err(PricingError::NumericalDomain(_))
        ));
    }

    #[test]
    fn test_zero_maturity_is_domain_error() {
        let params = PricingParams::new(42.0, 40.0, 0.1, 0.2, 0.0);
        assert!(matches!(
            black_scholes_price(OptionKind::Put, &params),
            Err(PricingError::NumericalDomain(_))
        ));
        assert!(matches!(d1_d2(&params), Err(PricingError::NumericalDomain(_))));
    }

    #[test]
    fn test_negative_volatility_is_invalid() {
        let params = PricingParams::new(42.0, 40.0, 0.1, -0.2, 0.5);
        assert!(matches!(
            black_scholes_price(OptionKind::Call, &params),
            Err(PricingError::InvalidParameter { name: "volatility", .. })
        ));
    }

    #[test]
    fn test_d1_d2_validates_inputs() {
        let negative_vol = PricingParams::new(42.0, 40.0, 0.1, -0.2, 0.5);
        assert!(matches!(
            d1_d2(&negative_vol),
            Err(PricingError::InvalidParameter { name: "volatility", .. })
        ));

        let negative_spot = PricingParams::new(-42.0, 40.0, 0.1, 0.2, 0.5);
        assert!(matches!(
            d1_d2(&negative_spot),
            Err(PricingError::InvalidParameter { name: "spot", .. })
        ));
    }

    #[test]
    fn test_price_increases_with_volatility() {
        let low = PricingParams::new(100.0, 100.0, 0.05, 0.1, 1.0);
        let high = low.with_volatility(0.4);

        for kind in [OptionKind::Call, OptionKind::Put] {
            assert!(
                black_scholes_price(kind, &high).unwrap() > black_scholes_price(kind, &low).unwrap()
            );
        }
    }
}
