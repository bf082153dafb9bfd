//! Discount rate sweep generation
//!
//! Rates are produced as `lower + increment * i` from an integer index, so
//! there is no drift from repeated addition. A rate is kept only while it is
//! within `upper + RATE_EPSILON`.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Tolerance above the upper bound that still counts as "at the bound"
pub const RATE_EPSILON: Decimal = dec!(0.001);

/// Range of percentage rates to sweep (5 means 5%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSweepSpec {
    pub lower_bound_rate: Decimal,
    pub upper_bound_rate: Decimal,
    pub rate_increment: Decimal,
}

impl RateSweepSpec {
    pub fn new(lower_bound_rate: Decimal, upper_bound_rate: Decimal, rate_increment: Decimal) -> Self {
        Self {
            lower_bound_rate,
            upper_bound_rate,
            rate_increment,
        }
    }

    /// Number of index steps considered: `ceil((upper - lower) / increment) + 1`
    ///
    /// The last step may still be dropped by the epsilon check. A non-positive
    /// increment gives a single step.
    pub fn term_count(&self) -> usize {
        if self.rate_increment <= Decimal::ZERO {
            return 1;
        }

        self.upper_bound_rate
            .checked_sub(self.lower_bound_rate)
            .and_then(|range| range.checked_div(self.rate_increment))
            .and_then(|steps| steps.ceil().checked_add(Decimal::ONE))
            .and_then(|terms| terms.to_usize())
            .unwrap_or(0)
    }

    /// Lazy sequence of the rates in this sweep, ascending from the lower bound
    pub fn rates(&self) -> RateSequence {
        RateSequence {
            spec: *self,
            index: 0,
            terms: self.term_count(),
        }
    }
}

/// Generate the rate sequence for a lower bound, upper bound and increment
pub fn generate(lower: Decimal, upper: Decimal, increment: Decimal) -> RateSequence {
    RateSweepSpec::new(lower, upper, increment).rates()
}

/// Iterator over swept rates
///
/// A clone continues from the same position; call [`RateSweepSpec::rates`]
/// again for a fresh pass.
#[derive(Debug, Clone)]
pub struct RateSequence {
    spec: RateSweepSpec,
    index: usize,
    terms: usize,
}

impl RateSequence {
    fn rate_at(&self, index: usize) -> Option<Decimal> {
        let step = self.spec.rate_increment.checked_mul(Decimal::from(index))?;
        self.spec.lower_bound_rate.checked_add(step)
    }
}

impl Iterator for RateSequence {
    type Item = Decimal;

    fn next(&mut self) -> Option<Decimal> {
        if self.index >= self.terms {
            return None;
        }

        let rate = self.rate_at(self.index)?;
        let limit = self
            .spec
            .upper_bound_rate
            .checked_add(RATE_EPSILON)
            .unwrap_or(Decimal::MAX);
        if rate > limit {
            // Ascending, so nothing later can qualify either
            self.index = self.terms;
            return None;
        }

        self.index += 1;
        Some(rate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.terms - self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(lower: Decimal, upper: Decimal, increment: Decimal) -> Vec<Decimal> {
        generate(lower, upper, increment).collect()
    }

    #[test]
    fn test_whole_number_sweep() {
        let rates = collect(dec!(1), dec!(5), dec!(1));
        assert_eq!(rates, vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);
    }

    #[test]
    fn test_fractional_sweep_includes_upper_bound() {
        let rates = collect(dec!(0.5), dec!(1.5), dec!(0.25));
        assert_eq!(rates, vec![dec!(0.5), dec!(0.75), dec!(1.0), dec!(1.25), dec!(1.5)]);
    }

    #[test]
    fn test_uneven_range_drops_overshoot() {
        // ceil(4 / 1.5) + 1 = 4 steps, but 1 + 1.5*3 = 5.5 is past the bound
        let spec = RateSweepSpec::new(dec!(1), dec!(5), dec!(1.5));
        assert_eq!(spec.term_count(), 4);
        let rates: Vec<_> = spec.rates().collect();
        assert_eq!(rates, vec![dec!(1), dec!(2.5), dec!(4)]);
    }

    #[test]
    fn test_epsilon_absorbs_tiny_overshoot() {
        // 0.0005 over the bound is still inside the tolerance
        let rates = collect(dec!(0), dec!(0.9995), dec!(0.5));
        assert_eq!(rates, vec![dec!(0), dec!(0.5), dec!(1.0)]);
    }

    #[test]
    fn test_equal_bounds_yield_one_rate() {
        let rates = collect(dec!(7.25), dec!(7.25), dec!(0.5));
        assert_eq!(rates, vec![dec!(7.25)]);
    }

    #[test]
    fn test_no_drift_over_many_steps() {
        let rates = collect(dec!(0), dec!(100), dec!(0.01));
        assert_eq!(rates.len(), 10_001);
        assert_eq!(rates[3_333], dec!(33.33));
        assert_eq!(*rates.last().unwrap(), dec!(100));
    }

    #[test]
    fn test_sequence_is_restartable() {
        let spec = RateSweepSpec::new(dec!(-2), dec!(2), dec!(1));
        let first: Vec<_> = spec.rates().collect();
        let second: Vec<_> = spec.rates().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_inverted_bounds_are_empty() {
        assert!(collect(dec!(5), dec!(4), dec!(1)).is_empty());
        assert!(collect(dec!(5), dec!(4.5), dec!(1)).is_empty());
    }

    #[test]
    fn test_zero_increment_does_not_divide() {
        assert_eq!(collect(dec!(3), dec!(10), dec!(0)), vec![dec!(3)]);
    }
}
