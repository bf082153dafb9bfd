//! NPV of a cash-flow series at one discount rate

use super::discount::{DiscountFactor, FloatDiscount};
use crate::error::{EngineResult, NpvError};
use rust_decimal::Decimal;

/// Stateless NPV evaluator, generic over how discount factors are computed
#[derive(Debug, Clone, Default)]
pub struct NpvEvaluator<D = FloatDiscount> {
    discount: D,
}

impl NpvEvaluator<FloatDiscount> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: DiscountFactor> NpvEvaluator<D> {
    /// Create an evaluator with a specific discount factor implementation
    pub fn with_discount(discount: D) -> Self {
        Self { discount }
    }

    /// Calculate NPV of `cash_flows` (index = period) at fractional `rate`
    ///
    /// The sum is rounded to cents once, at the end.
    ///
    /// # Errors
    /// * `InvalidInput` if `cash_flows` is empty
    /// * `RateOutOfDomain` if `rate <= -1`
    /// * `Overflow` if the sum or a discount factor cannot be represented
    pub fn evaluate(&self, cash_flows: &[Decimal], rate: Decimal) -> EngineResult<Decimal> {
        if cash_flows.is_empty() {
            return Err(NpvError::invalid_input(
                "cash_flows",
                "Cash flows cannot be null or empty",
            ));
        }

        if rate <= Decimal::NEGATIVE_ONE {
            return Err(NpvError::RateOutOfDomain { rate });
        }

        let mut npv = Decimal::ZERO;
        for (period, &amount) in cash_flows.iter().enumerate() {
            let factor = self.discount.factor(rate, period)?;
            let present_value = amount
                .checked_mul(factor)
                .ok_or_else(|| NpvError::overflow(format!("discounting period {} cash flow {}", period, amount)))?;
            npv = npv
                .checked_add(present_value)
                .ok_or_else(|| NpvError::overflow(format!("accumulating NPV at period {}", period)))?;
        }

        Ok(npv.round_dp(2))
    }
}

/// NPV using the default float discount factor
pub fn npv(cash_flows: &[Decimal], rate: Decimal) -> EngineResult<Decimal> {
    NpvEvaluator::new().evaluate(cash_flows, rate)
}
