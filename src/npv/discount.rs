//! Discount factor calculation
//!
//! This is the one precision boundary in the pipeline. Everything upstream and
//! downstream is `Decimal`; an implementation of [`DiscountFactor`] decides how
//! `1 / (1 + r)^t` gets computed.

use crate::error::{EngineResult, NpvError};
use rust_decimal::prelude::*;
use rust_decimal::MathematicalOps;

/// Computes the multiplier that brings a period-`t` amount to present value
pub trait DiscountFactor: Send + Sync {
    /// Discount factor for `period` at fractional `rate`
    ///
    /// Period 0 is always exactly one. Callers guarantee `rate > -1`.
    fn factor(&self, rate: Decimal, period: usize) -> EngineResult<Decimal>;
}

/// Float exponentiation converted back to `Decimal`
///
/// Fast, and accurate to roughly 15 significant digits, which is far below
/// the cent rounding applied to the final NPV.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatDiscount;

impl DiscountFactor for FloatDiscount {
    fn factor(&self, rate: Decimal, period: usize) -> EngineResult<Decimal> {
        if period == 0 {
            return Ok(Decimal::ONE);
        }

        let base = (Decimal::ONE + rate)
            .to_f64()
            .ok_or_else(|| NpvError::overflow(format!("converting rate {} to float", rate)))?;
        let exponent = i32::try_from(period)
            .map_err(|_| NpvError::overflow(format!("raising to period {}", period)))?;

        let factor = 1.0 / base.powi(exponent);

        // Non-finite factors (1 + r close to zero, huge periods) have no decimal form
        Decimal::from_f64(factor).ok_or_else(|| {
            NpvError::overflow(format!(
                "converting discount factor {} for period {} at rate {}",
                factor, period, rate
            ))
        })
    }
}

/// All-decimal exponentiation, slower but with no float step at all
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalDiscount;

impl DiscountFactor for DecimalDiscount {
    fn factor(&self, rate: Decimal, period: usize) -> EngineResult<Decimal> {
        if period == 0 {
            return Ok(Decimal::ONE);
        }

        let exponent = i64::try_from(period)
            .map_err(|_| NpvError::overflow(format!("raising to period {}", period)))?;
        let growth = (Decimal::ONE + rate)
            .checked_powi(exponent)
            .ok_or_else(|| NpvError::overflow(format!("compounding rate {} over {} periods", rate, period)))?;

        Decimal::ONE
            .checked_div(growth)
            .ok_or_else(|| NpvError::overflow(format!("inverting growth factor {} for period {}", growth, period)))
    }
}
