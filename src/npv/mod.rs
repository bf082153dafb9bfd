//! Net Present Value evaluation for a single discount rate
//!
//! `NPV = sum(CF_t / (1 + r)^t)` for `t = 0..n-1`, with `r` as a fraction
//! (0.10 for 10%). Accumulation is in `Decimal`; the discount factor is the
//! only place a float may be involved, see [`DiscountFactor`].

mod discount;
mod evaluator;

pub use discount::{DecimalDiscount, DiscountFactor, FloatDiscount};
pub use evaluator::{npv, NpvEvaluator};
