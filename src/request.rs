//! Request and result structures exchanged with callers

use crate::sweep::RateSweepSpec;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A request to sweep NPV across a range of discount rates
///
/// Rates are percentages (5 means 5%). `cash_flows` is an `Option` so that an
/// explicit JSON `null` can be told apart from an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpvRequest {
    #[serde(default)]
    pub cash_flows: Option<Vec<Decimal>>,

    #[serde(default)]
    pub lower_bound_rate: Decimal,

    #[serde(default)]
    pub upper_bound_rate: Decimal,

    #[serde(default)]
    pub rate_increment: Decimal,
}

impl NpvRequest {
    pub fn new(
        cash_flows: Vec<Decimal>,
        lower_bound_rate: Decimal,
        upper_bound_rate: Decimal,
        rate_increment: Decimal,
    ) -> Self {
        Self {
            cash_flows: Some(cash_flows),
            lower_bound_rate,
            upper_bound_rate,
            rate_increment,
        }
    }

    /// Cash flows as a slice; absent cash flows read as empty
    pub fn cash_flows(&self) -> &[Decimal] {
        self.cash_flows.as_deref().unwrap_or(&[])
    }

    pub fn sweep(&self) -> RateSweepSpec {
        RateSweepSpec::new(self.lower_bound_rate, self.upper_bound_rate, self.rate_increment)
    }
}

/// NPV at one swept rate; both fields rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpvResult {
    /// Discount rate in percent
    pub rate: Decimal,
    pub value: Decimal,
}
