//! Request validation rules
//!
//! Every rule is checked independently so the caller sees all problems at
//! once. Only a missing request short-circuits.

use super::outcome::ValidationOutcome;
use crate::config::ValidationLimits;
use crate::request::NpvRequest;
use log::{debug, warn};
use rust_decimal::Decimal;

/// Stateless validator driven by configurable limits
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    limits: ValidationLimits,
}

impl RequestValidator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// Validate a request without modifying it
    pub fn validate(&self, request: Option<&NpvRequest>) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        let Some(request) = request else {
            outcome.add_error("Request cannot be null");
            warn!("NPV request validation failed: null request");
            return outcome;
        };

        debug!(
            "Validating NPV request: {} cash flows, rates {}..{} step {}",
            request.cash_flows().len(),
            request.lower_bound_rate,
            request.upper_bound_rate,
            request.rate_increment
        );

        self.check_cash_flows(request.cash_flows.as_deref(), &mut outcome);
        self.check_rates(request, &mut outcome);
        check_cash_flow_shape(request.cash_flows.as_deref(), &mut outcome);

        if outcome.is_valid() {
            debug!("NPV request validation passed");
        } else {
            warn!(
                "NPV request validation failed with {} errors: {}",
                outcome.errors().len(),
                outcome.errors().join("; ")
            );
        }

        outcome
    }

    fn check_cash_flows(&self, cash_flows: Option<&[Decimal]>, outcome: &mut ValidationOutcome) {
        let Some(cash_flows) = cash_flows else {
            outcome.add_error("Cash flows cannot be null");
            return;
        };

        if cash_flows.is_empty() {
            outcome.add_error("At least one cash flow is required");
            return;
        }

        if cash_flows.iter().any(|cf| cf.abs() > self.limits.max_cash_flow_magnitude) {
            outcome.add_error("Cash flows contain extremely large values");
        }

        if cash_flows.len() > self.limits.max_cash_flows {
            outcome.add_error(format!(
                "Too many cash flows. Maximum allowed: {}",
                self.limits.max_cash_flows
            ));
        }
    }

    fn check_rates(&self, request: &NpvRequest, outcome: &mut ValidationOutcome) {
        let limits = &self.limits;
        let lower = request.lower_bound_rate;
        let upper = request.upper_bound_rate;
        let increment = request.rate_increment;
        // Only overflows at the edges of Decimal, where the bound checks fail anyway
        let range = upper.checked_sub(lower).unwrap_or(Decimal::MAX);

        if lower < limits.min_lower_bound_rate {
            outcome.add_error(format!(
                "Lower bound rate cannot be less than {}%",
                limits.min_lower_bound_rate
            ));
        }

        if upper > limits.max_upper_bound_rate {
            outcome.add_error(format!(
                "Upper bound rate cannot exceed {}%",
                limits.max_upper_bound_rate
            ));
        }

        if upper <= lower {
            outcome.add_error("Upper bound must be greater than lower bound");
        }

        if increment < limits.min_rate_increment {
            outcome.add_error(format!(
                "Rate increment must be at least {}%",
                limits.min_rate_increment
            ));
        }

        if increment > range {
            outcome.add_error("Rate increment cannot be larger than the rate range");
        }

        // A zero increment is already an error above; skip the division
        if let Some(total) = range.checked_div(increment) {
            if total > Decimal::from(limits.max_calculations) {
                outcome.add_error(format!(
                    "Too many calculations ({}). Maximum: {}",
                    total.round_dp(0),
                    limits.max_calculations
                ));
            }
        }
    }
}

/// Advisory checks on the sign pattern of the cash flows
fn check_cash_flow_shape(cash_flows: Option<&[Decimal]>, outcome: &mut ValidationOutcome) {
    let Some(cash_flows) = cash_flows else {
        return;
    };

    // Holds vacuously for an empty list
    if cash_flows.iter().all(|cf| *cf >= Decimal::ZERO) {
        outcome.add_warning("All cash flows are non-negative - unusual for NPV calculations");
    }

    if cash_flows.first().is_some_and(|first| *first > Decimal::ZERO) {
        outcome.add_warning("First cash flow is positive - typically initial investment is negative");
    }
}
