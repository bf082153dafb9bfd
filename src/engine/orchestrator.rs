//! Drives the rate generator and the NPV evaluator over a whole sweep

use super::cancel::CancellationFlag;
use super::scheduler::{Scheduler, TokioScheduler};
use crate::config::EngineConfig;
use crate::error::{EngineResult, NpvError};
use crate::npv::{DiscountFactor, FloatDiscount, NpvEvaluator};
use crate::request::{NpvRequest, NpvResult};
use log::info;
use rust_decimal::Decimal;

/// Stateless calculation engine; safe to share between concurrent requests
#[derive(Debug, Clone)]
pub struct CalculationEngine<D = FloatDiscount> {
    evaluator: NpvEvaluator<D>,
    yield_every: usize,
}

impl CalculationEngine<FloatDiscount> {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            evaluator: NpvEvaluator::new(),
            yield_every: config.yield_every,
        }
    }
}

impl Default for CalculationEngine<FloatDiscount> {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl<D: DiscountFactor> CalculationEngine<D> {
    /// Create an engine around a specific evaluator
    pub fn with_evaluator(evaluator: NpvEvaluator<D>, yield_every: usize) -> Self {
        Self {
            evaluator,
            yield_every,
        }
    }

    /// Calculate NPV at every rate of the sweep, in ascending rate order
    pub fn calculate_sync(&self, request: &NpvRequest) -> EngineResult<Vec<NpvResult>> {
        let sweep = request.sweep();
        let cash_flows = request.cash_flows();
        info!("Starting NPV calculation for {} rates", sweep.term_count());

        let results = sweep
            .rates()
            .map(|rate| self.evaluate_rate(cash_flows, rate))
            .collect::<EngineResult<Vec<_>>>()?;

        info!("NPV calculation completed with {} results", results.len());
        Ok(results)
    }

    /// Same output as [`Self::calculate_sync`], yielding to tokio and honouring cancellation
    pub async fn calculate_async(
        &self,
        request: &NpvRequest,
        cancel: &CancellationFlag,
    ) -> EngineResult<Vec<NpvResult>> {
        self.calculate_with(request, cancel, &TokioScheduler).await
    }

    /// Async calculation with an explicit scheduler
    ///
    /// Cancellation is checked before each rate. A cancelled run returns
    /// `NpvError::Cancelled` and drops whatever was computed so far.
    pub async fn calculate_with<S>(
        &self,
        request: &NpvRequest,
        cancel: &CancellationFlag,
        scheduler: &S,
    ) -> EngineResult<Vec<NpvResult>>
    where
        S: Scheduler + ?Sized,
    {
        let sweep = request.sweep();
        let cash_flows = request.cash_flows();
        info!("Starting NPV calculation for {} rates", sweep.term_count());

        let mut results = Vec::new();
        for (index, rate) in sweep.rates().enumerate() {
            if cancel.is_cancelled() {
                info!("NPV calculation cancelled after {} rates", index);
                return Err(NpvError::Cancelled);
            }

            results.push(self.evaluate_rate(cash_flows, rate)?);

            if self.yield_every > 0 && (index + 1) % self.yield_every == 0 {
                scheduler.suspend().await;
            }
        }

        info!("NPV calculation completed with {} results", results.len());
        Ok(results)
    }

    fn evaluate_rate(&self, cash_flows: &[Decimal], rate: Decimal) -> EngineResult<NpvResult> {
        let value = self.evaluator.evaluate(cash_flows, rate / Decimal::ONE_HUNDRED)?;
        Ok(NpvResult {
            rate: rate.round_dp(2),
            value,
        })
    }
}
