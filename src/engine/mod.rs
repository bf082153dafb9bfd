//! Calculation orchestration across a rate sweep
//!
//! The engine assumes its input was already validated. It walks the rate
//! sequence in order, evaluates NPV at each rate and packages the results.
//! The async variant suspends to a [`Scheduler`] every few rates and checks a
//! [`CancellationFlag`] between rates, never in the middle of one.

mod cancel;
mod orchestrator;
mod scheduler;

pub use cancel::CancellationFlag;
pub use orchestrator::CalculationEngine;
pub use scheduler::{NoopScheduler, Scheduler, SuspendFuture, TokioScheduler};
