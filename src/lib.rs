//! NPV Calculator - Net Present Value across a sweep of discount rates
//!
//! This library provides:
//! - Rate sweep generation from lower bound, upper bound and increment
//! - NPV evaluation of a cash-flow series at a single rate
//! - Request validation with blocking errors and advisory warnings
//! - Sync and cancellable async calculation over a full sweep

pub mod application;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod npv;
pub mod report;
pub mod request;
pub mod sweep;
pub mod validation;

// Re-export commonly used types
pub use application::{CalculationResponse, NpvApplicationService};
pub use config::{EngineConfig, ValidationLimits};
pub use engine::{CalculationEngine, CancellationFlag};
pub use error::{EngineResult, NpvError};
pub use npv::{npv, NpvEvaluator};
pub use request::{NpvRequest, NpvResult};
pub use sweep::RateSweepSpec;
pub use validation::{RequestValidator, ValidationOutcome};
