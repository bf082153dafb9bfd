//! Suspension points for long sweeps
//!
//! Yielding is a courtesy to whatever else shares the runtime. Results must be
//! identical whichever scheduler is used.

use std::future::Future;
use std::pin::Pin;

/// Future returned by [`Scheduler::suspend`]
pub type SuspendFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Hands control back to the host between rate evaluations
pub trait Scheduler: Send + Sync {
    fn suspend(&self) -> SuspendFuture<'_>;
}

/// Yields to the tokio runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn suspend(&self) -> SuspendFuture<'_> {
        Box::pin(tokio::task::yield_now())
    }
}

/// Never suspends
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

impl Scheduler for NoopScheduler {
    fn suspend(&self) -> SuspendFuture<'_> {
        Box::pin(std::future::ready(()))
    }
}
