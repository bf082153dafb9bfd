//! Pre-flight checks on NPV requests
//!
//! Validation never touches the rate generator or the evaluator. It reports
//! blocking problems as errors and advisory ones as warnings; bad data is
//! never raised as an `Err`.

mod outcome;
mod validator;

pub use outcome::ValidationOutcome;
pub use validator::RequestValidator;
