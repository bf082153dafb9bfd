//! Application service: validate once, then run the engine
//!
//! This is the layer transports talk to. A validation failure comes back as a
//! normal response; engine failures and cancellation come back as `Err`.

use crate::config::EngineConfig;
use crate::engine::{CalculationEngine, CancellationFlag};
use crate::error::EngineResult;
use crate::request::{NpvRequest, NpvResult};
use crate::validation::{RequestValidator, ValidationOutcome};
use log::info;
use serde::Serialize;

/// Response returned to transport layers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<NpvResult>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CalculationResponse {
    pub fn success(data: Vec<NpvResult>, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
            warnings,
        }
    }

    pub fn validation_failure(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors,
            warnings,
        }
    }

    fn from_outcome(outcome: ValidationOutcome) -> Self {
        let (errors, warnings) = outcome.into_parts();
        Self::validation_failure(errors, warnings)
    }
}

/// Validates requests and runs the calculation engine
#[derive(Debug, Clone, Default)]
pub struct NpvApplicationService {
    validator: RequestValidator,
    engine: CalculationEngine,
}

impl NpvApplicationService {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            validator: RequestValidator::new(config.limits.clone()),
            engine: CalculationEngine::new(config),
        }
    }

    /// Validate and, if valid, calculate asynchronously
    pub async fn process(
        &self,
        request: Option<&NpvRequest>,
        cancel: &CancellationFlag,
    ) -> EngineResult<CalculationResponse> {
        let (request, warnings) = match self.admit(request) {
            Ok(admitted) => admitted,
            Err(rejected) => return Ok(rejected),
        };

        let data = self.engine.calculate_async(request, cancel).await?;
        info!("NPV calculation completed with {} results", data.len());
        Ok(CalculationResponse::success(data, warnings))
    }

    /// Validate and, if valid, calculate on the current thread
    pub fn process_sync(&self, request: Option<&NpvRequest>) -> EngineResult<CalculationResponse> {
        let (request, warnings) = match self.admit(request) {
            Ok(admitted) => admitted,
            Err(rejected) => return Ok(rejected),
        };

        let data = self.engine.calculate_sync(request)?;
        info!("NPV calculation completed with {} results", data.len());
        Ok(CalculationResponse::success(data, warnings))
    }

    /// Run validation; a valid request comes back with its warnings
    fn admit<'a>(
        &self,
        request: Option<&'a NpvRequest>,
    ) -> Result<(&'a NpvRequest, Vec<String>), CalculationResponse> {
        info!(
            "Processing NPV calculation request with {} cash flows",
            request.map(|r| r.cash_flows().len()).unwrap_or(0)
        );

        let outcome = self.validator.validate(request);
        match request {
            Some(request) if outcome.is_valid() => Ok((request, outcome.into_parts().1)),
            _ => Err(CalculationResponse::from_outcome(outcome)),
        }
    }
}
