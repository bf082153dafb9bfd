//! AWS Lambda handler for NPV sweeps
//!
//! Routes (Lambda Function URL):
//!   POST .../api/npv/calculate  - body `{cashFlows, lowerBoundRate, upperBoundRate, rateIncrement}`
//!   GET  .../api/npv/health     - liveness probe
//!
//! Limits come from defaults plus NPV_* environment overrides.

use chrono::Utc;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{error, info};
use npv_calculator::{CancellationFlag, EngineConfig, NpvApplicationService, NpvError, NpvRequest};
use serde::Serialize;
use serde_json::json;

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    json_response(status, &json!({ "success": false, "errors": [message] }))
}

/// Lambda handler function
async fn handler(service: &NpvApplicationService, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let path = event.uri().path();

    // Handle CORS preflight
    if method == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    if method == "GET" && path.ends_with("/health") {
        return json_response(200, &json!({ "status": "healthy", "timestamp": Utc::now() }));
    }

    if method != "POST" || !path.ends_with("/calculate") {
        return error_response(404, "Not found");
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => return error_response(400, "Request body is required"),
    };

    let request: Option<NpvRequest> = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };
    let Some(request) = request else {
        return error_response(400, "Request body is required");
    };

    // Nothing cancels a Lambda invocation mid-flight; the flag is never set
    let cancel = CancellationFlag::new();

    match service.process(Some(&request), &cancel).await {
        Ok(response) if response.success => json_response(200, &response),
        Ok(response) => json_response(400, &response),
        Err(NpvError::Cancelled) => {
            info!("NPV calculation was cancelled");
            error_response(409, "Operation was cancelled")
        }
        Err(e @ NpvError::RateOutOfDomain { .. }) => error_response(400, &e.to_string()),
        Err(e) => {
            error!("Unexpected error in NPV calculation: {}", e);
            error_response(500, "An error occurred while calculating NPV")
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = EngineConfig::default().with_env_overrides()?;
    let service = NpvApplicationService::new(&config);

    run(service_fn(move |event: Request| {
        let service = service.clone();
        async move { handler(&service, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http;
    use serde_json::Value;

    fn request(method: &str, path: &str, body: Body) -> Request {
        http::Request::builder()
            .method(method)
            .uri(path)
            .body(body)
            .unwrap()
    }

    async fn call(method: &str, path: &str, body: Body) -> (u16, Value) {
        let service = NpvApplicationService::default();
        let response = handler(&service, request(method, path, body)).await.unwrap();
        let status = response.status().as_u16();
        let json = match response.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            _ => Value::Null,
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_calculate_success() {
        let body = r#"{"cashFlows":[-1000,300,400,500],"lowerBoundRate":1,"upperBoundRate":5,"rateIncrement":1}"#;
        let (status, json) = call("POST", "/api/npv/calculate", Body::Text(body.to_string())).await;
        assert_eq!(status, 200);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_calculate_validation_failure() {
        let body = r#"{"cashFlows":[-1000,300],"lowerBoundRate":5,"upperBoundRate":1,"rateIncrement":1}"#;
        let (status, json) = call("POST", "/api/npv/calculate", Body::Text(body.to_string())).await;
        assert_eq!(status, 400);
        assert_eq!(json["success"], false);
        assert!(json["errors"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e.as_str().unwrap().contains("Upper bound must be greater")));
    }

    #[tokio::test]
    async fn test_missing_and_malformed_body() {
        let (status, json) = call("POST", "/api/npv/calculate", Body::Empty).await;
        assert_eq!(status, 400);
        assert_eq!(json["errors"][0], "Request body is required");

        let (status, _) = call("POST", "/api/npv/calculate", Body::Text("null".to_string())).await;
        assert_eq!(status, 400);

        let (status, json) = call("POST", "/api/npv/calculate", Body::Text("{oops".to_string())).await;
        assert_eq!(status, 400);
        assert!(json["errors"][0].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_rate_domain_error_is_client_error() {
        let body = r#"{"cashFlows":[-1000,300],"lowerBoundRate":-100,"upperBoundRate":0,"rateIncrement":10}"#;
        let (status, json) = call("POST", "/api/npv/calculate", Body::Text(body.to_string())).await;
        assert_eq!(status, 400);
        assert!(json["errors"][0].as_str().unwrap().contains("outside the domain"));
    }

    #[tokio::test]
    async fn test_numeric_overflow_is_server_error() {
        // At -99% the discount factor passes the decimal range by period 15
        let flows: Vec<String> = std::iter::once("-1000".to_string())
            .chain(std::iter::repeat("100".to_string()).take(199))
            .collect();
        let body = format!(
            r#"{{"cashFlows":[{}],"lowerBoundRate":-99,"upperBoundRate":0,"rateIncrement":1}}"#,
            flows.join(",")
        );
        let (status, json) = call("POST", "/api/npv/calculate", Body::Text(body)).await;
        assert_eq!(status, 500);
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0], "An error occurred while calculating NPV");
    }

    #[tokio::test]
    async fn test_health_and_unknown_routes() {
        let (status, json) = call("GET", "/api/npv/health", Body::Empty).await;
        assert_eq!(status, 200);
        assert_eq!(json["status"], "healthy");

        let (status, _) = call("GET", "/api/npv/other", Body::Empty).await;
        assert_eq!(status, 404);
    }
}
