//! Remote solver boundary
//!
//! The cube state is posted as `{ "cubeState": "<54 chars>" }`. The service
//! answers with a JSON object carrying either `solution` or `error`. Any
//! non-success HTTP status is a failure, whatever the body says.

use crate::config::SolverConfig;
use crate::error::{Result, ScanError};
use crate::scan::CubeState;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Anything that turns a cube state into a move sequence
pub trait Solver: Send + Sync {
    fn solve(&self, state: &CubeState) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveRequest<'a> {
    cube_state: &'a str,
}

/// Body returned by the solver service
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SolveResponse {
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SolveResponse {
    /// Interpret the body; an `error` field wins over `solution`
    pub fn into_result(self) -> Result<String> {
        match (self.solution, self.error) {
            (_, Some(message)) => Err(ScanError::SolverRejected { message }),
            (Some(solution), None) => Ok(solution),
            (None, None) => Err(ScanError::SolverRequestFailed {
                message: "response has neither solution nor error".to_string(),
                status: None,
                source: None,
            }),
        }
    }
}

/// HTTP client for the solver service
#[derive(Debug, Clone)]
pub struct SolverClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SolverClient {
    pub fn new(config: &SolverConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ScanError::solver("cannot build HTTP client", e))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Solver for SolverClient {
    async fn solve(&self, state: &CubeState) -> Result<String> {
        debug!("posting cube state {state} to {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SolveRequest {
                cube_state: state.as_str(),
            })
            .send()
            .await
            .map_err(|e| ScanError::solver(format!("cannot reach {}", self.endpoint), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<SolveResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .unwrap_or(body);
            warn!("solver answered HTTP {status}: {detail}");
            return Err(ScanError::SolverRequestFailed {
                message: format!("HTTP {status}: {detail}"),
                status: Some(status.as_u16()),
                source: None,
            });
        }

        let body: SolveResponse = response
            .json()
            .await
            .map_err(|e| ScanError::solver("invalid solver response", e))?;
        body.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let json = serde_json::to_string(&SolveRequest { cube_state: "UUU" }).unwrap();
        assert_eq!(json, r#"{"cubeState":"UUU"}"#);
    }

    #[test]
    fn test_response_with_solution() {
        let body: SolveResponse = serde_json::from_str(r#"{"solution":"R U R' U'"}"#).unwrap();
        assert_eq!(body.into_result().unwrap(), "R U R' U'");
    }

    #[test]
    fn test_response_with_error() {
        let body: SolveResponse = serde_json::from_str(r#"{"error":"invalid cube"}"#).unwrap();
        let err = body.into_result().unwrap_err();
        assert!(matches!(err, ScanError::SolverRejected { ref message } if message == "invalid cube"));
    }

    #[test]
    fn test_empty_response_is_failure() {
        let body: SolveResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            body.into_result(),
            Err(ScanError::SolverRequestFailed { status: None, .. })
        ));
    }

    #[test]
    fn test_client_uses_configured_endpoint() {
        let config = SolverConfig {
            endpoint: "http://127.0.0.1:1/solve".to_string(),
            timeout_ms: 500,
        };
        let client = SolverClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:1/solve");
    }
}
