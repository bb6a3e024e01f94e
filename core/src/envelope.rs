//! Decoding of the `{success, data, message?}` response envelope.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, Operation};
use crate::http::HttpResponse;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "assume_success")]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

fn assume_success() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
}

/// Unwrap the `data` field of a successful response.
pub(crate) fn open<T: DeserializeOwned>(
    response: HttpResponse,
    operation: Operation,
) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(failure(&response, operation));
    }

    let envelope: Envelope<T> = serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(operation = operation.name(), error = %e, "undecodable response body");
        ApiError::server(operation, Some(response.status), None)
    })?;

    if !envelope.success {
        return Err(ApiError::server(
            operation,
            Some(response.status),
            envelope.message,
        ));
    }

    envelope.data.ok_or_else(|| {
        tracing::warn!(operation = operation.name(), "response envelope carries no data");
        ApiError::server(operation, Some(response.status), None)
    })
}

/// Check a response whose `data` is irrelevant to the caller.
pub(crate) fn acknowledge(response: HttpResponse, operation: Operation) -> Result<(), ApiError> {
    if !response.is_success() {
        return Err(failure(&response, operation));
    }

    // An empty body (e.g. 204) counts as success.
    if response.body.trim().is_empty() {
        return Ok(());
    }

    match serde_json::from_str::<Envelope<serde_json::Value>>(&response.body) {
        Ok(envelope) if !envelope.success => Err(ApiError::server(
            operation,
            Some(response.status),
            envelope.message,
        )),
        _ => Ok(()),
    }
}

fn failure(response: &HttpResponse, operation: Operation) -> ApiError {
    let body: FailureBody = serde_json::from_str(&response.body).unwrap_or_default();
    tracing::warn!(
        operation = operation.name(),
        status = response.status,
        "request failed"
    );
    ApiError::server(operation, Some(response.status), body.message)
}
