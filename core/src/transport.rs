//! Execution of plain-data requests.
//!
//! # Design
//! The client core never opens sockets itself. A [`Transport`] turns an
//! [`HttpRequest`] into an [`HttpResponse`]; every status code, including 4xx
//! and 5xx, is returned as data. Only failures that prevent a response from
//! arriving (DNS, refused connection, broken body) are `TransportError`s.

use thiserror::Error;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes are interpreted by the API layer, not by ureq.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = request.method.as_str(), url = %request.path, "sending request");

        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        let body = body.unwrap_or_default();

        let result = match method {
            HttpMethod::Get => with_headers(self.agent.get(path.as_str()), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(path.as_str()), &headers).call(),
            HttpMethod::Post => {
                with_headers(self.agent.post(path.as_str()), &headers).send(body.as_bytes())
            }
            HttpMethod::Put => with_headers(self.agent.put(path.as_str()), &headers).send(body.as_bytes()),
        };

        let mut response = result.map_err(|e| {
            tracing::warn!(url = %path, error = %e, "transport failure");
            TransportError(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        tracing::debug!(url = %path, status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
