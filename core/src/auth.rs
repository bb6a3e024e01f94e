//! Request builder and response parser for the `/auth` endpoints.
//!
//! Auth requests never carry an authorization header.

use crate::client::encode;
use crate::envelope;
use crate::error::{ApiError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AuthPayload, LoginRequest, RegisterRequest, Registration};

#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_register(&self, input: &RegisterRequest) -> Result<HttpRequest, ApiError> {
        Ok(self.post("register", encode(input, Operation::Register)?))
    }

    pub fn build_login(&self, input: &LoginRequest) -> Result<HttpRequest, ApiError> {
        Ok(self.post("login", encode(input, Operation::Login)?))
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<Registration, ApiError> {
        envelope::open(response, Operation::Register)
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<AuthPayload, ApiError> {
        envelope::open(response, Operation::Login)
    }

    fn post(&self, action: &str, body: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/auth/{action}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}
