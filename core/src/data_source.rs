//! Generic request construction and REST response decoding.
//!
//! # Design
//! `DataSource` owns the base URL and an optional `Session`. It turns an
//! endpoint, a verb and a JSON payload into an `HttpRequest`, injecting the
//! CSRF token into every mutating request (as the `csrf-token` header and the
//! `_csrf` body field). It performs no I/O. `decode_json` is the REST half:
//! it checks the status and parses the body. A `RequestSender` sits between
//! the two.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;

/// Body field carrying the CSRF token.
pub const CSRF_FIELD: &str = "_csrf";
/// Header carrying the CSRF token.
pub const CSRF_HEADER: &str = "csrf-token";

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct DataSource {
    base_url: String,
    session: Option<Session>,
}

impl DataSource {
    /// A data source with no session. GET requests work; mutating requests
    /// fail validation.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    pub fn with_session(base_url: &str, session: Session) -> Self {
        Self {
            session: Some(session),
            ..Self::new(base_url)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// GET `endpoint` with no body and no CSRF token.
    pub fn build_get(&self, endpoint: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(endpoint),
            headers: vec![("accept".to_string(), JSON.to_string())],
            body: None,
            include_credentials: true,
        }
    }

    /// Build a request for `endpoint`.
    ///
    /// For GET the payload is ignored. For any other verb the payload gets a
    /// `_csrf` entry and is sent as the JSON body, and the token also goes
    /// into the `csrf-token` header.
    pub fn build_request(
        &self,
        endpoint: &str,
        method: HttpMethod,
        mut payload: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        if !method.is_mutating() {
            return Ok(self.build_get(endpoint));
        }

        let token = self
            .session
            .as_ref()
            .map(|s| s.csrf_token().as_str().to_string())
            .ok_or_else(|| {
                ApiError::Validation(format!("{method} {endpoint} requires a CSRF token"))
            })?;

        payload.insert(CSRF_FIELD.to_string(), Value::String(token.clone()));
        let body = serde_json::to_string(&payload)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        Ok(HttpRequest {
            method,
            url: self.url(endpoint),
            headers: vec![
                ("accept".to_string(), JSON.to_string()),
                (CSRF_HEADER.to_string(), token),
                ("content-type".to_string(), JSON.to_string()),
            ],
            body: Some(body),
            include_credentials: true,
        })
    }

    /// Like `build_request`, but takes any payload that serializes to a JSON
    /// object.
    pub fn build_json<T: Serialize>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let value =
            serde_json::to_value(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        match value {
            Value::Object(map) => self.build_request(endpoint, method, map),
            other => Err(ApiError::Serialization(format!(
                "payload must be a JSON object, got {other}"
            ))),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

/// Fail with `TransportError::Status` unless the response is 2xx.
pub fn expect_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    tracing::warn!(status = response.status, "request rejected by server");
    Err(TransportError::Status {
        status: response.status,
        body: response.body.clone(),
    }
    .into())
}

/// Check the status, then parse the body as JSON.
pub fn decode_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    expect_success(&response)?;
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(error = %e, "response body is not the expected JSON");
        ApiError::Decode(e.to_string())
    })
}
