//! The I/O half of the client: executing an `HttpRequest`.
//!
//! # Design
//! `RequestSender` is the only seam that touches the network. Non-2xx
//! statuses come back as data; interpreting them is the decoder's job.
//! `ReqwestSender` is the production implementation; tests plug in their own.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one request and returns the raw response. Never retries.
#[async_trait]
pub trait RequestSender: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<S: RequestSender + ?Sized> RequestSender for Arc<S> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request).await
    }
}

/// `reqwest`-backed sender.
///
/// Requests with `include_credentials` go through a client with a cookie
/// store, so session cookies set by the server are replayed on later calls.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    with_cookies: reqwest::Client,
    anonymous: reqwest::Client,
}

impl ReqwestSender {
    pub fn new() -> Result<Self, ApiError> {
        let with_cookies = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(network)?;
        let anonymous = reqwest::Client::builder().build().map_err(network)?;
        Ok(Self {
            with_cookies,
            anonymous,
        })
    }
}

#[async_trait]
impl RequestSender for ReqwestSender {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let client = if request.include_credentials {
            &self.with_cookies
        } else {
            &self.anonymous
        };

        let mut builder = client.request(to_reqwest(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(network)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn network(err: reqwest::Error) -> ApiError {
    TransportError::Network(err.to_string()).into()
}
