//! Client core for the veterinary records REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern); `Atlas` stitches the two
//! together over any `RequestSender`.
//!
//! # Design
//! - `DataSource` holds the base URL and an immutable `Session`; it injects
//!   the CSRF token into every mutating request.
//! - `AtlasClient` binds one endpoint template and verb per domain operation
//!   as a `build_*` / `parse_*` pair.
//! - `Atlas` is the async facade; `ReqwestSender` does the real I/O.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod atlas;
pub mod client;
pub mod config;
pub mod data_source;
pub mod error;
pub mod http;
pub mod sender;
pub mod session;
pub mod types;

pub use atlas::Atlas;
pub use client::{AtlasClient, API_PREFIX};
pub use config::ClientConfig;
pub use data_source::{decode_json, expect_success, DataSource, CSRF_FIELD, CSRF_HEADER};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sender::{ReqwestSender, RequestSender};
pub use session::{CsrfToken, Session};
pub use types::{HealthStatus, HealthStatusUpdate, NewOwner, NewPet, Owner, Pet};
