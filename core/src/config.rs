//! Client configuration.
//!
//! Loaded in priority order (lowest to highest):
//! 1. Struct defaults
//! 2. Environment variables with the `VETATLAS_` prefix

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::data_source::DataSource;
use crate::error::ApiError;
use crate::session::Session;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Scheme and host of the REST API, e.g. `http://localhost:3000`.
    pub base_url: String,

    /// CSRF token from an earlier login. Without it only reads are possible.
    pub csrf_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            csrf_token: None,
        }
    }
}

impl ClientConfig {
    /// Load from defaults and `VETATLAS_BASE_URL` / `VETATLAS_CSRF_TOKEN`.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the sources cannot be merged or the
    /// result is invalid.
    pub fn load() -> Result<Self, ApiError> {
        // The token is opaque: read it verbatim so "123456" or "true" stay strings.
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("VETATLAS_").ignore(&["csrf_token"]));
        if let Some(token) = Env::var("VETATLAS_CSRF_TOKEN") {
            figment = figment.merge(Serialized::default("csrf_token", token));
        }
        let config: Self = figment.extract()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.base_url.trim().is_empty() {
            return Err(ApiError::Config("base_url is required".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base_url must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// A `DataSource` for this configuration, with a session when a token is set.
    pub fn data_source(&self) -> DataSource {
        match self.csrf_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => DataSource::with_session(&self.base_url, Session::new(token)),
            None => DataSource::new(&self.base_url),
        }
    }
}
