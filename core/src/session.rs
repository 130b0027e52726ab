//! Authenticated session state shared by every mutating request.

use std::fmt;

/// Anti-forgery token issued by the server after login.
///
/// Opaque to the client. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(<redacted>)")
    }
}

/// A logged-in session. The token is fixed at construction; a new login
/// means a new `Session` and a new `DataSource`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    csrf_token: CsrfToken,
}

impl Session {
    pub fn new(csrf_token: impl Into<String>) -> Self {
        Self {
            csrf_token: CsrfToken::new(csrf_token),
        }
    }

    pub fn csrf_token(&self) -> &CsrfToken {
        &self.csrf_token
    }
}
