use axum::http::HeaderMap;

/// Decides whether a request may reach the API.
///
/// Implementations inspect headers only; they never see the body and hold no
/// per-request state.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, headers: &HeaderMap) -> Result<(), AuthError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing {0} header")]
    MissingCredential(String),
    #[error("Invalid {0} header")]
    InvalidCredential(String),
}

/// Accepts requests whose `header` carries exactly the configured secret
#[derive(Debug, Clone)]
pub struct StaticApiKey {
    header: String,
    secret: String,
}

impl StaticApiKey {
    pub fn new(header: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            secret: secret.into(),
        }
    }
}

impl Authenticator for StaticApiKey {
    fn authenticate(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let value = headers
            .get(self.header.as_str())
            .ok_or_else(|| AuthError::MissingCredential(self.header.clone()))?;

        // An unset secret must not turn an empty header into a pass
        if self.secret.is_empty() || !constant_time_eq(value.as_bytes(), self.secret.as_bytes()) {
            return Err(AuthError::InvalidCredential(self.header.clone()));
        }
        Ok(())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
