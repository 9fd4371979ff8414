use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("graph api error {code} ({kind}): {message}")]
    Api {
        message: String,
        kind: String,
        code: i64,
    },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("{0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        // The request url carries the access token.
        Self::Transport(err.without_url())
    }
}

/// Credential attached to every upstream query. Never printed.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self { Self(token.into()) }

    pub fn expose(&self) -> &str { &self.0 }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Anything that can answer a graph query with a JSON object.
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    async fn query(
        &self, path: &str, fields: &[&str], credential: &AccessToken,
    ) -> Result<Value, UpstreamError>;
}

#[async_trait]
impl<T> UpstreamSource for std::sync::Arc<T>
where
    T: UpstreamSource + ?Sized,
{
    async fn query(
        &self, path: &str, fields: &[&str], credential: &AccessToken,
    ) -> Result<Value, UpstreamError> {
        (**self).query(path, fields, credential).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_is_redacted() {
        let token = AccessToken::new("secret-token");

        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        assert_eq!(token.expose(), "secret-token");
        assert!(!token.is_empty());
    }

    #[test]
    fn test_api_error_message() {
        let err = UpstreamError::Api {
            message: "Invalid OAuth access token.".to_string(),
            kind: "OAuthException".to_string(),
            code: 190,
        };

        assert_eq!(
            err.to_string(),
            "graph api error 190 (OAuthException): Invalid OAuth access \
             token."
        );
    }
}
