use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};
use url::Url;

use crate::{
    config::GraphApiConfig,
    source::{AccessToken, UpstreamError, UpstreamSource},
};

#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    code: i64,
}

impl From<GraphErrorBody> for UpstreamError {
    fn from(body: GraphErrorBody) -> Self {
        UpstreamError::Api {
            message: body.message,
            kind: body.kind,
            code: body.code,
        }
    }
}

#[derive(Clone)]
pub struct GraphApiClient {
    client: Client,
    config: GraphApiConfig,
}

impl GraphApiClient {
    pub fn new(config: GraphApiConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Full request url, credential included.
    pub fn endpoint(
        &self, path: &str, fields: &[&str], credential: &AccessToken,
    ) -> Result<Url, UpstreamError> {
        let mut url = Url::parse(&self.config.base_url)?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                UpstreamError::Decode(format!(
                    "base url cannot carry a path: {}",
                    self.config.base_url
                ))
            })?;
            segments.pop_if_empty();
            if let Some(version) = &self.config.version {
                segments.push(version);
            }
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }

        {
            let mut query = url.query_pairs_mut();
            if !fields.is_empty() {
                query.append_pair("fields", &fields.join(","));
            }
            query.append_pair("access_token", credential.expose());
        }

        Ok(url)
    }
}

/// Turns a Graph API reply into its JSON object, surfacing error payloads
/// even when they arrive with a success status.
pub fn decode_response(
    status: StatusCode, body: &[u8],
) -> Result<Value, UpstreamError> {
    if !status.is_success() {
        if let Ok(envelope) = serde_json::from_slice::<GraphErrorEnvelope>(body)
        {
            return Err(envelope.error.into());
        }
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| UpstreamError::Decode(e.to_string()))?;

    if let Some(error) = value.get("error") {
        let body = GraphErrorBody::deserialize(error)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;
        return Err(body.into());
    }

    if !value.is_object() {
        return Err(UpstreamError::Decode(
            "expected a json object".to_string(),
        ));
    }

    Ok(value)
}

#[async_trait]
impl UpstreamSource for GraphApiClient {
    #[instrument(skip(self, credential))]
    async fn query(
        &self, path: &str, fields: &[&str], credential: &AccessToken,
    ) -> Result<Value, UpstreamError> {
        let url = self.endpoint(path, fields, credential)?;

        info!("Querying graph api");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        decode_response(status, &body)
    }
}
