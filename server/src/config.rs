use std::{path::PathBuf, time::Duration};

use anyhow::bail;
use clap::{Parser, ValueEnum};
use events_queries::{DEFAULT_GROUP_ID, GetEventFeedQuery};
use graph_client::{
    AccessToken, GraphApiConfig,
    config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
};
use redis_connection::config::RedisDbConfig;
use tracing::warn;

const DEFAULT_HOST: &str = "";
const DEFAULT_PORT: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackendKind {
    Redis,
    Memory,
}

/// Process configuration, read from flags or the environment (`.env` is
/// loaded first).
#[derive(Debug, Clone, Parser)]
#[command(name = "event-feed-gateway", version, about = "Cached event feed for a Facebook group")]
pub struct GatewayConfig {
    /// Interface to bind; empty binds every interface
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// PEM private key; TLS is only enabled when the certificate is set too
    #[arg(long, env = "TLSKEY")]
    pub tls_key: Option<PathBuf>,

    /// PEM certificate chain
    #[arg(long, env = "TLSCERT")]
    pub tls_cert: Option<PathBuf>,

    #[arg(long, env = "CACHE_BACKEND", value_enum, default_value_t = CacheBackendKind::Redis)]
    pub cache_backend: CacheBackendKind,

    /// `host:port` or `redis://` address of the cache store
    #[arg(long, env = "REDISADDR")]
    pub redis_addr: Option<String>,

    #[arg(long, env = "REDISDB", default_value_t = 0)]
    pub redis_db: u8,

    /// Graph API access token
    #[arg(long, env = "FBKEY", hide_env_values = true)]
    pub fb_key: Option<String>,

    #[arg(long, env = "FB_GROUP_ID", default_value = DEFAULT_GROUP_ID)]
    pub group_id: String,

    #[arg(long, env = "FB_API_BASE", default_value = DEFAULT_BASE_URL)]
    pub graph_api_base: String,

    /// Graph API version segment, e.g. `v19.0`
    #[arg(long, env = "FB_API_VERSION")]
    pub graph_api_version: Option<String>,

    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub upstream_timeout_secs: u64,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl GatewayConfig {
    pub fn bind_addr(&self) -> String {
        let host = match self.host.trim() {
            "" => "0.0.0.0",
            host => host,
        };
        format!("{host}:{}", self.port)
    }

    /// Certificate and key paths, or `None` to serve plaintext.
    pub fn tls_paths(&self) -> Option<(PathBuf, PathBuf)> {
        let key = self
            .tls_key
            .clone()
            .filter(|p| !p.as_os_str().is_empty());
        let cert = self
            .tls_cert
            .clone()
            .filter(|p| !p.as_os_str().is_empty());

        if key.is_none() {
            warn!("env TLSKEY not found, server will not use https");
        }
        if cert.is_none() {
            warn!("env TLSCERT not found, server will not use https");
        }

        Some((cert?, key?))
    }

    pub fn redis_config(&self) -> anyhow::Result<RedisDbConfig> {
        let Some(addr) = non_empty(&self.redis_addr)
        else {
            bail!("env REDISADDR not found, exiting");
        };
        Ok(RedisDbConfig::from_addr(addr, self.redis_db)?)
    }

    pub fn credential(&self) -> anyhow::Result<AccessToken> {
        let Some(key) = non_empty(&self.fb_key)
        else {
            bail!("env FBKEY not found, exiting");
        };
        Ok(AccessToken::new(key))
    }

    pub fn graph_api_config(&self) -> GraphApiConfig {
        GraphApiConfig {
            base_url: self.graph_api_base.clone(),
            version: non_empty(&self.graph_api_version).map(str::to_string),
            timeout: Duration::from_secs(self.upstream_timeout_secs),
        }
    }

    pub fn feed_query(&self) -> GetEventFeedQuery {
        GetEventFeedQuery::new(self.group_id.trim())
    }
}
