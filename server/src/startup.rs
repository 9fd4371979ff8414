use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Context;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use events_http::EventServices;
use graph_client::GraphApiClient;
use redis_connection::{
    CacheBackend, CacheStore, config::MemoryConfig, connect_redis_db,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{CacheBackendKind, GatewayConfig};

pub fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Builds the shared collaborators once; every request reuses them.
pub async fn build_services(
    config: &GatewayConfig,
) -> anyhow::Result<EventServices> {
    let cache: Arc<dyn CacheStore> = match config.cache_backend {
        CacheBackendKind::Redis => {
            let redis_config = config.redis_config()?;
            let pool = connect_redis_db(&redis_config).await?;
            info!("Redis cache backend initialized");
            Arc::new(CacheBackend::redis(pool))
        }
        CacheBackendKind::Memory => {
            warn!("Using the in-process memory cache; entries are not shared");
            Arc::new(CacheBackend::memory(MemoryConfig::default()))
        }
    };

    let credential = config.credential()?;
    let upstream = GraphApiClient::new(config.graph_api_config())
        .context("Failed to build graph api client")?;

    Ok(EventServices::new(
        cache,
        Arc::new(upstream),
        credential,
        config.feed_query(),
    ))
}

pub async fn resolve_bind_addr(config: &GatewayConfig) -> anyhow::Result<SocketAddr> {
    let addr = config.bind_addr();
    tokio::net::lookup_host(&addr)
        .await
        .with_context(|| format!("Failed to resolve {addr}"))?
        .next()
        .with_context(|| format!("{addr} resolved to no address"))
}

/// Makes ring the process-wide rustls provider. Idempotent.
pub fn install_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none() {
        let _ = rustls::crypto::ring::default_provider().install_default();
    }
}

pub async fn load_tls_config(
    cert: &Path, key: &Path,
) -> anyhow::Result<RustlsConfig> {
    install_crypto_provider();

    RustlsConfig::from_pem_file(cert, key).await.with_context(|| {
        format!(
            "Failed to load TLS material from {} and {}",
            cert.display(),
            key.display()
        )
    })
}

pub async fn serve(config: &GatewayConfig, app: Router) -> anyhow::Result<()> {
    let addr = resolve_bind_addr(config).await?;

    match config.tls_paths() {
        Some((cert, key)) => {
            let tls = load_tls_config(&cert, &key).await?;
            info!("listening on https://{addr}");
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("listening on http://{addr}");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test/fixtures")
            .join(name)
    }

    #[tokio::test]
    async fn test_load_tls_config_from_pem_pair() {
        let config =
            load_tls_config(&fixture("cert.pem"), &fixture("key.pem")).await;

        assert!(config.is_ok(), "{:?}", config.err());
    }

    #[tokio::test]
    async fn test_load_tls_config_twice_reuses_provider() {
        for _ in 0..2 {
            load_tls_config(&fixture("cert.pem"), &fixture("key.pem"))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_load_tls_config_missing_file_is_error() {
        let err = load_tls_config(&fixture("absent.pem"), &fixture("key.pem"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to load TLS material"));
    }
}
