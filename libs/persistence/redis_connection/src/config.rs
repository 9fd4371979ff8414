use url::Url;

use crate::RedisConnectError;

pub trait DbConnectConfig: serde::de::DeserializeOwned {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn db(&self) -> u8;
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RedisDbConfig {
    #[serde(default = "host_default")]
    pub host: String,
    #[serde(default = "port_default")]
    pub port: u16,
    #[serde(default = "db_default")]
    pub db: u8,
}

impl RedisDbConfig {
    /// Builds a config from a `host:port`, bare `host` or `redis://` address.
    pub fn from_addr(addr: &str, db: u8) -> Result<Self, RedisConnectError> {
        let addr = addr.trim();
        if addr.is_empty() {
            return Err(RedisConnectError::InvalidAddress(addr.to_string()));
        }

        if addr.starts_with("redis://") {
            let url = Url::parse(addr)?;
            let host = url
                .host_str()
                .filter(|h| !h.is_empty())
                .ok_or_else(|| {
                    RedisConnectError::InvalidAddress(addr.to_string())
                })?
                .to_string();
            return Ok(Self {
                host,
                port: url.port().unwrap_or_else(port_default),
                db,
            });
        }

        match addr.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse().map_err(|_| {
                    RedisConnectError::InvalidAddress(addr.to_string())
                })?;
                let host = if host.is_empty() {
                    host_default()
                }
                else {
                    host.to_string()
                };
                Ok(Self { host, port, db })
            }
            None => Ok(Self {
                host: addr.to_string(),
                port: port_default(),
                db,
            }),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_memory_capacity")]
    pub capacity: u64,
    /// Upper bound on any entry's lifetime, whatever TTL it was written with.
    #[serde(default = "default_memory_max_ttl_secs")]
    pub max_ttl_secs: u64,
}

impl DbConnectConfig for RedisDbConfig {
    fn host(&self) -> &str { &self.host }

    fn port(&self) -> u16 { self.port }

    fn db(&self) -> u8 { self.db }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_memory_capacity(),
            max_ttl_secs: default_memory_max_ttl_secs(),
        }
    }
}

fn host_default() -> String { "127.0.0.1".into() }
fn port_default() -> u16 { 6379 }
fn db_default() -> u8 { 0 }
fn default_memory_capacity() -> u64 { 10_000 }
fn default_memory_max_ttl_secs() -> u64 { 24 * 60 * 60 }

impl MemoryConfig {
    pub fn max_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.max_ttl_secs)
    }

    pub fn clamp_ttl(&self, ttl: std::time::Duration) -> std::time::Duration {
        ttl.min(self.max_ttl())
    }
}
