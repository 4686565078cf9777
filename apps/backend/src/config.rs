//! Server configuration from the environment.

use std::time::Duration;

use anyhow::Context;
use block_sync::SyncConfig;

/// Runtime configuration.
///
/// | Variable            | Default   |
/// |---------------------|-----------|
/// | `HOST`              | `0.0.0.0` |
/// | `PORT`              | `3000`    |
/// | `SYNC_ID_ATTRIBUTE` | `id`      |
/// | `SYNC_DEBOUNCE_MS`  | `300`     |
/// | `SESSION_IDLE_SECS` | `600`     |
///
/// `SESSION_IDLE_SECS=0` keeps sessions open until closed or shutdown.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub sync: SyncConfig,
    pub session_idle_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = SyncConfig::default();

        let port = match lookup("PORT") {
            Some(port) => port.parse::<u16>().with_context(|| format!("invalid PORT: {port}"))?,
            None => 3000,
        };
        let debounce_ms = match lookup("SYNC_DEBOUNCE_MS") {
            Some(ms) => ms
                .parse::<u64>()
                .with_context(|| format!("invalid SYNC_DEBOUNCE_MS: {ms}"))?,
            None => defaults.debounce_ms,
        };
        let session_idle_secs = match lookup("SESSION_IDLE_SECS") {
            Some(secs) => secs
                .parse::<u64>()
                .with_context(|| format!("invalid SESSION_IDLE_SECS: {secs}"))?,
            None => 600,
        };

        let sync = SyncConfig {
            attribute_name: lookup("SYNC_ID_ATTRIBUTE").unwrap_or(defaults.attribute_name),
            debounce_ms,
        };
        sync.validate()?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            sync,
            session_idle_secs,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Idle timeout for sync sessions, or `None` when eviction is off.
    pub fn session_idle(&self) -> Option<Duration> {
        (self.session_idle_secs > 0).then(|| Duration::from_secs(self.session_idle_secs))
    }
}
