//! Sync session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

/// Attribute carrying each node's stable identifier.
pub const DEFAULT_ATTRIBUTE_NAME: &str = "id";

/// Quiet period before staged changes are flushed.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub attribute_name: String,
    pub debounce_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl SyncConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.attribute_name.trim().is_empty() {
            return Err(SyncError::InvalidConfig(
                "attribute_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
