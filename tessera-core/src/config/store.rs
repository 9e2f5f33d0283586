//! Binary persistence for panel configuration
//!
//! The configuration is serialized with postcard behind a small header so
//! stale or foreign data is rejected on load.

use serde::{Deserialize, Serialize};

use super::types::PanelConfig;

/// Magic number to identify stored panel configuration
pub const CONFIG_MAGIC: u32 = 0x5453_5041; // "TSPA"

/// Current stored format version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound on the serialized size of a [`StoredConfig`]
pub const MAX_STORED_SIZE: usize = 64;

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Output buffer too small or serialization failed
    Serialize,
    /// Data could not be decoded
    Deserialize,
    /// Magic number mismatch
    BadMagic,
    /// Stored version is not supported
    VersionMismatch,
}

/// Panel configuration with its validation header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Panel configuration
    pub config: PanelConfig,
}

impl StoredConfig {
    /// Wrap a config with the current header
    pub fn new(config: PanelConfig) -> Self {
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            config,
        }
    }

    /// Check the header
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.magic != CONFIG_MAGIC {
            return Err(StoreError::BadMagic);
        }
        if self.version != CONFIG_VERSION {
            return Err(StoreError::VersionMismatch);
        }
        Ok(())
    }
}

/// Serialize a config into `buf`, returning the used prefix
pub fn encode<'b>(config: &PanelConfig, buf: &'b mut [u8]) -> Result<&'b mut [u8], StoreError> {
    let stored = StoredConfig::new(config.clone());
    postcard::to_slice(&stored, buf).map_err(|_| StoreError::Serialize)
}

/// Restore a config previously written by [`encode`]
pub fn decode(bytes: &[u8]) -> Result<PanelConfig, StoreError> {
    let stored: StoredConfig = postcard::from_bytes(bytes).map_err(|_| StoreError::Deserialize)?;
    stored.validate()?;
    Ok(stored.config)
}
