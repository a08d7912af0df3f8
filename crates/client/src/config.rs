//! Client configuration via `poolsnap.toml`
//!
//! All fields are optional in the file; missing ones take their defaults.
//! A config is validated when a [`Client`](crate::Client) is built from it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use poolsnap_core::{DEFAULT_LIST_LEN, DEFAULT_NAME_BUF_LEN};

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "poolsnap.toml";

/// How requests are marshalled before they reach the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// Hand typed requests to the transport as-is
    #[default]
    None,
    /// Round-trip every request and reply through MessagePack
    Msgpack,
}

/// Client configuration loaded from `poolsnap.toml`.
///
/// # Example
///
/// ```toml
/// # Bound used by snap_list when called with zero or a negative bound
/// default_list_len = 512
///
/// # Reply buffer for snapshot names, terminator included
/// name_buf_len = 4096
///
/// # "none" (default) or "msgpack"
/// codec = "none"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bound used by `snap_list` for a non-positive caller bound
    #[serde(default = "default_list_len")]
    pub default_list_len: usize,
    /// Reply buffer for snapshot names, terminator included
    #[serde(default = "default_name_buf_len")]
    pub name_buf_len: usize,
    /// Request marshalling
    #[serde(default)]
    pub codec: CodecKind,
}

fn default_list_len() -> usize {
    DEFAULT_LIST_LEN
}

fn default_name_buf_len() -> usize {
    DEFAULT_NAME_BUF_LEN
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_list_len: default_list_len(),
            name_buf_len: default_name_buf_len(),
            codec: CodecKind::None,
        }
    }
}

impl ClientConfig {
    /// Set the default list bound
    pub fn with_default_list_len(mut self, len: usize) -> Self {
        self.default_list_len = len;
        self
    }

    /// Set the snapshot name reply buffer
    pub fn with_name_buf_len(mut self, len: usize) -> Self {
        self.name_buf_len = len;
        self
    }

    /// Set the request codec
    pub fn with_codec(mut self, codec: CodecKind) -> Self {
        self.codec = codec;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_list_len == 0 || self.default_list_len > u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "default_list_len must be between 1 and {}, got {}",
                u32::MAX,
                self.default_list_len
            )));
        }
        // One byte of name plus the terminator
        if self.name_buf_len < 2 || self.name_buf_len > u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "name_buf_len must be between 2 and {}, got {}",
                u32::MAX,
                self.name_buf_len
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# poolsnap client configuration
#
# Bound used by snap_list when called with zero or a negative bound.
# A pool with more snapshots than the bound answers RangeExceeded.
default_list_len = 512

# Reply buffer for snapshot names, terminator included.
# Longer names answer RangeExceeded from snap_get_name.
name_buf_len = 4096

# Request marshalling: "none" (default) or "msgpack"
codec = "none"
"#
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("Config file {path:?}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("Invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}
