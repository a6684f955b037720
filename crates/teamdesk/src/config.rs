//! Shell configuration.
//!
//! Configuration is read from TOML. Every field has a default, so an empty
//! file (or no file) is a valid configuration:
//!
//! ```
//! use teamdesk::config::{DuplicatePolicy, ShellConfig};
//!
//! let config = ShellConfig::from_toml_str(r#"
//! [gesture]
//! edge_threshold = 8.0
//! min_width = 480.0
//!
//! [dialogs]
//! duplicate_policy = "reject"
//! "#).unwrap();
//!
//! assert_eq!(config.gesture.edge_threshold, 8.0);
//! assert_eq!(config.gesture.min_height, 240.0);
//! assert_eq!(config.dialogs.duplicate_policy, DuplicatePolicy::Reject);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::window::GestureConfig;

/// What opening an already-open dialog kind does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Raise the open window and return it.
    #[default]
    Raise,
    /// Fail with `DialogError::AlreadyOpen`.
    Reject,
}

/// Dialog coordinator settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl DialogConfig {
    /// Set the duplicate policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

/// Top-level configuration for [`Shell`](crate::Shell).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Gesture settings applied to every dialog window.
    pub gesture: GestureConfig,
    /// Dialog coordinator settings.
    pub dialogs: DialogConfig,
}

impl ShellConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the gesture settings.
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Set the dialog settings.
    pub fn with_dialogs(mut self, dialogs: DialogConfig) -> Self {
        self.dialogs = dialogs;
        self
    }
}
