//! Viewport configuration

use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

/// Class toggled on the root element while scrolling is frozen
pub const DEFAULT_SCROLL_DISABLED_CLASS: &str = "zos-scroll-disabled";

/// Configuration shared by the bindings and the runtime that owns them
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Class added to the root element by `disable_scroll`
    pub scroll_disabled_class: String,
    /// Panic on out-of-order connect/disconnect instead of logging
    pub strict_lifecycle: bool,
    /// Padding reserved for viewer chrome when the runtime starts
    pub initial_padding_top: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            scroll_disabled_class: DEFAULT_SCROLL_DISABLED_CLASS.to_string(),
            strict_lifecycle: cfg!(debug_assertions),
            initial_padding_top: 0,
        }
    }
}

impl ViewportConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ViewportError> {
        serde_json::from_str(json).map_err(|e| ViewportError::Config(e.to_string()))
    }

    /// Config that logs lifecycle misuse instead of panicking
    pub fn lenient() -> Self {
        Self {
            strict_lifecycle: false,
            ..Self::default()
        }
    }
}
