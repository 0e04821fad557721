//! Viewer chrome messages
//!
//! The host reports chrome changes (header bar height, lightbox mode) as
//! JSON messages. They are decoded here and applied by
//! [`crate::runtime::ViewportRuntime`].

use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

/// A chrome state change reported by the viewer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ViewerEvent {
    /// Header bar height changed
    Viewport {
        #[serde(rename = "paddingTop")]
        padding_top: i32,
        /// Temporary change, e.g. during a header animation
        #[serde(default)]
        transient: bool,
    },
    /// Lightbox entered or left
    Lightbox { enabled: bool },
}

impl ViewerEvent {
    pub fn from_json(json: &str) -> Result<Self, ViewportError> {
        serde_json::from_str(json).map_err(|e| ViewportError::ViewerMessage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_event_viewport() {
        let event = ViewerEvent::from_json(r#"{"type":"viewport","paddingTop":48,"transient":true}"#)
            .unwrap();
        assert_eq!(
            event,
            ViewerEvent::Viewport {
                padding_top: 48,
                transient: true
            }
        );
    }

    #[test]
    fn test_viewer_event_transient_defaults_false() {
        let event = ViewerEvent::from_json(r#"{"type":"viewport","paddingTop":0}"#).unwrap();
        assert_eq!(
            event,
            ViewerEvent::Viewport {
                padding_top: 0,
                transient: false
            }
        );
    }

    #[test]
    fn test_viewer_event_lightbox() {
        let event = ViewerEvent::from_json(r#"{"type":"lightbox","enabled":true}"#).unwrap();
        assert_eq!(event, ViewerEvent::Lightbox { enabled: true });
    }

    #[test]
    fn test_viewer_event_unknown_type() {
        let err = ViewerEvent::from_json(r#"{"type":"zoom"}"#).unwrap_err();
        assert!(matches!(err, ViewportError::ViewerMessage(_)));
    }
}
