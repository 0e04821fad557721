//! Error types for the viewport layer
//!
//! Geometry queries never fail. Errors only surface where the caller can act
//! on them: lifecycle misuse, dropped measurements, config and viewer
//! message decoding.

use crate::binding::LifecycleState;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewportError {
    /// A binding was connected or disconnected out of order
    #[error("invalid binding transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
    /// The scheduler dropped a measurement without running it
    #[error("measurement was dropped before the scheduler ran it")]
    MeasureCanceled,
    /// Config could not be decoded
    #[error("invalid viewport config: {0}")]
    Config(String),
    /// A viewer chrome message could not be decoded
    #[error("malformed viewer message: {0}")]
    ViewerMessage(String),
}
