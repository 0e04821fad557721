//! Binding lifecycle state machine
//!
//! `Uninitialized -> Connected -> Disconnected`. Bindings are never
//! reconnected.

use std::cell::Cell;

use crate::error::ViewportError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Connected,
    Disconnected,
}

/// Tracks where a binding is in its lifecycle
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: Cell<LifecycleState>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state.get()
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.state.get() == LifecycleState::Connected
    }

    /// Move to `Connected`. Only legal from `Uninitialized`.
    pub fn connect(&self) -> Result<(), ViewportError> {
        self.transition(LifecycleState::Uninitialized, LifecycleState::Connected)
    }

    /// Move to `Disconnected`. Only legal from `Connected`.
    pub fn disconnect(&self) -> Result<(), ViewportError> {
        self.transition(LifecycleState::Connected, LifecycleState::Disconnected)
    }

    fn transition(&self, expected: LifecycleState, to: LifecycleState) -> Result<(), ViewportError> {
        let from = self.state.get();
        if from != expected {
            return Err(ViewportError::InvalidTransition { from, to });
        }
        self.state.set(to);
        Ok(())
    }
}
