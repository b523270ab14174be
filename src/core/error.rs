use std::fmt;

use crate::core::registry::ScreenId;

/// Errors surfaced by navigation operations.
///
/// These are programmer errors: they indicate a broken navigation graph and
/// are returned immediately rather than swallowed. None of them are safe to
/// retry blindly (a retried push would double-push). The only built-in
/// idempotence is the double-open guard in the open resolver, which is a
/// policy, not error recovery.
#[derive(Debug)]
pub enum NavError {
    /// `close` called on a screen that was never opened (or already closed),
    /// or `open` called with conflicting options (e.g. both `close_all` and
    /// `in_tab`).
    InvalidState(String),
    /// A pop or dismiss was requested but the screen has no associated
    /// navigation/modal container.
    MissingContainer(ScreenId),
    /// `to_screen` references a screen that is not in the closing screen's
    /// ancestor chain.
    UnresolvedTarget { from: ScreenId, to: ScreenId },
    /// A `ScreenId` that is not (or no longer) in the registry was handed to
    /// a mutating operation.
    UnknownScreen(ScreenId),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::InvalidState(msg) => write!(f, "invalid navigation state: {msg}"),
            NavError::MissingContainer(id) => {
                write!(f, "{id} has no navigation container to pop/dismiss from")
            }
            NavError::UnresolvedTarget { from, to } => {
                write!(f, "{to} is not an ancestor of closing {from}")
            }
            NavError::UnknownScreen(id) => write!(f, "{id} is not in the registry"),
        }
    }
}

impl std::error::Error for NavError {}
