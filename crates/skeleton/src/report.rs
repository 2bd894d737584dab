//! Outcome of public operations: a value plus an optional non-fatal diagnostic.

use core::fmt;
use core::error::Error;
use log::warn;

/// Why an operation did less than asked. None of these abort the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `apply` on a root that is already transformed.
    AlreadyActive,
    /// `remove` on a root that is not transformed.
    NotActive,
    /// The root is hidden or below the visibility floor, so nothing was recorded.
    RootNotRendered,
    /// The root is not a live element of the document.
    NodeNotFound,
    /// The root carried the active flag without a cached state; the flag was cleared.
    MissingCacheEntry,
    /// A tree mutation failed part way; the tree may be partially transformed.
    Interrupted(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyActive => formatter.write_str("skeleton is already active on this root"),
            Self::NotActive => formatter.write_str("skeleton is not active on this root"),
            Self::RootNotRendered => {
                formatter.write_str("root is not rendered or too small to transform")
            }
            Self::NodeNotFound => formatter.write_str("root is not a live element"),
            Self::MissingCacheEntry => {
                formatter.write_str("active root had no cached state to restore")
            }
            Self::Interrupted(reason) => write!(formatter, "transformation interrupted: {reason}"),
        }
    }
}

impl Error for Diagnostic {}

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Report<T> {
    pub value: T,
    pub diagnostic: Option<Diagnostic>,
}

impl<T> Report<T> {
    pub const fn ok(value: T) -> Self {
        Self {
            value,
            diagnostic: None,
        }
    }

    /// A report carrying `diagnostic`, which is also logged as a warning.
    pub fn warn(value: T, diagnostic: Diagnostic) -> Self {
        warn!("{diagnostic}");
        Self {
            value,
            diagnostic: Some(diagnostic),
        }
    }

    pub const fn is_clean(&self) -> bool {
        self.diagnostic.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
