//! Common error infrastructure for map-core.
//!
//! Every error raised by the layout engine implements [`MapError`], which
//! classifies it by severity and exposes a stable error code for logs and
//! front ends.
//!
//! Malformed graphs are not errors: cycles, dangling exits and unreachable
//! rooms are tolerated by the traversal and simply produce fewer positions.
//! Errors are reserved for requests that cannot be answered at all.

use crate::graph::RoomId;

/// Severity level of an error, used by callers to pick a recovery strategy.
///
/// - **Recoverable**: the request can be retried with different input
///   (e.g. another start room)
/// - **Validation**: the input itself is invalid and must be fixed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry with different input.
    ///
    /// Examples: start room missing from the graph
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: damping outside `(0, 1)`, unknown direction name
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all map-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait MapError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while computing a layout.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The requested start room does not exist in the graph.
    #[error("start room '{0}' is not in the room graph")]
    UnknownStart(RoomId),

    /// A layout parameter is outside its valid range.
    #[error("invalid layout config: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl LayoutError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl MapError for LayoutError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownStart(_) => ErrorSeverity::Recoverable,
            Self::InvalidConfig { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStart(_) => "LAYOUT_UNKNOWN_START",
            Self::InvalidConfig { .. } => "LAYOUT_INVALID_CONFIG",
        }
    }
}

/// Errors raised when parsing names typed by users or authored in data files.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown direction '{0}'")]
    UnknownDirection(String),

    #[error("unknown layout strategy '{0}' (expected depth, force or axis)")]
    UnknownStrategy(String),

    #[error("unknown reveal mode '{0}' (expected all or visited)")]
    UnknownReveal(String),
}

impl MapError for ParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDirection(_) => "PARSE_UNKNOWN_DIRECTION",
            Self::UnknownStrategy(_) => "PARSE_UNKNOWN_STRATEGY",
            Self::UnknownReveal(_) => "PARSE_UNKNOWN_REVEAL",
        }
    }
}
