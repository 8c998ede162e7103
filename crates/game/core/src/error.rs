//! Common error infrastructure for avalon-core.
//!
//! Domain-specific errors (e.g. `ProposeError`, `ConfigurationError`) live next
//! to the operations they validate. This module provides the classification
//! shared by all of them so transport layers can map any failure to a
//! user-facing response without matching on every concrete type.
//!
//! Every error here is a caller precondition violation detected before any
//! mutation; none of them is transient, so the core never retries.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was fine in principle but arrived at the wrong moment
    /// (wrong phase, wrong player's turn). Re-render the current state.
    ///
    /// Examples: voting while a team is being proposed
    Recoverable,

    /// Invalid input, should not be retried without changes.
    ///
    /// Examples: unknown player, team of the wrong size
    Validation,

    /// Unexpected state inconsistency. Indicates a bug in the engine.
    Internal,

    /// Unrecoverable: the game cannot be created or continued.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Caller-facing error taxonomy.
///
/// Each concrete error variant maps onto exactly one category.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ErrorCategory {
    /// Bad construction input; the game was never created.
    Configuration,
    /// Operation invalid for the current mode.
    Phase,
    /// Another player's turn.
    Turn,
    /// Team of the wrong size.
    Size,
    /// Player, team member, or target outside the expected group.
    Membership,
    /// Good-aligned player attempting sabotage.
    Alignment,
    /// Player lacks the role the operation requires.
    Role,
    /// Query for a player that is not in the game.
    UnknownPlayer,
    /// Engine invariant violated.
    Internal,
}

/// Common trait for all avalon-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the taxonomy bucket of this error.
    fn category(&self) -> ErrorCategory;

    /// Returns a static string identifier for this error variant.
    ///
    /// Stable across releases; useful for metrics and for tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_internal_and_fatal_count_as_internal() {
        let internal: Vec<_> = [
            ErrorSeverity::Recoverable,
            ErrorSeverity::Validation,
            ErrorSeverity::Internal,
            ErrorSeverity::Fatal,
        ]
        .into_iter()
        .filter(ErrorSeverity::is_internal)
        .map(|severity| severity.as_str())
        .collect();
        assert_eq!(internal, ["internal", "fatal"]);
    }
}
