//! Common error infrastructure for hunt-core.
//!
//! Domain-specific errors (`CombatError`, `DamageError`) are defined next to
//! the engines that produce them. This module provides the shared
//! classification so callers can tell caller misuse apart from data
//! misconfiguration without matching on every variant.

/// Severity level of an error, used for categorization and reporting.
///
/// - **Validation**: the caller asked for something the current state forbids
/// - **Configuration**: the sheet data is incomplete or inconsistent
/// - **Internal**: an invariant of the engine itself was broken
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid request, should not retry without changes.
    ///
    /// Examples: advancing a turn before the encounter started
    Validation,

    /// Misconfigured data, fix the sheet before retrying.
    ///
    /// Examples: damage type missing from a part's resistance table
    Configuration,

    /// Unexpected state inconsistency.
    ///
    /// These indicate bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all hunt-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who has to act on it, not by impact
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Stable across releases; used by hosts to pick a localized message.
    fn error_code(&self) -> &'static str;
}
