//! Error types for pgbuild

use thiserror::Error;

/// Result type alias for pgbuild operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while staging arguments.
///
/// Compiling a template never fails; malformed references degrade to literal
/// text. Only caller mistakes made while registering named arguments are
/// reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// The name is already registered on this registry
    #[error("Named argument conflict: '{name}' is already registered")]
    NamedArgConflict { name: String },

    /// The name cannot be referenced as `${name}`
    #[error("Invalid argument name '{name}': names must not contain '}}'")]
    InvalidArgName { name: String },

    /// Only bound values can be appended when `${name}` is never referenced
    #[error("Named argument '{name}' must be a bound value; stage SQL fragments with add_alias")]
    DeferredNotValue { name: String },
}

impl SqlError {
    /// Create a named argument conflict error
    pub fn named_arg_conflict(name: impl Into<String>) -> Self {
        Self::NamedArgConflict { name: name.into() }
    }

    /// Create an invalid argument name error
    pub fn invalid_arg_name(name: impl Into<String>) -> Self {
        Self::InvalidArgName { name: name.into() }
    }

    /// Create a deferred-not-value error
    pub fn deferred_not_value(name: impl Into<String>) -> Self {
        Self::DeferredNotValue { name: name.into() }
    }

    /// Check if this is a named argument conflict
    pub fn is_named_arg_conflict(&self) -> bool {
        matches!(self, Self::NamedArgConflict { .. })
    }

    /// Check if this is an invalid argument name error
    pub fn is_invalid_arg_name(&self) -> bool {
        matches!(self, Self::InvalidArgName { .. })
    }

    /// Check if this is a deferred-not-value error
    pub fn is_deferred_not_value(&self) -> bool {
        matches!(self, Self::DeferredNotValue { .. })
    }
}
