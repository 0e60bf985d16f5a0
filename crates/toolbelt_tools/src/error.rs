//! Error types for tool declaration and registration.

use crate::tool::ToolKey;
use thiserror::Error;

/// Errors that can occur while declaring or registering tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool declaration is incomplete or inconsistent.
    ///
    /// Raised before any introspection or registry mutation happens.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A parameter's type annotation could not be resolved.
    #[error("Type resolution error in `{function}` for parameter '{parameter}': {reason}")]
    TypeResolutionError {
        /// Name of the declared function.
        function: String,
        /// Name of the offending parameter.
        parameter: String,
        /// Why the annotation could not be resolved.
        reason: String,
    },

    /// A tool with the same key is already registered and the registry
    /// rejects duplicates.
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(ToolKey),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ToolError {
    /// Creates a [`ConfigurationError`](Self::ConfigurationError).
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Creates a [`TypeResolutionError`](Self::TypeResolutionError).
    pub fn type_resolution_error(
        function: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::TypeResolutionError {
            function: function.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error was caused by an invalid declaration
    /// rather than by the registry state.
    #[must_use]
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationError(_) | Self::TypeResolutionError { .. }
        )
    }
}
