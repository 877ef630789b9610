//! Error types used by the delayvisor crate.
//!
//! There is a single enum, [`VisibilityError`]. Every variant is raised while a
//! controller is being configured or constructed; once a controller exists, its
//! operations are total and never fail.
//!
//! Like the rest of the crate's observable types, the error provides helper methods
//! (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors produced while configuring a visibility controller.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VisibilityError {
    /// A configuration value is outside of its accepted range.
    ///
    /// Raised for negative delays (other than the `-1` enter sentinel) and for a zero
    /// idle timeout.
    #[error("invalid configuration: {field}={value}")]
    InvalidConfiguration {
        /// Name of the offending option.
        field: &'static str,
        /// The rejected value, in milliseconds.
        value: i64,
    },

    /// A tokio-backed component was requested outside of a tokio runtime.
    #[error("no tokio runtime available for {component}")]
    RuntimeUnavailable {
        /// The component that needed the runtime.
        component: &'static str,
    },
}

impl VisibilityError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use delayvisor::VisibilityError;
    ///
    /// let err = VisibilityError::InvalidConfiguration { field: "exit_delay", value: -5 };
    /// assert_eq!(err.as_label(), "invalid_configuration");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            VisibilityError::InvalidConfiguration { .. } => "invalid_configuration",
            VisibilityError::RuntimeUnavailable { .. } => "runtime_unavailable",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            VisibilityError::InvalidConfiguration { field, value } => {
                format!("option {field} rejected value {value}ms")
            }
            VisibilityError::RuntimeUnavailable { component } => {
                format!("{component} requires a running tokio runtime")
            }
        }
    }

    /// Shorthand for building an [`VisibilityError::InvalidConfiguration`].
    #[inline]
    pub(crate) fn invalid(field: &'static str, value: i64) -> Self {
        VisibilityError::InvalidConfiguration { field, value }
    }
}
