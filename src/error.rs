//! Error types for the modelbase library.
//!
//! This module defines the error type used throughout the crate, covering
//! rejected parameter names and failed parameter assignments.

use thiserror::Error;

/// The main error type for modelbase operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Error when a parameter name is private, unknown, or otherwise not a
    /// settable parameter of the target model.
    #[error("Invalid parameter name: {name}{hint}")]
    InvalidParamName {
        /// The rejected parameter name.
        name: String,
        /// Optional "did you mean" suffix, empty when no close match exists.
        hint: String,
    },

    /// Error when a supplied value cannot be converted to the declared type
    /// of the target parameter.
    #[error("Parameter {name} expects {expected}, got {actual}")]
    ParamTypeMismatch {
        /// The parameter whose assignment failed.
        name: String,
        /// The type label the parameter expects.
        expected: &'static str,
        /// The type label of the value that was supplied.
        actual: &'static str,
    },
}

impl ModelError {
    /// Returns the parameter name this error refers to.
    pub fn param_name(&self) -> &str {
        match self {
            ModelError::InvalidParamName { name, .. } => name,
            ModelError::ParamTypeMismatch { name, .. } => name,
        }
    }
}

/// A specialized Result type for modelbase operations.
pub type Result<T> = std::result::Result<T, ModelError>;
