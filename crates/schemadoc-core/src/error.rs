//! Error types for the Schemadoc core library
//!
//! Errors are `thiserror` enums; configuration failures may carry an
//! `anyhow::Error` with the underlying cause.
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use schemadoc_schemas::{LoaderError, ValidationError};
use thiserror::Error;

/// Main error type for Schemadoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// A node's declared type disagrees with its structure, or a keyword
    /// has the wrong shape
    #[error("Malformed schema at '{path}': {message}")]
    MalformedSchema {
        path: String,
        message: String,
        #[source]
        source: ValidationError,
    },

    /// The document is neither a route schema nor a route catalog
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    /// Transform options are unusable
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Reading or writing a schema document failed
    #[error("Load error: {0}")]
    Loader(#[from] LoaderError),
}

impl Error {
    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// The validation error behind a malformed-schema failure
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::MalformedSchema { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Self::MalformedSchema {
            path: error.path.clone(),
            message: error.message.clone(),
            source: error,
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;
