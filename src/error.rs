//! Error handling for the LiveChart-RS engine
//!
//! This module defines the chart error type and a Result alias for use
//! throughout the crate.

use thiserror::Error;

/// Main error type for LiveChart-RS operations
#[derive(Error, Debug)]
pub enum ChartError {
    /// A query that needs at least one point was made on an empty buffer
    #[error("Series buffer is empty")]
    EmptyBuffer,

    /// Indexed access past the end of the buffer
    #[error("Index {index} out of range for buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to chart image capture
    #[error("Capture error: {0}")]
    Capture(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ChartError>,
    },
}

impl ChartError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ChartError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns true if this error (or the error it wraps) is an IO failure
    pub fn is_io(&self) -> bool {
        match self {
            ChartError::Io(_) => true,
            ChartError::WithContext { source, .. } => source.is_io(),
            _ => false,
        }
    }
}

/// Result type alias for LiveChart-RS operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ChartError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ChartError::Io(e).with_context(f()))
    }
}
