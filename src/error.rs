//! Error types for scenario-report.
//!
//! This module defines the error hierarchy using `thiserror`. Every variant
//! records the source location that raised it so failures deep inside a
//! render pass can be traced back without a debugger.
//!
//! # Error Categories
//!
//! - **IO errors**: reading reports, writing the document and image assets
//! - **Input errors**: malformed Cucumber JSON or run-result files
//! - **Config errors**: invalid configuration files
//! - **Template errors**: template registration and rendering failures
//! - **Embedding errors**: undecodable embedded payloads
//!
//! # Example
//!
//! ```rust
//! use scenario_report::error::{ReportError, Result};
//!
//! fn read_report(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).map_err(|e| ReportError::Io {
//!         path: path.into(),
//!         source: e,
//!         src_path: file!(),
//!         src_line: line!(),
//!     })
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Macro to create errors with automatic source location tracking.
///
/// Usage:
/// ```ignore
/// return Err(err!(ConfigMissing { key: "title".to_string() }));
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $crate::error::ReportError::$variant {
            $($field: $value,)*
            src_path: file!(),
            src_line: line!(),
        }
    };
}

/// A specialized Result type for scenario-report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// The main error type for scenario-report.
#[derive(Error, Debug)]
pub enum ReportError {
    // =========================================================================
    // I/O and File System Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}' ({src_path}:{src_line}): {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// File not found.
    #[error("File not found: {path} ({src_path}:{src_line})")]
    FileNotFound {
        /// The missing file path
        path: PathBuf,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// A Cucumber JSON report or run-result file could not be parsed.
    #[error("Failed to parse input '{input}' ({src_path}:{src_line}): {message}")]
    InputParse {
        /// The file (or `<string>`) being parsed
        input: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsing error.
    #[error("Failed to parse configuration ({src_path}:{src_line}): {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}' ({src_path}:{src_line}): {message}")]
    ConfigValue {
        /// The configuration key
        key: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Template Errors
    // =========================================================================
    /// A template failed to compile during registration.
    #[error("Failed to register template '{template}' ({src_path}:{src_line}): {message}")]
    TemplateRegister {
        /// Registration name of the template
        template: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Template rendering error.
    #[error("Template rendering error in '{template}' ({src_path}:{src_line}): {message}")]
    TemplateRender {
        /// Registration name of the template
        template: String,
        /// Error message
        message: String,
        /// The engine error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Embedding Errors
    // =========================================================================
    /// An embedded payload was not valid base64.
    #[error("Failed to decode '{mime_type}' embedding '{embedding_id}' ({src_path}:{src_line}): {source}")]
    EmbeddingDecode {
        /// Identifier of the embedding
        embedding_id: String,
        /// Declared MIME type
        mime_type: String,
        /// The base64 error
        #[source]
        source: base64::DecodeError,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Internal error (should not happen in normal operation).
    #[error("Internal error ({src_path}:{src_line}): {message}")]
    Internal {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },
}

impl ReportError {
    /// Creates an `Io` error.
    #[must_use]
    pub fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
        src_path: &'static str,
        src_line: u32,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
            src_path,
            src_line,
        }
    }

    /// Creates a `ConfigParse` error.
    #[must_use]
    pub fn config_parse(
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        src_path: &'static str,
        src_line: u32,
    ) -> Self {
        Self::ConfigParse {
            message,
            source,
            src_path,
            src_line,
        }
    }

    /// Returns the appropriate exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => 13,
            Self::FileNotFound { .. } => 14,
            Self::InputParse { .. } => 15,
            Self::ConfigParse { .. } => 18,
            Self::ConfigValue { .. } => 19,
            Self::TemplateRegister { .. } | Self::TemplateRender { .. } => 20,
            Self::EmbeddingDecode { .. } => 21,
            _ => 1,
        }
    }
}

/// Extension trait for `Result` to add context to errors.
pub trait ResultExt<T> {
    /// Adds a file path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        let path = path.into();
        self.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReportError::FileNotFound {
                    path,
                    src_path: file!(),
                    src_line: line!(),
                }
            } else {
                ReportError::io(path, e, file!(), line!())
            }
        })
    }
}

impl From<std::io::Error> for ReportError {
    fn from(source: std::io::Error) -> Self {
        // Prefer `ResultExt::with_path` where a path is known
        Self::Io {
            path: PathBuf::new(),
            source,
            src_path: file!(),
            src_line: line!(),
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(source: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization/deserialization error: {source}"),
            src_path: file!(),
            src_line: line!(),
        }
    }
}
