//! Error and warning types for the bootstrapper
//!
//! Fatal conditions are `BootstrapError` and abort the run. Everything the
//! run can recover from is a `Warning`, surfaced to the user where it is
//! detected.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bootstrap operations
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Errors that can occur during a bootstrap run
#[derive(Error, Debug)]
pub enum BootstrapError {
    // Cache errors
    #[error("Cache file {path} is unreadable: {reason}")]
    CacheUnreadable { path: PathBuf, reason: String },

    #[error("Failed to write cache file {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Build directory errors
    #[error("Failed to create the build directory {path}")]
    BuildDirCreate {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    // Process errors
    #[error("Failed to run command: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command}, {}", describe_exit(.code))]
    CommandStatus { command: String, code: Option<i32> },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code: {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl BootstrapError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command launch failure
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CommandFailed { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Some("Install CMake or point HEPH_CMAKE at the cmake executable")
            }
            Self::BuildDirCreate { .. } => Some("Check the --build-dir path and its permissions"),
            _ => None,
        }
    }
}

/// Non-fatal conditions reported to the user while the run continues
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("Invalid argument: {0}")]
    UnknownArgument(String),

    #[error("Invalid usage: {0} requires a value. Use --help for more information.")]
    MissingValue(&'static str),

    #[error("Cannot specify more than one build type, using debug")]
    ConflictingBuildTypes,

    #[error("Cannot specify more than one compiler, using default")]
    ConflictingCompilers,

    #[error("Invalid cache key: {0}")]
    InvalidCacheKey(String),

    #[error("Invalid cache value for {key}: {value}")]
    InvalidCacheValue { key: &'static str, value: String },

    #[error("Ignoring the cache file: {0}")]
    CacheIgnored(String),

    #[error("Failed to create the cache file: {0}")]
    CacheWriteFailed(String),

    #[error("{key} value {value:?} cannot be cached, the next run will ignore the cache file")]
    UncacheableValue { key: &'static str, value: String },

    #[error("Failed to remove the cache file {0}")]
    CacheRemoveFailed(PathBuf),

    #[error("Failed to remove the build directory {0}")]
    BuildDirRemoveFailed(PathBuf),
}
