use std::path::PathBuf;
use thiserror::Error;

/// Exit status for a run in which every job/provider pair succeeded
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status for a run with at least one recoverable job/provider failure
pub const EXIT_MIRROR_FAILURE: i32 = 1;

/// Exit status for an invalid configuration, detected before any job is enqueued
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {field} - {message}")]
    ValidationError {
        field: String,
        message: String,
        value: Option<String>,
    },

    #[error(
        "Insecure permissions {mode:o} on {}: configuration must not be readable by group or others",
        .path.display()
    )]
    PermissionError { path: PathBuf, mode: u32 },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MirrorError {
    pub fn config_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn validation_error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    pub fn permission_error(path: impl Into<PathBuf>, mode: u32) -> Self {
        Self::PermissionError {
            path: path.into(),
            mode,
        }
    }

    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error means the configuration handed to the run is unusable.
    ///
    /// Every variant raised before the worker pool starts is a configuration
    /// problem; only `InternalError` is not.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::InternalError { .. })
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            EXIT_CONFIG_ERROR
        } else {
            EXIT_MIRROR_FAILURE
        }
    }
}

impl From<std::io::Error> for MirrorError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for MirrorError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML parsing failed", error)
    }
}
