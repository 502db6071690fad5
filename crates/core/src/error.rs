// Central Error Type for the Launcher

use crate::domain::{DomainError, RuntimeVersion};
use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
///
/// Every variant is fatal: no workload is spawned once one is raised.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to run version probe {binary}: {source}")]
    ProbeFailed {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read module declarations from {path}: {source}")]
    ModuleDeclarations {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn workload {program}: {source}")]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LaunchError {
    /// The runtime version when the failure is an unsupported runtime
    pub fn unsupported_version(&self) -> Option<RuntimeVersion> {
        match self {
            LaunchError::Domain(DomainError::UnsupportedRuntime { version }) => Some(*version),
            _ => None,
        }
    }
}

/// Result type alias using LaunchError
pub type Result<T> = std::result::Result<T, LaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_display_unchanged() {
        let err: LaunchError = DomainError::UnsupportedRuntime {
            version: RuntimeVersion::new(7),
        }
        .into();
        assert_eq!(err.to_string(), "Unsupported version of JVM: 7");
        assert_eq!(err.unsupported_version(), Some(RuntimeVersion::new(7)));
    }

    #[test]
    fn test_other_errors_are_not_unsupported() {
        let err = LaunchError::Config("install directory must be absolute".to_string());
        assert_eq!(err.unsupported_version(), None);
    }
}
