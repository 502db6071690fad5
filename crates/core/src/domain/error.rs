// Domain Error Types

use crate::domain::version::RuntimeVersion;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The probe output carried no quoted version token
    #[error("Could not detect JVM version from: {output:?}")]
    UnparseableVersion { output: String },

    /// The runtime is older than the minimum the workload can run on
    #[error("Unsupported version of JVM: {version}")]
    UnsupportedRuntime { version: RuntimeVersion },
}

pub type Result<T> = std::result::Result<T, DomainError>;
