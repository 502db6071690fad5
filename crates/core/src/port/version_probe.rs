// Version Probe Port
// reason: async-trait, the probe spawns the runtime itself
use async_trait::async_trait;

use crate::domain::RuntimeVersion;
use crate::error::Result;

/// Determines the major version of the host runtime
#[async_trait]
pub trait VersionProbe: Send + Sync {
    /// Query the runtime and extract its major version
    ///
    /// # Errors
    /// - LaunchError::ProbeFailed if the runtime cannot be started
    /// - DomainError::UnparseableVersion if its output has no version token
    async fn probe_version(&self) -> Result<RuntimeVersion>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock probe that parses a canned `java -version` transcript
    pub struct StaticVersionProbe {
        output: String,
        call_count: AtomicUsize,
    }

    impl StaticVersionProbe {
        pub fn new(output: impl Into<String>) -> Self {
            Self {
                output: output.into(),
                call_count: AtomicUsize::new(0),
            }
        }

        /// Probe reporting `openjdk version "<version>"`
        pub fn reporting(version: &str) -> Self {
            Self::new(format!("openjdk version \"{version}\" 2021-09-14\n"))
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl VersionProbe for StaticVersionProbe {
        async fn probe_version(&self) -> Result<RuntimeVersion> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(RuntimeVersion::parse_probe_output(&self.output)?)
        }
    }
}
