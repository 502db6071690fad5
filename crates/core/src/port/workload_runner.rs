// Workload Runner Port
// Abstraction for spawning the assembled invocation and waiting on it

use crate::domain::{ExitCode, LaunchSpec};
use crate::error::Result;
use async_trait::async_trait;

/// Workload Runner trait
///
/// Implementations:
/// - SubprocessRunner: spawns the runtime as a child process
#[async_trait]
pub trait WorkloadRunner: Send + Sync {
    /// Spawn the invocation, block until it exits, and return its exit code
    ///
    /// # Errors
    /// - LaunchError::SpawnFailed if the process cannot be started
    async fn run(&self, spec: &LaunchSpec) -> Result<ExitCode>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner that records every spec it is handed
    pub struct RecordingRunner {
        exit_code: ExitCode,
        launched: Arc<Mutex<Vec<LaunchSpec>>>,
    }

    impl RecordingRunner {
        pub fn new(exit_code: impl Into<ExitCode>) -> Self {
            Self {
                exit_code: exit_code.into(),
                launched: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_success() -> Self {
            Self::new(ExitCode::SUCCESS)
        }

        pub fn call_count(&self) -> usize {
            self.launched.lock().unwrap().len()
        }

        pub fn launched(&self) -> Vec<LaunchSpec> {
            self.launched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WorkloadRunner for RecordingRunner {
        async fn run(&self, spec: &LaunchSpec) -> Result<ExitCode> {
            self.launched.lock().unwrap().push(spec.clone());
            Ok(self.exit_code)
        }
    }
}
