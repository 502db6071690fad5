// Java version probe implementation
// reason: tokio for async process management, std pipe to merge stdout and stderr
use async_trait::async_trait;
use std::io::Read;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use kex_launcher_core::application::constants::VERSION_QUERY_FLAG;
use kex_launcher_core::domain::RuntimeVersion;
use kex_launcher_core::port::VersionProbe;
use kex_launcher_core::{LaunchError, LauncherConfig, Result};

/// Probes the runtime by running `<runtime> -version`
///
/// The runtime prints its version banner on stderr (older builds) or stdout,
/// so both streams share one pipe and are parsed as a single buffer in the
/// order they were written.
pub struct JavaVersionProbe {
    runtime_binary: PathBuf,
}

impl JavaVersionProbe {
    /// Create a probe for the given runtime executable
    ///
    /// # Example
    /// ```ignore
    /// let probe = JavaVersionProbe::new("/usr/lib/jvm/java-17/bin/java");
    /// let version = probe.probe_version().await?;
    /// ```
    pub fn new(runtime_binary: impl Into<PathBuf>) -> Self {
        Self {
            runtime_binary: runtime_binary.into(),
        }
    }

    pub fn from_config(config: &LauncherConfig) -> Self {
        Self::new(&config.runtime_binary)
    }

    /// Run the version query and read the merged output to EOF
    async fn capture_merged_output(&self) -> Result<String> {
        let probe_failed = |source| LaunchError::ProbeFailed {
            binary: self.runtime_binary.clone(),
            source,
        };

        let (mut reader, writer) = std::io::pipe().map_err(probe_failed)?;
        let stderr_writer = writer.try_clone().map_err(probe_failed)?;

        let mut command = Command::new(&self.runtime_binary);
        command
            .arg(VERSION_QUERY_FLAG)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer);

        let spawned = command.spawn();
        // The command still owns both write ends; EOF only arrives once they are closed
        drop(command);
        let mut child = spawned.map_err(probe_failed)?;

        let output = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        })
        .await
        .map_err(|e| LaunchError::Io(std::io::Error::other(e)))?
        .map_err(probe_failed)?;

        let status = child.wait().await.map_err(probe_failed)?;

        debug!(
            binary = %self.runtime_binary.display(),
            status = %status,
            bytes = output.len(),
            "Version probe completed"
        );

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

#[async_trait]
impl VersionProbe for JavaVersionProbe {
    async fn probe_version(&self) -> Result<RuntimeVersion> {
        let output = self.capture_merged_output().await?;
        Ok(RuntimeVersion::parse_probe_output(&output)?)
    }
}
