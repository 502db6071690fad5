// Launcher configuration
// Built once at startup and shared by reference; nothing here changes afterwards

use crate::application::constants::*;
use crate::error::{LaunchError, Result};
use std::ffi::OsString;
use std::path::PathBuf;

/// Immutable launcher configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Absolute installation directory (policy, declarations and artifact live under it)
    pub install_dir: PathBuf,
    /// Runtime executable used for both the probe and the workload
    pub runtime_binary: PathBuf,
    /// Value of `-Xmx`
    pub max_heap_size: String,
    /// Version embedded in the artifact file name
    pub artifact_version: String,
    /// Variable carrying `install_dir` into the workload's environment
    pub home_env_var: String,
}

impl LauncherConfig {
    /// Configuration with all defaults for the given installation directory
    ///
    /// # Example
    /// ```text
    /// let config = LauncherConfig::new("/opt/kex").with_max_heap_size("4g");
    /// assert_eq!(config.max_heap_size, "4g");
    /// ```
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            runtime_binary: PathBuf::from(DEFAULT_RUNTIME_BINARY),
            max_heap_size: DEFAULT_MAX_HEAP_SIZE.to_string(),
            artifact_version: KEX_VERSION.to_string(),
            home_env_var: HOME_ENV_VAR.to_string(),
        }
    }

    pub fn with_runtime_binary(mut self, runtime_binary: impl Into<PathBuf>) -> Self {
        self.runtime_binary = runtime_binary.into();
        self
    }

    pub fn with_max_heap_size(mut self, max_heap_size: impl Into<String>) -> Self {
        self.max_heap_size = max_heap_size.into();
        self
    }

    pub fn with_artifact_version(mut self, artifact_version: impl Into<String>) -> Self {
        self.artifact_version = artifact_version.into();
        self
    }

    pub fn policy_file(&self) -> PathBuf {
        self.install_dir.join(POLICY_FILE)
    }

    pub fn module_declarations_file(&self) -> PathBuf {
        self.install_dir.join(MODULE_DECLARATIONS_FILE)
    }

    /// `<install>/kex-runner/target/kex-runner-<version>-jar-with-dependencies.jar`
    pub fn artifact_file(&self) -> PathBuf {
        self.install_dir.join(ARTIFACT_DIR).join(format!(
            "kex-runner-{}-jar-with-dependencies.jar",
            self.artifact_version
        ))
    }

    /// Flags that precede the compatibility flags, in launch order
    pub fn fixed_flags(&self) -> Vec<OsString> {
        let mut policy = OsString::from(SECURITY_POLICY_FLAG_PREFIX);
        policy.push(self.policy_file());

        vec![
            OsString::from(format!("-Xmx{}", self.max_heap_size)),
            OsString::from(SECURITY_MANAGER_FLAG),
            policy,
            OsString::from(STATUS_LISTENER_FLAG),
        ]
    }

    /// Check the invariants the composer relies on
    ///
    /// # Errors
    /// - LaunchError::Config if the installation directory is relative, or a
    ///   required value is empty
    pub fn validate(&self) -> Result<()> {
        if !self.install_dir.is_absolute() {
            return Err(LaunchError::Config(format!(
                "installation directory must be absolute, got {}",
                self.install_dir.display()
            )));
        }
        if self.runtime_binary.as_os_str().is_empty() {
            return Err(LaunchError::Config("runtime binary cannot be empty".to_string()));
        }
        if self.max_heap_size.trim().is_empty() {
            return Err(LaunchError::Config("max heap size cannot be empty".to_string()));
        }
        if self.home_env_var.is_empty() || self.home_env_var.contains('=') {
            return Err(LaunchError::Config(format!(
                "invalid environment variable name: {:?}",
                self.home_env_var
            )));
        }
        Ok(())
    }
}
