// Launcher - probe, compose, delegate

use crate::application::config::LauncherConfig;
use crate::application::constants::ARTIFACT_SELECTOR_FLAG;
use crate::domain::{compose_flags, CompatibilityFlagSet, ExitCode, LaunchSpec, RuntimeVersion};
use crate::error::Result;
use crate::port::{ModuleSource, VersionProbe, WorkloadRunner};
use std::ffi::OsString;
use std::sync::Arc;
use tracing::{debug, info};

/// Composes the workload invocation for the probed runtime and runs it
///
/// One launch performs exactly two spawns, strictly in sequence: the version
/// probe, then (only if every check passed) the workload.
pub struct Launcher {
    config: LauncherConfig,
    version_probe: Arc<dyn VersionProbe>,
    module_source: Arc<dyn ModuleSource>,
    workload_runner: Arc<dyn WorkloadRunner>,
}

impl Launcher {
    pub fn new(
        config: LauncherConfig,
        version_probe: Arc<dyn VersionProbe>,
        module_source: Arc<dyn ModuleSource>,
        workload_runner: Arc<dyn WorkloadRunner>,
    ) -> Self {
        Self {
            config,
            version_probe,
            module_source,
            workload_runner,
        }
    }

    /// Build the full invocation without spawning the workload
    ///
    /// Argument order: fixed flags, compatibility flags, `-jar <artifact>`,
    /// then `user_args` exactly as given.
    ///
    /// # Errors
    /// - LaunchError::Config if the configuration is invalid
    /// - Any error of the version probe (nothing else is attempted)
    /// - DomainError::UnsupportedRuntime for runtimes older than 8
    /// - LaunchError::ModuleDeclarations if the declarations cannot be read
    pub async fn compose<I, S>(&self, user_args: I) -> Result<LaunchSpec>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.config.validate()?;

        let fixed_flags = self.config.fixed_flags();

        let version = self.version_probe.probe_version().await?;
        info!(version = %version, "Runtime version detected");

        let compatibility_flags = self.compatibility_flags(version)?;
        debug!(
            count = compatibility_flags.len(),
            "Compatibility flags composed"
        );

        let spec = LaunchSpec::new(&self.config.runtime_binary)
            .args(fixed_flags)
            .args(compatibility_flags.into_vec())
            .arg(ARTIFACT_SELECTOR_FLAG)
            .arg(self.config.artifact_file())
            .args(user_args)
            .env(
                self.config.home_env_var.clone(),
                self.config.install_dir.clone(),
            );

        Ok(spec)
    }

    /// Compose the invocation, run it to completion, and return its exit code
    pub async fn run<I, S>(&self, user_args: I) -> Result<ExitCode>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let spec = self.compose(user_args).await?;

        info!(
            program = %spec.program.display(),
            args = spec.args.len(),
            "Launching workload"
        );
        debug!(command = %spec.command_line(), "Workload command line");

        let exit_code = self.workload_runner.run(&spec).await?;

        info!(exit_code = %exit_code, "Workload finished");
        Ok(exit_code)
    }

    /// Declarations are only read for runtimes that need them, so a legacy
    /// runtime launches without `modules.info`
    fn compatibility_flags(&self, version: RuntimeVersion) -> Result<CompatibilityFlagSet> {
        let declarations = if version.requires_module_flags() {
            self.module_source.load()?
        } else {
            Vec::new()
        };

        Ok(compose_flags(version, &declarations)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::LaunchError;
    use crate::port::module_source::mocks::InMemoryModuleSource;
    use crate::port::version_probe::mocks::StaticVersionProbe;
    use crate::port::workload_runner::mocks::RecordingRunner;
    use std::path::PathBuf;

    const DECLARATIONS: [&str; 2] = ["java.base/java.lang", "java.base/java.util"];

    struct Harness {
        probe: Arc<StaticVersionProbe>,
        modules: Arc<InMemoryModuleSource>,
        runner: Arc<RecordingRunner>,
        launcher: Launcher,
    }

    fn harness(probe: StaticVersionProbe, modules: InMemoryModuleSource, exit_code: i32) -> Harness {
        let probe = Arc::new(probe);
        let modules = Arc::new(modules);
        let runner = Arc::new(RecordingRunner::new(exit_code));
        let launcher = Launcher::new(
            LauncherConfig::new("/opt/kex"),
            probe.clone(),
            modules.clone(),
            runner.clone(),
        );
        Harness {
            probe,
            modules,
            runner,
            launcher,
        }
    }

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[tokio::test]
    async fn test_run_modular_runtime() {
        let h = harness(
            StaticVersionProbe::reporting("11.0.1"),
            InMemoryModuleSource::new(DECLARATIONS),
            0,
        );

        let exit_code = h.launcher.run(["--foo", "bar"]).await.unwrap();

        assert_eq!(exit_code, ExitCode::SUCCESS);
        assert_eq!(h.probe.call_count(), 1);
        assert_eq!(h.runner.call_count(), 1);

        let spec = &h.runner.launched()[0];
        assert_eq!(spec.program, PathBuf::from("java"));
        assert_eq!(
            strings(&spec.args),
            vec![
                "-Xmx8g",
                "-Djava.security.manager",
                "-Djava.security.policy==/opt/kex/kex.policy",
                "-Dlogback.statusListenerClass=ch.qos.logback.core.status.NopStatusListener",
                "--add-opens",
                "java.base/java.lang",
                "--add-opens",
                "java.base/java.util",
                "--illegal-access=warn",
                "-jar",
                "/opt/kex/kex-runner/target/kex-runner-0.0.8-jar-with-dependencies.jar",
                "--foo",
                "bar",
            ]
        );
        assert_eq!(
            spec.env.get("KEX_HOME"),
            Some(&OsString::from("/opt/kex"))
        );
    }

    #[tokio::test]
    async fn test_run_returns_workload_exit_code() {
        let h = harness(
            StaticVersionProbe::reporting("17"),
            InMemoryModuleSource::new(DECLARATIONS),
            42,
        );

        let exit_code = h.launcher.run(Vec::<String>::new()).await.unwrap();
        assert_eq!(exit_code.code(), 42);
    }

    #[tokio::test]
    async fn test_legacy_runtime_skips_declarations() {
        let h = harness(
            StaticVersionProbe::reporting("1.8.0_292"),
            InMemoryModuleSource::missing(),
            0,
        );

        let spec = h.launcher.compose(["--help"]).await.unwrap();

        assert_eq!(h.modules.load_count(), 0);
        assert_eq!(
            strings(&spec.args[4..6]),
            vec![
                "-jar",
                "/opt/kex/kex-runner/target/kex-runner-0.0.8-jar-with-dependencies.jar"
            ]
        );
        assert_eq!(spec.trailing_args(1), [OsString::from("--help")]);
    }

    #[tokio::test]
    async fn test_unsupported_runtime_spawns_nothing() {
        let h = harness(
            StaticVersionProbe::reporting("1.7.0_80"),
            InMemoryModuleSource::new(DECLARATIONS),
            0,
        );

        let err = h.launcher.run(["--foo"]).await.unwrap_err();

        assert_eq!(
            err.unsupported_version(),
            Some(RuntimeVersion::new(7))
        );
        assert_eq!(h.modules.load_count(), 0);
        assert_eq!(h.runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unparseable_version_spawns_nothing() {
        let h = harness(
            StaticVersionProbe::new("Error: could not find java.dll"),
            InMemoryModuleSource::new(DECLARATIONS),
            0,
        );

        let err = h.launcher.run(["--foo"]).await.unwrap_err();

        assert!(matches!(
            err,
            LaunchError::Domain(DomainError::UnparseableVersion { .. })
        ));
        assert_eq!(h.runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_declarations_spawns_nothing() {
        let h = harness(
            StaticVersionProbe::reporting("11.0.2"),
            InMemoryModuleSource::missing(),
            0,
        );

        let err = h.launcher.run(["--foo"]).await.unwrap_err();

        assert!(matches!(err, LaunchError::ModuleDeclarations { .. }));
        assert_eq!(h.runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_config_never_probes() {
        let probe = Arc::new(StaticVersionProbe::reporting("11"));
        let runner = Arc::new(RecordingRunner::new_success());
        let launcher = Launcher::new(
            LauncherConfig::new("relative/kex"),
            probe.clone(),
            Arc::new(InMemoryModuleSource::new(DECLARATIONS)),
            runner.clone(),
        );

        let err = launcher.run(["--foo"]).await.unwrap_err();

        assert!(matches!(err, LaunchError::Config(_)));
        assert_eq!(probe.call_count(), 0);
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_compose_is_deterministic() {
        let h = harness(
            StaticVersionProbe::reporting("11.0.1"),
            InMemoryModuleSource::new(DECLARATIONS),
            0,
        );

        let first = h.launcher.compose(["--foo", "bar"]).await.unwrap();
        let second = h.launcher.compose(["--foo", "bar"]).await.unwrap();

        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_user_args_are_not_interpreted() {
        let h = harness(
            StaticVersionProbe::reporting("11"),
            InMemoryModuleSource::new(Vec::<String>::new()),
            0,
        );

        let user_args = ["--", "-jar", "", "--illegal-access=deny", "a b"];
        let spec = h.launcher.compose(user_args).await.unwrap();

        assert_eq!(strings(spec.trailing_args(5)), user_args);
    }
}
