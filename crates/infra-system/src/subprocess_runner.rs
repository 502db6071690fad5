// Subprocess runner implementation
// reason: tokio for async process management and interrupt handling
use async_trait::async_trait;
use std::process::ExitStatus;
use std::time::Instant;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use kex_launcher_core::domain::{ExitCode, LaunchSpec};
use kex_launcher_core::port::WorkloadRunner;
use kex_launcher_core::{LaunchError, Result};

/// Exit code reported when the platform gives neither a code nor a signal
const UNKNOWN_EXIT_CODE: i32 = 1;

/// Shells report death-by-signal N as 128 + N
const SIGNAL_EXIT_CODE_BASE: i32 = 128;

/// Spawns the workload as a child process sharing the launcher's terminal
///
/// stdin, stdout and stderr are inherited; the LaunchSpec environment overlay is
/// applied on top of the launcher's own environment, which stays untouched.
/// The child is killed if the launcher stops waiting for it (wait error or a
/// dropped future), so no workload outlives a failed launch.
pub struct SubprocessRunner;

impl SubprocessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Wait for the child, riding out Ctrl-C
    ///
    /// The terminal delivers SIGINT to the whole foreground process group, so
    /// the workload sees it directly; the launcher keeps waiting so that the
    /// workload's own exit status is the one reported.
    async fn wait_absorbing_interrupts(child: &mut Child) -> std::io::Result<ExitStatus> {
        let mut listening = true;
        loop {
            tokio::select! {
                status = child.wait() => return status,
                signal = tokio::signal::ctrl_c(), if listening => match signal {
                    Ok(()) => debug!("Interrupt received, waiting for workload to exit"),
                    Err(e) => {
                        warn!(error = %e, "Cannot listen for interrupts");
                        listening = false;
                    }
                },
            }
        }
    }
}

impl Default for SubprocessRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a child's exit status into the launcher's exit code
fn exit_code_of(status: ExitStatus) -> ExitCode {
    if let Some(code) = status.code() {
        return ExitCode::new(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            let signal_name = nix::sys::signal::Signal::try_from(signal)
                .map(|s| s.as_str())
                .unwrap_or("unknown");
            warn!(signal, signal_name, "Workload terminated by signal");
            return ExitCode::new(SIGNAL_EXIT_CODE_BASE + signal);
        }
    }

    ExitCode::new(UNKNOWN_EXIT_CODE)
}

#[async_trait]
impl WorkloadRunner for SubprocessRunner {
    async fn run(&self, spec: &LaunchSpec) -> Result<ExitCode> {
        let start_time = Instant::now();

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .envs(&spec.env)
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LaunchError::SpawnFailed {
                program: spec.program.clone(),
                source,
            })?;

        info!(
            program = %spec.program.display(),
            pid = ?child.id(),
            "Workload started"
        );

        let status = Self::wait_absorbing_interrupts(&mut child).await?;
        let exit_code = exit_code_of(status);

        info!(
            duration_ms = start_time.elapsed().as_millis() as u64,
            exit_code = %exit_code,
            "Workload exited"
        );

        Ok(exit_code)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn shell(script: &str) -> LaunchSpec {
        LaunchSpec::new("/bin/sh").args(["-c", script])
    }

    #[tokio::test]
    async fn test_exit_code_is_propagated() {
        let runner = SubprocessRunner::new();

        assert_eq!(runner.run(&shell("exit 0")).await.unwrap(), ExitCode::SUCCESS);
        assert_eq!(runner.run(&shell("exit 3")).await.unwrap().code(), 3);
    }

    #[tokio::test]
    async fn test_env_overlay_reaches_child_only() {
        let runner = SubprocessRunner::new();
        let spec = shell(r#"[ "$KEX_LAUNCHER_TEST_HOME" = "/opt/kex" ] && [ -n "$PATH" ]"#)
            .env("KEX_LAUNCHER_TEST_HOME", "/opt/kex");

        let exit_code = runner.run(&spec).await.unwrap();

        assert!(exit_code.is_success());
        assert!(std::env::var_os("KEX_LAUNCHER_TEST_HOME").is_none());
    }

    #[tokio::test]
    async fn test_args_are_passed_verbatim() {
        let runner = SubprocessRunner::new();
        let spec = LaunchSpec::new("/bin/sh").args([
            "-c",
            r#"[ "$#" = 3 ] && [ "$1" = "--foo" ] && [ "$2" = "a b" ] && [ "$3" = "" ]"#,
            "sh",
            "--foo",
            "a b",
            "",
        ]);

        assert!(runner.run(&spec).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_signal_death_maps_to_shell_convention() {
        let runner = SubprocessRunner::new();

        let exit_code = runner.run(&shell("kill -9 $$")).await.unwrap();

        assert_eq!(exit_code.code(), 128 + 9);
    }

    #[tokio::test]
    async fn test_interrupt_is_absorbed_until_workload_exits() {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let runner = SubprocessRunner::new();

        let interrupter = std::thread::spawn(|| {
            std::thread::sleep(Duration::from_millis(300));
            kill(Pid::this(), Signal::SIGINT).unwrap();
        });

        let exit_code = runner.run(&shell("sleep 1; exit 5")).await.unwrap();
        interrupter.join().unwrap();

        assert_eq!(exit_code, ExitCode::new(5));
    }

    #[tokio::test]
    async fn test_abandoned_workload_is_killed() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("finished");
        let script = format!("sleep 1; touch '{}'", marker.display());
        let runner = SubprocessRunner::new();

        let spec = shell(&script);
        let outcome = tokio::time::timeout(Duration::from_millis(200), runner.run(&spec)).await;
        assert!(outcome.is_err());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let runner = SubprocessRunner::new();
        let spec = LaunchSpec::new("/nonexistent/kex/java").arg("-version");

        let err = runner.run(&spec).await.unwrap_err();

        assert!(matches!(err, LaunchError::SpawnFailed { .. }));
    }
}
