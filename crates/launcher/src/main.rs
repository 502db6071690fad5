//! Kex Launcher - Main Entry Point
//!
//! Probes the JVM, composes the kex-runner invocation and runs it, exiting
//! with the workload's own exit code. Every argument is forwarded verbatim.

mod logging;
mod settings;

use std::ffi::OsString;
use std::sync::Arc;
use tracing::{debug, info};

use kex_launcher_core::domain::ExitCode;
use kex_launcher_core::{LaunchError, Launcher};
use kex_launcher_infra_system::{FileModuleSource, JavaVersionProbe, SubprocessRunner};

use crate::settings::Settings;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for failures before the workload was started
const LAUNCH_FAILURE_EXIT_CODE: i32 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let settings = Settings::from_env();
    logging::init_logging(settings.log_format);

    let user_args: Vec<OsString> = std::env::args_os().skip(1).collect();

    let code = match launch(settings, user_args).await {
        Ok(exit_code) => exit_code.code(),
        Err(e) => report_failure(&e),
    };

    std::process::exit(code);
}

async fn launch(settings: Settings, user_args: Vec<OsString>) -> anyhow::Result<ExitCode> {
    let config = settings.into_config()?;

    info!(
        version = VERSION,
        install_dir = %config.install_dir.display(),
        runtime = %config.runtime_binary.display(),
        "kex launcher starting"
    );

    // DI wiring
    let version_probe = Arc::new(JavaVersionProbe::from_config(&config));
    let module_source = Arc::new(FileModuleSource::from_config(&config));
    let workload_runner = Arc::new(SubprocessRunner::new());

    let launcher = Launcher::new(config, version_probe, module_source, workload_runner);

    Ok(launcher.run(user_args).await?)
}

/// Print the diagnostic for a fatal launch error and pick the exit code
fn report_failure(err: &anyhow::Error) -> i32 {
    debug!(error = ?err, "Launch failed");

    match err.downcast_ref::<LaunchError>() {
        // Unsupported runtime gets the bare diagnostic
        Some(launch_err) if launch_err.unsupported_version().is_some() => {
            eprintln!("{launch_err}");
        }
        _ => eprintln!("kex: {err:#}"),
    }

    LAUNCH_FAILURE_EXIT_CODE
}
