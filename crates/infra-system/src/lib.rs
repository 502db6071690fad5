// Kex Launcher Infrastructure - System Adapters
// Implements: VersionProbe, WorkloadRunner, ModuleSource

pub mod install_dir;
pub mod java_version_probe;
pub mod module_file;
pub mod subprocess_runner;

pub use install_dir::{expand_tilde, resolve_install_dir};
pub use java_version_probe::JavaVersionProbe;
pub use module_file::FileModuleSource;
pub use subprocess_runner::SubprocessRunner;
