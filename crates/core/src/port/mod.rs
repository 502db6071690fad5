// Port Layer - Interfaces for external collaborators

pub mod module_source;
pub mod version_probe;
pub mod workload_runner;

// Re-exports
pub use module_source::ModuleSource;
pub use version_probe::VersionProbe;
pub use workload_runner::WorkloadRunner;
