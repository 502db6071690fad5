// Application Layer - Launch use case and its configuration

pub mod config;
pub mod constants;
pub mod launcher;

// Re-exports
pub use config::LauncherConfig;
pub use launcher::Launcher;
