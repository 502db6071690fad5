// Kex Launcher Core - Domain Logic & Ports
// NO infrastructure dependencies: processes and files are reached only through ports

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{LauncherConfig, Launcher};
pub use error::{LaunchError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
