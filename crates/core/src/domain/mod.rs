// Domain Layer - Pure launch logic and value types

pub mod error;
pub mod flags;
pub mod launch_spec;
pub mod version;

// Re-exports
pub use error::DomainError;
pub use flags::{compose_flags, CompatibilityFlagSet};
pub use launch_spec::{ExitCode, LaunchSpec};
pub use version::RuntimeVersion;
