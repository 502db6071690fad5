// Launcher constants (no magic values in the composer)

/// Version embedded in the runner artifact's path and file name
pub const KEX_VERSION: &str = "0.0.8";

/// Default maximum heap size passed as `-Xmx`
pub const DEFAULT_MAX_HEAP_SIZE: &str = "8g";

/// Runtime binary looked up on `PATH` when no explicit one is configured
pub const DEFAULT_RUNTIME_BINARY: &str = "java";

/// Environment variable exposing the installation directory to the workload
pub const HOME_ENV_VAR: &str = "KEX_HOME";

/// Runtime subcommand that reports its version
pub const VERSION_QUERY_FLAG: &str = "-version";

/// Security policy file, relative to the installation directory
pub const POLICY_FILE: &str = "kex.policy";

/// Module-access declarations, relative to the installation directory
pub const MODULE_DECLARATIONS_FILE: &str = "runtime-deps/modules.info";

/// Directory holding the runner artifact, relative to the installation directory
pub const ARTIFACT_DIR: &str = "kex-runner/target";

pub const SECURITY_MANAGER_FLAG: &str = "-Djava.security.manager";

/// `==` replaces the runtime's default policy instead of extending it
pub const SECURITY_POLICY_FLAG_PREFIX: &str = "-Djava.security.policy==";

/// Silences logback's own status output in the workload
pub const STATUS_LISTENER_FLAG: &str =
    "-Dlogback.statusListenerClass=ch.qos.logback.core.status.NopStatusListener";

pub const ARTIFACT_SELECTOR_FLAG: &str = "-jar";
