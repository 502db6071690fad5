//! Environment-driven settings
//!
//! | variable | effect |
//! |----------|--------|
//! | `KEX_HOME` | installation directory (default: directory of the executable) |
//! | `JAVA_HOME` | runtime becomes `$JAVA_HOME/bin/java` (default: `java` on `PATH`) |
//! | `KEX_HEAP_SIZE` | `-Xmx` value (default: `8g`) |
//! | `KEX_LOG_FORMAT` | `compact`, `pretty` or `json` |

use anyhow::{anyhow, Context, Result};
use std::ffi::OsString;
use std::path::PathBuf;

use kex_launcher_core::application::constants::HOME_ENV_VAR;
use kex_launcher_core::LauncherConfig;
use kex_launcher_infra_system::{expand_tilde, resolve_install_dir};

use crate::logging::LogFormat;

const JAVA_HOME_ENV_VAR: &str = "JAVA_HOME";
const HEAP_SIZE_ENV_VAR: &str = "KEX_HEAP_SIZE";
const LOG_FORMAT_ENV_VAR: &str = "KEX_LOG_FORMAT";

/// Raw launcher settings; path variables stay OS strings so any path works
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub kex_home: Option<OsString>,
    pub java_home: Option<OsString>,
    pub heap_size: Option<OsString>,
    pub log_format: LogFormat,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build settings from any variable lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let get = |key: &str| {
            lookup(key).filter(|value| !value.to_str().is_some_and(|v| v.trim().is_empty()))
        };

        Self {
            kex_home: get(HOME_ENV_VAR),
            java_home: get(JAVA_HOME_ENV_VAR),
            heap_size: get(HEAP_SIZE_ENV_VAR),
            log_format: get(LOG_FORMAT_ENV_VAR)
                .map(|value| LogFormat::parse(&value.to_string_lossy()))
                .unwrap_or_default(),
        }
    }

    /// Runtime executable inside `JAVA_HOME`, if one is configured
    pub fn runtime_binary(&self) -> Option<PathBuf> {
        self.java_home.as_deref().map(|home| {
            expand_tilde(home)
                .join("bin")
                .join(format!("java{}", std::env::consts::EXE_SUFFIX))
        })
    }

    /// Resolve the installation directory and build the launcher configuration
    pub fn into_config(self) -> Result<LauncherConfig> {
        let install_dir = resolve_install_dir(self.kex_home.as_deref())
            .context("Failed to resolve installation directory")?;

        let mut config = LauncherConfig::new(install_dir);
        if let Some(runtime_binary) = self.runtime_binary() {
            config = config.with_runtime_binary(runtime_binary);
        }
        if let Some(heap_size) = self.heap_size {
            let heap_size = heap_size
                .into_string()
                .map_err(|raw| anyhow!("{HEAP_SIZE_ENV_VAR} is not valid UTF-8: {raw:?}"))?;
            config = config.with_max_heap_size(heap_size.trim());
        }

        config.validate()?;
        Ok(config)
    }
}
