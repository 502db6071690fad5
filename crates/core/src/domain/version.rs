// Runtime Version - major version of the host JVM

use crate::domain::error::{DomainError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// First double-quoted version token: optional legacy `1.` prefix, the major
/// digits, then anything up to the closing quote.
static VERSION_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(1\.)?(\d+)[^"]*""#).unwrap());

/// Major version of the host runtime (`1.8.0_292` -> 8, `11.0.2` -> 11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeVersion(u32);

impl RuntimeVersion {
    /// Last runtime that predates the module system; needs no compatibility flags
    pub const LEGACY: RuntimeVersion = RuntimeVersion(8);

    /// Oldest runtime the workload can run on
    pub const MIN_SUPPORTED: RuntimeVersion = RuntimeVersion(8);

    pub fn new(major: u32) -> Self {
        Self(major)
    }

    pub fn major(&self) -> u32 {
        self.0
    }

    /// Extract the major version from the merged output of `java -version`
    ///
    /// Only the first quoted token is considered; the runtime may print
    /// unrelated lines (e.g. `Picked up _JAVA_OPTIONS`) before it.
    ///
    /// # Errors
    /// - DomainError::UnparseableVersion if no token matches, or the major
    ///   digits do not fit in a `u32`
    pub fn parse_probe_output(output: &str) -> Result<Self> {
        let unparseable = || DomainError::UnparseableVersion {
            output: output.to_string(),
        };

        let caps = VERSION_TOKEN_RE.captures(output).ok_or_else(unparseable)?;
        let major = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(unparseable)?;

        Ok(Self(major))
    }

    pub fn is_supported(&self) -> bool {
        *self >= Self::MIN_SUPPORTED
    }

    /// True when the runtime has a module system whose boundaries must be opened
    pub fn requires_module_flags(&self) -> bool {
        *self > Self::LEGACY
    }
}

impl std::fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
