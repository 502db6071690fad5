// Compatibility flags - version-gated module access grants

use crate::domain::error::{DomainError, Result};
use crate::domain::version::RuntimeVersion;
use serde::{Deserialize, Serialize};

/// Flag that opens one module boundary for reflective access
pub const ADD_OPENS_FLAG: &str = "--add-opens";

/// Trailing flag appended whenever module flags are emitted
pub const ILLEGAL_ACCESS_FLAG: &str = "--illegal-access=warn";

/// Ordered startup flags required by the probed runtime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatibilityFlagSet(Vec<String>);

impl CompatibilityFlagSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Build the compatibility flags for `version`
///
/// | version | result |
/// |---------|--------|
/// | `< 8`   | `UnsupportedRuntime` |
/// | `== 8`  | empty, declarations ignored |
/// | `> 8`   | `--add-opens <decl>` per declaration, then `--illegal-access=warn` |
///
/// Declaration order is kept as-is: later grants may override earlier ones.
///
/// # Errors
/// - DomainError::UnsupportedRuntime if the runtime predates the minimum
pub fn compose_flags<S: AsRef<str>>(
    version: RuntimeVersion,
    module_declarations: &[S],
) -> Result<CompatibilityFlagSet> {
    if !version.is_supported() {
        return Err(DomainError::UnsupportedRuntime { version });
    }

    if !version.requires_module_flags() {
        return Ok(CompatibilityFlagSet::default());
    }

    let mut flags = Vec::with_capacity(module_declarations.len() * 2 + 1);
    for declaration in module_declarations {
        flags.push(ADD_OPENS_FLAG.to_string());
        flags.push(declaration.as_ref().to_string());
    }
    flags.push(ILLEGAL_ACCESS_FLAG.to_string());

    Ok(CompatibilityFlagSet(flags))
}
