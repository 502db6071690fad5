// Module declaration file (runtime-deps/modules.info)

use std::path::{Path, PathBuf};
use tracing::debug;

use kex_launcher_core::port::ModuleSource;
use kex_launcher_core::{LaunchError, LauncherConfig, Result};

/// Reads one module-access declaration per line, verbatim and in file order
pub struct FileModuleSource {
    path: PathBuf,
}

impl FileModuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &LauncherConfig) -> Self {
        Self::new(config.module_declarations_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModuleSource for FileModuleSource {
    fn load(&self) -> Result<Vec<String>> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| LaunchError::ModuleDeclarations {
                path: self.path.clone(),
                source,
            })?;

        // `lines` drops the terminators (`\n` or `\r\n`) and nothing else
        let declarations: Vec<String> = content.lines().map(str::to_string).collect();

        debug!(
            path = %self.path.display(),
            count = declarations.len(),
            "Module declarations loaded"
        );

        Ok(declarations)
    }
}
