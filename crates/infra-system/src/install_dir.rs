// Installation directory resolution

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

use kex_launcher_core::{LaunchError, Result};

/// Resolve the absolute installation directory
///
/// An explicit `home_override` (normally `$KEX_HOME`) wins and is
/// tilde-expanded; otherwise the directory holding the launcher executable,
/// with symlinks resolved, is used. Either way the result is absolute, so the
/// launcher works from any working directory.
///
/// # Errors
/// - LaunchError::Config if the executable location cannot be determined
pub fn resolve_install_dir(home_override: Option<&OsStr>) -> Result<PathBuf> {
    if let Some(home) = home_override.filter(|home| !is_blank(home)) {
        let install_dir = std::path::absolute(expand_tilde(home))?;
        debug!(install_dir = %install_dir.display(), "Installation directory from override");
        return Ok(install_dir);
    }

    let exe = std::env::current_exe()?.canonicalize()?;
    let install_dir = install_dir_of(&exe)?;
    debug!(install_dir = %install_dir.display(), "Installation directory from executable");
    Ok(install_dir)
}

/// Expand a leading `~` to the home directory
///
/// Non-UTF-8 paths cannot carry a tilde shellexpand understands and are kept
/// as they are.
pub fn expand_tilde(path: &OsStr) -> PathBuf {
    match path.to_str() {
        Some(path) => PathBuf::from(shellexpand::tilde(path).into_owned()),
        None => PathBuf::from(path),
    }
}

fn is_blank(value: &OsStr) -> bool {
    value.to_str().is_some_and(|value| value.trim().is_empty())
}

/// Directory containing `exe`
fn install_dir_of(exe: &Path) -> Result<PathBuf> {
    exe.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            LaunchError::Config(format!(
                "cannot determine installation directory from {}",
                exe.display()
            ))
        })
}
