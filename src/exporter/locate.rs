//! Locating the credential-manager executable
//!
//! The inherited `PATH` is extended with the usual install directories
//! before asking the system lookup program (`which`, or `where` on Windows).
//! When the lookup program itself is missing the search path is scanned
//! directly.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::runner::{Invocation, ProcessRunner};
use crate::error::{Error, Result};

/// Install directories appended to the inherited search path
pub const DEFAULT_SEARCH_DIRS: &[&str] = &["/usr/local/bin", "/opt/homebrew/bin"];

/// User-facing message when the tool cannot be found
pub const TOOL_NOT_FOUND_MESSAGE: &str =
    "1Password CLI not found. Please ensure it is installed and in your PATH.";

/// Name of the system executable lookup program
pub fn lookup_program() -> &'static str {
    if cfg!(windows) { "where" } else { "which" }
}

/// Build the search path: `inherited`, then `extra`, then [`DEFAULT_SEARCH_DIRS`].
///
/// Directories already on the path are not repeated.
pub fn augmented_search_path(inherited: Option<&OsStr>, extra: &[PathBuf]) -> Result<OsString> {
    let mut dirs: Vec<PathBuf> = inherited
        .map(|path| std::env::split_paths(path).collect())
        .unwrap_or_default();

    let appended = extra
        .iter()
        .cloned()
        .chain(DEFAULT_SEARCH_DIRS.iter().map(|dir| PathBuf::from(*dir)));
    for dir in appended {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }

    std::env::join_paths(dirs).map_err(|e| Error::Config(format!("invalid search path entry: {}", e)))
}

/// Scan `search_path` for an executable named `tool_name`
pub fn find_in_path(tool_name: &str, search_path: &OsStr) -> Option<PathBuf> {
    let suffixed = format!("{}{}", tool_name, std::env::consts::EXE_SUFFIX);
    std::env::split_paths(search_path)
        .flat_map(|dir| [dir.join(tool_name), dir.join(&suffixed)])
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolve the absolute path of `tool_name` using the lookup program.
///
/// An empty or failed lookup yields [`Error::ToolNotFound`].
pub async fn locate_tool<R: ProcessRunner>(
    runner: &R,
    tool_name: &str,
    search_path: &OsStr,
) -> Result<PathBuf> {
    let invocation = Invocation {
        program: PathBuf::from(lookup_program()),
        args: vec![tool_name.to_string()],
        search_path: search_path.to_os_string(),
    };

    match runner.run(&invocation).await {
        Ok(output) => {
            let found = output
                .stdout
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .filter(|_| output.success);
            match found {
                Some(path) => {
                    debug!(tool = tool_name, path, "located credential-manager tool");
                    Ok(PathBuf::from(path))
                }
                None => Err(Error::ToolNotFound(TOOL_NOT_FOUND_MESSAGE.to_string())),
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(lookup = lookup_program(), "lookup program unavailable, scanning search path");
            find_in_path(tool_name, search_path)
                .ok_or_else(|| Error::ToolNotFound(TOOL_NOT_FOUND_MESSAGE.to_string()))
        }
        Err(e) => Err(Error::ExternalProcess(format!(
            "failed to run {}: {}",
            lookup_program(),
            e
        ))),
    }
}
