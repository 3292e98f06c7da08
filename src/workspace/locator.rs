use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{InitError, Result};
use crate::tools::runner::{CommandRunner, ProcessCommand};

/// Candidate destinations and whether the working directory is one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub candidates: Vec<PathBuf>,
    pub current: PathBuf,
    pub is_current_valid: bool,
}

/// Resolve the workspace root: configured value, else `go env GOPATH`, else `~/go`.
pub fn discover_workspace_root(
    config: &Config,
    runner: &mut impl CommandRunner,
    home: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(root) = &config.workspace_root {
        debug!("using configured workspace root {}", root.display());
        return Ok(root.clone());
    }

    let command = ProcessCommand::new("go", ["env", "GOPATH"]);
    let output = runner.execute(&command, None).map_err(|e| {
        InitError::environment(format!("running `{}`: {e}", command.render()))
    })?;
    if !output.success {
        return Err(InitError::environment(format!(
            "`{}` {}: {}",
            command.render(),
            output.describe_status(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    let gopath = raw.trim();
    if let Some(first) = std::env::split_paths(gopath).find(|p| !p.as_os_str().is_empty()) {
        debug!("GOPATH resolved to {}", first.display());
        return Ok(first);
    }

    match home {
        Some(home) => Ok(home.join("go")),
        None => Err(InitError::environment(
            "GOPATH is empty and the home directory is unknown",
        )),
    }
}

/// Directories matching `<root>/src/*/[0-9a-zA-Z]*`, in sorted order.
pub fn candidate_directories(root: &Path) -> Result<Vec<PathBuf>> {
    let root_str = root.to_str().ok_or_else(|| {
        InitError::environment(format!(
            "workspace root {} is not valid UTF-8",
            root.display()
        ))
    })?;
    let pattern = format!("{}/src/*/[0-9a-zA-Z]*", glob::Pattern::escape(root_str));

    let entries = glob::glob(&pattern)
        .map_err(|e| InitError::environment(format!("invalid glob pattern `{pattern}`: {e}")))?;

    let mut candidates = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_dir() => candidates.push(path),
            Ok(_) => {}
            Err(e) => warn!("skipping unreadable workspace entry: {e}"),
        }
    }
    Ok(candidates)
}

/// Exact membership; parents and children of a candidate do not count.
pub fn is_current_valid(current: &Path, candidates: &[PathBuf]) -> bool {
    candidates.iter().any(|candidate| candidate == current)
}

/// Locate candidates under `root` and check `cwd` against them after
/// resolving symlinks on both sides.
pub fn locate_in(root: &Path, cwd: &Path) -> Result<Location> {
    let root = root.canonicalize().map_err(|e| {
        InitError::environment(format!(
            "workspace root {} cannot be resolved: {e}",
            root.display()
        ))
    })?;
    let candidates = candidate_directories(&root)?;

    let current = cwd.canonicalize().map_err(|e| {
        InitError::environment(format!(
            "current directory {} cannot be resolved: {e}",
            cwd.display()
        ))
    })?;
    let is_current_valid = is_current_valid(&current, &candidates);
    debug!(
        "{} candidate destinations under {}; current directory valid: {}",
        candidates.len(),
        root.display(),
        is_current_valid
    );

    Ok(Location {
        candidates,
        current,
        is_current_valid,
    })
}

pub fn locate(root: &Path) -> Result<Location> {
    let cwd = std::env::current_dir()
        .map_err(|e| InitError::environment(format!("reading current directory: {e}")))?;
    locate_in(root, &cwd)
}
