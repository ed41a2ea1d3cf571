use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Platform base directory: `%APPDATA%` on Windows, `$HOME` elsewhere.
fn platform_base_dir() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("environment variable {} is not set", var))
}

/// Expand a leading `~` against the platform base directory.
fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return platform_base_dir();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_base_dir()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Resolve the application home directory into an absolute path.
///
/// - `explicit`: user-provided path (may start with `~`); `None` selects the
///   platform default `<base>/<default_subdir>`.
/// - relative explicit paths are resolved against the current directory.
/// - with `create`, the directory is created if missing.
pub fn resolve_home_dir(
    explicit: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let mut path = match explicit {
        Some(raw) => expand_tilde(raw.trim())?,
        None => platform_base_dir()?.join(default_subdir),
    };

    if path.is_relative() {
        path = env::current_dir()
            .context("cannot read current directory")?
            .join(path);
    }

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home dir {}", path.display()))?;
    }

    Ok(path)
}

/// Resolve `file` against `base_dir` unless it is already absolute.
pub fn resolve_under(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
