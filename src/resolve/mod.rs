//! Entry-point resolution for installed packages.
//!
//! Follows Node's CommonJS rules for an absolute path: try the path as a
//! file (with `.js`, `.json`, `.node` appended), then as a directory via
//! `package.json` `main` and the `index.*` fallbacks.
//!
//! A package that is missing, or installed but without a loadable entry,
//! is `Ok(None)`. Only unexpected filesystem errors are `Err`.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::UseError;


const EXTENSIONS: [&str; 3] = ["js", "json", "node"];

/// The part of `package.json` resolution cares about.
#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    #[serde(default)]
    main: Option<serde_json::Value>,
}

/// Probe an aliased package directory for a loadable entry point.
///
/// `sub_path` is the identifier's sub-path (`""` or `"/lib/index"`).
pub fn probe(package_dir: &Path, sub_path: &str) -> Result<Option<PathBuf>, UseError> {
    if !is_dir(package_dir)? {
        tracing::debug!(dir = %package_dir.display(), "package directory absent");
        return Ok(None);
    }

    let relative = sub_path.trim_start_matches('/');
    let candidate = if relative.is_empty() {
        package_dir.to_path_buf()
    } else {
        package_dir.join(relative)
    };

    let found = match resolve_as_file(&candidate)? {
        Some(file) => Some(file),
        None => resolve_as_directory(&candidate)?,
    };

    match found {
        Some(entry) => {
            let entry = std::fs::canonicalize(&entry).map_err(|e| io_error(&entry, e))?;
            tracing::debug!(entry = %entry.display(), "resolved");
            Ok(Some(entry))
        }
        None => {
            tracing::debug!(candidate = %candidate.display(), "no loadable entry point");
            Ok(None)
        }
    }
}

fn resolve_as_file(path: &Path) -> Result<Option<PathBuf>, UseError> {
    if is_file(path)? {
        return Ok(Some(path.to_path_buf()));
    }
    for ext in EXTENSIONS {
        let candidate = with_appended_extension(path, ext);
        if is_file(&candidate)? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

fn resolve_as_directory(dir: &Path) -> Result<Option<PathBuf>, UseError> {
    if !is_dir(dir)? {
        return Ok(None);
    }

    if let Some(main) = read_main(dir)? {
        let target = dir.join(&main);
        if let Some(file) = resolve_as_file(&target)? {
            return Ok(Some(file));
        }
        if let Some(index) = resolve_index(&target)? {
            return Ok(Some(index));
        }
        tracing::debug!(dir = %dir.display(), main = %main, "declared main is missing");
    }

    resolve_index(dir)
}

fn resolve_index(dir: &Path) -> Result<Option<PathBuf>, UseError> {
    for ext in EXTENSIONS {
        let candidate = dir.join(format!("index.{}", ext));
        if is_file(&candidate)? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Read the `main` field of `dir/package.json`, if any.
fn read_main(dir: &Path) -> Result<Option<String>, UseError> {
    let manifest = dir.join("package.json");
    let text = match std::fs::read_to_string(&manifest) {
        Ok(text) => text,
        Err(e) if is_not_found(&e) => return Ok(None),
        Err(e) => return Err(io_error(&manifest, e)),
    };

    let package: PackageJson = match serde_json::from_str(&text) {
        Ok(package) => package,
        Err(e) => {
            tracing::warn!(path = %manifest.display(), error = %e, "ignoring unparsable package.json");
            return Ok(None);
        }
    };

    Ok(match package.main {
        Some(serde_json::Value::String(main)) if !main.is_empty() => Some(main),
        _ => None,
    })
}

// ─── Filesystem helpers ────────────────────────────────────────────

fn is_dir(path: &Path) -> Result<bool, UseError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if is_not_found(&e) => Ok(false),
        Err(e) => Err(io_error(path, e)),
    }
}

fn is_file(path: &Path) -> Result<bool, UseError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if is_not_found(&e) => Ok(false),
        Err(e) => Err(io_error(path, e)),
    }
}

/// "Not there" in any of its forms: missing, or a path component that is
/// a regular file.
fn is_not_found(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

fn io_error(path: &Path, source: io::Error) -> UseError {
    UseError::Io {
        path: path.to_path_buf(),
        source,
    }
}
