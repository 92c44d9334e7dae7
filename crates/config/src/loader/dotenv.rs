//! Best-effort `.env` override file handling.
//!
//! Responsibilities:
//! - Parse override files into a [`MapSource`] without mutating the process environment.
//! - Optionally seed the process environment from override files.
//! - Resolve the default override file locations.
//!
//! Invariants:
//! - A missing file is silent (debug log only).
//! - An unreadable or malformed file is skipped with a warning and contributes nothing,
//!   not even the entries parsed before the bad line.
//! - Log output NEVER includes raw `.env` line contents, only paths, positions, and I/O kinds.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::source::{EnvSource, MapSource, ProcessEnv};
use crate::constants::{DOTENV_DISABLED, DOTENV_FILE_NAME};

/// Check if override file loading is disabled via environment variable.
pub(crate) fn dotenv_disabled() -> bool {
    matches!(
        ProcessEnv.get(DOTENV_DISABLED).as_deref(),
        Some("true") | Some("1")
    )
}

/// Default override file locations, highest precedence first.
///
/// The working directory's `.env` comes first, then the one next to this crate.
pub(crate) fn default_override_files() -> Vec<PathBuf> {
    let crate_file = Path::new(env!("CARGO_MANIFEST_DIR")).join(DOTENV_FILE_NAME);
    let mut files = Vec::with_capacity(2);
    match std::env::current_dir() {
        Ok(cwd) => {
            let cwd_file = cwd.join(DOTENV_FILE_NAME);
            if cwd_file != crate_file {
                files.push(cwd_file);
            }
        }
        Err(e) => debug!(error = %e.kind(), "working directory unavailable, skipping its override file"),
    }
    files.push(crate_file);
    files
}

/// Describe a dotenv error without echoing file contents.
fn describe(err: &dotenvy::Error) -> String {
    match err {
        dotenvy::Error::LineParse(_, idx) => format!("parse error at position {}", idx),
        dotenvy::Error::Io(io_err) => format!("I/O error: {}", io_err.kind()),
        _ => "unknown error".to_string(),
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Parse one override file completely.
///
/// Returns `None` when the file is missing, unreadable, or malformed.
fn parse_override_file(path: &Path) -> Option<Vec<(String, String)>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if is_not_found(&e) => {
            debug!(path = %path.display(), "no override file");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %describe(&e), "ignoring unreadable override file");
            return None;
        }
    };

    match iter.collect::<Result<Vec<(String, String)>, _>>() {
        Ok(vars) => {
            debug!(path = %path.display(), count = vars.len(), "read override file");
            Some(vars)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %describe(&e), "ignoring malformed override file");
            None
        }
    }
}

/// Parse one override file.
pub(crate) fn read_override_file(path: &Path) -> MapSource {
    parse_override_file(path)
        .map(|vars| vars.into_iter().collect())
        .unwrap_or_default()
}

/// Merge several override files; earlier files win per key.
pub(crate) fn read_override_files(paths: &[PathBuf]) -> MapSource {
    if paths.is_empty() {
        return MapSource::new();
    }
    if dotenv_disabled() {
        debug!("{} is set, skipping override files", DOTENV_DISABLED);
        return MapSource::new();
    }

    let mut merged: Vec<(String, String)> = Vec::new();
    for path in paths.iter().rev() {
        merged.extend(read_override_file(path).into_vars());
    }
    merged.into_iter().collect()
}

/// Load override files into the process environment.
///
/// Variables that are already set are left alone.
pub(crate) fn seed_process_env(paths: &[PathBuf]) {
    if dotenv_disabled() {
        debug!("{} is set, not seeding the environment", DOTENV_DISABLED);
        return;
    }

    for path in paths {
        // dotenvy sets variables line by line, so only seed from a file that parses cleanly.
        if parse_override_file(path).is_none() {
            continue;
        }
        match dotenvy::from_path(path) {
            Ok(()) => debug!(path = %path.display(), "seeded environment from override file"),
            Err(e) => {
                warn!(path = %path.display(), error = %describe(&e), "ignoring unreadable override file")
            }
        }
    }
}
