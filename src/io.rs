use log::debug;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use walkdir::WalkDir;

use crate::dataset::RouteDataset;
use crate::error::{Result, TrackError};
use crate::parsers::PARSERS;

/// Pretty-print `value` as JSON (2-space indent).
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

static STAGING_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write every `(contents, output_path)` pair or none of them.
///
/// Each document goes to its own staging file next to its target first. Only
/// once all of them are on disk are they renamed into place; if any step fails
/// the staging files and already renamed targets are removed again.
pub fn write_all_atomic(files: &[(&str, &Path)]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for &(contents, output_path) in files {
        match stage(contents, output_path) {
            Ok(tmp_path) => staged.push((tmp_path, output_path)),
            Err(e) => {
                discard(&staged);
                return Err(e);
            }
        }
    }

    for (i, (tmp_path, output_path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp_path, output_path) {
            for (_, committed) in &staged[..i] {
                let _ = fs::remove_file(committed);
            }
            discard(&staged[i..]);
            return Err(e.into());
        }
        debug!("Wrote {}", output_path.display());
    }

    Ok(())
}

pub fn write_atomic(contents: &str, output_path: &Path) -> Result<()> {
    write_all_atomic(&[(contents, output_path)])
}

fn stage(contents: &str, output_path: &Path) -> Result<PathBuf> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = output_path
        .file_name()
        .map(|name| name.to_os_string())
        .ok_or_else(|| TrackError::malformed(output_path, "output path has no file name"))?;
    // unique per writer, parallel batch jobs may target the same directory
    tmp_name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        STAGING_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let tmp_path = output_path.with_file_name(tmp_name);

    if let Err(e) = fs::write(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(tmp_path)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp_path, _) in staged {
        let _ = fs::remove_file(tmp_path);
    }
}

pub fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<()> {
    write_atomic(&to_json(value)?, output_path)
}

pub fn read_route_dataset(path: &Path) -> Result<RouteDataset> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TrackError::MissingInput(path.to_path_buf()),
        _ => TrackError::Io(e),
    })?;
    serde_json::from_str(&contents).map_err(|e| TrackError::malformed(path, e.to_string()))
}

/// All track files any parser understands, recursively, in path order.
pub fn find_track_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(TrackError::MissingInput(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| PARSERS.iter().any(|parser| parser.handles(path)))
        .collect();
    files.sort();

    Ok(files)
}
