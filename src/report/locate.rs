use super::engine::ReportError;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_EXTENSION: &str = ".rpt";

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ReportError> {
    let entries = fs::read_dir(dir).map_err(|source| ReportError::ReadDir {
        path: dir.display().to_string(),
        source,
    })?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

pub fn resolve_report_file(
    base: &Path,
    report_code: &str,
    report_name: &str,
) -> Result<Option<PathBuf>, ReportError> {
    let code = report_code.trim();
    if code.is_empty() || !base.is_dir() {
        return Ok(None);
    }

    let mut files = Vec::new();
    collect_files(base, &mut files)?;
    files.sort();

    let name = report_name.trim();
    if !name.is_empty() {
        let expected = format!("{code} - {name}{REPORT_EXTENSION}").to_lowercase();
        if let Some(exact) = files.iter().find(|path| file_name(path) == expected) {
            return Ok(Some(exact.clone()));
        }
    }

    let prefix = format!("{code} - ").to_lowercase();
    Ok(files
        .into_iter()
        .find(|path| {
            let candidate = file_name(path);
            candidate.starts_with(&prefix) && candidate.ends_with(REPORT_EXTENSION)
        }))
}
