use std::fs;
use std::path::{Path, PathBuf};

use crate::models::CourseTranslationMap;
use crate::validation::{ValidationReport, validate};
use crate::value::ContentValue;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Content failed validation with {} error(s)", .0.errors.len())]
    Invalid(ValidationReport),
    #[error("Invalid content directory: {0}")]
    InvalidContentDir(String),
}

/// Parse JSON text into an untyped content tree.
///
/// Only text that is not JSON at all fails here; shape problems are left
/// for [`validate`].
pub fn parse_str(json: &str) -> Result<ContentValue, LoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse, validate and decode a content tree
pub fn load_str(json: &str) -> Result<CourseTranslationMap, LoadError> {
    let raw = parse_str(json)?;
    let report = validate(&raw);
    if !report.valid {
        return Err(LoadError::Invalid(report));
    }
    let tree = decode(&raw)?;
    log::debug!("loaded {} courses", tree.len());
    Ok(tree)
}

/// Decode a validated tree into the typed models
fn decode(raw: &ContentValue) -> Result<CourseTranslationMap, LoadError> {
    Ok(serde_json::from_value(serde_json::to_value(raw)?)?)
}

/// Read a content file and return its text
pub fn read_file(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(LoadError::Io)
}

pub fn load_file(path: &Path) -> Result<CourseTranslationMap, LoadError> {
    load_str(&read_file(path)?)
}

/// Validate a content file without decoding it
pub fn validate_file(path: &Path) -> Result<ValidationReport, LoadError> {
    let raw = parse_str(&read_file(path)?)?;
    Ok(validate(&raw))
}

/// Find every `.json` content file below `root`, sorted by path
pub fn scan_content_files(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::InvalidContentDir(
            "content directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "json"
        {
            files.push(path);
        }
    }

    Ok(())
}
