//! Reading catalog sources and templates from disk

use anyhow::{Context as _, Result};
use promptpage_core::catalog::builtin_fallback;
use promptpage_core::config::consts::files::TEMPLATES_README;
use promptpage_core::config::CatalogConfig;
use promptpage_core::{build_catalog, CatalogBuild, PromptpageError, RawStockItem, StoredTemplate};
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Read a JSON array of instrument records
///
/// A missing file is an empty source. A file that is not a JSON array of
/// objects is an error.
pub fn read_source(path: &Path) -> Result<Vec<RawStockItem>> {
    if !path.exists() {
        tracing::warn!("Catalog source {} does not exist, treating as empty", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog source {}", path.display()))?;

    serde_json::from_str(&content).map_err(|e| {
        PromptpageError::CatalogSourceInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn read_optional(path: Option<&Path>) -> Result<Vec<RawStockItem>> {
    match path {
        Some(path) => read_source(path),
        None => Ok(Vec::new()),
    }
}

/// Build the catalog from the configured base, delta, and fallback files
pub fn load_catalog(config: &CatalogConfig) -> Result<CatalogBuild> {
    let base = read_optional(config.base.as_deref())?;
    let delta = read_optional(config.delta.as_deref())?;
    let fallback = match config.fallback.as_deref() {
        Some(path) => read_source(path)?,
        None => builtin_fallback(),
    };

    Ok(build_catalog(base, delta, fallback))
}

fn modified_millis(path: &Path) -> i64 {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|age| age.as_millis() as i64)
        .unwrap_or(0)
}

fn is_template_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    path.is_file()
        && name.to_lowercase().ends_with(".md")
        && !name.eq_ignore_ascii_case(TEMPLATES_README)
}

/// Every `*.md` in `dir` except the readme, sorted by file name
///
/// An unreadable directory yields no templates.
pub fn builtin_templates(dir: &Path) -> Vec<StoredTemplate> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot read templates dir {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| is_template_file(path))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .filter_map(|path| {
            let file_name = path.file_name()?.to_str()?.to_string();
            match fs::read_to_string(&path) {
                Ok(raw) => Some(StoredTemplate::builtin(&file_name, raw, modified_millis(&path))),
                Err(e) => {
                    tracing::warn!("Skipping template {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect()
}

/// A template file given on the command line
pub fn read_local_template(path: &Path) -> Result<StoredTemplate> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    let title = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();

    Ok(StoredTemplate::local(
        format!("local:{}", path.display()),
        title,
        raw,
        modified_millis(path),
    ))
}
