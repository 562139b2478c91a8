//! Global context for CLI commands

use anyhow::{Context as _, Result};
use chrono::{DateTime, Local};
use promptpage_core::config::consts::files::CONFIG_FILE;
use promptpage_core::{CatalogBuild, Config, PromptpageError, StoredTemplate};
use std::env;
use std::path::{Path, PathBuf};

use crate::sources;

/// Loaded configuration plus the reference instant for this invocation
pub struct Context {
    pub config: Config,
    pub now: DateTime<Local>,
    pub verbose: bool,
}

impl Context {
    /// Load config from `config_path`, or from `./promptpage.toml` if present
    ///
    /// `now` is captured here once; commands never read the clock themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicitly given config file cannot be read
    /// - The config file cannot be parsed or fails validation
    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let current_dir = env::current_dir()?;

        let (config, root) = match config_path {
            Some(path) => {
                let config = Config::from_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?;
                let root = path
                    .parent()
                    .filter(|parent| !parent.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| current_dir.clone());
                (config, root)
            }
            None => {
                let config = Config::load_or_default(current_dir.join(CONFIG_FILE))?;
                (config, current_dir.clone())
            }
        };

        let root = if root.is_relative() {
            current_dir.join(root)
        } else {
            root
        };

        tracing::debug!("Resolving relative paths against {}", root.display());

        Ok(Self {
            config: config.rebase(&root),
            now: Local::now(),
            verbose,
        })
    }

    /// Build the catalog from configured sources
    pub fn catalog(&self) -> Result<CatalogBuild> {
        sources::load_catalog(&self.config.catalog)
    }

    /// Builtin templates from the configured directory
    pub fn builtin_templates(&self) -> Vec<StoredTemplate> {
        sources::builtin_templates(&self.config.templates.dir)
    }

    /// Resolve a template argument: an existing file, else a builtin by name
    pub fn template(&self, name: &str) -> Result<StoredTemplate> {
        let path = Path::new(name);
        if path.is_file() {
            return sources::read_local_template(path);
        }

        let wanted = name.strip_prefix("builtin:").unwrap_or(name);
        self.builtin_templates()
            .into_iter()
            .find(|stored| {
                let file_name = stored.id.strip_prefix("builtin:").unwrap_or(&stored.id);
                file_name == wanted || stored.title == wanted
            })
            .ok_or_else(|| PromptpageError::TemplateNotFound(name.to_string()).into())
    }
}
