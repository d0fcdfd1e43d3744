//! Named HTML templates backed by `minijinja`.
//!
//! Templates are compiled when they are added, so syntax errors surface at
//! startup rather than on the first request. Names ending in `.html` get
//! HTML auto-escaping.

use anyhow::{Context as _, Result};
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub struct Templates {
    env: Environment<'static>,
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

impl Templates {
    #[must_use]
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Load every file below `dir`, named by its path relative to `dir`
    /// (always `/`-separated, e.g. `partials/nav.html`).
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read or a template does not compile.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut templates = Self::new();
        templates.load_dir(dir, dir)?;
        info!(dir = %dir.display(), "HTML templates loaded");
        Ok(templates)
    }

    fn load_dir(&mut self, base: &Path, dir: &Path) -> Result<()> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read template dir {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                self.load_dir(base, &path)?;
                continue;
            }
            let name = path
                .strip_prefix(base)
                .unwrap_or(&path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let source = fs::read_to_string(&path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            self.add_template(&name, source)
                .with_context(|| format!("failed to compile template {name}"))?;
        }
        Ok(())
    }

    /// Add (or replace) a template under `name`.
    ///
    /// # Errors
    ///
    /// Returns the compile error if `source` is not a valid template.
    pub fn add_template(
        &mut self,
        name: &str,
        source: impl Into<String>,
    ) -> std::result::Result<(), minijinja::Error> {
        debug!(template = %name, "Template added");
        self.env
            .add_template_owned(name.to_string(), source.into())
    }

    /// Render template `name` against `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if no template has that name or rendering fails.
    pub fn render<S: Serialize>(
        &self,
        name: &str,
        data: S,
    ) -> std::result::Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(data)
    }
}
