//! Template catalog service
//!
//! Use cases over the template store: authoring, cloning, applying, selecting
//! the default template and removal.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::services::materializer::{MaterializeReport, Materializer};
use crate::application::services::scanner::DirectoryScanner;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Preferences;
use crate::domain::Template;
use crate::infrastructure::traits::{FileSystem, TemplateStore};

/// Outcome of removing a batch of templates.
#[derive(Debug, Default)]
pub struct RemovalReport {
    pub removed: Vec<String>,
    pub failed: Vec<(String, ApplicationError)>,
    /// Set when the default template was among the removed ones
    pub cleared_default: bool,
    /// Preferences could not be read or updated after deleting
    pub preferences_error: Option<ApplicationError>,
}

/// Service managing stored templates.
pub struct CatalogService {
    store: Arc<dyn TemplateStore>,
    scanner: DirectoryScanner,
    materializer: Materializer,
    preferences_path: PathBuf,
}

impl CatalogService {
    pub fn new(
        store: Arc<dyn TemplateStore>,
        fs: Arc<dyn FileSystem>,
        preferences_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            scanner: DirectoryScanner::new(fs.clone()),
            materializer: Materializer::new(fs),
            preferences_path: preferences_path.into(),
        }
    }

    /// Validate and persist a template, overwriting an existing one of the same name.
    pub fn save(&self, template: &Template) -> ApplicationResult<()> {
        template.validate()?;
        self.store.save(template)?;
        info!("saved template {}", template.name);
        Ok(())
    }

    pub fn load(&self, name: &str) -> ApplicationResult<Template> {
        self.store.load(name)
    }

    pub fn list(&self) -> ApplicationResult<Vec<Template>> {
        self.store.list()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.store.exists(name)
    }

    /// Scan `path` into a new template and save it.
    #[instrument(skip(self))]
    pub fn clone_directory(
        &self,
        path: &Path,
        name: &str,
        description: &str,
        max_depth: usize,
    ) -> ApplicationResult<Template> {
        let root = self.scanner.scan(path, 0, max_depth)?;
        let template = Template::from_structure(name, description, root);
        debug!(
            "clone_directory: {} nodes, variables={:?}",
            template.node_count(),
            template.variables
        );
        self.save(&template)?;
        Ok(template)
    }

    /// Load template `name` and materialize it under `target`.
    #[instrument(skip(self, bindings))]
    pub fn apply(
        &self,
        name: &str,
        bindings: &BTreeMap<String, String>,
        target: &Path,
    ) -> ApplicationResult<MaterializeReport> {
        let template = self.store.load(name)?;
        self.materializer.apply(&template, bindings, target)
    }

    /// Materialize an already loaded template.
    pub fn apply_template(
        &self,
        template: &Template,
        bindings: &BTreeMap<String, String>,
        target: &Path,
    ) -> ApplicationResult<MaterializeReport> {
        self.materializer.apply(template, bindings, target)
    }

    pub fn preferences(&self) -> ApplicationResult<Preferences> {
        Preferences::load(&self.preferences_path)
    }

    /// Name of the default template, if one is set.
    pub fn default_template(&self) -> ApplicationResult<Option<String>> {
        let prefs = self.preferences()?;
        Ok(prefs.has_default().then_some(prefs.default_template))
    }

    /// Make `name` the default template. It must exist.
    pub fn set_default(&self, name: &str) -> ApplicationResult<()> {
        if !self.store.exists(name) {
            return Err(ApplicationError::TemplateNotFound(name.to_string()));
        }
        let mut prefs = self.preferences()?;
        prefs.default_template = name.to_string();
        prefs.save(&self.preferences_path)?;
        info!("default template set to {}", name);
        Ok(())
    }

    /// Delete each named template, continuing past failures.
    ///
    /// A preferences failure after deleting is recorded in the report, the
    /// deletions themselves are still reported.
    pub fn remove(&self, names: &[String]) -> RemovalReport {
        let mut report = RemovalReport::default();
        for name in names {
            match self.store.delete(name) {
                Ok(()) => report.removed.push(name.clone()),
                Err(e) => report.failed.push((name.clone(), e)),
            }
        }

        match self.clear_default_if_removed(&report.removed) {
            Ok(cleared) => report.cleared_default = cleared,
            Err(e) => {
                warn!("remove: preferences not updated: {}", e);
                report.preferences_error = Some(e);
            }
        }
        report
    }

    fn clear_default_if_removed(&self, removed: &[String]) -> ApplicationResult<bool> {
        let mut prefs = self.preferences()?;
        if !prefs.has_default() || !removed.contains(&prefs.default_template) {
            return Ok(false);
        }
        prefs.default_template.clear();
        prefs.save(&self.preferences_path)?;
        Ok(true)
    }
}
