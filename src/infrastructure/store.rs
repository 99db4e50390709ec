//! JSON file backed template store
//!
//! One pretty-printed `<name>.json` file per template in the templates directory.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::application::{path_failure, ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{validate_template_name, Template};
use crate::infrastructure::traits::{FileSystem, TemplateStore};

const EXTENSION: &str = "json";

/// Template store keeping one JSON file per template.
pub struct JsonTemplateStore {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl JsonTemplateStore {
    /// Open the store, creating the directory if needed.
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<PathBuf>) -> ApplicationResult<Self> {
        let dir = dir.into();
        fs.create_dir_all(&dir)
            .with_path_context("create templates directory", &dir)?;
        Ok(Self { fs, dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> ApplicationResult<PathBuf> {
        validate_template_name(name)?;
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }

    fn parse(name: &str, content: &str) -> ApplicationResult<Template> {
        let template: Template =
            serde_json::from_str(content).map_err(|e| ApplicationError::InvalidTemplate {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        template
            .validate()
            .map_err(|e| ApplicationError::InvalidTemplate {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(template)
    }
}

impl TemplateStore for JsonTemplateStore {
    fn save(&self, template: &Template) -> ApplicationResult<()> {
        template.validate()?;
        let path = self.path_for(&template.name)?;
        let json = serde_json::to_string_pretty(template).map_err(|e| {
            ApplicationError::OperationFailed {
                context: format!("serialize template {}", template.name),
                source: Box::new(e),
            }
        })?;
        debug!("save: {}", path.display());
        self.fs
            .write(&path, &json)
            .with_path_context("write template", &path)
    }

    fn load(&self, name: &str) -> ApplicationResult<Template> {
        let path = self.path_for(name)?;
        let content = match self.fs.read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ApplicationError::TemplateNotFound(name.to_string()))
            }
            Err(e) => return Err(e).with_path_context("read template", &path),
        };
        Self::parse(name, &content)
    }

    fn list(&self) -> ApplicationResult<Vec<Template>> {
        let mut templates = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| path_failure("list templates", &self.dir, e))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().map(|ext| ext != EXTENSION).unwrap_or(true)
            {
                continue;
            }
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };

            let parsed = self
                .fs
                .read_to_string(path)
                .with_path_context("read template", path)
                .and_then(|content| Self::parse(&name, &content));
            match parsed {
                Ok(template) => templates.push(template),
                Err(e) => warn!("skipping template {}: {}", path.display(), e),
            }
        }
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("list: found {} templates", templates.len());
        Ok(templates)
    }

    fn delete(&self, name: &str) -> ApplicationResult<()> {
        let path = self.path_for(name)?;
        match self.fs.remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ApplicationError::TemplateNotFound(name.to_string()))
            }
            Err(e) => Err(e).with_path_context("delete template", &path),
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.path_for(name)
            .map(|path| self.fs.exists(&path))
            .unwrap_or(false)
    }
}
