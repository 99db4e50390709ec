//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::CatalogService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::store::JsonTemplateStore;
use crate::infrastructure::traits::{
    FileSystem, Prompter, RealFileSystem, Selector, SkimSelector, StdinPrompter, TemplateStore,
};

/// Container holding all application services.
///
/// Constructed once at process entry and passed down.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Interactive selection
    pub selector: Arc<dyn Selector>,

    /// Line input
    pub prompter: Arc<dyn Prompter>,

    /// Template use cases
    pub catalog: CatalogService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(SkimSelector),
            Arc::new(StdinPrompter),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        selector: Arc<dyn Selector>,
        prompter: Arc<dyn Prompter>,
    ) -> ApplicationResult<Self> {
        let settings = Arc::new(settings);
        let store: Arc<dyn TemplateStore> =
            Arc::new(JsonTemplateStore::new(fs.clone(), settings.templates_dir())?);
        let catalog = CatalogService::new(store, fs.clone(), settings.preferences_path());

        Ok(Self {
            settings,
            fs,
            selector,
            prompter,
            catalog,
        })
    }
}
