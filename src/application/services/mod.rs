//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, TemplateStore, etc.)
//! but are themselves concrete structs, not traits.

mod catalog;
pub mod materializer;
mod scanner;

pub use catalog::{CatalogService, RemovalReport};
pub use materializer::{plan, MaterializeReport, Materializer, PlannedEntry};
pub use scanner::{DirectoryScanner, IGNORED_NAMES};
