//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;

use crate::application::ApplicationResult;
use crate::domain::Template;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file, truncating an existing file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Key-value store of templates by name.
pub trait TemplateStore: Send + Sync {
    /// Persist a template, overwriting one with the same name.
    fn save(&self, template: &Template) -> ApplicationResult<()>;

    /// Load a template by name.
    fn load(&self, name: &str) -> ApplicationResult<Template>;

    /// All readable templates, sorted by name. Unreadable entries are skipped.
    fn list(&self) -> ApplicationResult<Vec<Template>>;

    /// Delete a template by name.
    fn delete(&self, name: &str) -> ApplicationResult<()>;

    /// Check whether a template with this name is stored.
    fn exists(&self, name: &str) -> bool;
}

/// Item for FZF-style selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    /// Display text shown in selector
    pub display: String,
    /// Actual value (e.g., template name)
    pub value: String,
}

/// Interactive FZF-style selector abstraction.
pub trait Selector: Send + Sync {
    /// Present items to user and return selected one.
    /// Returns None if user cancels (Esc/Ctrl-C).
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String>;

    /// Present items to user and return all marked ones.
    /// Returns an empty list if user cancels.
    fn select_many(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Vec<SelectionItem>, String>;
}

/// Line-oriented user input.
pub trait Prompter: Send + Sync {
    /// Show `prompt` and read one line without its line terminator.
    /// Returns None at end of input.
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Real selector implementation using skim (FZF-like).
#[derive(Debug, Default)]
pub struct SkimSelector;

impl SkimSelector {
    fn run(
        items: &[SelectionItem],
        prompt: &str,
        multi: bool,
    ) -> Result<Vec<SelectionItem>, String> {
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(Vec::new());
        }

        // Build input as newline-separated display strings
        let input = items
            .iter()
            .map(|i| i.display.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt))
            .height(Some("50%"))
            .multi(multi)
            .build()
            .map_err(|e| format!("failed to build skim options: {e}"))?;

        let item_reader = SkimItemReader::default();
        let items_arc = item_reader.of_bufread(Cursor::new(input));

        match Skim::run_with(&options, Some(items_arc)) {
            Some(out) if out.is_abort => Ok(Vec::new()),
            Some(out) => Ok(out
                .selected_items
                .iter()
                .filter_map(|selected| {
                    let display = selected.output().to_string();
                    items.iter().find(|i| i.display == display).cloned()
                })
                .collect()),
            None => Ok(Vec::new()),
        }
    }
}

impl Selector for SkimSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        Ok(Self::run(items, prompt, false)?.into_iter().next())
    }

    fn select_many(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Vec<SelectionItem>, String> {
        Self::run(items, prompt, true)
    }
}

/// Real prompter reading from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        use colored::Colorize;
        use std::io::{BufRead, Write};

        print!("{} ", prompt.cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
