//! Interactive template authoring
//!
//! A small state machine collecting name, description and path entries one
//! line at a time. The collected entries go to the tree builder in one batch.

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{render, validate_template_name, DomainError, Template, TreeBuilder};
use crate::infrastructure::traits::Prompter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    CollectingName,
    CollectingDescription,
    CollectingItems,
    Done,
}

#[derive(Debug, Clone)]
pub struct AuthoringWizard {
    state: WizardState,
    name: String,
    description: String,
    items: Vec<String>,
}

impl Default for AuthoringWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthoringWizard {
    pub fn new() -> Self {
        Self {
            state: WizardState::CollectingName,
            name: String::new(),
            description: String::new(),
            items: Vec::new(),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Prompt text for the current state.
    pub fn prompt(&self) -> &'static str {
        match self.state {
            WizardState::CollectingName => "Template name:",
            WizardState::CollectingDescription => "Description:",
            WizardState::CollectingItems => {
                "Entry (dir/ for folders, a.txt for files, empty line to finish):"
            }
            WizardState::Done => "",
        }
    }

    /// Feed one submitted line and advance.
    ///
    /// An invalid name is rejected and the wizard stays in `CollectingName`.
    /// Input after `Done` is ignored.
    pub fn submit(&mut self, line: &str) -> Result<WizardState, DomainError> {
        let value = line.trim();
        self.state = match self.state {
            WizardState::CollectingName => {
                validate_template_name(value)?;
                self.name = value.to_string();
                WizardState::CollectingDescription
            }
            WizardState::CollectingDescription => {
                self.description = value.to_string();
                WizardState::CollectingItems
            }
            WizardState::CollectingItems if value.is_empty() => WizardState::Done,
            WizardState::CollectingItems => {
                self.items.push(value.to_string());
                WizardState::CollectingItems
            }
            WizardState::Done => WizardState::Done,
        };
        Ok(self.state)
    }

    /// Tree diagram of the entries collected so far.
    pub fn preview(&self) -> String {
        render(&TreeBuilder::build(&self.items), "")
    }

    /// The finished template, once all input was collected.
    pub fn finish(self) -> Option<Template> {
        match self.state {
            WizardState::Done => Some(Template::from_paths(
                self.name,
                self.description,
                &self.items,
            )),
            _ => None,
        }
    }
}

/// Drive the wizard from `prompter` until done.
///
/// `on_item` is called after every accepted entry (for live preview),
/// `on_rejected` with the reason a line was not accepted.
/// Returns None if input ends before the wizard finishes.
pub fn run_wizard(
    prompter: &dyn Prompter,
    mut on_item: impl FnMut(&AuthoringWizard),
    mut on_rejected: impl FnMut(&DomainError),
) -> ApplicationResult<Option<Template>> {
    let mut wizard = AuthoringWizard::new();
    while wizard.state() != WizardState::Done {
        let line = prompter
            .read_line(wizard.prompt())
            .map_err(|e| ApplicationError::OperationFailed {
                context: "read user input".to_string(),
                source: Box::new(e),
            })?;
        let Some(line) = line else {
            return Ok(None);
        };
        let before = wizard.state();
        match wizard.submit(&line) {
            Ok(WizardState::CollectingItems) if before == WizardState::CollectingItems => {
                on_item(&wizard)
            }
            Ok(_) => {}
            Err(e) => on_rejected(&e),
        }
    }
    Ok(wizard.finish())
}
