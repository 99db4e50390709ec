//! Tests for the interactive authoring wizard

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use treegen::application::{run_wizard, AuthoringWizard, WizardState};
use treegen::domain::{DomainError, Node};
use treegen::infrastructure::traits::Prompter;

/// Mock prompter replaying scripted lines, then end of input.
struct ScriptedPrompter {
    lines: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: Mutex::new(lines.iter().map(|l| l.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.lines.lock().unwrap().pop_front())
    }
}

struct FailingPrompter;

impl Prompter for FailingPrompter {
    fn read_line(&self, _prompt: &str) -> io::Result<Option<String>> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

#[test]
fn given_full_script_when_running_wizard_then_returns_template() {
    // Arrange
    let prompter = ScriptedPrompter::new(&[
        "go-service",
        "Go service",
        "{name}/",
        "{name}/main.go",
        "go.mod",
        "",
    ]);
    let mut previews = Vec::new();

    // Act
    let template = run_wizard(&prompter, |w| previews.push(w.preview()), |_| {})
        .unwrap()
        .expect("template");

    // Assert
    assert_eq!(template.name, "go-service");
    assert_eq!(template.description, "Go service");
    assert_eq!(template.variables, vec!["name".to_string()]);
    assert_eq!(
        template.root,
        vec![
            Node::dir("{name}", vec![Node::file("main.go")]),
            Node::file("go.mod")
        ]
    );
    assert_eq!(previews.len(), 3);
    assert_eq!(previews[0], "└── {name}\n");
}

#[test]
fn given_invalid_name_when_running_wizard_then_reprompts() {
    let prompter = ScriptedPrompter::new(&["a/b", "ok", "", ""]);
    let mut rejected = Vec::new();

    let template = run_wizard(&prompter, |_| {}, |e| rejected.push(e.clone()))
        .unwrap()
        .expect("template");

    assert_eq!(template.name, "ok");
    assert_eq!(rejected, vec![DomainError::InvalidTemplateName("a/b".to_string())]);
    let prompts = prompter.prompts.lock().unwrap();
    assert_eq!(prompts[0], prompts[1]);
}

#[test]
fn given_input_ends_early_when_running_wizard_then_returns_none() {
    let prompter = ScriptedPrompter::new(&["name", "desc", "a.txt"]);

    let result = run_wizard(&prompter, |_| {}, |_| {}).unwrap();

    assert!(result.is_none());
}

#[test]
fn given_no_items_when_running_wizard_then_template_is_empty() {
    let prompter = ScriptedPrompter::new(&["empty", "", ""]);

    let template = run_wizard(&prompter, |_| {}, |_| {}).unwrap().unwrap();

    assert!(template.root.is_empty());
    assert!(template.variables.is_empty());
}

#[test]
fn given_read_failure_when_running_wizard_then_error() {
    assert!(run_wizard(&FailingPrompter, |_| {}, |_| {}).is_err());
}

#[test]
fn given_wizard_when_stepping_manually_then_prompts_follow_state() {
    let mut wizard = AuthoringWizard::new();
    assert_eq!(wizard.prompt(), "Template name:");

    wizard.submit("  spaced  ").unwrap();
    assert_eq!(wizard.prompt(), "Description:");

    wizard.submit("d").unwrap();
    assert_eq!(wizard.state(), WizardState::CollectingItems);

    wizard.submit("  docs/  ").unwrap();
    assert_eq!(wizard.items().to_vec(), vec!["docs/".to_string()]);

    assert_eq!(wizard.submit(""), Ok(WizardState::Done));
    assert_eq!(wizard.submit("ignored"), Ok(WizardState::Done));

    let template = wizard.finish().unwrap();
    assert_eq!(template.name, "spaced");
    assert_eq!(template.root, vec![Node::dir("docs", vec![])]);
}

#[test]
fn given_unfinished_wizard_when_finishing_then_none() {
    let mut wizard = AuthoringWizard::new();
    wizard.submit("x").unwrap();

    assert!(wizard.finish().is_none());
}
