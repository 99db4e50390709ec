//! Command dispatch

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::run_wizard;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{render, Template};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{Prompter, SelectionItem};
use crate::infrastructure::InfraError;

/// Entry point: load settings, wire services and run the selected command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        let mut cmd = Cli::command();
        cmd.print_help()
            .map_err(|e| InfraError::terminal("print help", e))?;
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings)?;
    run_command(&container, command)
}

/// Run a command against an already wired container.
pub fn run_command(c: &ServiceContainer, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Apply { name, path } => cmd_apply(c, name.as_deref(), path),
        Commands::Create => cmd_create(c),
        Commands::List { name } => cmd_list(c, name.as_deref()),
        Commands::Use { name } => cmd_use(c, name.as_deref()),
        Commands::Clone {
            path,
            name,
            description,
            depth,
        } => cmd_clone(c, path, name, description, *depth),
        Commands::Remove { names, yes } => cmd_remove(c, names, *yes),
        Commands::Config { command } => cmd_config(c, command),
        Commands::Completion { .. } => Err(CliError::Usage(
            "completion does not need a service container".to_string(),
        )),
    }
}

#[instrument(skip(c))]
fn cmd_apply(c: &ServiceContainer, name: Option<&str>, path: &Path) -> CliResult<()> {
    let name = match name {
        Some(name) => name.to_string(),
        None => match c.catalog.default_template()? {
            Some(default) => {
                output::note(&format!("Using default template '{default}'"));
                default
            }
            None => {
                return Err(CliError::Usage(
                    "no template given: use `tg apply <name>` or set a default with `tg use <name>`"
                        .to_string(),
                ))
            }
        },
    };

    let template = c.catalog.load(&name)?;
    let bindings = prompt_variables(c.prompter.as_ref(), &template.variables)?;

    output::field(
        "Applying",
        &format!("template '{}' to {}", template.name, path.display()),
    );
    let report = c.catalog.apply_template(&template, &bindings, path)?;
    output::done(&format!(
        "Created {} directories and {} files",
        report.directories, report.files
    ));
    Ok(())
}

/// Ask for each declared variable, in declaration (sorted) order.
fn prompt_variables(
    prompter: &dyn Prompter,
    variables: &[String],
) -> CliResult<BTreeMap<String, String>> {
    let mut bindings = BTreeMap::new();
    if variables.is_empty() {
        return Ok(bindings);
    }
    output::heading("Template variables");
    for var in variables {
        let value = prompter
            .read_line(&format!("{var}:"))
            .map_err(|e| InfraError::terminal(format!("read value for '{var}'"), e))?
            .ok_or_else(|| CliError::Usage(format!("no value given for variable '{var}'")))?;
        bindings.insert(var.clone(), value.trim().to_string());
    }
    Ok(bindings)
}

#[instrument(skip(c))]
fn cmd_create(c: &ServiceContainer) -> CliResult<()> {
    output::heading("New template");
    let template = run_wizard(
        c.prompter.as_ref(),
        |wizard| {
            output::plain("");
            output::plain(&wizard.preview());
        },
        |rejected| output::warn(rejected),
    )?;

    let Some(template) = template else {
        output::warn("input ended, template not saved");
        return Ok(());
    };
    if c.catalog.exists(&template.name) {
        output::warn(&format!("overwriting template '{}'", template.name));
    }
    c.catalog.save(&template)?;
    output::done(&format!("Saved template '{}'", template.name));
    Ok(())
}

#[instrument(skip(c))]
fn cmd_list(c: &ServiceContainer, name: Option<&str>) -> CliResult<()> {
    let name = match name {
        Some(name) => name.to_string(),
        None => {
            let templates = c.catalog.list()?;
            if templates.is_empty() {
                output::plain("No templates stored.");
                return Ok(());
            }
            let default = c.catalog.default_template().unwrap_or_else(|e| {
                output::warn(&format!("cannot read preferences: {e}"));
                None
            });
            match choose_one(c, &templates, default.as_deref(), "Template> ")? {
                Some(name) => name,
                None => {
                    output::plain("Selection cancelled.");
                    return Ok(());
                }
            }
        }
    };

    let template = c.catalog.load(&name)?;
    print_template(&template);
    Ok(())
}

fn print_template(template: &Template) {
    output::heading(&format!(
        "Template: {} ({})",
        template.name, template.description
    ));
    output::plain("--------------Tree------------------");
    output::plain(render(&template.root, "").trim_end());
    if !template.variables.is_empty() {
        output::plain("");
        output::field("Variables", &template.variables.join(", "));
    }
}

#[instrument(skip(c))]
fn cmd_use(c: &ServiceContainer, name: Option<&str>) -> CliResult<()> {
    let templates = c.catalog.list()?;
    if templates.is_empty() {
        output::plain("No templates stored.");
        return Ok(());
    }

    let name = match name {
        Some(name) => name.to_string(),
        None => {
            let default = c.catalog.default_template().unwrap_or_else(|e| {
                output::warn(&format!("cannot read preferences: {e}"));
                None
            });
            match choose_one(c, &templates, default.as_deref(), "Default template> ")? {
                Some(name) => name,
                None => {
                    output::plain("Selection cancelled.");
                    return Ok(());
                }
            }
        }
    };

    c.catalog.set_default(&name)?;
    output::done(&format!(
        "Default template set to '{name}'. Run `tg apply` to use it."
    ));
    Ok(())
}

#[instrument(skip(c))]
fn cmd_clone(
    c: &ServiceContainer,
    path: &Path,
    name: &str,
    description: &str,
    depth: usize,
) -> CliResult<()> {
    if !c.fs.is_dir(path) {
        return Err(CliError::InvalidArgs(format!(
            "not a directory: {}",
            path.display()
        )));
    }
    let scope = if depth == 0 {
        "unlimited depth".to_string()
    } else {
        format!("depth {depth}")
    };
    output::field(
        "Scanning",
        &format!("{} ({scope}) into template '{name}'", path.display()),
    );
    let template = c.catalog.clone_directory(path, name, description, depth)?;
    output::done(&format!(
        "Saved template '{}' with {} entries",
        template.name,
        template.node_count()
    ));
    if !template.variables.is_empty() {
        output::field("Variables", &template.variables.join(", "));
    }
    Ok(())
}

#[instrument(skip(c))]
fn cmd_remove(c: &ServiceContainer, names: &[String], yes: bool) -> CliResult<()> {
    let names: Vec<String> = if names.is_empty() {
        let templates = c.catalog.list()?;
        if templates.is_empty() {
            output::plain("No templates to remove.");
            return Ok(());
        }
        let items = selection_items(&templates, None);
        c.selector
            .select_many(&items, "Remove (TAB to mark)> ")
            .map_err(InfraError::Selection)?
            .into_iter()
            .map(|item| item.value)
            .collect()
    } else {
        names.to_vec()
    };

    if names.is_empty() {
        output::plain("No templates selected.");
        return Ok(());
    }

    if !yes {
        output::heading("Templates to remove:");
        for name in &names {
            output::marked(name);
        }
        let answer = c
            .prompter
            .read_line("Type 'yes' to confirm:")
            .map_err(|e| InfraError::terminal("read confirmation", e))?;
        if answer.as_deref().map(str::trim) != Some("yes") {
            output::plain("Removal cancelled.");
            return Ok(());
        }
    }

    let report = c.catalog.remove(&names);
    for name in &report.removed {
        output::outcome(name, Ok(()));
    }
    for (name, err) in &report.failed {
        output::outcome(name, Err(err));
    }
    if let Some(e) = &report.preferences_error {
        output::warn(&format!("default template not updated: {e}"));
    }
    if report.cleared_default {
        output::warn("the default template was removed; set a new one with `tg use`");
    }
    output::plain(&format!(
        "{} removed, {} failed",
        report.removed.len(),
        report.failed.len()
    ));
    Ok(())
}

fn cmd_config(c: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::plain(&c.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            output::field("Global config", &global);
            output::field("Base dir", &c.settings.base_dir.display());
            output::field("Templates", &c.settings.templates_dir().display());
            output::field("Preferences", &c.settings.preferences_path().display());
        }
    }
    Ok(())
}

fn selection_items(templates: &[Template], default: Option<&str>) -> Vec<SelectionItem> {
    templates
        .iter()
        .map(|t| {
            let marker = if Some(t.name.as_str()) == default {
                " (default)"
            } else {
                ""
            };
            SelectionItem {
                display: format!("{} ({}){}", t.name, t.description, marker),
                value: t.name.clone(),
            }
        })
        .collect()
}

fn choose_one(
    c: &ServiceContainer,
    templates: &[Template],
    default: Option<&str>,
    prompt: &str,
) -> CliResult<Option<String>> {
    let items = selection_items(templates, default);
    let selected = c
        .selector
        .select_one(&items, prompt)
        .map_err(InfraError::Selection)?;
    Ok(selected.map(|item| item.value))
}
