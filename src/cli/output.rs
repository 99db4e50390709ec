//! Colored terminal output for `tg`
//!
//! `colored` honours NO_COLOR / CLICOLOR / CLICOLOR_FORCE on its own.

use std::fmt::Display;

use colored::Colorize;

pub fn error(msg: impl Display) {
    eprintln!("{}: {msg}", "error".red().bold());
}

pub fn warn(msg: impl Display) {
    eprintln!("{}: {msg}", "warning".yellow());
}

/// Final status line of a command.
pub fn done(msg: impl Display) {
    println!("{} {msg}", "✓".green());
}

/// Section title, e.g. a template heading or a prompt block.
pub fn heading(msg: impl Display) {
    println!("{}", msg.to_string().cyan().bold());
}

/// `label: value` pair.
pub fn field(label: &str, value: impl Display) {
    println!("{}: {value}", label.green());
}

pub fn note(msg: impl Display) {
    println!("  {}", msg.to_string().dimmed());
}

/// Unstyled line; tree diagrams go through here.
pub fn plain(msg: impl Display) {
    println!("{msg}");
}

/// Template listed for removal, before confirmation.
pub fn marked(name: &str) {
    println!("  {} {name}", "-".red());
}

/// Per-template outcome of a batch operation.
pub fn outcome(name: &str, result: Result<(), &dyn Display>) {
    match result {
        Ok(()) => println!("  {} {name}", "✓".green()),
        Err(e) => println!("  {} {name}: {e}", "✗".red()),
    }
}
