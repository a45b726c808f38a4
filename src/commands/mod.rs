//! REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and help generation.

mod config;
mod form;
mod help;
mod home;
mod open;
mod quit;
mod reset;
mod result;
mod run;
mod set;

use async_trait::async_trait;
use std::sync::Arc;

use crate::artifact::ArtifactOpener;
use crate::config::Settings;
use crate::layout::Shell;
use crate::screen::Screen;

/// What commands can see and drive.
pub struct CommandContext<'a> {
    pub screen: &'a Screen,
    pub opener: &'a dyn ArtifactOpener,
    pub settings: &'a Settings,
    /// Where settings are stored, for display.
    pub settings_path: &'a str,
    pub shell: &'a Shell,
}

/// What the REPL should do after a command runs.
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Not a command; the REPL tries it as a field edit.
    NotACommand,
    /// Command handled, nothing to show.
    Handled,
    /// Command handled; print this after any pending notices.
    Show(String),
    /// Exit the REPL.
    Quit,
}

/// A REPL command.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/run"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/h", "/?"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Argument synopsis for `/help`, e.g. `"<field> <value>"`.
    fn args(&self) -> &str {
        ""
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    async fn execute(&self, args: &str, ctx: &CommandContext<'_>) -> CommandResult;
}

pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// A registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(home::HomeCommand),
            Arc::new(form::FormCommand),
            Arc::new(set::SetCommand),
            Arc::new(reset::ResetCommand),
            Arc::new(run::RunCommand),
            Arc::new(result::ResultCommand),
            Arc::new(open::OpenCommand),
            Arc::new(config::ConfigCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, ctx: &CommandContext<'_>) -> CommandResult {
        let input = input.trim();
        let (cmd, args) = input
            .split_once(char::is_whitespace)
            .map(|(cmd, args)| (cmd, args.trim()))
            .unwrap_or((input, ""));

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help needs the registry to list all commands
                if command.name() == "/help" {
                    return CommandResult::Show(self.help_text());
                }
                return command.execute(args, ctx).await;
            }
        }

        if cmd.starts_with('/') {
            return CommandResult::Show(format!(
                "unknown command: {cmd}\ntype /help for available commands\n"
            ));
        }

        CommandResult::NotACommand
    }

    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.args(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out.push_str("\n  <field>=<value> also edits a field directly.\n");
        out
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, args: &str, aliases: &[&str]) -> String {
    let mut label = name.to_string();
    if !args.is_empty() {
        label.push(' ');
        label.push_str(args);
    }
    if !aliases.is_empty() {
        label.push_str(&format!(" ({})", aliases.join(", ")));
    }
    label
}
