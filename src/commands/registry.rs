// src/commands/registry.rs
use std::collections::HashMap;
use super::types::Command;

/// Verb table. Aliases resolve to the same command instance.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    verbs: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            verbs: HashMap::new(),
        }
    }

    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let index = self.commands.len();
        self.verbs.insert(cmd.name().to_string(), index);
        for alias in cmd.aliases() {
            self.verbs.insert(alias.to_string(), index);
        }
        self.commands.push(cmd);
    }

    pub fn get(&self, verb: &str) -> Option<&dyn Command> {
        self.verbs.get(verb).map(|&index| self.commands[index].as_ref())
    }

    /// Primary command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, verb: &str) -> bool {
        self.verbs.contains_key(verb)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use super::append_cmd::AppendCommand;
use super::deleteall_cmd::DeleteAllCommand;
use super::enter::EnterCommand;
use super::home_cmd::HomeCommand;
use super::ln::LinkCommand;
use super::ls::ListFilesCommand;
use super::mkdir::MkdirCommand;
use super::mv::MoveCommand;
use super::rm::DeleteCommand;
use super::show_cmd::ShowCommand;
use super::touch::CreateCommand;

/// Register every file system command.
pub fn register_file_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(HomeCommand));
    registry.register(Box::new(EnterCommand));
    registry.register(Box::new(CreateCommand));
    registry.register(Box::new(MkdirCommand));
    registry.register(Box::new(AppendCommand));
    registry.register(Box::new(ShowCommand));
    registry.register(Box::new(ListFilesCommand));
    registry.register(Box::new(MoveCommand));
    registry.register(Box::new(LinkCommand));
    registry.register(Box::new(DeleteCommand));
    registry.register(Box::new(DeleteAllCommand));
}

/// Registry holding every file system command.
pub fn create_default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_file_commands(&mut registry);
    registry
}
