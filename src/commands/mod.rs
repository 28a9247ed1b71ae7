//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod general;
pub mod output;
pub mod sequence;

use crate::session::RhythmSession;
use std::path::PathBuf;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// No registered command matches
    NotACommand,
    /// Error occurred
    Error(String),
    /// Watch a file for changes
    Watch(PathBuf),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub session: RhythmSession,
    /// Where `save` and `load` go when no path is given
    pub memory_path: PathBuf,
}

impl CommandContext {
    pub fn new(session: RhythmSession, memory_path: PathBuf) -> Self {
        Self {
            session,
            memory_path,
        }
    }

    /// Explicit path argument, or the memory path
    pub fn path_or_default(&self, args: &str) -> PathBuf {
        if args.is_empty() {
            self.memory_path.clone()
        } else {
            PathBuf::from(args)
        }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Sequence editing
    registry.register("show", sequence::cmd_show);
    registry.register("list", sequence::cmd_list);
    registry.register("select", sequence::cmd_select);
    registry.register("add", sequence::cmd_add);
    registry.register("remove", sequence::cmd_remove);
    registry.register("set", sequence::cmd_set);
    registry.register("regen", sequence::cmd_regen);

    // Placement and persistence
    registry.register("preview", output::cmd_preview);
    registry.register("arrange", output::cmd_arrange);
    registry.register("export", output::cmd_export);
    registry.register("save", output::cmd_save);
    registry.register("load", output::cmd_load);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("watch", general::cmd_watch);

    registry
}
