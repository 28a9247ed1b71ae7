//! Sequence editing commands (show, list, select, add, remove, set, regen)

use crate::commands::{CommandContext, CommandResult};
use crate::render;
use colored::*;

fn show_current(ctx: &CommandContext) -> String {
    let session = &ctx.session;
    render::details(
        session.selected_index(),
        session.current(),
        session.current_sequence(),
    )
}

/// Handle `show` command
pub fn cmd_show(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(show_current(ctx))
}

/// Handle `list` command
pub fn cmd_list(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(render::listing(&ctx.session))
}

/// Handle `select <n>` command (1-based)
pub fn cmd_select(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let index = match args.parse::<usize>() {
        Ok(n) if n >= 1 => n - 1,
        _ => return CommandResult::Error("Usage: select <n>".to_string()),
    };
    match ctx.session.select(index) {
        Ok(()) => CommandResult::Message(show_current(ctx)),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `add` command
pub fn cmd_add(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.session.add_sequence() {
        Ok(index) => CommandResult::Message(
            format!("➕ Added sequence {}", index + 1)
                .bright_green()
                .to_string(),
        ),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `remove` command
pub fn cmd_remove(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let removed = ctx.session.selected_index() + 1;
    if ctx.session.remove_sequence() {
        CommandResult::Message(format!("Removed sequence {}", removed))
    } else {
        CommandResult::Error("Cannot remove the last sequence".to_string())
    }
}

/// Handle `set <field> <value>` command
pub fn cmd_set(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some((field, value)) = args.split_once(char::is_whitespace) else {
        return CommandResult::Error("Usage: set <field> <value>".to_string());
    };
    match ctx.session.set(field, value) {
        Ok(()) => CommandResult::Message(show_current(ctx)),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `regen` command
pub fn cmd_regen(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let seed = ctx.session.regenerate();
    CommandResult::Message(format!(
        "🎲 Seed {}: {}",
        seed,
        ctx.session.current_sequence()
    ))
}
