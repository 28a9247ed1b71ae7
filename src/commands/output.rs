//! Placement and persistence commands (preview, arrange, export, save, load)

use crate::commands::{CommandContext, CommandResult};
use crate::config::{RhythmMemory, MAX_BARS};
use crate::render;
use anyhow::Context;
use colored::*;

/// Handle `preview [bar]` command (1-based bar, at most `MAX_BARS`)
pub fn cmd_preview(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let bar = if args.is_empty() {
        0
    } else {
        match args.parse::<usize>() {
            Ok(n) if (1..=MAX_BARS).contains(&n) => n - 1,
            _ => {
                return CommandResult::Error(format!("Bar must be between 1 and {}", MAX_BARS))
            }
        }
    };
    let notes = ctx.session.preview(bar);
    let parts_per_bar = ctx.session.timeline().parts_per_bar();
    CommandResult::Message(format!(
        "{:>5} |{}|  {} note(s)",
        bar + 1,
        render::bar_lane(&notes, parts_per_bar),
        notes.len()
    ))
}

fn bar_count(args: &str, ctx: &CommandContext) -> Result<usize, String> {
    if args.is_empty() {
        return Ok(ctx.session.memory().bar_amount);
    }
    match args.parse::<usize>() {
        Ok(n) if (1..=MAX_BARS).contains(&n) => Ok(n),
        _ => Err(format!("Bar count must be between 1 and {}", MAX_BARS)),
    }
}

/// Handle `arrange [bars]` command
pub fn cmd_arrange(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match bar_count(args, ctx) {
        Ok(bars) => CommandResult::Message(render::arrangement(&ctx.session.arrange(bars))),
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `export <file>` command
pub fn cmd_export(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: export <file>".to_string());
    }
    let arrangement = ctx.session.arrange(ctx.session.memory().bar_amount);
    let written = serde_json::to_string_pretty(&arrangement)
        .context("Failed to serialize arrangement")
        .and_then(|json| {
            std::fs::write(args, json).with_context(|| format!("Failed to write {}", args))
        });
    match written {
        Ok(()) => {
            tracing::info!("Exported {} note(s) to {}", arrangement.note_count(), args);
            CommandResult::Message(
                format!("💾 Exported {} note(s) to {}", arrangement.note_count(), args)
                    .bright_green()
                    .to_string(),
            )
        }
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `save [file]` command
pub fn cmd_save(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let path = ctx.path_or_default(args);
    match ctx.session.memory().save(&path) {
        Ok(()) => CommandResult::Message(
            format!("💾 Saved {} sequence(s) to {}", ctx.session.len(), path.display())
                .bright_green()
                .to_string(),
        ),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `load [file]` command
pub fn cmd_load(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let path = ctx.path_or_default(args);
    match RhythmMemory::load(&path, ctx.session.timeline().beats_per_bar) {
        Ok(memory) => {
            ctx.session.replace_memory(memory);
            CommandResult::Message(render::listing(&ctx.session))
        }
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}
