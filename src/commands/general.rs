//! General REPL commands (help, quit, watch)

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use rhythmic_core::{RhythmComplexity, RhythmMode, RhythmStyle};

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `watch [file]` command; defaults to the memory file
pub fn cmd_watch(args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Watch(ctx.path_or_default(args))
}

fn names<T>(all: &[T], name: fn(&T) -> &'static str) -> String {
    all.iter().map(name).collect::<Vec<_>>().join(", ")
}

/// Print help information
fn print_help() {
    println!("{}", "🥁 Rhythmic Help".bold());
    println!("{}", "================".bold());
    println!();
    println!("{}", "Sequences:".green());
    println!("  {}                - Show the selected sequence", "show".cyan());
    println!("  {}                - List every sequence", "list".cyan());
    println!("  {}          - Select sequence n (1-based)", "select <n>".cyan());
    println!("  {}                 - Duplicate the selected sequence with a new seed", "add".cyan());
    println!("  {}              - Remove the selected sequence", "remove".cyan());
    println!("  {}               - Roll a new seed", "regen".cyan());
    println!();
    println!("{}", "Parameters:".green());
    println!("  {}  - Change a field of the selected sequence", "set <field> <value>".cyan());
    println!(
        "    fields: mode, steps, density, rotation, complexity, style, seed,"
    );
    println!("            channel, pitch, step (e.g. 1/4), invert, fading, bars");
    println!("    modes: {}", names(&RhythmMode::ALL, RhythmMode::name));
    println!(
        "    complexity: {}",
        names(&RhythmComplexity::ALL, RhythmComplexity::name)
    );
    println!("    style: {}", names(&RhythmStyle::ALL, RhythmStyle::name));
    println!();
    println!("{}", "Timeline:".green());
    println!("  {}     - Draw bar n of the selected sequence", "preview [bar]".cyan());
    println!("  {}    - Draw every sequence by channel", "arrange [bars]".cyan());
    println!("  {}    - Write the arrangement as JSON", "export <file>".cyan());
    println!();
    println!("{}", "Memory:".green());
    println!("  {}         - Save sequences", "save [file]".cyan());
    println!("  {}         - Load sequences", "load [file]".cyan());
    println!("  {}        - Reload when the file changes", "watch [file]".cyan());
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}              - Show this help", "help".bright_green());
    println!("  {}              - Exit the REPL", "quit".bright_red());
}
