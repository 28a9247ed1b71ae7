//! REPL (Read-Eval-Print Loop) for editing rhythm sequences

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::config::RhythmMemory;
use crate::render;
use crate::repl::watcher::FileWatcher;
use anyhow::Result;
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use notify::Event;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::path::Path;
use std::thread;

pub mod watcher;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Run one input line, mapping unknown input to an error
pub fn execute_line(registry: &CommandRegistry, ctx: &mut CommandContext, line: &str) -> CommandResult {
    match registry.execute(line, ctx) {
        CommandResult::NotACommand => {
            let word = line.split_whitespace().next().unwrap_or(line);
            CommandResult::Error(format!("Unknown command '{}' (try 'help')", word))
        }
        other => other,
    }
}

/// Print a command's output; returns false when the command asked to exit
pub fn print_result(result: &CommandResult) -> bool {
    match result {
        CommandResult::Success | CommandResult::NotACommand | CommandResult::Watch(_) => {}
        CommandResult::Message(msg) => println!("{}", msg),
        CommandResult::Error(e) => println!("{} {}", "Error:".bright_red().bold(), e.red()),
        CommandResult::Exit => return false,
    }
    true
}

/// Interactive REPL over a rhythm session
pub struct Repl {
    editor: Option<DefaultEditor>,
    ctx: CommandContext,
    registry: CommandRegistry,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,

    // File watcher
    watcher: Option<FileWatcher>,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(ctx: CommandContext) -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        let (tx_input, rx_input) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            ctx,
            registry: create_registry(),
            tx_input,
            rx_input,
            tx_watcher,
            rx_watcher,
            watcher: None,
        })
    }

    fn start_watching(&mut self, path: &Path) {
        if self.watcher.is_none() {
            match FileWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => {
                    println!("{} Failed to create watcher: {}", "Error:".red(), e);
                    return;
                }
            }
        }

        if let Some(w) = &mut self.watcher {
            match w.watch(path) {
                Ok(watched) => {
                    tracing::info!("Watching {}", watched.display());
                    println!(
                        "{} Watching {} for changes...",
                        "👀".bright_cyan(),
                        path.display().to_string().bright_green()
                    );
                }
                Err(e) => println!("{} Failed to watch {}: {}", "Error:".red(), path.display(), e),
            }
        }
    }

    fn reload(&mut self, path: &Path) {
        println!("{} File changed: {}", "⚡".bright_yellow(), path.display());
        match RhythmMemory::load(path, self.ctx.session.timeline().beats_per_bar) {
            Ok(memory) => {
                self.ctx.session.replace_memory(memory);
                tracing::info!("Reloaded {}", path.display());
                println!("{} Reloaded successfully", "✓".bright_green());
                println!("{}", render::listing(&self.ctx.session));
            }
            // Editors often write in several steps; keep the current session
            Err(e) => {
                tracing::warn!("Reload of {} failed: {:#}", path.display(), e);
                println!("{} {:#}", "Error:".red(), e);
            }
        }
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🥁".bright_yellow(),
            "Rhythmic Sequence Generator".bright_cyan().bold()
        );
        println!(
            "Try: {}, {}, {}",
            "list".cyan(),
            "set mode clusters".cyan(),
            "arrange 4".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );
        println!("{}", render::listing(&self.ctx.session));

        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow::anyhow!("REPL is already running"))?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "rhythmic>".bright_magenta().bold());
            let readline = editor.readline(&prompt);

            match readline {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if line.is_empty() {
                            continue;
                        }
                        let result = execute_line(&self.registry, &mut self.ctx, &line);
                        if let CommandResult::Watch(path) = &result {
                            self.start_watching(path);
                        }
                        if !print_result(&result) {
                            println!("{} 🥁", "Goodbye!".bright_cyan());
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted)))
                    | Ok(ReplEvent::Input(Err(ReadlineError::Eof))) => {
                        println!("{} 🥁", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(self.rx_watcher) -> msg => match msg {
                    Ok(Ok(event)) => {
                        let watched = self
                            .watcher
                            .as_ref()
                            .filter(|w| w.is_reload(&event))
                            .and_then(|w| w.watched().map(Path::to_path_buf));
                        if let Some(path) = watched {
                            self.reload(&path);
                        }
                    }
                    Ok(Err(e)) => println!("{} Watch error: {}", "Error:".red(), e),
                    Err(_) => break, // Channel closed
                }
            }
        }

        if let Some(w) = &mut self.watcher {
            let _ = w.unwatch();
        }
        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(ctx: CommandContext) -> Result<()> {
    let mut repl = Repl::new(ctx).map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}

/// Run `;`-separated commands without the REPL; stops at the first error
pub fn run_once(ctx: &mut CommandContext, script: &str) -> Result<()> {
    let registry = create_registry();
    for line in script.split(';').map(str::trim).filter(|l| !l.is_empty()) {
        let result = match execute_line(&registry, ctx, line) {
            CommandResult::Watch(_) => {
                CommandResult::Error("watch needs the interactive REPL".to_string())
            }
            other => other,
        };
        if let CommandResult::Error(e) = &result {
            anyhow::bail!("{}: {}", line, e);
        }
        if !print_result(&result) {
            break;
        }
    }
    Ok(())
}
