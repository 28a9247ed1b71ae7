use anyhow::{bail, Result};
use rhythmic::commands::CommandContext;
use rhythmic::config::{default_memory_path, RhythmMemory};
use rhythmic::repl;
use rhythmic::RhythmSession;
use rhythmic_core::Timeline;
use std::env;
use std::path::PathBuf;

/// Split `--memory <path>` out of the arguments; the rest form a one-shot script
fn parse_args(args: &[String]) -> Result<(Option<PathBuf>, Vec<String>)> {
    let mut memory = None;
    let mut rest = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--memory" {
            match iter.next() {
                Some(path) => memory = Some(PathBuf::from(path)),
                None => bail!("--memory needs a path"),
            }
        } else if let Some(path) = arg.strip_prefix("--memory=") {
            memory = Some(PathBuf::from(path));
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((memory, rest))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (memory_path, script) = parse_args(&args)?;
    let memory_path = memory_path.unwrap_or_else(default_memory_path);

    let timeline = Timeline::default();
    let memory = RhythmMemory::load_or_fresh(&memory_path, timeline.beats_per_bar);
    let mut ctx = CommandContext::new(RhythmSession::new(memory, timeline), memory_path);

    if script.is_empty() {
        repl::start(ctx)
    } else {
        repl::run_once(&mut ctx, &script.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_memory_flag_is_split_out() {
        let (memory, rest) =
            parse_args(&args(&["rhythmic", "--memory", "beats.json", "list"])).unwrap();
        assert_eq!(memory, Some(PathBuf::from("beats.json")));
        assert_eq!(rest, vec!["list".to_string()]);

        let (memory, _) = parse_args(&args(&["rhythmic", "--memory=x.json"])).unwrap();
        assert_eq!(memory, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn test_memory_flag_needs_value() {
        assert!(parse_args(&args(&["rhythmic", "--memory"])).is_err());
    }
}
