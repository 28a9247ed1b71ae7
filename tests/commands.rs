use rhythmic::commands::{create_registry, CommandContext, CommandResult};
use rhythmic::config::RhythmMemory;
use rhythmic::repl::{execute_line, run_once};
use rhythmic::RhythmSession;
use rhythmic_core::Timeline;
use std::path::PathBuf;

fn context(memory_path: PathBuf) -> CommandContext {
    let mut memory = RhythmMemory::fresh(4);
    memory.sequences[0].seed = 7;
    CommandContext::new(
        RhythmSession::new(memory, Timeline::new(24, 4, 6)),
        memory_path,
    )
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rhythmic-{}-{}", std::process::id(), name))
}

#[test]
fn test_set_and_show() {
    let registry = create_registry();
    let mut ctx = context(temp_path("unused.json"));

    let result = execute_line(&registry, &mut ctx, "set mode accents");
    assert!(matches!(result, CommandResult::Message(_)));
    assert_eq!(ctx.session.current().mode.name(), "accents");

    let result = execute_line(&registry, &mut ctx, "set steps");
    assert!(matches!(result, CommandResult::Error(_)));
}

#[test]
fn test_select_is_one_based() {
    let registry = create_registry();
    let mut ctx = context(temp_path("unused.json"));
    execute_line(&registry, &mut ctx, "add");
    assert_eq!(ctx.session.selected_index(), 1);

    execute_line(&registry, &mut ctx, "select 1");
    assert_eq!(ctx.session.selected_index(), 0);
    assert!(matches!(
        execute_line(&registry, &mut ctx, "select 0"),
        CommandResult::Error(_)
    ));
    assert!(matches!(
        execute_line(&registry, &mut ctx, "select 9"),
        CommandResult::Error(_)
    ));
}

#[test]
fn test_remove_keeps_last_sequence() {
    let registry = create_registry();
    let mut ctx = context(temp_path("unused.json"));
    assert!(matches!(
        execute_line(&registry, &mut ctx, "remove"),
        CommandResult::Error(_)
    ));
    assert_eq!(ctx.session.len(), 1);
}

#[test]
fn test_unknown_command() {
    let registry = create_registry();
    let mut ctx = context(temp_path("unused.json"));
    match execute_line(&registry, &mut ctx, "dance now") {
        CommandResult::Error(e) => assert!(e.contains("dance")),
        other => panic!("expected error, got {:?}", other),
    }
}

#[test]
fn test_quit_and_watch() {
    let registry = create_registry();
    let path = temp_path("watched.json");
    let mut ctx = context(path.clone());
    assert_eq!(execute_line(&registry, &mut ctx, "quit"), CommandResult::Exit);
    assert_eq!(execute_line(&registry, &mut ctx, "exit"), CommandResult::Exit);
    assert_eq!(
        execute_line(&registry, &mut ctx, "watch"),
        CommandResult::Watch(path)
    );
}

#[test]
fn test_preview_and_arrange_bounds() {
    let registry = create_registry();
    let mut ctx = context(temp_path("unused.json"));
    assert!(matches!(
        execute_line(&registry, &mut ctx, "preview 2"),
        CommandResult::Message(_)
    ));
    assert!(matches!(
        execute_line(&registry, &mut ctx, "preview 0"),
        CommandResult::Error(_)
    ));
    assert!(matches!(
        execute_line(&registry, &mut ctx, "preview 256"),
        CommandResult::Message(_)
    ));
    for bar in ["257", "100000000000000000", "18446744073709551615"] {
        assert!(matches!(
            execute_line(&registry, &mut ctx, &format!("preview {}", bar)),
            CommandResult::Error(_)
        ));
    }
    assert!(matches!(
        execute_line(&registry, &mut ctx, "arrange 4"),
        CommandResult::Message(_)
    ));
    assert!(matches!(
        execute_line(&registry, &mut ctx, "arrange 0"),
        CommandResult::Error(_)
    ));
}

#[test]
fn test_save_then_load_round_trip() {
    let path = temp_path("memory.json");
    let mut ctx = context(path.clone());
    run_once(&mut ctx, "set mode mirrored; set density 0.75; add; set pitch 40; save").unwrap();

    let mut other = context(path.clone());
    run_once(&mut other, "load").unwrap();
    assert_eq!(other.session.memory(), ctx.session.memory());
    assert_eq!(other.session.len(), 2);
    assert_eq!(other.session.memory().sequences[1].pitch, 40);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_export_writes_arrangement() {
    let path = temp_path("arrangement.json");
    let mut ctx = context(temp_path("unused.json"));
    run_once(&mut ctx, &format!("set bars 2; export {}", path.display())).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["barAmount"], 2);
    assert_eq!(json["partsPerBar"], 96);
    assert_eq!(json["channels"]["0"].as_array().unwrap().len(), 2);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_one_shot_stops_at_error() {
    let mut ctx = context(temp_path("unused.json"));
    let err = run_once(&mut ctx, "set steps 8; set mode polka; set steps 12").unwrap_err();
    assert!(err.to_string().contains("polka"));
    assert_eq!(ctx.session.current().steps, 8);
}

#[test]
fn test_one_shot_rejects_watch() {
    let mut ctx = context(temp_path("unused.json"));
    assert!(run_once(&mut ctx, "watch").is_err());
}

#[test]
fn test_load_without_sequences_starts_fresh_for_the_bar() {
    let path = temp_path("empty-memory.json");
    std::fs::write(&path, r#"{"sequences": [], "barAmount": 3}"#).unwrap();

    let mut ctx = context(path.clone());
    run_once(&mut ctx, "load").unwrap();
    assert_eq!(ctx.session.len(), 1);
    // four steps per beat of the 4/4 timeline
    assert_eq!(ctx.session.current().steps, 16);
    assert_eq!(ctx.session.memory().bar_amount, 3);

    std::fs::remove_file(&path).unwrap();
}
