//! `state` subcommands driven through RunContext

use super::test_utils::{abs, ScriptedPrompter};
use dotstate::cli::{Commands, DialoguerPrompter, RunContext, StateCommands};
use dotstate::error::ApiError;
use dotstate::path::AbsPath;
use dotstate::system::{DryRunSystem, RealSystem, System};
use std::sync::Arc;
use tempfile::TempDir;

fn context(path: &AbsPath, force: bool) -> RunContext {
    let system: Arc<dyn System> = Arc::new(RealSystem);
    RunContext::from_parts(path.clone(), system, force, Box::new(DialoguerPrompter))
}

fn state(command: StateCommands) -> Commands {
    Commands::State { command }
}

fn set(ctx: &RunContext, bucket: &str, key: &str, value: &str) {
    let out = ctx
        .execute(&state(StateCommands::Set {
            bucket: bucket.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }))
        .unwrap();
    assert!(out.is_empty());
}

fn get(ctx: &RunContext, bucket: &str, key: &str) -> Vec<u8> {
    ctx.execute(&state(StateCommands::Get {
        bucket: bucket.to_string(),
        key: key.to_string(),
    }))
    .unwrap()
}

#[test]
fn test_set_get_delete() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&abs(&temp_dir, "state.db"), false);

    set(&ctx, "configState", "editor", "vim");
    assert_eq!(get(&ctx, "configState", "editor"), b"vim");

    ctx.execute(&state(StateCommands::Delete {
        bucket: "configState".to_string(),
        key: "editor".to_string(),
    }))
    .unwrap();
    assert!(get(&ctx, "configState", "editor").is_empty());
}

#[test]
fn test_read_only_commands_do_not_create_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = abs(&temp_dir, "config/state.db");
    let ctx = context(&path, false);

    assert!(get(&ctx, "b", "k").is_empty());
    let out = ctx
        .execute(&state(StateCommands::Data {
            format: "json".to_string(),
        }))
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap().trim(), "{}");
    assert!(!path.as_path().exists());
}

#[test]
fn test_read_only_commands_leave_empty_directory_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = abs(&temp_dir, "state.db");
    std::fs::create_dir(path.as_path()).unwrap();
    let ctx = context(&path, false);

    assert!(get(&ctx, "b", "k").is_empty());
    let out = ctx
        .execute(&state(StateCommands::Dump {
            format: "json".to_string(),
        }))
        .unwrap();
    assert!(!out.is_empty());
    assert_eq!(std::fs::read_dir(path.as_path()).unwrap().count(), 0);
}

#[test]
fn test_data_prints_raw_buckets() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&abs(&temp_dir, "state.db"), false);
    set(&ctx, "b", "k", "v");
    set(&ctx, "a", "x", "y");

    let out = ctx
        .execute(&state(StateCommands::Data {
            format: "json".to_string(),
        }))
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({ "a": { "x": "y" }, "b": { "k": "v" } })
    );

    let out = ctx
        .execute(&state(StateCommands::Data {
            format: "yaml".to_string(),
        }))
        .unwrap();
    let parsed: serde_yaml::Value = serde_yaml::from_slice(&out).unwrap();
    assert_eq!(parsed["b"]["k"], serde_yaml::Value::from("v"));
}

#[test]
fn test_dump_decodes_well_known_buckets() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&abs(&temp_dir, "state.db"), false);
    set(&ctx, "configState", "settings", r#"{"color":true}"#);
    set(&ctx, "scratch", "k", "v");

    let out = ctx
        .execute(&state(StateCommands::Dump {
            format: "json".to_string(),
        }))
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({
            "configState": { "settings": { "color": true } },
            "entryState": {},
            "scriptState": {}
        })
    );
}

#[test]
fn test_invalid_format_is_an_error_with_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&abs(&temp_dir, "state.db"), false);

    let err = ctx
        .execute(&state(StateCommands::Dump {
            format: "xml".to_string(),
        }))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidFormat(ref f) if f == "xml"));
}

#[test]
fn test_reset_missing_store_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let path = abs(&temp_dir, "state.db");
    let prompter = ScriptedPrompter::answering("yes");
    let prompts = prompter.prompts.clone();
    let system: Arc<dyn System> = Arc::new(RealSystem);
    let ctx = RunContext::from_parts(path.clone(), system, false, Box::new(prompter));

    assert!(ctx.execute(&state(StateCommands::Reset)).unwrap().is_empty());
    assert!(prompts.lock().unwrap().is_empty());
    assert!(!path.as_path().exists());
}

fn populated_store(temp_dir: &TempDir) -> AbsPath {
    let path = abs(temp_dir, "state.db");
    set(&context(&path, false), "b", "k", "v");
    assert!(path.as_path().exists());
    path
}

#[test]
fn test_reset_answered_no_keeps_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = populated_store(&temp_dir);
    let prompter = ScriptedPrompter::answering("no");
    let prompts = prompter.prompts.clone();
    let system: Arc<dyn System> = Arc::new(RealSystem);
    let ctx = RunContext::from_parts(path.clone(), system, false, Box::new(prompter));

    assert!(ctx.execute(&state(StateCommands::Reset)).unwrap().is_empty());
    assert_eq!(*prompts.lock().unwrap(), vec![format!("Remove {}", path)]);
    assert!(path.as_path().exists());
    assert_eq!(get(&context(&path, false), "b", "k"), b"v");
}

#[test]
fn test_reset_answered_yes_removes_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = populated_store(&temp_dir);
    let system: Arc<dyn System> = Arc::new(RealSystem);
    let ctx = RunContext::from_parts(
        path.clone(),
        system,
        false,
        Box::new(ScriptedPrompter::answering("yes")),
    );

    ctx.execute(&state(StateCommands::Reset)).unwrap();
    assert!(!path.as_path().exists());
}

#[test]
fn test_forced_reset_removes_without_prompting() {
    let temp_dir = TempDir::new().unwrap();
    let path = populated_store(&temp_dir);
    let prompter = ScriptedPrompter::answering("no");
    let prompts = prompter.prompts.clone();
    let system: Arc<dyn System> = Arc::new(RealSystem);
    let ctx = RunContext::from_parts(path.clone(), system, true, Box::new(prompter));

    ctx.execute(&state(StateCommands::Reset)).unwrap();
    assert!(prompts.lock().unwrap().is_empty());
    assert!(!path.as_path().exists());
}

#[test]
fn test_dry_run_reset_keeps_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = populated_store(&temp_dir);
    let system: Arc<dyn System> = Arc::new(DryRunSystem::new(RealSystem));
    let ctx = RunContext::from_parts(
        path.clone(),
        system,
        true,
        Box::new(ScriptedPrompter::answering("yes")),
    );

    ctx.execute(&state(StateCommands::Reset)).unwrap();
    assert!(path.as_path().exists());
}
