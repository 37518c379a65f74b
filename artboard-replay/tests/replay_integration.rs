//! Replay Integration Tests
//!
//! Exercises the replay library against files on disk:
//! - Loading scenes, scripts and configs
//! - Gesture scripts producing commits
//! - Error reporting for bad inputs

use std::fs;
use std::path::PathBuf;

use artboard_replay::{load_editor_config, load_script, replay, run_replay, ReplayConfig, ReplayError, Step};
use tempfile::TempDir;

const SCENE: &str = r#"[
    {"id": "6f1c1f5e-8c1a-4c4e-9a57-0d7f4d3f2a10", "type": "rect", "x": 0, "y": 0, "width": 40, "height": 40},
    {"id": "0b9d3c2e-51f4-4c0e-8e0a-2b7f6b1c9d21", "type": "artboard", "x": 200, "y": 0, "width": 200, "height": 200, "title": "Frame"}
]"#;

const DRAG_INTO_ARTBOARD: &str = r#"[
    {"action": "down", "x": 20, "y": 20},
    {"action": "move", "x": 120, "y": 40, "modifiers": {"ctrl": true}},
    {"action": "move", "x": 260, "y": 60, "modifiers": {"ctrl": true}},
    {"action": "up"}
]"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn config(dir: &TempDir, script: &str) -> ReplayConfig {
    ReplayConfig {
        scene_path: write(dir, "scene.json", SCENE),
        script_path: write(dir, "script.json", script),
        config_path: None,
        output: None,
        pretty: false,
    }
}

// ============================================================================
// Gesture Scripts
// ============================================================================

#[test]
fn test_drag_script_moves_and_reparents() {
    let dir = TempDir::new().expect("temp dir");
    let report = run_replay(&config(&dir, DRAG_INTO_ARTBOARD)).expect("replay");

    assert_eq!(report.steps, 4);
    assert_eq!(report.history_len, 2);
    assert_eq!(report.cursor, 1);

    let rect = &report.scene.elements()[0];
    assert_eq!((rect.x, rect.y), (240.0, 40.0));
    assert_eq!(rect.parent_id, Some(report.scene.elements()[1].id));
    assert_eq!(report.selection.len(), 1);
}

#[test]
fn test_undo_step_restores_original_scene() {
    let dir = TempDir::new().expect("temp dir");
    let script = r#"[
        {"action": "down", "x": 20, "y": 20},
        {"action": "move", "x": 70, "y": 20, "modifiers": {"ctrl": true}},
        {"action": "up"},
        {"action": "undo"}
    ]"#;
    let report = run_replay(&config(&dir, script)).expect("replay");
    assert_eq!(report.history_len, 2);
    assert_eq!(report.cursor, 0);
    assert_eq!(report.scene.elements()[0].x, 0.0);
}

#[test]
fn test_open_gesture_is_closed_at_end() {
    let dir = TempDir::new().expect("temp dir");
    let script = r#"[
        {"action": "down", "x": 20, "y": 20},
        {"action": "move", "x": 30, "y": 20, "modifiers": {"ctrl": true}}
    ]"#;
    let report = run_replay(&config(&dir, script)).expect("replay");
    assert_eq!(report.history_len, 2);
    assert_eq!(report.scene.elements()[0].x, 10.0);
}

#[test]
fn test_document_steps() {
    let steps = vec![Step::SelectAll, Step::Copy, Step::Paste, Step::SendToBack, Step::Delete];
    let scene = artboard_core::Scene::from_json(SCENE).expect("scene");
    let report = replay(scene, artboard_core::EditorConfig::default(), &steps);

    // paste, send to back and delete each commit once
    assert_eq!(report.history_len, 4);
    assert_eq!(report.scene.len(), 2);
    assert!(report.selection.is_empty());
}

#[test]
fn test_report_json_uses_camel_case() {
    let dir = TempDir::new().expect("temp dir");
    let report = run_replay(&config(&dir, "[]")).expect("replay");
    let json = report.to_json(true).expect("json");
    assert!(json.contains("\"historyLen\": 1"));
    assert!(json.contains("\"cursor\": 0"));
}

// ============================================================================
// Input Errors
// ============================================================================

#[test]
fn test_missing_scene_file_reports_path() {
    let dir = TempDir::new().expect("temp dir");
    let mut cfg = config(&dir, "[]");
    cfg.scene_path = dir.path().join("missing.json");
    let err = run_replay(&cfg).expect_err("missing file");
    assert!(matches!(err, ReplayError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_bad_script_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "bad.json", r#"[{"action": "teleport"}]"#);
    assert!(matches!(load_script(&path), Err(ReplayError::Script { .. })));
}

#[test]
fn test_config_file_is_validated() {
    let dir = TempDir::new().expect("temp dir");
    let good = write(&dir, "good.json", r#"{"pasteOffset": 5}"#);
    let loaded = load_editor_config(Some(&good)).expect("valid config");
    assert!((loaded.paste_offset - 5.0).abs() < f64::EPSILON);

    let bad = write(&dir, "bad.json", r#"{"zoom": {"minScale": 0}}"#);
    assert!(matches!(load_editor_config(Some(&bad)), Err(ReplayError::Editor(_))));
    assert!(load_editor_config(None).is_ok());
}
