//! リプレイテスト
//!
//! スクリプトの読み込みと適用を検証（ビジー待ちなし）

use tempfile::tempdir;
use variant_grid::error::VariantGridError;
use variant_grid::replay::{load_script, run_script, ReplayOptions, ReplayReport};
use variant_grid_common::{Action, Catalog, CellPos, Completion, Grid, Session, StructuralOp};

fn session_3x4() -> Session {
    Session::new(Grid::empty(3, 4), Catalog::builtin())
}

#[tokio::test]
async fn test_replay_script() {
    let script = r#"[
        {"action": "addRow"},
        {"action": "addTag", "row": 3, "text": "Sale"},
        {"action": "addTag", "row": 3, "text": ""},
        {"action": "dragStart", "index": 3},
        {"action": "drop", "index": 0},
        {"action": "openPicker", "row": 0, "column": 1},
        {"action": "filterCatalog", "query": "DESIGN 5"},
        {"action": "assignImage", "image": "https://placehold.co/150x150?text=Design+5"},
        {"action": "addColumn"},
        {"action": "deleteColumn", "index": 0}
    ]"#;
    let actions = Action::list_from_json(script).unwrap();
    let mut session = session_3x4();

    let report = run_script(&mut session, actions, &ReplayOptions::default()).await;

    assert_eq!(report.ignored, 1);
    assert!(report.rejected.is_empty());
    assert!(report.banners.is_empty());
    assert_eq!(report.applied, 9);

    let grid = session.grid();
    assert_eq!(grid.row_count(), 4);
    assert_eq!(grid.column_count(), 4);
    assert_eq!(grid.rows()[0].label, "State 4");
    assert_eq!(grid.rows()[0].tags, vec!["Sale".to_string()]);
    // 列0を削除したので (0, 1) の画像は (0, 0) へ
    assert_eq!(
        grid.cell(CellPos::new(0, 0)),
        Some("https://placehold.co/150x150?text=Design+5")
    );
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_replay_reports_rejections() {
    let actions = vec![
        Action::DeleteRow { index: 7 },
        Action::DeleteTag { row: 0, tag: 0 },
        Action::AddRow,
    ];
    let mut session = session_3x4();

    let report = run_script(&mut session, actions, &ReplayOptions::default()).await;

    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.rejected[0].0, 1);
    assert_eq!(report.rejected[1].0, 2);
    assert_eq!(report.applied, 1);
    assert_eq!(session.grid().row_count(), 4);
    // 範囲外の削除でバナーが残る
    assert_eq!(session.error(), Some("Failed to delete state. Please try again."));
    assert!(report.summary().contains("拒否: 2"));
}

#[tokio::test]
async fn test_replay_with_busy_window() {
    let options = ReplayOptions {
        busy_window: Some(std::time::Duration::from_millis(1)),
        show_progress: false,
    };
    let mut session = session_3x4();
    let report = run_script(&mut session, vec![Action::AddColumn, Action::AddColumn], &options).await;
    assert_eq!(report.applied, 2);
    assert_eq!(session.grid().column_count(), 6);
}

#[test]
fn test_load_script_missing_file() {
    let result = load_script(std::path::Path::new("/nonexistent/script.json"));
    assert!(matches!(result, Err(VariantGridError::FileNotFound(_))));
}

#[test]
fn test_load_script_invalid() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("script.json");
    std::fs::write(&path, r#"[{"action": "launch"}]"#).unwrap();

    let result = load_script(&path);
    assert!(matches!(result, Err(VariantGridError::Script(_))));
}

#[test]
fn test_load_script() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("script.json");
    std::fs::write(&path, r#"[{"action": "addRow"}, {"action": "dismissError"}]"#).unwrap();

    let actions = load_script(&path).unwrap();
    assert_eq!(actions, vec![Action::AddRow, Action::DismissError]);
}

/// 完了結果の集計。一致しないチケットはバナーに出さない
#[test]
fn test_report_records_completions() {
    let mut report = ReplayReport::default();
    report.record(1, Completion::Applied(StructuralOp::AddRow));
    report.record(2, Completion::Failed(StructuralOp::DeleteColumn { index: 9 }));
    report.record(3, Completion::Stale);

    assert_eq!(report.applied, 1);
    assert_eq!(report.ignored, 1);
    assert_eq!(report.banners, vec!["Failed to delete variant. Please try again.".to_string()]);
    assert!(report.banners.iter().all(|b| !b.is_empty()));
}

/// 同じ位置への並べ替えはビジーにならず無視される
#[tokio::test]
async fn test_replay_reorder_onto_itself() {
    let actions = Action::list_from_json(r#"[{"action": "reorderRow", "from": 1, "to": 1}]"#).unwrap();
    let mut session = session_3x4();
    let before = session.grid().clone();

    let report = run_script(&mut session, actions, &ReplayOptions::default()).await;

    assert_eq!(report.ignored, 1);
    assert_eq!(report.applied, 0);
    assert!(!session.is_busy());
    assert_eq!(session.grid(), &before);
}
