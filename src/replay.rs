//! アクションスクリプトのリプレイ
//!
//! JSON配列のアクションをセッションに順番に適用する。
//! 構造変更はビジー時間だけ待ってから完了させる（待ち時間なしも可）。

use crate::error::{Result, VariantGridError};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use variant_grid_common::{Action, Completion, Outcome, Session, StructuralOp, Ticket};

/// リプレイ設定
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// ビジー時間（None なら即時完了）
    pub busy_window: Option<Duration>,
    /// スピナーを表示
    pub show_progress: bool,
}

/// リプレイ結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub ignored: usize,
    /// (アクション番号, 理由)
    pub rejected: Vec<(usize, String)>,
    /// 構造変更の失敗でバナーに出たメッセージ
    pub banners: Vec<String>,
}

impl ReplayReport {
    /// 構造変更の完了結果を集計する
    pub fn record(&mut self, step: usize, completion: Completion) {
        match completion {
            Completion::Applied(_) => self.applied += 1,
            Completion::Failed(op) => self.banners.push(op.failure_message().to_string()),
            Completion::Stale => {
                tracing::warn!(step, "stale completion");
                self.ignored += 1;
            }
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "適用: {} / 無視: {} / 拒否: {} / エラー: {}",
            self.applied,
            self.ignored,
            self.rejected.len(),
            self.banners.len()
        )
    }
}

pub fn load_script(path: &Path) -> Result<Vec<Action>> {
    if !path.exists() {
        return Err(VariantGridError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Action::list_from_json(&content)
        .map_err(|e| VariantGridError::Script(format!("{}: {}", path.display(), e)))
}

/// ビジー時間だけ待つ（スピナー付き）
pub async fn wait_busy_window(op: StructuralOp, window: Option<Duration>, show_progress: bool) {
    let Some(window) = window else {
        return;
    };

    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(op.as_str().to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    } else {
        None
    };

    tokio::time::sleep(window).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
}

/// 保留中の構造変更を待って完了させる
pub async fn settle(session: &mut Session, ticket: Ticket, options: &ReplayOptions) -> Completion {
    if let Some(op) = session.status().pending() {
        wait_busy_window(op, options.busy_window, options.show_progress).await;
    }
    session.complete(ticket)
}

/// スクリプトを適用する
pub async fn run_script(session: &mut Session, actions: Vec<Action>, options: &ReplayOptions) -> ReplayReport {
    let mut report = ReplayReport::default();

    for (i, action) in actions.into_iter().enumerate() {
        let step = i + 1;
        tracing::debug!(step, ?action, "dispatch");

        match session.dispatch(action) {
            Ok(Outcome::Applied) => report.applied += 1,
            Ok(Outcome::Ignored) => report.ignored += 1,
            Ok(Outcome::Scheduled(ticket)) => {
                let completion = settle(session, ticket, options).await;
                report.record(step, completion);
            }
            Err(err) => {
                tracing::warn!(step, error = %err, "action rejected");
                report.rejected.push((step, err.to_string()));
            }
        }
    }

    report
}
