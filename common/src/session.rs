//! 編集セッション
//!
//! グリッド本体に加えて、UIの一時状態（ビジー/エラー、画像ピッカー、
//! ドラッグ中の行、タグ入力中の下書き）をまとめて保持する。
//!
//! 構造変更（行・列の追加/削除、並べ替え）は遅延完了で扱う:
//! `request` で受け付けてビジーにし、待ち時間の後に `complete` で適用する。
//! ビジー中の `request` は `Error::Busy` で拒否するため、
//! 2つの構造変更が同時に保留されることはない。

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{Error, Result};
use crate::types::{CellPos, Grid, GridSeed, ImageRef};
use serde::{Deserialize, Serialize};

/// UIでのビジー表示時間（ミリ秒）
pub const BUSY_WINDOW_MS: u32 = 500;

/// 構造変更
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum StructuralOp {
    AddRow,
    DeleteRow { index: usize },
    ReorderRow { from: usize, to: usize },
    AddColumn,
    DeleteColumn { index: usize },
}

impl StructuralOp {
    /// エラーバナーに出す汎用メッセージ
    pub fn failure_message(&self) -> &'static str {
        match self {
            StructuralOp::AddRow => "Failed to add state. Please try again.",
            StructuralOp::DeleteRow { .. } => "Failed to delete state. Please try again.",
            StructuralOp::ReorderRow { .. } => "Failed to reorder states. Please try again.",
            StructuralOp::AddColumn => "Failed to add variant. Please try again.",
            StructuralOp::DeleteColumn { .. } => "Failed to delete variant. Please try again.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StructuralOp::AddRow => "add_row",
            StructuralOp::DeleteRow { .. } => "delete_row",
            StructuralOp::ReorderRow { .. } => "reorder_row",
            StructuralOp::AddColumn => "add_column",
            StructuralOp::DeleteColumn { .. } => "delete_column",
        }
    }

    fn validate(&self, grid: &Grid) -> Result<()> {
        match *self {
            StructuralOp::AddRow | StructuralOp::AddColumn => Ok(()),
            StructuralOp::DeleteRow { index } => grid.check_row(index),
            StructuralOp::ReorderRow { from, to } => {
                grid.check_row(from)?;
                grid.check_row(to)
            }
            StructuralOp::DeleteColumn { index } => grid.check_column(index),
        }
    }

    /// 検証を先に済ませてから適用する（失敗時はグリッド不変）
    fn apply(&self, grid: &mut Grid) -> Result<()> {
        self.validate(grid)?;
        match *self {
            StructuralOp::AddRow => {
                grid.add_row();
            }
            StructuralOp::DeleteRow { index } => {
                grid.delete_row(index)?;
            }
            StructuralOp::ReorderRow { from, to } => {
                grid.reorder_row(from, to)?;
            }
            StructuralOp::AddColumn => {
                grid.add_column();
            }
            StructuralOp::DeleteColumn { index } => {
                grid.delete_column(index)?;
            }
        }
        Ok(())
    }
}

/// 保留中の構造変更を識別するチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// `complete` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied(StructuralOp),
    /// 適用に失敗（エラーバナーにメッセージを設定済み）
    Failed(StructuralOp),
    /// 保留中のチケットと一致しない
    Stale,
}

/// ビジー・エラー表示
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiStatus {
    pending: Option<(Ticket, StructuralOp)>,
    error: Option<String>,
}

impl UiStatus {
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<StructuralOp> {
        self.pending.map(|(_, op)| op)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// 画像ピッカー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Picker {
    target: Option<CellPos>,
    query: String,
}

impl Picker {
    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<CellPos> {
        self.target
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// タグ入力の対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTarget {
    New { row: usize },
    Existing { row: usize, tag: usize },
}

impl TagTarget {
    pub fn row(&self) -> usize {
        match *self {
            TagTarget::New { row } | TagTarget::Existing { row, .. } => row,
        }
    }
}

/// 入力中のタグ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    pub target: TagTarget,
    pub text: String,
}

/// 編集セッション
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    catalog: Catalog,
    status: UiStatus,
    picker: Picker,
    drag_from: Option<usize>,
    tag_draft: Option<TagDraft>,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        // 組み込みの初期値は常に形状が正しい
        let grid = Grid::from_seed(GridSeed::default()).unwrap_or_default();
        Self::new(grid, Catalog::builtin())
    }
}

impl Session {
    pub fn new(grid: Grid, catalog: Catalog) -> Self {
        Self {
            grid,
            catalog,
            status: UiStatus::default(),
            picker: Picker::default(),
            drag_from: None,
            tag_draft: None,
            next_ticket: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn status(&self) -> &UiStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn dragging(&self) -> Option<usize> {
        self.drag_from
    }

    pub fn tag_draft(&self) -> Option<&TagDraft> {
        self.tag_draft.as_ref()
    }

    // ---- 構造変更（遅延完了） ----

    /// 構造変更を受け付ける
    ///
    /// ビジー中は `Error::Busy`（状態は変えない）。
    /// インデックスが範囲外ならエラーバナーを設定して拒否する。
    pub fn request(&mut self, op: StructuralOp) -> Result<Ticket> {
        if let Some((_, pending)) = self.status.pending {
            tracing::warn!(op = op.as_str(), pending = pending.as_str(), "rejected while busy");
            return Err(Error::Busy);
        }
        if let Err(err) = op.validate(&self.grid) {
            tracing::warn!(op = op.as_str(), error = %err, "rejected");
            self.status.error = Some(op.failure_message().to_string());
            return Err(err);
        }

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.status.pending = Some((ticket, op));
        tracing::debug!(op = op.as_str(), ticket = ticket.0, "busy");
        Ok(ticket)
    }

    /// 保留中の構造変更を適用してビジーを解除する
    pub fn complete(&mut self, ticket: Ticket) -> Completion {
        let op = match self.status.pending {
            Some((pending, op)) if pending == ticket => op,
            _ => {
                tracing::debug!(ticket = ticket.0, "stale ticket ignored");
                return Completion::Stale;
            }
        };
        self.status.pending = None;

        // 行・列のインデックスが変わるため一時状態は破棄
        self.picker.target = None;
        self.drag_from = None;
        self.tag_draft = None;

        match op.apply(&mut self.grid) {
            Ok(()) => {
                tracing::debug!(op = op.as_str(), rows = self.grid.row_count(), columns = self.grid.column_count(), "applied");
                Completion::Applied(op)
            }
            Err(err) => {
                tracing::warn!(op = op.as_str(), error = %err, "failed");
                self.status.error = Some(op.failure_message().to_string());
                Completion::Failed(op)
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.status.error = None;
    }

    // ---- ドラッグ&ドロップ ----

    pub fn drag_start(&mut self, index: usize) {
        self.drag_from = Some(index);
    }

    pub fn drag_end(&mut self) {
        self.drag_from = None;
    }

    /// ドロップ先 `index` への並べ替えを受け付ける
    ///
    /// ドラッグ未開始または同じ行へのドロップは何もしない（`Ok(None)`）。
    pub fn drop_on(&mut self, index: usize) -> Result<Option<Ticket>> {
        let Some(from) = self.drag_from.take() else {
            return Ok(None);
        };
        if from == index {
            return Ok(None);
        }
        self.request(StructuralOp::ReorderRow { from, to: index }).map(Some)
    }

    // ---- タグ（同期） ----

    pub fn add_tag(&mut self, row: usize, text: &str) -> Result<bool> {
        self.grid.add_tag(row, text)
    }

    pub fn edit_tag(&mut self, row: usize, tag: usize, text: &str) -> Result<bool> {
        self.grid.edit_tag(row, tag, text)
    }

    pub fn delete_tag(&mut self, row: usize, tag: usize) -> Result<String> {
        let removed = self.grid.delete_tag(row, tag)?;
        // 編集中のタグが消えた/ずれた場合は下書きを破棄
        if matches!(self.tag_draft, Some(TagDraft { target: TagTarget::Existing { row: r, .. }, .. }) if r == row) {
            self.tag_draft = None;
        }
        Ok(removed)
    }

    pub fn begin_add_tag(&mut self, row: usize) -> Result<()> {
        self.grid.check_row(row)?;
        self.tag_draft = Some(TagDraft { target: TagTarget::New { row }, text: String::new() });
        Ok(())
    }

    /// 現在のタグ文字列を下書きに入れて編集開始
    pub fn begin_edit_tag(&mut self, row: usize, tag: usize) -> Result<()> {
        self.grid.check_row(row)?;
        let tags = &self.grid.rows()[row].tags;
        let text = tags
            .get(tag)
            .cloned()
            .ok_or(Error::TagOutOfRange { row, index: tag, len: tags.len() })?;
        self.tag_draft = Some(TagDraft { target: TagTarget::Existing { row, tag }, text });
        Ok(())
    }

    pub fn set_tag_draft(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.tag_draft.as_mut() {
            draft.text = text.into();
        }
    }

    /// 下書きを確定する。空文字なら何もしない（false）
    pub fn confirm_tag(&mut self) -> Result<bool> {
        let Some(draft) = self.tag_draft.take() else {
            return Ok(false);
        };
        match draft.target {
            TagTarget::New { row } => self.grid.add_tag(row, &draft.text),
            TagTarget::Existing { row, tag } => self.grid.edit_tag(row, tag, &draft.text),
        }
    }

    pub fn cancel_tag(&mut self) {
        self.tag_draft = None;
    }

    // ---- 画像ピッカー（同期） ----

    pub fn open_picker(&mut self, pos: CellPos) -> Result<()> {
        self.grid.check_cell(pos)?;
        self.picker.target = Some(pos);
        Ok(())
    }

    /// 対象セルを変更せずに閉じる。検索語は残す
    pub fn close_picker(&mut self) {
        self.picker.target = None;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.picker.query = query.into();
    }

    pub fn filtered_catalog(&self) -> Vec<&CatalogEntry> {
        self.catalog.filter(&self.picker.query)
    }

    /// 選択中のセルに画像を書き込みピッカーを閉じる
    ///
    /// セル未選択なら何もしない（false）。
    pub fn assign_image(&mut self, image: impl Into<ImageRef>) -> bool {
        let Some(pos) = self.picker.target.take() else {
            return false;
        };
        match self.grid.set_cell(pos, image.into()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(row = pos.row, column = pos.column, error = %err, "assign skipped");
                false
            }
        }
    }
}
