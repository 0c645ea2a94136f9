//! セッション操作のアクション定義
//!
//! CLIのリプレイでJSONから読み込み、`Session::dispatch` で適用する。

use crate::error::Result;
use crate::session::{Session, StructuralOp, Ticket};
use crate::types::CellPos;
use serde::{Deserialize, Serialize};

/// アクション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    AddRow,
    DeleteRow { index: usize },
    ReorderRow { from: usize, to: usize },
    AddColumn,
    DeleteColumn { index: usize },
    DragStart { index: usize },
    Drop { index: usize },
    DragEnd,
    AddTag { row: usize, text: String },
    EditTag { row: usize, tag: usize, text: String },
    DeleteTag { row: usize, tag: usize },
    OpenPicker { row: usize, column: usize },
    FilterCatalog { query: String },
    AssignImage { image: String },
    ClosePicker,
    DismissError,
}

/// `dispatch` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 状態が変わった
    Applied,
    /// 何もしなかった（空入力、未選択など）
    Ignored,
    /// 構造変更を受け付けた。`Session::complete` で適用する
    Scheduled(Ticket),
}

impl Outcome {
    fn from_changed(changed: bool) -> Self {
        if changed {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }
}

impl Action {
    /// 対応する構造変更（タグ・ピッカー操作は None）
    pub fn structural(&self) -> Option<StructuralOp> {
        match *self {
            Action::AddRow => Some(StructuralOp::AddRow),
            Action::DeleteRow { index } => Some(StructuralOp::DeleteRow { index }),
            Action::ReorderRow { from, to } => Some(StructuralOp::ReorderRow { from, to }),
            Action::AddColumn => Some(StructuralOp::AddColumn),
            Action::DeleteColumn { index } => Some(StructuralOp::DeleteColumn { index }),
            _ => None,
        }
    }

    /// JSON配列から読み込み
    pub fn list_from_json(json: &str) -> Result<Vec<Action>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Session {
    /// アクションを適用する
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        let outcome = match action {
            Action::AddRow
            | Action::DeleteRow { .. }
            | Action::ReorderRow { .. }
            | Action::AddColumn
            | Action::DeleteColumn { .. } => match action.structural() {
                Some(op) => self.schedule(op)?,
                None => Outcome::Ignored,
            },
            Action::DragStart { index } => {
                self.drag_start(index);
                Outcome::Applied
            }
            Action::Drop { index } => match self.drop_on(index)? {
                Some(ticket) => Outcome::Scheduled(ticket),
                None => Outcome::Ignored,
            },
            Action::DragEnd => {
                self.drag_end();
                Outcome::Applied
            }
            Action::AddTag { row, text } => Outcome::from_changed(self.add_tag(row, &text)?),
            Action::EditTag { row, tag, text } => Outcome::from_changed(self.edit_tag(row, tag, &text)?),
            Action::DeleteTag { row, tag } => {
                self.delete_tag(row, tag)?;
                Outcome::Applied
            }
            Action::OpenPicker { row, column } => {
                self.open_picker(CellPos::new(row, column))?;
                Outcome::Applied
            }
            Action::FilterCatalog { query } => {
                self.set_query(query);
                Outcome::Applied
            }
            Action::AssignImage { image } => Outcome::from_changed(self.assign_image(image)),
            Action::ClosePicker => {
                self.close_picker();
                Outcome::Applied
            }
            Action::DismissError => {
                self.dismiss_error();
                Outcome::Applied
            }
        };
        Ok(outcome)
    }

    /// 同じ位置への並べ替えはビジーにせず無視する
    fn schedule(&mut self, op: StructuralOp) -> Result<Outcome> {
        if let StructuralOp::ReorderRow { from, to } = op {
            if from == to {
                return Ok(Outcome::Ignored);
            }
        }
        Ok(Outcome::Scheduled(self.request(op)?))
    }
}
