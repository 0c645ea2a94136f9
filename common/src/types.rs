//! グリッドの型定義
//!
//! 行（ステート）ごとにラベル・タグ・セルを1レコードにまとめて保持する。
//! 行の追加・削除・並べ替えはレコード単位で行うため、
//! タグやセルが行とずれることはない。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// セルに割り当てる画像の参照（URL or アセットパス）
pub type ImageRef = String;

/// 初期グリッドで使う画像
pub const DEFAULT_IMAGE: &str = "logo.jpg";

/// 行（ステート）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Row {
    pub label: String,
    pub tags: Vec<String>,
    pub cells: Vec<Option<ImageRef>>,
}

impl Row {
    /// 空セルのみの行
    pub fn empty(label: impl Into<String>, columns: usize) -> Self {
        Self {
            label: label.into(),
            tags: Vec::new(),
            cells: vec![None; columns],
        }
    }

    fn tag_index(&self, row: usize, tag: usize) -> Result<()> {
        if tag < self.tags.len() {
            Ok(())
        } else {
            Err(Error::TagOutOfRange { row, index: tag, len: self.tags.len() })
        }
    }
}

/// セル座標
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub column: usize,
}

impl CellPos {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// 初期値定義（設定ファイルから読み込み可能）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSeed {
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub variants: Vec<String>,
    /// 空なら全セル空
    #[serde(default)]
    pub cells: Vec<Vec<Option<ImageRef>>>,
    /// 空なら全行タグなし
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
}

impl Default for GridSeed {
    fn default() -> Self {
        let image = || Some(DEFAULT_IMAGE.to_string());
        Self {
            states: vec!["California".into(), "New York".into(), "Texas".into()],
            variants: (1..=4).map(|n| format!("Variant {}", n)).collect(),
            cells: vec![
                vec![image(), image(), image(), image()],
                vec![image(), image(), None, image()],
                vec![image(), image(), image(), image()],
            ],
            tags: Vec::new(),
        }
    }
}

/// バリアントグリッド
///
/// フィールドは非公開。変更は必ず下記の操作を通す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Grid {
    /// `rows` × `columns` の空グリッド（ラベルは自動採番）
    pub fn empty(rows: usize, columns: usize) -> Self {
        let columns: Vec<String> = (1..=columns).map(|n| format!("Variant {}", n)).collect();
        let rows = (1..=rows)
            .map(|n| Row::empty(format!("State {}", n), columns.len()))
            .collect();
        Self { columns, rows }
    }

    /// 初期値から構築（形状を検証）
    pub fn from_seed(seed: GridSeed) -> Result<Self> {
        let GridSeed { states, variants, cells, tags } = seed;

        if !cells.is_empty() && cells.len() != states.len() {
            return Err(Error::Shape(format!(
                "cells has {} rows but there are {} states",
                cells.len(),
                states.len()
            )));
        }
        if let Some((i, row)) = cells.iter().enumerate().find(|(_, r)| r.len() != variants.len()) {
            return Err(Error::Shape(format!(
                "cells row {} has {} cells but there are {} variants",
                i,
                row.len(),
                variants.len()
            )));
        }
        if !tags.is_empty() && tags.len() != states.len() {
            return Err(Error::Shape(format!(
                "tags has {} entries but there are {} states",
                tags.len(),
                states.len()
            )));
        }

        let mut cells = cells.into_iter();
        let mut tags = tags.into_iter();
        let rows = states
            .into_iter()
            .map(|label| Row {
                label,
                tags: tags.next().unwrap_or_default(),
                cells: cells.next().unwrap_or_else(|| vec![None; variants.len()]),
            })
            .collect();

        Ok(Self { columns: variants, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, pos: CellPos) -> Option<&str> {
        self.rows
            .get(pos.row)
            .and_then(|r| r.cells.get(pos.column))
            .and_then(|c| c.as_deref())
    }

    /// 全行のセル数が列数と一致するか
    pub fn is_consistent(&self) -> bool {
        self.rows.iter().all(|r| r.cells.len() == self.columns.len())
    }

    pub fn next_row_label(&self) -> String {
        format!("State {}", self.rows.len() + 1)
    }

    pub fn next_column_label(&self) -> String {
        format!("Variant {}", self.columns.len() + 1)
    }

    pub fn check_row(&self, index: usize) -> Result<()> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(Error::RowOutOfRange { index, len: self.rows.len() })
        }
    }

    pub fn check_column(&self, index: usize) -> Result<()> {
        if index < self.columns.len() {
            Ok(())
        } else {
            Err(Error::ColumnOutOfRange { index, len: self.columns.len() })
        }
    }

    pub fn check_cell(&self, pos: CellPos) -> Result<()> {
        self.check_row(pos.row)?;
        self.check_column(pos.column)
    }

    // ---- 行操作 ----

    /// 行を末尾に追加し、そのインデックスを返す
    pub fn add_row(&mut self) -> usize {
        let row = Row::empty(self.next_row_label(), self.columns.len());
        self.rows.push(row);
        self.rows.len() - 1
    }

    pub fn delete_row(&mut self, index: usize) -> Result<Row> {
        self.check_row(index)?;
        Ok(self.rows.remove(index))
    }

    /// `from` の行を取り出して `to` に挿入する。`from == to` は何もしない（false）
    pub fn reorder_row(&mut self, from: usize, to: usize) -> Result<bool> {
        self.check_row(from)?;
        self.check_row(to)?;
        if from == to {
            return Ok(false);
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        Ok(true)
    }

    // ---- 列操作 ----

    /// 列を末尾に追加し、そのインデックスを返す
    pub fn add_column(&mut self) -> usize {
        let label = self.next_column_label();
        self.columns.push(label);
        for row in &mut self.rows {
            row.cells.push(None);
        }
        self.columns.len() - 1
    }

    pub fn delete_column(&mut self, index: usize) -> Result<String> {
        self.check_column(index)?;
        for row in &mut self.rows {
            row.cells.remove(index);
        }
        Ok(self.columns.remove(index))
    }

    // ---- タグ操作 ----

    /// 空文字は追加しない（false）
    pub fn add_tag(&mut self, row: usize, text: &str) -> Result<bool> {
        self.check_row(row)?;
        if text.is_empty() {
            return Ok(false);
        }
        self.rows[row].tags.push(text.to_string());
        Ok(true)
    }

    /// 空文字は元のタグを残す（false）
    pub fn edit_tag(&mut self, row: usize, tag: usize, text: &str) -> Result<bool> {
        self.check_row(row)?;
        self.rows[row].tag_index(row, tag)?;
        if text.is_empty() {
            return Ok(false);
        }
        self.rows[row].tags[tag] = text.to_string();
        Ok(true)
    }

    pub fn delete_tag(&mut self, row: usize, tag: usize) -> Result<String> {
        self.check_row(row)?;
        self.rows[row].tag_index(row, tag)?;
        Ok(self.rows[row].tags.remove(tag))
    }

    // ---- セル ----

    pub fn set_cell(&mut self, pos: CellPos, image: ImageRef) -> Result<()> {
        self.check_cell(pos)?;
        self.rows[pos.row].cells[pos.column] = Some(image);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged_grid() -> Grid {
        let mut grid = Grid::empty(3, 4);
        for row in 0..3 {
            grid.add_tag(row, &format!("tag-{}", row)).unwrap();
            grid.set_cell(CellPos::new(row, row), format!("img-{}.jpg", row)).unwrap();
        }
        grid
    }

    #[test]
    fn test_empty_grid_shape() {
        let grid = Grid::empty(3, 4);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 4);
        assert!(grid.is_consistent());
        assert_eq!(grid.rows()[2].label, "State 3");
        assert_eq!(grid.columns()[3], "Variant 4");
        assert!(grid.rows().iter().flat_map(|r| &r.cells).all(|c| c.is_none()));
    }

    #[test]
    fn test_seed_default_matches_initial_values() {
        let grid = Grid::from_seed(GridSeed::default()).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.rows()[1].label, "New York");
        assert_eq!(grid.cell(CellPos::new(1, 2)), None);
        assert_eq!(grid.cell(CellPos::new(0, 0)), Some(DEFAULT_IMAGE));
        assert!(grid.rows().iter().all(|r| r.tags.is_empty()));
    }

    #[test]
    fn test_seed_without_cells_is_all_empty() {
        let seed = GridSeed {
            states: vec!["A".into(), "B".into()],
            variants: vec!["X".into()],
            cells: Vec::new(),
            tags: Vec::new(),
        };
        let grid = Grid::from_seed(seed).unwrap();
        assert!(grid.is_consistent());
        assert_eq!(grid.rows()[1].cells, vec![None]);
    }

    #[test]
    fn test_seed_shape_mismatch() {
        let seed = GridSeed {
            states: vec!["A".into()],
            variants: vec!["X".into(), "Y".into()],
            cells: vec![vec![None]],
            tags: Vec::new(),
        };
        assert!(matches!(Grid::from_seed(seed), Err(Error::Shape(_))));

        let seed = GridSeed {
            states: vec!["A".into(), "B".into()],
            variants: vec!["X".into()],
            cells: Vec::new(),
            tags: vec![vec!["only one".into()]],
        };
        assert!(matches!(Grid::from_seed(seed), Err(Error::Shape(_))));
    }

    fn seed_from_json(json: &str) -> Result<Grid> {
        let seed: GridSeed = serde_json::from_str(json)?;
        Grid::from_seed(seed)
    }

    #[test]
    fn test_seed_from_json() {
        let json = r#"{
            "states": ["Ohio"],
            "variants": ["Red", "Blue"],
            "cells": [[null, "blue.png"]],
            "tags": [["Sale"]]
        }"#;
        let grid = seed_from_json(json).unwrap();
        assert_eq!(grid.rows()[0].tags, vec!["Sale".to_string()]);
        assert_eq!(grid.cell(CellPos::new(0, 1)), Some("blue.png"));
    }

    /// 省略したフィールドは組み込みの初期値ではなく空になる
    #[test]
    fn test_partial_seed_from_json() {
        let grid = seed_from_json(r#"{"states": ["Ohio", "Utah"], "variants": ["Red"]}"#).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.columns(), ["Red".to_string()]);
        assert!(grid.is_consistent());
        assert!(grid.rows().iter().all(|r| r.tags.is_empty() && r.cells == vec![None]));

        let grid = seed_from_json(r#"{"states": ["A", "B"]}"#).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 0);
        assert!(grid.rows().iter().all(|r| r.cells.is_empty()));

        let grid = seed_from_json("{}").unwrap();
        assert_eq!(grid.row_count(), 0);
    }

    #[test]
    fn test_add_row_then_delete_restores() {
        let mut grid = tagged_grid();
        let before = grid.clone();
        let index = grid.add_row();
        assert_eq!(index, 3);
        assert_eq!(grid.rows()[3].label, "State 4");
        assert_eq!(grid.rows()[3].cells.len(), 4);
        assert!(grid.is_consistent());
        grid.delete_row(index).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_add_column_then_delete_restores() {
        let mut grid = tagged_grid();
        let before = grid.clone();
        let index = grid.add_column();
        assert_eq!(grid.columns()[index], "Variant 5");
        assert!(grid.rows().iter().all(|r| r.cells.len() == 5));
        grid.delete_column(index).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_delete_first_row_shifts_records() {
        let mut grid = tagged_grid();
        let former_second = grid.rows()[1].clone();
        grid.delete_row(0).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.rows()[0], former_second);
    }

    #[test]
    fn test_delete_column_removes_cell_from_every_row() {
        let mut grid = tagged_grid();
        let removed = grid.delete_column(1).unwrap();
        assert_eq!(removed, "Variant 2");
        assert!(grid.is_consistent());
        // 元の(1,1)の画像が消え、(2,2)は(2,1)に詰まる
        assert_eq!(grid.cell(CellPos::new(1, 1)), None);
        assert_eq!(grid.cell(CellPos::new(2, 1)), Some("img-2.jpg"));
    }

    #[test]
    fn test_reorder_round_trip_all_pairs() {
        let original = tagged_grid();
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    continue;
                }
                let mut grid = original.clone();
                assert!(grid.reorder_row(i, j).unwrap());
                assert_eq!(grid.rows()[j], original.rows()[i]);
                grid.reorder_row(j, i).unwrap();
                assert_eq!(grid, original, "reorder({}, {}) was not undone", i, j);
            }
        }
    }

    #[test]
    fn test_reorder_preserves_relative_order() {
        let mut grid = Grid::empty(4, 1);
        grid.reorder_row(0, 2).unwrap();
        let labels: Vec<&str> = grid.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["State 2", "State 3", "State 1", "State 4"]);
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let mut grid = tagged_grid();
        let before = grid.clone();
        assert!(!grid.reorder_row(1, 1).unwrap());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_out_of_range_is_rejected_without_mutation() {
        let mut grid = tagged_grid();
        let before = grid.clone();
        assert!(matches!(grid.delete_row(3), Err(Error::RowOutOfRange { index: 3, len: 3 })));
        assert!(matches!(grid.delete_column(9), Err(Error::ColumnOutOfRange { .. })));
        assert!(grid.reorder_row(0, 7).is_err());
        assert!(grid.set_cell(CellPos::new(0, 4), "x".into()).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_tags() {
        let mut grid = Grid::empty(3, 4);
        assert!(!grid.add_tag(0, "").unwrap());
        assert!(grid.rows()[0].tags.is_empty());

        assert!(grid.add_tag(0, "Sale").unwrap());
        assert_eq!(grid.rows()[0].tags, vec!["Sale".to_string()]);

        // 重複も許可
        assert!(grid.add_tag(0, "Sale").unwrap());
        assert_eq!(grid.rows()[0].tags.len(), 2);

        assert!(!grid.edit_tag(0, 1, "").unwrap());
        assert_eq!(grid.rows()[0].tags[1], "Sale");
        assert!(grid.edit_tag(0, 1, "New").unwrap());
        assert_eq!(grid.rows()[0].tags[1], "New");

        assert_eq!(grid.delete_tag(0, 0).unwrap(), "Sale");
        assert_eq!(grid.rows()[0].tags, vec!["New".to_string()]);
        assert!(matches!(grid.delete_tag(0, 5), Err(Error::TagOutOfRange { .. })));
        assert!(grid.rows()[1].tags.is_empty());
    }

    #[test]
    fn test_whitespace_tag_is_kept() {
        let mut grid = Grid::empty(1, 1);
        assert!(grid.add_tag(0, " ").unwrap());
        assert_eq!(grid.rows()[0].tags, vec![" ".to_string()]);
    }

    #[test]
    fn test_grid_serialize() {
        let grid = Grid::empty(1, 1);
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.contains("\"columns\":[\"Variant 1\"]"));
        assert!(json.contains("\"label\":\"State 1\""));
    }
}
