//! 対話式編集モジュール
//!
//! メニューから操作を選び、必要な行・列・タグ・文字列を順に入力する。
//! 文字入力は空またはキャンセル（Esc）で何もしない。
//! セッションは保存しない。

use crate::error::Result;
use crate::replay::{settle, ReplayOptions};
use crate::table::{render_catalog, render_session};
use dialoguer::{Input, Select};
use variant_grid_common::{CellPos, Completion, Session, StructuralOp};

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    AddState,
    DeleteState,
    MoveState,
    AddVariant,
    DeleteVariant,
    AddTag,
    EditTag,
    DeleteTag,
    LinkDesign,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 10] = [
        MenuItem::AddState,
        MenuItem::DeleteState,
        MenuItem::MoveState,
        MenuItem::AddVariant,
        MenuItem::DeleteVariant,
        MenuItem::AddTag,
        MenuItem::EditTag,
        MenuItem::DeleteTag,
        MenuItem::LinkDesign,
        MenuItem::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::AddState => "Add State",
            MenuItem::DeleteState => "Delete State",
            MenuItem::MoveState => "Move State",
            MenuItem::AddVariant => "Add Variant",
            MenuItem::DeleteVariant => "Delete Variant",
            MenuItem::AddTag => "Add Tag",
            MenuItem::EditTag => "Edit Tag",
            MenuItem::DeleteTag => "Delete Tag",
            MenuItem::LinkDesign => "Link Design",
            MenuItem::Quit => "Quit",
        }
    }

    /// 現在のグリッドで選択できるか
    pub fn is_available(&self, session: &Session) -> bool {
        let grid = session.grid();
        let has_tags = grid.rows().iter().any(|r| !r.tags.is_empty());
        match self {
            MenuItem::DeleteState | MenuItem::AddTag => grid.row_count() > 0,
            MenuItem::MoveState => grid.row_count() > 1,
            MenuItem::DeleteVariant => grid.column_count() > 0,
            MenuItem::EditTag | MenuItem::DeleteTag => has_tags,
            MenuItem::LinkDesign => grid.row_count() > 0 && grid.column_count() > 0,
            MenuItem::AddState | MenuItem::AddVariant | MenuItem::Quit => true,
        }
    }
}

/// 行を選択（Esc で None）
fn pick_row(session: &Session, prompt: &str) -> Result<Option<usize>> {
    let labels: Vec<String> = session
        .grid()
        .rows()
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{} {}", i + 1, r.label))
        .collect();
    Ok(Select::new().with_prompt(prompt).items(&labels).default(0).interact_opt()?)
}

/// 列を選択（Esc で None）
fn pick_column(session: &Session, prompt: &str) -> Result<Option<usize>> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(session.grid().columns())
        .default(0)
        .interact_opt()?)
}

/// タグを持つ行からタグを選択
fn pick_tag(session: &Session, prompt: &str) -> Result<Option<(usize, usize)>> {
    let choices: Vec<(usize, usize, String)> = session
        .grid()
        .rows()
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.tags
                .iter()
                .enumerate()
                .map(move |(t, tag)| (r, t, format!("{} {}: {}", r + 1, row.label, tag)))
        })
        .collect();
    let labels: Vec<&str> = choices.iter().map(|(_, _, l)| l.as_str()).collect();
    let picked = Select::new().with_prompt(prompt).items(&labels).default(0).interact_opt()?;
    Ok(picked.map(|i| (choices[i].0, choices[i].1)))
}

/// 文字列入力（空なら None）
fn prompt_text(prompt: &str, initial: &str) -> Result<Option<String>> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

async fn run_structural(session: &mut Session, op: StructuralOp, options: &ReplayOptions) {
    match session.request(op) {
        Ok(ticket) => {
            if let Completion::Failed(_) = settle(session, ticket, options).await {
                tracing::warn!(op = op.as_str(), "operation failed");
            }
        }
        Err(err) => tracing::warn!(op = op.as_str(), error = %err, "operation rejected"),
    }
}

/// 画像ピッカー: 検索語を入力して一覧から選ぶ
/// 検索結果が空のときの選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoMatch {
    SearchAgain,
    Close,
}

impl NoMatch {
    const ALL: [NoMatch; 2] = [NoMatch::SearchAgain, NoMatch::Close];

    fn label(self) -> &'static str {
        match self {
            NoMatch::SearchAgain => "Search again",
            NoMatch::Close => "Close",
        }
    }
}

/// 検索結果が空のときの選択を反映する。Escは閉じる扱い。閉じたら true
fn resolve_no_match(session: &mut Session, choice: Option<usize>) -> bool {
    let picked = choice
        .and_then(|i| NoMatch::ALL.get(i).copied())
        .unwrap_or(NoMatch::Close);
    match picked {
        NoMatch::SearchAgain => false,
        NoMatch::Close => {
            session.close_picker();
            true
        }
    }
}

fn link_design(session: &mut Session, pos: CellPos) -> Result<()> {
    session.open_picker(pos)?;
    println!("Select a Design to Link");

    loop {
        let query: String = Input::new()
            .with_prompt("Search designs")
            .with_initial_text(session.picker().query())
            .allow_empty(true)
            .interact_text()?;
        session.set_query(query);

        let entries: Vec<(String, String)> = session
            .filtered_catalog()
            .iter()
            .map(|e| (e.src.clone(), e.name.clone()))
            .collect();
        if entries.is_empty() {
            print!("{}", render_catalog(&[]));
            let labels: Vec<&str> = NoMatch::ALL.iter().map(|c| c.label()).collect();
            let choice = Select::new()
                .with_prompt("Esc: close")
                .items(&labels)
                .default(0)
                .interact_opt()?;
            if resolve_no_match(session, choice) {
                return Ok(());
            }
            continue;
        }

        let names: Vec<&str> = entries.iter().map(|(_, name)| name.as_str()).collect();
        let picked = Select::new()
            .with_prompt("Insert (Esc: close)")
            .items(&names)
            .default(0)
            .interact_opt()?;

        match picked {
            Some(i) => {
                session.assign_image(entries[i].0.clone());
            }
            None => session.close_picker(),
        }
        return Ok(());
    }
}

/// 対話式編集を実行
pub async fn run_interactive(session: &mut Session, options: &ReplayOptions) -> Result<()> {
    println!("Product Variant Table\n");

    loop {
        print!("{}", render_session(session));
        if session.error().is_some() {
            session.dismiss_error();
        }
        println!();

        let items: Vec<MenuItem> = MenuItem::ALL
            .iter()
            .copied()
            .filter(|m| m.is_available(session))
            .collect();
        let labels: Vec<&str> = items.iter().map(|m| m.label()).collect();
        let Some(choice) = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        match items[choice] {
            MenuItem::AddState => run_structural(session, StructuralOp::AddRow, options).await,
            MenuItem::AddVariant => run_structural(session, StructuralOp::AddColumn, options).await,
            MenuItem::DeleteState => {
                if let Some(index) = pick_row(session, "削除する行")? {
                    run_structural(session, StructuralOp::DeleteRow { index }, options).await;
                }
            }
            MenuItem::DeleteVariant => {
                if let Some(index) = pick_column(session, "削除する列")? {
                    run_structural(session, StructuralOp::DeleteColumn { index }, options).await;
                }
            }
            MenuItem::MoveState => {
                let Some(from) = pick_row(session, "移動する行")? else {
                    continue;
                };
                session.drag_start(from);
                match pick_row(session, "移動先")? {
                    Some(to) => match session.drop_on(to) {
                        Ok(Some(ticket)) => {
                            settle(session, ticket, options).await;
                        }
                        Ok(None) => {}
                        Err(err) => tracing::warn!(error = %err, "reorder rejected"),
                    },
                    None => session.drag_end(),
                }
            }
            MenuItem::AddTag => {
                if let Some(row) = pick_row(session, "タグを追加する行")? {
                    session.begin_add_tag(row)?;
                    match prompt_text("Enter tag name", "")? {
                        Some(text) => {
                            session.set_tag_draft(text);
                            session.confirm_tag()?;
                        }
                        None => session.cancel_tag(),
                    }
                }
            }
            MenuItem::EditTag => {
                if let Some((row, tag)) = pick_tag(session, "編集するタグ")? {
                    session.begin_edit_tag(row, tag)?;
                    let current = session.tag_draft().map(|d| d.text.clone()).unwrap_or_default();
                    match prompt_text("Edit tag name", &current)? {
                        Some(text) => {
                            session.set_tag_draft(text);
                            session.confirm_tag()?;
                        }
                        None => session.cancel_tag(),
                    }
                }
            }
            MenuItem::DeleteTag => {
                if let Some((row, tag)) = pick_tag(session, "削除するタグ")? {
                    session.delete_tag(row, tag)?;
                }
            }
            MenuItem::LinkDesign => {
                let Some(row) = pick_row(session, "行")? else {
                    continue;
                };
                let Some(column) = pick_column(session, "列")? else {
                    continue;
                };
                link_design(session, CellPos::new(row, column))?;
            }
            MenuItem::Quit => break,
        }
        println!();
    }

    Ok(())
}
