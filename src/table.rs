//! グリッドのテキスト表示

use variant_grid_common::{Catalog, CatalogEntry, Grid, Session};

const EMPTY_CELL: &str = "+ Add Design";

/// セル表示: カタログにある画像は表示名、それ以外は参照そのまま
fn cell_text(cell: Option<&str>, catalog: &Catalog) -> String {
    match cell {
        Some(src) => catalog
            .find(src)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| src.to_string()),
        None => EMPTY_CELL.to_string(),
    }
}

fn row_heading(index: usize, label: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        format!("{} {}", index + 1, label)
    } else {
        format!("{} {} [{}]", index + 1, label, tags.join(", "))
    }
}

/// グリッドを罫線付きの表にする
pub fn render_grid(grid: &Grid, catalog: &Catalog) -> String {
    let mut lines: Vec<Vec<String>> = Vec::with_capacity(grid.row_count() + 1);

    let mut header = vec!["Filter".to_string()];
    header.extend(grid.columns().iter().cloned());
    lines.push(header);

    for (i, row) in grid.rows().iter().enumerate() {
        let mut line = vec![row_heading(i, &row.label, &row.tags)];
        line.extend(row.cells.iter().map(|c| cell_text(c.as_deref(), catalog)));
        lines.push(line);
    }

    let columns = grid.column_count() + 1;
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            lines
                .iter()
                .filter_map(|l| l.get(c))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");

    let mut out = String::new();
    for (n, line) in lines.iter().enumerate() {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(text, w)| format!(" {}{} ", text, " ".repeat(w - text.chars().count())))
            .collect();
        out.push_str(cells.join("|").trim_end());
        out.push('\n');
        if n == 0 {
            out.push_str(&separator);
            out.push('\n');
        }
    }
    if grid.row_count() == 0 {
        out.push_str(" (no states)\n");
    }
    out
}

/// カタログ検索結果
pub fn render_catalog(entries: &[&CatalogEntry]) -> String {
    if entries.is_empty() {
        return "No images found.\n".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{:>2}. {}  <{}>\n", i + 1, e.name, e.src))
        .collect()
}

/// ビジー・エラー表示込みのセッション全体
pub fn render_session(session: &Session) -> String {
    let mut out = String::new();
    if let Some(op) = session.status().pending() {
        out.push_str(&format!("⏳ {} ...\n", op.as_str()));
    }
    if let Some(error) = session.error() {
        out.push_str(&format!("⚠ {}\n", error));
    }
    out.push_str(&render_grid(session.grid(), session.catalog()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use variant_grid_common::{CellPos, StructuralOp};

    #[test]
    fn test_render_grid_header_and_rows() {
        let mut grid = Grid::empty(2, 2);
        grid.add_tag(0, "Sale").unwrap();
        let catalog = Catalog::builtin();
        grid.set_cell(CellPos::new(1, 0), catalog.entries()[1].src.clone()).unwrap();

        let text = render_grid(&grid, &catalog);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(" Filter"));
        assert!(lines[0].contains("Variant 2"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[2].contains("1 State 1 [Sale]"));
        assert!(lines[2].contains(EMPTY_CELL));
        assert!(lines[3].contains("Design 2"));
    }

    #[test]
    fn test_render_unknown_image_shows_reference() {
        let mut grid = Grid::empty(1, 1);
        grid.set_cell(CellPos::new(0, 0), "logo.jpg".into()).unwrap();
        let text = render_grid(&grid, &Catalog::builtin());
        assert!(text.contains("logo.jpg"));
    }

    #[test]
    fn test_render_empty_grid() {
        let text = render_grid(&Grid::empty(0, 0), &Catalog::builtin());
        assert!(text.contains("(no states)"));
    }

    #[test]
    fn test_render_catalog_empty_state() {
        assert_eq!(render_catalog(&[]), "No images found.\n");
        let catalog = Catalog::builtin();
        let text = render_catalog(&catalog.filter("design 1"));
        assert!(text.contains(" 1. Design 1"));
    }

    #[test]
    fn test_render_session_banners() {
        let mut session = Session::new(Grid::empty(1, 1), Catalog::builtin());
        let _ = session.request(StructuralOp::DeleteRow { index: 5 });
        session.request(StructuralOp::AddRow).unwrap();
        let text = render_session(&session);
        assert!(text.contains("add_row"));
        assert!(text.contains("Failed to delete state."));
    }
}
