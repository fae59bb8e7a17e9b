//! `returns` command: narrows a saved return-book table the way the page's filter box does.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use catalog_core::{row_visibility, ReturnRow};
use catalog_logging::catalog_info;

use super::ui::constants::COLUMN_SEPARATOR;

pub fn load_rows(path: &Path) -> Result<Vec<ReturnRow>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading rows from {}", path.display()))?;
    ron::from_str(&content).with_context(|| format!("parsing rows from {}", path.display()))
}

/// Rows that stay visible for `query`, in their original order.
pub fn visible_rows<'a>(rows: &'a [ReturnRow], query: &str) -> Vec<&'a ReturnRow> {
    rows.iter()
        .zip(row_visibility(rows, query))
        .filter_map(|(row, visible)| visible.then_some(row))
        .collect()
}

pub fn run_returns(rows_path: &Path, query: &str) -> Result<()> {
    let rows = load_rows(rows_path)?;
    let visible = visible_rows(&rows, query);
    catalog_info!("Return filter {:?}: {} of {} rows", query, visible.len(), rows.len());
    for row in visible {
        println!(
            "{}",
            [
                row.inventory_number.as_str(),
                &row.title,
                &row.author,
                &row.reader_name,
            ]
            .join(COLUMN_SEPARATOR)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ROWS: &str = r#"[
        (title: "Железният светилник", author: "Димитър Талев", reader_name: "Петя Колева", inventory_number: "INV-7"),
        (title: "Време разделно", author: "Антон Дончев", reader_name: "Иво Талев", inventory_number: "INV-8"),
        (title: "Тихият Дон", author: "Михаил Шолохов", reader_name: "Рада Ненова", inventory_number: "INV-9"),
    ]"#;

    #[test]
    fn filters_loaded_rows_keeping_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("returns.ron");
        fs::write(&path, ROWS).unwrap();

        let rows = load_rows(&path).unwrap();
        let titles: Vec<_> = visible_rows(&rows, "талев")
            .into_iter()
            .map(|row| row.title.as_str())
            .collect();
        assert_eq!(titles, ["Железният светилник", "Време разделно"]);
        assert_eq!(visible_rows(&rows, "").len(), 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_rows(&temp.path().join("none.ron")).unwrap_err();
        assert!(err.to_string().starts_with("reading rows from"));
    }
}
