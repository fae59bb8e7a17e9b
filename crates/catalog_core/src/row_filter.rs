use serde::{Deserialize, Serialize};

/// A row of the statically rendered "return book" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRow {
    pub title: String,
    pub author: String,
    pub reader_name: String,
    pub inventory_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    needle: String,
}

impl RowFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn matches(&self, row: &ReturnRow) -> bool {
        [
            &row.title,
            &row.author,
            &row.reader_name,
            &row.inventory_number,
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// One flag per row, in row order: `true` keeps the row visible.
pub fn row_visibility(rows: &[ReturnRow], query: &str) -> Vec<bool> {
    let filter = RowFilter::new(query);
    rows.iter().map(|row| filter.matches(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, author: &str, reader: &str, inv: &str) -> ReturnRow {
        ReturnRow {
            title: title.into(),
            author: author.into(),
            reader_name: reader.into(),
            inventory_number: inv.into(),
        }
    }

    fn rows() -> Vec<ReturnRow> {
        vec![
            row("Под игото", "Иван Вазов", "Мария Петрова", "A-100"),
            row("Тютюн", "Димитър Димов", "Георги Иванов", "B-200"),
            row("Rust in Action", "Tim McNamara", "Ivan Petrov", "C-300"),
        ]
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        assert_eq!(row_visibility(&rows(), "ВАЗОВ"), vec![true, false, false]);
        assert_eq!(row_visibility(&rows(), "иванов"), vec![false, true, false]);
        assert_eq!(row_visibility(&rows(), "c-3"), vec![false, false, true]);
        assert_eq!(row_visibility(&rows(), "RUST"), vec![false, false, true]);
    }

    #[test]
    fn empty_query_shows_everything() {
        assert_eq!(row_visibility(&rows(), ""), vec![true, true, true]);
    }

    #[test]
    fn no_match_hides_everything() {
        assert_eq!(row_visibility(&rows(), "zzz"), vec![false, false, false]);
    }
}
