use catalog_core::{AppViewModel, EditFormView, ItemRowView, Messages, PageControl, ResultsDisplay};

use super::constants::*;

/// Terminal lines for one frame of the listing page.
pub fn render(view: &AppViewModel, messages: &Messages) -> Vec<String> {
    let mut lines = Vec::new();

    let status = if view.loading { LOADING } else { "" };
    lines.push(format!("Search: {} {status}", view.input_text).trim_end().to_string());
    lines.push(format!("Location: {}", view.location));
    if !view.categories.is_empty() {
        lines.push(format!("Categories: {}", view.categories.join(", ")));
    }
    if let Some(notice) = &view.notice {
        lines.push(format!("* {notice}"));
    }

    match &view.display {
        ResultsDisplay::Default => {}
        ResultsDisplay::Empty { message } => lines.push(message.clone()),
        ResultsDisplay::Error { message } => lines.push(format!("! {message}")),
        ResultsDisplay::Table {
            rows,
            controls,
            total_items,
        } => {
            lines.push(messages.columns[..6].join(COLUMN_SEPARATOR));
            lines.extend(rows.iter().map(row_line));
            lines.push(format!("Total: {total_items}"));
            if !controls.is_empty() {
                lines.push(pagination_line(controls, messages));
            }
        }
    }

    if let Some(form) = &view.edit_form {
        lines.extend(form_lines(form));
    }

    lines
}

fn row_line(row: &ItemRowView) -> String {
    [
        row.id.as_str(),
        &row.title,
        &row.author,
        &row.category,
        &row.year,
        &row.availability_label,
    ]
    .join(COLUMN_SEPARATOR)
}

pub fn pagination_line(controls: &[PageControl], messages: &Messages) -> String {
    controls
        .iter()
        .map(|control| match *control {
            PageControl::Previous { enabled: true, .. } => format!("< {}", messages.previous),
            PageControl::Previous { enabled: false, .. } => format!("({})", messages.previous),
            PageControl::Page { number, active: true } => format!("[{number}]"),
            PageControl::Page { number, .. } => number.to_string(),
            PageControl::Ellipsis => "...".to_string(),
            PageControl::Next { enabled: true, .. } => format!("{} >", messages.next),
            PageControl::Next { enabled: false, .. } => format!("({})", messages.next),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn form_lines(form: &EditFormView) -> Vec<String> {
    let draft = &form.draft;
    let genre = if draft.genre.wants_new_value() {
        format!("(new) {}", draft.genre.new_value)
    } else {
        draft.genre.selected.clone()
    };
    vec![
        format!("Editing {}", form.item_id),
        format!("  inv_number:   {}", draft.inv_number),
        format!("  title:        {}", draft.title),
        format!("  author:       {}", draft.author),
        format!("  isbn:         {}", draft.isbn),
        format!("  genre:        {genre}"),
        format!("  publish_year: {}", draft.publish_year),
        format!("  price:        {}", draft.price),
        format!("  is_donation:  {}", draft.is_donation),
    ]
}
