//! HTML fragments for the result area and the pagination bar.
//!
//! Markup mirrors the Bootstrap classes the page templates expect. Every
//! interpolated value is escaped.

use std::fmt::Write;

use crate::{ItemRowView, Messages, PageControl, ResultsDisplay};

pub fn render_results_html(display: &ResultsDisplay, messages: &Messages) -> String {
    match display {
        ResultsDisplay::Default => String::new(),
        ResultsDisplay::Empty { message } => format!("<p>{}</p>", escape(message)),
        ResultsDisplay::Error { message } => {
            format!("<p class=\"text-danger\">{}</p>", escape(message))
        }
        ResultsDisplay::Table { rows, .. } => render_table(rows, messages),
    }
}

pub fn render_pagination_html(controls: &[PageControl], messages: &Messages) -> String {
    if controls.is_empty() {
        return String::new();
    }

    let mut html = String::from("<nav><ul class=\"pagination justify-content-center\">");
    for control in controls {
        match *control {
            PageControl::Previous { target, enabled } => {
                push_link(&mut html, target, messages.previous, !enabled, false);
            }
            PageControl::Next { target, enabled } => {
                push_link(&mut html, target, messages.next, !enabled, false);
            }
            PageControl::Page { number, active } => {
                push_link(&mut html, number, &number.to_string(), false, active);
            }
            PageControl::Ellipsis => {
                html.push_str(
                    "<li class=\"page-item disabled\"><span class=\"page-link\">…</span></li>",
                );
            }
        }
    }
    html.push_str("</ul></nav>");
    html
}

fn push_link(html: &mut String, page: u32, label: &str, disabled: bool, active: bool) {
    let state = match (disabled, active) {
        (true, _) => " disabled",
        (false, true) => " active",
        (false, false) => "",
    };
    let _ = write!(
        html,
        "<li class=\"page-item{state}\"><a class=\"page-link\" href=\"#\" data-page=\"{page}\">{}</a></li>",
        escape(label)
    );
}

fn render_table(rows: &[ItemRowView], messages: &Messages) -> String {
    let mut html = String::from("<table class=\"table table-striped table-hover\"><thead><tr>");
    for column in messages.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr></thead><tbody>");

    for row in rows {
        let badge = if row.available {
            "badge bg-success"
        } else {
            "badge bg-warning text-dark"
        };
        let id = escape(&row.id);
        let _ = write!(
            html,
            "<tr><td>{id}</td><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td>\
             <td><span class=\"{badge}\">{}</span></td>\
             <td class=\"d-flex flex-nowrap\">\
             <button class=\"btn btn-sm btn-outline-primary edit-book-btn\" data-book-id=\"{id}\">{}</button>\
             <button class=\"btn btn-sm btn-outline-danger delete-book-btn ms-1\" data-book-id=\"{id}\" data-confirm=\"{}\">{}</button>\
             </td></tr>",
            escape(&row.detail_href),
            escape(&row.title),
            escape(&row.author),
            escape(&row.category),
            escape(&row.year),
            escape(&row.availability_label),
            escape(messages.edit),
            escape(messages.delete_confirm),
            escape(messages.delete),
        );
    }

    html.push_str("</tbody></table>");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{page_controls, PaginationInfo};

    #[test]
    fn empty_display_is_a_paragraph_without_table() {
        let html = render_results_html(
            &ResultsDisplay::Empty {
                message: "Няма намерени книги.".into(),
            },
            &Messages::bulgarian(),
        );
        assert_eq!(html, "<p>Няма намерени книги.</p>");
    }

    #[test]
    fn error_display_uses_danger_class() {
        let html = render_results_html(
            &ResultsDisplay::Error {
                message: "Грешка при зареждане на книгите.".into(),
            },
            &Messages::bulgarian(),
        );
        assert!(html.starts_with("<p class=\"text-danger\">"));
    }

    #[test]
    fn table_escapes_cell_text() {
        let row = ItemRowView {
            id: "7".into(),
            title: "<script>alert(1)</script>".into(),
            author: "Tom & Jerry".into(),
            category: String::new(),
            year: String::new(),
            available: true,
            availability_label: "Налична".into(),
            detail_href: "/book/7?back_url=%2Fbooks".into(),
        };
        let html = render_results_html(
            &ResultsDisplay::Table {
                rows: vec![row],
                controls: Vec::new(),
                total_items: 1,
            },
            &Messages::bulgarian(),
        );
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("badge bg-success"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn pagination_marks_active_and_disabled() {
        let controls = page_controls(&PaginationInfo::new(1, 3, 30));
        let html = render_pagination_html(&controls, &Messages::bulgarian());
        assert!(html.contains(
            "<li class=\"page-item disabled\"><a class=\"page-link\" href=\"#\" data-page=\"1\">Предишна</a></li>"
        ));
        assert!(html.contains(
            "<li class=\"page-item active\"><a class=\"page-link\" href=\"#\" data-page=\"1\">1</a></li>"
        ));
        assert!(html.contains("data-page=\"2\">Следваща"));
    }

    #[test]
    fn no_controls_no_markup() {
        assert_eq!(render_pagination_html(&[], &Messages::bulgarian()), "");
    }
}
