use url::form_urlencoded;

use crate::{
    page_controls, BookDraft, ControllerConfig, Item, ItemId, PageControl, QueryState, ResultPage,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Text currently in the search box, possibly not yet searched.
    pub input_text: String,
    pub query: QueryState,
    pub location: String,
    pub loading: bool,
    pub display: ResultsDisplay,
    pub total_items: Option<u64>,
    pub categories: Vec<String>,
    pub edit_form: Option<EditFormView>,
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditFormView {
    pub item_id: ItemId,
    pub draft: BookDraft,
}

/// What the result area shows. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsDisplay {
    /// Nothing searched yet, or the query is too short.
    #[default]
    Default,
    Empty {
        message: String,
    },
    Error {
        message: String,
    },
    Table {
        rows: Vec<ItemRowView>,
        controls: Vec<PageControl>,
        total_items: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRowView {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub year: String,
    pub available: bool,
    pub availability_label: String,
    pub detail_href: String,
}

/// Pure render step: a fetched page becomes a display, with no reference to prior output.
pub fn render_results(
    page: &ResultPage,
    back_location: &str,
    config: &ControllerConfig,
) -> ResultsDisplay {
    if page.items.is_empty() {
        return ResultsDisplay::Empty {
            message: config.messages.no_results.to_string(),
        };
    }

    let back_url: String = form_urlencoded::byte_serialize(back_location.as_bytes()).collect();
    let rows = page
        .items
        .iter()
        .map(|item| row_view(item, &back_url, config))
        .collect();

    ResultsDisplay::Table {
        rows,
        controls: page_controls(&page.pagination),
        total_items: page.pagination.total_items,
    }
}

fn row_view(item: &Item, back_url: &str, config: &ControllerConfig) -> ItemRowView {
    let id_segment: String = form_urlencoded::byte_serialize(item.id.as_bytes()).collect();
    let messages = &config.messages;
    ItemRowView {
        id: item.id.clone(),
        title: item.title.clone(),
        author: item.author.clone(),
        category: item.category.clone().unwrap_or_default(),
        year: item.year.map(|y| y.to_string()).unwrap_or_default(),
        available: !item.is_borrowed,
        availability_label: if item.is_borrowed {
            messages.borrowed.to_string()
        } else {
            messages.available.to_string()
        },
        detail_href: format!(
            "{}/{id_segment}?back_url={back_url}",
            config.detail_path.trim_end_matches('/')
        ),
    }
}
