use std::collections::BTreeMap;

use url::form_urlencoded;

pub const PAGE_PARAM: &str = "page";
pub const QUERY_PARAM: &str = "query";

/// What the next fetch is built from. Only user input and URL parsing change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    text: String,
    filters: BTreeMap<String, String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            text: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl QueryState {
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            text: text.into(),
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// An empty value clears the filter. `page` and `query` are not filters and are ignored.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if is_reserved(&name) {
            return;
        }
        if value.is_empty() {
            self.filters.remove(&name);
        } else {
            self.filters.insert(name, value);
        }
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(name, value);
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Counts characters, not bytes, so two Cyrillic letters pass a two-character minimum.
    pub fn is_searchable(&self, min_chars: usize) -> bool {
        self.text.chars().count() >= min_chars || self.has_filters()
    }
}

fn is_reserved(name: &str) -> bool {
    name == PAGE_PARAM || name == QUERY_PARAM
}

/// `page=<n>&query=<text>` followed by the filters in key order.
pub fn encode_query(state: &QueryState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(PAGE_PARAM, &state.page.to_string());
    serializer.append_pair(QUERY_PARAM, &state.text);
    for (name, value) in &state.filters {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

pub fn location_for(base_path: &str, state: &QueryState) -> String {
    format!("{base_path}?{}", encode_query(state))
}

/// Accepts a full URL, a path with a query string, or a bare query string.
pub fn parse_location(location: &str) -> QueryState {
    let without_fragment = location.split('#').next().unwrap_or_default();
    let raw_query = match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains('=') => without_fragment,
        None => "",
    };

    let mut state = QueryState::default();
    for (name, value) in form_urlencoded::parse(raw_query.as_bytes()) {
        match name.as_ref() {
            PAGE_PARAM => {
                let page = value.trim().parse::<u32>().unwrap_or(1);
                state.set_page(page);
            }
            QUERY_PARAM => state.set_text(value.into_owned()),
            _ => state.set_filter(name.into_owned(), value.into_owned()),
        }
    }
    state
}

/// Strips the query string and fragment, leaving the path the page lives at.
pub fn base_path_of(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    &location[..end]
}
