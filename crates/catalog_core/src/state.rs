use crate::view_model::{AppViewModel, EditFormView, ResultsDisplay};
use crate::{
    location_for, render_results, BookDraft, ControllerConfig, ItemId, QueryState,
    RequestId, ResultPage, SearchRequest,
};

/// Controller state. Owned by the host loop and threaded through `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    config: ControllerConfig,
    input_text: String,
    query: QueryState,
    location: String,
    debounce_ticket: u64,
    pending_ticket: Option<u64>,
    last_request: RequestId,
    awaiting: Option<RequestId>,
    display: ResultsDisplay,
    shown_page: Option<(u32, u32)>,
    total_items: Option<u64>,
    categories: Vec<String>,
    edit: Option<EditSession>,
    pending_item: Option<ItemId>,
    notice: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditSession {
    pub(crate) id: ItemId,
    pub(crate) draft: BookDraft,
}

impl AppState {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            location: config.base_path.clone(),
            config,
            input_text: String::new(),
            query: QueryState::default(),
            debounce_ticket: 0,
            pending_ticket: None,
            last_request: 0,
            awaiting: None,
            display: ResultsDisplay::Default,
            shown_page: None,
            total_items: None,
            categories: Vec::new(),
            edit: None,
            pending_item: None,
            notice: None,
            dirty: false,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_loading(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input_text: self.input_text.clone(),
            query: self.query.clone(),
            location: self.location.clone(),
            loading: self.is_loading(),
            display: self.display.clone(),
            total_items: self.total_items,
            categories: self.categories.clone(),
            edit_form: self.edit.as_ref().map(|session| EditFormView {
                item_id: session.id.clone(),
                draft: session.draft.clone(),
            }),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn restore_from_location(&mut self, location: &str) {
        self.query = crate::parse_location(location);
        self.input_text = self.query.text().to_string();
        self.location = location.to_string();
        self.mark_dirty();
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input_text = text;
        self.mark_dirty();
    }

    pub(crate) fn set_filter(&mut self, name: String, value: String) {
        self.query.set_filter(name, value);
        self.mark_dirty();
    }

    /// Mints a new debounce ticket; any earlier pending ticket is superseded.
    pub(crate) fn schedule_debounce(&mut self) -> u64 {
        self.debounce_ticket += 1;
        self.pending_ticket = Some(self.debounce_ticket);
        self.debounce_ticket
    }

    pub(crate) fn cancel_debounce(&mut self) {
        self.pending_ticket = None;
    }

    /// True if `ticket` is still the pending one, which it then clears.
    pub(crate) fn take_debounce(&mut self, ticket: u64) -> bool {
        if self.pending_ticket == Some(ticket) {
            self.pending_ticket = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn commit_input(&mut self) {
        self.query.set_text(self.input_text.clone());
    }

    pub(crate) fn set_page(&mut self, page: u32) {
        self.query.set_page(page);
    }

    pub(crate) fn is_searchable(&self) -> bool {
        self.query.is_searchable(self.config.min_query_chars)
    }

    pub(crate) fn listing_location(&self) -> String {
        location_for(&self.config.base_path, &self.query)
    }

    pub(crate) fn replace_location(&mut self, location: String) {
        self.location = location;
        self.mark_dirty();
    }

    /// Back to the default content. Any response still in flight becomes stale.
    pub(crate) fn show_default(&mut self) {
        self.awaiting = None;
        self.display = ResultsDisplay::Default;
        self.shown_page = None;
        self.total_items = None;
        self.mark_dirty();
    }

    pub(crate) fn begin_request(&mut self) -> (RequestId, SearchRequest) {
        self.last_request += 1;
        self.awaiting = Some(self.last_request);
        self.mark_dirty();
        let request = SearchRequest {
            page: self.query.page(),
            query: self.query.text().to_string(),
            filters: self.query.filters().clone(),
        };
        (self.last_request, request)
    }

    /// Only the most recently issued request may update the display.
    pub(crate) fn accept_response(&mut self, request_id: RequestId) -> bool {
        if self.awaiting == Some(request_id) {
            self.awaiting = None;
            self.mark_dirty();
            true
        } else {
            false
        }
    }

    pub(crate) fn show_results(&mut self, page: &ResultPage) {
        self.display = render_results(page, &self.location, &self.config);
        self.shown_page = Some((page.pagination.current_page, page.pagination.total_pages));
        self.total_items = Some(page.pagination.total_items);
        if let Some(categories) = &page.categories {
            self.categories = categories.clone();
        }
    }

    /// The error replaces the table, so its page controls are gone too.
    pub(crate) fn show_error(&mut self) {
        self.display = ResultsDisplay::Error {
            message: self.config.messages.load_error.to_string(),
        };
        self.shown_page = None;
    }

    /// A new search makes the visible page controls meaningless until its results arrive.
    pub(crate) fn forget_pagination(&mut self) {
        self.shown_page = None;
    }

    /// `(current, total)` from the last rendered pagination.
    pub(crate) fn shown_page(&self) -> Option<(u32, u32)> {
        self.shown_page
    }

    /// Only the latest requested item may open the editor.
    pub(crate) fn request_item(&mut self, id: ItemId) {
        self.pending_item = Some(id);
    }

    pub(crate) fn accept_item(&mut self, id: &str) -> bool {
        if self.pending_item.as_deref() == Some(id) {
            self.pending_item = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn open_editor(&mut self, id: ItemId, draft: BookDraft) {
        self.edit = Some(EditSession { id, draft });
        self.mark_dirty();
    }

    pub(crate) fn editor_mut(&mut self) -> Option<&mut EditSession> {
        self.edit.as_mut()
    }

    pub(crate) fn editor(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub(crate) fn close_editor(&mut self) {
        self.pending_item = None;
        if self.edit.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }
}
