//! Catalog core: pure search-list controller, rendering and form helpers.
mod config;
mod effect;
mod forms;
pub mod html;
mod messages;
mod model;
mod msg;
mod pagination;
mod query;
mod row_filter;
mod state;
mod update;
mod view_model;

pub use config::{ControllerConfig, DEBOUNCE_DELAY, MIN_QUERY_CHARS};
pub use effect::{Effect, SearchRequest};
pub use forms::{
    BookDraft, BookField, BookSubmission, ChoiceField, FormError, MutationKind, MutationReply,
    MutationStatus, ReaderDraft, ReaderSubmission, ADD_NEW,
};
pub use messages::{Locale, Messages};
pub use model::{FetchFailure, Item, ItemId, ItemRecord, RequestId, ResultPage};
pub use msg::Msg;
pub use pagination::{page_controls, visible_pages, PageControl, PaginationInfo, WINDOW_RADIUS};
pub use query::{base_path_of, encode_query, location_for, parse_location, QueryState};
pub use row_filter::{row_visibility, ReturnRow, RowFilter};
pub use state::AppState;
pub use update::update;
pub use view_model::{render_results, AppViewModel, EditFormView, ItemRowView, ResultsDisplay};
