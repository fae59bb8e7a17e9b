use std::collections::BTreeMap;
use std::time::Duration;

use crate::{BookSubmission, ItemId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::DebounceElapsed { ticket }` after `delay`.
    ScheduleSearch { ticket: u64, delay: Duration },
    Fetch {
        request_id: RequestId,
        request: SearchRequest,
    },
    /// Rewrite the address bar in place (no new history entry).
    ReplaceLocation(String),
    LoadItem { id: ItemId },
    SubmitEdit {
        id: ItemId,
        submission: BookSubmission,
    },
    DeleteItem { id: ItemId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub page: u32,
    pub query: String,
    pub filters: BTreeMap<String, String>,
}
