#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Page load with the current address.
    PageOpened { location: String },
    /// User edited the search box.
    QueryChanged(String),
    /// User picked a filter value; an empty value clears it.
    FilterChanged { name: String, value: String },
    /// User pressed the search button.
    SearchSubmitted,
    /// A scheduled debounce timer fired.
    DebounceElapsed { ticket: u64 },
    /// User clicked a page control.
    PageSelected(u32),
    /// Engine answered a search.
    SearchCompleted {
        request_id: crate::RequestId,
        result: Result<crate::ResultPage, crate::FetchFailure>,
    },
    /// User clicked "edit" on a row.
    EditClicked { id: crate::ItemId },
    /// Engine answered an item lookup for the edit form.
    ItemLoaded {
        id: crate::ItemId,
        result: Result<crate::ItemRecord, crate::FetchFailure>,
    },
    /// User typed into the edit form.
    EditFieldChanged {
        field: crate::BookField,
        value: String,
    },
    /// User saved the edit form.
    EditSubmitted,
    /// User closed the edit form.
    EditCancelled,
    /// User confirmed deletion of a row.
    DeleteConfirmed { id: crate::ItemId },
    /// Engine answered a create/edit/delete.
    MutationFinished {
        kind: crate::MutationKind,
        result: Result<crate::MutationReply, crate::FetchFailure>,
    },
    /// Input that asks for nothing, such as an empty command line.
    NoOp,
}
