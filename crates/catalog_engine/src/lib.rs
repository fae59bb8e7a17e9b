//! Catalog engine: backend HTTP client and effect execution.
mod client;
mod engine;
mod types;

pub use client::{CatalogApi, ClientSettings, ReqwestCatalogClient, Routes};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    BookDetails, BookSummary, Category, EngineEvent, FailureKind, FetchError, Mutation,
    MutationResponse, PageMeta, RecordId, ReplyStatus, RequestId, SearchParams, SearchResponse,
};
