use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use catalog_core::{
    Effect, FetchFailure, Item, ItemRecord, Msg, MutationKind, MutationReply, MutationStatus,
    PaginationInfo, ResultPage, SearchRequest,
};
use catalog_engine::{
    BookDetails, EngineEvent, EngineHandle, FailureKind, FetchError, Mutation, MutationResponse,
    ReplyStatus, SearchParams, SearchResponse,
};
use catalog_logging::{catalog_debug, catalog_error, catalog_info, catalog_warn};

use super::app::AppEvent;

const EVENT_POLL: Duration = Duration::from_millis(50);

/// Executes controller effects and feeds engine results back as messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    events: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self {
            engine: Arc::new(engine),
            events,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleSearch { ticket, delay } => self.schedule(ticket, delay),
                Effect::Fetch {
                    request_id,
                    request,
                } => {
                    catalog_info!(
                        "Search request_id={} page={} query_len={}",
                        request_id,
                        request.page,
                        request.query.chars().count()
                    );
                    self.engine.search(request_id, search_params(request));
                }
                Effect::ReplaceLocation(location) => {
                    catalog_debug!("Location replaced: {}", location);
                }
                Effect::LoadItem { id } => {
                    catalog_info!("Loading item {}", id);
                    self.engine.load_item(id);
                }
                Effect::SubmitEdit { id, submission } => match serde_json::to_value(&submission) {
                    Ok(body) => self.engine.mutate(Mutation::EditBook { id, body }),
                    Err(err) => {
                        catalog_error!("Failed to serialize edit for {}: {}", id, err);
                        self.send(Msg::MutationFinished {
                            kind: MutationKind::EditBook,
                            result: Err(FetchFailure::Malformed),
                        });
                    }
                },
                Effect::DeleteItem { id } => {
                    catalog_info!("Deleting item {}", id);
                    self.engine.mutate(Mutation::DeleteBook { id });
                }
            }
        }
    }

    /// Each schedule gets its own timer; the controller ignores superseded tickets.
    fn schedule(&self, ticket: u64, delay: Duration) {
        let events = self.events.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = events.send(AppEvent::Core(Msg::DebounceElapsed { ticket }));
        });
    }

    fn send(&self, msg: Msg) {
        let _ = self.events.send(AppEvent::Core(msg));
    }

    fn spawn_event_loop(&self) {
        let engine = Arc::clone(&self.engine);
        let events = self.events.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(EVENT_POLL) else {
                continue;
            };
            if events.send(AppEvent::Core(map_event(event))).is_err() {
                break;
            }
        });
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
            request_id,
            result: result.map(map_search_response).map_err(|err| {
                catalog_warn!("Search {} failed: {}", request_id, err);
                map_failure(&err)
            }),
        },
        EngineEvent::ItemLoaded { id, result } => {
            let result = result.map(map_details).map_err(|err| {
                catalog_warn!("Loading item {} failed: {}", id, err);
                map_failure(&err)
            });
            Msg::ItemLoaded { id, result }
        }
        EngineEvent::MutationCompleted { mutation, result } => {
            let kind = mutation_kind(&mutation);
            Msg::MutationFinished {
                kind,
                result: result.map(map_reply).map_err(|err| {
                    catalog_warn!("{:?} failed: {}", kind, err);
                    map_failure(&err)
                }),
            }
        }
    }
}

pub fn map_reply(reply: MutationResponse) -> MutationReply {
    MutationReply {
        status: match reply.status {
            ReplyStatus::Success => MutationStatus::Success,
            ReplyStatus::Error => MutationStatus::Error,
        },
        message: reply.message,
    }
}

fn search_params(request: SearchRequest) -> SearchParams {
    SearchParams {
        page: request.page,
        query: request.query,
        filters: request.filters.into_iter().collect(),
    }
}

fn map_search_response(response: SearchResponse) -> ResultPage {
    let meta = response.pagination;
    ResultPage {
        items: response
            .items
            .into_iter()
            .map(|book| Item {
                id: book.id.0,
                title: book.title,
                author: book.author,
                category: book.category,
                year: book.year,
                is_borrowed: book.is_borrowed,
            })
            .collect(),
        pagination: PaginationInfo::new(meta.page, meta.total_pages, meta.total_items),
        categories: response
            .categories
            .map(|categories| categories.into_iter().map(|c| c.name).collect()),
    }
}

fn map_details(details: BookDetails) -> ItemRecord {
    ItemRecord {
        id: details.id.0,
        title: details.title,
        author: details.author,
        isbn: details.isbn,
        category: details.category,
        year: details.year,
        price: details.price,
        is_donation: details.is_donation,
        cover_image: details.cover_image,
    }
}

fn mutation_kind(mutation: &Mutation) -> MutationKind {
    match mutation {
        Mutation::CreateBook(_) => MutationKind::CreateBook,
        Mutation::CreateReader(_) => MutationKind::CreateReader,
        Mutation::EditBook { .. } => MutationKind::EditBook,
        Mutation::DeleteBook { .. } => MutationKind::DeleteBook,
    }
}

/// Collapses the engine's failure detail into the three cases the controller distinguishes.
fn map_failure(err: &FetchError) -> FetchFailure {
    match err.kind {
        FailureKind::HttpStatus(code) => FetchFailure::HttpStatus(code),
        FailureKind::Timeout => FetchFailure::Timeout,
        FailureKind::TooLarge { .. } | FailureKind::MalformedBody => FetchFailure::Malformed,
        FailureKind::InvalidUrl | FailureKind::Network => FetchFailure::Network,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_engine::{BookSummary, Category, PageMeta, RecordId};

    #[test]
    fn search_response_maps_to_result_page() {
        let msg = map_event(EngineEvent::SearchCompleted {
            request_id: 3,
            result: Ok(SearchResponse {
                items: vec![BookSummary {
                    id: RecordId("9".into()),
                    title: "Гераците".into(),
                    author: "Елин Пелин".into(),
                    category: None,
                    year: Some(1911),
                    is_borrowed: true,
                }],
                pagination: PageMeta {
                    page: 7,
                    total_pages: 4,
                    total_items: 31,
                },
                categories: Some(vec![Category {
                    name: "Повест".into(),
                }]),
            }),
        });

        let Msg::SearchCompleted {
            request_id,
            result: Ok(page),
        } = msg
        else {
            panic!("expected successful search message");
        };
        assert_eq!(request_id, 3);
        assert_eq!(page.items[0].id, "9");
        assert!(page.items[0].is_borrowed);
        // Out-of-range page numbers from the backend are clamped.
        assert_eq!(page.pagination.current_page, 4);
        assert_eq!(page.categories, Some(vec!["Повест".to_string()]));
    }

    #[test]
    fn failures_collapse_to_controller_taxonomy() {
        let failure = |kind| FetchError {
            kind,
            message: String::new(),
        };
        assert_eq!(
            map_failure(&failure(FailureKind::MalformedBody)),
            FetchFailure::Malformed
        );
        assert_eq!(
            map_failure(&failure(FailureKind::TooLarge {
                max_bytes: 1,
                actual: None
            })),
            FetchFailure::Malformed
        );
        assert_eq!(
            map_failure(&failure(FailureKind::InvalidUrl)),
            FetchFailure::Network
        );
        assert_eq!(
            map_failure(&failure(FailureKind::HttpStatus(502))),
            FetchFailure::HttpStatus(502)
        );
    }

    #[test]
    fn mutation_events_keep_their_kind() {
        let msg = map_event(EngineEvent::MutationCompleted {
            mutation: Mutation::DeleteBook { id: "4".into() },
            result: Ok(MutationResponse {
                status: ReplyStatus::Error,
                message: "Книгата е заета.".into(),
            }),
        });
        assert_eq!(
            msg,
            Msg::MutationFinished {
                kind: MutationKind::DeleteBook,
                result: Ok(MutationReply {
                    status: MutationStatus::Error,
                    message: "Книгата е заета.".into()
                })
            }
        );
    }
}
