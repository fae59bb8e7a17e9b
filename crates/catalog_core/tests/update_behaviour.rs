use std::sync::Once;

use catalog_core::{
    update, AppState, ControllerConfig, Effect, FetchFailure, Item, Msg, PaginationInfo,
    ResultPage, ResultsDisplay, DEBOUNCE_DELAY,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn book(id: &str) -> Item {
    Item {
        id: id.to_string(),
        title: format!("Книга {id}"),
        author: "Автор".to_string(),
        category: Some("Роман".to_string()),
        year: Some(1990),
        is_borrowed: false,
    }
}

fn page_of(current: u32, total_pages: u32, items: Vec<Item>) -> ResultPage {
    ResultPage {
        pagination: PaginationInfo::new(current, total_pages, u64::from(total_pages) * 10),
        items,
        categories: None,
    }
}

fn fetches(effects: &[Effect]) -> Vec<(u64, u32, String)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Fetch {
                request_id,
                request,
            } => Some((*request_id, request.page, request.query.clone())),
            _ => None,
        })
        .collect()
}

fn last_ticket(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScheduleSearch { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("schedule effect")
}

/// Types `text` and lets its debounce timer fire.
fn type_and_settle(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, effects) = update(state, Msg::QueryChanged(text.to_string()));
    let ticket = last_ticket(&effects);
    update(state, Msg::DebounceElapsed { ticket })
}

#[test]
fn query_change_schedules_debounce_without_fetching() {
    init_logging();
    let (state, effects) = update(AppState::default(), Msg::QueryChanged("вазов".into()));

    assert_eq!(
        effects,
        vec![Effect::ScheduleSearch {
            ticket: 1,
            delay: DEBOUNCE_DELAY
        }]
    );
    assert_eq!(state.view().input_text, "вазов");
    assert_eq!(state.query().text(), "");
    assert!(!state.is_loading());
}

#[test]
fn burst_of_keystrokes_yields_one_fetch_with_last_value() {
    init_logging();
    let mut state = AppState::default();
    let mut tickets = Vec::new();
    for text in ["в", "ва", "ваз", "вазо", "вазов"] {
        let (next, effects) = update(state, Msg::QueryChanged(text.to_string()));
        tickets.push(last_ticket(&effects));
        state = next;
    }

    let mut all_fetches = Vec::new();
    for ticket in tickets {
        let (next, effects) = update(state, Msg::DebounceElapsed { ticket });
        all_fetches.extend(fetches(&effects));
        state = next;
    }

    assert_eq!(all_fetches, vec![(1, 1, "вазов".to_string())]);
}

#[test]
fn explicit_search_bypasses_and_cancels_debounce() {
    init_logging();
    let (state, effects) = update(AppState::default(), Msg::QueryChanged("мир".into()));
    let ticket = last_ticket(&effects);

    let (state, effects) = update(state, Msg::SearchSubmitted);
    assert_eq!(fetches(&effects), vec![(1, 1, "мир".to_string())]);
    assert!(state.is_loading());

    let (_state, effects) = update(state, Msg::DebounceElapsed { ticket });
    assert!(effects.is_empty());
}

#[test]
fn search_rewrites_location_before_fetching() {
    init_logging();
    let (state, effects) = type_and_settle(AppState::default(), "test");

    assert_eq!(
        effects.first(),
        Some(&Effect::ReplaceLocation(
            "/public_catalog?page=1&query=test".to_string()
        ))
    );
    assert_eq!(state.location(), "/public_catalog?page=1&query=test");
    assert_eq!(fetches(&effects).len(), 1);
}

#[test]
fn short_query_without_filter_shows_default_and_clears_location() {
    init_logging();
    let (state, _) = type_and_settle(AppState::default(), "war");
    assert!(state.is_loading());

    let (state, effects) = type_and_settle(state, "w");

    assert!(fetches(&effects).is_empty());
    assert_eq!(
        effects,
        vec![Effect::ReplaceLocation("/public_catalog".to_string())]
    );
    assert_eq!(state.view().display, ResultsDisplay::Default);
    assert!(!state.is_loading());
}

#[test]
fn filter_makes_short_query_searchable() {
    init_logging();
    let (state, effects) = update(
        AppState::default(),
        Msg::FilterChanged {
            name: "genre".into(),
            value: "Поезия".into(),
        },
    );

    assert_eq!(fetches(&effects), vec![(1, 1, String::new())]);
    let Some(Effect::Fetch { request, .. }) = effects.last() else {
        panic!("expected fetch");
    };
    assert_eq!(request.filters.get("genre").map(String::as_str), Some("Поезия"));
    assert!(state.location().ends_with("&genre=%D0%9F%D0%BE%D0%B5%D0%B7%D0%B8%D1%8F"));
}

#[test]
fn empty_result_renders_message() {
    init_logging();
    let (state, effects) = type_and_settle(AppState::default(), "дете");
    let (request_id, _, _) = fetches(&effects)[0];

    let (state, effects) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(page_of(1, 0, Vec::new())),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(
        state.view().display,
        ResultsDisplay::Empty {
            message: "Няма намерени книги.".to_string()
        }
    );
}

#[test]
fn failure_shows_error_and_keeps_query() {
    init_logging();
    let (state, effects) = type_and_settle(AppState::default(), "тютюн");
    let (request_id, _, _) = fetches(&effects)[0];

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Err(FetchFailure::HttpStatus(500)),
        },
    );

    let view = state.view();
    assert!(!view.loading);
    assert_eq!(
        view.display,
        ResultsDisplay::Error {
            message: "Грешка при зареждане на книгите.".to_string()
        }
    );
    assert_eq!(view.query.text(), "тютюн");

    // Still interactive after a failure.
    let (_state, effects) = update(state, Msg::SearchSubmitted);
    assert_eq!(fetches(&effects).len(), 1);
}

#[test]
fn stale_response_is_ignored() {
    init_logging();
    let (state, first) = type_and_settle(AppState::default(), "първо");
    let (state, second) = type_and_settle(state, "второ");
    let (old_id, _, _) = fetches(&first)[0];
    let (new_id, _, _) = fetches(&second)[0];
    assert!(new_id > old_id);

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: new_id,
            result: Ok(page_of(1, 1, vec![book("2")])),
        },
    );
    let rendered = state.view().display;

    let (mut state, effects) = update(
        state,
        Msg::SearchCompleted {
            request_id: old_id,
            result: Ok(page_of(1, 1, vec![book("1")])),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().display, rendered);
    state.consume_dirty();
    let (mut state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: old_id,
            result: Err(FetchFailure::Network),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn loading_stays_on_until_latest_response_arrives() {
    init_logging();
    let (state, first) = type_and_settle(AppState::default(), "първо");
    let (state, _second) = type_and_settle(state, "второ");
    let (old_id, _, _) = fetches(&first)[0];

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: old_id,
            result: Ok(page_of(1, 1, vec![book("1")])),
        },
    );
    assert!(state.is_loading());
}

#[test]
fn page_selection_fetches_with_committed_query() {
    init_logging();
    let (state, effects) = type_and_settle(AppState::default(), "роман");
    let (request_id, _, _) = fetches(&effects)[0];
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(page_of(1, 10, vec![book("1")])),
        },
    );

    // Typed but not yet searched: page clicks keep using the committed query.
    let (state, _) = update(state, Msg::QueryChanged("друго".into()));
    let (state, effects) = update(state, Msg::PageSelected(4));

    assert_eq!(fetches(&effects), vec![(2, 4, "роман".to_string())]);
    assert_eq!(
        state.location(),
        "/public_catalog?page=4&query=%D1%80%D0%BE%D0%BC%D0%B0%D0%BD"
    );
}

#[test]
fn page_selection_after_failed_search_is_noop() {
    init_logging();
    let (state, effects) = type_and_settle(AppState::default(), "abc");
    let (request_id, _, _) = fetches(&effects)[0];
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(page_of(1, 10, vec![book("1")])),
        },
    );

    let (state, effects) = type_and_settle(state, "xyz");
    let (request_id, _, _) = fetches(&effects)[0];
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Err(FetchFailure::Network),
        },
    );
    assert!(matches!(state.view().display, ResultsDisplay::Error { .. }));

    let (_, effects) = update(state, Msg::PageSelected(7));
    assert!(effects.is_empty());
}

#[test]
fn page_selection_waits_for_new_search_results() {
    init_logging();
    let (state, effects) = type_and_settle(AppState::default(), "abc");
    let (request_id, _, _) = fetches(&effects)[0];
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(page_of(1, 10, vec![book("1")])),
        },
    );

    // Controls on screen belong to "abc"; the "xyz" results are still loading.
    let (state, effects) = type_and_settle(state, "xyz");
    let (request_id, _, _) = fetches(&effects)[0];
    let (state, effects) = update(state, Msg::PageSelected(7));
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(page_of(1, 3, vec![book("2")])),
        },
    );
    let (_, effects) = update(state, Msg::PageSelected(3));
    assert_eq!(fetches(&effects), vec![(request_id + 1, 3, "xyz".to_string())]);
}

#[test]
fn selecting_active_or_out_of_range_page_is_noop() {
    init_logging();
    let (state, effects) = type_and_settle(AppState::default(), "роман");
    let (request_id, _, _) = fetches(&effects)[0];
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(page_of(3, 5, vec![book("1")])),
        },
    );

    let before = state.view();
    let (state, effects) = update(state, Msg::PageSelected(3));
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::PageSelected(0));
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::PageSelected(6));
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn opened_location_restores_search_and_fetches() {
    init_logging();
    let (state, effects) = update(
        AppState::default(),
        Msg::PageOpened {
            location: "/public_catalog?page=3&query=test".into(),
        },
    );

    assert_eq!(fetches(&effects), vec![(1, 3, "test".to_string())]);
    let view = state.view();
    assert_eq!(view.input_text, "test");
    assert_eq!(view.query.page(), 3);
}

#[test]
fn opened_location_without_search_shows_default() {
    init_logging();
    let (state, effects) = update(
        AppState::default(),
        Msg::PageOpened {
            location: "/public_catalog".into(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().display, ResultsDisplay::Default);
}

#[test]
fn staff_listing_fetches_everything_on_open() {
    init_logging();
    let (_state, effects) = update(
        AppState::new(ControllerConfig::staff_listing()),
        Msg::PageOpened {
            location: "/books".into(),
        },
    );
    assert_eq!(fetches(&effects), vec![(1, 1, String::new())]);
}

#[test]
fn categories_survive_responses_without_them() {
    init_logging();
    let (state, effects) = type_and_settle(AppState::default(), "роман");
    let (request_id, _, _) = fetches(&effects)[0];
    let mut page = page_of(1, 1, vec![book("1")]);
    page.categories = Some(vec!["Роман".into(), "Поезия".into()]);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(page),
        },
    );

    let (state, effects) = update(state, Msg::SearchSubmitted);
    let (request_id, _, _) = fetches(&effects)[0];
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(page_of(1, 1, vec![book("1")])),
        },
    );

    assert_eq!(state.view().categories, vec!["Роман", "Поезия"]);
    assert_eq!(state.view().total_items, Some(10));
}
