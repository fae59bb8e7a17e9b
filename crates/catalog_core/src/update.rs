use crate::{AppState, BookDraft, Effect, Msg, MutationKind};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageOpened { location } => {
            state.restore_from_location(&location);
            if state.is_searchable() {
                issue_fetch(&mut state)
            } else {
                state.show_default();
                Vec::new()
            }
        }
        Msg::QueryChanged(text) => {
            state.set_input(text);
            let ticket = state.schedule_debounce();
            vec![Effect::ScheduleSearch {
                ticket,
                delay: state.config().debounce,
            }]
        }
        Msg::DebounceElapsed { ticket } => {
            // A newer keystroke or an explicit search has superseded this timer.
            if !state.take_debounce(ticket) {
                return (state, Vec::new());
            }
            search_from_input(&mut state)
        }
        Msg::SearchSubmitted => {
            state.cancel_debounce();
            search_from_input(&mut state)
        }
        Msg::FilterChanged { name, value } => {
            state.set_filter(name, value);
            state.cancel_debounce();
            search_from_input(&mut state)
        }
        Msg::PageSelected(page) => match state.shown_page() {
            Some((current, total)) if page != current && (1..=total).contains(&page) => {
                state.set_page(page);
                search_committed_query(&mut state)
            }
            _ => Vec::new(),
        },
        Msg::SearchCompleted { request_id, result } => {
            if !state.accept_response(request_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(page) => state.show_results(&page),
                Err(_) => state.show_error(),
            }
            Vec::new()
        }
        Msg::EditClicked { id } => {
            state.clear_notice();
            state.request_item(id.clone());
            vec![Effect::LoadItem { id }]
        }
        Msg::ItemLoaded { id, result } => {
            // Cancelled, or superseded by a later edit click.
            if !state.accept_item(&id) {
                return (state, Vec::new());
            }
            match result {
                Ok(record) => state.open_editor(id, BookDraft::from_record(&record)),
                Err(_) => {
                    let message = state.config().messages.item_load_error;
                    state.set_notice(message);
                }
            }
            Vec::new()
        }
        Msg::EditFieldChanged { field, value } => {
            let changed = match state.editor_mut() {
                Some(session) => {
                    session.draft.set(field, value);
                    true
                }
                None => false,
            };
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EditSubmitted => {
            let outcome = state
                .editor()
                .map(|session| (session.id.clone(), session.draft.to_submission()));
            match outcome {
                Some((id, Ok(submission))) => vec![Effect::SubmitEdit { id, submission }],
                Some((_, Err(err))) => {
                    let message = err.message(&state.config().messages);
                    state.set_notice(message);
                    Vec::new()
                }
                None => Vec::new(),
            }
        }
        Msg::EditCancelled => {
            state.close_editor();
            Vec::new()
        }
        Msg::DeleteConfirmed { id } => {
            state.clear_notice();
            vec![Effect::DeleteItem { id }]
        }
        Msg::MutationFinished { kind, result } => match result {
            Ok(reply) => {
                state.set_notice(reply.message.clone());
                if !reply.is_success() {
                    return (state, Vec::new());
                }
                match kind {
                    MutationKind::EditBook => {
                        state.close_editor();
                        refresh(&mut state)
                    }
                    MutationKind::DeleteBook => refresh(&mut state),
                    MutationKind::CreateBook | MutationKind::CreateReader => Vec::new(),
                }
            }
            Err(_) => {
                let message = state.config().messages.mutation_error;
                state.set_notice(message);
                Vec::new()
            }
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Search box text becomes the committed query, starting again from page 1.
fn search_from_input(state: &mut AppState) -> Vec<Effect> {
    state.commit_input();
    state.set_page(1);
    state.forget_pagination();
    search_committed_query(state)
}

fn search_committed_query(state: &mut AppState) -> Vec<Effect> {
    if !state.is_searchable() {
        state.show_default();
        let location = state.config().base_path.clone();
        state.replace_location(location.clone());
        return vec![Effect::ReplaceLocation(location)];
    }

    let location = state.listing_location();
    state.replace_location(location.clone());
    let mut effects = vec![Effect::ReplaceLocation(location)];
    effects.extend(issue_fetch(state));
    effects
}

fn issue_fetch(state: &mut AppState) -> Vec<Effect> {
    let (request_id, request) = state.begin_request();
    vec![Effect::Fetch {
        request_id,
        request,
    }]
}

/// Re-fetches what is on screen after a successful change.
fn refresh(state: &mut AppState) -> Vec<Effect> {
    if state.shown_page().is_some() && state.is_searchable() {
        issue_fetch(state)
    } else {
        Vec::new()
    }
}
