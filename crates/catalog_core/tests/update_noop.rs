use catalog_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new(catalog_core::ControllerConfig::default());
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn page_click_before_any_results_is_noop() {
    let state = AppState::default();
    let (next, effects) = update(state.clone(), Msg::PageSelected(2));

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
