//! End-to-end search session tests on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use toolverse_search::{
    match_catalog, Catalog, CatalogItem, QueryMatcher, SearchController, SearchQuery,
    SearchResultSet, SearchSession, SessionState,
};

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Matcher that records every query it is asked to run.
#[derive(Clone, Default)]
struct RecordingMatcher {
    calls: Arc<Mutex<Vec<String>>>,
}

impl QueryMatcher for RecordingMatcher {
    fn find(&self, query: &SearchQuery, catalog: &[CatalogItem]) -> SearchResultSet {
        self.calls.lock().push(query.normalized().to_string());
        match_catalog(query, catalog)
    }
}

fn spawn_controller() -> (SearchController, RecordingMatcher, Arc<Mutex<Vec<String>>>) {
    let matcher = RecordingMatcher::default();
    let session = SearchSession::with_matcher(Catalog::builtin(), matcher.clone(), 5);
    let visited = Arc::new(Mutex::new(Vec::new()));
    let sink = visited.clone();
    let controller = SearchController::spawn(
        session,
        move |target: &str| sink.lock().push(target.to_string()),
        DEBOUNCE,
    );
    (controller, matcher, visited)
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_keystrokes_runs_one_match() {
    let (controller, matcher, _) = spawn_controller();

    controller.keystroke("b");
    controller.keystroke("bu");
    controller.keystroke("bud");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(matches!(controller.state(), SessionState::PendingQuery { .. }));
    assert!(matcher.calls.lock().is_empty());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(*matcher.calls.lock(), vec!["bud".to_string()]);

    let state = controller.state();
    let results = state.results().expect("results panel visible");
    assert_eq!(results.items()[0].id, "budget-planner");
}

#[tokio::test(start_paused = true)]
async fn test_single_character_never_opens_panel() {
    let (controller, matcher, _) = spawn_controller();
    let mut updates = controller.subscribe();

    controller.keystroke("b");
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(controller.state(), SessionState::Idle);
    assert!(!updates.has_changed().unwrap());
    assert!(matcher.calls.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unmatched_query_shows_empty_panel() {
    let (controller, _, _) = spawn_controller();

    controller.keystroke("xyzzy");
    tokio::time::sleep(DEBOUNCE * 2).await;

    assert_eq!(
        controller.state(),
        SessionState::ShowingEmpty {
            query: "xyzzy".into()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_clearing_before_settle_suppresses_match() {
    let (controller, matcher, _) = spawn_controller();

    controller.keystroke("news");
    tokio::time::sleep(Duration::from_millis(100)).await;
    controller.keystroke("");
    tokio::time::sleep(DEBOUNCE * 2).await;

    assert_eq!(controller.state(), SessionState::Idle);
    assert!(matcher.calls.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_select_navigates_and_returns_to_idle() {
    let (controller, _, visited) = spawn_controller();

    controller.keystroke("news");
    tokio::time::sleep(DEBOUNCE * 2).await;
    assert!(controller.state().is_panel_visible());

    controller.select("news-headlines");
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(*visited.lock(), vec!["/news-headlines".to_string()]);
    assert_eq!(controller.state(), SessionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_outside_pointer_dismisses_panel() {
    let (controller, _, visited) = spawn_controller();

    controller.keystroke("calc");
    tokio::time::sleep(DEBOUNCE * 2).await;
    assert!(controller.state().is_panel_visible());

    controller.pointer_down(true);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(controller.state().is_panel_visible());

    controller.pointer_down(false);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(controller.state(), SessionState::Idle);
    assert!(visited.lock().is_empty());
}
