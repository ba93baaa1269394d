//! Search session controller.
//!
//! `SearchSession` is a synchronous state machine over discrete events.
//! `SearchController` owns one on a dedicated task, routes keystrokes
//! through a debounce channel and publishes each state change on a watch
//! channel for the UI boundary.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::catalog::Catalog;
use crate::debounce::Debouncer;
use crate::matcher::{is_searchable, QueryMatcher, SubstringMatcher};
use crate::types::{SearchQuery, SessionState};

/// Input to the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Full contents of the search box after a keystroke.
    Keystroke(String),
    /// The debounce timer for `generation` elapsed.
    Settled { generation: u64 },
    /// The user picked a visible result.
    Select(String),
    /// Pointer pressed somewhere on the page.
    PointerDown { inside_search: bool },
    /// The query box was emptied explicitly.
    Clear,
}

/// Side effect the driver must perform after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// (Re)arm the debounce channel for `generation`.
    Schedule { generation: u64 },
    /// Disarm the debounce channel.
    Cancel,
    /// Navigate to a tool; implies `Cancel`.
    Navigate(String),
}

/// Where a selected item's navigation target is sent.
pub trait Navigator: Send {
    fn navigate(&mut self, target: &str);
}

impl<F> Navigator for F
where
    F: FnMut(&str) + Send,
{
    fn navigate(&mut self, target: &str) {
        (*self)(target)
    }
}

/// Search session state machine.
pub struct SearchSession<M = SubstringMatcher> {
    catalog: Arc<Catalog>,
    matcher: M,
    limit: usize,
    query: SearchQuery,
    generation: u64,
    state: SessionState,
}

impl SearchSession<SubstringMatcher> {
    pub fn new(catalog: Arc<Catalog>, limit: usize) -> Self {
        Self::with_matcher(catalog, SubstringMatcher, limit)
    }
}

impl<M: QueryMatcher> SearchSession<M> {
    pub fn with_matcher(catalog: Arc<Catalog>, matcher: M, limit: usize) -> Self {
        Self {
            catalog,
            matcher,
            limit,
            query: SearchQuery::new(""),
            generation: 0,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Generation of the most recent searchable keystroke.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn handle(&mut self, event: SessionEvent) -> Effect {
        match event {
            SessionEvent::Keystroke(text) => self.keystroke(text),
            SessionEvent::Settled { generation } => self.settle(generation),
            SessionEvent::Select(id) => self.select(&id),
            SessionEvent::PointerDown { inside_search } => {
                if inside_search {
                    Effect::None
                } else {
                    self.to_idle()
                }
            }
            SessionEvent::Clear => {
                self.query = SearchQuery::new("");
                self.to_idle()
            }
        }
    }

    fn keystroke(&mut self, text: String) -> Effect {
        self.query = SearchQuery::new(text);
        if !is_searchable(&self.query) {
            return self.to_idle();
        }
        self.generation += 1;
        self.state = SessionState::PendingQuery {
            query: self.query.normalized().to_string(),
        };
        Effect::Schedule {
            generation: self.generation,
        }
    }

    fn settle(&mut self, generation: u64) -> Effect {
        let pending = matches!(self.state, SessionState::PendingQuery { .. });
        if !pending || generation != self.generation {
            debug!(
                "Ignoring stale settle {} (current {})",
                generation, self.generation
            );
            return Effect::None;
        }

        let results = self
            .matcher
            .find(&self.query, self.catalog.items())
            .capped(self.limit);
        let query = self.query.normalized().to_string();
        debug!("Query '{}' settled with {} results", query, results.len());

        self.state = if results.is_empty() {
            SessionState::ShowingEmpty { query }
        } else {
            SessionState::ShowingResults { query, results }
        };
        Effect::None
    }

    fn select(&mut self, id: &str) -> Effect {
        let target = self
            .state
            .results()
            .and_then(|results| results.find(id))
            .map(|item| item.navigation_target.clone());

        match target {
            Some(target) => {
                self.query = SearchQuery::new("");
                self.to_idle();
                Effect::Navigate(target)
            }
            None => {
                debug!("Ignoring selection of '{}' not in visible results", id);
                Effect::None
            }
        }
    }

    /// Hide the panel and invalidate any settle still in flight.
    fn to_idle(&mut self) -> Effect {
        self.generation += 1;
        self.state = SessionState::Idle;
        Effect::Cancel
    }
}

/// Async owner of a [`SearchSession`].
pub struct SearchController {
    events: mpsc::UnboundedSender<SessionEvent>,
    state: watch::Receiver<SessionState>,
    task: JoinHandle<()>,
}

impl SearchController {
    /// Spawn the controller task on the current runtime.
    pub fn spawn<M, N>(session: SearchSession<M>, navigator: N, debounce: Duration) -> Self
    where
        M: QueryMatcher + 'static,
        N: Navigator + 'static,
    {
        let (events, rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(session.state().clone());
        let task = tokio::spawn(run(session, navigator, debounce, events.clone(), rx, state_tx));
        Self {
            events,
            state,
            task,
        }
    }

    pub fn keystroke(&self, text: impl Into<String>) {
        self.send(SessionEvent::Keystroke(text.into()));
    }

    pub fn select(&self, id: impl Into<String>) {
        self.send(SessionEvent::Select(id.into()));
    }

    pub fn pointer_down(&self, inside_search: bool) {
        self.send(SessionEvent::PointerDown { inside_search });
    }

    pub fn clear(&self) {
        self.send(SessionEvent::Clear);
    }

    /// Latest published state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    fn send(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("Search controller stopped; event dropped");
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<M, N>(
    mut session: SearchSession<M>,
    mut navigator: N,
    delay: Duration,
    events: mpsc::UnboundedSender<SessionEvent>,
    mut rx: mpsc::UnboundedReceiver<SessionEvent>,
    state_tx: watch::Sender<SessionState>,
) where
    M: QueryMatcher,
    N: Navigator,
{
    let debouncer = Debouncer::new();

    while let Some(event) = rx.recv().await {
        match session.handle(event) {
            Effect::None => {}
            Effect::Schedule { generation } => {
                let events = events.clone();
                debouncer.schedule(delay, move || {
                    let _ = events.send(SessionEvent::Settled { generation });
                });
            }
            Effect::Cancel => debouncer.cancel(),
            Effect::Navigate(target) => {
                debouncer.cancel();
                navigator.navigate(&target);
            }
        }

        let next = session.state();
        state_tx.send_if_modified(|current| {
            if *current == *next {
                false
            } else {
                *current = next.clone();
                true
            }
        });
    }
}
