use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::domain::{SearchResponse, ViewState};
use crate::errors::SearchResult;
use crate::sources::PhotoSource;

enum Command {
    SetQuery(String),
    Retry,
}

struct Completion {
    generation: u64,
    term: String,
    result: SearchResult<SearchResponse>,
}

/// Owns the search text and turns it into a [`ViewState`].
///
/// Every transition happens on one background task, so callers can feed
/// text from anywhere without locking. Text changes are deduplicated and
/// debounced; each evaluation bumps a generation counter and a fetch result
/// is applied only while its generation is still the newest one.
///
/// Must be created inside a tokio runtime.
pub struct SearchController {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ViewState>,
}

impl SearchController {
    pub fn new<S: PhotoSource + 'static>(source: S, debounce: Duration) -> Self {
        Self::with_source(Arc::new(source), debounce)
    }

    pub fn with_source(source: Arc<dyn PhotoSource>, debounce: Duration) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(ViewState::Idle);

        let (query_loop, completion_rx) = QueryLoop::new(source, debounce, state_tx);
        tokio::spawn(query_loop.run(command_rx, completion_rx));

        Self { commands, state }
    }

    /// Replace the search text. A fetch follows once the text has been
    /// stable for the debounce delay.
    pub fn set_query(&self, text: impl Into<String>) {
        let _ = self.commands.send(Command::SetQuery(text.into()));
    }

    /// Re-run the current text right away. Does nothing when the text is empty.
    pub fn retry(&self) {
        let _ = self.commands.send(Command::Retry);
    }

    pub fn current_state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Watch state transitions. Slow readers only see the latest state.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Evaluate `term` once without debouncing, using the same projection
    /// as the controller.
    pub async fn evaluate_once(source: &dyn PhotoSource, term: &str) -> ViewState {
        if term.is_empty() {
            return ViewState::Idle;
        }
        ViewState::from_fetch(source.fetch(term).await)
    }
}

struct QueryLoop {
    source: Arc<dyn PhotoSource>,
    debounce: Duration,
    state: watch::Sender<ViewState>,
    text: String,
    deadline: Option<Instant>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    completions: mpsc::UnboundedSender<Completion>,
}

impl QueryLoop {
    fn new(
        source: Arc<dyn PhotoSource>,
        debounce: Duration,
        state: watch::Sender<ViewState>,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completions, completion_rx) = mpsc::unbounded_channel();

        let query_loop = Self {
            source,
            debounce,
            state,
            text: String::new(),
            deadline: None,
            generation: 0,
            in_flight: None,
            completions,
        };
        (query_loop, completion_rx)
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut completion_rx: mpsc::UnboundedReceiver<Completion>,
    ) {
        loop {
            let deadline = self.deadline;

            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::SetQuery(text)) => self.on_query(text),
                    Some(Command::Retry) => self.on_retry(),
                    // Controller dropped
                    None => break,
                },
                _ = wait_until(deadline) => {
                    self.deadline = None;
                    let text = self.text.clone();
                    self.evaluate(text);
                }
                Some(done) = completion_rx.recv() => self.on_completion(done),
            }
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }

    fn on_query(&mut self, text: String) {
        if text == self.text {
            debug!(query = %text, "query unchanged, ignoring");
            return;
        }

        debug!(query = %text, "query changed, debouncing");
        self.text = text;
        self.deadline = Some(Instant::now() + self.debounce);
    }

    fn on_retry(&mut self) {
        if self.text.is_empty() {
            debug!("retry ignored, no query");
            return;
        }

        info!(query = %self.text, "retrying search");
        self.deadline = None;
        let text = self.text.clone();
        self.evaluate(text);
    }

    fn evaluate(&mut self, text: String) {
        self.generation += 1;
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }

        if text.is_empty() {
            self.publish(ViewState::Idle);
            return;
        }

        self.publish(ViewState::Loading);
        debug!(query = %text, generation = self.generation, "fetching");

        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let done = self.completions.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = source.fetch(&text).await;
            let _ = done.send(Completion {
                generation,
                term: text,
                result,
            });
        }));
    }

    fn on_completion(&mut self, done: Completion) {
        if done.generation != self.generation {
            debug!(
                query = %done.term,
                generation = done.generation,
                latest = self.generation,
                "discarding stale result"
            );
            return;
        }

        self.in_flight = None;
        if let Err(e) = &done.result {
            warn!(query = %done.term, error = %e, "search failed");
        }
        self.publish(ViewState::from_fetch(done.result));
    }

    fn publish(&self, state: ViewState) {
        self.state.send_replace(state);
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
