//! Async runtime around [`ListState`]
//!
//! `IncrementalListStore` owns the list state, executes the commands it emits on
//! tokio and feeds responses back in as messages. Everything that touches the
//! state happens on the caller's task: spawned loads only send messages, so
//! the state behaves like a single-threaded event loop.
//!
//! The view layer either polls [`IncrementalListStore::snapshot`] or watches
//! [`IncrementalListStore::subscribe`], and drives the loop with
//! [`IncrementalListStore::next_event`] (usually inside its own `select!`).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{cmd::Cmd, error::LoadError},
    domain::entity::Entity,
    infrastructure::{config::ListConfig, loader::PageLoader},
    model::list::{ListSnapshot, ListState, Message},
    utils::panic::isolate_panics,
};

pub struct IncrementalListStore<E: Entity, F, L> {
    state: ListState<E, F>,
    loader: Arc<L>,
    debounce: Duration,
    // Incoming channel (responses and timers)
    msg_tx: mpsc::UnboundedSender<Message<E, F>>,
    msg_rx: mpsc::UnboundedReceiver<Message<E, F>>,
    // Outgoing channel (view bindings)
    snapshot_tx: watch::Sender<ListSnapshot<E>>,
    cancel_token: CancellationToken,
    torn_down: bool,
    in_flight: Option<JoinHandle<()>>,
    debounce_timer: Option<JoinHandle<()>>,
}

impl<E, F, L> IncrementalListStore<E, F, L>
where
    E: Entity + Clone + Send + Sync + 'static,
    F: Clone + Default + Send + Sync + 'static,
    L: PageLoader<E, F>,
{
    /// Create a store around a page loader
    ///
    /// With `init_immediately` set the first page is requested right away, which
    /// requires being called from within a tokio runtime.
    pub fn new(loader: L, config: ListConfig) -> Self {
        Self::with_shared_loader(Arc::new(loader), config)
    }

    pub fn with_shared_loader(loader: Arc<L>, config: ListConfig) -> Self {
        let state = ListState::new(config.limit);
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(state.snapshot());

        let mut store = Self {
            state,
            loader,
            debounce: config.debounce(),
            msg_tx,
            msg_rx,
            snapshot_tx,
            cancel_token: CancellationToken::new(),
            torn_down: false,
            in_flight: None,
            debounce_timer: None,
        };
        if config.init_immediately {
            store.init(None);
        }
        store
    }

    // === View-facing operations ===

    /// Clear the list and load the first page, optionally replacing the filters
    pub fn init(&mut self, filters: Option<F>) {
        self.dispatch(Message::InitRequested { filters });
    }

    /// Reload from the first page with the current filters (after a create/delete)
    pub fn reset(&mut self) {
        self.init(None);
    }

    /// Load the next page; does nothing while loading or when everything is loaded
    pub fn paginate(&mut self) {
        self.dispatch(Message::PaginateRequested);
    }

    pub fn set_filters(&mut self, filters: F) {
        self.dispatch(Message::FiltersChanged(filters));
    }

    /// Replace the filters once no other debounced change arrives for the debounce delay
    pub fn set_filters_debounced(&mut self, filters: F) {
        self.dispatch(Message::FiltersDebounced(filters));
    }

    pub fn clear_filters(&mut self) {
        self.dispatch(Message::FiltersCleared);
    }

    /// Replace an already loaded entity in place; unknown ids are ignored
    pub fn edit_entity(&mut self, entity: E) {
        self.dispatch(Message::EntityEdited(entity));
    }

    /// Stop all outstanding work; late responses become no-ops
    ///
    /// The store ignores every operation afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.apply(Message::TornDown);
        self.cancel_token.cancel();
    }

    /// Token that tears the store down when cancelled, for owners that moved
    /// the store into a background driver
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    // === Reactive surface ===

    pub fn snapshot(&self) -> ListSnapshot<E> {
        self.snapshot_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<E>> {
        self.snapshot_tx.subscribe()
    }

    pub fn list(&self) -> &[E] {
        self.state.list()
    }

    pub fn total(&self) -> Option<usize> {
        self.state.total()
    }

    pub fn is_initial_loading(&self) -> bool {
        self.state.is_initial_loading()
    }

    pub fn is_paginating(&self) -> bool {
        self.state.is_paginating()
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    pub fn has_no_data(&self) -> bool {
        self.state.has_no_data()
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.state.last_error()
    }

    pub fn filters(&self) -> &F {
        self.state.filters()
    }

    /// Filters including a pending debounced change
    pub fn requested_filters(&self) -> &F {
        self.state.requested_filters()
    }

    pub fn limit(&self) -> usize {
        self.state.limit()
    }

    pub fn state(&self) -> &ListState<E, F> {
        &self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down || self.cancel_token.is_cancelled()
    }

    /// Whether a load or a debounce timer is outstanding
    pub fn is_busy(&self) -> bool {
        self.state.is_loading() || self.state.has_pending_debounce() || !self.msg_rx.is_empty()
    }

    // === Event loop ===

    /// Wait for one response or timer and apply it
    /// Returns false once the store has been torn down.
    pub async fn next_event(&mut self) -> bool {
        if self.is_torn_down() {
            self.teardown();
            return false;
        }

        tokio::select! {
            msg = self.msg_rx.recv() => match msg {
                Some(msg) => {
                    self.dispatch(msg);
                    true
                }
                None => false,
            },
            _ = self.cancel_token.cancelled() => {
                self.teardown();
                false
            }
        }
    }

    /// Drive the loop until nothing is in flight
    pub async fn settle(&mut self) {
        while self.is_busy() {
            if !self.next_event().await {
                break;
            }
        }
    }

    /// Drive the loop until the store is torn down
    pub async fn run_until_torn_down(&mut self) {
        while self.next_event().await {}
    }

    fn dispatch(&mut self, msg: Message<E, F>) {
        if self.is_torn_down() {
            // The token may have been cancelled from outside
            self.teardown();
            tracing::debug!(msg = msg.name(), "store torn down, ignoring message");
            return;
        }
        self.apply(msg);
    }

    fn apply(&mut self, msg: Message<E, F>) {
        tracing::trace!(msg = msg.name(), "dispatch");
        let revision = self.state.revision();
        let cmd = self.state.update(msg);
        self.execute(cmd);
        if self.state.revision() != revision {
            self.snapshot_tx.send_replace(self.state.snapshot());
        }
    }

    fn execute(&mut self, cmd: Cmd<F>) {
        if !cmd.is_none() {
            tracing::trace!(cmd = cmd.name(), "execute");
        }

        match cmd {
            Cmd::None => {}
            Cmd::LoadPage {
                generation,
                kind,
                params,
            } => {
                // The loader is called right away; only waiting for the response is deferred
                let response = isolate_panics(PageLoader::<E, F>::load(&*self.loader, params));
                let msg_tx = self.msg_tx.clone();
                let cancel_token = self.cancel_token.clone();

                let handle = tokio::spawn(async move {
                    tokio::select! {
                        response = response => {
                            let result = response.unwrap_or_else(|_| {
                                tracing::error!(?kind, "page loader panicked");
                                Err(LoadError::Transport("page loader panicked".to_string()))
                            });
                            let _ = msg_tx.send(Message::PageLoaded {
                                generation,
                                kind,
                                result,
                            });
                        }
                        _ = cancel_token.cancelled() => {
                            tracing::debug!(?kind, "load cancelled");
                        }
                    }
                });

                // Only one load is ever awaited; a superseded one is abandoned
                if let Some(previous) = self.in_flight.replace(handle) {
                    previous.abort();
                }
            }
            Cmd::ScheduleDebounce { ticket } => {
                let msg_tx = self.msg_tx.clone();
                let delay = self.debounce;

                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = msg_tx.send(Message::DebounceElapsed { ticket });
                });

                if let Some(previous) = self.debounce_timer.replace(handle) {
                    previous.abort();
                }
            }
            Cmd::CancelAll => {
                if let Some(handle) = self.in_flight.take() {
                    handle.abort();
                }
                if let Some(handle) = self.debounce_timer.take() {
                    handle.abort();
                }
            }
        }
    }
}

impl<E: Entity, F, L> Drop for IncrementalListStore<E, F, L> {
    fn drop(&mut self) {
        self.cancel_token.cancel();
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        if let Some(handle) = self.debounce_timer.take() {
            handle.abort();
        }
    }
}
