//! Incremental list state
//!
//! This module acts as a parent component that coordinates the entity collection
//! and the pagination cursor, following the Elm Architecture pattern:
//! - `update` is the only way to change the state
//! - side effects are returned as [`Cmd`] values instead of being performed
//!
//! Every reset (init, filter change, teardown) starts a new [`Generation`].
//! Responses are tagged with the generation that requested them and anything
//! tagged with an older generation is discarded, so a slow response can never
//! overwrite the result of a newer request.

use std::fmt;

use crate::{
    core::{cmd::Cmd, error::LoadError},
    domain::{collections::EntitySet, entity::Entity, page::Page},
};

use super::pagination::{LoadKind, Message as PaginationMessage, Pagination};

/// Monotonic marker of a list lifetime; bumped on every reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Messages that can be sent to update the list state
///
/// Messages are grouped by their origin:
/// - View-triggered: init, paginate, filter changes, edits, teardown
/// - Runtime-triggered: page responses and elapsed debounce timers
#[derive(Debug, Clone)]
pub enum Message<E, F> {
    /// (Re)load the list from the first page, optionally replacing the filters
    InitRequested { filters: Option<F> },
    /// The next page was requested (usually the end of the list became visible)
    PaginateRequested,
    /// Filters were replaced
    FiltersChanged(F),
    /// Filters were reset to their default
    FiltersCleared,
    /// Filters were replaced, but should only take effect once input settles
    FiltersDebounced(F),
    /// The debounce timer with this ticket fired
    DebounceElapsed { ticket: u64 },
    /// An entity was edited upstream; the returned entity replaces the loaded one
    EntityEdited(E),
    /// A page loader call finished
    PageLoaded {
        generation: Generation,
        kind: LoadKind,
        result: Result<Page<E>, LoadError>,
    },
    /// The owning view went away
    TornDown,
}

impl<E, F> Message<E, F> {
    pub fn name(&self) -> &'static str {
        match self {
            Message::InitRequested { .. } => "InitRequested",
            Message::PaginateRequested => "PaginateRequested",
            Message::FiltersChanged(_) => "FiltersChanged",
            Message::FiltersCleared => "FiltersCleared",
            Message::FiltersDebounced(_) => "FiltersDebounced",
            Message::DebounceElapsed { .. } => "DebounceElapsed",
            Message::EntityEdited(_) => "EntityEdited",
            Message::PageLoaded { .. } => "PageLoaded",
            Message::TornDown => "TornDown",
        }
    }
}

/// Read-only view of the list handed to UI bindings
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<E> {
    pub list: Vec<E>,
    pub total: Option<usize>,
    pub is_initial_loading: bool,
    pub is_paginating: bool,
    pub has_more: bool,
    /// A load finished and reported zero matching entities (or failed)
    pub has_no_data: bool,
    /// Error of the most recent load, cleared by the next successful one or by a reset
    pub last_error: Option<LoadError>,
}

impl<E> Default for ListSnapshot<E> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            total: None,
            is_initial_loading: false,
            is_paginating: false,
            has_more: true,
            has_no_data: false,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListState<E: Entity, F> {
    entities: EntitySet<E>,
    pagination: Pagination,
    filters: F,
    generation: Generation,
    // Filters waiting for their debounce ticket
    pending_filters: Option<(u64, F)>,
    last_ticket: u64,
    last_error: Option<LoadError>,
    // Bumped whenever anything visible in a snapshot changes
    revision: u64,
}

impl<E, F> ListState<E, F>
where
    E: Entity,
    F: Clone + Default,
{
    pub fn new(limit: usize) -> Self {
        Self::with_filters(limit, F::default())
    }

    pub fn with_filters(limit: usize, filters: F) -> Self {
        Self {
            entities: EntitySet::new(),
            pagination: Pagination::new(limit),
            filters,
            generation: Generation::default(),
            pending_filters: None,
            last_ticket: 0,
            last_error: None,
            revision: 0,
        }
    }

    /// Loaded entities in display order
    pub fn list(&self) -> &[E] {
        self.entities.as_slice()
    }

    pub fn entities(&self) -> &EntitySet<E> {
        &self.entities
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn total(&self) -> Option<usize> {
        self.pagination.total()
    }

    pub fn skip(&self) -> usize {
        self.pagination.skip()
    }

    pub fn limit(&self) -> usize {
        self.pagination.limit()
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    pub fn is_initial_loading(&self) -> bool {
        self.pagination.is_initial_loading()
    }

    pub fn is_paginating(&self) -> bool {
        self.pagination.is_paginating()
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn has_no_data(&self) -> bool {
        self.pagination.total() == Some(0)
    }

    /// Filters the current list was loaded with
    pub fn filters(&self) -> &F {
        &self.filters
    }

    /// Filters the list will end up with: pending debounced filters if any, else the current ones
    pub fn requested_filters(&self) -> &F {
        self.pending_filters
            .as_ref()
            .map_or(&self.filters, |(_, filters)| filters)
    }

    pub fn has_pending_debounce(&self) -> bool {
        self.pending_filters.is_some()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    /// Changes whenever [`ListState::snapshot`] would return something different
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn snapshot(&self) -> ListSnapshot<E>
    where
        E: Clone,
    {
        ListSnapshot {
            list: self.entities.to_vec(),
            total: self.total(),
            is_initial_loading: self.is_initial_loading(),
            is_paginating: self.is_paginating(),
            has_more: self.has_more(),
            has_no_data: self.has_no_data(),
            last_error: self.last_error.clone(),
        }
    }

    /// Update the list state based on a message
    ///
    /// Returns the side effect the runtime has to perform next.
    pub fn update(&mut self, message: Message<E, F>) -> Cmd<F> {
        match message {
            Message::InitRequested { filters } => {
                if let Some(filters) = filters {
                    self.replace_filters(filters);
                }
                self.restart()
            }
            Message::PaginateRequested => {
                if !self.pagination.can_paginate() {
                    tracing::trace!(
                        is_initial_loading = self.is_initial_loading(),
                        is_paginating = self.is_paginating(),
                        has_more = self.has_more(),
                        "paginate ignored"
                    );
                    return Cmd::None;
                }
                self.pagination.update(PaginationMessage::LoadingMoreStarted);
                self.touch();
                Cmd::LoadPage {
                    generation: self.generation,
                    kind: LoadKind::More,
                    params: self.pagination.params(LoadKind::More, self.filters.clone()),
                }
            }
            Message::FiltersChanged(filters) => {
                self.replace_filters(filters);
                self.restart()
            }
            Message::FiltersCleared => {
                self.replace_filters(F::default());
                self.restart()
            }
            Message::FiltersDebounced(filters) => {
                self.last_ticket += 1;
                self.pending_filters = Some((self.last_ticket, filters));
                Cmd::ScheduleDebounce {
                    ticket: self.last_ticket,
                }
            }
            Message::DebounceElapsed { ticket } => match self.pending_filters.take() {
                Some((pending, filters)) if pending == ticket => {
                    self.filters = filters;
                    self.restart()
                }
                pending => {
                    // Superseded by a newer debounced change or an explicit filter change
                    self.pending_filters = pending;
                    Cmd::None
                }
            },
            Message::EntityEdited(entity) => {
                let id = entity.id();
                if self.entities.replace(entity) {
                    self.touch();
                } else {
                    tracing::trace!(?id, "edit ignored: entity is not loaded");
                }
                Cmd::None
            }
            Message::PageLoaded {
                generation,
                kind,
                result,
            } => self.apply_page(generation, kind, result),
            Message::TornDown => {
                self.generation = self.generation.next();
                self.entities.clear();
                self.pagination.update(PaginationMessage::Discarded);
                self.pending_filters = None;
                self.last_error = None;
                self.touch();
                Cmd::CancelAll
            }
        }
    }

    fn replace_filters(&mut self, filters: F) {
        self.filters = filters;
        self.pending_filters = None;
    }

    fn restart(&mut self) -> Cmd<F> {
        self.generation = self.generation.next();
        self.entities.clear();
        self.last_error = None;
        self.pagination.update(PaginationMessage::ResetStarted);
        self.touch();
        tracing::debug!(generation = %self.generation, "list reset");

        Cmd::LoadPage {
            generation: self.generation,
            kind: LoadKind::Initial,
            params: self
                .pagination
                .params(LoadKind::Initial, self.filters.clone()),
        }
    }

    fn apply_page(
        &mut self,
        generation: Generation,
        kind: LoadKind,
        result: Result<Page<E>, LoadError>,
    ) -> Cmd<F> {
        if generation != self.generation {
            tracing::trace!(
                stale = %generation,
                current = %self.generation,
                "discarding stale page"
            );
            return Cmd::None;
        }
        if !self.pagination.is_loading_kind(kind) {
            tracing::trace!(?kind, "discarding page nobody is waiting for");
            return Cmd::None;
        }

        match result {
            Ok(page) => {
                let inserted = self.entities.merge(page.items);
                self.pagination.update(PaginationMessage::PageReceived {
                    kind,
                    loaded: self.entities.len(),
                    total: page.total,
                });
                self.last_error = None;
                tracing::debug!(
                    ?kind,
                    inserted,
                    loaded = self.entities.len(),
                    total = page.total,
                    "page applied"
                );
            }
            Err(error) => {
                tracing::warn!(?kind, %error, "page load failed");
                if kind == LoadKind::Initial {
                    self.entities.clear();
                }
                self.pagination.update(PaginationMessage::PageFailed { kind });
                self.last_error = Some(error);
            }
        }
        self.touch();

        Cmd::None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;
    use crate::{
        domain::{filters::FilterSet, page::PageParams},
        test_helpers::{game_page, Game},
    };

    type State = ListState<Game, FilterSet>;

    /// Unwrap a `Cmd::LoadPage`, panicking on anything else
    fn expect_load(cmd: Cmd<FilterSet>) -> (Generation, LoadKind, PageParams<FilterSet>) {
        match cmd {
            Cmd::LoadPage {
                generation,
                kind,
                params,
            } => (generation, kind, params),
            other => panic!("expected LoadPage, got {other:?}"),
        }
    }

    fn loaded(
        generation: Generation,
        kind: LoadKind,
        result: Result<Page<Game>, LoadError>,
    ) -> Message<Game, FilterSet> {
        Message::PageLoaded {
            generation,
            kind,
            result,
        }
    }

    fn ids(state: &State) -> Vec<i64> {
        state.list().iter().map(|game| game.id).collect()
    }

    /// State with the first page (ids 1..=2, total 5) already applied
    #[fixture]
    fn first_page_loaded() -> State {
        let mut state = State::new(2);
        let (generation, kind, _) = expect_load(state.update(Message::InitRequested { filters: None }));
        let _ = state.update(loaded(generation, kind, Ok(game_page(&[1, 2], 5))));
        state
    }

    #[test]
    fn test_list_state_default() {
        let state = State::new(10);
        assert!(state.list().is_empty());
        assert_eq!(state.total(), None);
        assert_eq!(state.limit(), 10);
        assert!(!state.is_loading());
        assert!(!state.has_no_data());
        assert_eq!(state.filters(), &FilterSet::new());
    }

    #[test]
    fn test_init_requests_first_page() {
        let mut state = State::new(2);
        let filters = FilterSet::new().with("category", "RTS");

        let (generation, kind, params) = expect_load(state.update(Message::InitRequested {
            filters: Some(filters.clone()),
        }));

        assert_eq!(generation, state.generation());
        assert_eq!(kind, LoadKind::Initial);
        assert_eq!(params, PageParams::new(0, 2, filters.clone()));
        assert!(state.is_initial_loading());
        assert_eq!(state.total(), None);
        assert_eq!(state.filters(), &filters);
    }

    #[test]
    fn test_happy_path_pagination() {
        let mut state = State::new(2);

        let (generation, kind, _) = expect_load(state.update(Message::InitRequested { filters: None }));
        let _ = state.update(loaded(generation, kind, Ok(game_page(&[1, 2], 5))));
        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(state.skip(), 2);
        assert!(state.has_more());

        let (generation, kind, params) = expect_load(state.update(Message::PaginateRequested));
        assert_eq!(kind, LoadKind::More);
        assert_eq!(params.skip, 2);
        assert!(state.is_paginating());
        let _ = state.update(loaded(generation, kind, Ok(game_page(&[3, 4], 5))));
        assert_eq!(ids(&state), vec![1, 2, 3, 4]);
        assert_eq!(state.skip(), 4);
        assert!(state.has_more());

        let (generation, kind, params) = expect_load(state.update(Message::PaginateRequested));
        assert_eq!(params.skip, 4);
        let _ = state.update(loaded(generation, kind, Ok(game_page(&[5], 5))));
        assert_eq!(ids(&state), vec![1, 2, 3, 4, 5]);
        assert_eq!(state.skip(), 5);
        assert!(!state.has_more());

        // Nothing left to load
        assert_eq!(state.update(Message::PaginateRequested), Cmd::None);
    }

    #[rstest]
    fn test_paginate_twice_issues_one_request(mut first_page_loaded: State) {
        let first = first_page_loaded.update(Message::PaginateRequested);
        let second = first_page_loaded.update(Message::PaginateRequested);

        assert!(matches!(first, Cmd::LoadPage { .. }));
        assert_eq!(second, Cmd::None);
    }

    #[test]
    fn test_paginate_ignored_during_initial_load() {
        let mut state = State::new(2);
        let _ = state.update(Message::InitRequested { filters: None });
        assert_eq!(state.update(Message::PaginateRequested), Cmd::None);
    }

    #[rstest]
    fn test_overlapping_page_keeps_ids_unique(mut first_page_loaded: State) {
        let (generation, kind, _) = expect_load(first_page_loaded.update(Message::PaginateRequested));

        // The server shifted by one: id 2 comes again with fresh data
        let page = Page::new(vec![Game::new(2, "fresh"), Game::new(3, "c")], 5);
        let _ = first_page_loaded.update(loaded(generation, kind, Ok(page)));

        assert_eq!(ids(&first_page_loaded), vec![1, 2, 3]);
        assert_eq!(first_page_loaded.list()[1].name, "fresh");
        assert_eq!(first_page_loaded.skip(), first_page_loaded.list().len());
        assert!(first_page_loaded.has_more());
    }

    #[test]
    fn test_stale_init_response_is_discarded() {
        let mut state = State::new(2);

        let (first_generation, kind, first_params) =
            expect_load(state.update(Message::InitRequested {
                filters: Some(FilterSet::new().with("a", 1)),
            }));
        let (second_generation, _, second_params) =
            expect_load(state.update(Message::InitRequested {
                filters: Some(FilterSet::new().with("a", 2)),
            }));
        assert_ne!(first_generation, second_generation);
        assert_eq!(first_params.filters.get("a"), Some(&serde_json::json!(1)));
        assert_eq!(second_params.filters.get("a"), Some(&serde_json::json!(2)));

        // First response arrives late
        let _ = state.update(loaded(first_generation, kind, Ok(game_page(&[10, 11], 7))));
        assert!(state.list().is_empty());
        assert_eq!(state.total(), None);
        assert!(state.is_initial_loading());

        let _ = state.update(loaded(second_generation, kind, Ok(game_page(&[20], 1))));
        assert_eq!(ids(&state), vec![20]);
        assert_eq!(state.total(), Some(1));
        assert!(!state.is_initial_loading());
    }

    #[rstest]
    fn test_stale_paginate_response_is_discarded(mut first_page_loaded: State) {
        let (stale_generation, _, _) = expect_load(first_page_loaded.update(Message::PaginateRequested));
        let (generation, kind, _) = expect_load(first_page_loaded.update(Message::InitRequested { filters: None }));

        let _ = first_page_loaded.update(loaded(
            stale_generation,
            LoadKind::More,
            Ok(game_page(&[3, 4], 5)),
        ));
        assert!(first_page_loaded.list().is_empty());
        assert!(!first_page_loaded.is_paginating());
        assert!(first_page_loaded.is_initial_loading());

        let _ = first_page_loaded.update(loaded(generation, kind, Ok(game_page(&[1, 2], 5))));
        assert_eq!(ids(&first_page_loaded), vec![1, 2]);
    }

    #[rstest]
    fn test_unexpected_page_is_discarded(mut first_page_loaded: State) {
        // Same generation, but no "load more" is outstanding
        let generation = first_page_loaded.generation();
        let _ = first_page_loaded.update(loaded(generation, LoadKind::More, Ok(game_page(&[9], 9))));

        assert_eq!(ids(&first_page_loaded), vec![1, 2]);
        assert_eq!(first_page_loaded.total(), Some(5));
    }

    #[test]
    fn test_failed_init_reads_as_empty() {
        let mut state = State::new(2);
        let (generation, kind, _) = expect_load(state.update(Message::InitRequested { filters: None }));

        let _ = state.update(loaded(
            generation,
            kind,
            Err(LoadError::Transport("connection refused".to_string())),
        ));

        assert_eq!(state.total(), Some(0));
        assert!(state.list().is_empty());
        assert!(!state.is_initial_loading());
        assert!(!state.has_more());
        assert!(state.has_no_data());
        assert_eq!(
            state.last_error(),
            Some(&LoadError::Transport("connection refused".to_string()))
        );
        assert_eq!(state.update(Message::PaginateRequested), Cmd::None);
    }

    #[rstest]
    fn test_failed_paginate_is_retryable(mut first_page_loaded: State) {
        let (generation, kind, _) = expect_load(first_page_loaded.update(Message::PaginateRequested));
        let _ = first_page_loaded.update(loaded(generation, kind, Err(LoadError::Cancelled)));

        assert_eq!(ids(&first_page_loaded), vec![1, 2]);
        assert_eq!(first_page_loaded.total(), Some(5));
        assert!(first_page_loaded.has_more());
        assert!(!first_page_loaded.is_paginating());
        assert_eq!(first_page_loaded.last_error(), Some(&LoadError::Cancelled));

        // Retry asks for the same page and a success clears the error
        let (generation, kind, params) = expect_load(first_page_loaded.update(Message::PaginateRequested));
        assert_eq!(params.skip, 2);
        let _ = first_page_loaded.update(loaded(generation, kind, Ok(game_page(&[3, 4], 5))));
        assert_eq!(ids(&first_page_loaded), vec![1, 2, 3, 4]);
        assert_eq!(first_page_loaded.last_error(), None);
    }

    #[test]
    fn test_edit_entity_in_place() {
        let mut state = State::new(10);
        let (generation, kind, _) = expect_load(state.update(Message::InitRequested { filters: None }));
        let page = Page::new(vec![Game::new(1, "x"), Game::new(2, "y")], 2);
        let _ = state.update(loaded(generation, kind, Ok(page)));

        assert_eq!(state.update(Message::EntityEdited(Game::new(1, "z"))), Cmd::None);

        assert_eq!(state.list(), &[Game::new(1, "z"), Game::new(2, "y")]);
        assert_eq!(state.skip(), 2);
        assert_eq!(state.total(), Some(2));
    }

    #[rstest]
    fn test_edit_unknown_entity_is_noop(mut first_page_loaded: State) {
        let before = first_page_loaded.snapshot();
        let _ = first_page_loaded.update(Message::EntityEdited(Game::new(99, "ghost")));
        assert_eq!(first_page_loaded.snapshot(), before);
    }

    #[rstest]
    fn test_filter_change_resets(mut first_page_loaded: State) {
        let rts = FilterSet::new().with("category", "RTS");
        let fps = FilterSet::new().with("category", "FPS");
        let (generation, kind, _) = expect_load(first_page_loaded.update(Message::FiltersChanged(rts)));
        let _ = first_page_loaded.update(loaded(generation, kind, Ok(game_page(&[1, 2, 3, 4], 4))));
        assert_eq!(first_page_loaded.list().len(), 4);

        let (generation, kind, params) =
            expect_load(first_page_loaded.update(Message::FiltersChanged(fps.clone())));

        assert!(first_page_loaded.list().is_empty());
        assert_eq!(params, PageParams::new(0, 2, fps));
        let _ = first_page_loaded.update(loaded(generation, kind, Ok(game_page(&[7, 8], 2))));
        assert_eq!(ids(&first_page_loaded), vec![7, 8]);
    }

    #[rstest]
    fn test_clear_filters(mut first_page_loaded: State) {
        let _ = first_page_loaded.update(Message::FiltersChanged(FilterSet::new().with("a", 1)));
        let (_, _, params) = expect_load(first_page_loaded.update(Message::FiltersCleared));

        assert_eq!(params.filters, FilterSet::new());
        assert_eq!(first_page_loaded.filters(), &FilterSet::new());
    }

    #[test]
    fn test_debounced_filters_apply_latest_ticket_only() {
        let mut state = State::new(2);
        let rts = FilterSet::new().with("category", "RTS");
        let fps = FilterSet::new().with("category", "FPS");

        assert_eq!(
            state.update(Message::FiltersDebounced(rts)),
            Cmd::ScheduleDebounce { ticket: 1 }
        );
        assert_eq!(
            state.update(Message::FiltersDebounced(fps.clone())),
            Cmd::ScheduleDebounce { ticket: 2 }
        );
        assert!(state.has_pending_debounce());
        assert_eq!(state.requested_filters(), &fps);
        assert_eq!(state.filters(), &FilterSet::new());

        // The first timer fires late and is ignored
        assert_eq!(state.update(Message::DebounceElapsed { ticket: 1 }), Cmd::None);
        assert!(state.has_pending_debounce());

        let (_, kind, params) = expect_load(state.update(Message::DebounceElapsed { ticket: 2 }));
        assert_eq!(kind, LoadKind::Initial);
        assert_eq!(params.filters, fps);
        assert!(!state.has_pending_debounce());
    }

    #[test]
    fn test_explicit_filter_change_drops_pending_debounce() {
        let mut state = State::new(2);
        let _ = state.update(Message::FiltersDebounced(FilterSet::new().with("a", 1)));
        let _ = state.update(Message::FiltersChanged(FilterSet::new().with("b", 2)));

        assert!(!state.has_pending_debounce());
        assert_eq!(state.update(Message::DebounceElapsed { ticket: 1 }), Cmd::None);
        assert_eq!(state.filters(), &FilterSet::new().with("b", 2));
    }

    #[rstest]
    fn test_teardown_clears_and_invalidates(mut first_page_loaded: State) {
        let (generation, kind, _) = expect_load(first_page_loaded.update(Message::PaginateRequested));

        assert_eq!(first_page_loaded.update(Message::TornDown), Cmd::CancelAll);
        assert!(first_page_loaded.list().is_empty());
        assert!(!first_page_loaded.is_loading());
        assert_eq!(first_page_loaded.total(), None);

        let _ = first_page_loaded.update(loaded(generation, kind, Ok(game_page(&[3, 4], 5))));
        assert!(first_page_loaded.list().is_empty());
    }

    #[rstest]
    fn test_snapshot(first_page_loaded: State) {
        let snapshot = first_page_loaded.snapshot();

        assert_eq!(snapshot.list.len(), 2);
        assert_eq!(snapshot.total, Some(5));
        assert!(snapshot.has_more);
        assert!(!snapshot.is_initial_loading);
        assert!(!snapshot.is_paginating);
        assert!(!snapshot.has_no_data);
        assert_eq!(snapshot.last_error, None);
    }

    #[rstest]
    fn test_ignored_messages_keep_revision(mut first_page_loaded: State) {
        let revision = first_page_loaded.revision();
        let generation = first_page_loaded.generation();

        let _ = first_page_loaded.update(Message::EntityEdited(Game::new(99, "ghost")));
        let _ = first_page_loaded.update(loaded(generation, LoadKind::More, Ok(game_page(&[9], 9))));
        let _ = first_page_loaded.update(loaded(
            Generation::default(),
            LoadKind::Initial,
            Ok(game_page(&[7], 7)),
        ));
        let _ = first_page_loaded.update(Message::FiltersDebounced(FilterSet::new().with("a", 1)));

        assert_eq!(first_page_loaded.revision(), revision);
    }

    #[rstest]
    fn test_visible_changes_bump_revision(mut first_page_loaded: State) {
        let mut revision = first_page_loaded.revision();
        let mut bumped = |state: &State| {
            let changed = state.revision() != revision;
            revision = state.revision();
            changed
        };

        let (generation, kind, _) = expect_load(first_page_loaded.update(Message::PaginateRequested));
        assert!(bumped(&first_page_loaded));
        assert_eq!(first_page_loaded.update(Message::PaginateRequested), Cmd::None);
        assert!(!bumped(&first_page_loaded));

        let _ = first_page_loaded.update(loaded(generation, kind, Ok(game_page(&[3, 4], 5))));
        assert!(bumped(&first_page_loaded));

        let _ = first_page_loaded.update(Message::EntityEdited(Game::new(3, "Doom")));
        assert!(bumped(&first_page_loaded));

        let _ = first_page_loaded.update(Message::TornDown);
        assert!(bumped(&first_page_loaded));
    }

    #[test]
    fn test_message_name() {
        assert_eq!(Message::<Game, FilterSet>::PaginateRequested.name(), "PaginateRequested");
        assert_eq!(Message::<Game, FilterSet>::TornDown.name(), "TornDown");
    }
}
