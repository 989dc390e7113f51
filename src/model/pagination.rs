//! Pagination state management for incremental lists
//!
//! This module follows the Elm Architecture pattern:
//! - State changes only through the `update` function
//! - All state transitions are explicitly defined as `Message` variants
//! - The module is self-contained and doesn't know about the entities being loaded

use crate::domain::page::{PageParams, DEFAULT_LIMIT};

/// Which kind of load a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    /// First page after construction, reset or filter change
    Initial,
    /// "Load more" request appending to the current list
    More,
}

/// Messages that can be sent to update the pagination state
///
/// Following Elm conventions, messages are named in past tense
/// to indicate "what happened" rather than "what to do"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The list was cleared and its first page was requested
    ResetStarted,
    /// Loading the next page was started
    LoadingMoreStarted,
    /// A page arrived; `loaded` is the collection length after merging it
    PageReceived {
        kind: LoadKind,
        loaded: usize,
        total: usize,
    },
    /// A load failed
    PageFailed { kind: LoadKind },
    /// The list was thrown away; back to the state before the first load
    Discarded,
}

/// Offset cursor plus the two loading flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    limit: usize,
    skip: usize,
    total: Option<usize>,
    has_more: bool,
    is_initial_loading: bool,
    is_paginating: bool,
}

impl Pagination {
    /// Create a new pagination state with the given page size
    ///
    /// A zero limit is bumped to one; a loader must always be asked for at least one item.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            skip: 0,
            total: None,
            has_more: true,
            is_initial_loading: false,
            is_paginating: false,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Total reported by the last successful load, `None` until then
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_initial_loading(&self) -> bool {
        self.is_initial_loading
    }

    pub fn is_paginating(&self) -> bool {
        self.is_paginating
    }

    pub fn is_loading(&self) -> bool {
        self.is_initial_loading || self.is_paginating
    }

    /// Whether a load of this kind is currently outstanding
    pub fn is_loading_kind(&self, kind: LoadKind) -> bool {
        match kind {
            LoadKind::Initial => self.is_initial_loading,
            LoadKind::More => self.is_paginating,
        }
    }

    /// Check if a "load more" request may be issued right now
    pub fn can_paginate(&self) -> bool {
        !self.is_loading() && self.has_more
    }

    /// Parameters for the next request of the given kind
    pub fn params<F>(&self, kind: LoadKind, filters: F) -> PageParams<F> {
        let skip = match kind {
            LoadKind::Initial => 0,
            LoadKind::More => self.skip,
        };
        PageParams::new(skip, self.limit, filters)
    }

    /// Update the pagination state based on a message
    ///
    /// This is the only way to modify the pagination state.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::ResetStarted => {
                self.skip = 0;
                self.total = None;
                self.has_more = true;
                self.is_initial_loading = true;
                self.is_paginating = false;
            }
            Message::LoadingMoreStarted => {
                self.is_paginating = true;
            }
            Message::PageReceived {
                kind,
                loaded,
                total,
            } => {
                self.skip = loaded;
                self.total = Some(total);
                self.has_more = loaded < total;
                self.finish(kind);
            }
            Message::PageFailed { kind } => {
                // A failed first page reads as an empty list; a failed "load more" keeps
                // the cursor so the same page can be retried.
                if kind == LoadKind::Initial {
                    self.skip = 0;
                    self.total = Some(0);
                    self.has_more = false;
                }
                self.finish(kind);
            }
            Message::Discarded => {
                *self = Self::new(self.limit);
            }
        }
    }

    fn finish(&mut self, kind: LoadKind) {
        match kind {
            LoadKind::Initial => self.is_initial_loading = false,
            LoadKind::More => self.is_paginating = false,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}
