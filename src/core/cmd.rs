use crate::{
    domain::page::PageParams,
    model::{list::Generation, pagination::LoadKind},
};

/// Elm-like command definitions
/// Side effects requested by `ListState::update`; the list state itself never performs I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd<F> {
    /// Call the page loader; its response must be fed back tagged with `generation`
    LoadPage {
        generation: Generation,
        kind: LoadKind,
        params: PageParams<F>,
    },
    /// Deliver `DebounceElapsed { ticket }` after the configured debounce delay
    ScheduleDebounce { ticket: u64 },
    /// Stop every outstanding load and timer
    CancelAll,

    // Do nothing
    None,
}

impl<F> Cmd<F> {
    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Cmd::LoadPage {
                kind: LoadKind::Initial,
                ..
            } => "LoadFirstPage",
            Cmd::LoadPage {
                kind: LoadKind::More,
                ..
            } => "LoadNextPage",
            Cmd::ScheduleDebounce { .. } => "ScheduleDebounce",
            Cmd::CancelAll => "CancelAll",
            Cmd::None => "None",
        }
    }
}
