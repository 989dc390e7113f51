//! # listkeeper - incremental lists over offset-paginated APIs
//!
//! Keeps a growing, de-duplicated list of entities in sync with an API that
//! answers `{skip, limit, ...filters}` with `{data, total}`. Filter changes and
//! resets throw the list away and start over; responses to superseded
//! requests are discarded instead of being merged into the new list.
//!
//! ## Architecture Overview
//!
//! The crate follows the Elm architecture:
//!
//! - **Model** ([`model`]): `ListState` and `Pagination`, changed only through `update`
//! - **Message** ([`model::list::Message`]): what happened (init requested, page loaded, ...)
//! - **Command** ([`core::cmd`]): side effects to run (load a page, start a debounce timer)
//! - **Runtime** ([`integration::store`]): runs commands on tokio and feeds responses back
//!
//! ## Example Usage
//!
//! ```rust
//! use listkeeper::{
//!     core::error::LoadError,
//!     domain::{entity::Entity, filters::FilterSet, page::{Page, PageParams}},
//!     infrastructure::{config::ListConfig, loader::loader_fn},
//!     integration::store::IncrementalListStore,
//! };
//!
//! #[derive(Debug, Clone)]
//! struct Game {
//!     id: i64,
//! }
//!
//! impl Entity for Game {
//!     type Id = i64;
//!
//!     fn id(&self) -> i64 {
//!         self.id
//!     }
//! }
//!
//! # tokio_test_main();
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn tokio_test_main() {
//! let loader = loader_fn(|params: PageParams<FilterSet>| async move {
//!     let games = (params.skip as i64..5)
//!         .take(params.limit)
//!         .map(|id| Game { id })
//!         .collect();
//!     Ok::<_, LoadError>(Page::new(games, 5))
//! });
//!
//! let config = ListConfig { limit: 2, ..ListConfig::default() };
//! let mut store = IncrementalListStore::new(loader, config);
//! store.init(None);
//! store.settle().await;
//! assert_eq!(store.list().len(), 2);
//!
//! store.paginate();
//! store.settle().await;
//! assert_eq!(store.list().len(), 4);
//! assert!(store.has_more());
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`domain`] - Entities, pages, filters and the de-duplicating collection
//! - [`model`] - List and pagination state machines
//! - [`core`] - Commands and error types
//! - [`infrastructure`] - Page loaders, configuration, CLI
//! - [`integration`] - Async store runtime and CRUD orchestration
//! - [`utils`] - Logging, panic handling, paths

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod model;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod utils;

pub use integration::store::IncrementalListStore;
pub use model::list::ListSnapshot;
