//! Test doubles shared by unit tests, integration tests and benches
//!
//! [`ScriptedLoader`] records every call and lets the test decide when (and
//! with what) each one resolves, so response ordering can be controlled exactly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::oneshot;

use crate::{
    core::error::{CrudError, LoadError},
    domain::{
        entity::Entity,
        page::{Page, PageParams},
    },
    infrastructure::loader::PageLoader,
    integration::crud::CrudApi,
};

/// Minimal entity keyed by an integer id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub name: String,
}

impl Game {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Entity for Game {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// A page of games named `game {id}`
pub fn game_page(ids: &[i64], total: usize) -> Page<Game> {
    Page::new(
        ids.iter().map(|&id| Game::new(id, format!("game {id}"))).collect(),
        total,
    )
}

enum Reply<E> {
    Done(Result<Page<E>, LoadError>),
    Panic,
}

struct Script<E, F> {
    calls: Vec<PageParams<F>>,
    responders: HashMap<usize, oneshot::Sender<Reply<E>>>,
}

/// Page loader whose responses are released by the test
pub struct ScriptedLoader<E, F> {
    script: Arc<Mutex<Script<E, F>>>,
}

impl<E, F> Clone for ScriptedLoader<E, F> {
    fn clone(&self) -> Self {
        Self {
            script: Arc::clone(&self.script),
        }
    }
}

impl<E, F> Default for ScriptedLoader<E, F> {
    fn default() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                calls: Vec::new(),
                responders: HashMap::new(),
            })),
        }
    }
}

impl<E, F> ScriptedLoader<E, F> {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script<E, F>> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Parameters of every call so far, in call order
    pub fn calls(&self) -> Vec<PageParams<F>>
    where
        F: Clone,
    {
        self.script().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script().calls.len()
    }

    /// Resolve the `index`th call
    ///
    /// Returns false if the call was never made, was already resolved, or its
    /// caller stopped waiting.
    pub fn respond(&self, index: usize, result: Result<Page<E>, LoadError>) -> bool {
        self.send(index, Reply::Done(result))
    }

    /// Make the `index`th call panic while being polled
    pub fn panic_on(&self, index: usize) -> bool {
        self.send(index, Reply::Panic)
    }

    fn send(&self, index: usize, reply: Reply<E>) -> bool {
        match self.script().responders.remove(&index) {
            Some(responder) => responder.send(reply).is_ok(),
            None => false,
        }
    }
}

impl<E, F> PageLoader<E, F> for ScriptedLoader<E, F>
where
    E: Send + 'static,
    F: Send + 'static,
{
    fn load(&self, params: PageParams<F>) -> BoxFuture<'static, Result<Page<E>, LoadError>> {
        let (tx, rx) = oneshot::channel();
        {
            let mut script = self.script();
            let index = script.calls.len();
            script.calls.push(params);
            script.responders.insert(index, tx);
        }

        async move {
            match rx.await {
                Ok(Reply::Done(result)) => result,
                Ok(Reply::Panic) => panic!("scripted loader panic"),
                Err(_) => Err(LoadError::Cancelled),
            }
        }
        .boxed()
    }
}

/// Recorded call to [`ScriptedCrudApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrudCall {
    Create(String),
    Edit(i64, String),
    Delete(i64),
}

/// CRUD backend for games that answers immediately
///
/// Creates and edits succeed unless the name is empty; deleting an id listed in
/// `missing` fails with [`CrudError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedCrudApi {
    pub(crate) calls: Arc<Mutex<Vec<CrudCall>>>,
    pub missing: Vec<i64>,
}

impl ScriptedCrudApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<CrudCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: CrudCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl CrudApi<Game> for ScriptedCrudApi {
    type Create = String;
    type Edit = String;

    fn create(&self, name: String) -> BoxFuture<'static, Result<Game, CrudError>> {
        self.record(CrudCall::Create(name.clone()));
        let result = if name.is_empty() {
            Err(CrudError::Rejected("name is required".to_string()))
        } else {
            Ok(Game::new(1000, name))
        };
        futures::future::ready(result).boxed()
    }

    fn edit(&self, id: i64, name: String) -> BoxFuture<'static, Result<Game, CrudError>> {
        self.record(CrudCall::Edit(id, name.clone()));
        let result = if name.is_empty() {
            Err(CrudError::Rejected("name is required".to_string()))
        } else {
            Ok(Game::new(id, name))
        };
        futures::future::ready(result).boxed()
    }

    fn delete(&self, id: i64) -> BoxFuture<'static, Result<(), CrudError>> {
        self.record(CrudCall::Delete(id));
        let result = if self.missing.contains(&id) {
            Err(CrudError::NotFound(id.to_string()))
        } else {
            Ok(())
        };
        futures::future::ready(result).boxed()
    }
}
