//! Page loader abstraction
//!
//! The list store knows nothing about HTTP. Callers hand it something that can
//! turn `{skip, limit, ...filters}` into a page of entities; API clients,
//! fixtures and test doubles all plug in here.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::{
    core::error::LoadError,
    domain::page::{Page, PageParams},
};

/// Loads one page of entities
///
/// The returned future must not borrow the loader; it is driven on a spawned task.
pub trait PageLoader<E, F>: Send + Sync + 'static {
    fn load(&self, params: PageParams<F>) -> BoxFuture<'static, Result<Page<E>, LoadError>>;
}

impl<E, F, L> PageLoader<E, F> for Arc<L>
where
    L: PageLoader<E, F> + ?Sized,
{
    fn load(&self, params: PageParams<F>) -> BoxFuture<'static, Result<Page<E>, LoadError>> {
        (**self).load(params)
    }
}

/// Adapter turning an async closure into a [`PageLoader`]
#[derive(Clone)]
pub struct FnLoader<Func>(Func);

/// Wrap an async closure as a page loader
///
/// # Examples
///
/// ```
/// use listkeeper::domain::page::Page;
/// use listkeeper::infrastructure::loader::{loader_fn, PageLoader};
///
/// let loader = loader_fn(|params: listkeeper::domain::page::PageParams<()>| async move {
///     let items: Vec<u32> = (params.skip as u32..).take(params.limit).collect();
///     Ok::<_, listkeeper::core::error::LoadError>(Page::new(items, 100))
/// });
/// # let _ = loader.load(listkeeper::domain::page::PageParams::new(0, 10, ()));
/// ```
pub fn loader_fn<Func>(func: Func) -> FnLoader<Func> {
    FnLoader(func)
}

impl<E, F, Func, Fut> PageLoader<E, F> for FnLoader<Func>
where
    Func: Fn(PageParams<F>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Page<E>, LoadError>> + Send + 'static,
{
    fn load(&self, params: PageParams<F>) -> BoxFuture<'static, Result<Page<E>, LoadError>> {
        (self.0)(params).boxed()
    }
}
