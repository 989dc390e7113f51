use std::cell::Cell;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::process;
use std::task::{Context, Poll};
use std::thread;

use color_eyre::config::HookBuilder;
use color_eyre::eyre::Result;
use futures::future::{CatchUnwind, FutureExt};

thread_local! {
    static ISOLATED: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is polling an [`Isolated`] future
fn panic_isolated() -> bool {
    ISOLATED.with(Cell::get)
}

struct IsolationGuard(bool);

impl IsolationGuard {
    fn enter() -> Self {
        Self(ISOLATED.with(|isolated| isolated.replace(true)))
    }
}

impl Drop for IsolationGuard {
    fn drop(&mut self) {
        ISOLATED.with(|isolated| isolated.set(self.0));
    }
}

/// Future returned by [`isolate_panics`]
pub struct Isolated<Fut> {
    inner: CatchUnwind<AssertUnwindSafe<Fut>>,
}

/// Catch panics raised while polling `fut` and resolve to `Err` instead
///
/// The panic hook only logs panics raised inside such a future; any other
/// panic still terminates the process.
pub fn isolate_panics<Fut: Future + Unpin>(fut: Fut) -> Isolated<Fut> {
    Isolated {
        inner: AssertUnwindSafe(fut).catch_unwind(),
    }
}

impl<Fut: Future + Unpin> Future for Isolated<Fut> {
    type Output = thread::Result<Fut::Output>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let _guard = IsolationGuard::enter();
        self.inner.poll_unpin(cx)
    }
}

pub fn initialize_panic_handler() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .panic_section(format!(
            "This is a bug in {} {}.",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;
    panic::set_hook(Box::new(move |panic_info| {
        let msg = format!("{}", panic_hook.panic_report(panic_info));
        let msg = strip_ansi_escapes::strip_str(msg);

        if panic_isolated() {
            tracing::error!("panic in isolated future: {msg}");
            return;
        }

        #[cfg(not(debug_assertions))]
        {
            use human_panic::{handle_dump, print_msg, Metadata};
            let meta = Metadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
                .authors(env!("CARGO_PKG_AUTHORS").replace(':', ", "));

            let file_path = handle_dump(&meta, panic_info);
            if print_msg(file_path, &meta).is_err() {
                eprintln!("{msg}");
            }
        }
        log::error!("Error: {msg}");

        #[cfg(debug_assertions)]
        {
            // Better Panic stacktrace that is only enabled when debugging.
            better_panic::Settings::auto()
                .most_recent_first(false)
                .lineno_suffix(true)
                .verbosity(better_panic::Verbosity::Full)
                .create_panic_handler()(panic_info);
        }

        process::exit(libc::EXIT_FAILURE);
    }));
    Ok(())
}
