//! Shared async runtime for background work
//!
//! Tile fetches run on one lazily-started multi-thread tokio runtime so the
//! UI thread never blocks on the network.

use once_cell::sync::Lazy;
use std::future::Future;
use tokio::runtime::Runtime;

static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("tapeline-io")
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Handle to the shared runtime.
pub fn runtime() -> &'static Runtime {
    &RUNTIME
}

/// Spawn a future onto the shared runtime.
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    RUNTIME.spawn(future)
}
