//! Debounced driver around [`BlockSync`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::SyncConfig;
use crate::engine::{BlockSync, ChangeOutcome, SyncStatus};
use crate::error::Result;
use crate::node::Node;
use crate::sink::BlockSink;

struct Shared<S: BlockSink> {
    engine: BlockSync<S>,
    /// Bumped whenever the timer is re-armed or torn down; a timer only
    /// flushes if its generation is still current.
    generation: u64,
}

/// Flushes staged block changes once edits go quiet.
///
/// Each notification that leaves changes pending restarts a single timer, so
/// a burst of edits produces one flush `debounce_ms` after the last edit.
/// Dropping the driver cancels the timer and flushes whatever is left.
pub struct DebouncedSync<S: BlockSink> {
    shared: Arc<Mutex<Shared<S>>>,
    timer: Option<JoinHandle<()>>,
    delay: Duration,
}

impl<S: BlockSink> DebouncedSync<S> {
    pub fn new(engine: BlockSync<S>) -> Self {
        let delay = engine.config().debounce();
        Self {
            shared: Arc::new(Mutex::new(Shared {
                engine,
                generation: 0,
            })),
            timer: None,
            delay,
        }
    }

    /// Create the engine and its driver in one step.
    pub fn start(document_id: impl Into<String>, config: SyncConfig, sink: S) -> Result<Self> {
        Ok(Self::new(BlockSync::new(document_id, config, sink)?))
    }

    /// Feed a tree-change notification.
    ///
    /// Outside a tokio runtime there is no timer to arm, so pending changes
    /// are flushed before this returns.
    pub fn notify(&mut self, doc: &Node) -> ChangeOutcome {
        let (outcome, generation) = {
            let mut shared = lock(&self.shared);
            let outcome = shared.engine.handle_change(doc);
            if !outcome.needs_flush() {
                return outcome;
            }
            shared.generation += 1;
            (outcome, shared.generation)
        };
        self.arm(generation);
        outcome
    }

    fn arm(&mut self, generation: u64) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                let mut shared = lock(&self.shared);
                tracing::debug!(
                    document_id = %shared.engine.document_id(),
                    "no runtime for flush timer, flushing now: {}",
                    err
                );
                shared.engine.flush();
                return;
            }
        };

        let shared = Arc::clone(&self.shared);
        let delay = self.delay;
        self.timer = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut shared = lock(&shared);
            if shared.generation == generation {
                shared.engine.flush();
            }
        }));
    }

    /// Cancel the pending timer and flush synchronously.
    pub fn teardown(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        shared.engine.flush();
    }

    pub fn status(&self) -> SyncStatus {
        lock(&self.shared).engine.status()
    }
}

impl<S: BlockSink> Drop for DebouncedSync<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn lock<S: BlockSink>(shared: &Mutex<Shared<S>>) -> MutexGuard<'_, Shared<S>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
