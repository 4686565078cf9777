//! One debounced sync session per open document.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use block_sync::{DebouncedSync, Node, SyncConfig, SyncStatus};

use crate::db::BlockStore;
use crate::error::Result;
use crate::services::sink::StoreSink;

struct Session {
    sync: DebouncedSync<StoreSink>,
    last_seen: Instant,
}

type Sessions = HashMap<String, Session>;

/// Open sync sessions keyed by document id.
///
/// A session lives until `DELETE .../session`, until [`close_idle`] finds it
/// untouched for the idle timeout, or until shutdown. Every way out flushes
/// pending changes first.
///
/// [`close_idle`]: SessionRegistry::close_idle
pub struct SessionRegistry {
    config: SyncConfig,
    store: Arc<BlockStore>,
    sessions: Mutex<Sessions>,
}

impl SessionRegistry {
    pub fn new(config: SyncConfig, store: Arc<BlockStore>) -> Self {
        Self {
            config,
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Feed a document tree, opening a session on first use.
    pub fn submit_tree(&self, document_id: &str, tree: &Node) -> Result<SyncStatus> {
        let mut sessions = self.lock();
        let session = match sessions.entry(document_id.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let session = DebouncedSync::start(
                    document_id,
                    self.config.clone(),
                    StoreSink::new(Arc::clone(&self.store)),
                )?;
                tracing::info!(document_id, "Opened sync session");
                entry.insert(Session {
                    sync: session,
                    last_seen: Instant::now(),
                })
            }
        };
        session.last_seen = Instant::now();
        session.sync.notify(tree);
        Ok(session.sync.status())
    }

    pub fn status(&self, document_id: &str) -> Option<SyncStatus> {
        self.lock().get(document_id).map(|session| session.sync.status())
    }

    /// Close a session, flushing anything still pending. Returns false if none was open.
    pub fn close(&self, document_id: &str) -> bool {
        let Some(mut session) = self.lock().remove(document_id) else {
            return false;
        };
        session.sync.teardown();
        tracing::info!(document_id, "Closed sync session");
        true
    }

    /// Close sessions that have not received a tree for at least `max_idle`.
    pub fn close_idle(&self, max_idle: Duration) -> usize {
        let idle: Vec<(String, Session)> = {
            let mut sessions = self.lock();
            let ids: Vec<String> = sessions
                .iter()
                .filter(|(_, session)| session.last_seen.elapsed() >= max_idle)
                .map(|(id, _)| id.clone())
                .collect();
            ids.into_iter()
                .filter_map(|id| sessions.remove_entry(&id))
                .collect()
        };

        let count = idle.len();
        for (document_id, mut session) in idle {
            session.sync.teardown();
            tracing::info!(document_id = %document_id, "Closed idle sync session");
        }
        count
    }

    /// Close every session. Used on shutdown.
    pub fn close_all(&self) -> usize {
        let sessions: Vec<_> = self.lock().drain().collect();
        let count = sessions.len();
        for (_, mut session) in sessions {
            session.sync.teardown();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
