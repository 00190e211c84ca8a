//! Generic reactive store.
//!
//! A [`Store`] owns one domain's state as an immutable snapshot (`Arc<State>`).
//! Every action replaces the snapshot with a new one computed by the domain's
//! pure [`Domain::reduce`], notifies listeners synchronously, and then writes
//! the partialized snapshot to the storage adapter.
//!
//! The four domains (user, stylist, experience, ui) instantiate this type and
//! add their named actions as inherent methods on `Store<TheirDomain>`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use parking_lot::ReentrantMutex;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, warn};

use crate::error::{FashionError, Result};
use crate::id::{EntityId, IdGenerator, MonotonicClockIds};
use crate::storage::StateStorage;

/// Key prefix used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "ai-fashion";

/// One independent state tree with its transitions and persistence rules.
pub trait Domain: 'static {
    /// Full runtime state. `Default` is the fresh-install state.
    type State: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static;
    /// Mutations understood by [`Domain::reduce`].
    type Action: fmt::Debug;
    /// Durable subset of the state.
    type Persisted: Serialize + DeserializeOwned;

    /// Storage record name, e.g. `user-store`.
    const NAME: &'static str;
    /// Schema version written next to the persisted state.
    const VERSION: u32 = 0;

    /// Pure transition: computes the next state, never touching `state`.
    fn reduce(state: &Self::State, action: Self::Action) -> Self::State;

    /// Selects the fields that survive a reload.
    fn partialize(state: &Self::State) -> Self::Persisted;

    /// Rebuilds a full state from persisted fields; everything else is default.
    fn restore(persisted: Self::Persisted) -> Self::State;

    /// Largest entity id held by `state`. Restored ids are fed to the id
    /// generator so fresh ids never collide with them.
    fn max_id(_state: &Self::State) -> Option<EntityId> {
        None
    }
}

/// When committed snapshots reach the storage adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    /// Write after every committed mutation.
    #[default]
    EveryCommit,
    /// Only mark the store dirty; [`Store::flush`] writes.
    Deferred,
}

/// Construction options shared by all stores of one application context.
#[derive(Clone)]
pub struct StoreOptions {
    pub namespace: String,
    pub persist_mode: PersistMode,
    pub ids: Arc<dyn IdGenerator>,
}

impl StoreOptions {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            persist_mode: PersistMode::default(),
            ids,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_persist_mode(mut self, mode: PersistMode) -> Self {
        self.persist_mode = mode;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::new(Arc::new(MonotonicClockIds::new()))
    }
}

impl fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("namespace", &self.namespace)
            .field("persist_mode", &self.persist_mode)
            .finish_non_exhaustive()
    }
}

/// Builds the storage key for a domain record, e.g. `ai-fashion-user-store`.
pub fn storage_key(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}-{}", namespace, name)
    }
}

/// On-disk shape of a persisted record.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

// ============================================================================
// Listeners
// ============================================================================

type Listener<S> = dyn Fn(&Arc<S>, &Arc<S>) + Send + Sync;

struct ListenerRegistry<S> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Arc<Listener<S>>)>>,
}

impl<S> ListenerRegistry<S> {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            entries: Mutex::new(Vec::new()),
        }
    }

    fn add(&self, listener: Arc<Listener<S>>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.entries).push((id, listener));
        id
    }

    /// Copies the current listener list so callbacks may (un)subscribe freely.
    fn snapshot(&self) -> Vec<Arc<Listener<S>>> {
        lock(&self.entries)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    fn len(&self) -> usize {
        lock(&self.entries).len()
    }
}

trait Unsubscribe: Send + Sync {
    fn remove(&self, id: u64) -> bool;
}

impl<S: 'static> Unsubscribe for ListenerRegistry<S> {
    fn remove(&self, id: u64) -> bool {
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping the handle leaves the listener registered; call
/// [`Subscription::unsubscribe`] to remove it. Safe to call from inside the
/// listener itself.
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Unsubscribe>,
}

impl Subscription {
    /// Removes the listener. Returns false if it was already removed
    /// or the store is gone.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.remove(self.id),
            None => false,
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

// ============================================================================
// Store
// ============================================================================

/// Reactive, persisted state container for one [`Domain`].
pub struct Store<D: Domain> {
    key: String,
    state: Mutex<Arc<D::State>>,
    listeners: Arc<ListenerRegistry<D::State>>,
    storage: Arc<dyn StateStorage>,
    persist_mode: PersistMode,
    /// Held from commit until listeners return, so notification rounds never
    /// interleave across threads. Reentrant: listeners may dispatch here.
    round: ReentrantMutex<()>,
    /// Serializes "read latest snapshot, write it" so writes never go stale.
    /// Holds the last value written.
    persist_lock: Mutex<Option<Value>>,
    dirty: AtomicBool,
    ids: Arc<dyn IdGenerator>,
    _domain: PhantomData<fn() -> D>,
}

impl<D: Domain> Store<D> {
    /// Opens the store, restoring persisted fields over the defaults.
    ///
    /// Never fails: a missing record, an unavailable medium, a malformed
    /// record or a record with another schema version all yield the defaults.
    pub fn open(storage: Arc<dyn StateStorage>, options: StoreOptions) -> Self {
        let key = storage_key(&options.namespace, D::NAME);
        let initial = Self::load_initial(storage.as_ref(), &key);
        if let Some(max) = D::max_id(&initial) {
            options.ids.observe(max);
        }

        Self {
            key,
            state: Mutex::new(Arc::new(initial)),
            listeners: Arc::new(ListenerRegistry::new()),
            storage,
            persist_mode: options.persist_mode,
            round: ReentrantMutex::new(()),
            persist_lock: Mutex::new(None),
            dirty: AtomicBool::new(false),
            ids: options.ids,
            _domain: PhantomData,
        }
    }

    fn load_initial(storage: &dyn StateStorage, key: &str) -> D::State {
        match Self::read_persisted(storage, key) {
            Ok(Some(persisted)) => {
                debug!(key, "Restored persisted state");
                D::restore(persisted)
            }
            Ok(None) => {
                debug!(key, "No persisted state, using defaults");
                D::State::default()
            }
            Err(e) => {
                warn!(key, error = %e, "Ignoring persisted state, using defaults");
                D::State::default()
            }
        }
    }

    fn read_persisted(storage: &dyn StateStorage, key: &str) -> Result<Option<D::Persisted>> {
        let Some(value) = storage.load(key)? else {
            return Ok(None);
        };

        let envelope: Envelope<Value> = serde_json::from_value(value)?;
        if envelope.version != D::VERSION {
            return Err(FashionError::VersionMismatch {
                key: key.to_string(),
                found: envelope.version,
                expected: D::VERSION,
            });
        }

        Ok(Some(serde_json::from_value(envelope.state)?))
    }

    /// Storage key of this store's record.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn persist_mode(&self) -> PersistMode {
        self.persist_mode
    }

    /// Current snapshot. Cheap: clones an `Arc`.
    pub fn get_state(&self) -> Arc<D::State> {
        Arc::clone(&lock(&self.state))
    }

    /// Reads a projection of the current snapshot.
    pub fn select<R>(&self, f: impl FnOnce(&D::State) -> R) -> R {
        f(&self.get_state())
    }

    /// Issues a fresh entity id from the injected generator.
    pub fn next_id(&self) -> EntityId {
        self.ids.next_id()
    }

    /// Registers a listener called with `(next, previous)` after every commit.
    ///
    /// Listeners run synchronously, outside the state lock, in registration
    /// order. Each round iterates over a copy of the listener list, so
    /// unsubscribing (any listener) during a round neither skips nor repeats
    /// anyone in that round.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<D::State>, &Arc<D::State>) + Send + Sync + 'static,
    {
        let id = self.listeners.add(Arc::new(listener));
        let registry: Arc<dyn Unsubscribe> = self.listeners.clone();
        Subscription {
            id,
            registry: Arc::downgrade(&registry),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Applies `action` and returns the resulting snapshot.
    ///
    /// When the transition yields a state equal to the current one nothing is
    /// committed: no notification, no write, and the returned `Arc` is the
    /// current snapshot.
    ///
    /// Dispatches from different threads are serialized: a commit waits until
    /// the previous commit's listeners have returned.
    pub fn dispatch(&self, action: D::Action) -> Arc<D::State> {
        debug!(store = D::NAME, ?action, "Dispatch");
        self.commit(|state| D::reduce(state, action), false, true)
    }

    /// Restores the defaults, notifies, and persists them.
    pub fn reset(&self) -> Arc<D::State> {
        debug!(store = D::NAME, "Reset to defaults");
        self.commit(|_| D::State::default(), true, true)
    }

    /// Deletes the persisted record and returns to the defaults without
    /// writing them. The next commit writes a fresh record.
    pub fn forget(&self) -> Arc<D::State> {
        let _round = self.round.lock();
        {
            let mut last_written = lock(&self.persist_lock);
            *last_written = None;
            self.dirty.store(false, Ordering::Release);
            match self.storage.remove(&self.key) {
                Ok(()) => debug!(key = %self.key, "Removed persisted state"),
                Err(e) => warn!(key = %self.key, error = %e, "Failed to remove persisted state"),
            }
        }
        self.commit(|_| D::State::default(), true, false)
    }

    fn commit(
        &self,
        next_of: impl FnOnce(&D::State) -> D::State,
        always: bool,
        write: bool,
    ) -> Arc<D::State> {
        let _round = self.round.lock();
        let (previous, next) = {
            let mut current = lock(&self.state);
            let previous = Arc::clone(&current);
            let next = next_of(&previous);
            if !always && next == *previous {
                return previous;
            }
            let next = Arc::new(next);
            *current = Arc::clone(&next);
            (previous, next)
        };

        for listener in self.listeners.snapshot() {
            listener(&next, &previous);
        }

        if !write {
            return next;
        }
        match self.persist_mode {
            PersistMode::EveryCommit => {
                self.persist();
            }
            PersistMode::Deferred => self.dirty.store(true, Ordering::Release),
        }

        next
    }

    /// True when a deferred store holds commits not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Writes pending commits. Returns true when storage is up to date.
    pub fn flush(&self) -> bool {
        if self.is_dirty() { self.persist() } else { true }
    }

    /// Writes the partialized latest snapshot, skipping the write when it
    /// equals the last one written. Failures are logged and the store stays
    /// dirty so a later flush retries.
    fn persist(&self) -> bool {
        let mut last_written = lock(&self.persist_lock);
        self.dirty.store(false, Ordering::Release);

        let snapshot = self.get_state();
        let envelope = Envelope {
            state: D::partialize(&snapshot),
            version: D::VERSION,
        };

        let result = serde_json::to_value(&envelope)
            .map_err(FashionError::from)
            .and_then(|value| {
                if (*last_written).as_ref() == Some(&value) {
                    return Ok(false);
                }
                self.storage.save(&self.key, &value)?;
                *last_written = Some(value);
                Ok(true)
            });

        match result {
            Ok(true) => {
                debug!(key = %self.key, "Persisted state");
                true
            }
            Ok(false) => {
                debug!(key = %self.key, "Persisted subset unchanged, skipping write");
                true
            }
            Err(e) => {
                self.dirty.store(true, Ordering::Release);
                warn!(key = %self.key, error = %e, "Failed to persist state");
                false
            }
        }
    }
}

impl<D: Domain> fmt::Debug for Store<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("key", &self.key)
            .field("state", &self.get_state())
            .field("persist_mode", &self.persist_mode)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
