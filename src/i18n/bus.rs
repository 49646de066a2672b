//! Change propagation bus.
//!
//! A typed publish/subscribe channel shared by everything attached to one
//! [`I18n`](crate::i18n::I18n) instance. Delivery is synchronous and follows
//! registration order. Nothing is replayed: a listener only sees events
//! published after it subscribed.
//!
//! # Invariants
//!
//! 1. Dispatch walks a snapshot of the listener list, so a listener may
//!    subscribe or unsubscribe (itself or others) while an event is in flight.
//!    The change applies from the next `publish`.
//! 2. A listener that returns `Err` or panics is logged and counted; the
//!    remaining listeners still run and `publish` never fails.

use crate::i18n::{I18nMetrics, Language};
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error};

/// Something observable changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum I18nEvent {
    /// The active language switched (or was re-confirmed).
    LanguageChanged { language: Language },

    /// Catalog contents changed for one language, or for all when `None`.
    CatalogUpdated {
        language: Option<Language>,
        revision: u64,
    },
}

impl I18nEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            I18nEvent::LanguageChanged { .. } => EventKind::LanguageChanged,
            I18nEvent::CatalogUpdated { .. } => EventKind::CatalogUpdated,
        }
    }
}

/// Which events a listener wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    LanguageChanged,
    CatalogUpdated,
    All,
}

impl EventKind {
    fn matches(self, event: &I18nEvent) -> bool {
        self == EventKind::All || self == event.kind()
    }
}

/// Handle returned by [`ChangeBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener callback. Returning `Err` reports a failure without aborting
/// dispatch to other listeners.
pub type Listener = Arc<dyn Fn(&I18nEvent) -> anyhow::Result<()> + Send + Sync>;

struct Registration {
    id: ListenerId,
    kind: EventKind,
    listener: Listener,
}

/// The bus.
pub struct ChangeBus {
    listeners: Mutex<Vec<Registration>>,
    next_id: AtomicU64,
    metrics: Arc<I18nMetrics>,
}

impl ChangeBus {
    pub fn new(metrics: Arc<I18nMetrics>) -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            metrics,
        }
    }

    fn registrations(&self) -> MutexGuard<'_, Vec<Registration>> {
        // Registrations are plain data; a panic elsewhere cannot leave them
        // half-updated.
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `listener` for events of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&I18nEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.registrations().push(Registration {
            id,
            kind,
            listener: Arc::new(listener),
        });
        debug!("Registered listener {:?} for {:?}", id, kind);
        id
    }

    /// Deregister a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut registrations = self.registrations();
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        let removed = registrations.len() != before;
        if removed {
            debug!("Removed listener {:?}", id);
        }
        removed
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registrations().len()
    }

    /// Deliver `event` to every matching listener, in registration order.
    ///
    /// Returns how many listeners completed without error.
    pub fn publish(&self, event: &I18nEvent) -> usize {
        // Snapshot so listeners can touch the registry during dispatch.
        let snapshot: Vec<(ListenerId, Listener)> = self
            .registrations()
            .iter()
            .filter(|r| r.kind.matches(event))
            .map(|r| (r.id, Arc::clone(&r.listener)))
            .collect();

        debug!("Publishing {:?} to {} listener(s)", event, snapshot.len());

        let mut delivered = 0;
        for (id, listener) in snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    error!("Listener {:?} failed on {:?}: {:#}", id, event, e);
                    self.metrics.record_listener_failure();
                }
                Err(_) => {
                    error!("Listener {:?} panicked on {:?}", id, event);
                    self.metrics.record_listener_failure();
                }
            }
        }
        delivered
    }
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
