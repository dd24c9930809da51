//! Session-wide transliteration state.
//!
//! [`TransliterationContext`] holds the active target script. It is owned by
//! one caller and lent to every consumer; the setter is the only way to change
//! the script, and subscribers are notified synchronously after each change.
//!
//! Until [`TransliterationContext::hydrate`] has read the persisted choice,
//! [`TransliterationContext::transliterate_text`] returns its input unchanged,
//! so a first render never shows text in a script that is about to be
//! replaced.

use std::borrow::Cow;
use std::fmt;

use crate::prefs::{MemoryStore, PreferenceStore};
use crate::script::Script;
use crate::translit::Transliterator;

/// Storage key for the selected script identifier.
pub const STORAGE_KEY: &str = "lipi.target-script";

/// Handle returned by [`TransliterationContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(Script)>;

pub struct TransliterationContext<S: PreferenceStore = MemoryStore> {
    store: S,
    engine: Transliterator,
    target: Script,
    hydrated: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: PreferenceStore> TransliterationContext<S> {
    /// Create an unhydrated context targeting Devanagari.
    pub fn new(store: S) -> Self {
        Self::with_engine(store, Transliterator::new())
    }

    pub fn with_engine(store: S, engine: Transliterator) -> Self {
        Self {
            store,
            engine,
            target: Script::SOURCE,
            hydrated: false,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Restore the persisted script.
    ///
    /// Missing, unreadable or unknown values fall back to Devanagari.
    pub fn hydrate(&mut self) {
        let restored = match self.store.get(STORAGE_KEY) {
            Ok(Some(id)) => Script::from_id(&id).unwrap_or_else(|| {
                tracing::debug!(%id, "ignoring unknown persisted script");
                Script::SOURCE
            }),
            Ok(None) => Script::SOURCE,
            Err(e) => {
                tracing::warn!(error = %e, "could not read script preference");
                Script::SOURCE
            }
        };

        self.hydrated = true;
        if restored != self.target {
            self.target = restored;
            self.notify();
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn target_script(&self) -> Script {
        self.target
    }

    /// Every selectable script.
    pub fn scripts(&self) -> &'static [Script] {
        &Script::ALL
    }

    /// Select a new target script by identifier.
    ///
    /// Unknown identifiers are ignored and the current selection stays in
    /// place. A store write failure is logged; the in-memory selection still
    /// changes.
    pub fn set_target_script(&mut self, id: &str) {
        let Some(script) = Script::from_id(id) else {
            tracing::debug!(id, "ignoring unknown script id");
            return;
        };

        if let Err(e) = self.store.set(STORAGE_KEY, script.id()) {
            tracing::warn!(error = %e, "could not persist script preference");
        }

        self.target = script;
        self.notify();
    }

    /// Transliterate with the current target script.
    pub fn transliterate_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !self.hydrated {
            return Cow::Borrowed(text);
        }
        self.engine.transliterate(text, self.target)
    }

    /// The script text is currently shown in. Devanagari until hydrated.
    pub fn effective_script(&self) -> Script {
        if self.hydrated { self.target } else { Script::SOURCE }
    }

    /// Register a callback that runs after every script change.
    pub fn subscribe(&mut self, callback: impl FnMut(Script) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn notify(&mut self) {
        let script = self.target;
        for (_, callback) in &mut self.subscribers {
            callback(script);
        }
    }
}

impl Default for TransliterationContext<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: PreferenceStore> fmt::Debug for TransliterationContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransliterationContext")
            .field("target", &self.target)
            .field("hydrated", &self.hydrated)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
