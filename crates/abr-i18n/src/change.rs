#![forbid(unsafe_code)]

//! Language-change notifications.
//!
//! Collaborators that depend on the active language (the flag icon, a page
//! title updater, analytics) subscribe here instead of polling the engine.
//! Listeners run synchronously, in subscription order, after the document
//! has already been re-localized.

use abr_core::Language;

/// Emitted after a successful language switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageChange {
    pub previous: Language,
    pub current: Language,
}

impl LanguageChange {
    /// Whether the language actually changed (re-selecting the active
    /// language still notifies).
    #[must_use]
    pub fn is_switch(&self) -> bool {
        self.previous != self.current
    }
}

/// Handle returned by [`LanguageListeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&LanguageChange)>;

/// Ordered set of change callbacks.
#[derive(Default)]
pub struct LanguageListeners {
    next_id: u64,
    callbacks: Vec<(ListenerId, Callback)>,
}

impl std::fmt::Debug for LanguageListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageListeners")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

impl LanguageListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&LanguageChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub(crate) fn notify(&mut self, change: &LanguageChange) {
        for (_, callback) in &mut self.callbacks {
            callback(change);
        }
    }
}
