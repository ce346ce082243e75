#![forbid(unsafe_code)]

//! Typed view of the values the page keeps in local storage.
//!
//! Reading is tolerant: a value that does not parse is treated exactly like
//! a missing one, because anything in the store may have been written by an
//! older page version or edited by hand.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::storage::{KeyValueStore, LANGUAGE_KEY, THEME_KEY, THEME_USAGE_KEY};

/// Two-valued color theme owned by the theme collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of everything persisted for the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub theme: Option<Theme>,
    pub language: Option<Language>,
    /// Advisory usage counters keyed by theme name.
    pub theme_usage: BTreeMap<String, u64>,
}

impl PersistedState {
    /// Read all keys from `store`, ignoring anything malformed.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let theme = store.get(THEME_KEY).as_deref().and_then(Theme::parse);
        let language = store.get(LANGUAGE_KEY).as_deref().and_then(Language::from_code);
        let theme_usage = store
            .get(THEME_USAGE_KEY)
            .and_then(|raw| match serde_json::from_str::<BTreeMap<String, u64>>(&raw) {
                Ok(map) => Some(map),
                Err(err) => {
                    tracing::debug!(error = %err, "ignoring malformed theme usage counters");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            theme,
            language,
            theme_usage,
        }
    }
}
