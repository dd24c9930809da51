//! Citation hover cards.
//!
//! Cards are rendered in a pending state and resolved through a
//! [`CitationLookup`] only when shown. A card fetches at most once.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dom::NodeId;
use crate::error::Result;

/// Resolved citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationDetails {
    pub source: String,
    pub location: String,
}

/// Source of citation details, keyed by reference id.
pub trait CitationLookup {
    /// `Ok(None)` means the reference is unknown.
    fn lookup(&self, reference: &str) -> Result<Option<CitationDetails>>;
}

/// In-memory citation table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitationIndex {
    entries: HashMap<String, CitationDetails>,
}

impl CitationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `{ "<reference>": { "source", "location" } }`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, reference: impl Into<String>, details: CitationDetails) {
        self.entries.insert(reference.into(), details);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CitationLookup for CitationIndex {
    fn lookup(&self, reference: &str) -> Result<Option<CitationDetails>> {
        Ok(self.entries.get(reference).cloned())
    }
}

/// Where a card is in its single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationState {
    Pending,
    Loaded(CitationDetails),
    NotFound,
    Failed(String),
}

impl CitationState {
    /// Value of the card's `data-state` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationState::Pending => "pending",
            CitationState::Loaded(_) => "loaded",
            CitationState::NotFound => "not-found",
            CitationState::Failed(_) => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, CitationState::Pending)
    }
}

/// One rendered citation marker.
#[derive(Debug, Clone)]
pub struct CitationCard {
    pub reference: String,
    pub label: String,
    pub state: CitationState,
    /// The `span.citation-node` element.
    pub(crate) node: NodeId,
    /// The `span.citation-card` body whose children reflect `state`.
    pub(crate) body: NodeId,
}

impl CitationCard {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Resolve a pending card. Returns true if a fetch happened.
    pub(crate) fn resolve(&mut self, lookup: &dyn CitationLookup) -> bool {
        if !self.state.is_pending() {
            return false;
        }

        self.state = if self.reference.is_empty() {
            CitationState::NotFound
        } else {
            match lookup.lookup(&self.reference) {
                Ok(Some(details)) => CitationState::Loaded(details),
                Ok(None) => CitationState::NotFound,
                Err(e) => {
                    tracing::warn!(reference = %self.reference, error = %e, "citation lookup failed");
                    CitationState::Failed(e.to_string())
                }
            }
        };
        true
    }
}
