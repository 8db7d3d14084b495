//! Core identity types for the notegraph crate.
//!
//! This module defines the fundamental types used throughout the graph for
//! identifying notes and turning raw display names into labels that are safe
//! to use as filenames.
//!
//! # Key Types
//!
//! - [`NoteId`]: a stable handle to a note inside a [`NoteGraph`](crate::graph::NoteGraph)
//! - [`normalize_label`]: the label normalization every note name passes through
//!
//! # Examples
//!
//! ```rust
//! use notegraph::types::{NoteId, normalize_label};
//!
//! // Labels may arrive with path separators; they are rewritten up front.
//! let label = normalize_label("Initial Access/Spearphishing");
//! assert_eq!(label, "Initial Access - Spearphishing");
//!
//! // NoteIds are plain copyable handles.
//! let id = NoteId::from_index(0);
//! assert_eq!(id.index(), 0);
//! println!("first note: {id}");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Replacement for path separators inside labels, so that a label is always a
/// single filename component.
const SEPARATOR_SUBSTITUTE: &str = " - ";

/// Stable handle to a note stored in a [`NoteGraph`](crate::graph::NoteGraph).
///
/// A `NoteId` is the index of the note's arena slot. It stays valid for the
/// lifetime of the graph: removing a note tombstones its slot rather than
/// shifting later entries, so ids are never reused or invalidated behind the
/// caller's back. A `NoteId` for a removed note simply stops resolving.
///
/// Ids are only meaningful for the graph that issued them; they carry no
/// identity of their own and are not the note's uuid.
///
/// # Examples
///
/// ```rust
/// use notegraph::graph::NoteGraph;
///
/// let mut graph = NoteGraph::new("vault");
/// let alice = graph.create_node("Alice", "");
/// assert_eq!(graph.note(alice).map(|n| n.label()), Some("Alice"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteId(usize);

impl NoteId {
    /// Builds an id from a raw arena index.
    ///
    /// Mostly useful in tests and tooling; regular callers receive ids from
    /// [`NoteGraph::create_node`](crate::graph::NoteGraph::create_node) and
    /// friends.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        NoteId(index)
    }

    /// Returns the underlying arena index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for NoteId {
    fn from(index: usize) -> Self {
        NoteId(index)
    }
}

/// Normalizes a raw display name into a label.
///
/// Every `/` is replaced with `" - "` so the label can double as a filename
/// component when the graph is rendered to disk. All label comparisons in the
/// graph (deduplication, lookup, connect) happen on the normalized form.
///
/// # Examples
///
/// ```rust
/// use notegraph::types::normalize_label;
///
/// assert_eq!(normalize_label("Command/Control"), "Command - Control");
/// assert_eq!(normalize_label("APT29"), "APT29");
/// assert_eq!(normalize_label("a/b/c"), "a - b - c");
/// ```
#[must_use]
pub fn normalize_label(name: &str) -> String {
    name.replace('/', SEPARATOR_SUBSTITUTE)
}
