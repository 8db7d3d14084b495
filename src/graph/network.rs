//! NoteGraph implementation: the arena that owns every note.
//!
//! This module contains the main NoteGraph type, its identity policy, and
//! the node lifecycle operations (create, find, remove). Edge operations
//! live in [`super::edges`], iterators in [`super::iteration`].

use std::path::{Path, PathBuf};

use crate::note::Note;
use crate::types::{NoteId, normalize_label};

/// How a graph decides whether an incoming note is a new entity.
///
/// The policy only affects admission ([`NoteGraph::add_note`] and therefore
/// [`NoteGraph::create_node`]); connect/disconnect semantics are identical
/// under both variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdentityPolicy {
    /// Label is the unique key: admitting a note whose label already exists
    /// returns the existing note's id and drops the candidate. Content,
    /// edges, uuid, and storage location of the existing note are untouched;
    /// there is no merge.
    #[default]
    DedupByLabel,
    /// Every admitted note is appended, duplicates included. This is the
    /// plain-collection behavior; identity policing becomes the caller's
    /// problem.
    NoDedup,
}

/// An insertion-ordered collection of [`Note`]s with reciprocal edges and a
/// vault root for rendering.
///
/// Notes live in an arena and are addressed by [`NoteId`]; all
/// cross-references between notes are ids, so the graph is the single owner
/// of every note and no reference cycles exist. Removal tombstones the slot,
/// which keeps every other id stable and preserves insertion order for
/// iteration and rendering.
///
/// # Identity
///
/// The graph's one identity rule is **label is the key** (under the default
/// [`IdentityPolicy::DedupByLabel`]): creating a node with an existing label
/// returns the existing node. The per-note uuid is carried but never
/// consulted.
///
/// # Examples
///
/// ```rust
/// use notegraph::graph::NoteGraph;
///
/// let mut graph = NoteGraph::new("vault");
/// let alice = graph.create_node("Alice", "");
/// let bob = graph.create_node("Bob", "");
/// graph.connect(alice, bob)?;
///
/// // Second creation request with the same label is a lookup, not a new node.
/// let alice_again = graph.create_node("Alice", "actors");
/// assert_eq!(alice_again, alice);
/// assert_eq!(graph.len(), 2);
/// # Ok::<(), notegraph::graph::GraphError>(())
/// ```
pub struct NoteGraph {
    /// Base directory the render pass writes into.
    root: PathBuf,
    /// Admission policy; see [`IdentityPolicy`].
    policy: IdentityPolicy,
    /// Arena slots. `None` marks a removed note; indices are never reused.
    pub(crate) slots: Vec<Option<Note>>,
    /// Count of live (non-tombstoned) slots.
    live: usize,
}

impl NoteGraph {
    /// Creates an empty graph with the given vault root and the default
    /// label-dedup identity policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notegraph::graph::NoteGraph;
    ///
    /// let graph = NoteGraph::new("data/vault");
    /// assert!(graph.is_empty());
    /// ```
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_policy(root, IdentityPolicy::default())
    }

    /// Creates an empty graph with an explicit identity policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notegraph::graph::{IdentityPolicy, NoteGraph};
    ///
    /// let mut graph = NoteGraph::with_policy("vault", IdentityPolicy::NoDedup);
    /// let a = graph.create_node("Alice", "");
    /// let b = graph.create_node("Alice", "");
    /// assert_ne!(a, b);
    /// assert_eq!(graph.len(), 2);
    /// ```
    #[must_use]
    pub fn with_policy(root: impl Into<PathBuf>, policy: IdentityPolicy) -> Self {
        NoteGraph {
            root: root.into(),
            policy,
            slots: Vec::new(),
            live: 0,
        }
    }

    /// The vault root directory documents are rendered under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The admission policy this graph was built with.
    #[must_use]
    pub fn policy(&self) -> IdentityPolicy {
        self.policy
    }

    /// Number of live notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// `true` if the graph holds no live notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Constructs a note and admits it through the identity policy.
    ///
    /// Under [`IdentityPolicy::DedupByLabel`] a second call with an existing
    /// label (after normalization) returns the existing note's id; the
    /// storage location from the *first* call is retained and the new one is
    /// discarded along with the candidate.
    ///
    /// # Parameters
    ///
    /// - `name`: display name; normalized into the label
    /// - `storage_location`: subdirectory grouping for the rendered file,
    ///   empty for the vault root
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notegraph::graph::NoteGraph;
    ///
    /// let mut graph = NoteGraph::new("vault");
    /// let first = graph.create_node("Spearphishing", "techniques");
    /// let second = graph.create_node("Spearphishing", "elsewhere");
    /// assert_eq!(first, second);
    /// assert_eq!(
    ///     graph.note(first).map(|n| n.storage_location()),
    ///     Some("techniques"),
    /// );
    /// ```
    pub fn create_node(
        &mut self,
        name: impl Into<String>,
        storage_location: impl Into<String>,
    ) -> NoteId {
        self.add_note(Note::with_storage_location(name, storage_location))
    }

    /// Admits an already-constructed note through the identity policy and
    /// returns its id (the existing note's id on a dedup hit).
    pub fn add_note(&mut self, note: Note) -> NoteId {
        if self.policy == IdentityPolicy::DedupByLabel {
            if let Some(existing) = self.find_node(note.label()) {
                tracing::debug!(
                    label = note.label(),
                    id = %existing,
                    "label already present, returning existing note"
                );
                return existing;
            }
        }
        let id = NoteId::from_index(self.slots.len());
        self.slots.push(Some(note));
        self.live += 1;
        id
    }

    /// Finds the first live note whose label matches `name` (normalized
    /// before comparison), in insertion order.
    ///
    /// A miss is not an error. The scan is linear on purpose: no label index
    /// is maintained, so admission order stays the only source of truth.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NoteId> {
        let label = normalize_label(name);
        self.notes()
            .find(|(_, note)| note.label() == label)
            .map(|(id, _)| id)
    }

    /// Resolves an id to its note, `None` for unknown or removed ids.
    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutable variant of [`note`](Self::note), for attaching headers and
    /// sections to a note owned by the graph.
    #[must_use]
    pub fn note_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Removes a note, tearing down all of its edges reciprocally first, and
    /// returns the detached note with an emptied neighbor list.
    ///
    /// Every former neighbor ends up with zero references to the removed id.
    /// Returns `None` (and changes nothing) for an unknown or already
    /// removed id. The slot is tombstoned, so all other ids stay valid.
    pub fn remove_node(&mut self, id: NoteId) -> Option<Note> {
        let neighbors = self.note(id)?.neighbor_ids().to_vec();
        for neighbor in neighbors {
            if let Some(other) = self.note_mut(neighbor) {
                if let Some(pos) = other.neighbors.iter().position(|&n| n == id) {
                    other.neighbors.remove(pos);
                }
            }
        }

        let mut note = self.slots.get_mut(id.index()).and_then(Option::take)?;
        note.neighbors.clear();
        self.live -= 1;
        tracing::debug!(label = note.label(), id = %id, "removed note");
        Some(note)
    }
}
