//! Reciprocal edge operations.
//!
//! Connections between notes are undirected in meaning but stored as two
//! mirrored adjacency entries, one on each endpoint. The only places those
//! entries are ever written are [`NoteGraph::connect`] and
//! [`NoteGraph::disconnect`], each of which performs both sides, so
//! reciprocity holds by construction: whenever B appears in A's neighbor
//! list, A appears in B's.

use miette::Diagnostic;
use thiserror::Error;

use super::network::NoteGraph;
use crate::types::NoteId;

/// Error type for edge operations that require live endpoints.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    /// The id resolves to no live note: it was never issued by this graph,
    /// or the note has been removed.
    #[error("unknown note {0}")]
    #[diagnostic(
        code(notegraph::graph::unknown_note),
        help("ids are only valid for the graph that issued them and stop resolving after remove_node")
    )]
    UnknownNote(NoteId),
}

impl NoteGraph {
    /// Connects two notes with a reciprocal edge pair and returns the
    /// neighbor's id.
    ///
    /// Connect is idempotent by label: if any existing neighbor of `a`
    /// already carries `b`'s label, that neighbor's id is returned and no
    /// list is touched, so connecting the same two labels twice stores
    /// exactly one pair. Self-connection (`a == b`, or `b` carrying `a`'s
    /// own label) is a no-op returning `a`; no self-loop is ever stored.
    ///
    /// # Parameters
    ///
    /// - `a`: the note gaining a neighbor
    /// - `b`: the note to connect it to
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNote`] if either endpoint is unknown or removed;
    /// nothing is modified in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notegraph::graph::NoteGraph;
    ///
    /// let mut graph = NoteGraph::new("vault");
    /// let alice = graph.create_node("Alice", "");
    /// let bob = graph.create_node("Bob", "");
    ///
    /// assert_eq!(graph.connect(alice, bob)?, bob);
    /// // Second connect between the same labels: same neighbor, no new edge.
    /// assert_eq!(graph.connect(alice, bob)?, bob);
    /// assert_eq!(graph.siblings(alice).count(), 1);
    /// assert_eq!(graph.siblings(bob).count(), 1);
    /// # Ok::<(), notegraph::graph::GraphError>(())
    /// ```
    pub fn connect(&mut self, a: NoteId, b: NoteId) -> Result<NoteId, GraphError> {
        let b_label = self
            .note(b)
            .ok_or(GraphError::UnknownNote(b))?
            .label()
            .to_owned();
        let a_note = self.note(a).ok_or(GraphError::UnknownNote(a))?;

        if a == b || a_note.label() == b_label {
            return Ok(a);
        }
        for &neighbor in a_note.neighbor_ids() {
            if self.note(neighbor).is_some_and(|n| n.label() == b_label) {
                return Ok(neighbor);
            }
        }

        self.live_mut(a)?.neighbors.push(b);
        self.live_mut(b)?.neighbors.push(a);
        Ok(b)
    }

    /// Removes the edge between two notes, both directions at once.
    ///
    /// Symmetric by construction: the entry for `b` in `a`'s list and the
    /// entry for `a` in `b`'s list are removed together, or neither is. An
    /// absent edge is a silent no-op, not an error.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNote`] if either endpoint is unknown or removed.
    pub fn disconnect(&mut self, a: NoteId, b: NoteId) -> Result<(), GraphError> {
        let pos_in_a = self
            .note(a)
            .ok_or(GraphError::UnknownNote(a))?
            .neighbor_ids()
            .iter()
            .position(|&n| n == b);
        let pos_in_b = self
            .note(b)
            .ok_or(GraphError::UnknownNote(b))?
            .neighbor_ids()
            .iter()
            .position(|&n| n == a);

        if let (Some(i), Some(j)) = (pos_in_a, pos_in_b) {
            self.live_mut(a)?.neighbors.remove(i);
            self.live_mut(b)?.neighbors.remove(j);
        }
        Ok(())
    }

    /// `true` if the two notes currently share an edge.
    #[must_use]
    pub fn is_connected(&self, a: NoteId, b: NoteId) -> bool {
        self.note(a)
            .is_some_and(|note| note.neighbor_ids().contains(&b))
    }

    fn live_mut(&mut self, id: NoteId) -> Result<&mut crate::note::Note, GraphError> {
        self.note_mut(id).ok_or(GraphError::UnknownNote(id))
    }
}
