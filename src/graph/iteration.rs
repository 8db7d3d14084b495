//! Graph iteration utilities.
//!
//! Lazy iterators for inspecting a [`NoteGraph`] without copying it:
//!
//! - [`NotesIter`]: every live note with its id, in insertion order
//! - [`Siblings`]: the neighbors of one note, in edge-insertion order
//! - [`EdgesIter`]: every directed adjacency entry as an `(id, id)` pair
//!
//! All three borrow the graph immutably, so the borrow checker rules out
//! iterating while the graph is being mutated.
//!
//! # Examples
//!
//! ```rust
//! use notegraph::graph::NoteGraph;
//!
//! let mut graph = NoteGraph::new("vault");
//! let alice = graph.create_node("Alice", "");
//! let bob = graph.create_node("Bob", "");
//! graph.connect(alice, bob)?;
//!
//! for (id, note) in graph.notes() {
//!     println!("{id}: {}", note.label());
//! }
//! for sibling in graph.siblings(alice) {
//!     println!("Alice <-> {}", sibling.label());
//! }
//! // Each undirected connection shows up twice, mirrored.
//! assert_eq!(graph.edges().count(), 2);
//! # Ok::<(), notegraph::graph::GraphError>(())
//! ```

use super::network::NoteGraph;
use crate::note::Note;
use crate::types::NoteId;

impl NoteGraph {
    /// Iterates over all live notes with their ids, in insertion order.
    #[must_use]
    pub fn notes(&self) -> NotesIter<'_> {
        NotesIter {
            inner: self.slots.iter().enumerate(),
            remaining: self.len(),
        }
    }

    /// Iterates over the neighbors of `id`, one per adjacency entry, in
    /// edge-insertion order.
    ///
    /// The sequence is recomputed fresh on every call. An unknown or removed
    /// id yields an empty iterator; entries pointing at removed notes are
    /// skipped (cascade teardown in
    /// [`remove_node`](NoteGraph::remove_node) makes that unobservable in
    /// practice).
    #[must_use]
    pub fn siblings(&self, id: NoteId) -> Siblings<'_> {
        Siblings {
            graph: self,
            ids: self
                .note(id)
                .map(|note| note.neighbor_ids().iter())
                .unwrap_or_default(),
        }
    }

    /// Iterates over every directed adjacency entry as a `(from, to)` pair,
    /// in note-then-edge insertion order.
    ///
    /// Each undirected connection appears exactly twice, once per direction.
    /// Deterministic: the order only depends on admission and connect order.
    #[must_use]
    pub fn edges(&self) -> EdgesIter<'_> {
        EdgesIter {
            notes: self.notes(),
            current_from: None,
            targets: [].iter(),
        }
    }
}

/// Iterator over `(NoteId, &Note)` pairs in insertion order.
///
/// Tombstoned slots are skipped; the length reported by
/// [`ExactSizeIterator`] is the live-note count.
pub struct NotesIter<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Option<Note>>>,
    remaining: usize,
}

impl<'a> Iterator for NotesIter<'a> {
    type Item = (NoteId, &'a Note);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, slot) in self.inner.by_ref() {
            if let Some(note) = slot {
                self.remaining -= 1;
                return Some((NoteId::from_index(index), note));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for NotesIter<'a> {}

/// Iterator over the neighbor notes of a single note.
pub struct Siblings<'a> {
    graph: &'a NoteGraph,
    ids: std::slice::Iter<'a, NoteId>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = &'a Note;

    fn next(&mut self) -> Option<Self::Item> {
        for &id in self.ids.by_ref() {
            if let Some(note) = self.graph.note(id) {
                return Some(note);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.ids.size_hint().1)
    }
}

/// Iterator over directed adjacency entries as `(from, to)` id pairs.
pub struct EdgesIter<'a> {
    notes: NotesIter<'a>,
    current_from: Option<NoteId>,
    targets: std::slice::Iter<'a, NoteId>,
}

impl<'a> Iterator for EdgesIter<'a> {
    type Item = (NoteId, NoteId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let (Some(from), Some(&to)) = (self.current_from, self.targets.next()) {
                return Some((from, to));
            }
            let (id, note) = self.notes.next()?;
            self.current_from = Some(id);
            self.targets = note.neighbor_ids().iter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> (NoteGraph, NoteId, NoteId, NoteId) {
        let mut graph = NoteGraph::new("vault");
        let a = graph.create_node("A", "");
        let b = graph.create_node("B", "");
        let c = graph.create_node("C", "");
        graph.connect(a, b).unwrap();
        graph.connect(a, c).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn notes_iter_insertion_order_and_len() {
        let (graph, ..) = sample_graph();
        let labels: Vec<&str> = graph.notes().map(|(_, n)| n.label()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert_eq!(graph.notes().len(), 3);
    }

    #[test]
    fn notes_iter_skips_tombstones() {
        let (mut graph, _, b, _) = sample_graph();
        graph.remove_node(b);
        let labels: Vec<&str> = graph.notes().map(|(_, n)| n.label()).collect();
        assert_eq!(labels, vec!["A", "C"]);
        assert_eq!(graph.notes().len(), 2);
    }

    #[test]
    fn siblings_in_edge_order() {
        let (graph, a, ..) = sample_graph();
        let labels: Vec<&str> = graph.siblings(a).map(Note::label).collect();
        assert_eq!(labels, vec!["B", "C"]);
    }

    #[test]
    fn siblings_of_unknown_id_is_empty() {
        let (graph, ..) = sample_graph();
        assert_eq!(graph.siblings(NoteId::from_index(99)).count(), 0);
    }

    #[test]
    fn edges_iter_yields_mirrored_pairs() {
        let (graph, a, b, c) = sample_graph();
        let pairs: Vec<(NoteId, NoteId)> = graph.edges().collect();
        assert_eq!(pairs, vec![(a, b), (a, c), (b, a), (c, a)]);
    }

    #[test]
    fn edges_iter_empty_graph() {
        let graph = NoteGraph::new("vault");
        assert_eq!(graph.edges().count(), 0);
    }
}
