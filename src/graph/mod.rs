//! Note graph: an insertion-ordered arena of labeled notes with reciprocal
//! edges.
//!
//! The main entry point is [`NoteGraph`]. A producer asks it for notes
//! (deduplicated by label under the default [`IdentityPolicy`]), connects
//! them, attaches content through [`NoteGraph::note_mut`], and finally hands
//! the whole graph to the render pass (see [`crate::render`]).
//!
//! # Core Concepts
//!
//! - **Label identity**: a note's normalized label is its key; creating the
//!   same label twice yields the same note. The per-note uuid is auxiliary.
//! - **Arena ownership**: notes live in slots addressed by
//!   [`NoteId`](crate::types::NoteId); removal tombstones a slot, so ids
//!   never move or get reused.
//! - **Reciprocal edges**: undirected connections stored as mirrored
//!   adjacency entries, written only by [`NoteGraph::connect`] and
//!   [`NoteGraph::disconnect`], which keeps B-in-A's-list equivalent to
//!   A-in-B's-list at all times.
//! - **Insertion order**: iteration and rendering follow admission order;
//!   sibling order follows connect order.
//!
//! # Quick Start
//!
//! ```rust
//! use notegraph::graph::NoteGraph;
//! use serde_json::json;
//!
//! let mut graph = NoteGraph::new("vault");
//!
//! let actor = graph.create_node("APT29", "");
//! let technique = graph.create_node("Spearphishing", "techniques");
//! graph.connect(actor, technique)?;
//!
//! if let Some(note) = graph.note_mut(actor) {
//!     note.add_section("synonyms")
//!         .section_data("synonyms", json!(["Cozy Bear"]));
//! }
//!
//! assert_eq!(graph.find_node("APT29"), Some(actor));
//! let neighbors: Vec<&str> = graph.siblings(actor).map(|n| n.label()).collect();
//! assert_eq!(neighbors, vec!["Spearphishing"]);
//! # Ok::<(), notegraph::graph::GraphError>(())
//! ```
//!
//! # Graph Iteration
//!
//! [`NoteGraph::notes`], [`NoteGraph::siblings`], and [`NoteGraph::edges`]
//! return lazy iterators over the live structure; their ordering guarantees
//! are documented on [`NotesIter`], [`Siblings`], and [`EdgesIter`].

mod edges;
mod iteration;
mod network;


pub use edges::GraphError;
pub use iteration::{EdgesIter, NotesIter, Siblings};
pub use network::{IdentityPolicy, NoteGraph};
