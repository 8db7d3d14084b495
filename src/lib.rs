//! # Notegraph: Markdown Knowledge-Vault Graphs
//!
//! Notegraph builds bidirectional note graphs and renders them as
//! Obsidian-flavored markdown vaults, with a feed-ingestion layer that
//! populates a graph from the MITRE intrusion-set and technique galaxies.
//!
//! ## Core Concepts
//!
//! - **Notes**: Content units with ordered headers, JSON sections, and
//!   neighbor links
//! - **Graph**: Arena-backed store with stable ids and label deduplication
//! - **Edges**: Reciprocal neighbor lists kept symmetric by a single pair of
//!   entry points
//! - **Rendering**: Deterministic markdown, one file per note, laid out under
//!   a vault root
//! - **Ingestion**: MITRE galaxy feeds validated record by record into a
//!   linked vault
//!
//! ## Quick Start
//!
//! ### Building a Graph
//!
//! Notes are admitted once per label; edges are symmetric and idempotent:
//!
//! ```
//! use notegraph::graph::NoteGraph;
//!
//! let mut graph = NoteGraph::new("vault");
//! let apt29 = graph.create_node("APT29", "");
//! let phishing = graph.create_node("Phishing", "techniques");
//! graph.connect(apt29, phishing)?;
//!
//! assert!(graph.is_connected(apt29, phishing));
//! assert_eq!(graph.len(), 2);
//!
//! // A second admission under the same label returns the original id.
//! assert_eq!(graph.create_node("APT29", "elsewhere"), apt29);
//! # Ok::<(), notegraph::graph::GraphError>(())
//! ```
//!
//! ### Filling In Content
//!
//! ```
//! use notegraph::note::Note;
//! use serde_json::json;
//!
//! let mut note = Note::new("APT29");
//! note.add_header("Bio", "Russian state-sponsored group.");
//! note.section_data("synonyms", json!(["Cozy Bear", "The Dukes"]));
//!
//! assert_eq!(note.section("synonyms"), &json!(["Cozy Bear", "The Dukes"]));
//! ```
//!
//! ### Producing Markdown
//!
//! [`NoteGraph::document`](graph::NoteGraph::document) renders one note;
//! [`NoteGraph::render`](graph::NoteGraph::render) writes the whole vault to
//! disk:
//!
//! ```
//! use notegraph::graph::NoteGraph;
//!
//! let mut graph = NoteGraph::new("vault");
//! let apt29 = graph.create_node("APT29", "");
//! let phishing = graph.create_node("Phishing", "techniques");
//! graph.connect(apt29, phishing)?;
//!
//! let text = graph.document(apt29).unwrap_or_default();
//! assert!(text.contains("[[Phishing]]"));
//! # Ok::<(), notegraph::graph::GraphError>(())
//! ```
//!
//! ## Best Practices
//!
//! ### Working with Labels
//!
//! ```
//! use notegraph::graph::NoteGraph;
//!
//! let mut graph = NoteGraph::new("vault");
//!
//! // ✅ GOOD: Hand labels over as-is; the graph normalizes separators
//! let id = graph.create_node("OilRig/APT34", "");
//!
//! // ✅ GOOD: Lookups accept either spelling
//! assert_eq!(graph.find_node("OilRig/APT34"), Some(id));
//! assert_eq!(graph.find_node("OilRig - APT34"), Some(id));
//!
//! // ❌ AVOID: Pre-sanitizing labels by hand; normalization exists so note
//! // labels double as flat filenames
//! ```
//!
//! ### Error Handling
//!
//! Mutating edge operations validate their ids and return rich diagnostics:
//!
//! ```
//! use notegraph::graph::{GraphError, NoteGraph};
//! use notegraph::types::NoteId;
//!
//! let mut graph = NoteGraph::new("vault");
//! let alice = graph.create_node("Alice", "");
//! let ghost = NoteId::from(7);
//!
//! let err = graph.connect(alice, ghost).unwrap_err();
//! assert!(matches!(err, GraphError::UnknownNote(_)));
//! ```
//!
//! ## Module Guide
//!
//! - [`types`] - Note ids and label normalization
//! - [`note`] - Note content: headers, sections, and neighbor links
//! - [`graph`] - The arena store, edge operations, and iteration
//! - [`render`] - Markdown documents and on-disk vault rendering
//! - [`mitre`] - Galaxy feed schemas and graph ingestion

pub mod graph;
pub mod mitre;
pub mod note;
pub mod render;
pub mod types;
