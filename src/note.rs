//! Note: the vertex type carried by a [`NoteGraph`](crate::graph::NoteGraph).
//!
//! A [`Note`] bundles an identity (normalized label plus an auxiliary uuid)
//! with the document content that eventually lands on disk: header blocks,
//! named JSON data sections, and a storage sub-location that groups the
//! rendered file under a subdirectory of the vault root.
//!
//! Content follows two write disciplines that the rendering contract depends
//! on:
//!
//! - **Headers are first-write-wins.** [`Note::add_header`] with an existing
//!   title is a no-op, so every header renders exactly once, in the order it
//!   was first written.
//! - **Sections are last-write-wins.** [`Note::section_data`] always
//!   overwrites, whether or not [`Note::add_section`] ran before it.
//!
//! # Examples
//!
//! ```rust
//! use notegraph::note::Note;
//! use serde_json::json;
//!
//! let mut note = Note::with_storage_location("Spearphishing", "techniques");
//! note.add_header("Description", "Adversaries send targeted mail.");
//! note.add_section("synonyms")
//!     .section_data("synonyms", json!(["Phishing for Information"]));
//!
//! assert_eq!(note.label(), "Spearphishing");
//! assert_eq!(note.storage_location(), "techniques");
//! assert_eq!(note.section("synonyms"), &json!(["Phishing for Information"]));
//! ```

use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::types::{NoteId, normalize_label};

/// A labeled vertex carrying document content.
///
/// Notes are normally created through
/// [`NoteGraph::create_node`](crate::graph::NoteGraph::create_node), which
/// also runs the graph's identity policy. Constructing one directly is useful
/// for the raw [`add_note`](crate::graph::NoteGraph::add_note) path and in
/// tests.
///
/// The label is normalized on construction ([`normalize_label`]); every
/// comparison the graph performs uses the normalized form. The uuid is
/// generated fresh per note, is never consulted for equality or lookup, and
/// may be overwritten by a producer that wants to carry an external
/// identifier (see [`Note::set_uuid`]).
#[derive(Clone, Debug)]
pub struct Note {
    uuid: Uuid,
    label: String,
    storage_location: String,
    headers: Vec<(String, String)>,
    sections: Vec<(String, Value)>,
    pub(crate) neighbors: Vec<NoteId>,
}

impl Note {
    /// Creates a note with the given display name and no storage
    /// sub-location (its document renders directly under the vault root).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notegraph::note::Note;
    ///
    /// let note = Note::new("Command/Control");
    /// assert_eq!(note.label(), "Command - Control");
    /// assert_eq!(note.storage_location(), "");
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_storage_location(name, "")
    }

    /// Creates a note whose document renders under
    /// `<root>/<storage_location>/` when the location is non-empty.
    #[must_use]
    pub fn with_storage_location(
        name: impl Into<String>,
        storage_location: impl Into<String>,
    ) -> Self {
        Note {
            uuid: Uuid::new_v4(),
            label: normalize_label(&name.into()),
            storage_location: storage_location.into(),
            headers: Vec::new(),
            sections: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    /// The normalized display label. This is the note's identity key inside
    /// the graph.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The storage sub-location; empty means the vault root.
    #[must_use]
    pub fn storage_location(&self) -> &str {
        &self.storage_location
    }

    /// The note's auxiliary identifier.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Replaces the generated uuid, e.g. with an identifier from the source
    /// feed. The graph never looks at this value.
    pub fn set_uuid(&mut self, uuid: Uuid) {
        self.uuid = uuid;
    }

    /// Ids of the directly connected notes, in edge-insertion order.
    #[must_use]
    pub fn neighbor_ids(&self) -> &[NoteId] {
        &self.neighbors
    }

    /// Header blocks as `(title, body)` pairs, in first-write order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Data sections as `(name, payload)` pairs, in insertion order.
    #[must_use]
    pub fn sections(&self) -> &[(String, Value)] {
        &self.sections
    }

    /// Adds a header block under `title`, unless one already exists.
    ///
    /// First write wins: a second call with the same title leaves the stored
    /// body untouched, so a header can never render twice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notegraph::note::Note;
    ///
    /// let mut note = Note::new("APT29");
    /// note.add_header("Bio", "first");
    /// note.add_header("Bio", "second");
    /// assert_eq!(note.headers(), &[("Bio".to_string(), "first".to_string())]);
    /// ```
    pub fn add_header(&mut self, title: impl Into<String>, body: impl Into<String>) {
        let title = title.into();
        if !self.headers.iter().any(|(t, _)| *t == title) {
            self.headers.push((title, body.into()));
        }
    }

    /// Ensures a section entry exists under `name`, initialized to the empty
    /// JSON object when new, and returns `&mut Self` so a
    /// [`section_data`](Self::section_data) call can be chained.
    ///
    /// An existing section is left exactly as it is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notegraph::note::Note;
    /// use serde_json::json;
    ///
    /// let mut note = Note::new("APT29");
    /// note.add_section("synonyms")
    ///     .section_data("synonyms", json!(["Cozy Bear"]));
    /// assert_eq!(note.section("synonyms"), &json!(["Cozy Bear"]));
    ///
    /// // Ensured but never written: renders as the `{}` placeholder.
    /// note.add_section("refs");
    /// assert_eq!(note.section("refs"), &json!({}));
    /// ```
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !self.sections.iter().any(|(n, _)| *n == name) {
            self.sections.push((name, Value::Object(serde_json::Map::new())));
        }
        self
    }

    /// Sets the payload stored under `name`, creating the section if needed.
    ///
    /// Last write wins, unconditionally; this does not require a prior
    /// [`add_section`](Self::add_section) call.
    pub fn section_data(&mut self, name: impl Into<String>, data: Value) {
        let name = name.into();
        match self.sections.iter_mut().find(|(n, _)| *n == name) {
            Some((_, payload)) => *payload = data,
            None => self.sections.push((name, data)),
        }
    }

    /// Reads the payload stored under `name`.
    ///
    /// Never fails: an absent section reads as [`Value::Null`].
    #[must_use]
    pub fn section(&self, name: &str) -> &Value {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, payload)| payload)
            .unwrap_or(&Value::Null)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
