/*!
Document rendering: the note-to-text contract and the vault writer.

Design Goals:
- Keep the whole document layout in one place, so the on-disk format has a
  single source of truth.
- Deterministic output: block order depends only on header/section insertion
  order and edge order, never on hashing.
- Rendering never mutates the graph; re-running a render pass over the same
  graph overwrites the previous output byte for byte.

A rendered document is three blocks, each entry followed by a blank
separator line:

````text
## <header title>
<header body>

[[<neighbor label>]]

```<section name>
<single-line JSON payload>
```
````

The neighbor-link block is always present: with zero siblings it collapses
to just its blank separator. Files land at
`<root>[/<storage_location>]/<label>.md`; labels were '/'-normalized at
construction, so each is a single path component.
*/

use std::fs;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::graph::NoteGraph;
use crate::note::Note;
use crate::types::NoteId;

/// What a render pass does after a note fails to write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Abort on the first I/O failure. Notes written before the failure
    /// stay on disk.
    #[default]
    FailFast,
    /// Keep rendering the remaining notes and aggregate every failure into
    /// [`RenderError::Partial`].
    Continue,
}

/// Outcome of a fully successful render pass.
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Paths written, in note insertion order.
    pub written: Vec<PathBuf>,
}

/// Filesystem failures from the render pass.
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("could not create directory {}", path.display())]
    #[diagnostic(
        code(notegraph::render::create_dir),
        help("Check that the vault root is writable.")
    )]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write note {label} to {}", path.display())]
    #[diagnostic(
        code(notegraph::render::write_note),
        help("Check permissions and free space under the vault root.")
    )]
    WriteNote {
        label: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Aggregate result of a [`RenderMode::Continue`] pass with failures.
    /// The successfully written paths are still listed so callers can see
    /// the partial output.
    #[error("{failed} of {total} notes failed to render")]
    #[diagnostic(
        code(notegraph::render::partial),
        help("Inspect the related diagnostics for per-note causes.")
    )]
    Partial {
        failed: usize,
        total: usize,
        written: Vec<PathBuf>,
        #[related]
        failures: Vec<RenderError>,
    },
}

impl NoteGraph {
    /// Renders one note to its document text.
    ///
    /// Returns `None` for an unknown or removed id. The text follows the
    /// three-block layout described in the module docs.
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
    /// let text = graph.document(alice).expect("alice is live");
    /// assert!(text.contains("[[Bob]]\n"));
    /// # Ok::<(), notegraph::graph::GraphError>(())
    /// ```
    #[must_use]
    pub fn document(&self, id: NoteId) -> Option<String> {
        let note = self.note(id)?;
        Some(self.document_text(id, note))
    }

    /// Renders every note to `<root>[/<storage_location>]/<label>.md`,
    /// fail-fast. Equivalent to `render_with(RenderMode::FailFast)`.
    pub fn render(&self) -> Result<RenderReport, RenderError> {
        self.render_with(RenderMode::FailFast)
    }

    /// Renders every live note, in insertion order, under the vault root.
    ///
    /// Missing directories (the root included) are created on demand;
    /// existing files are truncated and overwritten, which makes the pass
    /// idempotent for an unchanged graph. There is no cross-note
    /// transaction: a failure partway leaves the notes written so far on
    /// disk.
    ///
    /// # Errors
    ///
    /// Under [`RenderMode::FailFast`], the first [`RenderError::CreateDir`]
    /// or [`RenderError::WriteNote`] aborts the pass. Under
    /// [`RenderMode::Continue`] every note is attempted and failures are
    /// aggregated into [`RenderError::Partial`].
    pub fn render_with(&self, mode: RenderMode) -> Result<RenderReport, RenderError> {
        let mut report = RenderReport::default();
        let mut failures = Vec::new();
        let total = self.len();

        for (id, note) in self.notes() {
            match self.write_note(id, note) {
                Ok(path) => report.written.push(path),
                Err(err) => match mode {
                    RenderMode::FailFast => return Err(err),
                    RenderMode::Continue => {
                        tracing::warn!(label = note.label(), error = %err, "note failed to render");
                        failures.push(err);
                    }
                },
            }
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(RenderError::Partial {
                failed: failures.len(),
                total,
                written: report.written,
                failures,
            })
        }
    }

    fn write_note(&self, id: NoteId, note: &Note) -> Result<PathBuf, RenderError> {
        let dir = if note.storage_location().is_empty() {
            self.root().to_path_buf()
        } else {
            self.root().join(note.storage_location())
        };
        fs::create_dir_all(&dir).map_err(|source| RenderError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(format!("{}.md", note.label()));
        fs::write(&path, self.document_text(id, note)).map_err(|source| {
            RenderError::WriteNote {
                label: note.label().to_owned(),
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(label = note.label(), path = %path.display(), "wrote note");
        Ok(path)
    }

    fn document_text(&self, id: NoteId, note: &Note) -> String {
        let mut text = String::new();

        for (title, body) in note.headers() {
            text.push_str("## ");
            text.push_str(title);
            text.push('\n');
            text.push_str(body);
            text.push_str("\n\n");
        }

        for sibling in self.siblings(id) {
            text.push_str("[[");
            text.push_str(sibling.label());
            text.push_str("]]\n");
        }
        // Separator belongs to the link block even when there are no links.
        text.push_str("\n\n");

        for (name, payload) in note.sections() {
            text.push_str("```");
            text.push_str(name);
            text.push('\n');
            text.push_str(&payload.to_string());
            text.push_str("\n```\n\n");
        }

        text
    }
}
