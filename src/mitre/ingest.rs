/*!
Feed ingestion: turns the MITRE galaxy feeds into a populated [`NoteGraph`].

Design Goals:
- One pass per feed. Technique records are indexed by uuid up front so
  relationship resolution is a hash lookup, not a rescan of the feed.
- Malformed records degrade, they do not abort. A record that fails
  validation (or carries an unparseable uuid) is logged and counted in
  [`IngestReport::skipped`]; the rest of the feed still lands.
- Relationships that point at nothing are quietly ignored. The
  intrusion-set feed routinely references malware and tool uuids that the
  technique feed does not carry.

[`ingest`] is deterministic for a given pair of feeds: notes are admitted
in feed order, so graph iteration and rendering order follow the feeds.
*/

use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::graph::{GraphError, NoteGraph};

use super::records::{AttackTechnique, IntrusionSet};

/// Label of the hub note every ingested intrusion set is connected to.
pub const INTRUSION_SET_PARENT: &str = "MITRE - Intrusion Sets";

/// Subdirectory (relative to the graph root) technique notes render into.
pub const TECHNIQUES_STORAGE: &str = "techniques";

const USES_RELATION: &str = "uses";
const SYNONYMS_SECTION: &str = "synonyms";
const DESCRIPTION_HEADER: &str = "Description";

/// Errors raised while loading or ingesting a galaxy feed.
#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    /// The feed file could not be read.
    #[error("could not read feed {}", path.display())]
    #[diagnostic(
        code(notegraph::mitre::read_feed),
        help("Check that the feed path exists and is readable.")
    )]
    ReadFeed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The feed file is not valid JSON.
    #[error("feed {} is not valid JSON", path.display())]
    #[diagnostic(
        code(notegraph::mitre::parse_feed),
        help("Galaxy feeds are plain JSON documents; re-download the file if it is truncated.")
    )]
    ParseFeed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The feed parsed but does not wrap its records in a `values` array.
    #[error("feed {} has no `values` array", path.display())]
    #[diagnostic(
        code(notegraph::mitre::feed_shape),
        help("Galaxy feeds keep their records under a top-level `values` key.")
    )]
    FeedShape { path: PathBuf },

    /// A graph edit failed mid-ingest.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

/// Counters from one [`ingest`] run.
///
/// `actors` and `skipped` count feed records, so a feed that lists the same
/// intrusion set twice bumps `actors` twice while producing a single note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Intrusion-set records that passed validation and became notes.
    pub actors: usize,
    /// Technique notes created for the first time during this run.
    pub techniques: usize,
    /// Edges added to the graph (actor to technique, and hub to actor).
    pub links: usize,
    /// Records dropped by validation, from either feed.
    pub skipped: usize,
}

/// Reads a galaxy feed from disk and unwraps its `values` array.
///
/// # Errors
///
/// Returns [`IngestError::ReadFeed`] when the file cannot be read,
/// [`IngestError::ParseFeed`] when it is not JSON, and
/// [`IngestError::FeedShape`] when the document has no top-level `values`
/// array.
pub fn load_feed(path: impl AsRef<Path>) -> Result<Vec<Value>, IngestError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| IngestError::ReadFeed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut parsed: Value = serde_json::from_str(&raw).map_err(|source| IngestError::ParseFeed {
        path: path.to_path_buf(),
        source,
    })?;
    match parsed.get_mut("values").map(Value::take) {
        Some(Value::Array(values)) => Ok(values),
        _ => Err(IngestError::FeedShape {
            path: path.to_path_buf(),
        }),
    }
}

/// Populates `graph` from the two galaxy feeds.
///
/// Every valid intrusion-set record becomes a note carrying its feed uuid
/// and a `synonyms` section, connected to the [`INTRUSION_SET_PARENT`] hub.
/// Each of its `uses` relationships that resolves against the technique
/// feed yields a technique note (stored under [`TECHNIQUES_STORAGE`], with
/// the technique description as a `Description` header) and an edge from
/// the actor to it.
///
/// Records the graph already holds are deduplicated by label, so ingesting
/// overlapping feeds into the same graph is safe.
///
/// # Errors
///
/// Returns [`IngestError::Graph`] if an edge edit fails; feed-level
/// problems are handled per record and reported via
/// [`IngestReport::skipped`] instead.
pub fn ingest(
    graph: &mut NoteGraph,
    intrusion_sets: &[Value],
    techniques: &[Value],
) -> Result<IngestReport, IngestError> {
    let mut report = IngestReport::default();
    let index = technique_index(techniques, &mut report);
    let parent = graph.create_node(INTRUSION_SET_PARENT, "");

    for record in intrusion_sets {
        let set: IntrusionSet = match serde_json::from_value(record.clone()) {
            Ok(set) => set,
            Err(err) => {
                tracing::warn!(error = %err, "skipping invalid intrusion-set record");
                report.skipped += 1;
                continue;
            }
        };
        let Ok(set_uuid) = Uuid::parse_str(&set.uuid) else {
            tracing::warn!(name = %set.name, uuid = %set.uuid, "intrusion-set uuid is unparseable, skipping record");
            report.skipped += 1;
            continue;
        };

        tracing::info!(name = %set.name, "adding intrusion set to the graph");
        let actor = graph.create_node(&set.name, "");
        if let Some(note) = graph.note_mut(actor) {
            note.set_uuid(set_uuid);
            note.add_section(SYNONYMS_SECTION);
            if !set.meta.synonyms.is_empty() {
                note.section_data(SYNONYMS_SECTION, Value::from(set.meta.synonyms.clone()));
            }
        }
        report.actors += 1;

        for reference in set.techniques.iter().flatten() {
            if reference.kind != USES_RELATION {
                continue;
            }
            let Ok(dest) = Uuid::parse_str(&reference.dest_uuid) else {
                tracing::debug!(dest_uuid = %reference.dest_uuid, "relationship target uuid is unparseable");
                continue;
            };
            let Some(technique) = index.get(&dest) else {
                // Expected: the intrusion-set feed also references malware
                // and tool uuids outside the technique feed.
                tracing::debug!(%dest, "no technique record for relationship target");
                continue;
            };

            let before = graph.len();
            let target = graph.create_node(&technique.name, TECHNIQUES_STORAGE);
            if graph.len() > before {
                report.techniques += 1;
            }
            if let Some(note) = graph.note_mut(target) {
                note.add_header(DESCRIPTION_HEADER, &technique.description);
            }
            if target != actor && !graph.is_connected(actor, target) {
                graph.connect(actor, target)?;
                report.links += 1;
            }
        }

        if actor != parent && !graph.is_connected(parent, actor) {
            graph.connect(parent, actor)?;
            report.links += 1;
        }
    }

    tracing::debug!(
        actors = report.actors,
        techniques = report.techniques,
        links = report.links,
        skipped = report.skipped,
        "ingest finished"
    );
    Ok(report)
}

/// Indexes the technique feed by record uuid.
///
/// Invalid records and unparseable uuids are logged, counted in
/// `report.skipped`, and left out of the index.
fn technique_index(
    values: &[Value],
    report: &mut IngestReport,
) -> FxHashMap<Uuid, AttackTechnique> {
    let mut index = FxHashMap::default();
    for record in values {
        let technique: AttackTechnique = match serde_json::from_value(record.clone()) {
            Ok(technique) => technique,
            Err(err) => {
                tracing::warn!(error = %err, "skipping invalid technique record");
                report.skipped += 1;
                continue;
            }
        };
        match Uuid::parse_str(&technique.uuid) {
            Ok(uuid) => {
                index.insert(uuid, technique);
            }
            Err(err) => {
                tracing::warn!(uuid = %technique.uuid, error = %err, "technique uuid is unparseable, skipping record");
                report.skipped += 1;
            }
        }
    }
    index
}
