//! MITRE galaxy ingestion: from threat-intel feeds to a linked vault.
//!
//! ## Core Concepts
//!
//! - [`IntrusionSet`] / [`AttackTechnique`]: typed views of the two galaxy
//!   feeds, validated record by record.
//! - [`load_feed`]: reads a feed file and unwraps its `values` array.
//! - [`ingest`]: populates a [`NoteGraph`](crate::graph::NoteGraph) with one
//!   note per intrusion set and per referenced technique, linked through the
//!   [`INTRUSION_SET_PARENT`] hub.
//! - [`IngestReport`]: counters for what landed and what was skipped.
//!
//! ## Quick Start
//!
//! ```
//! use notegraph::graph::NoteGraph;
//! use notegraph::mitre::{INTRUSION_SET_PARENT, ingest};
//! use serde_json::json;
//!
//! let sets = vec![json!({
//!     "description": "A group.",
//!     "meta": { "external_id": "G0016", "refs": [], "synonyms": ["Cozy Bear"] },
//!     "related": [{ "dest-uuid": "b21c3b2d-02e6-45b1-980b-e69051040839", "type": "uses" }],
//!     "uuid": "68391641-859f-4a9a-9a1e-3e5cf71ec376",
//!     "value": "APT29"
//! })];
//! let techniques = vec![json!({
//!     "description": "Adversaries send targeted mail.",
//!     "meta": { "external_id": "T1566", "refs": [] },
//!     "uuid": "b21c3b2d-02e6-45b1-980b-e69051040839",
//!     "value": "Phishing"
//! })];
//!
//! let mut graph = NoteGraph::new("vault");
//! let report = ingest(&mut graph, &sets, &techniques)?;
//!
//! assert_eq!(report.actors, 1);
//! assert_eq!(report.techniques, 1);
//! assert!(graph.find_node("APT29").is_some());
//! assert!(graph.find_node(INTRUSION_SET_PARENT).is_some());
//! # Ok::<(), notegraph::mitre::IngestError>(())
//! ```

mod ingest;
mod records;

pub use ingest::{
    INTRUSION_SET_PARENT, IngestError, IngestReport, TECHNIQUES_STORAGE, ingest, load_feed,
};
pub use records::{AttackTechnique, IntrusionSet, IntrusionSetMeta, TechniqueMeta, TechniqueUse};
