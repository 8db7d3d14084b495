//! Serde schemas for the MITRE galaxy feeds.
//!
//! These mirror the shape of the `mitre-intrusion-set` and
//! `mitre-attack-pattern` galaxy files: each feed is an object wrapping its
//! records in a top-level `values` array, and records use feed-specific key
//! spellings (`value` for the display name, `related` for the relationship
//! list, `dest-uuid` for relationship targets). Field aliases accept both
//! the feed spelling and the field name.
//!
//! Validation happens record by record at the ingestion boundary; a record
//! that fails to deserialize is logged and skipped, never a hard error for
//! the whole feed.

use serde::Deserialize;

/// One intrusion-set (threat actor) record.
#[derive(Debug, Clone, Deserialize)]
pub struct IntrusionSet {
    pub description: String,
    pub meta: IntrusionSetMeta,
    /// Relationship list; absent in feeds for sets without known links.
    #[serde(alias = "related")]
    pub techniques: Option<Vec<TechniqueUse>>,
    pub uuid: String,
    #[serde(alias = "value")]
    pub name: String,
}

/// Metadata block of an intrusion-set record.
#[derive(Debug, Clone, Deserialize)]
pub struct IntrusionSetMeta {
    pub external_id: String,
    pub refs: Vec<String>,
    pub synonyms: Vec<String>,
}

/// One entry of an intrusion set's relationship list.
#[derive(Debug, Clone, Deserialize)]
pub struct TechniqueUse {
    /// Uuid of the related record, `dest-uuid` in the feed.
    #[serde(alias = "dest-uuid")]
    pub dest_uuid: String,
    /// Relationship kind; only `"uses"` entries point at techniques.
    #[serde(rename = "type")]
    pub kind: String,
}

/// One attack-pattern (technique) record.
#[derive(Debug, Clone, Deserialize)]
pub struct AttackTechnique {
    pub description: String,
    pub meta: TechniqueMeta,
    pub uuid: String,
    #[serde(alias = "value")]
    pub name: String,
}

/// Metadata block of an attack-pattern record.
#[derive(Debug, Clone, Deserialize)]
pub struct TechniqueMeta {
    pub external_id: String,
    #[serde(default)]
    pub kill_chain: Vec<String>,
    pub refs: Vec<String>,
}
