use std::fs;

use notegraph::graph::NoteGraph;
use notegraph::mitre::{INTRUSION_SET_PARENT, IngestError, TECHNIQUES_STORAGE, ingest, load_feed};
use notegraph::note::Note;
use serde_json::{Value, json};
use tempfile::tempdir;
use uuid::Uuid;

fn sample_sets() -> Vec<Value> {
    vec![
        json!({
            "description": "Russian state-sponsored espionage group.",
            "meta": {
                "external_id": "G0016",
                "refs": ["https://attack.mitre.org/groups/G0016"],
                "synonyms": ["Cozy Bear", "The Dukes"]
            },
            "related": [
                { "dest-uuid": "b21c3b2d-02e6-45b1-980b-e69051040839", "type": "uses" },
                { "dest-uuid": "970a3432-3237-47ad-bcca-7d8cbb217736", "type": "uses" }
            ],
            "uuid": "68391641-859f-4a9a-9a1e-3e5cf71ec376",
            "value": "APT29"
        }),
        json!({
            "description": "Iranian threat group.",
            "meta": {
                "external_id": "G0049",
                "refs": [],
                "synonyms": []
            },
            "related": [
                { "dest-uuid": "970a3432-3237-47ad-bcca-7d8cbb217736", "type": "uses" }
            ],
            "uuid": "4ca1929c-7d64-4aab-b849-badbfc0c760d",
            "value": "OilRig"
        }),
    ]
}

fn sample_techniques() -> Vec<Value> {
    vec![
        json!({
            "description": "Adversaries send targeted spearphishing messages.",
            "meta": {
                "external_id": "T1566",
                "kill_chain": ["mitre-attack:initial-access"],
                "refs": ["https://attack.mitre.org/techniques/T1566"]
            },
            "uuid": "b21c3b2d-02e6-45b1-980b-e69051040839",
            "value": "Phishing"
        }),
        json!({
            "description": "Adversaries abuse PowerShell.",
            "meta": {
                "external_id": "T1059.001",
                "refs": []
            },
            "uuid": "970a3432-3237-47ad-bcca-7d8cbb217736",
            "value": "PowerShell"
        }),
    ]
}

#[test]
fn test_ingest_builds_linked_vault() {
    let mut graph = NoteGraph::new("vault");
    let report = ingest(&mut graph, &sample_sets(), &sample_techniques()).unwrap();

    assert_eq!(report.actors, 2);
    assert_eq!(report.techniques, 2);
    // APT29->Phishing, APT29->PowerShell, OilRig->PowerShell, plus two hub edges.
    assert_eq!(report.links, 5);
    assert_eq!(report.skipped, 0);

    // Hub + two actors + two techniques.
    assert_eq!(graph.len(), 5);

    let hub = graph.find_node(INTRUSION_SET_PARENT).unwrap();
    let hub_links: Vec<&str> = graph.siblings(hub).map(Note::label).collect();
    assert_eq!(hub_links, vec!["APT29", "OilRig"]);

    let apt29 = graph.find_node("APT29").unwrap();
    let apt29_links: Vec<&str> = graph.siblings(apt29).map(Note::label).collect();
    assert_eq!(
        apt29_links,
        vec!["Phishing", "PowerShell", INTRUSION_SET_PARENT]
    );

    // The shared technique carries edges back to both actors.
    let powershell = graph.find_node("PowerShell").unwrap();
    let powershell_links: Vec<&str> = graph.siblings(powershell).map(Note::label).collect();
    assert_eq!(powershell_links, vec!["APT29", "OilRig"]);
}

#[test]
fn test_ingest_carries_record_content_onto_notes() {
    let mut graph = NoteGraph::new("vault");
    ingest(&mut graph, &sample_sets(), &sample_techniques()).unwrap();

    let apt29 = graph.note(graph.find_node("APT29").unwrap()).unwrap();
    assert_eq!(
        apt29.uuid(),
        Uuid::parse_str("68391641-859f-4a9a-9a1e-3e5cf71ec376").unwrap()
    );
    assert_eq!(apt29.section("synonyms"), &json!(["Cozy Bear", "The Dukes"]));
    assert_eq!(apt29.storage_location(), "");

    // No synonyms in the record still yields the section, as a placeholder.
    let oilrig = graph.note(graph.find_node("OilRig").unwrap()).unwrap();
    assert_eq!(oilrig.section("synonyms"), &json!({}));

    let phishing = graph.note(graph.find_node("Phishing").unwrap()).unwrap();
    assert_eq!(phishing.storage_location(), TECHNIQUES_STORAGE);
    assert_eq!(
        phishing.headers(),
        &[(
            "Description".to_string(),
            "Adversaries send targeted spearphishing messages.".to_string()
        )]
    );
}

#[test]
fn test_ingest_skips_invalid_records() {
    let mut sets = sample_sets();
    sets.push(json!({ "value": "No uuid or meta" }));
    sets.push(json!({
        "description": "Bad uuid.",
        "meta": { "external_id": "G0099", "refs": [], "synonyms": [] },
        "uuid": "not-a-uuid",
        "value": "Mangled"
    }));
    let mut techniques = sample_techniques();
    techniques.push(json!({ "uuid": "also invalid" }));

    let mut graph = NoteGraph::new("vault");
    let report = ingest(&mut graph, &sets, &techniques).unwrap();

    assert_eq!(report.actors, 2);
    assert_eq!(report.skipped, 3);
    assert!(graph.find_node("Mangled").is_none());
    assert_eq!(graph.len(), 5);
}

#[test]
fn test_ingest_ignores_unresolvable_relationships() {
    let sets = vec![json!({
        "description": "Group with odd relationships.",
        "meta": { "external_id": "G0100", "refs": [], "synonyms": [] },
        "related": [
            // Not a `uses` relationship.
            { "dest-uuid": "b21c3b2d-02e6-45b1-980b-e69051040839", "type": "similar" },
            // `uses`, but nothing in the technique feed matches.
            { "dest-uuid": "11111111-2222-3333-4444-555555555555", "type": "uses" },
            // `uses`, but the target uuid is not even a uuid.
            { "dest-uuid": "garbage", "type": "uses" }
        ],
        "uuid": "0d3ca5b9-2ea9-4daf-b744-a8a501b01a92",
        "value": "Ghost"
    })];

    let mut graph = NoteGraph::new("vault");
    let report = ingest(&mut graph, &sets, &sample_techniques()).unwrap();

    // Unresolvable relationships are not validation failures.
    assert_eq!(report.actors, 1);
    assert_eq!(report.techniques, 0);
    assert_eq!(report.links, 1); // hub edge only
    assert_eq!(report.skipped, 0);

    let ghost = graph.find_node("Ghost").unwrap();
    let links: Vec<&str> = graph.siblings(ghost).map(Note::label).collect();
    assert_eq!(links, vec![INTRUSION_SET_PARENT]);
}

#[test]
fn test_reingest_is_idempotent() {
    let mut graph = NoteGraph::new("vault");
    let first = ingest(&mut graph, &sample_sets(), &sample_techniques()).unwrap();
    let len_after_first = graph.len();

    let second = ingest(&mut graph, &sample_sets(), &sample_techniques()).unwrap();

    assert_eq!(graph.len(), len_after_first);
    // Records are re-read, but nothing new is created or linked.
    assert_eq!(second.actors, first.actors);
    assert_eq!(second.techniques, 0);
    assert_eq!(second.links, 0);

    let apt29 = graph.find_node("APT29").unwrap();
    assert_eq!(graph.siblings(apt29).count(), 3);
}

#[test]
fn test_slash_names_normalize_into_labels() {
    let sets = vec![json!({
        "description": "Slash in the name.",
        "meta": { "external_id": "G0049", "refs": [], "synonyms": [] },
        "uuid": "4ca1929c-7d64-4aab-b849-badbfc0c760d",
        "value": "OilRig/APT34"
    })];

    let mut graph = NoteGraph::new("vault");
    ingest(&mut graph, &sets, &[]).unwrap();

    let id = graph.find_node("OilRig/APT34").unwrap();
    assert_eq!(graph.note(id).unwrap().label(), "OilRig - APT34");
}

#[test]
fn test_load_feed_unwraps_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sets.json");
    fs::write(
        &path,
        serde_json::to_string(&json!({ "values": sample_sets() })).unwrap(),
    )
    .unwrap();

    let values = load_feed(&path).unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0]["value"], json!("APT29"));
}

#[test]
fn test_load_feed_error_taxonomy() {
    let dir = tempdir().unwrap();

    let missing = dir.path().join("nope.json");
    assert!(matches!(
        load_feed(&missing),
        Err(IngestError::ReadFeed { .. })
    ));

    let mangled = dir.path().join("mangled.json");
    fs::write(&mangled, "{ not json").unwrap();
    assert!(matches!(
        load_feed(&mangled),
        Err(IngestError::ParseFeed { .. })
    ));

    let flat = dir.path().join("flat.json");
    fs::write(&flat, r#"{ "records": [] }"#).unwrap();
    assert!(matches!(
        load_feed(&flat),
        Err(IngestError::FeedShape { .. })
    ));

    // `values` present but not an array is a shape problem too.
    let wrong_kind = dir.path().join("wrong.json");
    fs::write(&wrong_kind, r#"{ "values": 7 }"#).unwrap();
    assert!(matches!(
        load_feed(&wrong_kind),
        Err(IngestError::FeedShape { .. })
    ));
}
