//! Demo: MITRE Galaxy Vault
//!
//! This demonstration ingests the MITRE intrusion-set and technique galaxy
//! feeds into a note graph and renders the result as a markdown vault. It
//! covers feed loading, record validation, graph linking, and rendering.
//!
//! What You'll Learn:
//! 1. Feed Loading: Reading galaxy files and unwrapping their `values` array
//! 2. Ingestion: Per-record validation with skip counting
//! 3. Graph Linking: Actors, techniques, and the intrusion-set hub
//! 4. Document Preview: Rendering a single note to a string
//! 5. Vault Rendering: Writing the whole graph to disk
//!
//! Running This Demo:
//! ```bash
//! # Bundled sample feeds
//! cargo run --example mitre_vault
//!
//! # Real galaxy files
//! cargo run --example mitre_vault -- intrusion-sets.json techniques.json
//! ```
//!
//! Set `NOTEGRAPH_VAULT` (flag or `.env` entry) to change where the vault is
//! written, and `RUST_LOG=notegraph=debug` to watch per-record decisions.

use std::env;
use std::path::PathBuf;

use miette::Result;
use notegraph::graph::NoteGraph;
use notegraph::mitre::{INTRUSION_SET_PARENT, ingest, load_feed};
use notegraph::note::Note;
use serde_json::{Value, json};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,notegraph=warn"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();
}

fn init_miette() {
    // Pretty panic reports
    miette::set_panic_hook();
}

/// Vault root, resolved from the environment with a local fallback.
fn resolve_vault_root() -> PathBuf {
    dotenvy::dotenv().ok();
    env::var("NOTEGRAPH_VAULT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/mitre-vault"))
}

fn main() -> Result<()> {
    init_tracing();
    init_miette();
    demo()
}

fn demo() -> Result<()> {
    info!("\n╔══════════════════════════════════════════════════════════╗");
    info!("║                   MITRE Galaxy Vault                     ║");
    info!("║           Feeds -> Note Graph -> Markdown Vault          ║");
    info!("╚══════════════════════════════════════════════════════════╝\n");

    // ✅ STEP 1: Load the feeds
    info!("📥 Step 1: Loading galaxy feeds");

    let mut args = env::args().skip(1);
    let (intrusion_sets, techniques) = match (args.next(), args.next()) {
        (Some(sets_path), Some(techniques_path)) => {
            info!("   ✓ Intrusion sets: {sets_path}");
            info!("   ✓ Techniques:     {techniques_path}");
            (load_feed(sets_path)?, load_feed(techniques_path)?)
        }
        _ => {
            info!("   ✓ No feed paths given, using the bundled sample");
            sample_feeds()
        }
    };
    info!(
        "   ✓ {} intrusion-set records, {} technique records",
        intrusion_sets.len(),
        techniques.len()
    );

    // ✅ STEP 2: Ingest into a graph
    info!("\n🔗 Step 2: Ingesting records into the graph");

    let vault_root = resolve_vault_root();
    let mut graph = NoteGraph::new(&vault_root);
    let report = ingest(&mut graph, &intrusion_sets, &techniques)?;

    info!("   ✓ Actors ingested:    {}", report.actors);
    info!("   ✓ Techniques created: {}", report.techniques);
    info!("   ✓ Edges added:        {}", report.links);
    info!("   ✓ Records skipped:    {}", report.skipped);
    info!("   ✓ Notes in graph:     {}", graph.len());
    info!("   ✓ Unique edges:       {}", graph.edges().count() / 2);

    // ✅ STEP 3: Preview one document
    info!("\n📄 Step 3: Previewing a rendered document");

    if let Some(hub) = graph.find_node(INTRUSION_SET_PARENT) {
        let actors: Vec<&str> = graph.siblings(hub).map(Note::label).collect();
        info!("   ✓ Hub note links to: {actors:?}");
    }
    if let Some(id) = graph.find_node("APT29")
        && let Some(document) = graph.document(id)
    {
        info!("\n--- APT29.md ---\n{document}--- end ---");
    }

    // ✅ STEP 4: Render the vault
    info!("\n💾 Step 4: Rendering the vault to disk");

    let rendered = graph.render()?;
    info!(
        "   ✓ Wrote {} notes under {}",
        rendered.written.len(),
        vault_root.display()
    );
    for path in rendered.written.iter().take(5) {
        info!("      {}", path.display());
    }
    if rendered.written.len() > 5 {
        info!("      ... and {} more", rendered.written.len() - 5);
    }

    info!("\n╔══════════════════════════════════════════════════════════╗");
    info!("║                MITRE Galaxy Vault Complete               ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("\n✅ Key patterns demonstrated:");
    info!("   • Feed loading with shape validation");
    info!("   • Per-record validation with skip counting");
    info!("   • Label-deduplicated notes and idempotent edges");
    info!("   • Deterministic markdown rendering");
    info!("\n🎯 Next: point the demo at real galaxy files to build a full vault");

    Ok(())
}

/// A small, self-contained pair of feeds.
///
/// Shaped like the real galaxies, including a record that fails validation
/// and a relationship pointing outside the technique feed, so the skip and
/// resolution paths both show up in the logs.
fn sample_feeds() -> (Vec<Value>, Vec<Value>) {
    let intrusion_sets = vec![
        json!({
            "description": "Russian state-sponsored espionage group.",
            "meta": {
                "external_id": "G0016",
                "refs": ["https://attack.mitre.org/groups/G0016"],
                "synonyms": ["Cozy Bear", "The Dukes"]
            },
            "related": [
                { "dest-uuid": "b21c3b2d-02e6-45b1-980b-e69051040839", "type": "uses" },
                { "dest-uuid": "970a3432-3237-47ad-bcca-7d8cbb217736", "type": "uses" },
                { "dest-uuid": "fbd29c89-18c0-4f1f-8afb-d29e2cb4f4d4", "type": "uses" }
            ],
            "uuid": "68391641-859f-4a9a-9a1e-3e5cf71ec376",
            "value": "APT29"
        }),
        json!({
            "description": "Suspected Iranian threat group targeting the Middle East.",
            "meta": {
                "external_id": "G0049",
                "refs": ["https://attack.mitre.org/groups/G0049"],
                "synonyms": ["Helix Kitten"]
            },
            "related": [
                { "dest-uuid": "970a3432-3237-47ad-bcca-7d8cbb217736", "type": "uses" },
                { "dest-uuid": "68391641-859f-4a9a-9a1e-3e5cf71ec376", "type": "similar" }
            ],
            "uuid": "4ca1929c-7d64-4aab-b849-badbfc0c760d",
            "value": "OilRig/APT34"
        }),
        // Deliberately malformed: exercises the validation skip path.
        json!({ "value": "Broken record" }),
    ];

    let techniques = vec![
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
            "description": "Adversaries abuse PowerShell for execution.",
            "meta": {
                "external_id": "T1059.001",
                "kill_chain": ["mitre-attack:execution"],
                "refs": ["https://attack.mitre.org/techniques/T1059/001"]
            },
            "uuid": "970a3432-3237-47ad-bcca-7d8cbb217736",
            "value": "Command and Scripting Interpreter/PowerShell"
        }),
    ];

    (intrusion_sets, techniques)
}
