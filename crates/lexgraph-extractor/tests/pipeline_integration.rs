//! End-to-end tests: text in, adjacency tables and reports out

use lexgraph_core::{ExtractionConfig, OutputConfig};
use lexgraph_extractor::relation::{
    entity_citation_edges, entity_document_edges, entity_entity_edges,
};
use lexgraph_extractor::{DocumentProcessor, OutputWriter, PatternCatalog, Pipeline};

const SAFETY_LAW: &str = "לפי חוק התכנון והבניה, התשכ\"ה-1965 השר קבע. הקבלן והמעסיק ישתפו פעולה";

fn processor() -> DocumentProcessor {
    DocumentProcessor::with_config(
        PatternCatalog::builtin().unwrap(),
        &ExtractionConfig::default(),
    )
}

#[test]
fn test_single_document_relations() {
    let record = processor().process("safety.htm", SAFETY_LAW);

    assert!(!record.citations.is_empty());
    assert_eq!(record.actions.len(), 1);
    assert_eq!(record.entities.len(), 2);

    // One action times two ordered pairs
    assert_eq!(entity_entity_edges(&record).len(), 2);
    assert_eq!(entity_document_edges(&record).len(), 2);
    assert_eq!(
        entity_citation_edges(&record).len(),
        record.entities.len() * record.citations.len()
    );
}

#[test]
fn test_action_needs_word_boundary() {
    let record = processor().process("L1", "המפקח קבעו את הנוהל");
    assert!(record.actions.is_empty());

    let record = processor().process("L1", "המפקח קבע, את הנוהל");
    assert_eq!(record.actions, vec!["קבע"]);
}

#[test]
fn test_corpus_run_writes_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = OutputConfig {
        dir: dir.path().to_path_buf(),
        ..Default::default()
    };

    let mut pipeline = Pipeline::new(processor());
    pipeline.process_document("a.htm", SAFETY_LAW);
    pipeline.record_failure("broken.htm", "invalid utf-8 sequence");
    pipeline.process_document("b.htm", SAFETY_LAW);
    let output = pipeline.finish();

    let writer = OutputWriter::new(config.clone());
    writer.prepare().unwrap();
    writer.write_relations(&output.relations).unwrap();
    writer.write_listings(&output.index).unwrap();
    for record in &output.records {
        writer.write_report(record).unwrap();
    }

    let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();

    // Identical documents contribute identical edges twice
    assert_eq!(
        read(&config.files.entities_connected_by_actions),
        "המעסיק\tקבלן\r\nקבלן\tהמעסיק\r\nהמעסיק\tקבלן\r\nקבלן\tהמעסיק\r\n"
    );
    assert_eq!(
        read(&config.files.entities_laws_bipartite),
        "המעסיק\ta.htm\r\nקבלן\ta.htm\r\nהמעסיק\tb.htm\r\nקבלן\tb.htm\r\n"
    );

    // Listings are deduplicated
    assert_eq!(
        read(&config.files.laws),
        "Id\tx_coord\ty_coord\r\na.htm\t30\t1\r\nb.htm\t30\t2\r\n"
    );
    assert_eq!(read(&config.files.actions), "Id\tx_coord\ty_coord\r\nקבע\t10\t1\r\n");

    let report = read("a.out.txt");
    assert!(report.starts_with("ציטוטים\r\nחוק התכנון והבניה"));
    assert!(report.ends_with("גופים\r\nהמעסיק\r\nקבלן\r\n"));
    assert!(!dir.path().join("broken.out.txt").exists());

    assert_eq!(output.metrics.documents_succeeded, 2);
    assert_eq!(output.metrics.documents_failed(), 1);
    assert!(output
        .metrics
        .report()
        .contains("broken.htm: invalid utf-8 sequence"));
}

#[test]
fn test_rerun_replaces_previous_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = OutputConfig {
        dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let writer = OutputWriter::new(config.clone());

    for _ in 0..2 {
        let mut pipeline = Pipeline::new(processor());
        pipeline.process_document("a.htm", SAFETY_LAW);
        let output = pipeline.finish();

        writer.prepare().unwrap();
        writer.write_relations(&output.relations).unwrap();
        writer.write_listings(&output.index).unwrap();
    }

    let pairs = std::fs::read_to_string(dir.path().join(&config.files.laws_citations_bipartite))
        .unwrap();
    assert_eq!(pairs.lines().count(), 1);
}
