//! Table export
//!
//! Writes edge tables, node listings, and per-document reports. Every
//! row is UTF-8, tab-separated and terminated by CRLF. Values are
//! flattened with `collapse_newlines` first so a wrapped citation never
//! splits a row.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::corpus::CorpusIndex;
use crate::normalize::collapse_newlines;
use crate::relation::RelationTables;
use lexgraph_core::{DocumentRecord, LexError, OutputConfig, RelationEdge, Result};

const LINE_END: &str = "\r\n";

/// Header row of every node listing
pub const LISTING_HEADER: &str = "Id\tx_coord\ty_coord";

/// Report section headers: citations, actions, entities
pub const CITATIONS_HEADER: &str = "ציטוטים";
pub const ACTIONS_HEADER: &str = "פעולות";
pub const ENTITIES_HEADER: &str = "גופים";

// ============================================================================
// Row Writers
// ============================================================================

/// Write each line, newline-collapsed and CRLF-terminated
pub fn write_lines<W, I, S>(out: &mut W, lines: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        out.write_all(collapse_newlines(line.as_ref()).as_bytes())?;
        out.write_all(LINE_END.as_bytes())?;
    }
    Ok(())
}

/// Write one `left\tright` row per edge
pub fn write_edges<W: Write>(out: &mut W, edges: &[RelationEdge]) -> io::Result<()> {
    write_lines(out, edges.iter().map(RelationEdge::to_string))
}

/// Header plus one `item\tx\ty` row per unique item, y counting from 1
///
/// Items are newline-collapsed, deduplicated, and emitted in sorted order.
pub fn listing_rows<'a, I>(items: I, x_coord: u32) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let unique: BTreeSet<String> = items.into_iter().map(collapse_newlines).collect();

    std::iter::once(LISTING_HEADER.to_string())
        .chain(
            unique
                .into_iter()
                .enumerate()
                .map(|(idx, item)| format!("{item}\t{x_coord}\t{}", idx + 1)),
        )
        .collect()
}

pub fn write_listing<'a, W, I>(out: &mut W, items: I, x_coord: u32) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    write_lines(out, listing_rows(items, x_coord))
}

/// Free-text report listing a document's citations, actions and entities
pub fn write_report<W: Write>(out: &mut W, record: &DocumentRecord) -> io::Result<()> {
    let sections = [
        (CITATIONS_HEADER, &record.citations),
        (ACTIONS_HEADER, &record.actions),
        (ENTITIES_HEADER, &record.entities),
    ];

    for (idx, (header, items)) in sections.iter().enumerate() {
        if idx > 0 {
            out.write_all(LINE_END.repeat(2).as_bytes())?;
        }
        out.write_all(header.as_bytes())?;
        out.write_all(LINE_END.as_bytes())?;
        write_lines(out, items.iter())?;
    }
    Ok(())
}

/// Report file name for a document: `law.htm` becomes `law.out.txt`
pub fn report_file_name(document_id: &str) -> String {
    match document_id.strip_suffix("htm") {
        Some(stem) => format!("{stem}out.txt"),
        None => format!("{document_id}.out.txt"),
    }
}

// ============================================================================
// Output Directory
// ============================================================================

/// Writes all run outputs into the configured directory
pub struct OutputWriter {
    config: OutputConfig,
}

impl OutputWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Create the output directory and remove tables left by a previous run
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config.dir).map_err(|e| io_error(&self.config.dir, e))?;

        if self.config.clear_previous {
            for name in self.config.files.all() {
                let path = self.config.dir.join(name);
                match std::fs::remove_file(&path) {
                    Ok(()) => tracing::debug!("Removed previous output {}", path.display()),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(io_error(&path, e)),
                }
            }
        }
        Ok(())
    }

    /// Write the four edge tables
    pub fn write_relations(&self, tables: &RelationTables) -> Result<()> {
        let files = &self.config.files;
        let outputs = [
            (&files.entities_connected_by_actions, &tables.entity_entity),
            (&files.entities_laws_bipartite, &tables.entity_document),
            (&files.entities_citations_bipartite, &tables.entity_citation),
            (&files.laws_citations_bipartite, &tables.document_citation),
        ];

        for (name, edges) in outputs {
            let path = self.config.dir.join(name);
            self.write_file(&path, |out| write_edges(out, edges))?;
            tracing::debug!("Wrote {} edges to {}", edges.len(), path.display());
        }
        Ok(())
    }

    /// Write the four node listings
    pub fn write_listings(&self, index: &CorpusIndex) -> Result<()> {
        let files = &self.config.files;
        let x = self.config.x_coordinates;

        let listings: [(&String, Vec<&str>, u32); 4] = [
            (
                &files.actions,
                index.all_actions.iter().map(String::as_str).collect(),
                x.actions,
            ),
            (
                &files.entities,
                index.all_entities.iter().map(String::as_str).collect(),
                x.entities,
            ),
            (
                &files.citations,
                index.all_citations.iter().map(String::as_str).collect(),
                x.citations,
            ),
            (
                &files.laws,
                index.documents.iter().map(String::as_str).collect(),
                x.laws,
            ),
        ];

        for (name, items, x_coord) in listings {
            let path = self.config.dir.join(name);
            self.write_file(&path, |out| write_listing(out, items.iter().copied(), x_coord))?;
        }
        Ok(())
    }

    /// Write one document report, returning its path
    pub fn write_report(&self, record: &DocumentRecord) -> Result<PathBuf> {
        let path = self.config.dir.join(report_file_name(&record.id));
        self.write_file(&path, |out| write_report(out, record))?;
        Ok(path)
    }

    fn write_file<F>(&self, path: &Path, body: F) -> Result<()>
    where
        F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    {
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        let mut out = BufWriter::new(file);
        body(&mut out).map_err(|e| io_error(path, e))?;
        out.flush().map_err(|e| io_error(path, e))
    }
}

fn io_error(path: &Path, source: io::Error) -> LexError {
    LexError::Io {
        path: path.display().to_string(),
        source,
    }
}

// ============================================================================
// Tests
// ============================================================================
