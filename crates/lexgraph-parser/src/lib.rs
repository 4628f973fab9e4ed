//! LexGraph Parser - Document discovery and text extraction
//!
//! Supports reading of:
//! - HTML documents (body text only, markup stripped)
//! - Plain text files
//!
//! Each parser implements the `DocumentParser` trait and produces a
//! `ParsedDocument` whose `content` is ready for mention extraction.
//! Input must already be valid UTF-8; documents that are not are
//! rejected whole rather than partially decoded.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod html;

pub use html::{extract_body_text, HtmlParser};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while loading a document
#[derive(Error, Debug)]
pub enum ParserError {
    /// File format is not supported
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// IO error while reading the file
    #[error("IO error reading file: {path}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid UTF-8
    #[error("Text encoding error in {path}: {message}")]
    EncodingError { path: String, message: String },

    /// HTML document has no <body> element
    #[error("No <body> element found in {0}")]
    MissingBody(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

// ============================================================================
// Parsed Document Types
// ============================================================================

/// A loaded document with extracted text
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Document identifier (file name)
    pub id: String,

    /// Original file path
    pub file_path: PathBuf,

    /// Detected file type
    pub file_type: FileType,

    /// Extracted text content
    pub content: String,
}

impl ParsedDocument {
    /// Create a new parsed document; the id is the file name
    pub fn new(file_path: impl Into<PathBuf>, file_type: FileType) -> Self {
        let file_path = file_path.into();
        let id = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());

        Self {
            id,
            file_path,
            file_type,
            content: String::new(),
        }
    }

    /// Set content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Supported file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Html,
    PlainText,
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "html" | "htm" => Self::Html,
            "txt" => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::PlainText => write!(f, "text"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ============================================================================
// Parser Trait
// ============================================================================

/// Trait for document parsers
pub trait DocumentParser: Send + Sync {
    /// Parse a document from a file path
    fn parse(&self, path: &Path) -> Result<ParsedDocument>;

    /// Get supported file types
    fn supported_types(&self) -> &[FileType];

    /// Check if this parser can handle a file type
    fn can_parse(&self, file_type: FileType) -> bool {
        self.supported_types().contains(&file_type)
    }
}

/// Read a file as UTF-8, rejecting anything else
pub(crate) fn read_utf8(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| ParserError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    String::from_utf8(bytes).map_err(|e| ParserError::EncodingError {
        path: path.display().to_string(),
        message: e.utf8_error().to_string(),
    })
}

// ============================================================================
// Parser Registry
// ============================================================================

/// Registry of available parsers
pub struct ParserRegistry {
    parsers: Vec<Box<dyn DocumentParser>>,
}

impl ParserRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Registry with the HTML and plain text parsers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(HtmlParser::new());
        registry.register(PlainTextParser);
        registry
    }

    /// Register a parser
    pub fn register<P: DocumentParser + 'static>(&mut self, parser: P) {
        self.parsers.push(Box::new(parser));
    }

    /// Find a parser for a file type
    pub fn find_parser(&self, file_type: FileType) -> Option<&dyn DocumentParser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(file_type))
            .map(|p| p.as_ref())
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let file_type = FileType::from_path(path);

        if file_type == FileType::Unknown {
            return Err(ParserError::UnsupportedFormat(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("none")
                    .to_string(),
            ));
        }

        let parser = self
            .find_parser(file_type)
            .ok_or_else(|| ParserError::UnsupportedFormat(file_type.to_string()))?;

        parser.parse(path)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Plain text parser
pub struct PlainTextParser;

impl DocumentParser for PlainTextParser {
    fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let content = read_utf8(path)?;
        Ok(ParsedDocument::new(path, FileType::PlainText).with_content(content))
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::PlainText]
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// List regular files in `dir` whose names end with one of `extensions`
///
/// The scan is not recursive. Paths are sorted by file name so that runs
/// over the same directory process documents in the same order.
pub fn discover(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ParserError::IoError {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ParserError::IoError {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_lowercase();
        if extensions
            .iter()
            .any(|ext| name.ends_with(&ext.to_lowercase()))
        {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!("Discovered {} documents in {}", paths.len(), dir.display());
    Ok(paths)
}

// ============================================================================
// Tests
// ============================================================================
