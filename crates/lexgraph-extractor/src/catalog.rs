//! Pattern catalog
//!
//! Three ordered groups of Hebrew keyword patterns: citations to other
//! legal instruments, actions performed in the text, and entities
//! (roles, offices, organizations). Every pattern is compiled with
//! dot-matches-newline so that a citation wrapped over several lines is
//! still found. Groups keep declaration order, which fixes the order of
//! matches reported by the extractor.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::{MentionExtractor, RawMatch};
use lexgraph_core::{LexError, MentionKind, Result};

// ============================================================================
// Built-in Definitions
// ============================================================================

/// Hebrew year prefix, one or two letters, then a Gregorian year
const CITATION_TAIL: &str = r#".*?[ה]?תש[א-ת"]{1,2}.*?[0-9]{4}"#;

/// Citation keywords: ordinance, regulation, and instruction forms plus law
const CITATION_KEYWORDS: &[(&str, &str)] = &[
    ("commands", "פקודה"),
    ("commands_of", "פקודת"),
    ("commands_plural", "פקודות"),
    ("laws", "חוק"),
    ("regulations", "תקנה"),
    ("regulations_of", "תקנת"),
    ("regulations_plural", "תקנות"),
    ("instructions", "הוראה"),
    ("instructions_of", "הוראת"),
    ("instructions_plural", "הוראות"),
];

/// End of word: whitespace, period, semicolon or comma
const WORD_TERMINATOR: &str = r"[ .;,\s]";

const ACTION_KEYWORDS: &[(&str, &str)] = &[
    ("instructed", "הורה"),
    ("instructed_alt", "הנחה"),
    ("oversaw", "פיקח"),
    ("set", "קבע"),
    ("approved", "אישר"),
    ("allowed", "התיר"),
    ("decided", "הכריע"),
];

/// Construct-state forms require a following word so the verb of the same
/// root is not taken for the noun.
const ENTITY_PATTERNS: &[(&str, &str)] = &[
    ("supervisor", r"מפקח ה.*?[ .;,\s]"),
    ("supervisor_of", r"מפקח על .*?[ .;,\s]"),
    ("superior_of", r"ממונה על .*?[ .;,\s]"),
    ("certified_inspector", r"ה?בודק ה?מוסמך"),
    ("qualified_builder", r"ה?בונה ה?מקצועי"),
    ("construction_executor", r"מבצע ה?בניה"),
    ("contractor", r"קבלן"),
    ("inspection_institute", r"מוסד ה?ביקורת ה?מוסמך"),
    ("planner", r"מתכנן .*?[ .;,\s]"),
    ("signaling_person", r"ה?מוסמך למתן איתות"),
    ("employer", r"ה?מעסיק"),
];

/// Built-in citation definitions, in declaration order
pub fn citation_definitions() -> Vec<(String, String)> {
    CITATION_KEYWORDS
        .iter()
        .map(|(label, keyword)| (label.to_string(), format!("{keyword}{CITATION_TAIL}")))
        .collect()
}

/// Built-in action definitions, in declaration order
pub fn action_definitions() -> Vec<(String, String)> {
    ACTION_KEYWORDS
        .iter()
        .map(|(label, keyword)| (label.to_string(), format!("{keyword}{WORD_TERMINATOR}")))
        .collect()
}

/// Built-in entity definitions, in declaration order
pub fn entity_definitions() -> Vec<(String, String)> {
    ENTITY_PATTERNS
        .iter()
        .map(|(label, pattern)| (label.to_string(), pattern.to_string()))
        .collect()
}

// ============================================================================
// Pattern Group
// ============================================================================

/// Ordered list of labelled, compiled patterns for one mention kind
#[derive(Debug, Clone)]
pub struct PatternGroup {
    kind: MentionKind,
    patterns: Vec<(String, Regex)>,
}

impl PatternGroup {
    /// Compile a group, failing on the first malformed pattern or repeated label
    pub fn compile<I, L, P>(kind: MentionKind, definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut patterns = Vec::new();

        for (label, pattern) in definitions {
            let label = label.into();
            if !seen.insert(label.clone()) {
                return Err(LexError::DuplicateLabel { group: kind, label });
            }

            let regex = RegexBuilder::new(pattern.as_ref())
                .dot_matches_new_line(true)
                .build()
                .map_err(|e| LexError::InvalidPattern {
                    label: label.clone(),
                    message: e.to_string(),
                })?;

            patterns.push((label, regex));
        }

        Ok(Self { kind, patterns })
    }

    /// Mention kind this group extracts
    pub fn kind(&self) -> MentionKind {
        self.kind
    }

    /// Labels in declaration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(label, _)| label.as_str())
    }

    /// Label and pattern source, in declaration order
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns
            .iter()
            .map(|(label, regex)| (label.as_str(), regex.as_str()))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl MentionExtractor for PatternGroup {
    /// All matches of every pattern, in declaration order, each pattern's
    /// matches in text order
    fn extract<'a>(&'a self, text: &'a str) -> Vec<RawMatch<'a>> {
        let mut matches = Vec::new();

        for (label, regex) in &self.patterns {
            for mat in regex.find_iter(text) {
                matches.push(RawMatch {
                    label: label.as_str(),
                    text: mat.as_str(),
                    start: mat.start(),
                    end: mat.end(),
                });
            }
        }

        matches
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// The three pattern groups used by the per-document pass
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    citations: PatternGroup,
    actions: PatternGroup,
    entities: PatternGroup,
}

impl PatternCatalog {
    /// Compile the built-in Hebrew catalog
    pub fn builtin() -> Result<Self> {
        Self::from_definitions(
            citation_definitions(),
            action_definitions(),
            entity_definitions(),
        )
    }

    /// Compile a catalog from caller-supplied definitions
    pub fn from_definitions<C, A, E, L, P>(citations: C, actions: A, entities: E) -> Result<Self>
    where
        C: IntoIterator<Item = (L, P)>,
        A: IntoIterator<Item = (L, P)>,
        E: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: AsRef<str>,
    {
        let catalog = Self {
            citations: PatternGroup::compile(MentionKind::Citation, citations)?,
            actions: PatternGroup::compile(MentionKind::Action, actions)?,
            entities: PatternGroup::compile(MentionKind::Entity, entities)?,
        };

        tracing::debug!(
            citations = catalog.citations.len(),
            actions = catalog.actions.len(),
            entities = catalog.entities.len(),
            "Pattern catalog compiled"
        );

        Ok(catalog)
    }

    /// Group for a mention kind
    pub fn group(&self, kind: MentionKind) -> &PatternGroup {
        match kind {
            MentionKind::Citation => &self.citations,
            MentionKind::Action => &self.actions,
            MentionKind::Entity => &self.entities,
        }
    }

    pub fn citations(&self) -> &PatternGroup {
        &self.citations
    }

    pub fn actions(&self) -> &PatternGroup {
        &self.actions
    }

    pub fn entities(&self) -> &PatternGroup {
        &self.entities
    }
}

// ============================================================================
// Tests
// ============================================================================
