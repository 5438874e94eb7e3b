/*!
 * Glossary entry model.
 *
 * Entries are stored on disk as flat records where every `target_<code>`
 * field carries the replacement for one language. In memory those fields are
 * gathered into a single `targets` map keyed by language code.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::language_utils::TARGET_FIELD_PREFIX;

/// Prefix of derived entry identifiers
const ID_PREFIX: &str = "dg_";

/// Maximum length of the slug part of a derived identifier
const MAX_SLUG_LEN: usize = 80;

static NON_SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid slug regex"));

/// A single terminology entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntryRecord", into = "EntryRecord")]
pub struct GlossaryEntry {
    /// Stable identifier, derived from the term when the record has none
    pub id: String,

    /// Canonical source-language surface form
    pub term: String,

    /// Alternate surface forms, matched exactly like `term`
    pub variants: Vec<String>,

    /// Replacement per target language code
    pub targets: BTreeMap<String, String>,

    /// Higher priority wins when matches overlap
    pub priority: i64,

    /// Category labels (informational only)
    pub tags: Vec<String>,

    /// Free-text notes for glossary maintainers
    pub notes: Option<String>,
}

impl GlossaryEntry {
    /// Create an entry for a term with no targets and priority 0.
    pub fn new(term: &str) -> Self {
        Self {
            id: derive_id(term),
            term: term.to_string(),
            variants: Vec::new(),
            targets: BTreeMap::new(),
            priority: 0,
            tags: Vec::new(),
            notes: None,
        }
    }

    /// Set the replacement for a target language code.
    pub fn with_target(mut self, code: &str, target: &str) -> Self {
        self.targets.insert(code.to_string(), target.to_string());
        self
    }

    /// Append alternate surface forms.
    pub fn with_variants(mut self, variants: &[&str]) -> Self {
        self.variants.extend(variants.iter().map(|v| v.to_string()));
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Append category tags.
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    /// Attach maintainer notes.
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// The term followed by every variant, in declaration order.
    pub fn surface_forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.term.as_str()).chain(self.variants.iter().map(String::as_str))
    }

    /// Replacement for a language code, if one is populated.
    pub fn target_for(&self, code: &str) -> Option<&str> {
        self.targets
            .get(code)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Length of the term in characters.
    pub fn term_len(&self) -> usize {
        self.term.chars().count()
    }

    /// Whether the term is a multi-word phrase.
    pub fn is_phrase(&self) -> bool {
        self.term.contains(' ')
    }
}

/// Derive a stable identifier from a term ("Rules of Engagement" -> "dg_rules_of_engagement").
pub fn derive_id(term: &str) -> String {
    format!("{}{}", ID_PREFIX, slugify(term))
}

fn slugify(term: &str) -> String {
    let lower = term.trim().to_lowercase();
    let slug = NON_SLUG_REGEX.replace_all(&lower, "_");
    let slug = slug.trim_matches('_');

    if slug.is_empty() {
        return "term".to_string();
    }

    // The slug is pure ASCII so byte truncation is safe
    slug[..slug.len().min(MAX_SLUG_LEN)].to_string()
}

/// On-disk shape of an entry.
#[derive(Debug, Serialize, Deserialize)]
struct EntryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(default)]
    term: String,

    #[serde(default)]
    variants: Vec<String>,

    #[serde(default)]
    priority: i64,

    #[serde(default)]
    tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,

    /// `target_<code>` fields and any other unknown keys
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl From<EntryRecord> for GlossaryEntry {
    fn from(record: EntryRecord) -> Self {
        let targets = record
            .fields
            .into_iter()
            .filter_map(|(key, value)| {
                let code = key.strip_prefix(TARGET_FIELD_PREFIX)?.to_string();
                match value {
                    Value::String(target) if !target.is_empty() && !code.is_empty() => {
                        Some((code, target))
                    }
                    _ => None,
                }
            })
            .collect();

        let id = match record.id {
            Some(id) if !id.is_empty() => id,
            _ => derive_id(&record.term),
        };

        Self {
            id,
            term: record.term,
            variants: record.variants,
            targets,
            priority: record.priority,
            tags: record.tags,
            notes: record.notes,
        }
    }
}

impl From<GlossaryEntry> for EntryRecord {
    fn from(entry: GlossaryEntry) -> Self {
        let fields = entry
            .targets
            .into_iter()
            .map(|(code, target)| (format!("{}{}", TARGET_FIELD_PREFIX, code), Value::String(target)))
            .collect();

        Self {
            id: Some(entry.id),
            term: entry.term,
            variants: entry.variants,
            priority: entry.priority,
            tags: entry.tags,
            notes: entry.notes,
            fields,
        }
    }
}
