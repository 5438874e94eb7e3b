/*!
 * Glossary store.
 *
 * Loads a glossary resource once, ranks its entries in matching order and
 * serves them read-only. A missing or malformed resource degrades to an empty
 * store so that term protection becomes a no-op instead of failing requests.
 */

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::entry::GlossaryEntry;
use crate::errors::GlossaryError;

/// Number of tags reported in `GlossaryStats::top_tags`
const TOP_TAG_COUNT: usize = 10;

/// Descriptive block at the top of a glossary resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlossaryMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// A glossary resource as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlossaryDocument {
    #[serde(rename = "_metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GlossaryMetadata>,

    /// Entries in declaration order
    #[serde(default)]
    pub entries: Vec<GlossaryEntry>,
}

impl GlossaryDocument {
    /// Parse a resource, rejecting anything but a top-level object.
    pub fn from_json_str(json: &str) -> Result<Self, GlossaryError> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(GlossaryError::Configuration(
                "top-level value must be an object with an `entries` array".to_string(),
            ));
        }

        Ok(serde_json::from_value(value)?)
    }
}

/// Outcome of constructing a store.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    /// Entries were loaded (possibly zero)
    Loaded,
    /// The resource does not exist
    Missing,
    /// The resource could not be read or parsed
    Failed(GlossaryError),
}

/// Aggregate counts over the loaded entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlossaryStats {
    pub total_entries: usize,
    pub multi_word_phrases: usize,
    pub tag_counts: BTreeMap<String, usize>,
    pub priority_distribution: BTreeMap<i64, usize>,
    pub top_tags: Vec<(String, usize)>,
}

/// Read-only, ranked collection of glossary entries.
#[derive(Debug, Clone)]
pub struct GlossaryStore {
    entries: Vec<GlossaryEntry>,
    metadata: Option<GlossaryMetadata>,
    source: Option<PathBuf>,
    status: LoadStatus,
}

impl Default for GlossaryStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl GlossaryStore {
    /// A store with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            metadata: None,
            source: None,
            status: LoadStatus::Loaded,
        }
    }

    /// Build a store from in-memory entries.
    pub fn from_entries(entries: Vec<GlossaryEntry>) -> Self {
        Self::from_document(GlossaryDocument {
            metadata: None,
            entries,
        })
    }

    /// Build a store from a parsed resource.
    pub fn from_document(document: GlossaryDocument) -> Self {
        let mut entries = document.entries;
        rank_entries(&mut entries);

        Self {
            entries,
            metadata: document.metadata,
            source: None,
            status: LoadStatus::Loaded,
        }
    }

    /// Build a store from a JSON resource.
    pub fn from_json_str(json: &str) -> Result<Self, GlossaryError> {
        GlossaryDocument::from_json_str(json).map(Self::from_document)
    }

    /// Read a resource from disk, reporting every failure.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GlossaryError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GlossaryError::NotFound(path.to_path_buf()),
            _ => GlossaryError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;

        let mut store = Self::from_json_str(&json)?;
        store.source = Some(path.to_path_buf());
        Ok(store)
    }

    /// Read a resource from disk, degrading to an empty store on failure.
    ///
    /// A missing file is logged as a warning, anything else as an error. The
    /// outcome is kept in `status()`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        match Self::from_path(path) {
            Ok(store) => {
                info!("Loaded {} glossary entries from {}", store.len(), path.display());
                store
            }
            Err(GlossaryError::NotFound(missing)) => {
                warn!("Glossary file not found: {}", missing.display());
                Self::degraded(path, LoadStatus::Missing)
            }
            Err(e) => {
                error!("Error loading glossary: {}", e);
                Self::degraded(path, LoadStatus::Failed(e))
            }
        }
    }

    fn degraded(path: &Path, status: LoadStatus) -> Self {
        Self {
            source: Some(path.to_path_buf()),
            status,
            ..Self::empty()
        }
    }

    /// Entries in matching order.
    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&GlossaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn metadata(&self) -> Option<&GlossaryMetadata> {
        self.metadata.as_ref()
    }

    /// Path the store was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Compute aggregate statistics.
    pub fn stats(&self) -> GlossaryStats {
        let mut stats = GlossaryStats {
            total_entries: self.entries.len(),
            ..Default::default()
        };

        for entry in &self.entries {
            for tag in &entry.tags {
                *stats.tag_counts.entry(tag.clone()).or_insert(0) += 1;
            }
            *stats.priority_distribution.entry(entry.priority).or_insert(0) += 1;
            if entry.is_phrase() {
                stats.multi_word_phrases += 1;
            }
        }

        let mut top_tags: Vec<(String, usize)> = stats
            .tag_counts
            .iter()
            .map(|(tag, count)| (tag.clone(), *count))
            .collect();
        // tag_counts is name-ordered, so the stable sort breaks ties by name
        top_tags.sort_by_key(|(_, count)| Reverse(*count));
        top_tags.truncate(TOP_TAG_COUNT);
        stats.top_tags = top_tags;

        stats
    }
}

/// Sort entries by priority, then term length (both descending), keeping
/// declaration order for ties.
fn rank_entries(entries: &mut [GlossaryEntry]) {
    entries.sort_by_key(|e| (Reverse(e.priority), Reverse(e.term_len())));
}
