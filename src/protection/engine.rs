/*!
 * Term protection.
 *
 * `TermProtector::protect` swaps every glossary term found in a text for a
 * placeholder before the text goes to a translation model, and
 * `TermProtector::restore` swaps the placeholders for target-language terms
 * afterwards. Matches are taken in store order (priority, then length) and a
 * match that overlaps an already accepted one is dropped whole.
 */

use log::{debug, info, warn};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use super::placeholder::{PlaceholderMap, format_placeholder};
use super::restore::{Restoration, restore_terms};
use crate::glossary::{GlossaryEntry, GlossaryStore};
use crate::language_utils::resolve_target_language;

/// One accepted glossary match.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch {
    /// Byte range of the match in the input text
    pub span: Range<usize>,
    /// Matched text as it appeared in the input
    pub matched: String,
    /// Id of the entry that matched
    pub entry_id: String,
    /// Target-language replacement
    pub target: String,
    /// Placeholder that replaced the match
    pub placeholder: String,
}

/// Result of a protection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Protection {
    /// Text with every accepted match replaced by its placeholder
    pub text: String,
    /// Placeholder to target-term mapping, needed by `restore`
    pub placeholders: PlaceholderMap,
    /// Accepted matches, by descending start offset
    pub matches: Vec<TermMatch>,
}

impl Protection {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// Number of protected spans.
    pub fn protected_count(&self) -> usize {
        self.matches.len()
    }

    /// Matched source text to placeholder. When the same text matched more
    /// than once, the leftmost occurrence's placeholder is kept.
    pub fn source_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for m in &self.matches {
            map.insert(m.matched.clone(), m.placeholder.clone());
        }
        map
    }

    /// Split into the protected text and the placeholder map.
    pub fn into_parts(self) -> (String, PlaceholderMap) {
        (self.text, self.placeholders)
    }
}

/// Word-bounded, case-insensitive matchers for one entry's surface forms.
#[derive(Debug, Clone)]
struct EntryMatchers {
    forms: Vec<Regex>,
}

impl EntryMatchers {
    fn compile(entry: &GlossaryEntry) -> Self {
        if entry.term.is_empty() {
            return Self { forms: Vec::new() };
        }

        let forms = entry
            .surface_forms()
            .filter(|form| !form.is_empty())
            .filter_map(|form| {
                let pattern = format!(r"\b{}\b", regex::escape(form));
                match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        warn!("Skipping glossary form '{}' of {}: {}", form, entry.id, e);
                        None
                    }
                }
            })
            .collect();

        Self { forms }
    }
}

/// Glossary term protector.
///
/// Holds only immutable state, so one instance can be shared between threads;
/// every call returns its own placeholder map.
#[derive(Debug, Clone)]
pub struct TermProtector {
    store: Arc<GlossaryStore>,
    matchers: Vec<EntryMatchers>,
}

impl TermProtector {
    /// Create a protector over a store, compiling its matchers once.
    pub fn new(store: Arc<GlossaryStore>) -> Self {
        let matchers = store.entries().iter().map(EntryMatchers::compile).collect();
        Self { store, matchers }
    }

    pub fn store(&self) -> &GlossaryStore {
        &self.store
    }

    /// Replace glossary terms in `text` with placeholders.
    ///
    /// `target_language` picks which replacement each placeholder stands for;
    /// entries without a replacement for that language are not matched.
    pub fn protect(&self, text: &str, target_language: &str) -> Protection {
        if text.is_empty() || self.store.is_empty() {
            return Protection::unchanged(text);
        }

        let language = resolve_target_language(target_language);
        let mut accepted: Vec<TermMatch> = Vec::new();
        let mut counter = 1;

        for (entry, matchers) in self.store.entries().iter().zip(&self.matchers) {
            let Some(target) = entry.target_for(&language.code) else {
                continue;
            };

            for regex in &matchers.forms {
                for found in regex.find_iter(text) {
                    let span = found.range();
                    if span.is_empty() || accepted.iter().any(|m| overlaps(&m.span, &span)) {
                        continue;
                    }

                    accepted.push(TermMatch {
                        span,
                        matched: found.as_str().to_string(),
                        entry_id: entry.id.clone(),
                        target: target.to_string(),
                        placeholder: format_placeholder(counter),
                    });
                    counter += 1;
                }
            }
        }

        // Right to left, so earlier offsets stay valid
        accepted.sort_by(|a, b| b.span.start.cmp(&a.span.start));

        let mut protected = text.to_string();
        let mut placeholders = PlaceholderMap::new();
        for m in &accepted {
            protected.replace_range(m.span.clone(), &m.placeholder);
            placeholders.insert(m.placeholder.clone(), m.target.clone());
            debug!("'{}' -> {} -> '{}'", m.matched, m.placeholder, m.target);
        }

        if !accepted.is_empty() {
            info!("Protected {} glossary terms ({})", accepted.len(), language.field_name());
        }

        Protection {
            text: protected,
            placeholders,
            matches: accepted,
        }
    }

    /// Put target-language terms back in place of placeholders.
    pub fn restore(&self, text: &str, placeholders: &PlaceholderMap) -> Restoration {
        restore_terms(text, placeholders)
    }
}

/// Whether two half-open ranges share at least one position.
fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
