/*!
 * Placeholder tokens.
 *
 * A placeholder looks like `XGLOSSARYX0001X`: a tag word wrapped in `X`
 * sentinels, a zero-padded counter and a closing sentinel. Tokens are plain
 * ASCII alphanumerics so translation models tend to copy them through.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag word embedded in every placeholder
pub const TAG_WORD: &str = "GLOSSARY";

/// Sentinel character around the tag word and the counter
pub const SENTINEL: char = 'X';

/// Minimum number of digits in the counter
pub const ID_WIDTH: usize = 4;

static ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4,}").expect("Invalid placeholder id regex"));

/// Build the placeholder for a counter value (1 -> "XGLOSSARYX0001X").
pub fn format_placeholder(counter: usize) -> String {
    format!(
        "{s}{tag}{s}{counter:0width$}{s}",
        s = SENTINEL,
        tag = TAG_WORD,
        counter = counter,
        width = ID_WIDTH
    )
}

/// Extract the numeric id embedded in a placeholder ("XGLOSSARYX0042X" -> "0042").
pub fn placeholder_id(placeholder: &str) -> Option<&str> {
    ID_REGEX.find(placeholder).map(|m| m.as_str())
}

/// Mapping from placeholder token to the target-language term it stands for.
///
/// Produced by one `protect` call and handed back unchanged to `restore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderMap(BTreeMap<String, String>);

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, placeholder: String, target: String) {
        self.0.insert(placeholder, target);
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.0.get(placeholder).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Placeholders ordered longest first, so a short id never matches inside
    /// a longer one during restoration.
    pub fn restoration_order(&self) -> Vec<(&str, &str)> {
        let mut ordered: Vec<(&str, &str)> = self.iter().collect();
        ordered.sort_by_key(|(placeholder, _)| std::cmp::Reverse(placeholder.len()));
        ordered
    }
}

impl FromIterator<(String, String)> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, String>> for PlaceholderMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}
