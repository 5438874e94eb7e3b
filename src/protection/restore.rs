/*!
 * Placeholder restoration.
 *
 * Translation models do not promise to copy opaque tokens verbatim: they
 * change case, split the token with spaces or drop sentinel characters. Each
 * placeholder is therefore searched with a cascade of increasingly permissive
 * patterns and the first one that hits is used for every occurrence.
 *
 * The later patterns can reach text that merely resembles a placeholder. That
 * is accepted; unresolved placeholders stay in the output verbatim.
 */

use log::{debug, info, warn};
use regex::{NoExpand, Regex, RegexBuilder};

use super::placeholder::{PlaceholderMap, SENTINEL, TAG_WORD, placeholder_id};

/// Restoration strategies, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreStrategy {
    /// `XGLOSSARYX0001X` as written
    Exact,
    /// `xglossaryx0001x`
    CaseInsensitive,
    /// `GLOSSARYX0001`, `XGLOSSARY0001X`, ...
    OptionalSentinels,
    /// `X GLOSSARY X 0001 X`
    SpacedOut,
    /// `_glossary_0001`, `glossary 0001` and other separator noise
    Permissive,
}

impl RestoreStrategy {
    pub const CASCADE: [RestoreStrategy; 5] = [
        Self::Exact,
        Self::CaseInsensitive,
        Self::OptionalSentinels,
        Self::SpacedOut,
        Self::Permissive,
    ];

    /// Pattern locating `placeholder` (with numeric `id`) under this strategy.
    fn pattern(self, placeholder: &str, id: &str) -> String {
        let x = SENTINEL;
        match self {
            Self::Exact | Self::CaseInsensitive => regex::escape(placeholder),
            Self::OptionalSentinels => format!("{x}?{TAG_WORD}{x}?{id}{x}?"),
            Self::SpacedOut => format!(r"{x}?\s*{TAG_WORD}\s*{x}?\s*{id}\s*{x}?"),
            Self::Permissive => format!(r"[_{x}\s]*{TAG_WORD}[_{x}\s]*{id}[_{x}\s]*"),
        }
    }

    fn compile(self, placeholder: &str, id: &str) -> Option<Regex> {
        RegexBuilder::new(&self.pattern(placeholder, id))
            .case_insensitive(self != Self::Exact)
            .build()
            .map_err(|e| warn!("Invalid restoration pattern for {}: {}", placeholder, e))
            .ok()
    }
}

/// What happened to one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderOutcome {
    /// Found and replaced by the given strategy
    Restored(RestoreStrategy),
    /// No strategy found it; left in the text as is
    Unresolved,
    /// The placeholder carries no numeric id and was skipped
    Malformed,
}

/// Result of a restoration pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Restoration {
    /// Text with placeholders replaced
    pub text: String,
    /// Per-placeholder outcome, in processing order
    pub outcomes: Vec<(String, PlaceholderOutcome)>,
}

impl Restoration {
    /// Number of placeholders that were restored.
    pub fn restored_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, PlaceholderOutcome::Restored(_)))
            .count()
    }

    /// Placeholders that could not be found in the text.
    pub fn unresolved(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == PlaceholderOutcome::Unresolved)
            .map(|(p, _)| p.as_str())
            .collect()
    }

    /// Whether every placeholder was restored.
    pub fn is_complete(&self) -> bool {
        self.restored_count() == self.outcomes.len()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Replace every placeholder of `placeholders` found in `text` with its
/// target term.
pub fn restore_terms(text: &str, placeholders: &PlaceholderMap) -> Restoration {
    if text.is_empty() || placeholders.is_empty() {
        return Restoration {
            text: text.to_string(),
            outcomes: Vec::new(),
        };
    }

    let mut restored = text.to_string();
    let mut outcomes = Vec::with_capacity(placeholders.len());

    for (placeholder, target) in placeholders.restoration_order() {
        let outcome = restore_one(&mut restored, placeholder, target);
        match outcome {
            PlaceholderOutcome::Restored(strategy) => {
                debug!("{} -> '{}' ({:?})", placeholder, target, strategy);
            }
            PlaceholderOutcome::Unresolved => {
                warn!("Could not restore placeholder: {}", placeholder);
            }
            PlaceholderOutcome::Malformed => {
                warn!("Invalid placeholder format: {}", placeholder);
            }
        }
        outcomes.push((placeholder.to_string(), outcome));
    }

    let restoration = Restoration {
        text: restored,
        outcomes,
    };

    let count = restoration.restored_count();
    if count > 0 {
        info!("Restored {} of {} glossary terms", count, placeholders.len());
    }

    restoration
}

fn restore_one(text: &mut String, placeholder: &str, target: &str) -> PlaceholderOutcome {
    let Some(id) = placeholder_id(placeholder) else {
        return PlaceholderOutcome::Malformed;
    };

    for strategy in RestoreStrategy::CASCADE {
        if strategy == RestoreStrategy::Exact {
            if text.contains(placeholder) {
                *text = text.replace(placeholder, target);
                return PlaceholderOutcome::Restored(strategy);
            }
            continue;
        }

        let Some(regex) = strategy.compile(placeholder, id) else {
            continue;
        };
        if regex.is_match(text) {
            *text = regex.replace_all(text, NoExpand(target)).into_owned();
            return PlaceholderOutcome::Restored(strategy);
        }
    }

    PlaceholderOutcome::Unresolved
}
