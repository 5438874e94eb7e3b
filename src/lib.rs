/*!
 * # termguard - glossary term protection for machine translation
 *
 * General-purpose translation models routinely mistranslate domain terms
 * ("nut" the fastener becomes a food, "battery" the artillery unit becomes a
 * power cell). This library shields such terms: before translation every
 * glossary term is swapped for an opaque placeholder, and after translation
 * each placeholder is swapped for the term's approved target-language
 * rendering.
 *
 * ## Features
 *
 * - JSON glossary resources with per-language targets, variants, priorities
 *   and tags
 * - Phrase-first, priority-first non-overlapping matching
 * - Placeholder restoration that survives case changes, dropped sentinels and
 *   inserted whitespace
 * - A built-in curated defense glossary with Hindi targets
 *
 * ## Architecture
 *
 * - `glossary`: glossary entries, the ranked store and the curated glossary
 * - `protection`: placeholder substitution and restoration
 * - `pipeline`: protection wrapped around an external translator
 * - `language_utils`: target-language resolution
 * - `app_config`: configuration management
 * - `errors`: custom error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod glossary;
pub mod language_utils;
pub mod pipeline;
pub mod protection;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, GlossaryError};
pub use glossary::{GlossaryEntry, GlossaryStore};
pub use pipeline::{GlossaryPipeline, IdentityTranslator, Translator};
pub use protection::{PlaceholderMap, Protection, Restoration, TermProtector};
