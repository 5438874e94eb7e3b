/*!
 * Glossary term protection around machine translation.
 *
 * - `placeholder`: placeholder token format and the placeholder map
 * - `engine`: matching glossary terms and substituting placeholders
 * - `restore`: finding (possibly mangled) placeholders after translation
 */

pub mod engine;
pub mod placeholder;
pub mod restore;

// Re-export main types
pub use engine::{Protection, TermMatch, TermProtector};
pub use placeholder::{PlaceholderMap, format_placeholder, placeholder_id};
pub use restore::{PlaceholderOutcome, Restoration, RestoreStrategy, restore_terms};
