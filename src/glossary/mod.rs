/*!
 * Terminology glossary.
 *
 * - `entry`: glossary entry model and on-disk record format
 * - `store`: loading, ranking and statistics
 * - `curated`: the built-in curated defense glossary
 */

pub mod curated;
pub mod entry;
pub mod store;

// Re-export main types
pub use curated::{curated_entries, curated_store, write_curated_glossary};
pub use entry::GlossaryEntry;
pub use store::{GlossaryDocument, GlossaryMetadata, GlossaryStats, GlossaryStore, LoadStatus};
