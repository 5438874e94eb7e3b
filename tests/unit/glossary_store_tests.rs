/*!
 * Tests for glossary loading, ranking and statistics
 */

use termguard::errors::GlossaryError;
use termguard::glossary::{GlossaryStore, LoadStatus, curated_entries};

use crate::common;

#[test]
fn test_load_missingFile_shouldDegradeToEmptyStore() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("absent.json");

    let store = GlossaryStore::load(&path);

    assert!(store.is_empty());
    assert_eq!(store.status(), &LoadStatus::Missing);
    assert_eq!(store.source(), Some(path.as_path()));
}

#[test]
fn test_load_malformedFile_shouldDegradeAndRecordError() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "broken.json", "{ \"entries\": [ {\"term\": ").unwrap();

    let store = GlossaryStore::load(&path);

    assert!(store.is_empty());
    assert!(matches!(store.status(), LoadStatus::Failed(GlossaryError::Configuration(_))));
}

#[test]
fn test_fromPath_missingFile_shouldReportNotFound() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("absent.json");

    let result = GlossaryStore::from_path(&path);

    assert_eq!(result.unwrap_err(), GlossaryError::NotFound(path));
}

#[test]
fn test_load_validFile_shouldRankEntries() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "glossary.json", common::sample_glossary_json()).unwrap();

    let store = GlossaryStore::load(&path);

    assert_eq!(store.status(), &LoadStatus::Loaded);
    let terms: Vec<&str> = store.entries().iter().map(|e| e.term.as_str()).collect();
    assert_eq!(terms, vec!["rules of engagement", "nut", "arm", "roger"]);
    assert_eq!(store.get("dg_nut").and_then(|e| e.target_for("fr")), Some("écrou"));
    assert_eq!(store.metadata().and_then(|m| m.count), Some(4));
}

#[test]
fn test_load_sameInput_shouldProduceSameOrder() {
    let first = GlossaryStore::from_entries(curated_entries());
    let second = GlossaryStore::from_entries(curated_entries());

    let ids = |store: &GlossaryStore| store.entries().iter().map(|e| e.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn test_ranking_shouldBeNonIncreasingInPriorityThenLength() {
    let store = GlossaryStore::from_entries(curated_entries());

    for pair in store.entries().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.priority > b.priority || (a.priority == b.priority && a.term_len() >= b.term_len()),
            "'{}' ranked before '{}'",
            a.term,
            b.term
        );
    }
}

#[test]
fn test_shippedResource_shouldMatchCuratedGlossary() {
    let store = GlossaryStore::from_path(common::shipped_glossary_path()).unwrap();
    let curated = GlossaryStore::from_entries(curated_entries());

    assert_eq!(store.len(), curated.len());
    assert_eq!(store.entries(), curated.entries());
}

#[test]
fn test_stats_curatedGlossary_shouldSummarize() {
    let stats = GlossaryStore::from_entries(curated_entries()).stats();

    assert_eq!(stats.total_entries, 123);
    assert_eq!(stats.priority_distribution.values().sum::<usize>(), 123);
    assert_eq!(stats.top_tags.len(), 10);
    assert_eq!(stats.top_tags[0], ("weapons".to_string(), 26));
    assert_eq!(stats.top_tags[9], ("aviation".to_string(), 5));
    assert_eq!(stats.multi_word_phrases, 58);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["priority_distribution"]["10"], 6);
}
