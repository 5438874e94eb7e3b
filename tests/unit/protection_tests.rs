/*!
 * Tests for term protection and placeholder restoration
 */

use std::sync::Arc;
use std::thread;

use termguard::glossary::{GlossaryEntry, GlossaryStore};
use termguard::protection::{PlaceholderOutcome, RestoreStrategy, TermProtector};

use crate::common;

const SENTENCES: &[&str] = &[
    "Check the nut before you arm the device",
    "Request CASEVAC at the LZ, over",
    "Follow the rules of engagement, roger that",
    "Stand by for the fire mission",
    "danger close, the IED is near the rally point",
    "Hold fire! Check fire!",
    "The Lieutenant Colonel and the Major General reached the breach point",
];

#[test]
fn test_protect_emptyGlossary_shouldReturnTextUnchanged() {
    let protector = TermProtector::new(Arc::new(GlossaryStore::empty()));

    for text in SENTENCES {
        let protection = protector.protect(text, "hindi");
        assert_eq!(protection.text, *text);
        assert!(protection.placeholders.is_empty());
    }
}

#[test]
fn test_protect_noGlossaryTerms_shouldReturnTextUnchanged() {
    let protector = common::curated_protector();
    let text = "The weather is quite nice today.";

    let protection = protector.protect(text, "hindi");

    assert_eq!(protection.text, text);
    assert!(protection.placeholders.is_empty());
    assert_eq!(protection.protected_count(), 0);
}

#[test]
fn test_protect_acceptedSpans_shouldNeverOverlap() {
    let protector = common::curated_protector();

    for text in SENTENCES {
        let protection = protector.protect(text, "hindi");
        for (i, a) in protection.matches.iter().enumerate() {
            for b in &protection.matches[i + 1..] {
                assert!(
                    a.span.end <= b.span.start || b.span.end <= a.span.start,
                    "{:?} overlaps {:?} in '{}'",
                    a.span,
                    b.span,
                    text
                );
            }
        }
        assert_eq!(protection.placeholders.len(), protection.matches.len());
    }
}

#[test]
fn test_protect_replacedText_shouldReconstructSource() {
    let protector = common::curated_protector();

    for text in SENTENCES {
        let protection = protector.protect(text, "hindi");
        assert!(protection.protected_count() > 0, "nothing protected in '{}'", text);

        let mut rebuilt = protection.text.clone();
        for m in &protection.matches {
            assert_eq!(&text[m.span.clone()], m.matched);
            rebuilt = rebuilt.replace(&m.placeholder, &m.matched);
        }
        assert_eq!(rebuilt, *text);
    }
}

#[test]
fn test_protect_entryWithoutTerm_shouldBeIgnored() {
    let protector = common::protector_for(vec![
        GlossaryEntry::new("").with_variants(&["nut"]).with_target("hi", "नट").with_priority(10),
        GlossaryEntry::new("bolt").with_target("hi", "बोल्ट"),
    ]);

    let protection = protector.protect("Tighten the nut and bolt", "hindi");

    assert_eq!(protection.text, "Tighten the nut and XGLOSSARYX0001X");
    assert_eq!(protection.placeholders.len(), 1);
    assert_eq!(protection.matches[0].entry_id, "dg_bolt");
}

#[test]
fn test_protect_higherPriority_shouldWinOverlap() {
    let protector = common::protector_for(vec![
        GlossaryEntry::new("nut butter").with_target("hi", "मूंगफली मक्खन").with_priority(1),
        GlossaryEntry::new("nut").with_target("hi", "नट (बोल्ट फास्टनर)").with_priority(10),
    ]);

    let protection = protector.protect("Pass the nut butter", "hindi");

    assert_eq!(protection.text, "Pass the XGLOSSARYX0001X butter");
    assert_eq!(protection.placeholders.get("XGLOSSARYX0001X"), Some("नट (बोल्ट फास्टनर)"));
}

#[test]
fn test_protect_equalPriority_shouldPreferLongerPhrase() {
    let protector = common::protector_for(vec![
        GlossaryEntry::new("engagement").with_target("hi", "संलग्नता").with_priority(10),
        GlossaryEntry::new("rules of engagement").with_target("hi", "युद्ध नियम (ROE)").with_priority(10),
    ]);

    let protection = protector.protect("Review the rules of engagement before engagement", "hindi");

    assert_eq!(protection.text, "Review the XGLOSSARYX0001X before XGLOSSARYX0002X");
    assert_eq!(protection.placeholders.get("XGLOSSARYX0001X"), Some("युद्ध नियम (ROE)"));
    assert_eq!(protection.placeholders.get("XGLOSSARYX0002X"), Some("संलग्नता"));
}

#[test]
fn test_protect_curatedPriorities_shouldBeatLongerLowerPriorityPhrases() {
    let protector = common::curated_protector();

    let restored = |text: &str| {
        let (protected, map) = protector.protect(text, "hindi").into_parts();
        protector.restore(&protected, &map).text
    };

    // "fire" (9) outranks "fire mission" and "hold fire" (8)
    assert_eq!(restored("Stand by for the fire mission"), "प्रतीक्षा करें for the फायर (गोली चलाना) mission");
    assert_eq!(restored("Hold fire! Check fire!"), "Hold फायर (गोली चलाना)! फायर रोकें!");
}

#[test]
fn test_protectRestore_cleanText_shouldInsertTargetTerms() {
    common::init_logging();
    let protector = common::curated_protector();

    let (protected, map) = protector.protect("Request CASEVAC at the LZ, over", "hindi").into_parts();
    assert_eq!(protected, "Request XGLOSSARYX0001X at the XGLOSSARYX0003X, XGLOSSARYX0002X");

    let restoration = protector.restore(&protected, &map);
    assert_eq!(
        restoration.text,
        "Request चिकित्सा निकासी (CASEVAC) at the उतरान क्षेत्र (LZ), ओवर (समाप्त)"
    );
    assert_eq!(restoration.restored_count(), 3);
    assert!(restoration
        .outcomes
        .iter()
        .all(|(_, o)| *o == PlaceholderOutcome::Restored(RestoreStrategy::Exact)));
}

#[test]
fn test_restore_degradedPlaceholder_shouldStillRestore() {
    common::init_logging();
    let protector = common::curated_protector();

    let (protected, map) = protector.protect("Tighten the nut", "hindi").into_parts();
    assert_eq!(protected, "Tighten the XGLOSSARYX0001X");

    let translated = protected.replace("XGLOSSARYX0001X", "glossary 0001");
    let restoration = protector.restore(&translated, &map);

    assert!(restoration.text.contains("नट (बोल्ट फास्टनर)"));
    assert!(!restoration.text.to_lowercase().contains("glossary"));
    assert!(restoration.is_complete());
}

#[test]
fn test_protectRestore_concreteScenario_shouldMatchExpectedHindi() {
    let protector = common::curated_protector();
    let text = "Check the nut before you arm the device";

    let protection = protector.protect(text, "hindi");
    assert_eq!(protection.protected_count(), 2);
    assert_eq!(protection.text, "Check the XGLOSSARYX0001X before you XGLOSSARYX0002X the device");

    let translated = protection.text.clone();
    let restored = protector.restore(&translated, &protection.placeholders).into_text();

    assert_eq!(
        restored,
        "Check the नट (बोल्ट फास्टनर) before you आर्म करना / सशस्त्र करना the device"
    );
}

#[test]
fn test_protect_unknownLanguage_shouldFallBackToPrefix() {
    let protector = common::curated_protector();
    let protection = protector.protect("Check the nut", "unknownlang");
    assert_eq!(protection.text, "Check the nut");
    assert!(protection.placeholders.is_empty());

    let protector = common::protector_for(vec![GlossaryEntry::new("nut").with_target("po", "porca")]);
    let protection = protector.protect("Check the nut", "Portuguese");
    assert_eq!(protection.placeholders.get("XGLOSSARYX0001X"), Some("porca"));
}

#[test]
fn test_protect_otherTargetLanguage_shouldUseThatTarget() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "glossary.json", common::sample_glossary_json()).unwrap();
    let protector = TermProtector::new(Arc::new(GlossaryStore::load(&path)));

    let (protected, map) = protector.protect("Tighten the nut, roger", "french").into_parts();

    // "roger" has no French target
    assert_eq!(protected, "Tighten the XGLOSSARYX0001X, roger");
    assert_eq!(protector.restore(&protected, &map).text, "Tighten the écrou, roger");
}

#[test]
fn test_protect_sharedProtector_shouldGiveEachCallerItsOwnMap() {
    let protector = Arc::new(common::curated_protector());

    thread::scope(|scope| {
        let handles: Vec<_> = SENTENCES
            .iter()
            .map(|text| {
                let protector = Arc::clone(&protector);
                scope.spawn(move || {
                    let (protected, map) = protector.protect(text, "hindi").into_parts();
                    let restored = protector.restore(&protected, &map).text;
                    (protected, map, restored)
                })
            })
            .collect();

        for (handle, text) in handles.into_iter().zip(SENTENCES) {
            let (protected, map, restored) = handle.join().unwrap();
            let expected = protector.protect(text, "hindi");
            assert_eq!(protected, expected.text);
            assert_eq!(map, expected.placeholders);
            assert!(!restored.contains("XGLOSSARYX"));
        }
    });
}
