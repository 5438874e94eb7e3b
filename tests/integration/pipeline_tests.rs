/*!
 * Integration tests for the protect, translate, restore pipeline
 */

use std::sync::Arc;

use anyhow::Result;
use termguard::app_config::{Config, GlossaryConfig, LogLevel};
use termguard::glossary::curated_store;
use termguard::pipeline::{GlossaryPipeline, IdentityTranslator, Translator};
use termguard::protection::{PlaceholderOutcome, RestoreStrategy};

use crate::common;

/// Lowercases everything, placeholders included
struct LowercasingTranslator;

impl Translator for LowercasingTranslator {
    fn translate(&self, text: &str, _target_language: &str) -> Result<String> {
        Ok(text.to_lowercase())
    }
}

/// Splits the placeholder tag word off with spaces
struct SpacingTranslator;

impl Translator for SpacingTranslator {
    fn translate(&self, text: &str, _target_language: &str) -> Result<String> {
        Ok(text.replace("XGLOSSARYX", "X GLOSSARY X "))
    }
}

/// Drops the text entirely
struct ForgetfulTranslator;

impl Translator for ForgetfulTranslator {
    fn translate(&self, _text: &str, _target_language: &str) -> Result<String> {
        Ok("अनुवाद".to_string())
    }
}

fn curated_pipeline() -> GlossaryPipeline {
    GlossaryPipeline::new(Arc::new(curated_store()), true)
}

#[test]
fn test_pipeline_configFile_shouldProtectWithConfiguredGlossary() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();
    let glossary = common::create_test_file(dir.path(), "glossary.json", common::sample_glossary_json()).unwrap();
    let config_path = dir.path().join("conf.json");

    let config = Config {
        target_language: "french".to_string(),
        glossary: GlossaryConfig {
            path: glossary.to_string_lossy().into_owned(),
            enabled: true,
        },
        log_level: LogLevel::Debug,
    };
    config.save(&config_path).unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    loaded.validate().unwrap();
    assert_eq!(loaded, config);

    let pipeline = GlossaryPipeline::from_config(&loaded);
    let output = pipeline
        .translate("Tighten the nut, roger", &loaded.target_language, &IdentityTranslator)
        .unwrap();

    assert_eq!(output.protected_text, "Tighten the XGLOSSARYX0001X, roger");
    assert_eq!(output.text, "Tighten the écrou, roger");
}

#[test]
fn test_pipeline_disabledGlossary_shouldNotTouchText() {
    let config = Config {
        glossary: GlossaryConfig {
            path: "/nonexistent/defense_glossary.json".to_string(),
            enabled: false,
        },
        ..Config::default()
    };

    let pipeline = GlossaryPipeline::from_config(&config);
    let output = pipeline.translate("Check the nut", "hindi", &IdentityTranslator).unwrap();

    assert!(!pipeline.is_enabled());
    assert_eq!(output.text, "Check the nut");
    assert_eq!(output.restoration.text, output.text);
    assert!(output.restoration.outcomes.is_empty());
}

#[test]
fn test_pipeline_lowercasedPlaceholders_shouldRestoreCaseInsensitively() {
    common::init_logging();
    let output = curated_pipeline()
        .translate("Check the nut before you arm the device", "hindi", &LowercasingTranslator)
        .unwrap();

    assert_eq!(
        output.translated_text,
        "check the xglossaryx0001x before you xglossaryx0002x the device"
    );
    assert_eq!(
        output.text,
        "check the नट (बोल्ट फास्टनर) before you आर्म करना / सशस्त्र करना the device"
    );
    assert!(output
        .restoration
        .outcomes
        .iter()
        .all(|(_, o)| *o == PlaceholderOutcome::Restored(RestoreStrategy::CaseInsensitive)));
}

#[test]
fn test_pipeline_spacedPlaceholders_shouldRestore() {
    let output = curated_pipeline()
        .translate("Follow the rules of engagement, roger that", "hindi", &SpacingTranslator)
        .unwrap();

    assert_eq!(output.protected_text, "Follow the XGLOSSARYX0001X, XGLOSSARYX0002X that");
    assert_eq!(output.text, "Follow the युद्ध नियम (ROE), समझ गया that");
    assert_eq!(output.restoration.restored_count(), 2);
    assert!(output
        .restoration
        .outcomes
        .iter()
        .all(|(_, o)| *o == PlaceholderOutcome::Restored(RestoreStrategy::SpacedOut)));
}

#[test]
fn test_pipeline_lostPlaceholders_shouldReportUnresolved() {
    common::init_logging();
    let output = curated_pipeline()
        .translate("danger close, the IED is near the rally point", "hindi", &ForgetfulTranslator)
        .unwrap();

    assert_eq!(output.protected_count, 3);
    assert_eq!(output.text, "अनुवाद");
    assert_eq!(output.restoration.unresolved().len(), 3);
    assert!(!output.restoration.is_complete());
}

#[test]
fn test_pipeline_shippedGlossary_shouldRestoreIdentityTranslation() {
    let config = Config {
        glossary: GlossaryConfig {
            path: common::shipped_glossary_path().to_string_lossy().into_owned(),
            enabled: true,
        },
        ..Config::default()
    };

    let pipeline = GlossaryPipeline::from_config(&config);
    let output = pipeline
        .translate("danger close, the IED is near the rally point", "hindi", &IdentityTranslator)
        .unwrap();

    assert_eq!(
        output.protected_text,
        "XGLOSSARYX0002X, the XGLOSSARYX0001X is near the XGLOSSARYX0003X"
    );
    assert_eq!(
        output.text,
        "खतरे के बहुत करीब, the स्वनिर्मित विस्फोटक (IED) is near the एकत्रीकरण बिंदु"
    );
}
