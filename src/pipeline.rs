/*!
 * Translation pipeline with glossary protection.
 *
 * Wraps an external translator: text is protected before it is handed over
 * and restored after it comes back. Protection and restoration never fail;
 * only the translator can.
 */

use log::{debug, warn};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::glossary::GlossaryStore;
use crate::protection::{Restoration, TermProtector};

/// External machine-translation collaborator.
pub trait Translator {
    /// Translate `text` into `target_language`.
    fn translate(&self, text: &str, target_language: &str) -> anyhow::Result<String>;
}

/// Translator that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _target_language: &str) -> anyhow::Result<String> {
        Ok(text.to_string())
    }
}

/// Everything produced by one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Text sent to the translator
    pub protected_text: String,
    /// Text returned by the translator
    pub translated_text: String,
    /// Final text with glossary terms restored
    pub text: String,
    /// Number of protected spans
    pub protected_count: usize,
    /// Restoration details (no outcomes when protection is disabled)
    pub restoration: Restoration,
}

/// Protect, translate, restore.
#[derive(Debug, Clone)]
pub struct GlossaryPipeline {
    protector: TermProtector,
    enabled: bool,
}

impl GlossaryPipeline {
    pub fn new(store: Arc<GlossaryStore>, enabled: bool) -> Self {
        Self {
            protector: TermProtector::new(store),
            enabled,
        }
    }

    /// Build the pipeline described by a configuration.
    ///
    /// A disabled glossary is never read from disk.
    pub fn from_config(config: &Config) -> Self {
        let store = if config.glossary.enabled {
            GlossaryStore::load(&config.glossary.path)
        } else {
            debug!("Glossary protection disabled by configuration");
            GlossaryStore::empty()
        };

        Self::new(Arc::new(store), config.glossary.enabled)
    }

    pub fn protector(&self) -> &TermProtector {
        &self.protector
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run one text through protection, `translator` and restoration.
    pub fn translate<T: Translator + ?Sized>(
        &self,
        text: &str,
        target_language: &str,
        translator: &T,
    ) -> Result<PipelineOutput, AppError> {
        if !self.enabled {
            let translated = self.call_translator(translator, text, target_language)?;
            return Ok(PipelineOutput {
                protected_text: text.to_string(),
                translated_text: translated.clone(),
                text: translated.clone(),
                protected_count: 0,
                restoration: Restoration {
                    text: translated,
                    outcomes: Vec::new(),
                },
            });
        }

        let protection = self.protector.protect(text, target_language);
        let protected_count = protection.protected_count();
        let (protected_text, placeholders) = protection.into_parts();

        let translated_text = self.call_translator(translator, &protected_text, target_language)?;
        let restoration = self.protector.restore(&translated_text, &placeholders);

        let unresolved = restoration.unresolved();
        if !unresolved.is_empty() {
            warn!("{} glossary placeholders left unrestored", unresolved.len());
        }

        Ok(PipelineOutput {
            protected_text,
            translated_text,
            text: restoration.text.clone(),
            protected_count,
            restoration,
        })
    }

    fn call_translator<T: Translator + ?Sized>(
        &self,
        translator: &T,
        text: &str,
        target_language: &str,
    ) -> Result<String, AppError> {
        translator
            .translate(text, target_language)
            .map_err(|e| AppError::Translation(e.to_string()))
    }
}
