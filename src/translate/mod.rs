//! Best-effort translation of advisory text fields.
//!
//! Translators compose as decorators: `CachedTranslator<ProtectedTranslator<GlossaryTranslator>>`
//! caches, protects domain tokens, then translates. Any failure leaves the
//! original text in place.

pub mod cache;
pub mod glossary;
pub mod protect;

use crate::error::{AlertError, Result};
use crate::models::AlertFields;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

pub use cache::CachedTranslator;
pub use glossary::GlossaryTranslator;
pub use protect::ProtectedTranslator;

pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> Result<String>;
}

/// Leaves text untouched.
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationMode {
    None,
    Glossary,
}

impl FromStr for TranslationMode {
    type Err = AlertError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "" => Ok(TranslationMode::None),
            "glossary" => Ok(TranslationMode::Glossary),
            other => Err(AlertError::Translation(format!(
                "unknown translation mode '{other}'"
            ))),
        }
    }
}

pub fn build_translator(mode: TranslationMode, cached: bool) -> Arc<dyn Translator> {
    match (mode, cached) {
        (TranslationMode::None, _) => Arc::new(IdentityTranslator),
        (TranslationMode::Glossary, false) => {
            Arc::new(ProtectedTranslator::new(GlossaryTranslator::new()))
        }
        (TranslationMode::Glossary, true) => Arc::new(CachedTranslator::new(
            ProtectedTranslator::new(GlossaryTranslator::new()),
        )),
    }
}

/// Translates `text`, keeping the original on failure.
pub fn translate_or_keep(translator: &dyn Translator, text: &str) -> String {
    match translator.translate(text) {
        Ok(translated) => translated,
        Err(e) => {
            warn!("Translation failed, keeping original text: {}", e);
            text.to_string()
        }
    }
}

/// Translates every present, non-blank text field in place.
pub fn translate_alert_fields(translator: &dyn Translator, fields: &mut AlertFields) {
    for slot in fields.text_fields_mut() {
        if let Some(text) = slot.as_mut() {
            if !text.trim().is_empty() {
                *text = translate_or_keep(translator, text);
            }
        }
    }
}
