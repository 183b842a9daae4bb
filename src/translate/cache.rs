use super::Translator;
use crate::error::Result;
use dashmap::DashMap;

/// Memoises successful translations. Failures are not cached.
pub struct CachedTranslator<T> {
    inner: T,
    cache: DashMap<String, String>,
}

impl<T: Translator> CachedTranslator<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }
}

impl<T: Translator> Translator for CachedTranslator<T> {
    fn translate(&self, text: &str) -> Result<String> {
        if let Some(hit) = self.cache.get(text).map(|hit| hit.value().clone()) {
            return Ok(hit);
        }

        let translated = self.inner.translate(text)?;
        self.cache.insert(text.to_string(), translated.clone());
        Ok(translated)
    }
}
