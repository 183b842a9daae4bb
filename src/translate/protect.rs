use super::Translator;
use crate::error::{AlertError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Acronyms and scale codes that must survive translation verbatim.
pub const PROTECTED_TOKENS: &[&str] = &[
    "UTC", "GMT", "GPS", "NASA", "NOAA", "API", "SWPC", "G1", "G2", "G3", "G4", "G5", "R1", "R2",
    "R3", "R4", "R5", "S1", "S2", "S3", "S4", "S5", "Kp", "Ap", "Dst", "F10.7", "CME", "SEP", "GLE",
    "SSC", "IMF",
];

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        let alternation = PROTECTED_TOKENS
            .iter()
            .map(|token| regex::escape(token))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b(?:{alternation})\b")).expect("valid protected token regex")
    })
}

fn placeholder(index: usize) -> String {
    format!("__TOKEN{index}__")
}

/// Protect tokens, translate with `inner`, restore tokens.
pub struct ProtectedTranslator<T> {
    inner: T,
}

impl<T: Translator> ProtectedTranslator<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

/// Replaces each protected token with an indexed placeholder.
pub fn protect(text: &str) -> (String, Vec<String>) {
    let mut tokens = Vec::new();
    let protected = token_re()
        .replace_all(text, |caps: &regex::Captures| {
            tokens.push(caps[0].to_string());
            placeholder(tokens.len() - 1)
        })
        .into_owned();
    (protected, tokens)
}

/// Puts the tokens back. Fails if the translation dropped a placeholder.
pub fn restore(text: &str, tokens: &[String]) -> Result<String> {
    let mut restored = text.to_string();
    for (index, token) in tokens.iter().enumerate() {
        let marker = placeholder(index);
        if !restored.contains(&marker) {
            return Err(AlertError::Translation(format!(
                "translated text lost protected token '{token}'"
            )));
        }
        restored = restored.replacen(&marker, token, 1);
    }
    Ok(restored)
}

impl<T: Translator> Translator for ProtectedTranslator<T> {
    fn translate(&self, text: &str) -> Result<String> {
        let (protected, tokens) = protect(text);
        let translated = self.inner.translate(&protected)?;
        restore(&translated, &tokens)
    }
}
