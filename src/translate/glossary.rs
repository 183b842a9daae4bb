use super::Translator;
use crate::error::Result;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// English → Russian phrases found in SWPC advisories.
const PHRASES: &[(&str, &str)] = &[
    ("Type II Radio Emission", "Радиоизлучение типа II"),
    ("coronal mass ejection", "корональный выброс массы"),
    ("flare event", "вспышечное событие"),
    ("eruptions on the sun", "извержения на Солнце"),
    ("typically indicate", "обычно указывают"),
    ("is associated with", "связано с"),
    ("occur in association with", "происходят в связи с"),
    ("Geomagnetic K-index", "Геомагнитный K-индекс"),
    ("expected", "ожидается"),
    (
        "Area of impact primarily poleward of",
        "Область воздействия преимущественно севернее",
    ),
    ("degrees Geomagnetic Latitude", "градусов геомагнитной широты"),
    ("Potential Impacts", "Потенциальные воздействия"),
    ("Induced Currents", "Наведенные токи"),
    (
        "Weak power grid fluctuations can occur",
        "Могут возникнуть слабые колебания энергосистемы",
    ),
    (
        "power grid fluctuations can occur",
        "могут возникнуть колебания энергосистемы",
    ),
    (
        "Voltage corrections may be required",
        "Может потребоваться коррекция напряжения",
    ),
    ("spacecraft charging", "зарядка космических аппаратов"),
    (
        "increased drag on low Earth-orbiting satellites",
        "увеличенное сопротивление для низкоорбитальных спутников",
    ),
    (
        "satellite orientation irregularities",
        "нарушения ориентации спутников",
    ),
    ("surface charging", "поверхностная зарядка"),
    ("may be visible at high latitudes", "может быть видно в высоких широтах"),
    ("visible at high latitudes", "видно в высоких широтах"),
    ("such as Canada and Alaska", "таких как Канада и Аляска"),
    ("HF radio", "КВ радио"),
    ("radio communications", "радиосвязь"),
    ("navigation problems", "проблемы навигации"),
    ("blackouts", "блэкауты"),
    ("blackout", "блэкаут"),
    ("power systems", "энергосистемы"),
    ("transformer damage", "повреждение трансформаторов"),
    ("pipeline currents", "токи в трубопроводах"),
    ("may experience", "может испытывать"),
    ("possible", "возможно"),
    ("likely", "вероятно"),
    ("Aurora", "Полярное сияние"),
    ("aurora", "полярное сияние"),
    ("Minor", "незначительные"),
    ("minor", "незначительные"),
    ("Moderate", "умеренные"),
    ("moderate", "умеренные"),
    ("Strong", "сильные"),
    ("strong", "сильные"),
    ("Severe", "очень сильные"),
    ("severe", "очень сильные"),
    ("Extreme", "экстремальные"),
    ("extreme", "экстремальные"),
];

struct Glossary {
    matcher: Regex,
    phrases: HashMap<&'static str, &'static str>,
}

/// One alternation over every phrase, longest first so a phrase is never
/// pre-empted by one of its own words. Phrases only match whole words.
fn glossary() -> &'static Glossary {
    static GLOSSARY: OnceLock<Glossary> = OnceLock::new();
    GLOSSARY.get_or_init(|| {
        let mut english: Vec<&str> = PHRASES.iter().map(|(en, _)| *en).collect();
        english.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = english
            .iter()
            .map(|phrase| regex::escape(phrase))
            .collect::<Vec<_>>()
            .join("|");
        Glossary {
            matcher: Regex::new(&format!(r"\b(?:{alternation})\b"))
                .expect("valid glossary regex"),
            phrases: PHRASES.iter().copied().collect(),
        }
    })
}

/// Offline phrase-table translator.
#[derive(Default)]
pub struct GlossaryTranslator;

impl GlossaryTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl Translator for GlossaryTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        let glossary = glossary();
        let translated = glossary
            .matcher
            .replace_all(text, |caps: &Captures| {
                let phrase = &caps[0];
                glossary
                    .phrases
                    .get(phrase)
                    .map_or_else(|| phrase.to_string(), |russian| russian.to_string())
            })
            .into_owned();
        Ok(translated)
    }
}
