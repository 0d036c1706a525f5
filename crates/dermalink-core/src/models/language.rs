use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Supported report languages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Language {
    En,
    Ko,
    Jp,
    Cn,
}

impl Language {
    /// Coalescing priority when no preference is given: English first, then
    /// the remaining languages in declaration order.
    pub const PRIORITY: [Language; 4] = [Language::En, Language::Ko, Language::Jp, Language::Cn];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Ko => "KO",
            Language::Jp => "JP",
            Language::Cn => "CN",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

/// A value captured once per survey language.
///
/// The survey tool writes one column per language; answers arrive here as a
/// typed map keyed by [`Language`] with an explicit coalescing order —
/// requested language first, then [`Language::PRIORITY`]. Field names are
/// never constructed dynamically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Localized<T: TS>(BTreeMap<Language, T>);

impl<T: TS> Localized<T> {
    pub fn new() -> Self {
        Localized(BTreeMap::new())
    }

    pub fn insert(&mut self, lang: Language, value: T) {
        self.0.insert(lang, value);
    }

    pub fn get(&self, lang: Language) -> Option<&T> {
        self.0.get(&lang)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The preferred language's value if present, otherwise the first
    /// non-empty slot in [`Language::PRIORITY`] order.
    pub fn coalesce(&self, preferred: Language) -> Option<&T> {
        self.0.get(&preferred).or_else(|| {
            Language::PRIORITY
                .iter()
                .find_map(|lang| self.0.get(lang))
        })
    }
}

impl<T: TS> FromIterator<(Language, T)> for Localized<T> {
    fn from_iter<I: IntoIterator<Item = (Language, T)>>(iter: I) -> Self {
        Localized(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesce_prefers_requested_language() {
        let answers: Localized<String> = [
            (Language::En, "Prefer minimal pain".to_string()),
            (Language::Ko, "통증은 최대한 피하고 싶음".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            answers.coalesce(Language::Ko).unwrap(),
            "통증은 최대한 피하고 싶음"
        );
    }

    #[test]
    fn coalesce_falls_back_to_english_first() {
        let answers: Localized<String> = [
            (Language::Cn, "多少なら大丈夫".to_string()),
            (Language::En, "Moderate is okay".to_string()),
        ]
        .into_iter()
        .collect();

        // Requested JP is absent; EN outranks CN in the fallback order.
        assert_eq!(answers.coalesce(Language::Jp).unwrap(), "Moderate is okay");
    }

    #[test]
    fn coalesce_empty_is_none() {
        let answers: Localized<String> = Localized::new();
        assert!(answers.coalesce(Language::En).is_none());
    }

    #[test]
    fn serde_round_trips_uppercase_codes() {
        let answers: Localized<String> =
            [(Language::Jp, "痛みはなるべく避けたい".to_string())]
                .into_iter()
                .collect();
        let json = serde_json::to_string(&answers).unwrap();
        assert!(json.contains("\"JP\""));
        let back: Localized<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }
}
