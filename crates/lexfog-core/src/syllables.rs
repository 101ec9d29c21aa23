//! Syllable counting.
//!
//! The engine asks a [`SyllableOracle`] how many syllables a word has and
//! never cares how the answer is produced. [`VowelGroupOracle`] is the
//! built-in implementation: an exception dictionary backed by a vowel-group
//! estimate, with rules for Polish and English.

use std::collections::HashMap;
use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Language of the analyzed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Language {
    /// Polish (default).
    #[default]
    #[serde(alias = "pl-pl")]
    #[cfg_attr(feature = "clap", value(name = "pl"))]
    Pl,
    /// English.
    #[serde(alias = "en-us", alias = "en-gb")]
    #[cfg_attr(feature = "clap", value(name = "en"))]
    En,
}

impl Language {
    /// Returns the language as an ISO 639-1 code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pl => "pl",
            Self::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts syllables of a word in a given language.
///
/// Implementations must be free of side effects per lookup so a single
/// instance can serve concurrent scoring runs.
pub trait SyllableOracle: Send + Sync {
    /// Number of syllables in `word`. Zero for words without letters.
    fn count_syllables(&self, word: &str, language: Language) -> usize;
}

/// Words whose syllable count the vowel-group rules get wrong.
static EXCEPTIONS: LazyLock<HashMap<(Language, &'static str), usize>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Polish: "au"/"eu" split across a morpheme boundary
    map.extend(
        [
            ("nauka", 3),
            ("nauki", 3),
            ("naukowy", 4),
            ("naukowa", 4),
            ("naukowe", 4),
            ("nauczyciel", 4),
            ("nauczyciele", 5),
            ("nauczycielka", 5),
            ("nauczanie", 4),
            ("zauważyć", 4),
            ("zauważył", 4),
            ("zaufanie", 4),
            ("przeurocze", 4),
            ("muzeum", 3),
            ("liceum", 3),
            ("kolokwium", 4),
            ("akwarium", 4),
            ("ministerium", 5),
        ]
        .map(|(word, count)| ((Language::Pl, word), count)),
    );

    // English: common words the heuristic miscounts
    map.extend(
        [
            ("business", 3),
            ("chocolate", 3),
            ("every", 3),
            ("different", 3),
            ("area", 3),
            ("idea", 3),
            ("people", 2),
            ("because", 2),
            ("science", 2),
            ("quiet", 2),
            ("being", 2),
            ("create", 2),
            ("created", 3),
            ("video", 3),
            ("radio", 3),
            ("media", 3),
            ("society", 4),
            ("variety", 4),
            ("experience", 4),
            ("period", 3),
            ("serious", 3),
            ("various", 3),
        ]
        .map(|(word, count)| ((Language::En, word), count)),
    );

    map
});

/// Look up a word in the exception dictionary.
pub fn lookup_syllables(word: &str, language: Language) -> Option<usize> {
    EXCEPTIONS
        .get(&(language, word.to_lowercase().as_str()))
        .copied()
}

/// Dictionary-then-estimate syllable counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelGroupOracle;

impl VowelGroupOracle {
    /// Create the oracle, forcing the exception dictionary to load.
    ///
    /// Loading is idempotent: later constructions reuse the same table.
    pub fn new() -> Self {
        LazyLock::force(&EXCEPTIONS);
        Self
    }
}

impl SyllableOracle for VowelGroupOracle {
    fn count_syllables(&self, word: &str, language: Language) -> usize {
        let letters: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();
        if letters.is_empty() {
            return 0;
        }
        if let Some(count) = lookup_syllables(&letters, language) {
            return count;
        }
        match language {
            Language::Pl => estimate_polish(&letters),
            Language::En => estimate_english(&letters),
        }
    }
}

const fn is_polish_vowel(c: char) -> bool {
    matches!(c, 'a' | 'ą' | 'e' | 'ę' | 'i' | 'o' | 'ó' | 'u' | 'y')
}

/// Estimate Polish syllables by counting vowel nuclei.
///
/// Every vowel letter is a nucleus except `i` before another vowel (it only
/// softens the consonant: "nie", "się") and the `u` of `au`/`eu`.
/// Expects lowercase letters only.
pub fn estimate_polish(word: &str) -> usize {
    let chars: Vec<char> = word.chars().collect();
    let mut syllables = 0;

    for (i, &c) in chars.iter().enumerate() {
        if !is_polish_vowel(c) {
            continue;
        }
        let next = chars.get(i + 1).copied();
        let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();

        if c == 'i' && next.is_some_and(is_polish_vowel) {
            continue;
        }
        if c == 'u' && matches!(prev, Some('a' | 'e')) {
            continue;
        }
        syllables += 1;
    }

    syllables.max(1)
}

/// Estimate English syllables using vowel groups with suffix adjustments.
///
/// Expects lowercase letters only.
pub fn estimate_english(word: &str) -> usize {
    let vowels = [b'a', b'e', b'i', b'o', b'u', b'y'];
    let bytes = word.as_bytes();
    let mut syllables: usize = 0;
    let mut previous_was_vowel = false;

    for &b in bytes {
        let is_vowel = vowels.contains(&b);
        if is_vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = is_vowel;
    }

    // Silent e
    if word.ends_with('e') && syllables > 1 {
        let before_e = bytes.get(bytes.len().saturating_sub(2));
        if let Some(&ch) = before_e
            && !matches!(ch, b'l' | b'd' | b't' | b'n')
        {
            syllables -= 1;
        }
    }

    // -le after a consonant (table, able)
    if word.len() >= 3 && word.ends_with("le") {
        let before_le = bytes.get(bytes.len().saturating_sub(3));
        if let Some(&ch) = before_le
            && !vowels.contains(&ch)
        {
            syllables += 1;
        }
    }

    // Silent -ed
    if word.ends_with("ed") && syllables > 1 {
        let before_ed = bytes.get(bytes.len().saturating_sub(3));
        if let Some(&ch) = before_ed
            && !matches!(ch, b't' | b'd')
        {
            syllables = syllables.saturating_sub(1);
        }
    }

    syllables.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pl(word: &str) -> usize {
        VowelGroupOracle::new().count_syllables(word, Language::Pl)
    }

    #[test]
    fn polish_basic_words() {
        assert_eq!(pl("kot"), 1);
        assert_eq!(pl("mama"), 2);
        assert_eq!(pl("telefon"), 3);
        assert_eq!(pl("komputer"), 3);
        assert_eq!(pl("samochodowy"), 5);
    }

    #[test]
    fn polish_i_before_vowel_is_not_a_nucleus() {
        assert_eq!(pl("nie"), 1);
        assert_eq!(pl("się"), 1);
        assert_eq!(pl("pies"), 1);
        assert_eq!(pl("informacja"), 4);
    }

    #[test]
    fn polish_diphthongs_count_once() {
        assert_eq!(pl("auto"), 2);
        assert_eq!(pl("Europa"), 3);
    }

    #[test]
    fn exceptions_win_over_estimate() {
        assert_eq!(pl("nauka"), 3);
        assert_eq!(pl("Muzeum"), 3);
    }

    #[test]
    fn non_letters_are_ignored() {
        assert_eq!(pl("."), 0);
        assert_eq!(pl("2024"), 0);
        assert_eq!(pl("«dom»"), 1);
        assert_eq!(pl(""), 0);
    }

    #[test]
    fn english_estimate() {
        let oracle = VowelGroupOracle::new();
        assert_eq!(oracle.count_syllables("hello", Language::En), 2);
        assert_eq!(oracle.count_syllables("world", Language::En), 1);
        assert_eq!(oracle.count_syllables("beautiful", Language::En), 3);
        assert_eq!(oracle.count_syllables("business", Language::En), 3);
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::Pl.as_str(), "pl");
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!(Language::default(), Language::Pl);
    }
}
