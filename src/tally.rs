//! Tally and vocabulary types
//!
//! A [`Tally`] maps vocabulary words to occurrence counts. Partial tallies are
//! produced per file by the counter and folded into an aggregate with [`merge`].

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TallyError};

/// Words counted when no vocabulary is configured
pub const DEFAULT_WORDS: &[&str] = &[
    "hate", "love", "death", "night", "sleep", "time", "henry", "hamlet", "you", "my", "blood",
    "poison", "macbeth", "king", "heart", "honest",
];

/// Ordered, de-duplicated set of lowercase target words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: IndexSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary, lowercasing every word and dropping duplicates.
    /// Empty words are rejected since they would match between every character.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = IndexSet::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                return Err(TallyError::InvalidVocabulary(
                    "target words must not be empty".to_string(),
                ));
            }
            set.insert(word);
        }
        Ok(Self { words: set })
    }

    /// Build a vocabulary from words stripped of every non-alphabetic character.
    ///
    /// This narrows what gets counted (`"don't"` becomes `"dont"`), so it is
    /// only used when `--clean-words` is given.
    pub fn new_cleaned<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned = Vec::new();
        for word in words {
            let clean = clean_word(word.as_ref());
            if clean.is_empty() {
                return Err(TallyError::InvalidVocabulary(format!(
                    "'{}' has no alphabetic characters",
                    word.as_ref()
                )));
            }
            cleaned.push(clean);
        }
        Self::new(cleaned)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Remove everything that is not alphabetic and lowercase the rest
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Ordered mapping from word to occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    counts: IndexMap<String, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tally with a zero entry for every vocabulary word
    pub fn zeroed(vocabulary: &Vocabulary) -> Self {
        Self {
            counts: vocabulary.iter().map(|w| (w.to_string(), 0)).collect(),
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Add `count` to `word`, inserting the word at zero if absent
    pub fn add(&mut self, word: &str, count: u64) {
        match self.counts.get_mut(word) {
            Some(existing) => *existing += count,
            None => {
                self.counts.insert(word.to_string(), count);
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Tally {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        Self {
            counts: iter.into_iter().map(|(w, c)| (w.into(), c)).collect(),
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (word, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", word, count)?;
        }
        write!(f, "}}")
    }
}

/// Fold `source` into `destination` by summing per-word counts.
///
/// Not idempotent: merging the same partial twice counts it twice.
pub fn merge(source: &Tally, destination: &mut Tally) {
    for (word, count) in source.iter() {
        destination.add(word, count);
    }
}
