//! Per-file word counting (the map step)

use crate::tally::{Tally, Vocabulary};

/// Counts vocabulary words in already-lowercased file contents.
///
/// Matching is raw substring matching: overlapping occurrences count, and a
/// word matches inside longer words ("cat" in "catnip") and across word
/// boundaries.
#[derive(Debug, Clone)]
pub struct Counter {
    vocabulary: Vocabulary,
}

impl Counter {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Produce a partial tally for one file's lowercase content
    pub fn count(&self, content: &str) -> Tally {
        let mut tally = Tally::zeroed(&self.vocabulary);
        for word in self.vocabulary.iter() {
            let n = count_occurrences(content, word);
            if n > 0 {
                tally.add(word, n);
            }
        }
        tally
    }
}

/// Number of possibly overlapping occurrences of `needle` in `haystack`
pub fn count_occurrences(haystack: &str, needle: &str) -> u64 {
    let Some(first) = needle.chars().next() else {
        return 0;
    };
    // Restart one character past each match start so overlaps are found
    // while staying on a char boundary.
    let step = first.len_utf8();
    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        count += 1;
        start += pos + step;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(words: &[&str]) -> Counter {
        Counter::new(Vocabulary::new(words.iter().copied()).unwrap())
    }

    #[test]
    fn test_count_simple() {
        assert_eq!(count_occurrences("the cat sat", "cat"), 1);
        assert_eq!(count_occurrences("the cat sat", "dog"), 0);
        assert_eq!(count_occurrences("", "cat"), 0);
    }

    #[test]
    fn test_count_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 3);
        assert_eq!(count_occurrences("abababa", "aba"), 3);
    }

    #[test]
    fn test_count_inside_and_across_words() {
        assert_eq!(count_occurrences("catnip and cats", "cat"), 2);
        assert_eq!(count_occurrences("enemy anatomy", "my"), 2);
    }

    #[test]
    fn test_count_multibyte() {
        assert_eq!(count_occurrences("ééé", "éé"), 2);
        assert_eq!(count_occurrences("naïve naïveté", "ïve"), 2);
    }

    #[test]
    fn test_empty_needle_counts_nothing() {
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn test_counter_includes_zero_entries() {
        let c = counter(&["cat", "dog", "emu"]);
        let t = c.count("the cat sat");
        assert_eq!(t.words().collect::<Vec<_>>(), vec!["cat", "dog", "emu"]);
        assert_eq!(t.get("cat"), Some(1));
        assert_eq!(t.get("dog"), Some(0));
        assert_eq!(t.get("emu"), Some(0));
    }

    #[test]
    fn test_counter_on_empty_content() {
        let c = counter(&["cat"]);
        let t = c.count("");
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("cat"), Some(0));
    }

    #[test]
    fn test_counter_scenario_files() {
        let c = counter(&["cat", "dog"]);
        let first = c.count(&"The cat sat. A dog barked. Catnip!".to_lowercase());
        let second = c.count(&"Dogs and cats.".to_lowercase());
        assert_eq!(first.get("cat"), Some(2));
        assert_eq!(first.get("dog"), Some(1));
        assert_eq!(second.get("cat"), Some(1));
        assert_eq!(second.get("dog"), Some(1));
    }
}
