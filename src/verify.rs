//! Comparison of a computed tally against a known-correct reference

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::tally::Tally;

/// One difference between the computed and the expected tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// Both tallies have the word but disagree on its count
    Count { word: String, actual: u64, expected: u64 },
    /// The expected tally has a word the computed one lacks
    Missing { word: String, expected: u64 },
    /// The computed tally has a word the expected one lacks
    Unexpected { word: String, actual: u64 },
}

impl Mismatch {
    pub fn word(&self) -> &str {
        match self {
            Mismatch::Count { word, .. }
            | Mismatch::Missing { word, .. }
            | Mismatch::Unexpected { word, .. } => word,
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Count {
                word,
                actual,
                expected,
            } => write!(f, "'{}': got {}, expected {}", word, actual, expected),
            Mismatch::Missing { word, expected } => {
                write!(f, "'{}': missing, expected {}", word, expected)
            }
            Mismatch::Unexpected { word, actual } => {
                write!(f, "'{}': got {}, not in expected tally", word, actual)
            }
        }
    }
}

/// Every mismatch found by [`verify`]
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("verification failed: {} mismatching word(s)", .mismatches.len())]
pub struct VerificationFailure {
    pub mismatches: Vec<Mismatch>,
}

/// Check `actual` against `expected` over the union of both key sets.
///
/// Mismatches are listed in expected-tally order, followed by words only
/// present in `actual`.
pub fn verify(actual: &Tally, expected: &Tally) -> Result<(), VerificationFailure> {
    let mut mismatches = Vec::new();

    for (word, expected_count) in expected.iter() {
        match actual.get(word) {
            Some(actual_count) if actual_count == expected_count => {}
            Some(actual_count) => mismatches.push(Mismatch::Count {
                word: word.to_string(),
                actual: actual_count,
                expected: expected_count,
            }),
            None => mismatches.push(Mismatch::Missing {
                word: word.to_string(),
                expected: expected_count,
            }),
        }
    }

    for (word, actual_count) in actual.iter() {
        if !expected.contains(word) {
            mismatches.push(Mismatch::Unexpected {
                word: word.to_string(),
                actual: actual_count,
            });
        }
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(VerificationFailure { mismatches })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(entries: &[(&str, u64)]) -> Tally {
        entries.iter().map(|(w, c)| (*w, *c)).collect()
    }

    #[test]
    fn test_identical_tallies_pass() {
        let t = tally(&[("a", 1), ("b", 0)]);
        assert!(verify(&t, &t.clone()).is_ok());
    }

    #[test]
    fn test_order_does_not_matter() {
        let actual = tally(&[("a", 1), ("b", 2)]);
        let expected = tally(&[("b", 2), ("a", 1)]);
        assert!(verify(&actual, &expected).is_ok());
    }

    #[test]
    fn test_count_mismatch_names_word_and_values() {
        let failure = verify(&tally(&[("a", 2)]), &tally(&[("a", 1)])).unwrap_err();
        assert_eq!(
            failure.mismatches,
            vec![Mismatch::Count {
                word: "a".into(),
                actual: 2,
                expected: 1
            }]
        );
        assert_eq!(failure.mismatches[0].to_string(), "'a': got 2, expected 1");
    }

    #[test]
    fn test_missing_key_fails_even_when_zero() {
        let failure = verify(&tally(&[("a", 1)]), &tally(&[("a", 1), ("b", 0)])).unwrap_err();
        assert_eq!(
            failure.mismatches,
            vec![Mismatch::Missing {
                word: "b".into(),
                expected: 0
            }]
        );
    }

    #[test]
    fn test_unexpected_key_fails() {
        let failure = verify(&tally(&[("a", 1), ("z", 0)]), &tally(&[("a", 1)])).unwrap_err();
        assert_eq!(failure.mismatches.len(), 1);
        assert_eq!(failure.mismatches[0].word(), "z");
    }

    #[test]
    fn test_reports_every_mismatch() {
        let actual = tally(&[("a", 5), ("b", 1), ("c", 3)]);
        let expected = tally(&[("a", 4), ("b", 1), ("c", 2), ("d", 7)]);
        let failure = verify(&actual, &expected).unwrap_err();
        let words: Vec<_> = failure.mismatches.iter().map(Mismatch::word).collect();
        assert_eq!(words, vec!["a", "c", "d"]);
        assert_eq!(failure.to_string(), "verification failed: 3 mismatching word(s)");
    }

    #[test]
    fn test_mismatch_serializes_with_kind() {
        let mismatch = Mismatch::Missing {
            word: "b".into(),
            expected: 0,
        };
        let json = serde_json::to_value(&mismatch).unwrap();
        assert_eq!(json["kind"], "missing");
        assert_eq!(json["word"], "b");
    }
}
