#![no_main]

use libfuzzer_sys::fuzz_target;
use wordtally::counter::count_occurrences;

// Every start offset where `needle` begins, overlapping matches included
fn naive_count(haystack: &str, needle: &str) -> u64 {
    haystack
        .char_indices()
        .filter(|(i, _)| haystack[*i..].starts_with(needle))
        .count() as u64
}

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // First line is the needle, the rest is the haystack
        let (needle, haystack) = input.split_once('\n').unwrap_or((input, ""));
        if needle.is_empty() {
            return;
        }
        assert_eq!(count_occurrences(haystack, needle), naive_count(haystack, needle));
    }
});
