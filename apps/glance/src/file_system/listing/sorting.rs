//! Sorting logic for directory listings.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::file_system::listing::DirectoryEntry;

/// Compares two names the way a person reads them: case-insensitive and natural
/// (for example, "img_2" before "img_10").
///
/// Names are NFC-normalized first so composed and decomposed accents collate together.
/// Ties fall back to the raw name so the order is total and repeatable.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let a_key: String = a.nfc().collect::<String>().to_lowercase();
    let b_key: String = b.nfc().collect::<String>().to_lowercase();
    alphanumeric_sort::compare_str(&a_key, &b_key).then_with(|| a.cmp(b))
}

/// Sorts entries: all directories first, then all files, each group by name.
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| compare_names(&a.name, &b.name)));
}
