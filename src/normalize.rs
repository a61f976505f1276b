//! Text normalization into a canonical comparable form.
//!
//! Raw document text is folded down so that superficial variation
//! (case, accents, punctuation, whitespace) never separates otherwise
//! identical content. All downstream shingling operates on this form;
//! the raw text is untouched and is what gets written back out.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize raw text for comparison.
///
/// Steps, in order: lowercase, Unicode canonical decomposition (NFD)
/// with all combining marks stripped (accent removal), ASCII punctuation
/// removal, and whitespace runs collapsed to single spaces with the ends
/// trimmed.
///
/// Pure and idempotent: normalizing already-normalized text returns it
/// unchanged, and empty input yields an empty string.
pub fn normalize_text(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    let mut out = String::with_capacity(stripped.len());
    for word in stripped.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
