//! Answer normalization
//!
//! Submissions and accepted answers go through the same transform before
//! they are compared, so casing, stray whitespace and (optionally) accents
//! never decide whether a word counts.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Remove diacritics (é → e, ê → e, ç → c)
pub fn strip_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Trim and lowercase, then fold accents when `fold_accents` is set
pub fn normalize_answer(text: &str, fold_accents: bool) -> String {
    let lowered = text.trim().to_lowercase();
    if fold_accents {
        strip_accents(&lowered)
    } else {
        lowered
    }
}
