//! Text helpers for line and block assembly.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{is_nfc, UnicodeNormalization};

/// Bullet glyph, `1.`/`1)` or `(1)` at the start of a line.
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[•◦▪▫▸►‣⁃∙·■□◆◇➤✓*\-–]\s+|\d{1,3}[.)]\s+|\(\d{1,3}\)\s+)")
        .expect("valid list marker regex")
});

/// `Table 3`, `Figure 1`, `Fig. 2` and so on.
static CAPTION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:table|figure|fig\.?)\s*\d").expect("valid caption regex"));

const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// NFC-normalize `text` and expand typographic ligatures.
///
/// Borrows when the text is already clean.
pub fn normalize(text: &str) -> Cow<'_, str> {
    let has_ligature = text.chars().any(|c| ligature(c).is_some());
    if !has_ligature && is_nfc(text) {
        return Cow::Borrowed(text);
    }

    let mut expanded = String::with_capacity(text.len());
    for c in text.chars() {
        match ligature(c) {
            Some(replacement) => expanded.push_str(replacement),
            None => expanded.push(c),
        }
    }
    Cow::Owned(expanded.nfc().collect())
}

fn ligature(c: char) -> Option<&'static str> {
    LIGATURES
        .iter()
        .find(|(lig, _)| *lig == c)
        .map(|(_, replacement)| *replacement)
}

/// Check if the text starts with a bullet or numbering token.
pub fn starts_with_list_marker(text: &str) -> bool {
    LIST_MARKER.is_match(text)
}

/// Check if the text starts like a table or figure caption.
pub fn has_caption_prefix(text: &str) -> bool {
    CAPTION_PREFIX.is_match(text)
}

/// Check if a character belongs to a script written without word spaces.
///
/// Hangul is excluded: Korean separates words with spaces.
pub fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        // Hiragana, Katakana
        || (0x3040..=0x30FF).contains(&code)
        // CJK symbols and punctuation
        || (0x3000..=0x303F).contains(&code)
        // Fullwidth forms
        || (0xFF00..=0xFFEF).contains(&code)
}

/// Check whether a space belongs between two adjacent text pieces.
///
/// False when either side already carries whitespace at the seam or when
/// both sides of the seam are spaceless-script characters.
pub fn needs_separator(prev: &str, next: &str) -> bool {
    let (Some(last), Some(first)) = (prev.chars().last(), next.chars().next()) else {
        return false;
    };
    if last.is_whitespace() || first.is_whitespace() {
        return false;
    }
    !(is_spaceless_script_char(last) && is_spaceless_script_char(first))
}

/// Check whether `prev` ends in a word broken by a hyphen that `next` continues.
pub fn is_hyphenated_break(prev: &str, next: &str) -> bool {
    let mut tail = prev.chars().rev();
    let ends_with_hyphen = tail.next() == Some('-');
    let letter_before = tail.next().is_some_and(|c| c.is_alphabetic());
    let letter_after = next.chars().next().is_some_and(|c| c.is_alphabetic());
    ends_with_hyphen && letter_before && letter_after
}

/// Join the texts of consecutive lines into one block text.
///
/// Lines are separated by one space, except across a hyphenated break (the
/// hyphen is dropped) and between spaceless-script characters.
pub fn join_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> String {
    let mut result = String::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if result.is_empty() {
            result.push_str(line);
        } else if is_hyphenated_break(&result, line) {
            result.pop();
            result.push_str(line);
        } else {
            if needs_separator(&result, line) {
                result.push(' ');
            }
            result.push_str(line);
        }
    }

    result
}
