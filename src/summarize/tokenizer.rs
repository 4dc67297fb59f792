// src/summarize/tokenizer.rs
//! Sentence and word tokenization for the extractive summarizer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Candidate words: runs of word characters joined by inner apostrophes/hyphens.
static WORD_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+(?:['’-]\w+)*").expect("word candidate regex"));

/// A word starts with a letter and continues with letters, apostrophes or hyphens.
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\W\d_](?:[^\W\d_]|['’-])*$").expect("word regex"));

/// Lowercased tokens (without the trailing dot) that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "corp",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    "e.g", "i.e", "u.s", "u.k", "u.n", "a.m", "p.m", "approx", "dept", "est", "fig", "gen", "gov",
];

const CLOSERS: &[char] = &['"', '\'', '”', '’', ')', ']'];

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

/// The whitespace-delimited token ending at byte `end` (exclusive), lowercased.
fn token_before(text: &str, end: usize) -> String {
    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    head[start..]
        .trim_start_matches(|c: char| CLOSERS.contains(&c) || c == '(' || c == '“')
        .to_lowercase()
}

/// A period after an abbreviation or a single-letter initial does not close a sentence.
fn is_protected(token: &str) -> bool {
    let stem = token.trim_end_matches('.');
    if stem.is_empty() {
        return false;
    }
    if stem.chars().count() == 1 && stem.chars().all(char::is_alphabetic) {
        return true;
    }
    ABBREVIATIONS.contains(&stem)
}

/// Split text into trimmed, non-empty sentences.
///
/// A sentence ends at `.`, `!`, `?` or `…` (plus any closing quotes/brackets) followed
/// by whitespace, unless the period belongs to an abbreviation or initial. Blank lines
/// always end a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];

        if c == '\n' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].1.is_whitespace() && chars[j].1 != '\n' {
                j += 1;
            }
            if j < chars.len() && chars[j].1 == '\n' {
                push_trimmed(&mut out, &text[start..pos]);
                start = chars[j].0;
                i = j + 1;
                continue;
            }
        }

        if is_terminal(c) {
            let mut j = i + 1;
            while j < chars.len() && (is_terminal(chars[j].1) || CLOSERS.contains(&chars[j].1)) {
                j += 1;
            }
            let at_boundary = j >= chars.len() || chars[j].1.is_whitespace();
            let end = if j < chars.len() { chars[j].0 } else { text.len() };
            let protected = c == '.' && j == i + 1 && is_protected(&token_before(text, pos + 1));
            if at_boundary && !protected {
                push_trimmed(&mut out, &text[start..end]);
                start = end;
            }
            i = j;
            continue;
        }

        i += 1;
    }
    push_trimmed(&mut out, &text[start..]);
    out
}

fn push_trimmed(out: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}

/// Lowercased alphabetic words of a sentence. Numbers and punctuation are dropped.
pub fn words(sentence: &str) -> Vec<String> {
    WORD_CANDIDATE
        .find_iter(sentence)
        .map(|m| m.as_str())
        .filter(|w| WORD.is_match(w))
        .map(str::to_lowercase)
        .collect()
}
