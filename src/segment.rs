//! Sentence segmentation.
//!
//! Splits raw input into whitespace-separated words and each word into
//! letter tokens, pulling known digraphs out before falling back to single
//! characters. Characters outside the alphabet are silently dropped; words
//! left empty by that filtering are dropped from the sentence.

use crate::letters::is_valid_letter;
use once_cell::sync::Lazy;
use regex::Regex;

/// Unanchored digraph search. The first occurrence anywhere in the word is
/// split out, wherever it falls; with several digraphs starting at the same
/// position the earlier alternative wins.
static DIGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(th|ph|wh|gh|ch|sh|qu|ng)").expect("valid digraph regex"));

/// Splits a word into letter tokens, digraphs first.
///
/// The digraph search is substring-based, not anchored to token boundaries:
/// the leftmost digraph occurrence is split out wherever it first appears,
/// the characters before it become single-character tokens and the rest of
/// the word is split the same way. Case is preserved per token.
pub fn split_word_to_chars(word: &str) -> Vec<String> {
    match DIGRAPH_RE.find(word) {
        Some(m) => {
            let mut tokens: Vec<String> = word[..m.start()]
                .chars()
                .map(|c| c.to_string())
                .collect();
            tokens.push(m.as_str().to_string());
            tokens.extend(split_word_to_chars(&word[m.end()..]));
            tokens
        }
        None => word.chars().map(|c| c.to_string()).collect(),
    }
}

/// Splits a sentence into words of validated letter tokens.
///
/// Tokens that are not valid letters are filtered out of their word, and
/// words that end up empty are dropped entirely.
pub fn segment_sentence(text: &str) -> Vec<Vec<String>> {
    text.split_whitespace()
        .map(|word| {
            split_word_to_chars(word)
                .into_iter()
                .filter(|token| is_valid_letter(token))
                .collect::<Vec<String>>()
        })
        .filter(|word| !word.is_empty())
        .collect()
}
