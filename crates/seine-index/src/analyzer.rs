//! Text analysis: tokenize, drop stop words, stem.
//!
//! Positional indices are assigned **before** filtering, so stop words and
//! tokens that stem to nothing still consume a position. The phrase matcher
//! relies on this being the one and only discipline: a document position
//! recorded here is directly comparable to any other position recorded here.

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Characters that form tokens; everything else separates them.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Load a stop-word file: one word per line, trimmed, blank lines ignored.
/// Matching is case-sensitive against already-lower-cased tokens, so the
/// file is expected to hold lower-case entries.
pub fn load_stop_words(path: &Path) -> io::Result<HashSet<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Shared tokenizer + stemmer used by both indexing and query parsing.
pub struct Analyzer {
    stemmer: Stemmer,
    stop_words: HashSet<String>,
}

impl Analyzer {
    pub fn new(stop_words: HashSet<String>) -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stop_words,
        }
    }

    /// Build an analyzer from a stop-word file. An unreadable file is not
    /// fatal: indexing proceeds with an empty stop-word set.
    pub fn with_stop_words_file(path: &Path) -> Self {
        match load_stop_words(path) {
            Ok(stop_words) => {
                debug!(path = %path.display(), count = stop_words.len(), "loaded stop words");
                Self::new(stop_words)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "stop-word file unreadable, continuing without");
                Self::new(HashSet::new())
            }
        }
    }

    #[inline]
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Analyze a body of text into `(position, stem)` pairs.
    ///
    /// Tokens are runs of word characters in the lower-cased text. The
    /// position counter advances for every token, including stop words,
    /// tokens stemming to nothing, and the empty token produced when the
    /// text opens with a separator. Only surviving stems are emitted.
    pub fn analyze(&self, text: &str) -> Vec<(u32, String)> {
        let lowered = text.to_lowercase();
        let mut position: u32 = match lowered.chars().next() {
            Some(c) if !is_word_char(c) => 1,
            _ => 0,
        };

        let mut out = Vec::new();
        for token in lowered.split(|c| !is_word_char(c)).filter(|t| !t.is_empty()) {
            let current = position;
            position += 1;
            if self.stop_words.contains(token) {
                continue;
            }
            let stem = self.stemmer.stem(token);
            if stem.is_empty() {
                continue;
            }
            out.push((current, stem.into_owned()));
        }
        out
    }

    /// Normalize a single already-split token the same way [`analyze`] would:
    /// lower-case, stop-filter, stem. `None` when the token is filtered out.
    ///
    /// [`analyze`]: Analyzer::analyze
    pub fn stem_token(&self, token: &str) -> Option<String> {
        let lowered = token.to_lowercase();
        if lowered.is_empty() || self.stop_words.contains(lowered.as_str()) {
            return None;
        }
        let stem = self.stemmer.stem(&lowered);
        if stem.is_empty() {
            None
        } else {
            Some(stem.into_owned())
        }
    }
}
