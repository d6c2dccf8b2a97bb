//! Query parsing: bare terms and quoted phrases.

use seine_index::analyzer::{is_word_char, Analyzer};

/// Hard cap on word tokens considered per query, counting each word inside
/// a quoted span as one.
pub const MAX_QUERY_TOKENS: usize = 10;

/// Quoted phrases keep at most this many stems.
pub const MAX_PHRASE_STEMS: usize = 3;

/// An ordered list of stems. Bare query words become single-stem phrases.
pub type Phrase = Vec<String>;

/// Parse a raw query into phrases.
///
/// Quote handling is forgiving: an unbalanced `"` is treated as closed at
/// the end of the string. Stop words are dropped from phrases, phrases that
/// lose every token are discarded, and parsing stops after
/// [`MAX_QUERY_TOKENS`] word tokens.
pub fn parse(raw: &str, analyzer: &Analyzer) -> Vec<Phrase> {
    let mut phrases = Vec::new();
    let mut budget = MAX_QUERY_TOKENS;

    for (index, segment) in raw.split('"').enumerate() {
        let quoted = index % 2 == 1;
        let mut current = Phrase::new();

        for word in segment.split(|c| !is_word_char(c)).filter(|w| !w.is_empty()) {
            if budget == 0 {
                break;
            }
            budget -= 1;

            let Some(stem) = analyzer.stem_token(word) else {
                continue;
            };
            if quoted {
                current.push(stem);
            } else {
                phrases.push(vec![stem]);
            }
        }

        if quoted && !current.is_empty() {
            current.truncate(MAX_PHRASE_STEMS);
            phrases.push(current);
        }
        if budget == 0 {
            break;
        }
    }

    phrases
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn analyzer() -> Analyzer {
        let stop_words: HashSet<String> =
            ["the", "a", "of"].iter().map(|w| w.to_string()).collect();
        Analyzer::new(stop_words)
    }

    #[test]
    fn bare_words_become_single_stem_phrases() {
        let phrases = parse("apples oranges", &analyzer());
        assert_eq!(phrases, vec![vec!["appl".to_string()], vec!["orang".to_string()]]);
    }

    #[test]
    fn quoted_spans_become_one_phrase() {
        let phrases = parse(r#"banana "quick brown fox""#, &analyzer());
        assert_eq!(
            phrases,
            vec![
                vec!["banana".to_string()],
                vec!["quick".to_string(), "brown".to_string(), "fox".to_string()],
            ]
        );
    }

    #[test]
    fn stop_words_vanish_from_phrases() {
        let phrases = parse(r#""the quick brown""#, &analyzer());
        assert_eq!(phrases, vec![vec!["quick".to_string(), "brown".to_string()]]);
    }

    #[test]
    fn all_stop_word_phrases_are_discarded() {
        assert!(parse(r#""the a of" the"#, &analyzer()).is_empty());
        assert!(parse("", &analyzer()).is_empty());
        assert!(parse("   ", &analyzer()).is_empty());
    }

    #[test]
    fn phrases_are_capped_at_three_stems() {
        let phrases = parse(r#""quick brown fox jumps high""#, &analyzer());
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].len(), MAX_PHRASE_STEMS);
        assert_eq!(phrases[0][2], "fox");
    }

    #[test]
    fn queries_are_capped_at_ten_word_tokens() {
        let raw = "w1 w2 w3 w4 w5 w6 w7 w8 w9 w10 w11 w12";
        let phrases = parse(raw, &analyzer());
        assert_eq!(phrases.len(), MAX_QUERY_TOKENS);
        assert_eq!(phrases.last().unwrap(), &vec!["w10".to_string()]);
    }

    #[test]
    fn quoted_words_count_against_the_cap_individually() {
        let raw = r#"w1 w2 w3 w4 w5 w6 w7 w8 "w9 w10 w11""#;
        let phrases = parse(raw, &analyzer());
        // The quoted phrase is cut short when the budget runs out.
        assert_eq!(phrases.len(), 9);
        assert_eq!(phrases[8], vec!["w9".to_string(), "w10".to_string()]);
    }

    #[test]
    fn unbalanced_quotes_close_at_end_of_string() {
        let phrases = parse(r#"apple "quick brown"#, &analyzer());
        assert_eq!(
            phrases,
            vec![
                vec!["appl".to_string()],
                vec!["quick".to_string(), "brown".to_string()],
            ]
        );
    }

    #[test]
    fn punctuation_separates_words() {
        let phrases = parse("apples,oranges", &analyzer());
        assert_eq!(phrases.len(), 2);
    }
}
