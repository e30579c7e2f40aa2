// Word frequency ranking.
// Flattens nested token lists, counts occurrences, and keeps the top entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Maximum list nesting that gets flattened. Deeper lists are ignored.
pub const FLATTEN_DEPTH: usize = 3;

/// Number of entries in the favorite words summary.
pub const FAVORITE_WORDS_LIMIT: usize = 2;

/// Nested collection of extracted tokens.
///
/// Upstream extraction yields words grouped per message and per channel, and
/// some slots may be missing entirely, so leaves are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenTree {
    Token(Option<String>),
    List(Vec<TokenTree>),
}

impl From<&str> for TokenTree {
    fn from(token: &str) -> Self {
        TokenTree::Token(Some(token.to_string()))
    }
}

impl From<String> for TokenTree {
    fn from(token: String) -> Self {
        TokenTree::Token(Some(token))
    }
}

impl From<Option<String>> for TokenTree {
    fn from(token: Option<String>) -> Self {
        TokenTree::Token(token)
    }
}

impl<T: Into<TokenTree>> From<Vec<T>> for TokenTree {
    fn from(items: Vec<T>) -> Self {
        TokenTree::List(items.into_iter().map(Into::into).collect())
    }
}

/// A word and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub word: String,
    pub count: usize,
}

/// Rank the tokens in `tokens` by frequency and keep the first `k`.
///
/// Lists are flattened up to [`FLATTEN_DEPTH`] levels in left-to-right order.
/// Missing and empty tokens are skipped. Equal counts keep first-seen order.
pub fn rank(tokens: &[TokenTree], k: usize) -> Vec<FrequencyEntry> {
    let mut flat = Vec::new();
    flatten(tokens, FLATTEN_DEPTH, &mut flat);
    rank_tokens(flat, k)
}

/// The favorite words summary: the two most frequent tokens.
pub fn favorite_words(tokens: &[TokenTree]) -> Vec<FrequencyEntry> {
    rank(tokens, FAVORITE_WORDS_LIMIT)
}

/// Rank an already flat sequence of tokens.
pub fn rank_tokens<'a, I>(tokens: I, k: usize) -> Vec<FrequencyEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    if k == 0 {
        return Vec::new();
    }

    // Distinct tokens in first-seen order, with an index for lookups.
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        match index.get(token) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(k)
        .map(|(word, count)| FrequencyEntry {
            word: word.to_string(),
            count,
        })
        .collect()
}

fn flatten<'a>(items: &'a [TokenTree], depth: usize, out: &mut Vec<&'a str>) {
    for item in items {
        match item {
            TokenTree::Token(Some(token)) if !token.is_empty() => out.push(token),
            TokenTree::Token(_) => {}
            TokenTree::List(inner) if depth > 0 => flatten(inner, depth - 1, out),
            TokenTree::List(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, count: usize) -> FrequencyEntry {
        FrequencyEntry {
            word: word.to_string(),
            count,
        }
    }

    fn sample() -> Vec<TokenTree> {
        vec![
            vec!["gift", "gift", "cake"].into(),
            vec!["cake", "cake", "hat"].into(),
        ]
    }

    #[test]
    fn test_favorite_words() {
        assert_eq!(
            favorite_words(&sample()),
            vec![entry("cake", 3), entry("gift", 2)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(&[], 2).is_empty());
        assert!(favorite_words(&[TokenTree::List(vec![])]).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        assert!(rank(&sample(), 0).is_empty());
    }

    #[test]
    fn test_limit_larger_than_distinct() {
        assert_eq!(
            rank(&sample(), 10),
            vec![entry("cake", 3), entry("gift", 2), entry("hat", 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let tokens: Vec<TokenTree> = vec!["b", "a", "c", "a", "b", "c", "d"]
            .into_iter()
            .map(TokenTree::from)
            .collect();

        assert_eq!(
            rank(&tokens, 4),
            vec![entry("b", 2), entry("a", 2), entry("c", 2), entry("d", 1)]
        );
    }

    #[test]
    fn test_skips_missing_and_empty_tokens() {
        let tokens = vec![
            TokenTree::Token(None),
            "".into(),
            "hi".into(),
            TokenTree::List(vec![TokenTree::Token(None), "hi".into(), "".into()]),
        ];

        assert_eq!(rank(&tokens, 2), vec![entry("hi", 2)]);
    }

    #[test]
    fn test_flattens_three_levels_only() {
        // Three levels of lists inside the input are opened, the fourth is not.
        let reachable: TokenTree = vec![vec![vec!["kept"]]].into();
        let too_deep: TokenTree = vec![vec![vec![vec!["lost"]]]].into();

        assert_eq!(rank(&[reachable, too_deep], 5), vec![entry("kept", 1)]);
    }

    #[test]
    fn test_counts_match_occurrences() {
        let tokens = sample();
        for ranked in rank(&tokens, 10) {
            let mut flat = Vec::new();
            flatten(&tokens, FLATTEN_DEPTH, &mut flat);
            let actual = flat.iter().filter(|t| **t == ranked.word).count();
            assert_eq!(ranked.count, actual);
        }
    }

    #[test]
    fn test_rank_is_deterministic() {
        let tokens = sample();
        let first = rank(&tokens, 3);
        let second = rank(&tokens, 3);
        assert_eq!(first, second);
        assert_eq!(tokens, sample());
    }

    #[test]
    fn test_rank_flat_tokens() {
        let ranked = rank_tokens("a b b c c c".split(' '), 2);
        assert_eq!(ranked, vec![entry("c", 3), entry("b", 2)]);
    }

    #[test]
    fn test_entry_serializes_as_word_and_count() {
        let json = serde_json::to_string(&entry("cake", 3)).unwrap();
        assert_eq!(json, r#"{"word":"cake","count":3}"#);
    }
}
