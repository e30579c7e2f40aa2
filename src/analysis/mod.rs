// Text analysis over extracted package data.
// Produces the "favorite words" summary shown on the stats page.

pub mod words;

pub use words::{
    FAVORITE_WORDS_LIMIT, FLATTEN_DEPTH, FrequencyEntry, TokenTree, favorite_words, rank,
    rank_tokens,
};
