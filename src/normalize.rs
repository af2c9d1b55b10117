use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::debug;

use crate::lemmatize::{Lemmatizer, MorphyLemmatizer};
use crate::stopwords::StopwordSet;

fn special_characters() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s-]").expect("static pattern compiles"))
}

/// Remove everything except ASCII letters, digits, whitespace and hyphens.
pub fn strip_special_characters(text: &str) -> String {
    special_characters().replace_all(text, "").into_owned()
}

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// All unigrams followed by the space-joined n-grams of every size up to `n`,
/// each group in left-to-right order.
pub fn generate_ngrams(words: &[String], n: usize) -> Vec<String> {
    let mut ngrams = words.to_vec();
    for size in 2..=n {
        ngrams.extend(words.windows(size).map(|window| window.join(" ")));
    }
    ngrams
}

pub fn remove_stopwords(tokens: Vec<String>, stopwords: &StopwordSet) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|token| !stopwords.contains(token))
        .collect()
}

/// Lemmatize single words directly and every word of an n-gram separately.
pub fn lemmatize_ngrams(tokens: &[String], lemmatizer: &dyn Lemmatizer) -> Vec<String> {
    tokens
        .iter()
        .map(|token| {
            token
                .split_whitespace()
                .map(|word| lemmatizer.lemmatize(word))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[derive(Clone)]
pub struct Normalizer {
    stopwords: StopwordSet,
    lemmatizer: Arc<dyn Lemmatizer>,
    max_ngram: usize,
}

impl Normalizer {
    pub fn new(stopwords: StopwordSet, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Normalizer {
            stopwords,
            lemmatizer,
            max_ngram: 2,
        }
    }

    pub fn max_ngram(mut self, n: usize) -> Self {
        self.max_ngram = n.max(1);
        self
    }

    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned = lowercase(&strip_special_characters(text));
        let words = split_words(&cleaned);
        let tokens = generate_ngrams(&words, self.max_ngram);
        let generated = tokens.len();
        let tokens = remove_stopwords(tokens, &self.stopwords);
        let tokens = lemmatize_ngrams(&tokens, self.lemmatizer.as_ref());

        debug!(
            words = words.len(),
            generated,
            kept = tokens.len(),
            "Normalized text"
        );
        tokens
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(StopwordSet::default(), Arc::new(MorphyLemmatizer::new()))
    }
}
