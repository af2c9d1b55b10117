use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::stopwords::StopwordSource;

/// Pipeline configuration loaded from environment variables.
///
/// Call `dotenvy::dotenv()` first to pick up a `.env` file. Command-line
/// flags are applied on top of this by the binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Language code of the segment to analyze
    pub language: String,
    pub min_topics: usize,
    pub max_topics: usize,
    /// Training passes per fit
    pub passes: usize,
    /// Gibbs sweeps per pass
    pub iterations: usize,
    /// Base seed for the topic model; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub stopwords: StopwordSource,
    /// Score candidate topic counts concurrently
    pub parallel: bool,
    /// Words listed per topic
    pub top_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: "en".to_string(),
            min_topics: 2,
            max_topics: 10,
            passes: 10,
            iterations: 50,
            seed: None,
            stopwords: StopwordSource::Nltk,
            parallel: true,
            top_words: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            language: parse_var("PATENT_TOPICS_LANGUAGE")?.unwrap_or(defaults.language),
            min_topics: parse_var("PATENT_TOPICS_MIN_TOPICS")?.unwrap_or(defaults.min_topics),
            max_topics: parse_var("PATENT_TOPICS_MAX_TOPICS")?.unwrap_or(defaults.max_topics),
            passes: parse_var("PATENT_TOPICS_PASSES")?.unwrap_or(defaults.passes),
            iterations: parse_var("PATENT_TOPICS_ITERATIONS")?.unwrap_or(defaults.iterations),
            seed: parse_var("PATENT_TOPICS_SEED")?,
            stopwords: parse_var("PATENT_TOPICS_STOPWORDS")?.unwrap_or(defaults.stopwords),
            parallel: parse_var("PATENT_TOPICS_PARALLEL")?.unwrap_or(defaults.parallel),
            top_words: parse_var("PATENT_TOPICS_TOP_WORDS")?.unwrap_or(defaults.top_words),
        })
    }
}

/// Parse an optional environment variable. Unset or empty means `None`.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid value '{raw}' for {name}")),
        _ => Ok(None),
    }
}
