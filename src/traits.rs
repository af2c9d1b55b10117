// Seams between the topic count search and the numerical engines it drives.
//
// The selector only needs to fit a model for a given topic count, read the
// top terms back out of it, and score it. Keeping those behind traits lets the
// search be tested with scripted models and scores.

use crate::corpus::{Corpus, Dictionary};
use crate::error::Result;

/// Read access to a fitted topic model's term weights.
pub trait TopicTerms {
    fn num_topics(&self) -> usize;

    /// The `topn` highest weighted terms of `topic`, by descending weight.
    fn top_terms(&self, topic: usize, topn: usize) -> Vec<(String, f64)>;
}

/// Fits a topic model with a fixed number of topics.
pub trait TopicModeler: Sync {
    type Model: TopicTerms + Send;

    fn fit(&self, corpus: &Corpus, num_topics: usize, passes: usize) -> Result<Self::Model>;
}

/// Scores how coherent a fitted model's topics are against reference text.
pub trait CoherenceMeasure: Sync {
    fn coherence<M: TopicTerms>(&self, model: &M, texts: &[String], dictionary: &Dictionary) -> Result<f64>;
}
