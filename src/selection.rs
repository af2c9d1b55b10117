use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::corpus::Corpus;
use crate::error::{Result, TopicError};
use crate::topic_modeling::ModeledTopic;
use crate::traits::{CoherenceMeasure, TopicModeler, TopicTerms};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub num_topics: usize,
    pub coherence: f64,
}

/// Outcome of a topic count search.
#[derive(Debug)]
pub struct Selection<M> {
    pub best_k: usize,
    /// The model refit at `best_k`. It is a fresh fit, not the candidate that
    /// was scored, so with an unseeded modeler it can differ from it.
    pub model: M,
    pub summaries: Vec<ModeledTopic>,
    /// Every candidate in ascending topic count order.
    pub scores: Vec<CandidateScore>,
}

#[derive(Debug, Clone)]
pub struct SelectionConfig {
    pub min_topics: usize,
    pub max_topics: usize,
    pub passes: usize,
    pub top_words: usize,
    pub parallel: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            min_topics: 2,
            max_topics: 10,
            passes: 10,
            top_words: 10,
            parallel: true,
        }
    }
}

pub struct TopicCountSelector<T, C> {
    modeler: T,
    measure: C,
    config: SelectionConfig,
}

impl<T, C> TopicCountSelector<T, C>
where
    T: TopicModeler,
    C: CoherenceMeasure,
{
    pub fn new(modeler: T, measure: C, config: SelectionConfig) -> Self {
        TopicCountSelector {
            modeler,
            measure,
            config,
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn select(&self, tokens: &[String]) -> Result<Selection<T::Model>> {
        let SelectionConfig {
            min_topics,
            max_topics,
            passes,
            top_words,
            parallel,
        } = self.config;

        if min_topics == 0 || min_topics > max_topics {
            return Err(TopicError::InvalidTopicRange {
                min: min_topics,
                max: max_topics,
            });
        }

        // Step 1: Dictionary and bag-of-words of the single document
        let corpus = Corpus::from_tokens(tokens)?;
        info!(
            tokens = tokens.len(),
            vocabulary = corpus.num_terms(),
            min_topics,
            max_topics,
            "Searching for the optimal number of topics"
        );

        // Step 2: Score every candidate count
        let mut scores: Vec<CandidateScore> = if parallel {
            (min_topics..=max_topics)
                .into_par_iter()
                .map(|k| self.score_candidate(&corpus, tokens, k))
                .collect::<Result<_>>()?
        } else {
            (min_topics..=max_topics)
                .map(|k| self.score_candidate(&corpus, tokens, k))
                .collect::<Result<_>>()?
        };
        scores.sort_by_key(|score| score.num_topics);

        // Step 3: Best count, smallest on ties
        let best_k = best_candidate(&scores)
            .map(|score| score.num_topics)
            .unwrap_or(min_topics);
        info!(best_k, "Selected number of topics");

        // Step 4: Refit at the winning count
        let model = self.modeler.fit(&corpus, best_k, passes)?;

        // Step 5: Top weighted words of every topic
        let summaries = summarize(&model, top_words);

        Ok(Selection {
            best_k,
            model,
            summaries,
            scores,
        })
    }

    fn score_candidate(&self, corpus: &Corpus, tokens: &[String], num_topics: usize) -> Result<CandidateScore> {
        let model = self.modeler.fit(corpus, num_topics, self.config.passes)?;
        let coherence = self.measure.coherence(&model, tokens, &corpus.dictionary)?;
        if coherence.is_nan() {
            warn!(num_topics, "Coherence is undefined for candidate");
        } else {
            debug!(num_topics, coherence, "Scored candidate");
        }
        Ok(CandidateScore {
            num_topics,
            coherence,
        })
    }
}

/// The candidate with the highest coherence. Scores are expected in ascending
/// topic count order; the first of several equal maxima wins. NaN never beats
/// a number.
pub fn best_candidate(scores: &[CandidateScore]) -> Option<&CandidateScore> {
    scores.iter().fold(None, |best, candidate| match best {
        Some(current) if !beats(candidate.coherence, current.coherence) => Some(current),
        _ => Some(candidate),
    })
}

fn beats(challenger: f64, current: f64) -> bool {
    match (challenger.is_nan(), current.is_nan()) {
        (true, _) => false,
        (false, true) => true,
        (false, false) => challenger > current,
    }
}

/// Topic summaries with weights rounded to three decimals.
pub fn summarize<M: TopicTerms>(model: &M, top_words: usize) -> Vec<ModeledTopic> {
    (0..model.num_topics())
        .map(|id| ModeledTopic {
            id,
            words: model
                .top_terms(id, top_words)
                .into_iter()
                .map(|(word, weight)| (word, round_weight(weight)))
                .collect(),
        })
        .collect()
}

fn round_weight(weight: f64) -> f64 {
    (weight * 1000.0).round() / 1000.0
}
