use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::Corpus;
use crate::error::{Result, TopicError};
use crate::traits::{TopicModeler, TopicTerms};

/// One topic of a fitted model with its highest weighted words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeledTopic {
    pub id: usize,
    pub words: Vec<(String, f64)>, // Word and its weight in this topic
}

#[derive(Debug, Clone)]
pub struct LDAConfig {
    pub iterations: usize, // Gibbs sweeps per pass
    pub alpha: Option<f64>, // Document-topic concentration, 1/k when unset
    pub eta: Option<f64>,   // Topic-word concentration, 1/k when unset
    pub seed: Option<u64>,
}

impl Default for LDAConfig {
    fn default() -> Self {
        LDAConfig {
            iterations: 50,
            alpha: None,
            eta: None,
            seed: None,
        }
    }
}

/// A fitted LDA model.
#[derive(Debug, Clone)]
pub struct LDAModel {
    pub num_topics: usize,
    pub alpha: f64,
    pub eta: f64,
    pub vocabulary: Vec<String>,
    pub word_topic_counts: Vec<Vec<usize>>, // Words x Topics
    pub doc_topic_counts: Vec<Vec<usize>>,  // Documents x Topics
    pub topic_counts: Vec<usize>,
}

impl LDAModel {
    /// Probability of every vocabulary word under `topic`, indexed by word id.
    pub fn topic_word_distribution(&self, topic: usize) -> Vec<f64> {
        let denominator = self.topic_counts[topic] as f64 + self.vocabulary.len() as f64 * self.eta;
        self.word_topic_counts
            .iter()
            .map(|counts| (counts[topic] as f64 + self.eta) / denominator)
            .collect()
    }

    /// Top `topn` words of a topic, highest weight first. Equal weights keep
    /// word id order.
    pub fn show_topic(&self, topic: usize, topn: usize) -> Vec<(String, f64)> {
        if topic >= self.num_topics {
            return Vec::new();
        }

        let mut weighted: Vec<(usize, f64)> = self
            .topic_word_distribution(topic)
            .into_iter()
            .enumerate()
            .collect();
        weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        weighted.truncate(topn);

        weighted
            .into_iter()
            .map(|(word_id, weight)| (self.vocabulary[word_id].clone(), weight))
            .collect()
    }

    /// Every topic with its top words, in topic id order.
    pub fn topics(&self, topn: usize) -> Vec<ModeledTopic> {
        (0..self.num_topics)
            .map(|id| ModeledTopic {
                id,
                words: self.show_topic(id, topn),
            })
            .collect()
    }

    /// Topic proportions of a training document.
    pub fn document_topics(&self, doc: usize) -> Vec<f64> {
        let Some(counts) = self.doc_topic_counts.get(doc) else {
            return Vec::new();
        };
        let total: usize = counts.iter().sum();
        let denominator = total as f64 + self.num_topics as f64 * self.alpha;
        counts
            .iter()
            .map(|&count| (count as f64 + self.alpha) / denominator)
            .collect()
    }

    /// Log-likelihood of the current assignments.
    pub fn log_likelihood(&self) -> f64 {
        let mut ll = 0.0;

        for topic in 0..self.num_topics {
            let distribution = self.topic_word_distribution(topic);
            for (word_id, counts) in self.word_topic_counts.iter().enumerate() {
                if counts[topic] > 0 {
                    ll += counts[topic] as f64 * distribution[word_id].ln();
                }
            }
        }

        for doc in 0..self.doc_topic_counts.len() {
            let proportions = self.document_topics(doc);
            for (topic, &count) in self.doc_topic_counts[doc].iter().enumerate() {
                if count > 0 {
                    ll += count as f64 * proportions[topic].ln();
                }
            }
        }

        ll
    }
}

impl TopicTerms for LDAModel {
    fn num_topics(&self) -> usize {
        self.num_topics
    }

    fn top_terms(&self, topic: usize, topn: usize) -> Vec<(String, f64)> {
        self.show_topic(topic, topn)
    }
}

/// LDA fitted by collapsed Gibbs sampling.
pub struct GibbsLDA {
    config: LDAConfig,
}

impl GibbsLDA {
    pub fn new(config: LDAConfig) -> Self {
        GibbsLDA { config }
    }

    pub fn config(&self) -> &LDAConfig {
        &self.config
    }

    fn rng_for(&self, num_topics: usize) -> StdRng {
        // Each topic count gets its own stream so a refit at the same count
        // replays the same draws.
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(num_topics as u64)),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn fit_corpus(&self, corpus: &Corpus, num_topics: usize, passes: usize) -> Result<LDAModel> {
        if num_topics == 0 {
            return Err(TopicError::Model("number of topics must be positive".into()));
        }
        if corpus.num_tokens() == 0 {
            return Err(TopicError::EmptyCorpus);
        }

        let alpha = self.config.alpha.unwrap_or(1.0 / num_topics as f64);
        let eta = self.config.eta.unwrap_or(1.0 / num_topics as f64);
        if alpha <= 0.0 || eta <= 0.0 {
            return Err(TopicError::Model(format!(
                "priors must be positive (alpha={alpha}, eta={eta})"
            )));
        }

        // Step 1: Expand bags of words into token positions
        let word_docs: Vec<Vec<usize>> = corpus
            .documents
            .iter()
            .map(|bow| {
                bow.iter()
                    .flat_map(|&(word_id, count)| std::iter::repeat(word_id).take(count))
                    .collect()
            })
            .collect();

        let vocab_size = corpus.num_terms();
        let num_docs = word_docs.len();
        let mut rng = self.rng_for(num_topics);

        // Step 2: Random initialization
        let mut word_topic_counts = vec![vec![0usize; num_topics]; vocab_size];
        let mut doc_topic_counts = vec![vec![0usize; num_topics]; num_docs];
        let mut topic_counts = vec![0usize; num_topics];
        let mut doc_word_topics: Vec<Vec<usize>> = Vec::with_capacity(num_docs);

        for (doc_id, doc) in word_docs.iter().enumerate() {
            let mut word_topics = Vec::with_capacity(doc.len());
            for &word_id in doc {
                let topic = rng.random_range(0..num_topics);
                word_topic_counts[word_id][topic] += 1;
                doc_topic_counts[doc_id][topic] += 1;
                topic_counts[topic] += 1;
                word_topics.push(topic);
            }
            doc_word_topics.push(word_topics);
        }

        // Step 3: Gibbs sweeps
        let sweeps = passes * self.config.iterations;
        let eta_sum = vocab_size as f64 * eta;
        let mut probs = vec![0.0f64; num_topics];

        for _ in 0..sweeps {
            for (doc_id, doc) in word_docs.iter().enumerate() {
                for (word_pos, &word_id) in doc.iter().enumerate() {
                    let old_topic = doc_word_topics[doc_id][word_pos];

                    // Remove current assignment
                    word_topic_counts[word_id][old_topic] -= 1;
                    doc_topic_counts[doc_id][old_topic] -= 1;
                    topic_counts[old_topic] -= 1;

                    let mut total = 0.0;
                    for (topic, prob) in probs.iter_mut().enumerate() {
                        *prob = (doc_topic_counts[doc_id][topic] as f64 + alpha)
                            * (word_topic_counts[word_id][topic] as f64 + eta)
                            / (topic_counts[topic] as f64 + eta_sum);
                        total += *prob;
                    }
                    let new_topic = sample_index(&probs, total, &mut rng);

                    // Add new assignment
                    word_topic_counts[word_id][new_topic] += 1;
                    doc_topic_counts[doc_id][new_topic] += 1;
                    topic_counts[new_topic] += 1;
                    doc_word_topics[doc_id][word_pos] = new_topic;
                }
            }
        }

        let model = LDAModel {
            num_topics,
            alpha,
            eta,
            vocabulary: corpus.dictionary.tokens().to_vec(),
            word_topic_counts,
            doc_topic_counts,
            topic_counts,
        };

        debug!(
            num_topics,
            sweeps,
            vocab_size,
            log_likelihood = model.log_likelihood(),
            "Fitted LDA model"
        );
        Ok(model)
    }
}

impl TopicModeler for GibbsLDA {
    type Model = LDAModel;

    fn fit(&self, corpus: &Corpus, num_topics: usize, passes: usize) -> Result<LDAModel> {
        self.fit_corpus(corpus, num_topics, passes)
    }
}

fn sample_index(probs: &[f64], total: f64, rng: &mut StdRng) -> usize {
    let threshold = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (index, &prob) in probs.iter().enumerate() {
        cumulative += prob;
        if cumulative > threshold {
            return index;
        }
    }
    probs.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(text: &str) -> Corpus {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        Corpus::from_tokens(&tokens).unwrap()
    }

    fn seeded(seed: u64) -> GibbsLDA {
        GibbsLDA::new(LDAConfig {
            iterations: 20,
            seed: Some(seed),
            ..LDAConfig::default()
        })
    }

    #[test]
    fn test_fit_shapes() {
        let corpus = corpus("valve seat spring valve housing seat valve");
        let model = seeded(7).fit_corpus(&corpus, 3, 2).unwrap();

        assert_eq!(model.num_topics, 3);
        assert_eq!(model.vocabulary.len(), 4);
        assert_eq!(model.word_topic_counts.len(), 4);
        assert_eq!(model.topic_counts.iter().sum::<usize>(), 7);
        assert_eq!(model.doc_topic_counts[0].iter().sum::<usize>(), 7);
        assert!((model.alpha - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_distributions_sum_to_one() {
        let corpus = corpus("pump motor pump shaft motor bearing pump");
        let model = seeded(1).fit_corpus(&corpus, 2, 3).unwrap();

        for topic in 0..2 {
            let sum: f64 = model.topic_word_distribution(topic).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "topic {topic} sums to {sum}");
        }
        let doc_sum: f64 = model.document_topics(0).iter().sum();
        assert!((doc_sum - 1.0).abs() < 1e-9);
        assert!(model.log_likelihood() < 0.0);
    }

    #[test]
    fn test_show_topic_descending() {
        let corpus = corpus("a b c a b a d e f a");
        let model = seeded(3).fit_corpus(&corpus, 2, 2).unwrap();

        let words = model.show_topic(0, 4);
        assert_eq!(words.len(), 4);
        assert!(words.windows(2).all(|w| w[0].1 >= w[1].1));
        assert!(model.show_topic(5, 4).is_empty());
        assert_eq!(model.topics(3).len(), 2);
    }

    #[test]
    fn test_seed_reproduces_fit() {
        let corpus = corpus("gear tooth gear shaft tooth wheel gear");
        let first = seeded(42).fit_corpus(&corpus, 3, 2).unwrap();
        let second = seeded(42).fit_corpus(&corpus, 3, 2).unwrap();
        assert_eq!(first.word_topic_counts, second.word_topic_counts);
    }

    #[test]
    fn test_invalid_topic_count() {
        let corpus = corpus("a b");
        assert!(seeded(0).fit_corpus(&corpus, 0, 1).is_err());
    }

    #[test]
    fn test_sample_index_picks_only_positive_mass() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert_eq!(sample_index(&[0.0, 2.0, 0.0], 2.0, &mut rng), 1);
        }
    }
}
