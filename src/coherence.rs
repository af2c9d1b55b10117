// C_v coherence over boolean sliding windows.

use std::collections::HashMap;

use tracing::debug;

use crate::corpus::Dictionary;
use crate::error::Result;
use crate::traits::{CoherenceMeasure, TopicTerms};

const EPSILON: f64 = 1e-12;

#[derive(Debug, Clone)]
pub struct CvCoherence {
    pub window_size: usize,
    pub topn: usize,
}

impl Default for CvCoherence {
    fn default() -> Self {
        CvCoherence {
            window_size: 110,
            topn: 20,
        }
    }
}

/// Window occurrence counts for a fixed set of words, indexed by slot.
#[derive(Debug, Clone)]
pub struct WindowCounts {
    pub num_windows: usize,
    pub occurrences: Vec<usize>,
    pub co_occurrences: Vec<Vec<usize>>,
}

impl WindowCounts {
    /// Count occurrences over sliding windows of `window_size` positions.
    /// `slots[i]` is the slot of the token at position `i`, or `None` if that
    /// token is not tracked. A text shorter than the window is one window.
    pub fn accumulate(slots: &[Option<usize>], num_slots: usize, window_size: usize) -> Self {
        let mut counts = WindowCounts {
            num_windows: 0,
            occurrences: vec![0; num_slots],
            co_occurrences: vec![vec![0; num_slots]; num_slots],
        };
        if slots.is_empty() {
            return counts;
        }

        let window_size = window_size.max(1).min(slots.len());
        let mut in_window = vec![0usize; num_slots];
        for slot in slots[..window_size].iter().flatten() {
            in_window[*slot] += 1;
        }
        counts.record(&in_window);

        for end in window_size..slots.len() {
            if let Some(slot) = slots[end - window_size] {
                in_window[slot] -= 1;
            }
            if let Some(slot) = slots[end] {
                in_window[slot] += 1;
            }
            counts.record(&in_window);
        }

        counts
    }

    fn record(&mut self, in_window: &[usize]) {
        let present: Vec<usize> = in_window
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(slot, _)| slot)
            .collect();

        for (i, &a) in present.iter().enumerate() {
            self.occurrences[a] += 1;
            for &b in &present[i + 1..] {
                self.co_occurrences[a][b] += 1;
                self.co_occurrences[b][a] += 1;
            }
        }
        self.num_windows += 1;
    }

    fn joint(&self, a: usize, b: usize) -> usize {
        if a == b {
            self.occurrences[a]
        } else {
            self.co_occurrences[a][b]
        }
    }

    /// Normalized pointwise mutual information of two slots.
    pub fn npmi(&self, a: usize, b: usize) -> f64 {
        let n = self.num_windows as f64;
        let p_a = self.occurrences[a] as f64 / n;
        let p_b = self.occurrences[b] as f64 / n;
        if p_a == 0.0 || p_b == 0.0 {
            return 0.0;
        }

        let p_ab = self.joint(a, b) as f64 / n + EPSILON;
        (p_ab / (p_a * p_b)).ln() / -p_ab.ln()
    }
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Mean indirect cosine similarity of each word against the full word set.
fn topic_coherence(topic: &[usize], counts: &WindowCounts) -> f64 {
    let context_vectors: Vec<Vec<f64>> = topic
        .iter()
        .map(|&w| topic.iter().map(|&other| counts.npmi(w, other)).collect())
        .collect();

    let mut set_vector = vec![0.0; topic.len()];
    for vector in &context_vectors {
        for (total, value) in set_vector.iter_mut().zip(vector) {
            *total += value;
        }
    }

    let sum: f64 = context_vectors
        .iter()
        .map(|vector| cosine(vector, &set_vector))
        .sum();
    sum / topic.len() as f64
}

impl CoherenceMeasure for CvCoherence {
    fn coherence<M: TopicTerms>(&self, model: &M, texts: &[String], dictionary: &Dictionary) -> Result<f64> {
        // Map every top word onto a dense slot
        let mut slot_of: HashMap<usize, usize> = HashMap::new();
        let topics: Vec<Vec<usize>> = (0..model.num_topics())
            .map(|topic| {
                model
                    .top_terms(topic, self.topn)
                    .iter()
                    .filter_map(|(word, _)| dictionary.id(word))
                    .map(|id| {
                        let next = slot_of.len();
                        *slot_of.entry(id).or_insert(next)
                    })
                    .collect::<Vec<usize>>()
            })
            .filter(|topic| !topic.is_empty())
            .collect();

        if topics.is_empty() {
            return Ok(0.0);
        }

        let slots: Vec<Option<usize>> = texts
            .iter()
            .map(|token| dictionary.id(token).and_then(|id| slot_of.get(&id).copied()))
            .collect();
        let counts = WindowCounts::accumulate(&slots, slot_of.len(), self.window_size);
        if counts.num_windows == 0 {
            return Ok(0.0);
        }

        let per_topic: Vec<f64> = topics
            .iter()
            .map(|topic| topic_coherence(topic, &counts))
            .collect();
        let score = per_topic.iter().sum::<f64>() / per_topic.len() as f64;

        debug!(
            topics = per_topic.len(),
            windows = counts.num_windows,
            coherence = score,
            "Computed c_v coherence"
        );
        Ok(score)
    }
}
