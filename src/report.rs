use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::selection::CandidateScore;
use crate::topic_modeling::ModeledTopic;

/// Everything the pipeline found about one document.
#[derive(Debug, Clone, Serialize)]
pub struct TopicReport {
    pub source: Option<String>,
    pub language: String,
    pub generated_at: DateTime<Utc>,
    pub token_count: usize,
    pub vocabulary_size: usize,
    pub optimal_num_topics: usize,
    pub candidates: Vec<CandidateScore>,
    /// Share of the document assigned to each topic by the final model
    pub topic_prevalence: Vec<f64>,
    pub topics: Vec<ModeledTopic>,
}

impl TopicReport {
    pub fn coherence_of_best(&self) -> Option<f64> {
        self.candidates
            .iter()
            .find(|c| c.num_topics == self.optimal_num_topics)
            .map(|c| c.coherence)
    }

    pub fn print_summary(&self) {
        println!("Optimal number of topics: {}", self.optimal_num_topics);
        for topic in &self.topics {
            println!("📝 Topic {}:", topic.id);
            for (word, weight) in &topic.words {
                println!("   - {}: {:.4}", word, weight);
            }
        }
    }

    pub fn print_candidates(&self) {
        println!("📊 Coherence by number of topics:");
        for candidate in &self.candidates {
            let marker = if candidate.num_topics == self.optimal_num_topics { "✓" } else { " " };
            println!("   {} {:>3}  c_v: {:.4}", marker, candidate.num_topics, candidate.coherence);
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
