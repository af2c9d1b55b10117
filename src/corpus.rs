use std::collections::HashMap;

use counter::Counter;

use crate::error::{Result, TopicError};

/// Mapping between tokens and integer ids.
///
/// Ids are handed out in sorted token order, so the same token stream always
/// produces the same dictionary.
#[derive(Debug, Clone)]
pub struct Dictionary {
    id2token: Vec<String>,
    token2id: HashMap<String, usize>,
}

impl Dictionary {
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut id2token: Vec<String> = tokens.to_vec();
        id2token.sort();
        id2token.dedup();

        let token2id = id2token
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id))
            .collect();

        Dictionary { id2token, token2id }
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token2id.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.id2token.get(id).map(String::as_str)
    }

    pub fn tokens(&self) -> &[String] {
        &self.id2token
    }

    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }

    /// Bag-of-words for a document: `(id, count)` pairs sorted by id.
    /// Tokens missing from the dictionary are ignored.
    pub fn doc2bow(&self, tokens: &[String]) -> Vec<(usize, usize)> {
        let counts: Counter<usize> = tokens.iter().filter_map(|token| self.id(token)).collect();

        let mut bow: Vec<(usize, usize)> = counts.into_iter().collect();
        bow.sort_unstable_by_key(|&(id, _)| id);
        bow
    }
}

/// A dictionary plus the bag-of-words of every document in it.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub dictionary: Dictionary,
    pub documents: Vec<Vec<(usize, usize)>>,
}

impl Corpus {
    /// Treat a single token stream as a corpus of one document.
    pub fn from_tokens(tokens: &[String]) -> Result<Self> {
        if tokens.is_empty() {
            return Err(TopicError::EmptyCorpus);
        }

        let dictionary = Dictionary::from_tokens(tokens);
        let documents = vec![dictionary.doc2bow(tokens)];
        Ok(Corpus {
            dictionary,
            documents,
        })
    }

    pub fn num_terms(&self) -> usize {
        self.dictionary.len()
    }

    pub fn num_tokens(&self) -> usize {
        self.documents
            .iter()
            .flat_map(|doc| doc.iter().map(|&(_, count)| count))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_dictionary_ids_sorted() {
        let dictionary = Dictionary::from_tokens(&tokens(&["valve", "seat", "valve seat", "seat"]));
        assert_eq!(dictionary.len(), 3);
        assert_eq!(dictionary.id("seat"), Some(0));
        assert_eq!(dictionary.id("valve"), Some(1));
        assert_eq!(dictionary.id("valve seat"), Some(2));
        assert_eq!(dictionary.token(1), Some("valve"));
        assert_eq!(dictionary.id("spring"), None);
    }

    #[test]
    fn test_doc2bow_counts() {
        let stream = tokens(&["valve", "seat", "valve", "valve"]);
        let dictionary = Dictionary::from_tokens(&stream);
        assert_eq!(dictionary.doc2bow(&stream), vec![(0, 1), (1, 3)]);
        assert_eq!(dictionary.doc2bow(&tokens(&["unknown", "seat"])), vec![(0, 1)]);
    }

    #[test]
    fn test_corpus_single_document() {
        let corpus = Corpus::from_tokens(&tokens(&["a", "b", "a"])).unwrap();
        assert_eq!(corpus.documents.len(), 1);
        assert_eq!(corpus.num_terms(), 2);
        assert_eq!(corpus.num_tokens(), 3);
    }

    #[test]
    fn test_empty_corpus_fails() {
        assert!(matches!(Corpus::from_tokens(&[]), Err(TopicError::EmptyCorpus)));
    }
}
