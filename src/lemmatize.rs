/// Reduces a single word to its dictionary base form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str) -> String;
}

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("axes", "axis"),
    ("bases", "base"),
    ("children", "child"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("data", "datum"),
    ("dice", "die"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("hypotheses", "hypothesis"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lice", "louse"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("media", "medium"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("phenomena", "phenomenon"),
    ("selves", "self"),
    ("series", "series"),
    ("shelves", "shelf"),
    ("species", "species"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("vertices", "vertex"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Endings of singular nouns that the `s` rule must not touch.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is"];

// Words ending in `s` that are not plurals. Sorted for binary search.
const UNINFLECTED: &[&str] = &[
    "afterwards",
    "alias",
    "always",
    "atlas",
    "backwards",
    "besides",
    "bias",
    "canvas",
    "chaos",
    "downwards",
    "electronics",
    "ethos",
    "forwards",
    "hydraulics",
    "lens",
    "mathematics",
    "news",
    "perhaps",
    "pneumatics",
    "sideways",
    "sometimes",
    "towards",
    "upwards",
    "whereas",
];

// Plurals formed with `es` on a stem that already ends in `s`. Sorted.
const SES_PLURALS: &[&str] = &[
    "aliases",
    "apparatuses",
    "atlases",
    "biases",
    "bonuses",
    "buses",
    "campuses",
    "canvases",
    "censuses",
    "circuses",
    "focuses",
    "gases",
    "lenses",
    "minuses",
    "statuses",
    "surpluses",
    "viruses",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct MorphyLemmatizer;

impl MorphyLemmatizer {
    pub fn new() -> Self {
        MorphyLemmatizer
    }

    fn lemmatize_simple(&self, word: &str) -> String {
        if let Ok(idx) = NOUN_EXCEPTIONS.binary_search_by(|(form, _)| form.cmp(&word)) {
            return NOUN_EXCEPTIONS[idx].1.to_string();
        }

        if word.len() <= 3 || !word.ends_with('s') {
            return word.to_string();
        }
        if SINGULAR_ENDINGS.iter().any(|ending| word.ends_with(ending)) {
            return word.to_string();
        }
        if UNINFLECTED.binary_search(&word).is_ok() {
            return word.to_string();
        }

        let detach = |suffix: &str, replacement: &str| -> String {
            format!("{}{}", &word[..word.len() - suffix.len()], replacement)
        };

        if SES_PLURALS.binary_search(&word).is_ok() || word.ends_with("sses") || word.ends_with("zzes") {
            detach("es", "")
        } else if word.ends_with("xes") || word.ends_with("ches") || word.ends_with("shes") {
            detach("es", "")
        } else if word.ends_with("ies") && word.len() > 4 {
            detach("ies", "y")
        } else {
            detach("s", "")
        }
    }
}

impl Lemmatizer for MorphyLemmatizer {
    /// Hyphenated compounds inflect on their last part
    /// (`non-keywords` -> `non-keyword`).
    fn lemmatize(&self, word: &str) -> String {
        match word.rsplit_once('-') {
            Some((head, last)) if !last.is_empty() => {
                format!("{}-{}", head, self.lemmatize_simple(last))
            }
            _ => self.lemmatize_simple(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_table_is_sorted() {
        assert!(NOUN_EXCEPTIONS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_word_tables_are_sorted() {
        assert!(UNINFLECTED.windows(2).all(|w| w[0] < w[1]));
        assert!(SES_PLURALS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_words_that_only_look_plural() {
        let lemmatizer = MorphyLemmatizer::new();
        for word in ["whereas", "always", "perhaps", "canvas", "bias", "lens", "towards"] {
            assert_eq!(lemmatizer.lemmatize(word), word);
        }
    }

    #[test]
    fn test_plurals_of_stems_ending_in_s() {
        let lemmatizer = MorphyLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("buses"), "bus");
        assert_eq!(lemmatizer.lemmatize("lenses"), "lens");
        assert_eq!(lemmatizer.lemmatize("gases"), "gas");
        assert_eq!(lemmatizer.lemmatize("biases"), "bias");
        assert_eq!(lemmatizer.lemmatize("multi-lenses"), "multi-lens");
    }

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = MorphyLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("runs"), "run");
        assert_eq!(lemmatizer.lemmatize("valves"), "valve");
        assert_eq!(lemmatizer.lemmatize("boxes"), "box");
        assert_eq!(lemmatizer.lemmatize("branches"), "branch");
        assert_eq!(lemmatizer.lemmatize("brushes"), "brush");
        assert_eq!(lemmatizer.lemmatize("classes"), "class");
        assert_eq!(lemmatizer.lemmatize("bodies"), "body");
        assert_eq!(lemmatizer.lemmatize("houses"), "house");
        assert_eq!(lemmatizer.lemmatize("ties"), "tie");
    }

    #[test]
    fn test_irregular_plurals() {
        let lemmatizer = MorphyLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("children"), "child");
        assert_eq!(lemmatizer.lemmatize("teeth"), "tooth");
        assert_eq!(lemmatizer.lemmatize("data"), "datum");
        assert_eq!(lemmatizer.lemmatize("series"), "series");
    }

    #[test]
    fn test_singular_words_unchanged() {
        let lemmatizer = MorphyLemmatizer::new();
        for word in ["example", "text", "considered", "glass", "apparatus", "analysis", "gas", "1990"] {
            assert_eq!(lemmatizer.lemmatize(word), word);
        }
    }

    #[test]
    fn test_hyphenated_compounds() {
        let lemmatizer = MorphyLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("non-keywords"), "non-keyword");
        assert_eq!(lemmatizer.lemmatize("self-driving"), "self-driving");
        assert_eq!(lemmatizer.lemmatize("end-"), "end-");
    }
}
