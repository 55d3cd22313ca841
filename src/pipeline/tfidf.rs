//! TF-IDF (Term Frequency-Inverse Document Frequency) vectorizer.
//!
//! Converts documents into sparse, L2-normalised feature vectors over a
//! frozen vocabulary of word n-grams:
//! - lowercase, tokens are runs of two or more word characters
//! - English stop words are dropped before n-grams are built
//! - the vocabulary keeps the `max_features` most frequent terms of the
//!   training corpus and is stored in alphabetical order
//! - IDF is smoothed: `ln((1 + n) / (1 + df)) + 1`

use super::stopwords::is_stop_word;
use regex::Regex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

/// Sparse feature vector as `(feature index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"))
}

/// Serialized form. Deserialization goes through it so the lookup index is
/// rebuilt and the parts are checked against each other.
#[derive(Serialize, Deserialize)]
struct VectorizerState {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    max_features: usize,
    ngram_range: (usize, usize),
}

/// TF-IDF vectorizer for unigram/bigram features.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "VectorizerState", try_from = "VectorizerState")]
pub struct TfidfVectorizer {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    max_features: usize,
    ngram_range: (usize, usize),
    index: HashMap<String, usize>,
}

impl From<TfidfVectorizer> for VectorizerState {
    fn from(v: TfidfVectorizer) -> Self {
        VectorizerState {
            vocabulary: v.vocabulary,
            idf: v.idf,
            max_features: v.max_features,
            ngram_range: v.ngram_range,
        }
    }
}

impl TryFrom<VectorizerState> for TfidfVectorizer {
    type Error = String;

    fn try_from(state: VectorizerState) -> Result<Self, Self::Error> {
        if state.vocabulary.len() != state.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} entries",
                state.vocabulary.len(),
                state.idf.len()
            ));
        }
        if state.vocabulary.len() > state.max_features {
            return Err(format!(
                "vocabulary has {} terms, above max_features {}",
                state.vocabulary.len(),
                state.max_features
            ));
        }
        let (lo, hi) = state.ngram_range;
        if lo == 0 || lo > hi {
            return Err(format!("invalid n-gram range ({lo}, {hi})"));
        }
        if state.idf.iter().any(|v| !v.is_finite()) {
            return Err("idf contains non-finite values".to_string());
        }
        let index: HashMap<String, usize> = state
            .vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        if index.len() != state.vocabulary.len() {
            return Err("vocabulary contains duplicate terms".to_string());
        }
        Ok(TfidfVectorizer {
            vocabulary: state.vocabulary,
            idf: state.idf,
            max_features: state.max_features,
            ngram_range: state.ngram_range,
            index,
        })
    }
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer.
    ///
    /// # Arguments
    ///
    /// * `max_features` - Maximum number of terms to keep
    /// * `ngram_range` - Inclusive `(min, max)` n-gram lengths
    pub fn new(max_features: usize, ngram_range: (usize, usize)) -> Self {
        TfidfVectorizer {
            vocabulary: Vec::new(),
            idf: Vec::new(),
            max_features,
            ngram_range,
            index: HashMap::new(),
        }
    }

    /// Learned terms, indexed by feature position.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Split a document into its n-gram terms.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let lowercase = document.to_lowercase();
        let tokens: Vec<&str> = token_pattern()
            .find_iter(&lowercase)
            .map(|m| m.as_str())
            .filter(|t| !is_stop_word(t))
            .collect();

        let (lo, hi) = self.ngram_range;
        let mut terms = Vec::new();
        for n in lo..=hi {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    /// Fit the vectorizer on a collection of documents.
    ///
    /// This builds the vocabulary and calculates IDF values. Any previously
    /// learned state is replaced.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = self.analyze(doc.as_ref());
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *term_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Most frequent first; ties by term so the selection is deterministic
        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        vocabulary.sort();

        let n_docs = documents.len() as f64;
        self.idf = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        self.vocabulary = vocabulary;
    }

    /// Transform a document into an L2-normalised TF-IDF vector.
    ///
    /// Terms outside the vocabulary are ignored; a document with no known
    /// terms yields an empty vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(document) {
            if let Some(&idx) = self.index.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut row {
                *v /= norm;
            }
        }
        row
    }

    /// Transform a batch of documents.
    pub fn transform_batch<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents.par_iter().map(|d| self.transform(d.as_ref())).collect()
    }
}
