//! Hashed term-frequency provider.
//!
//! Projects word unigrams and adjacent bigrams into fixed-dimension buckets.
//! Deterministic and offline; used as the last link of the fallback chain and
//! as the default when no API key is configured.

use std::collections::HashMap;

use querent_core::errors::EmbeddingError;
use querent_core::traits::IEmbeddingProvider;

/// Weight of a bigram relative to a unigram.
const BIGRAM_WEIGHT: f32 = 0.5;

/// Extra weight for terms containing a digit. Limits, years and amounts
/// change the answer.
const NUMERIC_WEIGHT: f32 = 2.0;

/// Offline embedding provider.
pub struct TfIdfProvider {
    dimensions: usize,
}

impl TfIdfProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// FNV-1a bucket index.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    /// Lowercase alphanumeric words. Digits are kept ("top 5" differs from "top 10").
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vec;
        }
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec;
        }

        let mut weights: HashMap<String, f32> = HashMap::new();
        for tok in &tokens {
            *weights.entry(tok.clone()).or_default() += 1.0;
        }
        for pair in tokens.windows(2) {
            *weights.entry(format!("{} {}", pair[0], pair[1])).or_default() += BIGRAM_WEIGHT;
        }

        let total = tokens.len() as f32;
        for (term, count) in &weights {
            // Longer terms carry more meaning than stopwords.
            let mut idf = 1.0 + (term.len() as f32).ln();
            if term.chars().any(|c| c.is_ascii_digit()) {
                idf *= NUMERIC_WEIGHT;
            }
            vec[Self::bucket(term, self.dimensions)] += (count / total) * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for TfIdfProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf"
    }

    fn is_available(&self) -> bool {
        true
    }
}
