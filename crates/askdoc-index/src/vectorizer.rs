use std::collections::{HashMap, HashSet};

use tracing::debug;

use askdoc_core::sparse::{tokenize, SparseVector};
use askdoc_core::{Error, Result};

/// Sparse term-weighting model: fit once over the chunk texts, then
/// project queries into the same space using the frozen vocabulary and
/// document-frequency statistics.
///
/// Weight = raw term frequency x smoothed inverse document frequency
/// `ln((1 + n) / (1 + df)) + 1`, L2-normalized. The smoothing keeps
/// weights positive even for terms present in every chunk, and the same
/// formula applies at fit and transform time.
#[derive(Debug, Default)]
pub struct SparseVectorizer {
    model: Option<FittedModel>,
}

#[derive(Debug)]
struct FittedModel {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
}

impl SparseVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `fit` has completed successfully.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.vocabulary.len())
    }

    /// Build the vocabulary and document frequencies over `texts` and
    /// return one weighted vector per text, in order. Texts that retain no
    /// terms get zero vectors; if that holds for every text there is
    /// nothing to index and fitting fails.
    pub fn fit(&mut self, texts: &[&str]) -> Result<Vec<SparseVector>> {
        let tokenized: Vec<Vec<String>> = texts.iter().map(|text| tokenize(text)).collect();

        let mut vocabulary: HashMap<String, u32> = HashMap::new();
        let mut document_frequency: Vec<u32> = Vec::new();
        for tokens in &tokenized {
            let mut seen = HashSet::new();
            for token in tokens {
                let id = match vocabulary.get(token) {
                    Some(&id) => id,
                    None => {
                        let id = vocabulary.len() as u32;
                        vocabulary.insert(token.clone(), id);
                        document_frequency.push(0);
                        id
                    }
                };
                if seen.insert(id) {
                    document_frequency[id as usize] += 1;
                }
            }
        }
        if vocabulary.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let n = texts.len() as f32;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let model = FittedModel { vocabulary, idf };
        let vectors = tokenized.iter().map(|tokens| model.weigh(tokens)).collect();
        debug!(terms = model.vocabulary.len(), documents = texts.len(), "fitted tf-idf model");
        self.model = Some(model);
        Ok(vectors)
    }

    /// Project arbitrary text into the fitted space; terms unseen at fit
    /// time contribute nothing.
    pub fn transform(&self, text: &str) -> Result<SparseVector> {
        let model = self.model.as_ref().ok_or(Error::IndexNotFitted)?;
        Ok(model.weigh(&tokenize(text)))
    }
}

impl FittedModel {
    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<u32, f32> = HashMap::new();
        for token in tokens {
            if let Some(&id) = self.vocabulary.get(token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }
        let mut vector = SparseVector::from_weights(
            counts.into_iter().map(|(id, tf)| (id, tf * self.idf[id as usize])).collect(),
        );
        vector.l2_normalize();
        vector
    }
}
