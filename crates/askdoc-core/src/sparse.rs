//! Shared sparse-text utilities: tokenization, stop-word filtering, and
//! the sparse vector representation.
//!
//! Both the semantic chunking strategy and the TF-IDF index encode text
//! through this module, so the chunking layer never has to depend on the
//! index layer to measure sentence similarity.

use std::collections::HashMap;

/// English function words dropped during tokenization. Sorted, so
/// membership is a binary search.
static STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "an", "and", "another", "any",
    "anyone", "anything", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "been", "before", "behind", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down",
    "during", "each", "either", "else", "enough", "etc", "even", "ever", "every", "everyone",
    "everything", "few", "for", "from", "further", "had", "has", "have", "having", "he",
    "hence", "her", "here", "hers", "herself", "him", "himself", "his", "how", "however",
    "i", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "least", "less",
    "let", "may", "me", "meanwhile", "might", "mine", "more", "moreover", "most", "mostly",
    "much", "must", "my", "myself", "namely", "neither", "never", "nevertheless", "next",
    "no", "nobody", "none", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often",
    "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "per", "perhaps", "rather", "re", "same", "she",
    "should", "since", "so", "some", "somehow", "someone", "something", "sometimes",
    "somewhere", "still", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "thence", "there", "thereby", "therefore", "these", "they",
    "this", "those", "though", "through", "throughout", "thus", "to", "together", "too",
    "toward", "towards", "under", "until", "up", "upon", "us", "very", "was", "we", "well",
    "were", "what", "whatever", "when", "whenever", "where", "whereas", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose",
    "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

pub fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.binary_search(&term).is_ok()
}

/// Lowercased alphanumeric runs of at least two characters, stop words
/// removed. Punctuation-only and single-character runs yield nothing.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else {
            flush_token(&mut tokens, &mut current);
        }
    }
    flush_token(&mut tokens, &mut current);
    tokens
}

fn flush_token(tokens: &mut Vec<String>, current: &mut String) {
    if current.chars().count() >= 2 && !is_stop_word(current) {
        tokens.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Sparse vector over a term vocabulary: `(term_id, weight)` pairs kept
/// sorted by term id so the dot product is a single merge walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    components: Vec<(u32, f32)>,
}

impl SparseVector {
    pub fn from_weights(mut weights: Vec<(u32, f32)>) -> Self {
        weights.retain(|&(_, w)| w != 0.0);
        weights.sort_unstable_by_key(|&(id, _)| id);
        Self { components: weights }
    }

    pub fn components(&self) -> &[(u32, f32)] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Scale to unit length. Zero vectors stay zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.components.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for component in &mut self.components {
                component.1 /= norm;
            }
        }
    }

    /// Dot product; equals cosine similarity when both sides are
    /// L2-normalized.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut left, mut right) = (self.components.iter().peekable(), other.components.iter().peekable());
        let mut sum = 0.0;
        while let (Some(&&(a_id, a_w)), Some(&&(b_id, b_w))) = (left.peek(), right.peek()) {
            match a_id.cmp(&b_id) {
                std::cmp::Ordering::Less => {
                    left.next();
                }
                std::cmp::Ordering::Greater => {
                    right.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    left.next();
                    right.next();
                }
            }
        }
        sum
    }
}

/// L2-normalized bag-of-words count vector over a caller-owned vocabulary;
/// unseen terms are assigned fresh ids as they appear.
pub fn count_vector(text: &str, vocabulary: &mut HashMap<String, u32>) -> SparseVector {
    let mut counts: HashMap<u32, f32> = HashMap::new();
    for token in tokenize(text) {
        let next_id = vocabulary.len() as u32;
        let id = *vocabulary.entry(token).or_insert(next_id);
        *counts.entry(id).or_insert(0.0) += 1.0;
    }
    let mut vector = SparseVector::from_weights(counts.into_iter().collect());
    vector.l2_normalize();
    vector
}
