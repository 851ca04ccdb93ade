use tracing::debug;

use askdoc_core::sparse::SparseVector;

/// Rank every chunk vector against the query and keep the best `k` at or
/// above `min_score`, descending. A tie keeps chunk order (stable sort).
///
/// An exact-zero score means the query shares no vocabulary with the
/// chunk; those are always dropped, so an empty result is the valid
/// "nothing relevant" outcome rather than an error.
pub fn top_k(
    query: &SparseVector,
    vectors: &[SparseVector],
    k: usize,
    min_score: f32,
) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = vectors
        .iter()
        .enumerate()
        .map(|(index, vector)| (index, query.dot(vector)))
        .filter(|&(_, score)| score > 0.0 && score >= min_score)
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(k);
    debug!(candidates = vectors.len(), kept = scored.len(), "ranked chunk vectors");
    scored
}
