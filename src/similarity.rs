//! Cosine similarity between embedding vectors.

use ndarray::ArrayView1;

/// cos(θ) = (A · B) / (||A|| ||B||)
///
/// Returns 0.0 when either vector has zero norm or the dimensions differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(target: "search", a = a.len(), b = b.len(), "embedding dimension mismatch");
        return 0.0;
    }

    let a_view = ArrayView1::from(a);
    let b_view = ArrayView1::from(b);

    let dot_product = a_view.dot(&b_view);
    let norm_a = a_view.dot(&a_view).sqrt();
    let norm_b = b_view.dot(&b_view).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Similarity of `query` against every candidate, in candidate order.
pub fn cosine_scores(query: &[f32], candidates: &[Vec<f32>]) -> Vec<f32> {
    candidates
        .iter()
        .map(|c| cosine_similarity(query, c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors() {
        let v = vec![0.1, 0.2, 0.3];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_and_opposite() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_inputs_are_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn scores_keep_candidate_order() {
        let s = cosine_scores(&[1.0, 0.0], &[vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert!(s[0].abs() < 1e-6 && (s[1] - 1.0).abs() < 1e-6);
    }
}
