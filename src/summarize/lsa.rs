// src/summarize/lsa.rs
//! Latent semantic analysis sentence extraction.
//!
//! Rows are dictionary words, columns are sentences. Each column gets augmented
//! term frequency, the right singular vectors come from a Jacobi eigen-decomposition
//! of `AᵀA`, and a sentence's rank is `sqrt(Σ σᵢ² vⱼᵢ²)`.

use anyhow::{bail, Result};
use ndarray::{Array1, Array2, Axis};
use std::collections::BTreeMap;

use super::tokenizer::{split_sentences, words};

const SMOOTH: f64 = 0.4;
const MIN_DIMENSIONS: usize = 3;
const JACOBI_MAX_SWEEPS: usize = 100;
const JACOBI_EPS: f64 = 1e-12;

/// Pick `count` sentences from `text` and return them in document order.
///
/// Empty when the text has no alphabetic words.
pub fn extract(text: &str, count: usize) -> Result<Vec<String>> {
    let sentences = split_sentences(text);
    let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| words(s)).collect();

    let dictionary = build_dictionary(&tokenized);
    if dictionary.is_empty() || count == 0 {
        return Ok(Vec::new());
    }

    let mut matrix = term_matrix(&tokenized, &dictionary);
    augment_term_frequency(&mut matrix);
    let ranks = sentence_ranks(&matrix)?;

    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]));
    let mut chosen: Vec<usize> = order.into_iter().take(count).collect();
    chosen.sort_unstable();

    Ok(chosen.into_iter().map(|i| sentences[i].clone()).collect())
}

fn build_dictionary(tokenized: &[Vec<String>]) -> BTreeMap<&str, usize> {
    let mut dict = BTreeMap::new();
    for w in tokenized.iter().flatten() {
        let next = dict.len();
        dict.entry(w.as_str()).or_insert(next);
    }
    dict
}

fn term_matrix(tokenized: &[Vec<String>], dictionary: &BTreeMap<&str, usize>) -> Array2<f64> {
    let mut m = Array2::<f64>::zeros((dictionary.len(), tokenized.len()));
    for (col, sentence) in tokenized.iter().enumerate() {
        for w in sentence {
            if let Some(&row) = dictionary.get(w.as_str()) {
                m[[row, col]] += 1.0;
            }
        }
    }
    m
}

/// `0.4 + 0.6 · tf / max_tf` for every cell of a column with at least one word.
pub(crate) fn augment_term_frequency(matrix: &mut Array2<f64>) {
    for mut col in matrix.axis_iter_mut(Axis(1)) {
        let max = col.iter().cloned().fold(0.0_f64, f64::max);
        if max != 0.0 {
            col.mapv_inplace(|tf| SMOOTH + (1.0 - SMOOTH) * tf / max);
        }
    }
}

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
/// Returns eigenvalues and eigenvectors as columns.
pub(crate) fn symmetric_eigen(mut a: Array2<f64>) -> Result<(Array1<f64>, Array2<f64>)> {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|p| (p + 1..n).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        if !off.is_finite() {
            bail!("non-finite value during eigen-decomposition");
        }
        let scale: f64 = a.iter().map(|x| x * x).sum::<f64>().max(f64::MIN_POSITIVE);
        if off <= JACOBI_EPS * scale {
            return Ok((a.diag().to_owned(), v));
        }

        for p in 0..n {
            for q in p + 1..n {
                let apq = a[[p, q]];
                if apq.abs() < f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let t = if theta == 0.0 { 1.0 } else { t };
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }
    bail!("eigen-decomposition did not converge")
}

/// Rank of every sentence column. At least [`MIN_DIMENSIONS`] are retained, which
/// for these matrix sizes means every singular value participates.
pub(crate) fn sentence_ranks(matrix: &Array2<f64>) -> Result<Vec<f64>> {
    let gram = matrix.t().dot(matrix);
    let (eigenvalues, vectors) = symmetric_eigen(gram)?;

    // Singular values are limited to min(rows, cols); the rest of AᵀA's spectrum is zero.
    let k = matrix.nrows().min(matrix.ncols());
    let mut idx: Vec<usize> = (0..eigenvalues.len()).collect();
    idx.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));
    let dims = k.max(MIN_DIMENSIONS);

    let ranks: Vec<f64> = (0..matrix.ncols())
        .map(|j| {
            idx.iter()
                .take(dims)
                .map(|&i| eigenvalues[i].max(0.0) * vectors[[j, i]].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect();

    if ranks.iter().any(|r| !r.is_finite()) {
        bail!("non-finite sentence rank");
    }
    Ok(ranks)
}
