use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::utils::sparse::SparseVec;

use super::{DocumentTermMatrix, VectorizerModel};

/// Feature space the cosine is computed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringSpace {
    /// Restrict every document row to the columns the query also holds.
    ///
    /// Document norms then cover only the overlap with the current query, so
    /// a document's effective norm varies from query to query. This
    /// reproduces the scoring of the system this engine replaces and is the
    /// default.
    #[default]
    SharedTerms,
    /// Zero-pad the query into the full corpus vocabulary.
    ///
    /// Document norms cover complete rows, making scores comparable across
    /// queries at the cost of diverging from the historical ordering.
    FullVocabulary,
}

/// One scored candidate document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEntry {
    /// Corpus index of the document.
    pub index: usize,
    /// Cosine similarity against the query, in [0, 1].
    pub score: f64,
}

/// Scored ranking over the whole corpus.
///
/// Holds one entry per corpus document, sorted by descending score with ties
/// broken by ascending corpus index.
#[derive(Debug, Clone, PartialEq)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    /// Sort by score descending, ties by corpus index ascending. The order
    /// never depends on matrix storage order.
    fn sort_by_score(&mut self) {
        self.list
            .sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
    }

    /// The ranked corpus indices, best match first.
    pub fn into_indices(self) -> Vec<usize> {
        self.list.into_iter().map(|hit| hit.index).collect()
    }

    /// The best `k` entries (fewer if the corpus is smaller).
    pub fn top(&self, k: usize) -> &[HitEntry] {
        &self.list[..k.min(self.list.len())]
    }

    /// Map ranked positions onto caller-held keys, e.g. the accession
    /// numbers the corpus documents were fetched by. Entries whose index
    /// falls outside `keys` are skipped.
    pub fn keyed<'a, K>(&self, keys: &'a [K]) -> Vec<(&'a K, f64)> {
        self.list
            .iter()
            .filter_map(|hit| keys.get(hit.index).map(|key| (key, hit.score)))
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// Rank every corpus document by similarity to `query`, best match first.
///
/// Returns the full permutation of `0..doc_count`; callers truncate
/// themselves if they only need the head. Scoring runs in the
/// [`ScoringSpace::SharedTerms`] space.
///
/// Fails with [`Error::EmptyQuery`] if the query tokenizes to nothing and
/// with [`Error::ModelMismatch`] if `matrix` was not built from `model`.
/// A query sharing no terms with the vocabulary is not an error: every score
/// is 0 and the order falls back to ascending corpus index.
pub fn rank(
    query: &str,
    model: &VectorizerModel,
    matrix: &DocumentTermMatrix,
) -> Result<Vec<usize>> {
    rank_scored(query, model, matrix, ScoringSpace::default()).map(Hits::into_indices)
}

/// Like [`rank`], returning scores and choosing the feature space.
pub fn rank_scored(
    query: &str,
    model: &VectorizerModel,
    matrix: &DocumentTermMatrix,
    space: ScoringSpace,
) -> Result<Hits> {
    if matrix.column_count() != model.vocab_size() {
        return Err(Error::ModelMismatch {
            vocabulary: model.vocab_size(),
            columns: matrix.column_count(),
        });
    }

    // The query counts its own terms, unweighted. IDF only enters below,
    // and only for terms the corpus knows.
    let freq = model.tokenizer().term_frequency(query);
    if freq.is_empty() {
        return Err(Error::EmptyQuery);
    }

    // Pseudo-tfidf vector over the shared feature set: query tf times
    // corpus idf, laid out in column order. Out-of-vocabulary terms drop
    // out here.
    let entries: Vec<(u32, f64)> = freq
        .iter()
        .filter_map(|(term, count)| {
            let column = model.column(term)?;
            Some((column, count as f64 * model.idf()[column as usize]))
        })
        .collect();
    let query_vec = SparseVec::from_entries(entries);
    let query_norm = query_vec.norm();

    let list: Vec<HitEntry> = matrix
        .rows()
        .par_iter()
        .enumerate()
        .map(|(index, row)| {
            let score = match space {
                ScoringSpace::SharedTerms => cosine_shared(&query_vec, query_norm, row),
                ScoringSpace::FullVocabulary => cosine_full(&query_vec, query_norm, row),
            };
            HitEntry { index, score }
        })
        .collect();

    let mut hits = Hits { list };
    hits.sort_by_score();
    Ok(hits)
}

/// Cosine with the document row restricted to the query's columns.
///
/// The row norm accumulates only where the query holds a column, so both
/// operands live in the shared subspace. A zero norm on either side scores
/// 0 rather than dividing.
fn cosine_shared(query: &SparseVec<f64>, query_norm: f64, row: &SparseVec<f64>) -> f64 {
    let mut a_it = query.iter().fuse();
    let mut b_it = row.iter().fuse();
    let mut a_next = a_it.next();
    let mut b_next = b_it.next();
    let mut dot = 0_f64;
    let mut row_sq = 0_f64;
    while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
        match ia.cmp(&ib) {
            Ordering::Equal => {
                dot += va * vb;
                row_sq += vb * vb;
                a_next = a_it.next();
                b_next = b_it.next();
            }
            // query column missing from the row contributes nothing
            Ordering::Less => a_next = a_it.next(),
            // row column outside the shared subspace is dropped
            Ordering::Greater => b_next = b_it.next(),
        }
    }
    let denom = query_norm * row_sq.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Cosine over the full vocabulary: the document keeps its complete norm.
fn cosine_full(query: &SparseVec<f64>, query_norm: f64, row: &SparseVec<f64>) -> f64 {
    let denom = query_norm * row.norm();
    if denom == 0.0 {
        0.0
    } else {
        query.dot(row) / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{build, token::TokenizerConfig};

    fn fitted() -> (VectorizerModel, DocumentTermMatrix) {
        build(
            &["cats chase mice", "dogs chase cats", "mice avoid cats"],
            TokenizerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn ranks_most_overlapping_document_first() {
        let (model, matrix) = fitted();
        let order = rank("cats chase dogs", &model, &matrix).unwrap();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn identical_document_scores_one_and_wins() {
        let (model, matrix) = fitted();
        let hits = rank_scored("dogs chase cats", &model, &matrix, ScoringSpace::SharedTerms)
            .unwrap();
        assert_eq!(hits.list[0].index, 1);
        assert!((hits.list[0].score - 1.0).abs() < 1e-12);
        assert!(hits.list[1].score < hits.list[0].score);
    }

    #[test]
    fn zero_overlap_falls_back_to_ascending_indices() {
        let (model, matrix) = fitted();
        let hits = rank_scored("zebra quagga", &model, &matrix, ScoringSpace::SharedTerms)
            .unwrap();
        assert_eq!(
            hits.list.iter().map(|h| h.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(hits.list.iter().all(|h| h.score == 0.0));
    }

    #[test]
    fn returns_a_full_permutation() {
        let (model, matrix) = fitted();
        let mut order = rank("mice", &model, &matrix).unwrap();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let (model, matrix) = fitted();
        let first = rank_scored("cats chase dogs", &model, &matrix, ScoringSpace::SharedTerms)
            .unwrap();
        let second = rank_scored("cats chase dogs", &model, &matrix, ScoringSpace::SharedTerms)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_query_is_rejected() {
        let (model, matrix) = fitted();
        assert!(matches!(
            rank("!!!", &model, &matrix),
            Err(Error::EmptyQuery)
        ));
    }

    #[test]
    fn mismatched_artifacts_are_rejected() {
        let (model, _) = fitted();
        let (_, other_matrix) = build(&["unrelated tiny corpus"], TokenizerConfig::default())
            .unwrap();
        assert!(matches!(
            rank("cats", &model, &other_matrix),
            Err(Error::ModelMismatch { .. })
        ));
    }

    #[test]
    fn full_vocabulary_space_penalizes_partial_overlap() {
        let (model, matrix) = fitted();
        let shared = rank_scored("mice avoid cats", &model, &matrix, ScoringSpace::SharedTerms)
            .unwrap();
        let full = rank_scored(
            "mice avoid cats",
            &model,
            &matrix,
            ScoringSpace::FullVocabulary,
        )
        .unwrap();
        // document 2 is the query itself and wins in both spaces
        assert_eq!(shared.list[0].index, 2);
        assert_eq!(full.list[0].index, 2);
        // in the full space a partially overlapping document keeps its whole
        // norm, so its score can only go down
        for hit in &full.list {
            let counterpart = shared.list.iter().find(|h| h.index == hit.index).unwrap();
            assert!(hit.score <= counterpart.score + 1e-12);
        }
    }

    #[test]
    fn top_and_keyed_views() {
        let (model, matrix) = fitted();
        let hits = rank_scored("cats chase dogs", &model, &matrix, ScoringSpace::SharedTerms)
            .unwrap();
        assert_eq!(hits.top(2).len(), 2);
        assert_eq!(hits.top(10).len(), 3);
        let keys = ["24601174", "19515181", "22512265"];
        let keyed = hits.keyed(&keys);
        assert_eq!(keyed[0].0, &"19515181");
        assert_eq!(keyed.len(), 3);
    }
}
