pub mod handle;
pub mod persist;
pub mod scoring;
pub mod token;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::sparse::SparseVec;

use token::{TermFrequency, TokenizerConfig};

/// Immutable vocabulary and IDF weights, fit once per corpus.
///
/// Columns are assigned in first-seen order while scanning documents in
/// corpus order, so two fits over identical input produce identical models.
/// The tokenizer config travels with the model because queries must be split
/// with the same rule the corpus was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerModel {
    /// term -> column, a bijection onto 0..vocab_size
    #[serde(with = "indexmap::map::serde_seq")]
    vocabulary: IndexMap<String, u32>,
    /// smoothed IDF weight per column, strictly positive for observed terms
    idf: Vec<f64>,
    tokenizer: TokenizerConfig,
}

impl VectorizerModel {
    /// Number of distinct terms the corpus was fit with.
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column assigned to `term` at fit time.
    #[inline]
    pub fn column(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weights, indexed by column.
    #[inline]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// The term-splitting rule the corpus was fit with.
    #[inline]
    pub fn tokenizer(&self) -> &TokenizerConfig {
        &self.tokenizer
    }

    /// Vocabulary terms in column order.
    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.vocabulary.keys().map(String::as_str)
    }
}

/// Sparse tf-idf matrix, one row per corpus document.
///
/// Row i belongs to corpus document i for the lifetime of the matrix; the
/// ranker reports results as these row indices. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTermMatrix {
    rows: Vec<SparseVec<f64>>,
    columns: usize,
}

impl DocumentTermMatrix {
    /// Number of corpus documents (rows).
    #[inline]
    pub fn doc_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of vocabulary terms (columns).
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Weighted term vector of document `doc`.
    #[inline]
    pub fn row(&self, doc: usize) -> Option<&SparseVec<f64>> {
        self.rows.get(doc)
    }

    #[inline]
    pub(crate) fn rows(&self) -> &[SparseVec<f64>] {
        &self.rows
    }
}

/// Fit a TF-IDF model over `corpus` and weigh every document against it.
///
/// Returns the model (vocabulary + IDF weights + tokenizer rule) and the
/// document-term matrix whose cell (d, t) holds `tf(t, d) * idf(t)` with
/// raw term counts for tf and smoothed IDF
/// `ln((1 + docs) / (1 + df)) + 1`.
///
/// Pure and idempotent: identical corpus and config yield identical
/// artifacts. Fails with [`Error::EmptyCorpus`] on an empty corpus.
pub fn build<D>(
    corpus: &[D],
    tokenizer: TokenizerConfig,
) -> Result<(VectorizerModel, DocumentTermMatrix)>
where
    D: AsRef<str> + Sync,
{
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus);
    }

    // Rows are independent, so term counting parallelizes; collect keeps
    // corpus order.
    let frequencies: Vec<TermFrequency> = corpus
        .par_iter()
        .map(|doc| tokenizer.term_frequency(doc.as_ref()))
        .collect();

    // Vocabulary and document frequencies fold sequentially in corpus order.
    // Column assignment must not depend on thread scheduling.
    let mut vocabulary: IndexMap<String, u32> = IndexMap::new();
    let mut doc_freq: Vec<u32> = Vec::new();
    for freq in &frequencies {
        for (term, _) in freq.iter() {
            if let Some(&column) = vocabulary.get(term) {
                doc_freq[column as usize] += 1;
            } else {
                let column = vocabulary.len() as u32;
                vocabulary.insert(term.to_string(), column);
                doc_freq.push(1);
            }
        }
    }

    let doc_count = corpus.len() as f64;
    let idf: Vec<f64> = doc_freq
        .iter()
        .map(|&df| ((1.0 + doc_count) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let rows: Vec<SparseVec<f64>> = frequencies
        .par_iter()
        .map(|freq| {
            let entries = freq
                .iter()
                .map(|(term, count)| {
                    let column = vocabulary[term];
                    (column, count as f64 * idf[column as usize])
                })
                .collect();
            SparseVec::from_entries(entries)
        })
        .collect();

    let columns = vocabulary.len();
    let model = VectorizerModel {
        vocabulary,
        idf,
        tokenizer,
    };
    let matrix = DocumentTermMatrix { rows, columns };
    Ok((model, matrix))
}
