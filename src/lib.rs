/// This crate ranks candidate documents against a query document with a
/// TF-IDF vector space model and cosine similarity.
///
/// Two entry points, consumed in sequence:
/// - [`build`] fits a vocabulary, IDF weights and a sparse document-term
///   matrix over a fixed corpus, once, offline.
/// - [`rank`] scores one new query document against those artifacts and
///   returns the corpus indices in descending similarity order.
///
/// Document acquisition is the caller's business: the core takes plain
/// UTF-8 strings and reports plain indices. Callers keep their own mapping
/// from index to whatever identifier the documents were fetched by.
pub mod error;
pub mod utils;
pub mod vectorizer;

/// Fit a TF-IDF model and document-term matrix over a corpus.
///
/// Runs once per corpus. The returned pair is immutable; refitting yields
/// an independent new pair that callers install via [`ModelHandle::swap`]
/// (or by replacing their own reference).
pub use vectorizer::build;

/// Rank all corpus documents by cosine similarity to one query document,
/// returning the full index permutation, best match first.
pub use vectorizer::scoring::rank;

/// Rank with per-document scores and an explicit [`ScoringSpace`].
pub use vectorizer::scoring::rank_scored;

/// Immutable vocabulary + IDF weights + tokenizer rule, fit by [`build`].
/// Persists standalone via `save`/`load`.
pub use vectorizer::VectorizerModel;

/// Sparse tf-idf matrix, one row per corpus document, fit by [`build`].
/// Persists standalone via `save`/`load`.
pub use vectorizer::DocumentTermMatrix;

/// Feature space for the cosine: the historical shared-subspace restriction
/// (default) or the full corpus vocabulary.
pub use vectorizer::scoring::ScoringSpace;

/// Scored ranking over the whole corpus with truncation and key-mapping
/// helpers.
pub use vectorizer::scoring::{HitEntry, Hits};

/// Term-splitting rule shared by fitting and ranking.
pub use vectorizer::token::TokenizerConfig;

/// Raw per-document term counts in first-seen order.
pub use vectorizer::token::TermFrequency;

/// Shared owner of the current fitted pair, with wholesale swap for
/// refits.
pub use vectorizer::handle::ModelHandle;

pub use error::{Error, Result};
