use std::sync::{Arc, RwLock};

use crate::error::Result;

use super::scoring::{self, Hits, ScoringSpace};
use super::{DocumentTermMatrix, VectorizerModel};

/// Shared owner of the current fitted (model, matrix) pair.
///
/// Refitting the corpus produces a wholly new pair; [`ModelHandle::swap`]
/// installs it in one step. Readers holding an earlier
/// [`ModelHandle::snapshot`] keep scoring against the pair they started
/// with, so a ranking call never observes half of an old fit and half of a
/// new one.
pub struct ModelHandle {
    current: RwLock<Arc<(VectorizerModel, DocumentTermMatrix)>>,
}

impl ModelHandle {
    pub fn new(model: VectorizerModel, matrix: DocumentTermMatrix) -> Self {
        Self {
            current: RwLock::new(Arc::new((model, matrix))),
        }
    }

    /// The pair currently installed. The returned `Arc` stays valid across
    /// later swaps.
    pub fn snapshot(&self) -> Arc<(VectorizerModel, DocumentTermMatrix)> {
        self.current
            .read()
            .expect("model handle lock poisoned")
            .clone()
    }

    /// Replace the installed pair wholesale.
    pub fn swap(&self, model: VectorizerModel, matrix: DocumentTermMatrix) {
        let mut current = self.current.write().expect("model handle lock poisoned");
        *current = Arc::new((model, matrix));
    }

    /// Rank against the currently installed pair.
    pub fn rank(&self, query: &str) -> Result<Vec<usize>> {
        let pair = self.snapshot();
        scoring::rank(query, &pair.0, &pair.1)
    }

    /// Rank with scores against the currently installed pair.
    pub fn rank_scored(&self, query: &str, space: ScoringSpace) -> Result<Hits> {
        let pair = self.snapshot();
        scoring::rank_scored(query, &pair.0, &pair.1, space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{build, token::TokenizerConfig};

    #[test]
    fn swap_replaces_the_pair_wholesale() {
        let (model, matrix) = build(&["old corpus text"], TokenizerConfig::default()).unwrap();
        let handle = ModelHandle::new(model, matrix);
        let before = handle.snapshot();

        let (model2, matrix2) =
            build(&["fresh words", "more fresh words"], TokenizerConfig::default()).unwrap();
        handle.swap(model2, matrix2);

        // the old snapshot is untouched, the handle serves the new pair
        assert_eq!(before.1.doc_count(), 1);
        assert_eq!(handle.snapshot().1.doc_count(), 2);
    }

    #[test]
    fn handle_ranks_against_current_pair() {
        let (model, matrix) =
            build(&["cats chase mice", "dogs chase cats"], TokenizerConfig::default()).unwrap();
        let handle = ModelHandle::new(model, matrix);
        assert_eq!(handle.rank("dogs").unwrap(), vec![1, 0]);
    }
}
