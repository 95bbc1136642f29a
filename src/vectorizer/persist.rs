//! Artifact persistence.
//!
//! The model and the matrix are two standalone CBOR files so either can be
//! reloaded without the other. All I/O lives here; fitting and ranking are
//! pure in-memory computations.

use std::fs;
use std::path::Path;

use crate::error::Result;

use super::{DocumentTermMatrix, VectorizerModel};

impl VectorizerModel {
    /// Write the model artifact (vocabulary, IDF weights, tokenizer rule).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = serde_cbor::to_vec(self)?;
        fs::write(path, &bytes)?;
        tracing::info!(
            "saved vectorizer model ({} terms, {} bytes) to {:?}",
            self.vocab_size(),
            bytes.len(),
            path
        );
        Ok(())
    }

    /// Load a model artifact written by [`VectorizerModel::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let model: Self = serde_cbor::from_slice(&bytes)?;
        tracing::debug!(
            "loaded vectorizer model ({} terms) from {:?}",
            model.vocab_size(),
            path
        );
        Ok(model)
    }
}

impl DocumentTermMatrix {
    /// Write the matrix artifact (sparse rows plus explicit dimensions).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = serde_cbor::to_vec(self)?;
        fs::write(path, &bytes)?;
        tracing::info!(
            "saved document-term matrix ({}x{}, {} bytes) to {:?}",
            self.doc_count(),
            self.column_count(),
            bytes.len(),
            path
        );
        Ok(())
    }

    /// Load a matrix artifact written by [`DocumentTermMatrix::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let matrix: Self = serde_cbor::from_slice(&bytes)?;
        tracing::debug!(
            "loaded document-term matrix ({}x{}) from {:?}",
            matrix.doc_count(),
            matrix.column_count(),
            path
        );
        Ok(matrix)
    }
}
