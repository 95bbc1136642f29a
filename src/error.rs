pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the indexing and ranking entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A model was fit over zero documents.
    #[error("corpus contains no documents")]
    EmptyCorpus,

    /// The query produced no terms under the model's tokenizer rule.
    #[error("query tokenized to zero terms")]
    EmptyQuery,

    /// A matrix was paired with a model it was not built from.
    #[error("matrix has {columns} columns but the model vocabulary holds {vocabulary} terms")]
    ModelMismatch { vocabulary: usize, columns: usize },

    /// Artifact file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact bytes could not be encoded or decoded.
    #[error("artifact codec error: {0}")]
    Codec(#[from] serde_cbor::Error),
}
