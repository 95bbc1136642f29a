use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Term-splitting rule shared by the fit and rank paths.
///
/// Documents are cut at every non-alphanumeric character, each token is
/// lowercased, and tokens shorter than `min_token_len` characters are
/// dropped. The model stores its config so queries are split with the exact
/// rule the corpus was fit with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Tokens with fewer characters than this are dropped.
    pub min_token_len: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        // single-character tokens carry no signal for similarity ranking
        Self { min_token_len: 2 }
    }
}

impl TokenizerConfig {
    /// Split `text` into lowercased terms.
    pub fn tokenize<'a>(&self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        let min = self.min_token_len;
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
            .filter(move |token| token.chars().count() >= min)
    }

    /// Tokenize `text` and count the terms in one pass.
    pub fn term_frequency(&self, text: &str) -> TermFrequency {
        let mut freq = TermFrequency::new();
        for term in self.tokenize(text) {
            freq.add_owned_term(term);
        }
        freq
    }
}

/// Raw term counts for a single document.
///
/// Terms are kept in first-seen order, which is what makes repeated fits
/// over the same corpus assign identical vocabulary columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

impl TermFrequency {
    pub fn new() -> Self {
        Self {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Count one occurrence of `term`.
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Count one occurrence of an already-owned `term`, reusing the
    /// allocation on first insert.
    #[inline]
    pub(crate) fn add_owned_term(&mut self, term: String) {
        *self.term_count.entry(term).or_insert(0) += 1;
        self.total_term_count += 1;
    }

    /// Count one occurrence of every term in `terms`.
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Occurrences of `term`, 0 if never seen.
    #[inline]
    pub fn count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of counted tokens.
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms.
    #[inline]
    pub fn unique_terms(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// Distinct terms with their counts, in first-seen order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }
}

impl Default for TermFrequency {
    fn default() -> Self {
        Self::new()
    }
}
