use std::cmp::Ordering;

use num::Num;
use serde::{Deserialize, Serialize};

/// Sparse vector over `u32` columns, entries kept sorted by column.
///
/// The sorted layout keeps walks over two vectors at O(nnz_a + nnz_b) and
/// lookups at O(log nnz).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVec<N>
where
    N: Num + Copy,
{
    inner: Vec<(u32, N)>,
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Build from raw entries. Entries are sorted by column; of duplicate
    /// columns only the first survives.
    pub fn from_entries(mut entries: Vec<(u32, N)>) -> Self {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|a, b| a.0 == b.0);
        Self { inner: entries }
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Value at `column`, if an entry exists.
    #[inline]
    pub fn get(&self, column: u32) -> Option<N> {
        self.inner
            .binary_search_by(|entry| entry.0.cmp(&column))
            .ok()
            .map(|pos| self.inner[pos].1)
    }

    /// Entries in ascending column order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.inner.iter().copied()
    }

    /// Columns holding a value, ascending.
    #[inline]
    pub fn columns(&self) -> impl Iterator<Item = u32> + '_ {
        self.inner.iter().map(|entry| entry.0)
    }
}

impl<N> SparseVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Lock-step dot product with `other`.
    pub fn dot(&self, other: &Self) -> f64 {
        let mut a_it = self.iter().fuse();
        let mut b_it = other.iter().fuse();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut dot = 0_f64;
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    let va: f64 = va.into();
                    let vb: f64 = vb.into();
                    dot += va * vb;
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        dot
    }

    /// Squared Euclidean norm.
    #[inline]
    pub fn sq_norm(&self) -> f64 {
        self.inner
            .iter()
            .map(|&(_, value)| {
                let value: f64 = value.into();
                value * value
            })
            .sum()
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.sq_norm().sqrt()
    }
}

impl<N> Default for SparseVec<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
