pub mod math;

use std::fmt::{self, Debug};

use num::Num;

/// ZeroSpVec is a sparse vector that treats zero elements as absent.
/// It keeps parallel `indices` and `values` buffers plus a logical length.
///
/// Indices are guaranteed to be strictly ascending.
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Num,
{
    inds: Vec<usize>,
    vals: Vec<N>,
    len: usize,
    zero: N,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len: 0,
            zero: N::zero(),
        }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
            zero: N::zero(),
        }
    }

    /// Appends an element at the next logical index.
    /// Zero values only grow the length.
    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.inds.push(self.len);
            self.vals.push(elem);
        }
        self.len += 1;
    }

    /// Writes a non-zero element at `index` without touching the length.
    /// Call `set_len` afterwards.
    ///
    /// # Arguments
    /// * `index` - must be greater than every index already stored
    /// * `value` - the element value
    #[inline]
    pub fn raw_push(&mut self, index: usize, value: N) {
        debug_assert!(
            self.inds.last().map_or(true, |&last| last < index),
            "raw_push requires ascending indices"
        );
        if value != N::zero() {
            self.inds.push(index);
            self.vals.push(value);
        }
    }

    #[inline]
    pub fn set_len(&mut self, len: usize) {
        debug_assert!(
            self.inds.last().map_or(true, |&last| last < len),
            "length must cover every stored index"
        );
        self.len = len;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored (non-zero) elements.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&index) {
            Ok(pos) => Some(&self.vals[pos]),
            Err(_) => Some(&self.zero),
        }
    }

    /// Applies `f` to every stored element in place.
    #[inline]
    pub fn map_values<F>(&mut self, mut f: F)
    where
        F: FnMut(N) -> N,
    {
        for val in self.vals.iter_mut() {
            *val = f(*val);
        }
        // elements mapped to zero must not stay stored
        if self.vals.iter().any(|v| *v == N::zero()) {
            let (inds, vals): (Vec<usize>, Vec<N>) = self
                .inds
                .iter()
                .copied()
                .zip(self.vals.iter().copied())
                .filter(|(_, v)| *v != N::zero())
                .unzip();
            self.inds = inds;
            self.vals = vals;
        }
    }

    #[inline]
    pub fn from_vec(vec: Vec<N>) -> Self {
        let mut zero_sp_vec = ZeroSpVec::with_capacity(vec.len());
        for entry in vec {
            zero_sp_vec.push(entry);
        }
        zero_sp_vec
    }

    /// Dense iteration, zeros included.
    #[inline]
    pub fn iter(&self) -> ZeroSpVecIter<'_, N> {
        ZeroSpVecIter { vec: self, pos: 0, nz_pos: 0 }
    }

    /// Iteration over stored `(index, value)` pairs in ascending index order.
    #[inline]
    pub fn raw_iter(&self) -> ZeroSpVecRawIter<'_, N> {
        ZeroSpVecRawIter { vec: self, pos: 0 }
    }
}

impl<N> Default for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn from(vec: Vec<N>) -> Self {
        ZeroSpVec::from_vec(vec)
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("ZeroSpVec")
                .field("len", &self.len)
                .field("nnz", &self.nnz())
                .field("entries", &self.raw_iter().collect::<Vec<_>>())
                .finish()
        } else {
            f.debug_list().entries(self.iter()).finish()
        }
    }
}

pub struct ZeroSpVecIter<'a, N>
where
    N: Num,
{
    vec: &'a ZeroSpVec<N>,
    pos: usize,
    nz_pos: usize,
}

impl<'a, N> Iterator for ZeroSpVecIter<'a, N>
where
    N: Num + Copy,
{
    type Item = N;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.vec.len {
            return None;
        }
        let item = match self.vec.inds.get(self.nz_pos) {
            Some(&ind) if ind == self.pos => {
                self.nz_pos += 1;
                self.vec.vals[self.nz_pos - 1]
            }
            _ => N::zero(),
        };
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.vec.len - self.pos;
        (rest, Some(rest))
    }
}

pub struct ZeroSpVecRawIter<'a, N>
where
    N: Num,
{
    vec: &'a ZeroSpVec<N>,
    pos: usize,
}

impl<'a, N> Iterator for ZeroSpVecRawIter<'a, N>
where
    N: Num + Copy,
{
    type Item = (usize, N);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let ind = *self.vec.inds.get(self.pos)?;
        let val = self.vec.vals[self.pos];
        self.pos += 1;
        Some((ind, val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.vec.inds.len() - self.pos;
        (rest, Some(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_skips_zeros_but_keeps_length() {
        let v = ZeroSpVec::from_vec(vec![0.0, 2.0, 0.0, 3.0]);
        assert_eq!(v.len(), 4);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.raw_iter().collect::<Vec<_>>(), vec![(1, 2.0), (3, 3.0)]);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![0.0, 2.0, 0.0, 3.0]);
        assert_eq!(v.get(2), Some(&0.0));
        assert_eq!(v.get(4), None);
    }

    #[test]
    fn raw_push_then_set_len() {
        let mut v: ZeroSpVec<u32> = ZeroSpVec::new();
        v.raw_push(5, 1);
        v.raw_push(900, 2);
        v.set_len(1024);
        assert_eq!(v.len(), 1024);
        assert_eq!(v.get(900), Some(&2));
        assert_eq!(v.get(6), Some(&0));
    }

    #[test]
    fn map_values_drops_new_zeros() {
        let mut v = ZeroSpVec::from_vec(vec![1_i32, 2, 3]);
        v.map_values(|x| if x == 2 { 0 } else { x * 10 });
        assert_eq!(v.raw_iter().collect::<Vec<_>>(), vec![(0, 10), (2, 30)]);
        assert_eq!(v.len(), 3);
    }
}
