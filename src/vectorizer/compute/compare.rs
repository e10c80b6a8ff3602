use std::cmp::Ordering;

/// Pairwise measures over sparse `(index, value)` streams.
///
/// Both streams must be sorted by ascending index and come from the same
/// feature space.
pub trait Compare {
    /// cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// ||a|| = sqrt(Σ(a_i^2))
    fn cosine_similarity(vec: impl Iterator<Item = (usize, f64)>, other: impl Iterator<Item = (usize, f64)>) -> f64;
    /// euclidean distance
    /// d(a, b) = sqrt(Σ((a_i - b_i)^2))
    fn euclidean_distance(vec: impl Iterator<Item = (usize, f64)>, other: impl Iterator<Item = (usize, f64)>) -> f64;
    /// jaccard index of the non-zero supports
    /// J(A, B) = |A ∩ B| / |A ∪ B|
    fn jaccard_index(vec: impl Iterator<Item = (usize, f64)>, other: impl Iterator<Item = (usize, f64)>) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompare;

/// Merge-join of two sorted sparse streams.
/// `f` gets the value on each side, 0.0 when only the other side has the index.
#[inline]
fn merge_join<F>(vec: impl Iterator<Item = (usize, f64)>, other: impl Iterator<Item = (usize, f64)>, mut f: F)
where
    F: FnMut(f64, f64),
{
    let mut a_it = vec.fuse();
    let mut b_it = other.fuse();
    let mut a_next = a_it.next();
    let mut b_next = b_it.next();
    loop {
        match (a_next, b_next) {
            (Some((ia, va)), Some((ib, vb))) => match ia.cmp(&ib) {
                Ordering::Equal => {
                    f(va, vb);
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => {
                    f(va, 0.0);
                    a_next = a_it.next();
                }
                Ordering::Greater => {
                    f(0.0, vb);
                    b_next = b_it.next();
                }
            },
            (Some((_, va)), None) => {
                f(va, 0.0);
                a_next = a_it.next();
            }
            (None, Some((_, vb))) => {
                f(0.0, vb);
                b_next = b_it.next();
            }
            (None, None) => break,
        }
    }
}

impl Compare for DefaultCompare {
    #[inline]
    fn cosine_similarity(vec: impl Iterator<Item = (usize, f64)>, other: impl Iterator<Item = (usize, f64)>) -> f64 {
        let mut norm_a = 0_f64;
        let mut norm_b = 0_f64;
        let mut dot = 0_f64;
        merge_join(vec, other, |a, b| {
            norm_a += a * a;
            norm_b += b * b;
            dot += a * b;
        });
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
    }

    #[inline]
    fn euclidean_distance(vec: impl Iterator<Item = (usize, f64)>, other: impl Iterator<Item = (usize, f64)>) -> f64 {
        let mut sum = 0_f64;
        merge_join(vec, other, |a, b| {
            let diff = a - b;
            sum += diff * diff;
        });
        sum.sqrt()
    }

    #[inline]
    fn jaccard_index(vec: impl Iterator<Item = (usize, f64)>, other: impl Iterator<Item = (usize, f64)>) -> f64 {
        let mut intersection = 0_u64;
        let mut union = 0_u64;
        merge_join(vec, other, |a, b| {
            let (in_a, in_b) = (a != 0.0, b != 0.0);
            if in_a && in_b {
                intersection += 1;
            }
            if in_a || in_b {
                union += 1;
            }
        });
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}
