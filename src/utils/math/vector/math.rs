use std::ops::AddAssign;

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Σ(a_i^2)
    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for (_, val) in self.raw_iter() {
            let val: R = val.into();
            result += val * val;
        }
        result
    }

    /// Scales the vector to unit L2 norm. Zero vectors stay zero.
    #[inline]
    pub fn l2_normalize(&mut self)
    where
        N: Into<f64> + num::FromPrimitive,
    {
        let norm = self.norm_sq::<f64>().sqrt();
        if norm > 0.0 {
            self.map_values(|v| N::from_f64(v.into() / norm).unwrap_or_else(N::zero));
        }
    }
}
