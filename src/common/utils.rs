//! This file provides some common functions
//! such as inner products and the logistic function.


/// Returns the inner product of two dense vectors.
///
/// Time complexity: `O(n)`.
#[inline(always)]
pub fn inner_product(v1: &[f64], v2: &[f64]) -> f64 {
    v1.iter()
        .zip(v2)
        .map(|(a, b)| a * b)
        .sum::<f64>()
}


/// Returns the squared euclidean norm of a dense vector.
#[inline(always)]
pub fn squared_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>()
}


/// Performs `y <- y + a * x` for dense vectors.
#[inline(always)]
pub fn add_scaled(y: &mut [f64], a: f64, x: &[f64]) {
    assert_eq!(y.len(), x.len());
    y.iter_mut()
        .zip(x)
        .for_each(|(yi, xi)| { *yi += a * xi; });
}


/// The logistic function `1 / (1 + exp(-x))`.
#[inline(always)]
pub fn expit(x: f64) -> f64 {
    if x >= 0f64 {
        1f64 / (1f64 + (-x).exp())
    } else {
        let z = x.exp();
        z / (1f64 + z)
    }
}


/// Returns the index of the largest value.
/// Ties go to the smallest index, `None` for an empty slice.
#[inline(always)]
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {},
            _ => { best = Some((i, v)); },
        }
    }
    best.map(|(i, _)| i)
}


/// Returns `+1`, `-1`, or `0` following the sign of `x`.
#[inline(always)]
pub fn sign(x: f64) -> f64 {
    if x > 0f64 {
        1f64
    } else if x < 0f64 {
        -1f64
    } else {
        0f64
    }
}
