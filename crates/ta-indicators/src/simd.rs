//! SIMD window kernels.
//!
//! These use the `wide` crate for portable SIMD operations. Each window is
//! summed independently, so results carry no accumulated drift; they serve
//! as the exact reference for the running-sum primitives in
//! [`smoothing`](crate::smoothing).

use wide::f64x4;

/// SIMD sum of a slice.
pub fn sum_simd(data: &[f64]) -> f64 {
    let chunks = data.len() / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        simd_sum += values;
    }

    let mut result = simd_sum.reduce_add();

    // Handle remaining elements
    for &value in &data[(chunks * 4)..] {
        result += value;
    }

    result
}

/// SIMD dot product over the common length of `a` and `b`.
pub fn dot_product_simd(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    let chunks = len / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let va = f64x4::new([a[idx], a[idx + 1], a[idx + 2], a[idx + 3]]);
        let vb = f64x4::new([b[idx], b[idx + 1], b[idx + 2], b[idx + 3]]);
        simd_sum += va * vb;
    }

    let mut result = simd_sum.reduce_add();

    for i in (chunks * 4)..len {
        result += a[i] * b[i];
    }

    result
}

/// SIMD min/max finder.
pub fn minmax_simd(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }

    let chunks = data.len() / 4;
    let mut min_vec = f64x4::splat(f64::INFINITY);
    let mut max_vec = f64x4::splat(f64::NEG_INFINITY);

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        min_vec = min_vec.min(values);
        max_vec = max_vec.max(values);
    }

    let min_arr = min_vec.to_array();
    let max_arr = max_vec.to_array();

    let mut min = min_arr[0].min(min_arr[1]).min(min_arr[2]).min(min_arr[3]);
    let mut max = max_arr[0].max(max_arr[1]).max(max_arr[2]).max(max_arr[3]);

    for &value in &data[(chunks * 4)..] {
        min = min.min(value);
        max = max.max(value);
    }

    Some((min, max))
}

/// Sum of every trailing window of `period` values, each summed from scratch.
pub fn window_sums(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    data.windows(period).map(sum_simd).collect()
}

/// Mean and population standard deviation of every trailing window.
///
/// The variance divides by `period`, not `period - 1`.
pub fn window_mean_std(data: &[f64], period: usize) -> Vec<(f64, f64)> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    let period_f64 = period as f64;
    let mut result = Vec::with_capacity(data.len() - period + 1);

    for window in data.windows(period) {
        let mean = sum_simd(window) / period_f64;

        let chunks = period / 4;
        let mean_vec = f64x4::splat(mean);
        let mut sum_sq = 0.0;

        for i in 0..chunks {
            let idx = i * 4;
            let values = f64x4::new([
                window[idx],
                window[idx + 1],
                window[idx + 2],
                window[idx + 3],
            ]);
            let diff = values - mean_vec;
            sum_sq += (diff * diff).reduce_add();
        }

        // Handle remaining elements
        for &value in &window[(chunks * 4)..] {
            let diff = value - mean;
            sum_sq += diff * diff;
        }

        // Rounding can leave a tiny negative variance on constant windows
        result.push((mean, (sum_sq / period_f64).max(0.0).sqrt()));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_simd() {
        let data: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let result = sum_simd(&data);

        // Sum of 1 to 100 = 5050
        assert!((result - 5050.0).abs() < 1e-10);
    }

    #[test]
    fn test_dot_product_simd() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let b = vec![5.0, 6.0, 7.0, 8.0, 1.0];
        let result = dot_product_simd(&a, &b);

        // 1*5 + 2*6 + 3*7 + 4*8 + 5*1 = 75
        assert!((result - 75.0).abs() < 1e-10);
    }

    #[test]
    fn test_minmax_simd() {
        let data = vec![5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 0.5];
        let (min, max) = minmax_simd(&data).unwrap();

        assert!((min - 0.5).abs() < 1e-10);
        assert!((max - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_window_sums() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = window_sums(&data, 3);

        assert_eq!(result, vec![6.0, 9.0, 12.0]);
    }

    #[test]
    fn test_window_mean_std() {
        let data = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let result = window_mean_std(&data, 8);

        assert_eq!(result.len(), 1);
        // Population std dev of [2,4,4,4,5,5,7,9] is exactly 2
        assert!((result[0].0 - 5.0).abs() < 1e-12);
        assert!((result[0].1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_window_has_zero_deviation() {
        let data = vec![100.1; 7];
        for (_, std_dev) in window_mean_std(&data, 5) {
            assert!(std_dev.abs() < 1e-12);
            assert!(!std_dev.is_nan());
        }
    }

    #[test]
    fn test_empty_data() {
        assert!(window_sums(&[], 5).is_empty());
        assert!(window_mean_std(&[1.0], 0).is_empty());
        assert!(minmax_simd(&[]).is_none());
        assert_eq!(sum_simd(&[]), 0.0);
    }
}
