use crate::common::FftSlice;

/// Sum of per-bin squared differences between two spectra, split into real
/// and imaginary parts. Pure diagnostics; the caller decides what to do
/// with the numbers.
///
/// Mismatched lengths are a caller bug, not a data condition, so this
/// panics rather than truncating.
pub fn sum_squared_diff(a: &FftSlice, b: &FftSlice) -> (f64, f64) {
    assert_eq!(
        a.len(),
        b.len(),
        "cannot diff spectra of different lengths"
    );
    let mut sq_re = 0.0;
    let mut sq_im = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let diff = x - y;
        sq_re += diff.re * diff.re;
        sq_im += diff.im * diff.im;
    }
    (sq_re, sq_im)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FftSample;

    #[test]
    fn identical_buffers_diff_to_exact_zero() {
        let a: Vec<FftSample> = (0..64)
            .map(|i| FftSample::new(i as f64 * 0.1, -(i as f64)))
            .collect();
        assert_eq!(sum_squared_diff(&a, &a), (0.0, 0.0));
    }

    #[test]
    fn known_difference() {
        let a = vec![FftSample::new(1.0, 2.0), FftSample::new(0.0, 0.0)];
        let b = vec![FftSample::new(0.0, 0.0), FftSample::new(1.0, 0.0)];
        // Real diffs 1 and -1, imaginary diffs 2 and 0.
        assert_eq!(sum_squared_diff(&a, &b), (2.0, 4.0));
    }

    #[test]
    #[should_panic(expected = "different lengths")]
    fn length_mismatch_panics() {
        let a = vec![FftSample::new(0.0, 0.0); 4];
        let b = vec![FftSample::new(0.0, 0.0); 8];
        sum_squared_diff(&a, &b);
    }
}
