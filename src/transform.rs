use std::f64::consts::PI;
use std::sync::Arc;

use anyhow::{Error, Result};
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{Fft, FftPlanner};

use crate::common::FftSlice;
use crate::{MAX_FFT_SIZE, MIN_FFT_SIZE};

/// Boundary to a forward/inverse complex transform engine.
///
/// Both operations are total over buffers of length `size()`. The forward
/// transform is normalized by 1/N; the inverse is unnormalized, so
/// `inverse(forward(x))` reproduces `x` up to roundoff. Implementations are
/// synchronous and bounded-time for a fixed size.
pub trait Transform {
    fn size(&self) -> usize;

    /// Complex-to-complex forward transform of `input` into `output`.
    /// Both slices must have length `size()`.
    fn forward(&self, input: &FftSlice, output: &mut FftSlice);

    /// Complex-to-complex inverse transform of `input` into `output`.
    /// Both slices must have length `size()`.
    fn inverse(&self, input: &FftSlice, output: &mut FftSlice);
}

fn check_size(size: usize) -> Result<()> {
    if !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&size) {
        return Err(Error::msg(format!(
            "transform size {} must be within {}..={}",
            size, MIN_FFT_SIZE, MAX_FFT_SIZE
        )));
    }
    if !size.is_power_of_two() {
        return Err(Error::msg(format!(
            "transform size {} must be a power of two",
            size
        )));
    }
    Ok(())
}

/// Primary transform source: rustfft plans cached at construction.
pub struct PlannedFft {
    size: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl PlannedFft {
    pub fn new(size: usize) -> Result<PlannedFft> {
        check_size(size)?;
        let mut planner = FftPlanner::new();
        Ok(PlannedFft {
            size,
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
        })
    }
}

impl Transform for PlannedFft {
    fn size(&self) -> usize {
        self.size
    }

    fn forward(&self, input: &FftSlice, output: &mut FftSlice) {
        assert_eq!(input.len(), self.size);
        assert_eq!(output.len(), self.size);
        output.copy_from_slice(input);
        self.forward.process(output);
        let scale = 1.0 / self.size as f64;
        for bin in output.iter_mut() {
            *bin *= scale;
        }
    }

    fn inverse(&self, input: &FftSlice, output: &mut FftSlice) {
        assert_eq!(input.len(), self.size);
        assert_eq!(output.len(), self.size);
        output.copy_from_slice(input);
        self.inverse.process(output);
    }
}

/// Ground-truth transform source: the textbook O(N²) sum, sharing no code
/// with rustfft. Too slow for large sizes in a hot loop, which is fine for
/// a validation collaborator.
pub struct DirectDft {
    size: usize,
}

impl DirectDft {
    pub fn new(size: usize) -> Result<DirectDft> {
        check_size(size)?;
        Ok(DirectDft { size })
    }

    fn process(&self, input: &FftSlice, output: &mut FftSlice, sign: f64, scale: f64) {
        assert_eq!(input.len(), self.size);
        assert_eq!(output.len(), self.size);
        let n = self.size;
        for (k, bin) in output.iter_mut().enumerate() {
            let mut acc = Complex::zero();
            for (i, sample) in input.iter().enumerate() {
                // k*i reduced mod n keeps the angle small for accuracy.
                let angle = sign * 2.0 * PI * (k * i % n) as f64 / n as f64;
                acc += sample * Complex::new(angle.cos(), angle.sin());
            }
            *bin = acc * scale;
        }
    }
}

impl Transform for DirectDft {
    fn size(&self) -> usize {
        self.size
    }

    fn forward(&self, input: &FftSlice, output: &mut FftSlice) {
        self.process(input, output, -1.0, 1.0 / self.size as f64);
    }

    fn inverse(&self, input: &FftSlice, output: &mut FftSlice) {
        self.process(input, output, 1.0, 1.0);
    }
}
