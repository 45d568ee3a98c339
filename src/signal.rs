use std::f64::consts::PI;
use std::str::FromStr;

use anyhow::Error;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::common::FftSlice;

/// Which closed-form waveform to synthesize.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SignalKind {
    Square,
    Sine,
    Sawtooth,
    Sinc,
    Random,
}

impl FromStr for SignalKind {
    type Err = Error;

    fn from_str(src: &str) -> Result<SignalKind, Error> {
        match src {
            "square" => Ok(SignalKind::Square),
            "sine" => Ok(SignalKind::Sine),
            "sawtooth" => Ok(SignalKind::Sawtooth),
            "sinc" => Ok(SignalKind::Sinc),
            "random" => Ok(SignalKind::Random),
            _ => Err(Error::msg(format!(
                "unknown signal kind {:?}, expected square|sine|sawtooth|sinc|random",
                src
            ))),
        }
    }
}

/// Synthesizes the deterministic test signal driven each tick.
///
/// Every waveform is a pure function of `(i, time)` except Random, which
/// draws from the generator's own RNG (uniform [0, 1) by default).
pub struct SignalGenerator {
    rng: SmallRng,
}

impl SignalGenerator {
    pub fn new() -> SignalGenerator {
        SignalGenerator {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Fixed-seed generator, for reproducible runs.
    pub fn seeded(seed: u64) -> SignalGenerator {
        SignalGenerator {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fill `out` with the selected waveform at `time`.
    ///
    /// Overwrites the whole buffer; imaginary parts are always zeroed.
    pub fn generate(&mut self, kind: SignalKind, time: f64, out: &mut FftSlice) {
        let size = out.len() as f64;
        for (i, sample) in out.iter_mut().enumerate() {
            let i = i as f64;
            sample.re = match kind {
                SignalKind::Square => {
                    0.5 * time.sin()
                        + if (i + 50.0 * time).rem_euclid(size / 2.0) < size / 4.0 {
                            0.5
                        } else {
                            -0.5
                        }
                }
                SignalKind::Sine => ((4.0 * (1.0 + time.sin())) * 2.0 * PI * i / size).cos(),
                SignalKind::Sawtooth => {
                    0.5 * time.sin() + ((i + 50.0 * time) / 128.0).rem_euclid(1.0) - 0.5
                }
                SignalKind::Sinc => {
                    // Symmetrical around the middle of the buffer.
                    let a = 4.0 * (1.0 + time.sin()) * 2.0 * PI * (i - size / 2.0) * 2.0 / size;
                    if a != 0.0 {
                        a.sin() / a
                    } else {
                        1.0
                    }
                }
                SignalKind::Random => self.rng.gen::<f64>(),
            };
            sample.im = 0.0;
        }
    }
}

impl Default for SignalGenerator {
    fn default() -> SignalGenerator {
        SignalGenerator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FftSample;
    use approx::assert_relative_eq;

    const KINDS: [SignalKind; 5] = [
        SignalKind::Square,
        SignalKind::Sine,
        SignalKind::Sawtooth,
        SignalKind::Sinc,
        SignalKind::Random,
    ];

    #[test]
    fn square_at_time_zero() {
        let mut out = vec![FftSample::new(0.0, 0.0); 8];
        SignalGenerator::seeded(0).generate(SignalKind::Square, 0.0, &mut out);

        let expected = [0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, -0.5];
        for (sample, &want) in out.iter().zip(expected.iter()) {
            assert_eq!(sample.re, want);
        }
    }

    #[test]
    fn sine_sweeps_with_time() {
        let size = 64;
        let mut out = vec![FftSample::new(0.0, 0.0); size];
        SignalGenerator::seeded(0).generate(SignalKind::Sine, 0.0, &mut out);

        // At time 0 the sweep sits at 4 cycles per buffer.
        for (i, sample) in out.iter().enumerate() {
            let want = (4.0 * 2.0 * PI * i as f64 / size as f64).cos();
            assert_relative_eq!(sample.re, want, max_relative = 1e-12);
        }
    }

    #[test]
    fn sinc_peaks_at_center() {
        let size = 128;
        let mut out = vec![FftSample::new(0.0, 0.0); size];
        SignalGenerator::seeded(0).generate(SignalKind::Sinc, 0.0, &mut out);

        // The argument is zero at i = size/2, where sin(a)/a is defined as 1.
        assert_eq!(out[size / 2].re, 1.0);
        for sample in &out {
            assert!(sample.re.is_finite());
            assert!(sample.re.abs() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn random_stays_in_unit_range() {
        let mut out = vec![FftSample::new(0.0, 0.0); 256];
        SignalGenerator::seeded(42).generate(SignalKind::Random, 3.5, &mut out);

        for sample in &out {
            assert!((0.0..1.0).contains(&sample.re));
        }
    }

    #[test]
    fn generate_overwrites_stale_contents() {
        let mut gen = SignalGenerator::seeded(7);
        for &kind in &KINDS {
            let mut out = vec![FftSample::new(9.0, 9.0); 32];
            gen.generate(kind, 1.7, &mut out);
            for sample in &out {
                assert_eq!(sample.im, 0.0);
                assert_ne!(sample.re, 9.0);
            }
        }
    }
}
