use std::str::FromStr;

use anyhow::Error;

use crate::common::FftSlice;

/// Remap bin index `i` so zero frequency sits in the middle of the buffer.
///
/// The inverted mode mirrors the spectrum instead; note it is intentionally
/// not the negation of the standard convention (for `size = 8`, bin 1 maps
/// to 1 normally but to 3 when inverted).
pub fn centered_frequency(i: usize, size: usize, inverted: bool) -> i64 {
    let half = (size / 2) as i64;
    let size = size as i64;
    let i = i as i64;
    if !inverted {
        (i + half) % size - half
    } else {
        (size - i) % size - half
    }
}

/// Gain mask applied bin-wise to a spectrum, indexed by centered frequency.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterKind {
    None,
    CutLarge,
    CutMedium,
    CutShort,
    Exponential,
    Gaussian,
    Inverse,
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(src: &str) -> Result<FilterKind, Error> {
        match src {
            "none" => Ok(FilterKind::None),
            "cut-large" => Ok(FilterKind::CutLarge),
            "cut-medium" => Ok(FilterKind::CutMedium),
            "cut-short" => Ok(FilterKind::CutShort),
            "exponential" => Ok(FilterKind::Exponential),
            "gaussian" => Ok(FilterKind::Gaussian),
            "inverse" => Ok(FilterKind::Inverse),
            _ => Err(Error::msg(format!(
                "unknown filter kind {:?}, expected \
                 none|cut-large|cut-medium|cut-short|exponential|gaussian|inverse",
                src
            ))),
        }
    }
}

impl FilterKind {
    /// Scalar gain for one centered frequency.
    pub fn gain(self, frequency: i64) -> f64 {
        let f = frequency.abs() as f64;
        match self {
            FilterKind::None => 1.0,
            FilterKind::CutLarge => {
                if f > 256.0 {
                    0.0
                } else {
                    1.0
                }
            }
            FilterKind::CutMedium => {
                if f > 128.0 {
                    0.0
                } else {
                    1.0
                }
            }
            FilterKind::CutShort => {
                if f > 64.0 {
                    0.0
                } else {
                    1.0
                }
            }
            FilterKind::Exponential => (-0.01 * f).exp(),
            FilterKind::Gaussian => (-0.005 * f * f).exp(),
            // Denominator is at least 1, no zero guard needed beyond the +1.
            FilterKind::Inverse => (4.0 / (1.0 + f)).min(1.0),
        }
    }

    /// Scale every bin of `spectrum` by its gain, in place.
    ///
    /// `None` leaves the buffer untouched. The cut kinds are idempotent;
    /// the continuous kinds compound when applied repeatedly.
    pub fn apply(self, spectrum: &mut FftSlice, inverted: bool) {
        if self == FilterKind::None {
            return;
        }
        let size = spectrum.len();
        for (i, bin) in spectrum.iter_mut().enumerate() {
            *bin *= self.gain(centered_frequency(i, size, inverted));
        }
    }
}
