//! Thin terminal stand-in for the bitmap plotting layer: one character row
//! per trace instead of a line graph. Nothing here feeds back into the
//! pipeline.

use itertools::Itertools;

use crate::common::{FftSample, FftSlice, SignalFrameRef};
use crate::pipeline::{Controls, TickReport};

const RAMP: &[u8] = b" .:-=+*#%@";

/// Character plotter for the per-tick frame.
pub struct TermScope {
    width: usize,
}

impl TermScope {
    /// `width` is the number of character columns per trace.
    pub fn new(width: usize) -> TermScope {
        assert!(width >= 1);
        TermScope { width }
    }

    /// Map chunk averages of `values` onto the character ramp, with `lo..hi`
    /// spanning the ramp.
    fn row(&self, values: impl Iterator<Item = f64>, len: usize, lo: f64, hi: f64) -> String {
        let chunk = (len + self.width - 1) / self.width;
        values
            .chunks(chunk)
            .into_iter()
            .map(|bins| {
                let mut sum = 0.0;
                let mut count = 0usize;
                for v in bins {
                    sum += v;
                    count += 1;
                }
                let avg = sum / count.max(1) as f64;
                let t = ((avg - lo) / (hi - lo)).clamp(0.0, 1.0);
                let idx = (t * (RAMP.len() - 1) as f64).round() as usize;
                RAMP[idx] as char
            })
            .collect()
    }

    fn trace(&self, label: &str, data: &FftSlice, pick: fn(&FftSample) -> f64) {
        println!(
            "  {:<12} |{}|",
            label,
            self.row(data.iter().map(pick), data.len(), -1.25, 1.25)
        );
    }

    /// Spectrum magnitudes reordered so DC sits in the middle column.
    fn spectrum_trace(&self, data: &FftSlice) {
        let size = data.len();
        let half = size / 2;
        let centered = (0..size).map(|i| data[(i + half) % size].norm());
        println!(
            "  {:<12} |{}|",
            "spectrum",
            self.row(centered, size, 0.0, 0.5)
        );
    }

    /// Print one tick: diagnostic line plus the requested traces.
    pub fn render(&self, frame: SignalFrameRef<'_>, controls: &Controls, report: &TickReport) {
        println!("t = {:8.3}s  {}", report.time, report.diagnostic());
        if controls.show_input {
            self.trace("input re", frame.source, |s| s.re);
        }
        if controls.show_reconstructed {
            self.trace("output re", frame.reconstructed, |s| s.re);
            self.trace("output im", frame.reconstructed, |s| s.im);
        }
        self.spectrum_trace(frame.spectrum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_width_matches_request() {
        let scope = TermScope::new(40);
        let values: Vec<f64> = (0..1024).map(|i| (i as f64 * 0.01).sin()).collect();
        let row = scope.row(values.iter().copied(), values.len(), -1.25, 1.25);
        assert_eq!(row.chars().count(), 40);
    }

    #[test]
    fn row_clamps_out_of_range_values() {
        let scope = TermScope::new(2);
        let row = scope.row([-10.0, -10.0, 10.0, 10.0].iter().copied(), 4, -1.0, 1.0);
        assert_eq!(row, " @");
    }
}
