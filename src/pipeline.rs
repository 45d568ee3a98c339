use std::time::Instant;

use num_traits::Zero;

use crate::common::{FftSample, FftVec, SignalFrame, SignalFrameRef};
use crate::filter::FilterKind;
use crate::signal::{SignalGenerator, SignalKind};
use crate::transform::Transform;
use crate::validate;

/// Selector inputs sampled once per tick. Owned by the UI/CLI layer; the
/// pipeline never mutates them.
#[derive(Debug, Copy, Clone)]
pub struct Controls {
    pub signal: SignalKind,
    pub filter: FilterKind,
    /// Mirrors the filter's frequency centering, and also adopts the
    /// secondary spectrum wholesale before filtering (two historically
    /// conflated behaviors, kept under one toggle on purpose).
    pub invert_filter: bool,
    /// Run the secondary transform and report the squared difference.
    pub use_secondary: bool,
    pub show_input: bool,
    pub show_reconstructed: bool,
}

impl Default for Controls {
    fn default() -> Controls {
        Controls {
            signal: SignalKind::Square,
            filter: FilterKind::None,
            invert_filter: false,
            use_secondary: true,
            show_input: true,
            show_reconstructed: true,
        }
    }
}

/// Outcome of one tick, handed to the display layer alongside the buffers.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Elapsed seconds the tick was generated at.
    pub time: f64,
    /// Squared real/imaginary differences between the primary and secondary
    /// spectra. `None` when the comparison was skipped.
    pub sq_diff: Option<(f64, f64)>,
    /// The comparison was requested but no secondary source is wired in.
    pub secondary_missing: bool,
}

impl TickReport {
    /// Diagnostic text in the shape the display layer prints verbatim.
    pub fn diagnostic(&self) -> String {
        let mut text = match self.sq_diff {
            Some((sq_re, sq_im)) => format!("SqDiff = {:.3e} , {:.3e}", sq_re, sq_im),
            None => "SqDiff = n/a".to_string(),
        };
        if self.secondary_missing {
            text.push_str("\nERROR: secondary transform unavailable, comparison skipped");
        }
        text
    }
}

/// Runs the whole generate → transform → validate → filter → inverse pass,
/// once per tick. Owns the elapsed-time accumulator and all buffers, which
/// are allocated once and overwritten in place every tick.
pub struct Pipeline {
    size: usize,
    start: Instant,
    generator: SignalGenerator,
    primary: Box<dyn Transform>,
    secondary: Option<Box<dyn Transform>>,
    frame: SignalFrame,
    spectrum_secondary: FftVec,
}

impl Pipeline {
    /// The secondary source is an optional capability; without it the
    /// pipeline still runs, it just cannot cross-validate.
    pub fn new(primary: Box<dyn Transform>, secondary: Option<Box<dyn Transform>>) -> Pipeline {
        let size = primary.size();
        if let Some(secondary) = &secondary {
            assert_eq!(
                secondary.size(),
                size,
                "primary and secondary transform sizes must match"
            );
        }
        Pipeline {
            size,
            start: Instant::now(),
            generator: SignalGenerator::new(),
            primary,
            secondary,
            frame: SignalFrame::new(size),
            spectrum_secondary: vec![FftSample::zero(); size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    /// Buffers produced by the most recent tick.
    pub fn frame(&self) -> SignalFrameRef<'_> {
        SignalFrameRef {
            source: &self.frame.source,
            spectrum: &self.frame.spectrum,
            reconstructed: &self.frame.reconstructed,
        }
    }

    /// One pipeline pass at the current wall-clock elapsed time.
    pub fn tick(&mut self, controls: &Controls) -> TickReport {
        let time = self.start.elapsed().as_secs_f64();
        self.tick_at(controls, time)
    }

    /// One pipeline pass at an explicit time; the seam tests drive.
    pub fn tick_at(&mut self, controls: &Controls, time: f64) -> TickReport {
        self.generator
            .generate(controls.signal, time, &mut self.frame.source);
        self.primary.forward(&self.frame.source, &mut self.frame.spectrum);

        let mut sq_diff = None;
        let mut secondary_missing = false;
        if controls.use_secondary {
            match &self.secondary {
                Some(secondary) => {
                    secondary.forward(&self.frame.source, &mut self.spectrum_secondary);
                    sq_diff = Some(validate::sum_squared_diff(
                        &self.frame.spectrum,
                        &self.spectrum_secondary,
                    ));
                    // Diagnostic override: adopt the secondary spectrum
                    // wholesale. Independent of the filter's mirrored
                    // centering, despite sharing the toggle.
                    if controls.invert_filter {
                        self.frame.spectrum.copy_from_slice(&self.spectrum_secondary);
                    }
                }
                None => secondary_missing = true,
            }
        }

        controls
            .filter
            .apply(&mut self.frame.spectrum, controls.invert_filter);
        self.primary
            .inverse(&self.frame.spectrum, &mut self.frame.reconstructed);

        TickReport {
            time,
            sq_diff,
            secondary_missing,
        }
    }
}
