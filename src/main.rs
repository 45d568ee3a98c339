use std::thread;
use std::time::Duration;

use anyhow::{Error, Result};
use structopt::StructOpt;

use verispec::filter::FilterKind;
use verispec::pipeline::{Controls, Pipeline};
use verispec::signal::SignalKind;
use verispec::term::TermScope;
use verispec::transform::{DirectDft, PlannedFft, Transform};
use verispec::{MAX_FFT_SIZE, MIN_FFT_SIZE};

fn parse_signal_size(src: &str) -> Result<usize> {
    let num: usize = src
        .parse()
        .map_err(|_| Error::msg(format!("signal size {} must be an integer", src)))?;

    if num > MAX_FFT_SIZE {
        return Err(Error::msg(format!(
            "signal size {} must be <= {}",
            num, MAX_FFT_SIZE
        )));
    }
    if num < MIN_FFT_SIZE {
        return Err(Error::msg(format!(
            "signal size {} must be >= {}",
            num, MIN_FFT_SIZE
        )));
    }
    if !num.is_power_of_two() {
        return Err(Error::msg(format!(
            "signal size {} must be a power of two",
            num
        )));
    }
    Ok(num)
}

/// Spectral-filtering verification harness: synthesizes a test signal each
/// tick, transforms it with two independent engines, cross-validates the
/// spectra, applies a frequency-indexed filter mask and reconstructs the
/// signal by inverse transform.
#[derive(StructOpt, Debug)]
#[structopt(name = "verispec")]
pub struct Opt {
    /// Signal to synthesize each tick
    /// (square|sine|sawtooth|sinc|random).
    #[structopt(short, long, default_value = "square")]
    signal: SignalKind,

    /// Filter mask applied to the spectrum
    /// (none|cut-large|cut-medium|cut-short|exponential|gaussian|inverse).
    #[structopt(short, long, default_value = "none")]
    filter: FilterKind,

    /// Number of samples per transform block. Must be a power of two.
    #[structopt(long, default_value = "1024", parse(try_from_str = parse_signal_size))]
    size: usize,

    /// Number of ticks to run before exiting.
    #[structopt(short = "n", long, default_value = "8")]
    ticks: u32,

    /// Milliseconds between ticks.
    #[structopt(long, default_value = "100")]
    period_ms: u64,

    /// Plot width in character columns.
    #[structopt(long, default_value = "72")]
    plot_width: usize,

    /// Mirror the filter's frequency centering, and adopt the secondary
    /// spectrum before filtering.
    #[structopt(long)]
    invert_filter: bool,

    /// Skip the secondary-transform comparison.
    #[structopt(long)]
    no_compare: bool,

    /// Run without the ground-truth transform wired in
    /// (exercises the degraded single-source path).
    #[structopt(long)]
    no_secondary: bool,

    /// Hide the input trace.
    #[structopt(long)]
    hide_input: bool,

    /// Hide the reconstructed traces.
    #[structopt(long)]
    hide_reconstructed: bool,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let primary: Box<dyn Transform> = Box::new(PlannedFft::new(opt.size)?);
    let secondary: Option<Box<dyn Transform>> = if opt.no_secondary {
        None
    } else {
        Some(Box::new(DirectDft::new(opt.size)?))
    };

    let mut pipeline = Pipeline::new(primary, secondary);
    let controls = Controls {
        signal: opt.signal,
        filter: opt.filter,
        invert_filter: opt.invert_filter,
        use_secondary: !opt.no_compare,
        show_input: !opt.hide_input,
        show_reconstructed: !opt.hide_reconstructed,
    };

    if opt.no_secondary && !opt.no_compare {
        eprintln!(
            "warning: no ground-truth transform wired in, \
             comparison will be skipped every tick"
        );
    }

    let scope = TermScope::new(opt.plot_width);
    for tick in 0..opt.ticks {
        let report = pipeline.tick(&controls);
        scope.render(pipeline.frame(), &controls, &report);
        if tick + 1 < opt.ticks {
            thread::sleep(Duration::from_millis(opt.period_ms));
        }
    }

    Ok(())
}
