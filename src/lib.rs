pub mod common;
pub mod filter;
pub mod pipeline;
pub mod signal;
pub mod term;
pub mod transform;
pub mod validate;

pub const MIN_FFT_SIZE: usize = 4;
pub const MAX_FFT_SIZE: usize = 16384;

/// Transform size used by the harness unless overridden on the command line.
pub const DEFAULT_SIGNAL_SIZE: usize = 1024;
