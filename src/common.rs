use num_complex::Complex;
use num_traits::Zero;

pub type FftSample = Complex<f64>;
pub type FftVec = Vec<FftSample>;
pub type FftSlice = [FftSample];

/// The three live buffers produced by one pipeline tick.
pub struct SignalFrame {
    pub source: FftVec,
    pub spectrum: FftVec,
    pub reconstructed: FftVec,
}

impl SignalFrame {
    pub fn new(size: usize) -> SignalFrame {
        SignalFrame {
            source: vec![FftSample::zero(); size],
            spectrum: vec![FftSample::zero(); size],
            reconstructed: vec![FftSample::zero(); size],
        }
    }
}

/// Borrowed view of one tick's buffers, handed to the display layer.
pub struct SignalFrameRef<'a> {
    pub source: &'a FftSlice,
    pub spectrum: &'a FftSlice,
    pub reconstructed: &'a FftSlice,
}
