//! Normalized cross-correlation via FFT convolution.
//!
//! The full cross-correlation of two length-`L` series has `2L - 1` lags,
//! ordered from lag `-(L-1)` to lag `L-1`. Entry `i` corresponds to lag
//! `i - (L-1)`:
//!
//! ```text
//! cc[lag] = Σ_n x[n + lag] · y[n]  /  (‖x‖ · ‖y‖)
//! ```
//!
//! Both inputs are zero-padded to the next power of two `≥ 2L - 1` so the
//! circular convolution computed by the FFT equals the linear one.

use std::sync::Arc;

use rustfft::{num_complex::Complex64, Fft, FftPlanner};

use crate::error::{ClusterError, Result};
use crate::utils::stats::l2_norm;

/// Forward spectrum of a zero-padded series together with its L2 norm.
#[derive(Debug, Clone)]
pub struct Spectrum {
    bins: Vec<Complex64>,
    norm: f64,
}

impl Spectrum {
    /// Euclidean norm of the original series.
    pub fn norm(&self) -> f64 {
        self.norm
    }
}

/// Planned FFTs for correlating series of one fixed length.
///
/// Planning is done once; spectra can be cached and reused, which is how
/// the batched functions and k-Shape avoid re-transforming the same series.
#[derive(Clone)]
pub struct SpectralCorrelator {
    len: usize,
    fft_size: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl std::fmt::Debug for SpectralCorrelator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralCorrelator")
            .field("len", &self.len)
            .field("fft_size", &self.fft_size)
            .finish()
    }
}

impl SpectralCorrelator {
    /// Plan transforms for series of length `len`.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(ClusterError::EmptyData);
        }
        let fft_size = (2 * len - 1).next_power_of_two();

        let mut planner = FftPlanner::<f64>::new();
        let forward = planner.plan_fft_forward(fft_size);
        let inverse = planner.plan_fft_inverse(fft_size);

        Ok(Self {
            len,
            fft_size,
            forward,
            inverse,
        })
    }

    /// Length of the series this correlator accepts.
    pub fn series_len(&self) -> usize {
        self.len
    }

    /// Number of lags in every correlation output (`2L - 1`).
    pub fn output_len(&self) -> usize {
        2 * self.len - 1
    }

    /// Padded transform size.
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Transform a series, validating its length.
    pub fn spectrum(&self, x: &[f64]) -> Result<Spectrum> {
        if x.len() != self.len {
            return Err(ClusterError::DimensionMismatch {
                expected: self.len,
                got: x.len(),
            });
        }

        let mut bins = vec![Complex64::new(0.0, 0.0); self.fft_size];
        for (b, &v) in bins.iter_mut().zip(x.iter()) {
            b.re = v;
        }
        self.forward.process(&mut bins);

        Ok(Spectrum {
            bins,
            norm: l2_norm(x),
        })
    }

    /// Normalized cross-correlation of two prepared spectra.
    ///
    /// A zero norm on either side makes the denominator infinite, so the
    /// result is all zeros.
    pub fn correlate_spectra(&self, x: &Spectrum, y: &Spectrum) -> Vec<f64> {
        let out_len = self.output_len();
        let den = x.norm * y.norm;
        if den == 0.0 {
            return vec![0.0; out_len];
        }

        let mut buffer: Vec<Complex64> = x
            .bins
            .iter()
            .zip(y.bins.iter())
            .map(|(a, b)| a * b.conj())
            .collect();
        self.inverse.process(&mut buffer);

        // rustfft leaves the inverse unscaled.
        let scale = 1.0 / (self.fft_size as f64 * den);
        let shift = self.len - 1;

        (0..out_len)
            .map(|i| {
                // Negative lags wrap around to the end of the buffer.
                let idx = if i < shift {
                    self.fft_size - (shift - i)
                } else {
                    i - shift
                };
                buffer[idx].re * scale
            })
            .collect()
    }

    /// Normalized cross-correlation of two raw series.
    pub fn correlate(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        let sx = self.spectrum(x)?;
        let sy = self.spectrum(y)?;
        Ok(self.correlate_spectra(&sx, &sy))
    }
}

/// Compute the normalized cross-correlation of two equal-length series.
///
/// # Arguments
/// * `x` - First series
/// * `y` - Second series (same length as `x`)
///
/// # Returns
/// `2L - 1` correlation values ordered by lag, each in `[-1, 1]`.
///
/// # Example
/// ```
/// use shape_cluster::distance::cross_correlation;
///
/// let cc = cross_correlation(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(cc.len(), 7);
/// assert!((cc[3] - 1.0).abs() < 1e-12);
/// ```
pub fn cross_correlation(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() != y.len() {
        return Err(ClusterError::DimensionMismatch {
            expected: x.len(),
            got: y.len(),
        });
    }
    SpectralCorrelator::new(x.len())?.correlate(x, y)
}

/// Cross-correlate every series in `xs` against one reference `y`.
///
/// `result[i] == cross_correlation(&xs[i], y)`.
pub fn cross_correlation_batch<S: AsRef<[f64]>>(xs: &[S], y: &[f64]) -> Result<Vec<Vec<f64>>> {
    let correlator = SpectralCorrelator::new(y.len())?;
    let sy = correlator.spectrum(y)?;

    xs.iter()
        .map(|x| {
            let sx = correlator.spectrum(x.as_ref())?;
            Ok(correlator.correlate_spectra(&sx, &sy))
        })
        .collect()
}

/// Cross-correlate every series in `xs` against every series in `ys`.
///
/// `result[i][j] == cross_correlation(&xs[i], &ys[j])`. Each input series is
/// transformed exactly once.
pub fn cross_correlation_pairwise<S: AsRef<[f64]>, T: AsRef<[f64]>>(
    xs: &[S],
    ys: &[T],
) -> Result<Vec<Vec<Vec<f64>>>> {
    let len = match (xs.first(), ys.first()) {
        (Some(x), _) => x.as_ref().len(),
        (None, Some(y)) => y.as_ref().len(),
        (None, None) => return Ok(Vec::new()),
    };
    let correlator = SpectralCorrelator::new(len)?;

    let y_spectra = ys
        .iter()
        .map(|y| correlator.spectrum(y.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    xs.iter()
        .map(|x| {
            let sx = correlator.spectrum(x.as_ref())?;
            Ok(y_spectra
                .iter()
                .map(|sy| correlator.correlate_spectra(&sx, sy))
                .collect())
        })
        .collect()
}
