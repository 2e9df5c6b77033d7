//! Input smoothing: fixed-length ring buffers averaging the last N samples.

use std::collections::VecDeque;

/// A fixed-length ring of the last N scalar samples.
///
/// Each push drops the oldest sample once the ring is full; the output is
/// the accumulated sum divided by the *configured* factor N, not by the
/// count of samples collected so far. Until the ring fills, early outputs
/// are therefore under-weighted toward zero. That startup bias is part of
/// the easing curve users actually see and is kept as-is.
///
/// A factor of 1 is a passthrough.
#[derive(Debug, Clone)]
pub struct SmoothingBuffer {
    samples: VecDeque<f64>,
    factor: usize,
}

impl SmoothingBuffer {
    /// `factor` must be >= 1; validated upstream in `ZoomConfig`.
    pub fn new(factor: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(factor),
            factor: factor.max(1),
        }
    }

    /// Push a sample and return the current running average.
    pub fn push(&mut self, sample: f64) -> f64 {
        if self.samples.len() == self.factor {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.average()
    }

    /// Sum of buffered samples divided by the configured factor.
    pub fn average(&self) -> f64 {
        self.samples.iter().sum::<f64>() / self.factor as f64
    }
}

/// Paired x/y smoothing for pointer positions.
#[derive(Debug, Clone)]
pub struct PointSmoother {
    x: SmoothingBuffer,
    y: SmoothingBuffer,
}

impl PointSmoother {
    pub fn new(factor: usize) -> Self {
        Self {
            x: SmoothingBuffer::new(factor),
            y: SmoothingBuffer::new(factor),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) -> (f64, f64) {
        (self.x.push(x), self.y.push(y))
    }
}
