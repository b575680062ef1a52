//! Temporal smoothing of the distance time series.

use std::collections::VecDeque;

/// Trimmed sliding-window filter over raw distance samples.
///
/// Owned by the caller, one per logical target stream; there is no hidden
/// process-wide history.
#[derive(Clone, Debug)]
pub struct DistanceFilter {
    window: usize,
    samples: VecDeque<u32>,
}

impl Default for DistanceFilter {
    fn default() -> Self {
        Self::new(5)
    }
}

impl DistanceFilter {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            samples: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a raw sample and return the smoothed distance.
    ///
    /// Once the window holds at least 3 samples, the single minimum and
    /// single maximum are dropped and the rest averaged, which suppresses
    /// one-off outliers such as a specular highlight shrinking the apparent
    /// radius for a frame. With fewer samples the plain mean is returned.
    /// Output is truncated to whole centimeters.
    pub fn smooth(&mut self, raw: u32) -> u32 {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(raw);

        if self.samples.len() >= 3 {
            let mut sorted: Vec<u64> = self.samples.iter().map(|&d| d as u64).collect();
            sorted.sort_unstable();
            let trimmed = &sorted[1..sorted.len() - 1];
            (trimmed.iter().sum::<u64>() / trimmed.len() as u64) as u32
        } else {
            let sum: u64 = self.samples.iter().map(|&d| d as u64).sum();
            (sum / self.samples.len() as u64) as u32
        }
    }
}
