// Rolling per-field sample history
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct SamplePoint {
    pub time: String,
    pub value: f64,
}

impl SamplePoint {
    pub fn new(time: String, value: f64) -> Self {
        Self { time, value }
    }
}

/// Chronological window of the most recent samples for one sensor field.
/// Appending beyond the cap evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct HistorySeries {
    cap: usize,
    samples: VecDeque<SamplePoint>,
}

impl HistorySeries {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            samples: VecDeque::with_capacity(cap),
        }
    }

    pub fn push(&mut self, sample: SamplePoint) {
        self.samples.push_back(sample);
        while self.samples.len() > self.cap {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest to newest.
    pub fn samples(&self) -> impl Iterator<Item = &SamplePoint> {
        self.samples.iter()
    }
}
