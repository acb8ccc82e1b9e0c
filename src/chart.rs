//! Price chart state
//!
//! The live view keeps a bounded FIFO of ticker prices; the OHLC view is a
//! full series rebuilt on every refresh. Both are owned by [`ChartState`],
//! which belongs to the dashboard instance.

use std::collections::VecDeque;

use crate::config::ChartSource;

/// One plotted point
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub price: f64,
}

/// Rolling window of the most recent points
#[derive(Debug, Clone)]
pub struct ChartBuffer {
    capacity: usize,
    points: VecDeque<ChartPoint>,
}

impl ChartBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: VecDeque::new(),
        }
    }

    /// Append a point, evicting the oldest once the window is full
    pub fn push(&mut self, label: impl Into<String>, price: f64) {
        self.points.push_back(ChartPoint {
            label: label.into(),
            price,
        });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.label.as_str())
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Oldest to newest
    pub fn points(&self) -> Vec<ChartPoint> {
        self.points.iter().cloned().collect()
    }
}

/// Everything the chart component owns
#[derive(Debug, Clone)]
pub struct ChartState {
    pub source: ChartSource,
    pub live: ChartBuffer,
    /// Last OHLC series, replaced wholesale
    pub series: Vec<ChartPoint>,
}

impl ChartState {
    pub fn new(source: ChartSource, window: usize) -> Self {
        Self {
            source,
            live: ChartBuffer::new(window),
            series: Vec::new(),
        }
    }

    /// Forget everything plotted for the previous pair
    pub fn reset(&mut self) {
        self.live.clear();
        self.series.clear();
    }

    /// Points to draw for the configured source
    pub fn visible_points(&self) -> Vec<ChartPoint> {
        match self.source {
            ChartSource::Ticker => self.live.points(),
            ChartSource::Ohlc => self.series.clone(),
        }
    }
}
