//! # Metric Accumulation Module
//!
//! Merges streaming sample batches into per-channel running values.
//! Instantaneous channels (heart rate) keep the latest sample;
//! cumulative channels (energy, distance) sum every sample delivered.
//!
//! Samples arrive in non-decreasing timestamp order from the host and
//! are taken as-is: negative or NaN values are not validated here (the
//! host owns data quality).

use crate::activity::{Aggregation, ChannelKind};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One measured value with its capture time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub time: DateTime<Utc>,
}

impl Sample {
    pub fn new(value: f64, time: DateTime<Utc>) -> Self {
        Self { value, time }
    }
}

/// Running totals for the channels of one session.
///
/// Created empty at session start and discarded with the session;
/// there is no in-place reset.
#[derive(Debug, Default)]
pub struct MetricAccumulator {
    totals: HashMap<ChannelKind, f64>,
}

impl MetricAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an ordered sample batch into the channel's running value.
    ///
    /// Empty batches are a no-op. Instantaneous channels store the last
    /// sample's value; cumulative channels add the batch sum to the
    /// current total.
    pub fn ingest(&mut self, channel: ChannelKind, samples: &[Sample]) {
        let last = match samples.last() {
            Some(last) => last,
            None => return,
        };

        match channel.aggregation() {
            Aggregation::Instantaneous => {
                self.totals.insert(channel, last.value);
            }
            Aggregation::Cumulative => {
                let sum: f64 = samples.iter().map(|s| s.value).sum();
                *self.totals.entry(channel).or_insert(0.0) += sum;
            }
        }
    }

    /// Current value for a channel, `0.0` if never ingested.
    pub fn value(&self, channel: ChannelKind) -> f64 {
        self.totals.get(&channel).copied().unwrap_or(0.0)
    }

    /// Totals for the given channel set, defaulting unseen channels to `0.0`.
    pub fn snapshot(&self, channels: &[ChannelKind]) -> HashMap<ChannelKind, f64> {
        channels.iter().map(|&ch| (ch, self.value(ch))).collect()
    }
}
