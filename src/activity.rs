//! # Activity Catalog Module
//!
//! Static definitions for the selectable workout activities and the
//! biometric channels each of them tracks.
//!
//! ## Key Types
//! - `ChannelKind`: one tracked quantity stream (heart rate, energy, distance)
//! - `ActivityDefinition`: name + activity kind + optional distance channel
//!
//! The catalog order is fixed at compile time and matches the on-screen
//! picker order. Every activity tracks heart rate and active energy;
//! locomotive activities additionally track distance.

use serde::Serialize;

/// One tracked biometric/physical quantity stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChannelKind {
    /// Beats per minute, last value wins.
    HeartRate,
    /// Kilocalories, running sum.
    ActiveEnergy,
    /// Meters, running sum.
    Distance,
}

/// How samples on a channel merge into the running value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Latest sample replaces the stored value.
    Instantaneous,
    /// Each batch adds to the stored total.
    Cumulative,
}

impl ChannelKind {
    /// Merge semantics for this channel.
    pub fn aggregation(&self) -> Aggregation {
        match self {
            ChannelKind::HeartRate => Aggregation::Instantaneous,
            ChannelKind::ActiveEnergy | ChannelKind::Distance => Aggregation::Cumulative,
        }
    }

    /// Physical unit the channel value is expressed in.
    pub fn unit(&self) -> &'static str {
        match self {
            ChannelKind::HeartRate => "bpm",
            ChannelKind::ActiveEnergy => "kcal",
            ChannelKind::Distance => "m",
        }
    }

    /// Get all channel kinds.
    pub fn all() -> [ChannelKind; 3] {
        [
            ChannelKind::HeartRate,
            ChannelKind::ActiveEnergy,
            ChannelKind::Distance,
        ]
    }
}

/// Workout activity category, mirroring the host platform's activity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityKind {
    Swimming,
    Cycling,
    Running,
    StrengthTraining,
    Meditation,
}

/// A selectable workout activity.
///
/// `distance_channel` is present iff the activity covers ground
/// (swimming, cycling, running); strength training and meditation
/// track no distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityDefinition {
    pub name: &'static str,
    pub kind: ActivityKind,
    pub distance_channel: Option<ChannelKind>,
}

impl ActivityDefinition {
    /// The exact channel set a session opens for this activity:
    /// heart rate and active energy always, distance when present.
    pub fn channels(&self) -> Vec<ChannelKind> {
        let mut channels = vec![ChannelKind::HeartRate, ChannelKind::ActiveEnergy];
        if let Some(distance) = self.distance_channel {
            channels.push(distance);
        }
        channels
    }
}

const CATALOG: &[ActivityDefinition] = &[
    ActivityDefinition {
        name: "Swimming",
        kind: ActivityKind::Swimming,
        distance_channel: Some(ChannelKind::Distance),
    },
    ActivityDefinition {
        name: "Cycling",
        kind: ActivityKind::Cycling,
        distance_channel: Some(ChannelKind::Distance),
    },
    ActivityDefinition {
        name: "Running",
        kind: ActivityKind::Running,
        distance_channel: Some(ChannelKind::Distance),
    },
    ActivityDefinition {
        name: "Strength Training",
        kind: ActivityKind::StrengthTraining,
        distance_channel: None,
    },
    ActivityDefinition {
        name: "Meditation",
        kind: ActivityKind::Meditation,
        distance_channel: None,
    },
];

/// All selectable activities, in picker order.
pub fn catalog() -> &'static [ActivityDefinition] {
    CATALOG
}

/// Look an activity up by its display name.
pub fn find(name: &str) -> Option<&'static ActivityDefinition> {
    CATALOG.iter().find(|a| a.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_units() {
        assert_eq!(ChannelKind::HeartRate.unit(), "bpm");
        assert_eq!(ChannelKind::ActiveEnergy.unit(), "kcal");
        assert_eq!(ChannelKind::Distance.unit(), "m");
    }

    #[test]
    fn test_channel_aggregation() {
        assert_eq!(
            ChannelKind::HeartRate.aggregation(),
            Aggregation::Instantaneous
        );
        assert_eq!(
            ChannelKind::ActiveEnergy.aggregation(),
            Aggregation::Cumulative
        );
        assert_eq!(ChannelKind::Distance.aggregation(), Aggregation::Cumulative);
    }

    #[test]
    fn test_catalog_order_and_distance_invariant() {
        let names: Vec<&str> = catalog().iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec![
                "Swimming",
                "Cycling",
                "Running",
                "Strength Training",
                "Meditation"
            ]
        );

        for activity in catalog() {
            let locomotive = matches!(
                activity.kind,
                ActivityKind::Swimming | ActivityKind::Cycling | ActivityKind::Running
            );
            assert_eq!(activity.distance_channel.is_some(), locomotive);
        }
    }

    #[test]
    fn test_channel_sets() {
        let cycling = find("Cycling").unwrap();
        assert_eq!(
            cycling.channels(),
            vec![
                ChannelKind::HeartRate,
                ChannelKind::ActiveEnergy,
                ChannelKind::Distance
            ]
        );

        let strength = find("Strength Training").unwrap();
        assert_eq!(
            strength.channels(),
            vec![ChannelKind::HeartRate, ChannelKind::ActiveEnergy]
        );
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("Base Jumping").is_none());
    }
}
