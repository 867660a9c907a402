//! Velocity statistics over completed sprints.

use serde::{Deserialize, Serialize};

use crate::forecast::item::VelocityRecord;
use crate::stats;

/// Direction of the velocity over the analyzed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    Unknown,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
            Trend::Unknown => "unknown",
        }
    }
}

/// Aggregate statistics over historical completed-points totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityStats {
    pub average: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub trend: Trend,
    pub sprints_analyzed: usize,
}

impl VelocityStats {
    pub fn from_history(history: &[VelocityRecord]) -> Self {
        let completed: Vec<f64> = history.iter().map(|r| r.completed_points).collect();
        Self {
            average: stats::mean(&completed),
            median: stats::median(&completed),
            std_dev: stats::population_std_dev(&completed),
            min: completed.iter().copied().fold(f64::INFINITY, f64::min),
            max: completed.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            trend: trend_of(&completed),
            sprints_analyzed: completed.len(),
        }
        .normalized()
    }

    fn normalized(mut self) -> Self {
        if self.sprints_analyzed == 0 {
            self.min = 0.0;
            self.max = 0.0;
        }
        self
    }

    /// History-backed forecasting needs at least 3 sprints.
    pub fn is_reliable(&self) -> bool {
        self.sprints_analyzed >= 3
    }

    /// One-std-dev band around the average, floored at 0.
    pub fn confidence_range(&self) -> (f64, f64) {
        (
            (self.average - self.std_dev).max(0.0),
            self.average + self.std_dev,
        )
    }
}

/// Trend over the first-half/second-half split. The second half must beat
/// the first by 10% to count as improving, or trail by 10% to count as
/// declining. Under 4 samples the split is meaningless.
fn trend_of(completed: &[f64]) -> Trend {
    if completed.len() < 4 {
        return Trend::Unknown;
    }
    let mid = completed.len() / 2;
    let first = stats::mean(&completed[..mid]);
    let second = stats::mean(&completed[mid..]);
    if second > first * 1.1 {
        Trend::Improving
    } else if second < first * 0.9 {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(completed: f64) -> VelocityRecord {
        VelocityRecord {
            sprint_id: 1,
            sprint_name: "Sprint".to_string(),
            end_date: None,
            committed_points: completed,
            completed_points: completed,
        }
    }

    fn history(values: &[f64]) -> Vec<VelocityRecord> {
        values.iter().map(|v| record(*v)).collect()
    }

    #[test]
    fn test_basic_stats() {
        let stats = VelocityStats::from_history(&history(&[10.0, 20.0, 30.0]));
        assert_eq!(stats.average, 20.0);
        assert_eq!(stats.median, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert_eq!(stats.sprints_analyzed, 3);
        assert!(stats.is_reliable());
    }

    #[test]
    fn test_empty_history() {
        let stats = VelocityStats::from_history(&[]);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.trend, Trend::Unknown);
        assert!(!stats.is_reliable());
    }

    #[test]
    fn test_two_sprints_not_reliable() {
        assert!(!VelocityStats::from_history(&history(&[10.0, 12.0])).is_reliable());
    }

    #[test]
    fn test_trend_improving() {
        let stats = VelocityStats::from_history(&history(&[10.0, 10.0, 15.0, 15.0]));
        assert_eq!(stats.trend, Trend::Improving);
    }

    #[test]
    fn test_trend_declining() {
        let stats = VelocityStats::from_history(&history(&[20.0, 20.0, 10.0, 10.0]));
        assert_eq!(stats.trend, Trend::Declining);
    }

    #[test]
    fn test_trend_stable_within_band() {
        let stats = VelocityStats::from_history(&history(&[20.0, 20.0, 21.0, 21.0]));
        assert_eq!(stats.trend, Trend::Stable);
    }

    #[test]
    fn test_trend_unknown_under_four() {
        let stats = VelocityStats::from_history(&history(&[10.0, 30.0, 50.0]));
        assert_eq!(stats.trend, Trend::Unknown);
    }

    #[test]
    fn test_confidence_range_floored_at_zero() {
        let stats = VelocityStats::from_history(&history(&[1.0, 1.0, 20.0]));
        let (low, high) = stats.confidence_range();
        assert!(low >= 0.0);
        assert!(high >= stats.average);
    }
}
