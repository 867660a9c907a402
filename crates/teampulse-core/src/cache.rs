//! In-process cache of the latest analysis results.
//!
//! Overwritten on each successful fetch; no consistency guarantee beyond
//! that. Lets repeated report renders skip redundant adapter calls.

use chrono::{DateTime, Duration, Utc};

use crate::forecast::IterationPrediction;
use crate::workload::TeamSummary;

#[derive(Debug, Default)]
pub struct AnalysisCache {
    summary: Option<(TeamSummary, DateTime<Utc>)>,
    prediction: Option<(IterationPrediction, DateTime<Utc>)>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_summary(&mut self, summary: TeamSummary) {
        self.summary = Some((summary, Utc::now()));
    }

    pub fn store_prediction(&mut self, prediction: IterationPrediction) {
        self.prediction = Some((prediction, Utc::now()));
    }

    /// Latest summary if stored within `max_age`.
    pub fn summary(&self, max_age: Duration) -> Option<&TeamSummary> {
        self.summary
            .as_ref()
            .filter(|(_, at)| Utc::now() - *at <= max_age)
            .map(|(summary, _)| summary)
    }

    /// Latest prediction if stored within `max_age`.
    pub fn prediction(&self, max_age: Duration) -> Option<&IterationPrediction> {
        self.prediction
            .as_ref()
            .filter(|(_, at)| Utc::now() - *at <= max_age)
            .map(|(prediction, _)| prediction)
    }

    pub fn clear(&mut self) {
        self.summary = None;
        self.prediction = None;
    }
}
