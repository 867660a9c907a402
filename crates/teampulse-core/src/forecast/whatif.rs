//! Counterfactual sprint scenarios.
//!
//! Scenarios copy the item set, mutate the copy, and re-run the forecast
//! against the same sprint and history. Originals are never touched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forecast::item::{Sprint, VelocityRecord, WorkItem};
use crate::forecast::predictor::{IterationPrediction, SprintPredictor};

/// An original forecast paired with a forecast of the mutated item set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfScenario {
    pub scenario: String,
    pub impact: String,
    pub original: IterationPrediction,
    pub modified: IterationPrediction,
}

impl WhatIfScenario {
    pub fn probability_change(&self) -> f64 {
        self.modified.probability - self.original.probability
    }
}

/// Simulate a person leaving mid-sprint.
///
/// Their unfinished items are matched by case-insensitive substring on the
/// assignee name, which can over-match on short names. Matched items lose
/// their assignee and gain a "blocked" label.
pub fn what_if_remove_person(
    predictor: &SprintPredictor,
    items: &[WorkItem],
    sprint: &Sprint,
    history: &[VelocityRecord],
    person: &str,
    now: DateTime<Utc>,
) -> WhatIfScenario {
    let original = predictor.predict_at(items, sprint, history, now);

    let needle = person.to_lowercase();
    let mut affected_count = 0usize;
    let mut affected_points = 0.0f64;

    let modified_items: Vec<WorkItem> = items
        .iter()
        .map(|item| {
            let owned = item
                .assignee
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(&needle));
            if owned && !item.is_done() {
                affected_count += 1;
                affected_points += item.points();
                let mut copy = item.clone();
                copy.assignee = None;
                copy.labels.push("blocked".to_string());
                copy
            } else {
                item.clone()
            }
        })
        .collect();

    let modified = predictor.predict_at(&modified_items, sprint, history, now);

    let impact = format!(
        "Removing {person} affects {affected_count} item(s) worth {affected_points} point(s); \
         completion probability moves from {:.1}% to {:.1}%",
        original.probability, modified.probability
    );

    WhatIfScenario {
        scenario: format!("Remove {person} from the sprint"),
        impact,
        original,
        modified,
    }
}

/// Simulate extra scope landing mid-sprint as one unassigned, not-started item.
pub fn what_if_add_scope(
    predictor: &SprintPredictor,
    items: &[WorkItem],
    sprint: &Sprint,
    history: &[VelocityRecord],
    points: f64,
    now: DateTime<Utc>,
) -> WhatIfScenario {
    let original = predictor.predict_at(items, sprint, history, now);

    let mut modified_items = items.to_vec();
    modified_items.push(WorkItem {
        key: "SCOPE-NEW".to_string(),
        summary: format!("Additional scope ({points} points)"),
        status: "To Do".to_string(),
        assignee: None,
        story_points: Some(points),
        labels: vec![],
    });

    let modified = predictor.predict_at(&modified_items, sprint, history, now);

    let impact = format!(
        "Adding {points} point(s) of scope moves completion probability from {:.1}% to {:.1}%",
        original.probability, modified.probability
    );

    WhatIfScenario {
        scenario: format!("Add {points} points of scope"),
        impact,
        original,
        modified,
    }
}
