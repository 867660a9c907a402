//! Sprint forecasting: velocity statistics, per-item risk, completion
//! probability, and what-if scenarios.

pub mod item;
pub mod predictor;
pub mod risk;
pub mod velocity;
pub mod whatif;

pub use item::{BurndownSnapshot, Sprint, VelocityRecord, WorkItem};
pub use predictor::{IterationPrediction, SprintPredictor};
pub use risk::{assess_item_risk, ItemRisk, RiskLevel};
pub use velocity::{Trend, VelocityStats};
pub use whatif::{what_if_add_scope, what_if_remove_person, WhatIfScenario};
