//! # Teampulse Core Library
//!
//! This library provides the core logic for the Teampulse team analytics
//! tool. All operations are available through a standalone CLI binary; the
//! library itself stays free of terminal concerns.
//!
//! ## Architecture
//!
//! - **Workload Engine**: weighted normalization of per-person activity
//!   signals into a bounded percentage and a health classification
//! - **Forecast Engine**: velocity-based sprint completion probability with
//!   per-item risk scoring and what-if scenario evaluation
//! - **Integrations**: HTTP adapters for GitHub, Jira, and calendar providers
//!   (Google, Outlook) that normalize records before the engines run
//! - **Reports**: text, Slack Block Kit, and HTML renderings of engine output
//!
//! ## Key Components
//!
//! - [`WorkloadAnalyzer`]: per-member scoring and team aggregation
//! - [`SprintPredictor`]: completion forecasting over sprint items
//! - [`Config`]: TOML configuration with environment overrides
//! - [`CalendarProvider`]: trait for calendar backends

pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod integrations;
pub mod report;
pub mod stats;
pub mod workload;

pub use cache::AnalysisCache;
pub use config::Config;
pub use error::{AdapterError, ConfigError, CoreError, ReportError, Result};
pub use forecast::{
    BurndownSnapshot, IterationPrediction, ItemRisk, RiskLevel, Sprint, SprintPredictor, Trend,
    VelocityRecord, VelocityStats, WhatIfScenario, WorkItem,
};
pub use integrations::{
    Availability, CalendarClient, CalendarProvider, CoverageGap, GitHubActivity, GitHubClient,
    JiraActivity, JiraClient,
};
pub use report::ReportFormat;
pub use workload::{
    MemberWorkload, RebalancingSuggestion, TeamSummary, WorkloadAnalyzer, WorkloadStatus,
    WorkloadWeights,
};
