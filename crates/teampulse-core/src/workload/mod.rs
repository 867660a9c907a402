//! Team workload scoring: weights, per-member records, and the analyzer.

pub mod analyzer;
pub mod member;
pub mod weights;

pub use analyzer::{MemberSignals, WorkloadAnalyzer};
pub use member::{MemberWorkload, RebalancingSuggestion, TeamSummary, WorkloadStatus};
pub use weights::WorkloadWeights;
