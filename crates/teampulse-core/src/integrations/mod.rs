//! External-service adapters.
//!
//! Each adapter fetches and normalizes records before the engines run; the
//! engines never see transport errors, only records or absences.

pub mod calendar;
pub mod github;
pub mod jira;

pub use calendar::{Availability, CalendarClient, CalendarProvider, CoverageGap};
pub use github::{GitHubActivity, GitHubClient};
pub use jira::{JiraActivity, JiraClient};
