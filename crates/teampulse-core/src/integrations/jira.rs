//! Jira adapter -- sprint items, per-person assignments, and velocity history.

use reqwest::Client;
use serde_json::Value;

use crate::error::AdapterError;
use crate::forecast::item::{Sprint, VelocityRecord, WorkItem};

const USER_AGENT: &str = "teampulse";

/// Default Jira Cloud custom field carrying story point estimates.
const STORY_POINTS_FIELD: &str = "customfield_10016";

/// One person's assigned sprint items.
#[derive(Debug, Clone)]
pub struct JiraActivity {
    pub account_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub items: Vec<WorkItem>,
}

impl JiraActivity {
    pub fn story_points(&self) -> f64 {
        self.items.iter().map(WorkItem::points).sum()
    }

    pub fn in_progress_count(&self) -> u32 {
        self.items.iter().filter(|i| i.is_in_progress()).count() as u32
    }

    pub fn blocked_count(&self) -> u32 {
        self.items.iter().filter(|i| i.is_blocked()).count() as u32
    }
}

pub struct JiraClient {
    http: Client,
    base_url: String,
    email: String,
    token: String,
}

impl JiraClient {
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            email: email.into(),
            token: token.into(),
        }
    }

    async fn get(&self, path: &str) -> Result<Value, AdapterError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| AdapterError::Http {
                service: "Jira".to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AdapterError::Api {
                service: "Jira".to_string(),
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response.json().await.map_err(|source| AdapterError::Http {
            service: "Jira".to_string(),
            source,
        })
    }

    /// Boards visible to the configured account, as (id, name) pairs.
    pub async fn boards(&self) -> Result<Vec<(u64, String)>, AdapterError> {
        let data = self.get("/rest/agile/1.0/board?maxResults=50").await?;
        let boards = data["values"].as_array().ok_or_else(|| AdapterError::Malformed {
            service: "Jira".to_string(),
            message: "board list missing values array".to_string(),
        })?;
        Ok(boards
            .iter()
            .map(|b| {
                (
                    b["id"].as_u64().unwrap_or(0),
                    b["name"].as_str().unwrap_or("(unnamed)").to_string(),
                )
            })
            .collect())
    }

    /// The currently active sprint on a board, if any.
    pub async fn active_sprint(&self, board_id: u64) -> Result<Option<Sprint>, AdapterError> {
        let data = self
            .get(&format!(
                "/rest/agile/1.0/board/{board_id}/sprint?state=active"
            ))
            .await?;
        let sprints = data["values"].as_array().ok_or_else(|| AdapterError::Malformed {
            service: "Jira".to_string(),
            message: "sprint list missing values array".to_string(),
        })?;
        Ok(sprints.first().map(parse_sprint))
    }

    /// All items in a sprint.
    pub async fn sprint_items(&self, sprint_id: u64) -> Result<Vec<WorkItem>, AdapterError> {
        let data = self
            .get(&format!(
                "/rest/agile/1.0/sprint/{sprint_id}/issue?maxResults=200&fields=summary,status,assignee,labels,{STORY_POINTS_FIELD}"
            ))
            .await?;
        let issues = data["issues"].as_array().ok_or_else(|| AdapterError::Malformed {
            service: "Jira".to_string(),
            message: "issue search missing issues array".to_string(),
        })?;
        Ok(issues.iter().map(parse_item).collect())
    }

    /// Sprint items grouped by assignee; unassigned items are dropped here
    /// (they surface through the forecast engine instead).
    pub async fn team_activity(&self, sprint_id: u64) -> Result<Vec<JiraActivity>, AdapterError> {
        let data = self
            .get(&format!(
                "/rest/agile/1.0/sprint/{sprint_id}/issue?maxResults=200&fields=summary,status,assignee,labels,{STORY_POINTS_FIELD}"
            ))
            .await?;
        let issues = data["issues"].as_array().ok_or_else(|| AdapterError::Malformed {
            service: "Jira".to_string(),
            message: "issue search missing issues array".to_string(),
        })?;

        let mut activities: Vec<JiraActivity> = Vec::new();
        for issue in issues {
            let assignee = &issue["fields"]["assignee"];
            let Some(account_id) = assignee["accountId"].as_str() else {
                continue;
            };
            let item = parse_item(issue);
            match activities.iter_mut().find(|a| a.account_id == account_id) {
                Some(activity) => activity.items.push(item),
                None => activities.push(JiraActivity {
                    account_id: account_id.to_string(),
                    display_name: assignee["displayName"]
                        .as_str()
                        .unwrap_or("(unknown)")
                        .to_string(),
                    email: assignee["emailAddress"].as_str().map(|e| e.to_string()),
                    items: vec![item],
                }),
            }
        }
        Ok(activities)
    }

    /// Completed-points totals for the most recent `count` closed sprints,
    /// oldest first so trend analysis reads left to right.
    pub async fn velocity_history(
        &self,
        board_id: u64,
        count: usize,
    ) -> Result<Vec<VelocityRecord>, AdapterError> {
        let data = self
            .get(&format!(
                "/rest/agile/1.0/board/{board_id}/sprint?state=closed&maxResults=50"
            ))
            .await?;
        let sprints = data["values"].as_array().ok_or_else(|| AdapterError::Malformed {
            service: "Jira".to_string(),
            message: "sprint list missing values array".to_string(),
        })?;

        let recent: Vec<&Value> = sprints.iter().rev().take(count).collect();
        let mut records = Vec::with_capacity(recent.len());
        for value in recent.into_iter().rev() {
            let sprint = parse_sprint(value);
            let items = self.sprint_items(sprint.id).await?;
            let committed: f64 = items.iter().map(WorkItem::points).sum();
            let completed: f64 = items
                .iter()
                .filter(|i| i.is_done())
                .map(WorkItem::points)
                .sum();
            records.push(VelocityRecord {
                sprint_id: sprint.id,
                sprint_name: sprint.name,
                end_date: sprint.end_date,
                committed_points: committed,
                completed_points: completed,
            });
        }
        Ok(records)
    }
}

fn parse_sprint(value: &Value) -> Sprint {
    Sprint {
        id: value["id"].as_u64().unwrap_or(0),
        name: value["name"].as_str().unwrap_or("(unnamed)").to_string(),
        state: value["state"].as_str().unwrap_or("unknown").to_string(),
        start_date: value["startDate"]
            .as_str()
            .and_then(|s| s.parse().ok()),
        end_date: value["endDate"].as_str().and_then(|s| s.parse().ok()),
        goal: value["goal"].as_str().map(|g| g.to_string()),
    }
}

fn parse_item(issue: &Value) -> WorkItem {
    let fields = &issue["fields"];
    WorkItem {
        key: issue["key"].as_str().unwrap_or("(no key)").to_string(),
        summary: fields["summary"].as_str().unwrap_or("(no summary)").to_string(),
        status: fields["status"]["name"]
            .as_str()
            .unwrap_or("unknown")
            .to_string(),
        assignee: fields["assignee"]["displayName"]
            .as_str()
            .map(|n| n.to_string()),
        story_points: fields[STORY_POINTS_FIELD].as_f64(),
        labels: fields["labels"]
            .as_array()
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(|l| l.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_item_full() {
        let issue = json!({
            "key": "TP-12",
            "fields": {
                "summary": "Fix login flow",
                "status": {"name": "In Progress"},
                "assignee": {"displayName": "Alice"},
                "customfield_10016": 5.0,
                "labels": ["backend", "blocked"]
            }
        });
        let item = parse_item(&issue);
        assert_eq!(item.key, "TP-12");
        assert_eq!(item.status, "In Progress");
        assert_eq!(item.assignee.as_deref(), Some("Alice"));
        assert_eq!(item.story_points, Some(5.0));
        assert!(item.is_blocked());
    }

    #[test]
    fn test_parse_item_sparse() {
        let issue = json!({"key": "TP-13", "fields": {}});
        let item = parse_item(&issue);
        assert_eq!(item.summary, "(no summary)");
        assert_eq!(item.status, "unknown");
        assert!(item.assignee.is_none());
        assert!(item.story_points.is_none());
        assert!(item.labels.is_empty());
    }

    #[test]
    fn test_parse_sprint_dates() {
        let value = json!({
            "id": 42,
            "name": "Sprint 42",
            "state": "active",
            "startDate": "2025-05-26T08:00:00.000Z",
            "endDate": "2025-06-06T17:00:00.000Z",
            "goal": "Ship the dashboard"
        });
        let sprint = parse_sprint(&value);
        assert_eq!(sprint.id, 42);
        assert!(sprint.start_date.is_some());
        assert!(sprint.end_date.is_some());
        assert_eq!(sprint.goal.as_deref(), Some("Ship the dashboard"));
    }

    #[test]
    fn test_activity_totals() {
        let activity = JiraActivity {
            account_id: "1".to_string(),
            display_name: "Alice".to_string(),
            email: None,
            items: vec![
                WorkItem {
                    key: "TP-1".to_string(),
                    summary: "a".to_string(),
                    status: "In Progress".to_string(),
                    assignee: Some("Alice".to_string()),
                    story_points: Some(3.0),
                    labels: vec![],
                },
                WorkItem {
                    key: "TP-2".to_string(),
                    summary: "b".to_string(),
                    status: "To Do".to_string(),
                    assignee: Some("Alice".to_string()),
                    story_points: Some(2.0),
                    labels: vec!["blocked".to_string()],
                },
            ],
        };
        assert_eq!(activity.story_points(), 5.0);
        assert_eq!(activity.in_progress_count(), 1);
        assert_eq!(activity.blocked_count(), 1);
    }
}
