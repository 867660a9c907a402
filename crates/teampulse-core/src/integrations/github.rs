//! GitHub adapter -- per-person pull request, review, issue, and commit counts.

use reqwest::Client;
use serde_json::Value;

use crate::error::AdapterError;

const USER_AGENT: &str = "teampulse";
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Days of history counted as "recent" for commit activity.
const RECENT_COMMIT_DAYS: i64 = 7;

/// Per-person activity counts from GitHub.
#[derive(Debug, Clone)]
pub struct GitHubActivity {
    pub login: String,
    pub name: Option<String>,
    pub open_prs: u32,
    pub pending_reviews: u32,
    pub assigned_issues: u32,
    pub recent_commits: u32,
}

impl GitHubActivity {
    /// Unweighted sum used only for ordering adapter output; the workload
    /// engine applies its own weights.
    pub fn activity_total(&self) -> u32 {
        self.open_prs + self.pending_reviews + self.assigned_issues + self.recent_commits
    }
}

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
    org: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            org: org.into(),
        }
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn search_count(&self, query: &str) -> Result<u32, AdapterError> {
        let url = format!("{}/search/issues?q={}&per_page=1", self.base_url, query);
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|source| AdapterError::Http {
                service: "GitHub".to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AdapterError::Api {
                service: "GitHub".to_string(),
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let data: Value = response.json().await.map_err(|source| AdapterError::Http {
            service: "GitHub".to_string(),
            source,
        })?;

        data["total_count"]
            .as_u64()
            .map(|count| count as u32)
            .ok_or_else(|| AdapterError::Malformed {
                service: "GitHub".to_string(),
                message: "search response missing total_count".to_string(),
            })
    }

    async fn user_profile(&self, login: &str) -> Result<Option<String>, AdapterError> {
        let url = format!("{}/users/{}", self.base_url, login);
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|source| AdapterError::Http {
                service: "GitHub".to_string(),
                source,
            })?;

        if !response.status().is_success() {
            // A missing profile is not fatal; the login still identifies the person.
            return Ok(None);
        }

        let data: Value = response.json().await.map_err(|source| AdapterError::Http {
            service: "GitHub".to_string(),
            source,
        })?;
        Ok(data["name"].as_str().map(|n| n.to_string()))
    }

    /// Activity counts for one organization member.
    pub async fn user_activity(&self, login: &str) -> Result<GitHubActivity, AdapterError> {
        let org = &self.org;
        let since = (chrono::Utc::now() - chrono::Duration::days(RECENT_COMMIT_DAYS))
            .format("%Y-%m-%d");

        let open_prs = self
            .search_count(&format!("is:pr+is:open+author:{login}+org:{org}"))
            .await?;
        let pending_reviews = self
            .search_count(&format!("is:pr+is:open+review-requested:{login}+org:{org}"))
            .await?;
        let assigned_issues = self
            .search_count(&format!("is:issue+is:open+assignee:{login}+org:{org}"))
            .await?;
        let recent_commits = self
            .search_count(&format!(
                "is:pr+author:{login}+org:{org}+created:>={since}"
            ))
            .await?;
        let name = self.user_profile(login).await?;

        Ok(GitHubActivity {
            login: login.to_string(),
            name,
            open_prs,
            pending_reviews,
            assigned_issues,
            recent_commits,
        })
    }

    /// Activity for each login, busiest first. A failing lookup for one
    /// person drops that person with a warning rather than failing the team.
    pub async fn team_activity(&self, logins: &[String]) -> Result<Vec<GitHubActivity>, AdapterError> {
        let mut activities = Vec::with_capacity(logins.len());
        for login in logins {
            match self.user_activity(login).await {
                Ok(activity) => activities.push(activity),
                Err(err) => {
                    tracing::warn!(login = %login, error = %err, "skipping GitHub user");
                }
            }
        }
        activities.sort_by(|a, b| b.activity_total().cmp(&a.activity_total()));
        Ok(activities)
    }
}
