//! HTTP adapter tests against a mock server.

use mockito::Server;
use serde_json::json;

use teampulse_core::integrations::calendar::{CalendarProvider, GoogleCalendarClient};
use teampulse_core::{GitHubClient, JiraClient};

#[tokio::test]
async fn test_github_user_activity_counts() {
    let mut server = Server::new_async().await;

    let search = server
        .mock("GET", mockito::Matcher::Regex(r"^/search/issues.*".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"total_count": 4, "items": []}).to_string())
        .expect_at_least(4)
        .create_async()
        .await;
    let profile = server
        .mock("GET", "/users/alice")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"login": "alice", "name": "Alice Smith"}).to_string())
        .create_async()
        .await;

    let client = GitHubClient::new("token", "acme").with_base_url(server.url());
    let activity = client.user_activity("alice").await.expect("activity");

    assert_eq!(activity.login, "alice");
    assert_eq!(activity.name.as_deref(), Some("Alice Smith"));
    assert_eq!(activity.open_prs, 4);
    assert_eq!(activity.pending_reviews, 4);
    search.assert_async().await;
    profile.assert_async().await;
}

#[tokio::test]
async fn test_github_api_error_surfaces_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/search/issues.*".to_string()))
        .with_status(401)
        .with_body("bad credentials")
        .create_async()
        .await;

    let client = GitHubClient::new("bad", "acme").with_base_url(server.url());
    let err = client.user_activity("alice").await.expect_err("should fail");
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_github_team_activity_skips_failures() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/search/issues\?q=.*alice.*".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"total_count": 1}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/users/alice")
        .with_status(404)
        .create_async()
        .await;
    // Everything for bob fails.
    server
        .mock("GET", mockito::Matcher::Regex(r"^/search/issues\?q=.*bob.*".to_string()))
        .with_status(500)
        .create_async()
        .await;

    let client = GitHubClient::new("token", "acme").with_base_url(server.url());
    let team = client
        .team_activity(&["alice".to_string(), "bob".to_string()])
        .await
        .expect("team");
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].login, "alice");
    // A 404 profile is tolerated; the login stands in for the name.
    assert!(team[0].name.is_none());
}

#[tokio::test]
async fn test_jira_active_sprint_and_items() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/rest/agile/1\.0/board/1/sprint.*".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"values": [{
                "id": 42,
                "name": "Sprint 42",
                "state": "active",
                "startDate": "2025-05-26T08:00:00.000Z",
                "endDate": "2025-06-06T17:00:00.000Z"
            }]})
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/rest/agile/1\.0/sprint/42/issue.*".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"issues": [
                {"key": "TP-1", "fields": {
                    "summary": "Fix login",
                    "status": {"name": "In Progress"},
                    "assignee": {"accountId": "a1", "displayName": "Alice"},
                    "customfield_10016": 5.0,
                    "labels": []
                }},
                {"key": "TP-2", "fields": {
                    "summary": "Unowned chore",
                    "status": {"name": "To Do"},
                    "assignee": null,
                    "customfield_10016": 2.0,
                    "labels": ["blocked"]
                }}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let client = JiraClient::new(server.url(), "me@acme.test", "token");
    let sprint = client
        .active_sprint(1)
        .await
        .expect("sprint call")
        .expect("active sprint");
    assert_eq!(sprint.id, 42);
    assert!(sprint.end_date.is_some());

    let items = client.sprint_items(42).await.expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].key, "TP-1");
    assert!(items[1].is_blocked());

    // Grouping drops the unassigned item.
    let team = client.team_activity(42).await.expect("team");
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].display_name, "Alice");
    assert_eq!(team[0].story_points(), 5.0);
}

#[tokio::test]
async fn test_jira_malformed_response_rejected() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/rest/agile/1\.0/sprint/9/issue.*".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"unexpected": true}).to_string())
        .create_async()
        .await;

    let client = JiraClient::new(server.url(), "me@acme.test", "token");
    let err = client.sprint_items(9).await.expect_err("malformed");
    assert!(err.to_string().contains("Malformed"));
}

#[tokio::test]
async fn test_google_calendar_events_normalized() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/calendars/.*/events.*".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"items": [
                {"summary": "Standup",
                 "start": {"dateTime": "2025-06-02T09:00:00Z"},
                 "end": {"dateTime": "2025-06-02T09:30:00Z"}},
                {"summary": "PTO - hiking",
                 "start": {"date": "2025-06-09"},
                 "end": {"date": "2025-06-11"}}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let client = GoogleCalendarClient::new("token").with_base_url(server.url());
    let events = client.events("alice@acme.test", 30).await.expect("events");
    assert_eq!(events.len(), 2);

    let standup = &events[0];
    assert!(standup.is_meeting());
    assert!((standup.duration_hours() - 0.5).abs() < 1e-9);

    let pto = &events[1];
    assert!(pto.all_day);
    assert!(pto.is_pto());
    // Exclusive end date pulled back to the real last day.
    assert_eq!(pto.end.date_naive().to_string(), "2025-06-10");
}
