//! Calendar adapters -- meeting load, time-off periods, and coverage gaps.
//!
//! Google and Outlook speak different APIs but normalize to the same
//! `CalendarEvent` shape, so everything above the provider trait is shared.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use reqwest::Client;
use serde_json::Value;

use crate::error::AdapterError;

const USER_AGENT: &str = "teampulse";
const GOOGLE_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";
const OUTLOOK_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Event titles matching any of these mark the event as time off.
const PTO_KEYWORDS: &[&str] = &["pto", "vacation", "out of office", "ooo", "holiday", "leave"];

/// A normalized calendar event.
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
}

impl CalendarEvent {
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes().max(0) as f64 / 60.0
    }

    pub fn is_pto(&self) -> bool {
        let title = self.title.to_lowercase();
        PTO_KEYWORDS.iter().any(|k| title.contains(k))
    }

    /// Anything timed that is not time off counts as a meeting.
    pub fn is_meeting(&self) -> bool {
        !self.all_day && !self.is_pto()
    }
}

/// A contiguous span of days off, inclusive on both ends.
#[derive(Debug, Clone)]
pub struct PtoPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub title: String,
}

impl PtoPeriod {
    /// Weekdays in the period; weekends do not count against time off.
    pub fn weekday_count(&self) -> u32 {
        let mut count = 0;
        let mut day = self.start;
        while day <= self.end {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                count += 1;
            }
            day = day + Duration::days(1);
        }
        count
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One person's calendar-derived availability.
#[derive(Debug, Clone)]
pub struct Availability {
    pub person: String,
    pub meeting_hours_per_week: f64,
    pub pto_periods: Vec<PtoPeriod>,
}

impl Availability {
    /// Weekday count summed over every fetched period. The adapters only
    /// fetch forward-looking windows, so these are all upcoming.
    pub fn pto_days_upcoming(&self) -> u32 {
        self.pto_periods.iter().map(PtoPeriod::weekday_count).sum()
    }

    /// Earliest start among periods ending today or later.
    pub fn next_pto(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.pto_periods
            .iter()
            .filter(|p| p.end >= today)
            .map(|p| p.start)
            .min()
    }

    pub fn is_out_on(&self, date: NaiveDate) -> bool {
        self.pto_periods.iter().any(|p| p.contains(date))
    }
}

/// A day where too few people are available.
#[derive(Debug, Clone)]
pub struct CoverageGap {
    pub date: NaiveDate,
    pub people_out: Vec<String>,
    pub available: usize,
    pub severity: &'static str,
}

/// Fetches raw events for one person over a forward-looking window.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn events(
        &self,
        email: &str,
        window_days: i64,
    ) -> Result<Vec<CalendarEvent>, AdapterError>;
}

pub struct GoogleCalendarClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GoogleCalendarClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: GOOGLE_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarClient {
    async fn events(
        &self,
        email: &str,
        window_days: i64,
    ) -> Result<Vec<CalendarEvent>, AdapterError> {
        let now = Utc::now();
        let url = format!(
            "{}/calendars/{}/events?timeMin={}&timeMax={}&singleEvents=true",
            self.base_url,
            email,
            now.to_rfc3339(),
            (now + Duration::days(window_days)).to_rfc3339(),
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|source| AdapterError::Http {
                service: "Google Calendar".to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AdapterError::Api {
                service: "Google Calendar".to_string(),
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let data: Value = response.json().await.map_err(|source| AdapterError::Http {
            service: "Google Calendar".to_string(),
            source,
        })?;
        let items = data["items"].as_array().cloned().unwrap_or_default();

        let mut events = Vec::with_capacity(items.len());
        for item in &items {
            let title = item["summary"].as_str().unwrap_or("(untitled)").to_string();
            // All-day events carry a date; timed events carry a dateTime.
            if let Some(date) = item["start"]["date"].as_str() {
                let Some((start, end)) = parse_all_day_google(date, item["end"]["date"].as_str())
                else {
                    continue;
                };
                events.push(CalendarEvent {
                    title,
                    start,
                    end,
                    all_day: true,
                });
            } else if let (Some(start), Some(end)) = (
                parse_rfc3339(item["start"]["dateTime"].as_str()),
                parse_rfc3339(item["end"]["dateTime"].as_str()),
            ) {
                events.push(CalendarEvent {
                    title,
                    start,
                    end,
                    all_day: false,
                });
            }
        }
        Ok(events)
    }
}

pub struct OutlookCalendarClient {
    http: Client,
    base_url: String,
    token: String,
}

impl OutlookCalendarClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: OUTLOOK_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CalendarProvider for OutlookCalendarClient {
    async fn events(
        &self,
        email: &str,
        window_days: i64,
    ) -> Result<Vec<CalendarEvent>, AdapterError> {
        let now = Utc::now();
        let url = format!(
            "{}/users/{}/calendarView?startDateTime={}&endDateTime={}",
            self.base_url,
            email,
            now.to_rfc3339(),
            (now + Duration::days(window_days)).to_rfc3339(),
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|source| AdapterError::Http {
                service: "Outlook".to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AdapterError::Api {
                service: "Outlook".to_string(),
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let data: Value = response.json().await.map_err(|source| AdapterError::Http {
            service: "Outlook".to_string(),
            source,
        })?;
        let items = data["value"].as_array().cloned().unwrap_or_default();

        let mut events = Vec::with_capacity(items.len());
        for item in &items {
            let (Some(start), Some(end)) = (
                parse_rfc3339(item["start"]["dateTime"].as_str()),
                parse_rfc3339(item["end"]["dateTime"].as_str()),
            ) else {
                continue;
            };
            events.push(CalendarEvent {
                title: item["subject"].as_str().unwrap_or("(untitled)").to_string(),
                start,
                end,
                all_day: item["isAllDay"].as_bool().unwrap_or(false),
            });
        }
        Ok(events)
    }
}

fn parse_rfc3339(value: Option<&str>) -> Option<DateTime<Utc>> {
    value.and_then(|s| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| {
                // Graph omits the offset on calendarView timestamps.
                chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    })
}

/// Google all-day end dates are exclusive; pull the end back one day so the
/// event spans its true inclusive range.
fn parse_all_day_google(
    start: &str,
    end: Option<&str>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start_date: NaiveDate = start.parse().ok()?;
    let end_date: NaiveDate = match end {
        Some(e) => e.parse::<NaiveDate>().ok()? - Duration::days(1),
        None => start_date,
    };
    Some((
        start_date.and_hms_opt(0, 0, 0)?.and_utc(),
        end_date.and_hms_opt(23, 59, 59)?.and_utc(),
    ))
}

/// Fold raw events into an availability record.
pub fn availability_from_events(person: &str, events: &[CalendarEvent]) -> Availability {
    let meeting_hours_per_week: f64 = events
        .iter()
        .filter(|e| e.is_meeting())
        .filter(|e| e.start < Utc::now() + Duration::days(7))
        .map(CalendarEvent::duration_hours)
        .sum();

    let pto_periods: Vec<PtoPeriod> = events
        .iter()
        .filter(|e| e.is_pto())
        .map(|e| PtoPeriod {
            start: e.start.date_naive(),
            end: e.end.date_naive(),
            title: e.title.clone(),
        })
        .collect();

    Availability {
        person: person.to_string(),
        meeting_hours_per_week,
        pto_periods,
    }
}

/// Provider-agnostic calendar client.
pub struct CalendarClient {
    provider: Box<dyn CalendarProvider>,
    window_days: i64,
}

impl CalendarClient {
    pub fn google(token: impl Into<String>) -> Self {
        Self::from_provider(Box::new(GoogleCalendarClient::new(token)))
    }

    pub fn outlook(token: impl Into<String>) -> Self {
        Self::from_provider(Box::new(OutlookCalendarClient::new(token)))
    }

    pub fn from_provider(provider: Box<dyn CalendarProvider>) -> Self {
        Self {
            provider,
            window_days: 30,
        }
    }

    /// Unknown provider names are rejected rather than defaulted.
    pub fn new(provider_name: &str, token: impl Into<String>) -> Result<Self, AdapterError> {
        match provider_name.to_lowercase().as_str() {
            "google" => Ok(Self::google(token)),
            "outlook" => Ok(Self::outlook(token)),
            other => Err(AdapterError::NotConfigured {
                service: "Calendar".to_string(),
                message: format!("unknown provider '{other}' (expected google or outlook)"),
            }),
        }
    }

    pub async fn availability(&self, email: &str) -> Result<Availability, AdapterError> {
        let events = self.provider.events(email, self.window_days).await?;
        Ok(availability_from_events(email, &events))
    }

    /// Availability for each person. A failing calendar drops that person
    /// with a warning rather than failing the whole team.
    pub async fn team_availability(&self, emails: &[String]) -> Vec<Availability> {
        let mut availabilities = Vec::with_capacity(emails.len());
        for email in emails {
            match self.availability(email).await {
                Ok(availability) => availabilities.push(availability),
                Err(err) => {
                    tracing::warn!(email = %email, error = %err, "skipping calendar");
                }
            }
        }
        availabilities
    }
}

/// Weekdays in the next `days` where fewer than `min_coverage` people are in.
pub fn coverage_gaps(
    availabilities: &[Availability],
    today: NaiveDate,
    days: i64,
    min_coverage: usize,
) -> Vec<CoverageGap> {
    let mut gaps = Vec::new();
    for offset in 0..days {
        let date = today + Duration::days(offset);
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        let people_out: Vec<String> = availabilities
            .iter()
            .filter(|a| a.is_out_on(date))
            .map(|a| a.person.clone())
            .collect();
        let available = availabilities.len() - people_out.len();
        if !people_out.is_empty() && available < min_coverage {
            gaps.push(CoverageGap {
                date,
                people_out,
                available,
                severity: if available == 0 { "critical" } else { "warning" },
            });
        }
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(title: &str, start_h: u32, end_h: u32, all_day: bool) -> CalendarEvent {
        CalendarEvent {
            title: title.to_string(),
            start: Utc.with_ymd_and_hms(2025, 6, 2, start_h, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 6, 2, end_h, 0, 0).unwrap(),
            all_day,
        }
    }

    #[test]
    fn test_pto_keywords() {
        assert!(event("PTO - beach", 0, 23, true).is_pto());
        assert!(event("Out of Office", 0, 23, true).is_pto());
        assert!(event("Annual leave", 0, 23, true).is_pto());
        assert!(!event("Sprint planning", 9, 10, false).is_pto());
    }

    #[test]
    fn test_meeting_excludes_all_day_and_pto() {
        assert!(event("Standup", 9, 10, false).is_meeting());
        assert!(!event("Conference", 0, 23, true).is_meeting());
        assert!(!event("Vacation", 9, 17, false).is_meeting());
    }

    #[test]
    fn test_weekday_count_skips_weekends() {
        // Mon Jun 2 through Sun Jun 8: five weekdays.
        let period = PtoPeriod {
            start: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
            title: "PTO".to_string(),
        };
        assert_eq!(period.weekday_count(), 5);
    }

    #[test]
    fn test_next_pto_skips_past_periods() {
        let availability = Availability {
            person: "alice".to_string(),
            meeting_hours_per_week: 0.0,
            pto_periods: vec![
                PtoPeriod {
                    start: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                    end: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
                    title: "old".to_string(),
                },
                PtoPeriod {
                    start: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
                    end: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
                    title: "next".to_string(),
                },
            ],
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(
            availability.next_pto(today),
            NaiveDate::from_ymd_opt(2025, 6, 10)
        );
        // The day total covers every period, not just the next one.
        assert_eq!(availability.pto_days_upcoming(), 5);
    }

    #[test]
    fn test_google_all_day_end_exclusive() {
        let (start, end) = parse_all_day_google("2025-06-02", Some("2025-06-04")).unwrap();
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        // Exclusive end 06-04 means the event really ends on 06-03.
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
    }

    #[test]
    fn test_coverage_gaps() {
        let out = |name: &str| Availability {
            person: name.to_string(),
            meeting_hours_per_week: 0.0,
            pto_periods: vec![PtoPeriod {
                start: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
                title: "PTO".to_string(),
            }],
        };
        let team = vec![
            out("alice"),
            out("bob"),
            Availability {
                person: "carol".to_string(),
                meeting_hours_per_week: 0.0,
                pto_periods: vec![],
            },
        ];
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let gaps = coverage_gaps(&team, today, 7, 2);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].date, NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
        assert_eq!(gaps[0].available, 1);
        assert_eq!(gaps[0].severity, "warning");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(CalendarClient::new("caldav", "token").is_err());
        assert!(CalendarClient::new("Google", "token").is_ok());
    }
}
