//! The meeting repository contract.
//!
//! A [`MeetingRepository`] is the only place meetings are persisted or
//! transmitted. It speaks the wire format ([`WireMeeting`] / [`NewMeeting`])
//! and knows nothing about display text, zones or status.

use std::future::Future;
use std::pin::Pin;

use convene_core::{MeetingInterval, NewMeeting, WireMeeting};

use crate::error::{RepositoryError, RepositoryResult};

/// A boxed future, so the repository trait stays object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Options for fetching meetings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Only meetings of this group.
    pub group_id: Option<String>,
    /// Only meetings overlapping this window.
    pub window: Option<MeetingInterval>,
    /// Maximum number of meetings to return, earliest first.
    pub max_results: Option<usize>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to restrict to one group.
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Builder method to set the time window.
    pub fn with_window(mut self, window: MeetingInterval) -> Self {
        self.window = Some(window);
        self
    }

    /// Builder method to set max results.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Checks if a meeting passes the group and window filters.
    pub fn matches(&self, meeting: &WireMeeting) -> bool {
        let in_group = self
            .group_id
            .as_deref()
            .is_none_or(|group| meeting.group_id == group);
        let in_window = self
            .window
            .as_ref()
            .is_none_or(|window| window.overlaps(&meeting.interval));
        in_group && in_window
    }
}

/// Storage and transport for meetings.
///
/// # Example Implementation
///
/// ```ignore
/// struct HttpRepository {
///     client: reqwest::Client,
///     base_url: Url,
/// }
///
/// impl MeetingRepository for HttpRepository {
///     fn name(&self) -> &str { "http" }
///
///     fn fetch_meetings(&self, options: FetchOptions) -> BoxFuture<'_, RepositoryResult<Vec<WireMeeting>>> {
///         Box::pin(async move {
///             let body = self.client.get(self.meetings_url(&options)).send().await?.text().await?;
///             decode_meetings(&body)
///         })
///     }
///     // ...
/// }
/// ```
pub trait MeetingRepository: Send + Sync {
    /// Returns the name of this repository (e.g. "memory", "http").
    fn name(&self) -> &str;

    /// Fetches the meetings matching `options`.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] on transport, authorization or decoding
    /// failures.
    fn fetch_meetings(
        &self,
        options: FetchOptions,
    ) -> BoxFuture<'_, RepositoryResult<Vec<WireMeeting>>>;

    /// Stores a new meeting and returns it with its assigned id.
    fn create_meeting(&self, meeting: NewMeeting) -> BoxFuture<'_, RepositoryResult<WireMeeting>>;
}

/// Decodes a JSON meeting list as returned by the backend.
///
/// # Errors
///
/// Returns an `invalid_response` error if the body is not a list of valid
/// meetings, including meetings whose end is not after their start.
pub fn decode_meetings(body: &str) -> RepositoryResult<Vec<WireMeeting>> {
    Ok(serde_json::from_str(body)?)
}

/// A repository that always fails.
///
/// Stands in for a backend that could not be configured.
#[derive(Debug)]
pub struct ErrorRepository {
    name: String,
    error: RepositoryError,
}

impl ErrorRepository {
    pub fn new(name: impl Into<String>, error: RepositoryError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }

    fn error(&self) -> RepositoryError {
        RepositoryError::new(self.error.code(), self.error.message()).with_repository(&self.name)
    }
}

impl MeetingRepository for ErrorRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_meetings(
        &self,
        _options: FetchOptions,
    ) -> BoxFuture<'_, RepositoryResult<Vec<WireMeeting>>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }

    fn create_meeting(&self, _meeting: NewMeeting) -> BoxFuture<'_, RepositoryResult<WireMeeting>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryErrorCode;
    use chrono::{DateTime, TimeZone, Utc};
    use convene_core::{MeetingType, Recurrence};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn interval(start: DateTime<Utc>, hours: i64) -> MeetingInterval {
        MeetingInterval::new(start, start + chrono::Duration::hours(hours)).unwrap()
    }

    fn meeting(group: &str, start: DateTime<Utc>) -> WireMeeting {
        WireMeeting::new("m", "Weekly chapter", MeetingType::General, interval(start, 1), "Hall", group)
    }

    #[test]
    fn fetch_options_builder() {
        let window = interval(utc(2025, 8, 1, 0, 0), 24 * 31);
        let options = FetchOptions::new()
            .with_group("g-1")
            .with_window(window)
            .with_max_results(10);
        assert_eq!(options.group_id.as_deref(), Some("g-1"));
        assert_eq!(options.window, Some(window));
        assert_eq!(options.max_results, Some(10));
    }

    #[test]
    fn fetch_options_matches() {
        let august = interval(utc(2025, 8, 1, 0, 0), 24 * 31);
        let inside = meeting("g-1", utc(2025, 8, 19, 10, 0));
        let other_group = meeting("g-2", utc(2025, 8, 19, 10, 0));
        let september = meeting("g-1", utc(2025, 9, 1, 10, 0));

        assert!(FetchOptions::new().matches(&september));

        let options = FetchOptions::new().with_group("g-1").with_window(august);
        assert!(options.matches(&inside));
        assert!(!options.matches(&other_group));
        assert!(!options.matches(&september));
    }

    #[test]
    fn decode_backend_payload() {
        let body = r#"[
            {
                "id": "m-1",
                "title": "Chapter breakfast",
                "type": "special",
                "startTime": "2025-08-19T10:00:00.000Z",
                "endTime": "2025-08-19T12:00:00.000Z",
                "location": "Cafe",
                "groupId": "g-1",
                "attendees": ["u-1", "u-2"],
                "recurrence": "Weekly"
            },
            {
                "id": "m-2",
                "title": "Visitor day",
                "type": "general",
                "startTime": "2025-08-22T07:00:00Z",
                "endTime": "2025-08-22T08:30:00Z",
                "location": "Hall",
                "groupId": "g-1"
            }
        ]"#;
        let meetings = decode_meetings(body).unwrap();
        assert_eq!(meetings.len(), 2);
        assert_eq!(meetings[0].meeting_type, MeetingType::Special);
        assert_eq!(meetings[0].attendees.len(), 2);
        assert_eq!(meetings[0].recurrence, Recurrence::Weekly);
        assert_eq!(meetings[1].interval.start(), utc(2025, 8, 22, 7, 0));
        assert!(meetings[1].attendees.is_empty());
        assert_eq!(meetings[1].recurrence, Recurrence::None);
    }

    #[test]
    fn decode_rejects_bad_payloads() {
        let err = decode_meetings("{\"not\": \"a list\"}").unwrap_err();
        assert_eq!(err.code(), RepositoryErrorCode::InvalidResponse);

        let inverted = r#"[{
            "id": "m-1", "title": "t", "type": "general",
            "startTime": "2025-08-19T12:00:00Z", "endTime": "2025-08-19T10:00:00Z",
            "location": "l", "groupId": "g"
        }]"#;
        let err = decode_meetings(inverted).unwrap_err();
        assert_eq!(err.code(), RepositoryErrorCode::InvalidResponse);
    }

    #[tokio::test]
    async fn error_repository_always_fails() {
        let repository =
            ErrorRepository::new("http", RepositoryError::unauthorized("session expired"));
        assert_eq!(repository.name(), "http");

        let err = repository.fetch_meetings(FetchOptions::new()).await.unwrap_err();
        assert_eq!(err.code(), RepositoryErrorCode::Unauthorized);
        assert_eq!(err.repository(), Some("http"));

        let new_meeting = NewMeeting {
            title: "t".to_string(),
            description: None,
            meeting_type: MeetingType::General,
            interval: interval(utc(2025, 8, 19, 10, 0), 1),
            location: "l".to_string(),
            group_id: "g".to_string(),
            recurrence: Recurrence::None,
        };
        let err = repository.create_meeting(new_meeting).await.unwrap_err();
        assert_eq!(err.message(), "session expired");
    }
}
