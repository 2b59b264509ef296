//! In-memory meeting repository.

use convene_core::{NewMeeting, WireMeeting};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::RepositoryResult;
use crate::repository::{BoxFuture, FetchOptions, MeetingRepository};

/// A repository holding meetings in process memory.
///
/// Ids are random UUIDs. Fetches return matching meetings ordered by start.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    meetings: RwLock<Vec<WireMeeting>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with existing meetings.
    pub fn with_meetings(meetings: Vec<WireMeeting>) -> Self {
        Self {
            meetings: RwLock::new(meetings),
        }
    }

    /// Returns the number of stored meetings.
    pub async fn len(&self) -> usize {
        self.meetings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.meetings.read().await.is_empty()
    }
}

impl MeetingRepository for InMemoryRepository {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch_meetings(
        &self,
        options: FetchOptions,
    ) -> BoxFuture<'_, RepositoryResult<Vec<WireMeeting>>> {
        Box::pin(async move {
            let stored = self.meetings.read().await;
            let mut matching: Vec<WireMeeting> = stored
                .iter()
                .filter(|meeting| options.matches(meeting))
                .cloned()
                .collect();
            matching.sort_by_key(|meeting| meeting.interval.start());
            if let Some(max) = options.max_results {
                matching.truncate(max);
            }
            debug!(
                stored = stored.len(),
                returned = matching.len(),
                group_id = options.group_id.as_deref(),
                "fetched meetings"
            );
            Ok(matching)
        })
    }

    fn create_meeting(&self, meeting: NewMeeting) -> BoxFuture<'_, RepositoryResult<WireMeeting>> {
        Box::pin(async move {
            let created = WireMeeting::from_new(Uuid::new_v4().to_string(), meeting);
            self.meetings.write().await.push(created.clone());
            debug!(meeting_id = %created.id, group_id = %created.group_id, "created meeting");
            Ok(created)
        })
    }
}
