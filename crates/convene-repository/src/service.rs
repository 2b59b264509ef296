//! Meeting service: repository plus codec.
//!
//! Fetched meetings are decoded into display form and classified against the
//! codec's clock. Drafts are encoded into the create payload before they reach
//! the repository.

use std::sync::Arc;

use chrono::{Local, TimeZone};
use convene_core::{DisplayMeeting, MeetingDraft, MeetingTimeCodec, StatusBuckets, TemporalError};
use thiserror::Error;
use tracing::debug;

use crate::error::RepositoryError;
use crate::repository::{FetchOptions, MeetingRepository};

/// Errors returned by [`MeetingService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The repository failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The draft's date or time text could not be encoded.
    #[error("invalid meeting time: {0}")]
    Temporal(#[from] TemporalError),
}

/// Fetches and creates meetings in display form.
#[derive(Clone)]
pub struct MeetingService<Tz: TimeZone = Local> {
    repository: Arc<dyn MeetingRepository>,
    codec: MeetingTimeCodec<Tz>,
}

impl<Tz: TimeZone> MeetingService<Tz> {
    pub fn new(repository: Arc<dyn MeetingRepository>, codec: MeetingTimeCodec<Tz>) -> Self {
        Self { repository, codec }
    }

    /// Returns the codec used for display text.
    pub fn codec(&self) -> &MeetingTimeCodec<Tz> {
        &self.codec
    }

    /// Fetches meetings and returns them in display form, earliest first.
    ///
    /// Every meeting's status is derived from the same reading of the clock.
    pub async fn meetings(&self, options: FetchOptions) -> Result<Vec<DisplayMeeting>, ServiceError> {
        let mut wire = self.repository.fetch_meetings(options).await?;
        wire.sort_by_key(|meeting| meeting.interval.start());

        let now = self.codec.now();
        debug!(
            repository = self.repository.name(),
            count = wire.len(),
            %now,
            "decoding meetings"
        );
        Ok(wire
            .iter()
            .map(|meeting| DisplayMeeting::from_wire(meeting, &self.codec, now))
            .collect())
    }

    /// Fetches meetings grouped into current, upcoming and past.
    pub async fn meetings_by_status(
        &self,
        options: FetchOptions,
    ) -> Result<StatusBuckets, ServiceError> {
        Ok(self.meetings(options).await?.into_iter().collect())
    }

    /// Encodes a draft, stores it and returns the created meeting.
    ///
    /// Nothing reaches the repository if the draft does not encode.
    pub async fn create(&self, draft: &MeetingDraft) -> Result<DisplayMeeting, ServiceError> {
        let new_meeting = self.codec.encode_draft(draft)?;
        let created = self.repository.create_meeting(new_meeting).await?;
        debug!(meeting_id = %created.id, repository = self.repository.name(), "meeting created");
        Ok(DisplayMeeting::from_wire(&created, &self.codec, self.codec.now()))
    }
}
