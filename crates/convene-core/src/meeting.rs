//! Meeting records.
//!
//! - [`WireMeeting`]: a meeting as stored and transmitted by the repository
//! - [`NewMeeting`]: the create payload sent to the repository
//! - [`DisplayMeeting`]: a meeting decoded into display text and tagged with a status
//! - [`MeetingDraft`]: the meeting form as the user filled it in
//! - [`StatusBuckets`]: display meetings grouped by status

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{MeetingTimeCodec, format_time_range};
use crate::date::CalendarDate;
use crate::recurrence::Recurrence;
use crate::status::MeetingStatus;
use crate::time::{MeetingInterval, TimeOfDay};

/// The kind of meeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingType {
    /// A regular group meeting.
    #[default]
    General,
    /// A one-off or special-purpose meeting.
    Special,
    /// A training session.
    Training,
}

impl MeetingType {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Special => "special",
            Self::Training => "training",
        }
    }
}

/// A meeting as the repository stores it.
///
/// Instances are created by the repository (which assigns the id) and are
/// only read and transcoded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMeeting {
    /// Server-assigned identifier.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub meeting_type: MeetingType,
    /// `startTime` / `endTime` on the wire.
    #[serde(flatten)]
    pub interval: MeetingInterval,
    pub location: String,
    /// The group this meeting belongs to.
    pub group_id: String,
    /// Attendee member ids.
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl WireMeeting {
    /// Creates a meeting with required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        meeting_type: MeetingType,
        interval: MeetingInterval,
        location: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            meeting_type,
            interval,
            location: location.into(),
            group_id: group_id.into(),
            attendees: Vec::new(),
            recurrence: Recurrence::None,
        }
    }

    /// Creates the stored form of a create payload under a server-assigned id.
    pub fn from_new(id: impl Into<String>, new_meeting: NewMeeting) -> Self {
        Self {
            id: id.into(),
            title: new_meeting.title,
            description: new_meeting.description,
            meeting_type: new_meeting.meeting_type,
            interval: new_meeting.interval,
            location: new_meeting.location,
            group_id: new_meeting.group_id,
            attendees: Vec::new(),
            recurrence: new_meeting.recurrence,
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set attendees.
    pub fn with_attendees(mut self, attendees: Vec<String>) -> Self {
        self.attendees = attendees;
        self
    }

    /// Builder method to set recurrence.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Returns the meeting's status at `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> MeetingStatus {
        self.interval.status_at(now)
    }
}

/// The payload for creating a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeeting {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub meeting_type: MeetingType,
    #[serde(flatten)]
    pub interval: MeetingInterval,
    pub location: String,
    pub group_id: String,
    #[serde(default)]
    pub recurrence: Recurrence,
}

/// A meeting ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMeeting {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub meeting_type: MeetingType,
    pub status: MeetingStatus,
    /// Long-form date, e.g. `"Tuesday, August 19, 2025"`.
    pub date_text: String,
    /// Time range, e.g. `"10:00 AM - 12:00 PM"`.
    pub time_text: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee_count: Option<usize>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl DisplayMeeting {
    /// Decodes a stored meeting and tags it with its status at `now`.
    pub fn from_wire<Tz: TimeZone>(
        wire: &WireMeeting,
        codec: &MeetingTimeCodec<Tz>,
        now: DateTime<Utc>,
    ) -> Self {
        let display = codec.to_display(&wire.interval);
        Self {
            id: wire.id.clone(),
            title: wire.title.clone(),
            meeting_type: wire.meeting_type,
            status: wire.status_at(now),
            date_text: display.date_text,
            time_text: display.time_text,
            location: wire.location.clone(),
            description: wire.description.clone(),
            attendee_count: Some(wire.attendees.len()),
            recurrence: wire.recurrence,
            group_id: Some(wire.group_id.clone()),
        }
    }
}

/// A meeting form as the user filled it in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeetingDraft {
    pub title: String,
    pub description: Option<String>,
    pub meeting_type: MeetingType,
    /// Long-form date text shown in the form.
    pub date_text: String,
    /// Time range text, `"<start> - <end>"`.
    pub time_text: String,
    /// The date picked in the calendar, if any. Wins over `date_text`.
    pub selected_date: Option<CalendarDate>,
    pub location: String,
    pub group_id: String,
    pub recurrence: Recurrence,
}

impl MeetingDraft {
    /// Creates an empty draft for a group.
    pub fn new(title: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            group_id: group_id.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the date text.
    pub fn with_date_text(mut self, date_text: impl Into<String>) -> Self {
        self.date_text = date_text.into();
        self
    }

    /// Builder method to set the picked date; also refreshes the date text.
    pub fn with_selected_date(mut self, date: CalendarDate) -> Self {
        self.date_text = date.format_display();
        self.selected_date = Some(date);
        self
    }

    /// Builder method to set the time range text.
    pub fn with_time_text(mut self, time_text: impl Into<String>) -> Self {
        self.time_text = time_text.into();
        self
    }

    /// Builder method to fill the time range from a start slot, lasting one hour.
    pub fn with_start_slot(mut self, start: TimeOfDay) -> Self {
        self.time_text = format_time_range(start, start.add_one_hour());
        self
    }

    /// Builder method to set the meeting type.
    pub fn with_meeting_type(mut self, meeting_type: MeetingType) -> Self {
        self.meeting_type = meeting_type;
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set recurrence.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }
}

/// Display meetings grouped by status, each group in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusBuckets {
    pub current: Vec<DisplayMeeting>,
    pub upcoming: Vec<DisplayMeeting>,
    pub past: Vec<DisplayMeeting>,
}

impl StatusBuckets {
    /// Total number of meetings across all buckets.
    pub fn len(&self) -> usize {
        self.current.len() + self.upcoming.len() + self.past.len()
    }

    /// Returns true if no bucket holds a meeting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bucket for a status.
    pub fn get(&self, status: MeetingStatus) -> &[DisplayMeeting] {
        match status {
            MeetingStatus::Current => &self.current,
            MeetingStatus::Upcoming => &self.upcoming,
            MeetingStatus::Past => &self.past,
        }
    }
}

impl FromIterator<DisplayMeeting> for StatusBuckets {
    fn from_iter<I: IntoIterator<Item = DisplayMeeting>>(iter: I) -> Self {
        let mut buckets = Self::default();
        for meeting in iter {
            match meeting.status {
                MeetingStatus::Current => buckets.current.push(meeting),
                MeetingStatus::Upcoming => buckets.upcoming.push(meeting),
                MeetingStatus::Past => buckets.past.push(meeting),
            }
        }
        buckets
    }
}
