//! Meeting temporal model: 12-hour time parsing, display/wire codec, status
//! classification, month grids, configuration

pub mod calendar;
pub mod clock;
pub mod codec;
pub mod config;
pub mod date;
pub mod error;
pub mod meeting;
pub mod recurrence;
pub mod status;
pub mod time;
pub mod tracing;

pub use calendar::{CalendarCell, CalendarMatcher, DayMarker, MonthGrid, GRID_CELLS, WEEKDAY_LABELS};
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use codec::{format_time_range, parse_time_range, DisplayTime, MeetingTimeCodec};
pub use config::{
    CalendarSettings, ConfigError, ConveneConfig, DisplayZone, LoggingSettings, TimeSettings,
};
pub use date::{CalendarDate, YearMonth};
pub use error::{TemporalError, TemporalErrorKind, TemporalResult};
pub use meeting::{DisplayMeeting, MeetingDraft, MeetingType, NewMeeting, StatusBuckets, WireMeeting};
pub use recurrence::Recurrence;
pub use status::MeetingStatus;
pub use time::{MeetingInterval, TimeOfDay};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
