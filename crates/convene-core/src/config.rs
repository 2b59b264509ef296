//! Configuration.
//!
//! All settings live in a single `config.toml`, by default at
//! `~/.config/convene/config.toml`. Every section and key is optional:
//!
//! ```toml
//! [time]
//! utc_offset = "+02:00"   # absent: the system local zone
//!
//! [calendar]
//! first_slot_hour = 7
//! last_slot_hour = 21
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

use crate::clock::SharedClock;
use crate::codec::MeetingTimeCodec;
use crate::time::TimeOfDay;
use crate::tracing::{TracingConfig, TracingOutputFormat};

/// Errors raised while loading or interpreting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid utc_offset {0:?} (expected Z, UTC or ±HH:MM)")]
    InvalidOffset(String),

    #[error("invalid slot hours {first}..={last} (expected 0 <= first <= last <= 23)")]
    InvalidSlotHours { first: u32, last: u32 },

    #[error("invalid log level {0:?}")]
    InvalidLevel(String),

    #[error(transparent)]
    InvalidFormat(#[from] crate::tracing::UnknownOutputFormat),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConveneConfig {
    /// How wall-clock text maps to instants.
    pub time: TimeSettings,
    /// Date and time picker settings.
    pub calendar: CalendarSettings,
    /// Log output settings.
    pub logging: LoggingSettings,
}

/// Time zone settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    /// Fixed UTC offset for display times; `None` means the system zone.
    pub utc_offset: Option<String>,
}

impl TimeSettings {
    /// Parses the configured offset.
    ///
    /// Accepts `Z`, `UTC` and `±HH:MM`. Returns `Ok(None)` when unset.
    pub fn fixed_offset(&self) -> Result<Option<FixedOffset>, ConfigError> {
        self.utc_offset.as_deref().map(parse_offset).transpose()
    }

    /// Returns the zone display times are written in.
    pub fn display_zone(&self) -> Result<DisplayZone, ConfigError> {
        Ok(self
            .fixed_offset()?
            .map_or(DisplayZone::Local, DisplayZone::Fixed))
    }
}

/// The zone wall-clock text is interpreted in: the system zone, or a pinned
/// offset from `[time] utc_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    Local,
    Fixed(FixedOffset),
}

impl TimeZone for DisplayZone {
    type Offset = FixedOffset;

    fn from_offset(offset: &FixedOffset) -> Self {
        Self::Fixed(*offset)
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        match self {
            Self::Local => Local.offset_from_local_date(local),
            Self::Fixed(offset) => offset.offset_from_local_date(local),
        }
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        match self {
            Self::Local => Local.offset_from_local_datetime(local),
            Self::Fixed(offset) => offset.offset_from_local_datetime(local),
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        match self {
            Self::Local => Local.offset_from_utc_date(utc),
            Self::Fixed(offset) => *offset,
        }
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            Self::Local => Local.offset_from_utc_datetime(utc),
            Self::Fixed(offset) => *offset,
        }
    }
}

fn parse_offset(text: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidOffset(text.to_string());
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours = two_digits(hours).ok_or_else(invalid)?;
    let minutes = two_digits(minutes).ok_or_else(invalid)?;
    if minutes > 59 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn two_digits(text: &str) -> Option<i32> {
    if text.len() != 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Date and time picker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// First start slot offered by the time picker (0-23).
    pub first_slot_hour: u32,
    /// Last start slot offered by the time picker (0-23).
    pub last_slot_hour: u32,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            first_slot_hour: 7,
            last_slot_hour: 21,
        }
    }
}

impl CalendarSettings {
    /// Returns the start slots for the time picker.
    pub fn time_slots(&self) -> Result<Vec<TimeOfDay>, ConfigError> {
        let (first, last) = (self.first_slot_hour, self.last_slot_hour);
        if first > last || last > 23 {
            return Err(ConfigError::InvalidSlotHours { first, last });
        }
        Ok(TimeOfDay::hourly_slots(first, last))
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// trace, debug, info, warn or error.
    pub level: String,
    /// pretty, compact or json.
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: TracingOutputFormat::default().to_string(),
        }
    }
}

impl LoggingSettings {
    /// Builds the subscriber configuration.
    pub fn tracing_config(&self) -> Result<TracingConfig, ConfigError> {
        let level: Level = self
            .level
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidLevel(self.level.clone()))?;
        let format: TracingOutputFormat = self.format.parse()?;
        Ok(TracingConfig::default()
            .with_level(level)
            .with_format(format))
    }
}

impl ConveneConfig {
    /// Loads configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Checks every derived value, so a bad file fails at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time.fixed_offset()?;
        self.calendar.time_slots()?;
        self.logging.tracing_config()?;
        Ok(())
    }

    /// Builds the display/wire codec for the configured zone.
    pub fn codec(&self, clock: SharedClock) -> Result<MeetingTimeCodec<DisplayZone>, ConfigError> {
        MeetingTimeCodec::from_settings(&self.time, clock)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("convene")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConveneConfig::default();
        assert!(config.time.utc_offset.is_none());
        assert_eq!(config.time.fixed_offset().unwrap(), None);
        assert_eq!(config.calendar.first_slot_hour, 7);
        assert_eq!(config.calendar.time_slots().unwrap().len(), 15);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_file_is_default() {
        let config = ConveneConfig::from_toml_str("").unwrap();
        assert_eq!(config.calendar.last_slot_hour, 21);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn partial_sections() {
        let config = ConveneConfig::from_toml_str(
            r#"
            [time]
            utc_offset = "-05:30"

            [calendar]
            first_slot_hour = 9
            "#,
        )
        .unwrap();
        let offset = config.time.fixed_offset().unwrap().unwrap();
        assert_eq!(offset.local_minus_utc(), -(5 * 3600 + 30 * 60));
        assert_eq!(config.calendar.first_slot_hour, 9);
        assert_eq!(config.calendar.last_slot_hour, 21);
    }

    #[test]
    fn offset_forms() {
        let settings = |s: &str| TimeSettings {
            utc_offset: Some(s.to_string()),
        };
        assert_eq!(settings("Z").fixed_offset().unwrap().unwrap().local_minus_utc(), 0);
        assert_eq!(settings("utc").fixed_offset().unwrap().unwrap().local_minus_utc(), 0);
        assert_eq!(settings("+02:00").fixed_offset().unwrap().unwrap().local_minus_utc(), 7200);
        for bad in [
            "02:00", "+2:00", "+02", "+02:75", "+99:00", "east", "+-1:00", "++1:00",
            "-00:-5", "+0 :30",
        ] {
            assert!(
                matches!(settings(bad).fixed_offset(), Err(ConfigError::InvalidOffset(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn display_zone_follows_utc_offset() {
        let unset = TimeSettings::default();
        assert_eq!(unset.display_zone().unwrap(), DisplayZone::Local);

        let pinned = TimeSettings {
            utc_offset: Some("+05:30".to_string()),
        };
        let zone = pinned.display_zone().unwrap();
        assert_eq!(zone, DisplayZone::Fixed(FixedOffset::east_opt(19800).unwrap()));

        let bad = TimeSettings {
            utc_offset: Some("+5".to_string()),
        };
        assert!(matches!(bad.display_zone(), Err(ConfigError::InvalidOffset(_))));
    }

    #[test]
    fn codec_uses_configured_offset() {
        use crate::clock::FixedClock;
        use crate::date::CalendarDate;
        use chrono::Utc;

        let config = ConveneConfig::from_toml_str("[time]\nutc_offset = \"+02:00\"\n").unwrap();
        let now = Utc.with_ymd_and_hms(2025, 8, 19, 23, 30, 0).unwrap();
        let codec = config.codec(FixedClock::new(now).shared()).unwrap();

        assert_eq!(codec.today(), CalendarDate::new(2025, 7, 20).unwrap());
        let interval = codec
            .to_wire("Wednesday, August 20, 2025", "10:00 AM - 11:00 AM", None)
            .unwrap();
        assert_eq!(interval.start(), Utc.with_ymd_and_hms(2025, 8, 20, 8, 0, 0).unwrap());
        assert_eq!(codec.to_display(&interval).time_text, "10:00 AM - 11:00 AM");
    }

    #[test]
    fn codec_rejects_bad_offset() {
        use crate::clock::SystemClock;

        let config = ConveneConfig::from_toml_str("[time]\nutc_offset = \"+-1:00\"\n").unwrap();
        assert!(matches!(
            config.codec(SystemClock::shared()),
            Err(ConfigError::InvalidOffset(_))
        ));
    }

    #[test]
    fn slot_hours_are_validated() {
        let calendar = CalendarSettings {
            first_slot_hour: 20,
            last_slot_hour: 8,
        };
        assert!(matches!(
            calendar.time_slots(),
            Err(ConfigError::InvalidSlotHours { first: 20, last: 8 })
        ));
        let calendar = CalendarSettings {
            first_slot_hour: 0,
            last_slot_hour: 24,
        };
        assert!(calendar.time_slots().is_err());
    }

    #[test]
    fn logging_to_tracing_config() {
        let logging = LoggingSettings {
            level: "DEBUG".to_string(),
            format: "json".to_string(),
        };
        let tracing = logging.tracing_config().unwrap();
        assert_eq!(tracing.default_level, Level::DEBUG);
        assert_eq!(tracing.output_format, TracingOutputFormat::Json);

        let logging = LoggingSettings {
            level: "loud".to_string(),
            format: "json".to_string(),
        };
        assert!(matches!(logging.tracing_config(), Err(ConfigError::InvalidLevel(_))));

        let logging = LoggingSettings {
            level: "info".to_string(),
            format: "yaml".to_string(),
        };
        assert!(matches!(logging.tracing_config(), Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\nformat = \"compact\"\n").unwrap();
        let config = ConveneConfig::load_from(&path).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_reports_missing_file_and_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            ConveneConfig::load_from(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[calendar\nfirst_slot_hour = 7").unwrap();
        assert!(matches!(
            ConveneConfig::load_from(&broken),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        let path = ConveneConfig::default_path();
        assert!(path.ends_with("convene/config.toml"));
    }
}
