use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Capture time of a photo, broken down into calendar fields.
///
/// Always a valid calendar date and time of day, so month and day are never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaptureDate {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl CaptureDate {
    /// Build a capture date, rejecting impossible calendar values
    pub fn new(year: u32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Option<Self> {
        if year == 0 {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
        date.and_hms_opt(hour, minute, second)?;

        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Parse an EXIF style `YYYY:MM:DD HH:MM:SS` timestamp.
    ///
    /// The ISO `YYYY-MM-DD HH:MM:SS` form is accepted as well.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().trim_end_matches('\0');
        ["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .and_then(|dt| Self::from_naive(&dt))
    }

    pub fn from_naive(dt: &NaiveDateTime) -> Option<Self> {
        Self::new(
            u32::try_from(dt.year()).ok()?,
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
        )
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    /// Value of a single field
    pub fn field(&self, field: DateField) -> u32 {
        match field {
            DateField::Year => self.year,
            DateField::Month => self.month,
            DateField::Day => self.day,
            DateField::Hour => self.hour,
            DateField::Minute => self.minute,
            DateField::Second => self.second,
        }
    }

    /// Seconds since the Unix epoch, reading the wall clock as UTC
    pub fn timestamp(&self) -> i64 {
        NaiveDate::from_ymd_opt(self.year as i32, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, self.second))
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default()
    }
}

impl fmt::Display for CaptureDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// One component of a capture date, used to lay out the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl FromStr for DateField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            other => Err(Error::Configuration(format!(
                "Unknown date field '{}' in archive structure",
                other
            ))),
        }
    }
}

/// Ordered date fields giving the directory nesting under the archive root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchiveTemplate(Vec<DateField>);

impl ArchiveTemplate {
    pub fn new(fields: Vec<DateField>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &[DateField] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ArchiveTemplate {
    fn default() -> Self {
        Self(vec![DateField::Year, DateField::Month])
    }
}

impl FromStr for ArchiveTemplate {
    type Err = Error;

    /// Parse a `year/month/day` style layout
    fn from_str(s: &str) -> Result<Self> {
        let fields = s
            .split('/')
            .filter(|part| !part.trim().is_empty())
            .map(DateField::from_str)
            .collect::<Result<Vec<_>>>()?;

        if fields.is_empty() {
            return Err(Error::Configuration(
                "Archive structure needs at least one date field".to_string(),
            ));
        }

        Ok(Self(fields))
    }
}

/// How a file's capture date is found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Carries its own EXIF capture date
    Image,

    /// Borrows the capture date of the photo before it
    Video,
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files moved (or, in a dry run, that would have been moved)
    pub placed: usize,

    /// Files left in place for lack of a usable date
    pub skipped: usize,

    /// Files whose move failed
    pub failed: usize,

    /// Event boundary warnings raised
    pub boundaries: usize,
}

impl RunSummary {
    pub fn processed(&self) -> usize {
        self.placed + self.skipped + self.failed
    }
}
