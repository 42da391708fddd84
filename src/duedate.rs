//! Due-date normalization.
//!
//! Users type flexible time strings ("9:30 PM", "21:30", "9 PM") next to a
//! calendar date; the pair is resolved in the *caller's* IANA zone so that
//! "9 AM" typed in Vancouver means 9 AM Vancouver time regardless of where
//! this process runs. What we persist is the wall-clock reading
//! (`NaiveDateTime`), not a UTC instant: round-trip fidelity on re-display
//! takes precedence over zone-correct arithmetic.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use regex::Regex;

static TWELVE_HOUR: LazyLock<Regex> = LazyLock::new(|| {
    // "9:30 PM" or "9 PM", case-insensitive, optional space before the meridiem.
    Regex::new(r"(?i)^\s*(\d{1,2})(?::([0-5]\d))?\s*(AM|PM)\s*$").unwrap()
});

static TWENTY_FOUR_HOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([01]?\d|2[0-3]):([0-5]\d)\s*$").unwrap());

/// A recoverable parse failure naming the offending field. The caller
/// redisplays the form; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub field: &'static str,
    pub message: String,
}

impl ParseError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        ParseError {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ParseError {}

/// The date/time pair a stored due date decomposes into for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueParts {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl DueParts {
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_string(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// True iff `text` matches one of the accepted shapes: `H:MM AM/PM`,
/// `H AM/PM`, or 24-hour `HH:MM`. Callers reject invalid input with an
/// "Invalid Time Format" error before calling [`combine`].
pub fn is_valid_time_format(text: &str) -> bool {
    parse_time_text(text).is_ok()
}

/// Parse a flexible time string into a time of day. Empty input defaults
/// to 09:00.
pub fn parse_time_text(text: &str) -> Result<NaiveTime, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default());
    }

    if let Some(caps) = TWELVE_HOUR.captures(trimmed) {
        let hour: u32 = caps[1]
            .parse()
            .map_err(|_| ParseError::new("dueTime", "Invalid Time Format"))?;
        if !(1..=12).contains(&hour) {
            return Err(ParseError::new("dueTime", "Invalid Time Format"));
        }
        let minute: u32 = caps
            .get(2)
            .map_or(Ok(0), |m| m.as_str().parse())
            .map_err(|_| ParseError::new("dueTime", "Invalid Time Format"))?;
        let meridiem = caps[3].to_ascii_uppercase();
        let hour24 = match (meridiem.as_str(), hour) {
            ("AM", 12) => 0,
            ("AM", h) => h,
            ("PM", 12) => 12,
            (_, h) => h + 12,
        };
        return NaiveTime::from_hms_opt(hour24, minute, 0)
            .ok_or_else(|| ParseError::new("dueTime", "Invalid Time Format"));
    }

    if let Some(caps) = TWENTY_FOUR_HOUR.captures(trimmed) {
        let hour: u32 = caps[1]
            .parse()
            .map_err(|_| ParseError::new("dueTime", "Invalid Time Format"))?;
        let minute: u32 = caps[2]
            .parse()
            .map_err(|_| ParseError::new("dueTime", "Invalid Time Format"))?;
        return NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| ParseError::new("dueTime", "Invalid Time Format"));
    }

    Err(ParseError::new("dueTime", "Invalid Time Format"))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::new("dueDate", format!("Invalid date: {text}")))
}

/// Combine a calendar date and a flexible time string into an instant in the
/// caller-declared zone. Ambiguous local times (DST fold) take the earlier
/// mapping; nonexistent ones (DST gap) are an error.
pub fn combine(date: NaiveDate, time_text: &str, tz: Tz) -> Result<DateTime<Tz>, ParseError> {
    let time = parse_time_text(time_text)?;
    let local = NaiveDateTime::new(date, time);
    tz.from_local_datetime(&local).earliest().ok_or_else(|| {
        ParseError::new(
            "dueTime",
            format!("{local} does not exist in time zone {tz}"),
        )
    })
}

/// Decompose a stored due-date value back into its date/time pair.
///
/// Stored values have reached us in three shapes over time: zone-suffixed
/// ISO-8601, SQL-style `YYYY-MM-DD HH:MM:SS`, and bare dates. All are read
/// verbatim as wall-clock text; a zone suffix is *not* applied as a
/// conversion, because the stored value already is the wall clock the user
/// intended.
pub fn extract(stored: &str) -> Result<DueParts, ParseError> {
    let trimmed = stored.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        let local = dt.naive_local();
        return Ok(DueParts {
            date: local.date(),
            time: local.time(),
        });
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(DueParts {
                date: local.date(),
                time: local.time(),
            });
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(DueParts {
            date,
            time: NaiveTime::default(),
        });
    }

    Err(ParseError::new(
        "dueDate",
        format!("Unrecognized due date value: {stored}"),
    ))
}
