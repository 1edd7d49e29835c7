//! Timestamped download filenames (`yyyy-MM-dd-HH-mm-ss.<ext>`).

use std::fmt;

/// The kinds of file the inspector can hand to a download sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Json,
    Png,
    Jpg,
}

impl FileKind {
    /// Extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Json => ".json",
            FileKind::Png => ".png",
            FileKind::Jpg => ".jpg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            FileKind::Json => "application/json",
            FileKind::Png => "image/png",
            FileKind::Jpg => "image/jpeg",
        }
    }
}

/// A wall-clock instant broken into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Timestamp {
    /// Convert seconds since the Unix epoch (UTC).
    pub fn from_unix_seconds(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (rem / 3600) as u8,
            minute: (rem % 3600 / 60) as u8,
            second: (rem % 60) as u8,
        }
    }
}

/// Days since 1970-01-01 → (year, month, day), proleptic Gregorian.
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month, day)
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}-{:02}-{:02}-{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// `2024-03-09-14-05-00.json` and friends.
pub fn export_filename(at: &Timestamp, kind: FileKind) -> String {
    format!("{at}{}", kind.extension())
}
