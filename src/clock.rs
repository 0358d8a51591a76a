// src/clock.rs

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

const TAIPEI_OFFSET_SECS: i32 = 8 * 3600;

/// UTC+8, independent of the host timezone (the scheduler host runs in UTC).
pub fn taipei() -> FixedOffset {
    FixedOffset::east_opt(TAIPEI_OFFSET_SECS).expect("UTC+8 is a valid offset")
}

/// The instant a run started, in Taipei time.
///
/// Captured once: the row timestamp and the output file date both come from
/// it, so a run that crosses midnight still lands in the file it started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStamp {
    at: DateTime<FixedOffset>,
}

impl RunStamp {
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    pub fn from_utc(at: DateTime<Utc>) -> Self {
        Self {
            at: at.with_timezone(&taipei()),
        }
    }

    /// Build from a Taipei wall-clock time; `None` if the fields are out of range.
    pub fn from_local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Option<Self> {
        taipei()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .map(|at| Self { at })
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        self.at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// `YYYYMMDD`
    pub fn file_date(&self) -> String {
        self.at.format("%Y%m%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_evening_rolls_into_next_taipei_day() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 9, 17, 30, 5).unwrap();
        let stamp = RunStamp::from_utc(utc);
        assert_eq!(stamp.timestamp(), "2024-03-10 01:30:05");
        assert_eq!(stamp.file_date(), "20240310");
    }

    #[test]
    fn local_fields_format_verbatim() {
        let stamp = RunStamp::from_local(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(stamp.timestamp(), "2025-01-02 03:04:05");
        assert_eq!(stamp.file_date(), "20250102");
        assert!(RunStamp::from_local(2025, 13, 1, 0, 0, 0).is_none());
    }
}
