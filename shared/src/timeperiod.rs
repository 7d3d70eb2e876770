use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One calendar year window, `from` and `to` are both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSlice {
    pub year: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl YearSlice {
    pub fn new(year: i32) -> Option<Self> {
        let from = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
        let to = NaiveDate::from_ymd_opt(year, 12, 31)?.and_hms_opt(23, 59, 59)?;
        Some(Self {
            year,
            from: Utc.from_utc_datetime(&from),
            to: Utc.from_utc_datetime(&to),
        })
    }

    pub fn from_iso(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn to_iso(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Every calendar year from the account creation year up to the year of `now`.
pub fn year_slices(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Vec<YearSlice> {
    (created_at.year()..=now.year())
        .filter_map(YearSlice::new)
        .collect()
}
