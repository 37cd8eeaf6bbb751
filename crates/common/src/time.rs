//! Date formatting in the Korean locale.
//!
//! Timestamps are stored in UTC and rendered in a fixed display offset
//! (UTC+09:00 unless configured otherwise).

use std::collections::HashMap;

use chrono::{
    DateTime, Datelike, FixedOffset, Months, NaiveDateTime, Offset, Timelike, Utc,
};
use neighborhood_config::LocaleConfig;
use serde::Serialize;

const KST_OFFSET_SECONDS: i32 = 9 * 3600;

const MINUTE_MS: f64 = 60_000.0;
const HOUR_MS: f64 = 3_600_000.0;
const DAY_MS: f64 = 86_400_000.0;

const WEEKDAYS: [&str; 7] = [
    "일요일", "월요일", "화요일", "수요일", "목요일", "금요일", "토요일",
];

/// Anything carrying the instant it was created at.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Entries sharing one calendar day, labelled with that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateSection<T> {
    pub date: String,
    pub entries: Vec<T>,
}

/// Formats instants for display.
#[derive(Debug, Clone, Copy)]
pub struct TimeFormatter {
    offset: FixedOffset,
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self::kst()
    }
}

impl TimeFormatter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Korean standard time, the offset the web client was written for.
    pub fn kst() -> Self {
        Self::new(FixedOffset::east_opt(KST_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix()))
    }

    /// Returns `None` when the configured offset is a day or more away from UTC.
    pub fn from_config(config: &LocaleConfig) -> Option<Self> {
        config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset).naive_local()
    }

    /// Relative phrase such as "3분 전" or "하루 후".
    pub fn time_interval(&self, created: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let elapsed_ms = (now - created).num_milliseconds() as f64;
        let phrase = self.relative_phrase(created, now, elapsed_ms.abs());

        if elapsed_ms < 0.0 {
            format!("{phrase} 후")
        } else {
            format!("{phrase} 전")
        }
    }

    pub fn time_interval_from_now(&self, created: DateTime<Utc>) -> String {
        self.time_interval(created, Utc::now())
    }

    fn relative_phrase(&self, created: DateTime<Utc>, now: DateTime<Utc>, ms: f64) -> String {
        let seconds = (ms / 1000.0).round();
        if seconds <= 44.0 {
            return "몇 초".to_string();
        }
        if seconds <= 89.0 {
            return "1분".to_string();
        }

        let minutes = (ms / MINUTE_MS).round();
        if minutes <= 44.0 {
            return counted(minutes, "1분", "분");
        }
        if minutes <= 89.0 {
            return "한 시간".to_string();
        }

        let hours = (ms / HOUR_MS).round();
        if hours <= 21.0 {
            return counted(hours, "한 시간", "시간");
        }
        if hours <= 35.0 {
            return "하루".to_string();
        }

        let days = (ms / DAY_MS).round();
        if days <= 25.0 {
            return counted(days, "하루", "일");
        }
        if days <= 45.0 {
            return "한 달".to_string();
        }

        let exact_months = months_between(self.local(created), self.local(now)).abs();
        let months = exact_months.round();
        if months <= 10.0 {
            return counted(months, "한 달", "달");
        }
        if months <= 17.0 {
            return "일 년".to_string();
        }

        counted((exact_months / 12.0).round(), "일 년", "년")
    }

    /// Clock time, e.g. "오후 3:05".
    pub fn message_time(&self, instant: DateTime<Utc>) -> String {
        let local = self.local(instant);
        let hour = local.hour();
        let hour12 = match hour % 12 {
            0 => 12,
            other => other,
        };
        format!("{} {}:{:02}", meridiem(hour), hour12, local.minute())
    }

    /// Day label, e.g. "2023년 3월 5일".
    pub fn date_heading(&self, instant: DateTime<Utc>) -> String {
        let local = self.local(instant);
        format!("{}년 {}월 {}일", local.year(), local.month(), local.day())
    }

    /// Full label with weekday and clock time, e.g. "2023년 3월 5일 일요일 오후 3:05".
    pub fn reservation_time(&self, instant: DateTime<Utc>) -> String {
        let weekday = self.local(instant).weekday().num_days_from_sunday() as usize;
        format!(
            "{} {} {}",
            self.date_heading(instant),
            WEEKDAYS[weekday],
            self.message_time(instant)
        )
    }

    /// Groups entries by the day they were created on.
    ///
    /// Sections keep the order in which their day first appears; an entry
    /// joins an existing section even when other days came in between.
    pub fn divide_date<T, I>(&self, entries: I) -> Vec<DateSection<T>>
    where
        T: Timestamped,
        I: IntoIterator<Item = T>,
    {
        let mut sections: Vec<DateSection<T>> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            let date = self.date_heading(entry.timestamp());
            match positions.get(&date) {
                Some(&position) => sections[position].entries.push(entry),
                None => {
                    positions.insert(date.clone(), sections.len());
                    sections.push(DateSection {
                        date,
                        entries: vec![entry],
                    });
                }
            }
        }

        sections
    }
}

fn meridiem(hour: u32) -> &'static str {
    if hour < 12 {
        "오전"
    } else {
        "오후"
    }
}

fn counted(value: f64, singular: &str, unit: &str) -> String {
    if value <= 1.0 {
        singular.to_string()
    } else {
        format!("{}{}", value as i64, unit)
    }
}

fn shift_months(instant: NaiveDateTime, months: i32) -> NaiveDateTime {
    let shifted = if months >= 0 {
        instant.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        instant.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(instant)
}

/// Calendar-aware month distance from `from` to `to`, with a fractional part
/// measured against the length of the month being crossed.
fn months_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    if to < from {
        return -months_between(to, from);
    }

    let whole = (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    let anchor = shift_months(from, whole);

    let (span, offset) = if to < anchor {
        let previous = shift_months(from, whole - 1);
        (anchor - previous, to - anchor)
    } else {
        let next = shift_months(from, whole + 1);
        (next - anchor, to - anchor)
    };

    let span_ms = span.num_milliseconds() as f64;
    if span_ms == 0.0 {
        return f64::from(whole);
    }

    f64::from(whole) + offset.num_milliseconds() as f64 / span_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .expect("valid test timestamp")
    }

    struct Entry {
        id: u32,
        created: DateTime<Utc>,
    }

    impl Timestamped for Entry {
        fn timestamp(&self) -> DateTime<Utc> {
            self.created
        }
    }

    #[test]
    fn message_time_uses_korean_meridiem() {
        let formatter = TimeFormatter::kst();
        assert_eq!(formatter.message_time(at(2023, 3, 5, 6, 5)), "오후 3:05");
        assert_eq!(formatter.message_time(at(2023, 3, 4, 15, 0)), "오전 12:00");
        assert_eq!(formatter.message_time(at(2023, 3, 5, 3, 0)), "오후 12:00");
        assert_eq!(formatter.message_time(at(2023, 3, 5, 0, 9)), "오전 9:09");
    }

    #[test]
    fn date_heading_follows_display_offset() {
        let formatter = TimeFormatter::kst();
        assert_eq!(formatter.date_heading(at(2023, 3, 4, 15, 0)), "2023년 3월 5일");
        assert_eq!(formatter.date_heading(at(2023, 3, 4, 14, 59)), "2023년 3월 4일");

        let utc = TimeFormatter::new(Utc.fix());
        assert_eq!(utc.date_heading(at(2023, 3, 4, 15, 0)), "2023년 3월 4일");
    }

    #[test]
    fn reservation_time_includes_weekday() {
        let formatter = TimeFormatter::kst();
        assert_eq!(
            formatter.reservation_time(at(2023, 3, 5, 6, 5)),
            "2023년 3월 5일 일요일 오후 3:05"
        );
        assert_eq!(
            formatter.reservation_time(at(2023, 12, 31, 23, 30)),
            "2024년 1월 1일 월요일 오전 8:30"
        );
    }

    #[test]
    fn time_interval_walks_the_threshold_table() {
        let formatter = TimeFormatter::kst();
        let now = at(2023, 3, 5, 12, 0);
        let ago = |duration: Duration| formatter.time_interval(now - duration, now);

        assert_eq!(ago(Duration::seconds(30)), "몇 초 전");
        assert_eq!(ago(Duration::seconds(60)), "1분 전");
        assert_eq!(ago(Duration::seconds(90)), "2분 전");
        assert_eq!(ago(Duration::minutes(10)), "10분 전");
        assert_eq!(ago(Duration::minutes(60)), "한 시간 전");
        assert_eq!(ago(Duration::hours(5)), "5시간 전");
        assert_eq!(ago(Duration::hours(30)), "하루 전");
        assert_eq!(ago(Duration::days(3)), "3일 전");
        assert_eq!(ago(Duration::days(30)), "한 달 전");
    }

    #[test]
    fn time_interval_counts_calendar_months_and_years() {
        let formatter = TimeFormatter::kst();
        let now = at(2023, 3, 5, 12, 0);

        assert_eq!(formatter.time_interval(at(2022, 12, 5, 12, 0), now), "3달 전");
        assert_eq!(formatter.time_interval(at(2022, 3, 5, 12, 0), now), "일 년 전");
        assert_eq!(formatter.time_interval(at(2020, 3, 5, 12, 0), now), "3년 전");
    }

    #[test]
    fn time_interval_rounding_to_one_uses_the_singular_phrase() {
        let formatter = TimeFormatter::kst();
        let now = at(2023, 8, 20, 12, 0);

        // 46 days is past the day table but rounds to a single month.
        assert_eq!(
            formatter.time_interval(now - Duration::days(46), now),
            "한 달 전"
        );
    }

    #[test]
    fn time_interval_marks_future_instants() {
        let formatter = TimeFormatter::kst();
        let now = at(2023, 3, 5, 12, 0);
        assert_eq!(
            formatter.time_interval(now + Duration::minutes(10), now),
            "10분 후"
        );
    }

    #[test]
    fn months_between_is_fractional_and_signed() {
        let from = at(2023, 1, 1, 0, 0).naive_utc();
        let to = at(2023, 1, 16, 12, 0).naive_utc();
        let months = months_between(from, to);
        assert!((months - 0.5).abs() < 1e-9, "got {months}");
        assert!((months_between(to, from) + 0.5).abs() < 1e-9);
    }

    #[test]
    fn divide_date_groups_by_first_occurrence() {
        let formatter = TimeFormatter::kst();
        let entries = vec![
            Entry { id: 1, created: at(2023, 3, 4, 1, 0) },
            Entry { id: 2, created: at(2023, 3, 4, 16, 0) },
            Entry { id: 3, created: at(2023, 3, 4, 2, 0) },
            Entry { id: 4, created: at(2023, 3, 5, 16, 0) },
        ];

        let sections = formatter.divide_date(entries);
        let summary: Vec<(String, Vec<u32>)> = sections
            .into_iter()
            .map(|section| {
                (
                    section.date,
                    section.entries.iter().map(|entry| entry.id).collect(),
                )
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("2023년 3월 4일".to_string(), vec![1, 3]),
                ("2023년 3월 5일".to_string(), vec![2]),
                ("2023년 3월 6일".to_string(), vec![4]),
            ]
        );
    }

    #[test]
    fn divide_date_of_nothing_is_empty() {
        let formatter = TimeFormatter::kst();
        assert!(formatter.divide_date(Vec::<Entry>::new()).is_empty());
    }

    #[test]
    fn from_config_rejects_offsets_beyond_a_day() {
        let valid = LocaleConfig { utc_offset_minutes: 0 };
        assert!(TimeFormatter::from_config(&valid).is_some());

        let invalid = LocaleConfig { utc_offset_minutes: 24 * 60 };
        assert!(TimeFormatter::from_config(&invalid).is_none());
    }
}
