use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{empty_string_as_none, FromSqliteRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl ExerciseRecord {
    /// Canonical date rendering used in every response body,
    /// e.g. "Mon Jan 01 2024".
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }
}

impl FromSqliteRow for ExerciseRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            description: row.get("description")?,
            duration: row.get("duration")?,
            date: row.get("date")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Accepted input format for submitted dates and log range bounds.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<String>,
}

/// Date-range and length constraints applied to a user's log.
///
/// Parsing is lenient: a bound or limit that does not parse is dropped
/// rather than reported as an error.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl LogFilter {
    pub fn from_query(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            from: from.and_then(parse_date),
            to: to.and_then(parse_date),
            limit: limit
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|n| *n > 0),
        }
    }

    /// Keep records inside the date range, in their original order, then
    /// truncate to the first `limit` of what remains.
    pub fn apply(&self, records: Vec<ExerciseRecord>) -> Vec<ExerciseRecord> {
        let mut kept: Vec<_> = records
            .into_iter()
            .filter(|r| self.from.map_or(true, |from| r.date >= from))
            .filter(|r| self.to.map_or(true, |to| r.date <= to))
            .collect();
        if let Some(limit) = self.limit {
            kept.truncate(limit);
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32) -> ExerciseRecord {
        ExerciseRecord {
            id: format!("ex-{day}"),
            user_id: "user1".to_string(),
            description: "running".to_string(),
            duration: 30,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn dates(records: &[ExerciseRecord]) -> Vec<u32> {
        use chrono::Datelike;
        records.iter().map(|r| r.date.day()).collect()
    }

    #[test]
    fn test_format_date_pads_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_date(date), "Mon Jan 01 2024");
    }

    #[test]
    fn test_format_date_weekday() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(format_date(date), "Sun Dec 31 2023");
    }

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(
            parse_date("2024-01-01"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn test_from_query_lenient() {
        let filter = LogFilter::from_query(Some("2024-01-02"), Some("garbage"), Some("abc"));
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(filter.to, None);
        assert_eq!(filter.limit, None);
    }

    #[test]
    fn test_from_query_rejects_nonpositive_limit() {
        let filter = LogFilter::from_query(None, None, Some("0"));
        assert_eq!(filter.limit, None);

        let filter = LogFilter::from_query(None, None, Some("-3"));
        assert_eq!(filter.limit, None);

        let filter = LogFilter::from_query(None, None, Some("2"));
        assert_eq!(filter.limit, Some(2));
    }

    #[test]
    fn test_apply_no_filter_keeps_order() {
        let filter = LogFilter::default();
        let kept = filter.apply(vec![record(3), record(1), record(2)]);
        assert_eq!(dates(&kept), vec![3, 1, 2]);
    }

    #[test]
    fn test_apply_from_bound_inclusive() {
        let filter = LogFilter {
            from: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..Default::default()
        };
        let kept = filter.apply(vec![record(1), record(2), record(3)]);
        assert_eq!(dates(&kept), vec![2, 3]);
    }

    #[test]
    fn test_apply_to_bound_inclusive() {
        let filter = LogFilter {
            to: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..Default::default()
        };
        let kept = filter.apply(vec![record(1), record(2), record(3)]);
        assert_eq!(dates(&kept), vec![1, 2]);
    }

    #[test]
    fn test_apply_range_intersection() {
        let filter = LogFilter {
            from: NaiveDate::from_ymd_opt(2024, 1, 2),
            to: NaiveDate::from_ymd_opt(2024, 1, 4),
            ..Default::default()
        };
        let kept = filter.apply(vec![record(1), record(2), record(3), record(4), record(5)]);
        assert_eq!(dates(&kept), vec![2, 3, 4]);
    }

    #[test]
    fn test_apply_limit_takes_front_after_filtering() {
        let filter = LogFilter {
            from: NaiveDate::from_ymd_opt(2024, 1, 2),
            limit: Some(2),
            ..Default::default()
        };
        let kept = filter.apply(vec![record(1), record(2), record(3), record(4)]);
        assert_eq!(dates(&kept), vec![2, 3]);
    }

    #[test]
    fn test_apply_limit_larger_than_log() {
        let filter = LogFilter {
            limit: Some(10),
            ..Default::default()
        };
        let kept = filter.apply(vec![record(1), record(2)]);
        assert_eq!(dates(&kept), vec![1, 2]);
    }
}
