//! # Report Aggregator
//!
//! Read-only calendar-bucketed rollups over the sales table.
//!
//! Bucketing happens in Rust over (created_at, total) pairs rather than
//! in SQL: chrono's ISO-week arithmetic is correct across year
//! boundaries, where naive `strftime('%W')` grouping is not.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use benta_core::Principal;
use benta_db::Database;

/// A calendar bucket to aggregate by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl ReportPeriod {
    /// Parses a period name. Unknown names are None, which the
    /// aggregator maps to an empty report rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(ReportPeriod::Daily),
            "weekly" => Some(ReportPeriod::Weekly),
            "monthly" => Some(ReportPeriod::Monthly),
            _ => None,
        }
    }
}

/// One aggregated bucket: a calendar label and the summed sale totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBucket {
    /// `YYYY-MM-DD` (daily), `Week {w} {iso_year}` (weekly) or
    /// `{month}/{year}` (monthly). Week and month labels carry the year
    /// to avoid cross-year collisions.
    pub label: String,
    pub total_cents: i64,
}

/// Read-only time-bucketed rollups over sales.
#[derive(Debug, Clone)]
pub struct ReportAggregator {
    db: Database,
}

impl ReportAggregator {
    pub fn new(db: Database) -> Self {
        ReportAggregator { db }
    }

    /// Sums sale totals per calendar bucket of the given period.
    ///
    /// Buckets with no sales are omitted; buckets are returned in
    /// chronological order. An unrecognized period name yields an empty
    /// sequence, not an error.
    pub async fn aggregate(
        &self,
        principal: &Principal,
        period: &str,
    ) -> EngineResult<Vec<ReportBucket>> {
        if !principal.can_operate() {
            return Err(EngineError::Unauthorized {
                role: principal.role,
            });
        }

        let Some(period) = ReportPeriod::parse(period) else {
            debug!(period = %period, "Unknown report period, returning empty report");
            return Ok(Vec::new());
        };

        let rows = self.db.sales().totals_by_date().await?;
        Ok(bucketize(period, &rows))
    }
}

/// Pure bucketing over (timestamp, total) pairs.
fn bucketize(period: ReportPeriod, rows: &[(DateTime<Utc>, i64)]) -> Vec<ReportBucket> {
    // Keys sort chronologically; labels are derived per key.
    let mut buckets: BTreeMap<(i32, u32, u32), (String, i64)> = BTreeMap::new();

    for (created_at, total_cents) in rows {
        let (key, label) = match period {
            ReportPeriod::Daily => {
                let date = created_at.date_naive();
                (
                    (date.year(), date.month(), date.day()),
                    date.format("%Y-%m-%d").to_string(),
                )
            }
            ReportPeriod::Weekly => {
                let week = created_at.iso_week();
                // ISO week-year, not calendar year: Jan 1 can belong to
                // the previous year's last week.
                (
                    (week.year(), week.week(), 0),
                    format!("Week {} {}", week.week(), week.year()),
                )
            }
            ReportPeriod::Monthly => (
                (created_at.year(), created_at.month(), 0),
                format!("{}/{}", created_at.month(), created_at.year()),
            ),
        };

        buckets.entry(key).or_insert_with(|| (label, 0)).1 += total_cents;
    }

    buckets
        .into_values()
        .map(|(label, total_cents)| ReportBucket { label, total_cents })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(ReportPeriod::parse("daily"), Some(ReportPeriod::Daily));
        assert_eq!(ReportPeriod::parse("weekly"), Some(ReportPeriod::Weekly));
        assert_eq!(ReportPeriod::parse("monthly"), Some(ReportPeriod::Monthly));
        assert_eq!(ReportPeriod::parse("yearly"), None);
        assert_eq!(ReportPeriod::parse(""), None);
    }

    #[test]
    fn test_daily_buckets_sum_and_sort() {
        let rows = vec![
            (ts(2026, 3, 2), 1000),
            (ts(2026, 3, 1), 500),
            (ts(2026, 3, 2), 250),
        ];
        let buckets = bucketize(ReportPeriod::Daily, &rows);
        assert_eq!(
            buckets,
            vec![
                ReportBucket {
                    label: "2026-03-01".to_string(),
                    total_cents: 500,
                },
                ReportBucket {
                    label: "2026-03-02".to_string(),
                    total_cents: 1250,
                },
            ]
        );
    }

    #[test]
    fn test_weekly_uses_iso_week_year() {
        // 2026-01-01 falls in ISO week 1 of 2026, but 2027-01-01 falls
        // in ISO week 53 of 2026. Labels must not collide with week 53
        // sales from December 2026.
        let rows = vec![
            (ts(2026, 12, 31), 100), // Week 53 2026
            (ts(2027, 1, 1), 200),   // still Week 53 2026
            (ts(2027, 1, 4), 400),   // Week 1 2027
        ];
        let buckets = bucketize(ReportPeriod::Weekly, &rows);
        assert_eq!(
            buckets,
            vec![
                ReportBucket {
                    label: "Week 53 2026".to_string(),
                    total_cents: 300,
                },
                ReportBucket {
                    label: "Week 1 2027".to_string(),
                    total_cents: 400,
                },
            ]
        );
    }

    #[test]
    fn test_monthly_labels_carry_year() {
        let rows = vec![
            (ts(2025, 12, 15), 100),
            (ts(2026, 12, 15), 200),
            (ts(2026, 1, 10), 50),
        ];
        let buckets = bucketize(ReportPeriod::Monthly, &rows);
        assert_eq!(
            buckets,
            vec![
                ReportBucket {
                    label: "12/2025".to_string(),
                    total_cents: 100,
                },
                ReportBucket {
                    label: "1/2026".to_string(),
                    total_cents: 50,
                },
                ReportBucket {
                    label: "12/2026".to_string(),
                    total_cents: 200,
                },
            ]
        );
    }

    #[test]
    fn test_empty_rows_empty_report() {
        assert!(bucketize(ReportPeriod::Daily, &[]).is_empty());
    }
}
