use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Rows created in one calendar month (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlyCount {
    #[schema(example = "2025-03")]
    pub month: String,
    pub count: u64,
}

/// Start of the trailing window used by the dashboard charts.
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

/// Buckets timestamps by `YYYY-MM`, oldest month first. Months without rows are omitted.
pub fn bucket_by_month<I>(timestamps: I) -> Vec<MonthlyCount>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut months: BTreeMap<String, u64> = BTreeMap::new();
    for ts in timestamps {
        *months.entry(ts.format("%Y-%m").to_string()).or_default() += 1;
    }
    months
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}
