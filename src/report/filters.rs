// src/report/filters.rs

use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Store-internal month convention, in calendar order. Presentation order
/// for monthly charts comes from this table, never from SQL.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Reporting weeks partitioning a calendar month.
pub const WEEK_LABELS: [&str; 5] = ["W1", "W2", "W3", "W4", "W5"];

/// Warehouse zone classifications, in presentation order: free-zone
/// sections, bonded, general bonded.
pub const WH_TYPES: [&str; 4] = ["FZ AB", "FZ BRJ", "Bonded", "GB"];

/// Fallback for month names outside the lookup table. Defined policy: an
/// unrecognized name resolves here instead of failing the request.
pub const DEFAULT_MONTH: &str = "Oct";

const MONTH_NAMES: [(&str, &str); 12] = [
    ("January", "Jan"),
    ("February", "Feb"),
    ("March", "Mar"),
    ("April", "Apr"),
    ("May", "May"),
    ("June", "Jun"),
    ("July", "Jul"),
    ("August", "Aug"),
    ("September", "Sep"),
    ("October", "Oct"),
    ("November", "Nov"),
    ("December", "Dec"),
];

/// Normalizes a human month name to the store's three-letter convention.
/// Already-normalized names pass through.
pub fn normalize_month(name: &str) -> &'static str {
    if let Some(short) = MONTHS.iter().copied().find(|m| *m == name) {
        return short;
    }
    MONTH_NAMES
        .iter()
        .find(|(full, _)| *full == name)
        .map(|(_, short)| *short)
        .unwrap_or(DEFAULT_MONTH)
}

pub fn wh_type_index(wh_type: &str) -> Option<usize> {
    WH_TYPES.iter().position(|t| *t == wh_type)
}

/// Week-in-month label for a day of month: 1-7 -> W1, 8-14 -> W2, ...,
/// 29-31 -> W5.
pub fn week_in_month(day: u32) -> &'static str {
    WEEK_LABELS[((day.saturating_sub(1) / 7) as usize).min(WEEK_LABELS.len() - 1)]
}

/// First value for a query key, if present.
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// All values for a query key. Repeated keys and comma-separated values
/// both contribute to the list.
pub fn list_values(pairs: &[(String, String)], key: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .flat_map(|(_, v)| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Paging for record listings: limit clamped to 1..500, default 50.
pub fn page(pairs: &[(String, String)]) -> (i64, i64) {
    let limit = first_value(pairs, "limit")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(50)
        .clamp(1, 500);
    let offset = first_value(pairs, "offset")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
        .max(0);
    (limit, offset)
}

fn dedup_keep_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(v.clone())).collect()
}

/// Resolved report filter. Output ordering everywhere follows the request's
/// own lists; defaults fill in the current period and the full label sets.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilter {
    pub year: i32,
    /// First requested month (normalized), or the current month.
    pub month: String,
    /// Requested months in request order, or all twelve in calendar order.
    pub months: Vec<String>,
    /// First requested week label, or the current week-in-month.
    pub week: String,
    /// Requested week labels in request order, or W1..W5.
    pub weeks: Vec<String>,
    /// Requested warehouses/types in request order; None means the caller
    /// should fall back to its full set.
    pub warehouses: Option<Vec<String>>,
}

impl ReportFilter {
    pub fn resolve(pairs: &[(String, String)], today: NaiveDate) -> Result<Self, String> {
        let year = match first_value(pairs, "year") {
            Some(v) => v
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("invalid year: {v}"))?,
            None => today.year(),
        };

        let requested_months: Vec<String> = list_values(pairs, "month")
            .iter()
            .map(|m| normalize_month(m).to_string())
            .collect();
        let month = requested_months
            .first()
            .cloned()
            .unwrap_or_else(|| MONTHS[today.month0() as usize].to_string());
        let months = if requested_months.is_empty() {
            MONTHS.iter().map(|m| m.to_string()).collect()
        } else {
            dedup_keep_order(requested_months)
        };

        let requested_weeks = list_values(pairs, "week");
        let week = requested_weeks
            .first()
            .cloned()
            .unwrap_or_else(|| week_in_month(today.day()).to_string());
        let weeks = if requested_weeks.is_empty() {
            WEEK_LABELS.iter().map(|w| w.to_string()).collect()
        } else {
            dedup_keep_order(requested_weeks)
        };

        let requested_warehouses = list_values(pairs, "warehouse");
        let warehouses = if requested_warehouses.is_empty() {
            None
        } else {
            Some(dedup_keep_order(requested_warehouses))
        };

        Ok(Self { year, month, months, week, weeks, warehouses })
    }

    /// Requested warehouse list, or `fallback` in its given order.
    pub fn warehouses_or(&self, fallback: &[&str]) -> Vec<String> {
        match &self.warehouses {
            Some(w) => w.clone(),
            None => fallback.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(kv: &[(&str, &str)]) -> Vec<(String, String)> {
        kv.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_normalization_full_short_and_fallback() {
        assert_eq!(normalize_month("January"), "Jan");
        assert_eq!(normalize_month("September"), "Sep");
        assert_eq!(normalize_month("Dec"), "Dec");
        assert_eq!(normalize_month("Pluto"), "Oct");
        assert_eq!(normalize_month(""), "Oct");
    }

    #[test]
    fn week_in_month_boundaries() {
        assert_eq!(week_in_month(1), "W1");
        assert_eq!(week_in_month(7), "W1");
        assert_eq!(week_in_month(8), "W2");
        assert_eq!(week_in_month(28), "W4");
        assert_eq!(week_in_month(29), "W5");
        assert_eq!(week_in_month(31), "W5");
    }

    #[test]
    fn defaults_come_from_today() {
        let f = ReportFilter::resolve(&[], day(2026, 8, 6)).unwrap();
        assert_eq!(f.year, 2026);
        assert_eq!(f.month, "Aug");
        assert_eq!(f.week, "W1");
        assert_eq!(f.weeks, WEEK_LABELS);
        assert_eq!(f.months.len(), 12);
        assert_eq!(f.warehouses, None);
    }

    #[test]
    fn repeated_keys_and_comma_lists_merge() {
        let p = pairs(&[("week", "W2"), ("week", "W1,W3"), ("warehouse", "FZ AB,Bonded")]);
        let f = ReportFilter::resolve(&p, day(2026, 1, 15)).unwrap();
        assert_eq!(f.weeks, vec!["W2", "W1", "W3"]);
        assert_eq!(f.week, "W2");
        assert_eq!(f.warehouses, Some(vec!["FZ AB".to_string(), "Bonded".to_string()]));
    }

    #[test]
    fn requested_order_is_kept_and_duplicates_drop() {
        let p = pairs(&[("week", "W3,W1,W3")]);
        let f = ReportFilter::resolve(&p, day(2026, 1, 1)).unwrap();
        assert_eq!(f.weeks, vec!["W3", "W1"]);
    }

    #[test]
    fn month_list_normalizes_each_entry() {
        let p = pairs(&[("month", "January,February"), ("month", "Mars")]);
        let f = ReportFilter::resolve(&p, day(2026, 6, 1)).unwrap();
        assert_eq!(f.months, vec!["Jan", "Feb", "Oct"]);
        assert_eq!(f.month, "Jan");
    }

    #[test]
    fn bad_year_is_a_validation_error() {
        let p = pairs(&[("year", "twenty")]);
        let err = ReportFilter::resolve(&p, day(2026, 1, 1)).unwrap_err();
        assert!(err.contains("invalid year"));
    }

    #[test]
    fn paging_clamps() {
        assert_eq!(page(&pairs(&[("limit", "9999"), ("offset", "-3")])), (500, 0));
        assert_eq!(page(&pairs(&[("limit", "0")])), (1, 0));
        assert_eq!(page(&[]), (50, 0));
    }

    #[test]
    fn type_ordering_enumeration() {
        assert_eq!(wh_type_index("FZ AB"), Some(0));
        assert!(wh_type_index("Bonded") < wh_type_index("GB"));
        assert_eq!(wh_type_index("attic"), None);
    }

    #[test]
    fn default_months_are_calendar_ordered() {
        let f = ReportFilter::resolve(&[], day(2026, 3, 10)).unwrap();
        assert_eq!(f.months.first().map(String::as_str), Some("Jan"));
        assert_eq!(f.months.last().map(String::as_str), Some("Dec"));
    }
}
