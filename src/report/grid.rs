// src/report/grid.rs

use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One (group, period, value) point taken from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub group: String,
    pub period: String,
    pub value: f64,
}

/// A chart row, serialized as `{"warehouse": ..., "W1": v, "W2": v, ...}`.
/// Column order is the period order the row was built from; the axes stay
/// aligned across rows because every row carries every period.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub warehouse: String,
    pub columns: Vec<(String, f64)>,
}

impl Serialize for GridRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 1))?;
        map.serialize_entry("warehouse", &self.warehouse)?;
        for (period, value) in &self.columns {
            map.serialize_entry(period, value)?;
        }
        map.end()
    }
}

/// Dense grid over groups × periods. Every requested combination appears;
/// missing source data comes out as 0. Duplicate source cells for one key
/// keep the last value seen.
pub fn dense_grid(groups: &[String], periods: &[String], cells: Vec<Cell>) -> Vec<GridRow> {
    let mut by_key: HashMap<(String, String), f64> = HashMap::with_capacity(cells.len());
    for c in cells {
        by_key.insert((c.group, c.period), c.value);
    }
    groups
        .iter()
        .map(|g| GridRow {
            warehouse: g.clone(),
            columns: periods
                .iter()
                .map(|p| {
                    let v = by_key.get(&(g.clone(), p.clone())).copied().unwrap_or(0.0);
                    (p.clone(), v)
                })
                .collect(),
        })
        .collect()
}

/// Collapses repeated (group, period) samples into their sum.
pub fn sum_cells(samples: Vec<Cell>) -> Vec<Cell> {
    let mut acc: HashMap<(String, String), f64> = HashMap::new();
    for s in samples {
        *acc.entry((s.group, s.period)).or_insert(0.0) += s.value;
    }
    acc.into_iter()
        .map(|((group, period), value)| Cell { group, period, value })
        .collect()
}

/// Collapses repeated (group, period) samples into their mean. The
/// lead-time report feeds per-row durations through this.
pub fn mean_cells(samples: Vec<Cell>) -> Vec<Cell> {
    let mut acc: HashMap<(String, String), (f64, u32)> = HashMap::new();
    for s in samples {
        let e = acc.entry((s.group, s.period)).or_insert((0.0, 0));
        e.0 += s.value;
        e.1 += 1;
    }
    acc.into_iter()
        .map(|((group, period), (sum, n))| Cell { group, period, value: sum / f64::from(n) })
        .collect()
}

/// Occupied/empty totals for one warehouse type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OccupancySlice {
    pub occupied: f64,
    pub empty: f64,
}

/// Ordered mapping from warehouse type to its occupancy split.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancySummary(pub Vec<(String, OccupancySlice)>);

impl Serialize for OccupancySummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (wh_type, slice) in &self.0 {
            map.serialize_entry(wh_type, slice)?;
        }
        map.end()
    }
}

/// One occupancy snapshot row for the pie fold.
#[derive(Debug, Clone)]
pub struct StatusRow {
    pub wh_type: String,
    pub status: String,
    pub space: f64,
}

/// Sums `space` per (type, status) and folds into occupied/empty pairs.
/// Types come out in the order of `types`; a side with no rows stays 0.
/// Statuses outside the occupied/empty pair are ignored.
pub fn pie_summary(types: &[String], rows: Vec<StatusRow>) -> OccupancySummary {
    let mut by_type: HashMap<String, OccupancySlice> = HashMap::new();
    for r in rows {
        let slice = by_type.entry(r.wh_type).or_default();
        match r.status.as_str() {
            "occupied" => slice.occupied += r.space,
            "empty" => slice.empty += r.space,
            _ => {}
        }
    }
    OccupancySummary(
        types
            .iter()
            .map(|t| (t.clone(), by_type.get(t).copied().unwrap_or_default()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn cell(group: &str, period: &str, value: f64) -> Cell {
        Cell { group: group.to_string(), period: period.to_string(), value }
    }

    #[test]
    fn grid_zero_fills_missing_combinations() {
        let rows = dense_grid(
            &strings(&["FZ AB", "Bonded"]),
            &strings(&["W1", "W2"]),
            vec![cell("FZ AB", "W2", 7.0)],
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].columns, vec![("W1".to_string(), 0.0), ("W2".to_string(), 7.0)]);
        assert_eq!(rows[1].columns, vec![("W1".to_string(), 0.0), ("W2".to_string(), 0.0)]);
    }

    #[test]
    fn grid_follows_request_order_not_store_order() {
        let rows = dense_grid(
            &strings(&["GB", "FZ AB"]),
            &strings(&["W3", "W1"]),
            vec![cell("FZ AB", "W1", 1.0), cell("GB", "W3", 2.0)],
        );
        assert_eq!(rows[0].warehouse, "GB");
        assert_eq!(rows[1].warehouse, "FZ AB");
        assert_eq!(rows[0].columns[0].0, "W3");
        assert_eq!(rows[0].columns[1].0, "W1");
    }

    #[test]
    fn grid_duplicate_key_keeps_last_value() {
        let rows = dense_grid(
            &strings(&["FZ AB"]),
            &strings(&["W1"]),
            vec![cell("FZ AB", "W1", 3.0), cell("FZ AB", "W1", 9.0)],
        );
        assert_eq!(rows[0].columns[0].1, 9.0);
    }

    #[test]
    fn grid_row_serializes_columns_in_order() {
        let row = GridRow {
            warehouse: "FZ AB".to_string(),
            columns: vec![("W2".to_string(), 5.0), ("W1".to_string(), 0.0)],
        };
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"warehouse":"FZ AB","W2":5.0,"W1":0.0}"#
        );
    }

    #[test]
    fn sum_cells_accumulates_per_key() {
        let mut out = sum_cells(vec![
            cell("FZ AB", "Jan", 2.0),
            cell("FZ AB", "Jan", 3.0),
            cell("GB", "Jan", 1.0),
        ]);
        out.sort_by(|a, b| a.group.cmp(&b.group));
        assert_eq!(out[0].value, 5.0);
        assert_eq!(out[1].value, 1.0);
    }

    #[test]
    fn mean_cells_averages_per_key() {
        let out = mean_cells(vec![cell("FZ AB", "W1", 10.0), cell("FZ AB", "W1", 20.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, 15.0);
    }

    #[test]
    fn pie_folds_both_statuses() {
        let rows = vec![
            StatusRow { wh_type: "FZ AB".into(), status: "occupied".into(), space: 100.0 },
            StatusRow { wh_type: "FZ AB".into(), status: "empty".into(), space: 50.0 },
        ];
        let summary = pie_summary(&strings(&["FZ AB"]), rows);
        assert_eq!(summary.0[0].1, OccupancySlice { occupied: 100.0, empty: 50.0 });
    }

    #[test]
    fn pie_missing_side_defaults_to_zero() {
        let rows = vec![StatusRow { wh_type: "FZ AB".into(), status: "occupied".into(), space: 80.0 }];
        let summary = pie_summary(&strings(&["FZ AB", "GB"]), rows);
        assert_eq!(summary.0[0].1, OccupancySlice { occupied: 80.0, empty: 0.0 });
        // a type with no rows at all still appears
        assert_eq!(summary.0[1].0, "GB");
        assert_eq!(summary.0[1].1, OccupancySlice::default());
    }

    #[test]
    fn pie_sums_repeated_groups_and_serializes_in_type_order() {
        let rows = vec![
            StatusRow { wh_type: "GB".into(), status: "occupied".into(), space: 10.0 },
            StatusRow { wh_type: "GB".into(), status: "occupied".into(), space: 15.0 },
        ];
        let summary = pie_summary(&strings(&["FZ AB", "GB"]), rows);
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"FZ AB":{"occupied":0.0,"empty":0.0},"GB":{"occupied":25.0,"empty":0.0}}"#
        );
    }
}
