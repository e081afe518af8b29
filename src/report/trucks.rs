// src/report/trucks.rs

use std::collections::HashMap;

use serde::Serialize;

/// One raw inbound document line within a fixed reporting period.
#[derive(Debug, Clone)]
pub struct TruckLine {
    pub truck_no: String,
    pub warehouse: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckCount {
    pub warehouse: String,
    pub trucks: i64,
}

/// Truck arrivals per warehouse. A (warehouse, truck) key seen more than
/// once means several document lines for the same physical arrival; every
/// line of such a key is excluded, so the result is the count of keys with
/// exactly one row, not the count of distinct keys.
pub fn hit_counts(warehouses: &[String], lines: Vec<TruckLine>) -> Vec<TruckCount> {
    let mut per_key: HashMap<(String, String), u32> = HashMap::new();
    for l in lines {
        *per_key.entry((l.warehouse, l.truck_no)).or_insert(0) += 1;
    }
    warehouses
        .iter()
        .map(|w| TruckCount {
            warehouse: w.clone(),
            trucks: per_key.iter().filter(|((wh, _), n)| wh == w && **n == 1).count() as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(truck: &str, wh: &str) -> TruckLine {
        TruckLine { truck_no: truck.to_string(), warehouse: wh.to_string() }
    }

    fn whs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn duplicated_keys_are_fully_excluded() {
        let lines = vec![
            line("B 9001 XY", "FZ AB"),
            line("B 9001 XY", "FZ AB"), // second line for the same arrival
            line("B 7742 KL", "FZ AB"),
        ];
        let counts = hit_counts(&whs(&["FZ AB"]), lines);
        assert_eq!(counts, vec![TruckCount { warehouse: "FZ AB".into(), trucks: 1 }]);
    }

    #[test]
    fn same_truck_in_two_warehouses_counts_twice() {
        let lines = vec![line("B 9001 XY", "FZ AB"), line("B 9001 XY", "Bonded")];
        let counts = hit_counts(&whs(&["FZ AB", "Bonded"]), lines);
        assert_eq!(counts[0].trucks, 1);
        assert_eq!(counts[1].trucks, 1);
    }

    #[test]
    fn requested_warehouses_with_no_rows_report_zero() {
        let counts = hit_counts(&whs(&["FZ AB", "GB"]), vec![line("B 1 A", "FZ AB")]);
        assert_eq!(counts[1], TruckCount { warehouse: "GB".into(), trucks: 0 });
    }

    #[test]
    fn triple_lines_still_excluded_entirely() {
        let lines = vec![
            line("B 5 C", "GB"),
            line("B 5 C", "GB"),
            line("B 5 C", "GB"),
        ];
        let counts = hit_counts(&whs(&["GB"]), lines);
        assert_eq!(counts[0].trucks, 0);
    }
}
