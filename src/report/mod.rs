// src/report/mod.rs
//
// Aggregation/reshape layer: turns raw store rows into the dense,
// chart-ready structures the dashboard consumes. Everything here is pure;
// routes own the SQL.

pub mod filters;
pub mod grid;
pub mod trucks;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// NUMERIC columns cross the API boundary as plain JSON numbers
/// (stored 12.50 comes out as 12.5, never as a string).
pub fn decimal_number(d: Decimal) -> f64 {
    d.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_serializes_as_plain_number() {
        let d: Decimal = "12.50".parse().unwrap();
        let n = decimal_number(d);
        assert_eq!(n, 12.5);
        assert_eq!(serde_json::to_string(&n).unwrap(), "12.5");
    }

    #[test]
    fn decimal_zero_and_integers() {
        let d: Decimal = "1200".parse().unwrap();
        assert_eq!(decimal_number(d), 1200.0);
        assert_eq!(decimal_number(Decimal::ZERO), 0.0);
    }
}
