// src/models/mod.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::report::decimal_number;

// ───────────────────────────────────────
// Reference data
// ───────────────────────────────────────
#[derive(Debug, FromRow)]
pub struct Warehouse {
    pub warehouse_id: i64,
    pub name: String,
    pub wh_type: String,
    pub total_sqm: Decimal,
    pub max_cap_sqm: Decimal,
    pub max_cap_vol: Decimal,
}

#[derive(Debug, Serialize)]
pub struct WarehouseView {
    pub warehouse_id: i64,
    pub name: String,
    pub wh_type: String,
    pub total_sqm: f64,
    pub max_cap_sqm: f64,
    pub max_cap_vol: f64,
}

impl From<Warehouse> for WarehouseView {
    fn from(w: Warehouse) -> Self {
        Self {
            warehouse_id: w.warehouse_id,
            name: w.name,
            wh_type: w.wh_type,
            total_sqm: decimal_number(w.total_sqm),
            max_cap_sqm: decimal_number(w.max_cap_sqm),
            max_cap_vol: decimal_number(w.max_cap_vol),
        }
    }
}

// ───────────────────────────────────────
// Shipment records
// ───────────────────────────────────────
#[derive(Debug, FromRow)]
pub struct InboundRecord {
    pub inbound_id: i64,
    pub wh_name: String,
    pub wh_type: String,
    pub doc_type: String,
    pub doc_no: String,
    pub truck_no: String,
    pub customer: String,
    pub shipper: Option<String>,
    pub item_code: String,
    pub item_name: String,
    pub qty: Decimal,
    pub weight_kg: Decimal,
    pub volume_m3: Decimal,
    pub year: i32,
    pub month: String,            // three-letter convention
    pub week_no: i32,             // ISO week
    pub week_label: String,       // W1..W5
    pub gate_in: Option<DateTime<Utc>>,
    pub tally_start: Option<DateTime<Utc>>,
    pub tally_finish: Option<DateTime<Utc>>,
    pub putaway_start: Option<DateTime<Utc>>,
    pub putaway_finish: Option<DateTime<Utc>>,
    pub operator: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InboundView {
    pub inbound_id: i64,
    pub wh_name: String,
    pub wh_type: String,
    pub doc_type: String,
    pub doc_no: String,
    pub truck_no: String,
    pub customer: String,
    pub shipper: Option<String>,
    pub item_code: String,
    pub item_name: String,
    pub qty: f64,
    pub weight_kg: f64,
    pub volume_m3: f64,
    pub year: i32,
    pub month: String,
    pub week_no: i32,
    pub week_label: String,
    pub gate_in: Option<DateTime<Utc>>,
    pub tally_start: Option<DateTime<Utc>>,
    pub tally_finish: Option<DateTime<Utc>>,
    pub putaway_start: Option<DateTime<Utc>>,
    pub putaway_finish: Option<DateTime<Utc>>,
    pub operator: Option<String>,
}

impl From<InboundRecord> for InboundView {
    fn from(r: InboundRecord) -> Self {
        Self {
            inbound_id: r.inbound_id,
            wh_name: r.wh_name,
            wh_type: r.wh_type,
            doc_type: r.doc_type,
            doc_no: r.doc_no,
            truck_no: r.truck_no,
            customer: r.customer,
            shipper: r.shipper,
            item_code: r.item_code,
            item_name: r.item_name,
            qty: decimal_number(r.qty),
            weight_kg: decimal_number(r.weight_kg),
            volume_m3: decimal_number(r.volume_m3),
            year: r.year,
            month: r.month,
            week_no: r.week_no,
            week_label: r.week_label,
            gate_in: r.gate_in,
            tally_start: r.tally_start,
            tally_finish: r.tally_finish,
            putaway_start: r.putaway_start,
            putaway_finish: r.putaway_finish,
            operator: r.operator,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct OutboundRecord {
    pub outbound_id: i64,
    pub wh_name: String,
    pub wh_type: String,
    pub doc_type: String,
    pub doc_no: String,
    pub truck_no: String,
    pub customer: String,
    pub consignee: Option<String>,
    pub item_code: String,
    pub item_name: String,
    pub qty: Decimal,
    pub weight_kg: Decimal,
    pub volume_m3: Decimal,
    pub year: i32,
    pub month: String,
    pub week_no: i32,
    pub week_label: String,
    pub picking_start: Option<DateTime<Utc>>,
    pub picking_finish: Option<DateTime<Utc>>,
    pub loading_start: Option<DateTime<Utc>>,
    pub loading_finish: Option<DateTime<Utc>>,
    pub operator: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OutboundView {
    pub outbound_id: i64,
    pub wh_name: String,
    pub wh_type: String,
    pub doc_type: String,
    pub doc_no: String,
    pub truck_no: String,
    pub customer: String,
    pub consignee: Option<String>,
    pub item_code: String,
    pub item_name: String,
    pub qty: f64,
    pub weight_kg: f64,
    pub volume_m3: f64,
    pub year: i32,
    pub month: String,
    pub week_no: i32,
    pub week_label: String,
    pub picking_start: Option<DateTime<Utc>>,
    pub picking_finish: Option<DateTime<Utc>>,
    pub loading_start: Option<DateTime<Utc>>,
    pub loading_finish: Option<DateTime<Utc>>,
    pub operator: Option<String>,
}

impl From<OutboundRecord> for OutboundView {
    fn from(r: OutboundRecord) -> Self {
        Self {
            outbound_id: r.outbound_id,
            wh_name: r.wh_name,
            wh_type: r.wh_type,
            doc_type: r.doc_type,
            doc_no: r.doc_no,
            truck_no: r.truck_no,
            customer: r.customer,
            consignee: r.consignee,
            item_code: r.item_code,
            item_name: r.item_name,
            qty: decimal_number(r.qty),
            weight_kg: decimal_number(r.weight_kg),
            volume_m3: decimal_number(r.volume_m3),
            year: r.year,
            month: r.month,
            week_no: r.week_no,
            week_label: r.week_label,
            picking_start: r.picking_start,
            picking_finish: r.picking_finish,
            loading_start: r.loading_start,
            loading_finish: r.loading_finish,
            operator: r.operator,
        }
    }
}

// ───────────────────────────────────────
// Users (simple RBAC role string)
// ───────────────────────────────────────
/// Response-safe user shape. The password_hash column is never part of a
/// select list, so no secret can reach a serializer.
#[derive(Debug, Serialize, FromRow)]
pub struct AppUser {
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
