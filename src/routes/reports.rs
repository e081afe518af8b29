// src/routes/reports.rs
//
// Reports built on inbound_aggregated rollups and raw inbound rows. The
// SQL only filters; grouping, zero-fill, and ordering happen in report::.

use axum::{extract::{Query, State}, Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{query_as, FromRow};

use crate::report::decimal_number;
use crate::report::filters::{ReportFilter, WH_TYPES};
use crate::report::grid::{dense_grid, mean_cells, sum_cells, Cell, GridRow};
use crate::report::trucks::{hit_counts, TruckCount, TruckLine};
use crate::AppState;
use super::{bad_request, internal_error, ApiError};
use super::warehouses::warehouse_names;

#[derive(FromRow)]
struct TruckGridRow {
    wh_type: String,
    week_label: String,
    truck_count: i64,
}

/// Unique-truck counts per (type × week) from the precomputed rollup.
pub async fn trucks(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<GridRow>>, ApiError> {
    let f = ReportFilter::resolve(&pairs, Utc::now().date_naive()).map_err(bad_request)?;
    let types = f.warehouses_or(&WH_TYPES);

    let rows = query_as::<_, TruckGridRow>(
        r#"
        SELECT wh_type, week_label, truck_count
        FROM public.inbound_aggregated
        WHERE year=$1 AND month=$2 AND week_label = ANY($3) AND wh_type = ANY($4)
        "#
    )
    .bind(f.year).bind(&f.month).bind(&f.weeks).bind(&types)
    .fetch_all(&state.pool).await.map_err(internal_error)?;

    let cells = rows
        .into_iter()
        .map(|r| Cell { group: r.wh_type, period: r.week_label, value: r.truck_count as f64 })
        .collect();
    Ok(Json(dense_grid(&types, &f.weeks, cells)))
}

#[derive(FromRow)]
struct VolumeGridRow {
    wh_type: String,
    week_label: String,
    total_volume: Decimal,
}

/// Total inbound volume per (type × week) from the precomputed rollup.
pub async fn volume(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<GridRow>>, ApiError> {
    let f = ReportFilter::resolve(&pairs, Utc::now().date_naive()).map_err(bad_request)?;
    let types = f.warehouses_or(&WH_TYPES);

    let rows = query_as::<_, VolumeGridRow>(
        r#"
        SELECT wh_type, week_label, total_volume
        FROM public.inbound_aggregated
        WHERE year=$1 AND month=$2 AND week_label = ANY($3) AND wh_type = ANY($4)
        "#
    )
    .bind(f.year).bind(&f.month).bind(&f.weeks).bind(&types)
    .fetch_all(&state.pool).await.map_err(internal_error)?;

    let cells = rows
        .into_iter()
        .map(|r| Cell { group: r.wh_type, period: r.week_label, value: decimal_number(r.total_volume) })
        .collect();
    Ok(Json(dense_grid(&types, &f.weeks, cells)))
}

#[derive(FromRow)]
struct MonthlyTruckRow {
    wh_type: String,
    month: String,
    truck_count: i64,
}

/// Unique-truck counts per (type × month), weeks summed. Month columns
/// follow the request list or the calendar-order enumeration.
pub async fn trucks_monthly(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<GridRow>>, ApiError> {
    let f = ReportFilter::resolve(&pairs, Utc::now().date_naive()).map_err(bad_request)?;
    let types = f.warehouses_or(&WH_TYPES);

    let rows = query_as::<_, MonthlyTruckRow>(
        r#"
        SELECT wh_type, month, truck_count
        FROM public.inbound_aggregated
        WHERE year=$1 AND month = ANY($2) AND wh_type = ANY($3)
        "#
    )
    .bind(f.year).bind(&f.months).bind(&types)
    .fetch_all(&state.pool).await.map_err(internal_error)?;

    let samples = rows
        .into_iter()
        .map(|r| Cell { group: r.wh_type, period: r.month, value: r.truck_count as f64 })
        .collect();
    Ok(Json(dense_grid(&types, &f.months, sum_cells(samples))))
}

#[derive(FromRow)]
struct MonthlyVolumeRow {
    wh_type: String,
    month: String,
    total_volume: Decimal,
}

/// Total inbound volume per (type × month), weeks summed.
pub async fn volume_monthly(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<GridRow>>, ApiError> {
    let f = ReportFilter::resolve(&pairs, Utc::now().date_naive()).map_err(bad_request)?;
    let types = f.warehouses_or(&WH_TYPES);

    let rows = query_as::<_, MonthlyVolumeRow>(
        r#"
        SELECT wh_type, month, total_volume
        FROM public.inbound_aggregated
        WHERE year=$1 AND month = ANY($2) AND wh_type = ANY($3)
        "#
    )
    .bind(f.year).bind(&f.months).bind(&types)
    .fetch_all(&state.pool).await.map_err(internal_error)?;

    let samples = rows
        .into_iter()
        .map(|r| Cell { group: r.wh_type, period: r.month, value: decimal_number(r.total_volume) })
        .collect();
    Ok(Json(dense_grid(&types, &f.months, sum_cells(samples))))
}

#[derive(FromRow)]
struct TruckLineRow {
    truck_no: String,
    wh_name: String,
}

/// Deduplicated truck count from raw inbound lines for one (year, month,
/// week). Keys with more than one line are excluded entirely.
pub async fn truck_count(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<TruckCount>>, ApiError> {
    let f = ReportFilter::resolve(&pairs, Utc::now().date_naive()).map_err(bad_request)?;
    let warehouses = match &f.warehouses {
        Some(w) => w.clone(),
        None => warehouse_names(&state.pool).await.map_err(internal_error)?,
    };

    let rows = query_as::<_, TruckLineRow>(
        r#"
        SELECT truck_no, wh_name
        FROM public.inbound
        WHERE year=$1 AND month=$2 AND week_label=$3 AND wh_name = ANY($4)
        "#
    )
    .bind(f.year).bind(&f.month).bind(&f.week).bind(&warehouses)
    .fetch_all(&state.pool).await.map_err(internal_error)?;

    let lines = rows
        .into_iter()
        .map(|r| TruckLine { truck_no: r.truck_no, warehouse: r.wh_name })
        .collect();
    Ok(Json(hit_counts(&warehouses, lines)))
}

#[derive(FromRow)]
struct LeadRow {
    wh_name: String,
    week_label: String,
    gate_in: DateTime<Utc>,
    putaway_finish: DateTime<Utc>,
}

/// Average gate-in to putaway-finish hours per (warehouse × week). Rows
/// missing either timestamp are skipped by the query.
pub async fn lead_time(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<GridRow>>, ApiError> {
    let f = ReportFilter::resolve(&pairs, Utc::now().date_naive()).map_err(bad_request)?;
    let warehouses = match &f.warehouses {
        Some(w) => w.clone(),
        None => warehouse_names(&state.pool).await.map_err(internal_error)?,
    };

    let rows = query_as::<_, LeadRow>(
        r#"
        SELECT wh_name, week_label, gate_in, putaway_finish
        FROM public.inbound
        WHERE year=$1 AND month=$2 AND week_label = ANY($3) AND wh_name = ANY($4)
          AND gate_in IS NOT NULL AND putaway_finish IS NOT NULL
        "#
    )
    .bind(f.year).bind(&f.month).bind(&f.weeks).bind(&warehouses)
    .fetch_all(&state.pool).await.map_err(internal_error)?;

    let samples = rows
        .into_iter()
        .map(|r| Cell {
            group: r.wh_name,
            period: r.week_label,
            value: (r.putaway_finish - r.gate_in).num_seconds() as f64 / 3600.0,
        })
        .collect();
    Ok(Json(dense_grid(&warehouses, &f.weeks, mean_cells(samples))))
}
