// src/routes/occupancy.rs

use axum::{extract::{Query, State}, Json};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{query_as, FromRow};

use crate::report::decimal_number;
use crate::report::filters::{ReportFilter, WH_TYPES};
use crate::report::grid::{dense_grid, pie_summary, Cell, GridRow, OccupancySummary, StatusRow};
use crate::AppState;
use super::{bad_request, internal_error, ApiError};

#[derive(FromRow)]
struct SpaceRow {
    wh_type: String,
    week_label: String,
    space: Decimal,
}

async fn space_grid(
    state: &AppState,
    pairs: &[(String, String)],
    table: &str,
    column: &str,
) -> Result<Vec<GridRow>, ApiError> {
    let f = ReportFilter::resolve(pairs, Utc::now().date_naive()).map_err(bad_request)?;
    let types = f.warehouses_or(&WH_TYPES);

    let rows = query_as::<_, SpaceRow>(&format!(
        r#"
        SELECT wh_type, week_label, {column} AS space
        FROM public.{table}
        WHERE year=$1 AND month=$2 AND week_label = ANY($3) AND wh_type = ANY($4)
        "#
    ))
    .bind(f.year).bind(&f.month).bind(&f.weeks).bind(&types)
    .fetch_all(&state.pool).await.map_err(internal_error)?;

    let cells = rows
        .into_iter()
        .map(|r| Cell { group: r.wh_type, period: r.week_label, value: decimal_number(r.space) })
        .collect();
    Ok(dense_grid(&types, &f.weeks, cells))
}

/// Measured area usage per (type × week).
pub async fn sqm_grid(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<GridRow>>, ApiError> {
    Ok(Json(space_grid(&state, &pairs, "occupancy_sqm", "space_sqm").await?))
}

/// Measured volume usage per (type × week).
pub async fn vol_grid(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<GridRow>>, ApiError> {
    Ok(Json(space_grid(&state, &pairs, "occupancy_vol", "space_vol").await?))
}

#[derive(FromRow)]
struct StatusSpaceRow {
    wh_type: String,
    status: String,
    space: Decimal,
}

/// Occupied/empty split per warehouse type for one (year, month, week).
pub async fn summary(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<OccupancySummary>, ApiError> {
    let f = ReportFilter::resolve(&pairs, Utc::now().date_naive()).map_err(bad_request)?;
    let types = f.warehouses_or(&WH_TYPES);

    let rows = query_as::<_, StatusSpaceRow>(
        r#"
        SELECT wh_type, status, space
        FROM public.occupancy
        WHERE year=$1 AND month=$2 AND week_label=$3 AND wh_type = ANY($4)
        "#
    )
    .bind(f.year).bind(&f.month).bind(&f.week).bind(&types)
    .fetch_all(&state.pool).await.map_err(internal_error)?;

    let status_rows = rows
        .into_iter()
        .map(|r| StatusRow { wh_type: r.wh_type, status: r.status, space: decimal_number(r.space) })
        .collect();
    Ok(Json(pie_summary(&types, status_rows)))
}
