// src/routes/outbound.rs

use axum::{extract::{Query, State}, Json};
use chrono::Utc;
use sqlx::query_as;

use crate::models::{OutboundRecord, OutboundView};
use crate::report::filters::{self, ReportFilter};
use crate::AppState;
use super::{bad_request, internal_error, ApiError};

const COLUMNS: &str = "outbound_id, wh_name, wh_type, doc_type, doc_no, truck_no, \
customer, consignee, item_code, item_name, qty, weight_kg, volume_m3, \
year, month, week_no, week_label, picking_start, picking_finish, \
loading_start, loading_finish, operator";

pub async fn list_outbound(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<OutboundView>>, ApiError> {
    let f = ReportFilter::resolve(&pairs, Utc::now().date_naive()).map_err(bad_request)?;
    let (limit, offset) = filters::page(&pairs);

    let rows = if let Some(whs) = &f.warehouses {
        query_as::<_, OutboundRecord>(&format!(
            r#"
            SELECT {COLUMNS} FROM public.outbound
            WHERE year=$1 AND month=$2 AND week_label = ANY($3) AND wh_name = ANY($4)
            ORDER BY loading_finish DESC NULLS LAST, outbound_id DESC
            LIMIT $5 OFFSET $6
            "#
        ))
        .bind(f.year).bind(&f.month).bind(&f.weeks).bind(whs).bind(limit).bind(offset)
        .fetch_all(&state.pool).await.map_err(internal_error)?
    } else {
        query_as::<_, OutboundRecord>(&format!(
            r#"
            SELECT {COLUMNS} FROM public.outbound
            WHERE year=$1 AND month=$2 AND week_label = ANY($3)
            ORDER BY loading_finish DESC NULLS LAST, outbound_id DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(f.year).bind(&f.month).bind(&f.weeks).bind(limit).bind(offset)
        .fetch_all(&state.pool).await.map_err(internal_error)?
    };
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
