// src/routes/warehouses.rs

use axum::{extract::State, Json};
use sqlx::{query_as, FromRow, Pool, Postgres};

use crate::models::{Warehouse, WarehouseView};
use crate::report::filters::wh_type_index;
use crate::AppState;
use super::{internal_error, ApiError};

pub async fn list_warehouses(
    State(state): State<AppState>,
) -> Result<Json<Vec<WarehouseView>>, ApiError> {
    let mut rows = query_as::<_, Warehouse>(
        r#"
        SELECT warehouse_id, name, wh_type, total_sqm, max_cap_sqm, max_cap_vol
        FROM public.warehouses
        "#
    )
    .fetch_all(&state.pool).await.map_err(internal_error)?;

    rows.sort_by_key(|w| (wh_type_index(&w.wh_type).unwrap_or(usize::MAX), w.name.clone()));
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[derive(FromRow)]
struct NameRow {
    name: String,
    wh_type: String,
}

/// All warehouse names in presentation order (type index, then name).
/// Report routes use this as the default warehouse set.
pub async fn warehouse_names(pool: &Pool<Postgres>) -> Result<Vec<String>, sqlx::Error> {
    let mut rows = query_as::<_, NameRow>(r#"SELECT name, wh_type FROM public.warehouses"#)
        .fetch_all(pool)
        .await?;
    rows.sort_by_key(|r| (wh_type_index(&r.wh_type).unwrap_or(usize::MAX), r.name.clone()));
    Ok(rows.into_iter().map(|r| r.name).collect())
}
