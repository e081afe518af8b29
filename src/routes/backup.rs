// src/routes/backup.rs

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use tokio::process::Command;

use crate::AppState;
use super::{internal_error, ApiError};

/// Hard cap on the in-memory dump buffer.
const MAX_DUMP_BYTES: usize = 64 * 1024 * 1024;

fn dump_filename(now: DateTime<Utc>) -> String {
    format!("backup_{}.sql", now.format("%Y%m%d_%H%M%S"))
}

/// Full logical dump of the store, returned as an application/sql
/// attachment. Operator-triggered; failures surface as a generic 500 with
/// the cause in the server log, no retries.
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let url = &state.database_url;
    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
        return Err(internal_error("backup: DATABASE_URL is not a postgres connection string"));
    }

    let out = Command::new("pg_dump")
        .arg("--no-owner")
        .arg("--dbname")
        .arg(url)
        .output()
        .await
        .map_err(internal_error)?;

    if !out.status.success() {
        return Err(internal_error(format!(
            "pg_dump exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    if out.stdout.len() > MAX_DUMP_BYTES {
        return Err(internal_error(format!(
            "dump of {} bytes exceeds the {MAX_DUMP_BYTES} byte ceiling",
            out.stdout.len()
        )));
    }

    let headers = [
        (header::CONTENT_TYPE, "application/sql".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", dump_filename(Utc::now())),
        ),
    ];
    Ok((headers, out.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_carries_a_sortable_timestamp() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 6, 14, 30, 5).unwrap();
        assert_eq!(dump_filename(ts), "backup_20260806_143005.sql");
    }
}
