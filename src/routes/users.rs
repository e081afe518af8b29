// src/routes/users.rs

use axum::{extract::{Path, Query, State}, Json};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use sqlx::{query, query_as};

use crate::models::AppUser;
use crate::AppState;
use super::{bad_request, internal_error, not_found, ApiError, Deleted};

// The hash column stays out of every select list; responses carry no
// secrets by construction.
const USER_COLUMNS: &str = "user_id, username, full_name, role, is_active, created_at, updated_at";

#[derive(Deserialize)]
pub struct ListUsersQ {
    pub role: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateUserBody {
    pub username: String,
    pub full_name: String,
    #[serde(default = "default_role")] pub role: String,
    pub password: String,
}
fn default_role() -> String { "staff".into() }

#[derive(Deserialize)]
pub struct PatchUserBody {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

fn hash_password(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(b): Json<CreateUserBody>,
) -> Result<Json<AppUser>, ApiError> {
    if b.username.trim().is_empty() {
        return Err(bad_request("username is required"));
    }
    if b.password.is_empty() {
        return Err(bad_request("password is required"));
    }
    let row = query_as::<_, AppUser>(&format!(
        r#"
        INSERT INTO public.users(username, full_name, role, password_hash)
        VALUES ($1,$2,$3,$4)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(b.username.trim()).bind(&b.full_name).bind(&b.role).bind(hash_password(&b.password))
    .fetch_one(&state.pool).await.map_err(internal_error)?;
    Ok(Json(row))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(q): Query<ListUsersQ>,
) -> Result<Json<Vec<AppUser>>, ApiError> {
    let limit = q.limit.unwrap_or(50).clamp(1, 500);
    let offset = q.offset.unwrap_or(0).max(0);

    let rows = if let Some(role) = q.role {
        query_as::<_, AppUser>(&format!(
            r#"SELECT {USER_COLUMNS} FROM public.users WHERE role=$1 ORDER BY user_id DESC LIMIT $2 OFFSET $3"#
        ))
        .bind(role).bind(limit).bind(offset)
        .fetch_all(&state.pool).await.map_err(internal_error)?
    } else {
        query_as::<_, AppUser>(&format!(
            r#"SELECT {USER_COLUMNS} FROM public.users ORDER BY user_id DESC LIMIT $1 OFFSET $2"#
        ))
        .bind(limit).bind(offset)
        .fetch_all(&state.pool).await.map_err(internal_error)?
    };
    Ok(Json(rows))
}

pub async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(b): Json<PatchUserBody>,
) -> Result<Json<AppUser>, ApiError> {
    let password_hash = b.password.as_deref().map(hash_password);
    let row = query_as::<_, AppUser>(&format!(
        r#"
        UPDATE public.users SET
          full_name = COALESCE($2, full_name),
          role = COALESCE($3, role),
          password_hash = COALESCE($4, password_hash),
          is_active = COALESCE($5, is_active),
          updated_at = now()
        WHERE user_id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id).bind(b.full_name).bind(b.role).bind(password_hash).bind(b.is_active)
    .fetch_optional(&state.pool).await.map_err(internal_error)?
    .ok_or_else(|| not_found("user", id))?;
    Ok(Json(row))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    let res = query(r#"DELETE FROM public.users WHERE user_id=$1"#)
        .bind(id).execute(&state.pool).await.map_err(internal_error)?;
    if res.rows_affected() == 0 {
        return Err(not_found("user", id));
    }
    Ok(Json(Deleted { deleted: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_sha256_hex() {
        assert_eq!(
            hash_password("secret"),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }

    #[test]
    fn hashes_differ_per_password() {
        assert_ne!(hash_password("a"), hash_password("b"));
    }
}
