use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::enums::LookupTable;
use crate::models::LookupEntry;

#[derive(Debug, Serialize)]
pub struct LookupListResponse {
    pub table: &'static str,
    pub entries: Vec<LookupEntry>,
}

/// `GET /api/lookups/:table`: reference values accepted by the mapper,
/// e.g. `/api/lookups/countries`.
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(table): Path<String>,
) -> Result<Json<LookupListResponse>, ApiError> {
    let lookup: LookupTable = table
        .parse()
        .map_err(|_| ApiError::NotFound(format!("No lookup table named '{table}'")))?;

    let entries = ctx
        .with_db(move |conn| Ok(db::list_lookup(conn, lookup)?))
        .await?;

    Ok(Json(LookupListResponse {
        table: lookup.as_str(),
        entries,
    }))
}
