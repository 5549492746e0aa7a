//! Read-back of stored records.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::{Intake, Patient};

/// `GET /api/patients/:id`
pub async fn patient(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, ApiError> {
    let patient = ctx
        .with_db(move |conn| {
            db::get_patient(conn, id)?
                .ok_or_else(|| ApiError::NotFound(format!("Patient {id} not found")))
        })
        .await?;
    Ok(Json(patient))
}

/// `GET /api/intakes/:id`
pub async fn intake(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Intake>, ApiError> {
    let intake = ctx
        .with_db(move |conn| {
            db::get_intake(conn, id)?
                .ok_or_else(|| ApiError::NotFound(format!("Intake {id} not found")))
        })
        .await?;
    Ok(Json(intake))
}
