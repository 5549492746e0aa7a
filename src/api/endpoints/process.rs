//! Webhook endpoint for completed intake forms.
//!
//! The form service posts either `multipart/form-data` or
//! `application/x-www-form-urlencoded` bodies with `formID`,
//! `submissionID`, `formTitle` and the answers JSON in `rawRequest`.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header;
use axum::{Form, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::intake::{self, FormSubmission};

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub status: &'static str,
    pub patient_id: i64,
    pub intake_id: i64,
    pub replayed: bool,
}

/// `POST /process`: map one submission onto the schema.
pub async fn submit(
    State(ctx): State<ApiContext>,
    request: Request,
) -> Result<Json<ProcessResponse>, ApiError> {
    let submission = read_submission(request).await?;
    tracing::debug!(
        form_id = submission.form_id.as_deref().unwrap_or("-"),
        submission_id = submission.submission_key().unwrap_or("-"),
        "Webhook received"
    );

    let processed = ctx
        .with_db(move |conn| Ok(intake::process_submission(conn, &submission)?))
        .await?;

    Ok(Json(ProcessResponse {
        status: "ok",
        patient_id: processed.patient_id,
        intake_id: processed.intake_id,
        replayed: processed.replayed,
    }))
}

/// Decode the form body, dispatching on its content type.
async fn read_submission(request: Request) -> Result<FormSubmission, ApiError> {
    if !is_multipart(&request) {
        let Form(submission) = Form::<FormSubmission>::from_request(request, &())
            .await
            .map_err(|e| ApiError::BadPayload(e.body_text()))?;
        return Ok(submission);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ApiError::BadPayload(e.body_text()))?;

    let mut submission = FormSubmission::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadPayload(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadPayload(e.body_text()))?;
        submission.set_field(&name, value);
    }
    Ok(submission)
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}
