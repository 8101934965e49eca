use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::email;
use crate::error::AppError;
use crate::report::renderer;
use crate::state::SharedState;
use crate::submission::parser;

/// One-shot intake: parse, validate, render, attempt dispatch, and hand the
/// PDF back. The dispatch outcome travels in a response header so the
/// artifact is the body in every case.
pub async fn create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let raw = parser::parse(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;

    let record = raw.form.validate().map_err(AppError::Validation)?;

    let report = renderer::render_now(&record, raw.image.as_deref(), &state.config.font_dir)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let outcome = email::dispatch(state.mailer.as_deref(), &record, &report.bytes).await;

    let response_headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            content_disposition(&report.filename),
        ),
        (
            HeaderName::from_static("x-report-dispatch"),
            outcome.as_str().to_string(),
        ),
    ];

    Ok((StatusCode::OK, response_headers, report.bytes).into_response())
}

/// RFC 5987 attachment disposition; the filename carries Korean vessel and
/// equipment names.
fn content_disposition(filename: &str) -> String {
    let encoded = utf8_percent_encode(filename, NON_ALPHANUMERIC);
    format!("attachment; filename=\"report.pdf\"; filename*=UTF-8''{encoded}")
}
