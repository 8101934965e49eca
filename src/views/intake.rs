use askama::Template;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::email::{self, DispatchOutcome};
use crate::report::renderer;
use crate::state::SharedState;
use crate::submission::parser;
use crate::submission::record::{DEPARTMENTS, RANKS, VESSELS};

#[derive(Template)]
#[template(path = "intake/form.html")]
struct FormTemplate {
    vessels: &'static [&'static str],
    departments: &'static [&'static str],
    ranks: &'static [&'static str],
    errors: Vec<String>,
}

impl FormTemplate {
    fn with_errors(errors: Vec<String>) -> Self {
        Self {
            vessels: VESSELS,
            departments: DEPARTMENTS,
            ranks: RANKS,
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "intake/result.html")]
struct ResultTemplate {
    outcome: &'static str,
    detail: Option<String>,
    recipient: Option<String>,
    filename: String,
    pdf_base64: String,
}

pub async fn form_page() -> impl IntoResponse {
    let page = FormTemplate::with_errors(Vec::new());
    Html(page.render().unwrap_or_default())
}

/// Full submission flow behind the HTML form: parse, validate, render,
/// attempt dispatch, and show the outcome with an inline download link. The
/// PDF travels in the page itself, so nothing is ever stored server-side.
pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let raw = match parser::parse(&headers, body).await {
        Ok(raw) => raw,
        Err(e) => return form_error_page(StatusCode::BAD_REQUEST, vec![e]),
    };

    let record = match raw.form.validate() {
        Ok(record) => record,
        Err(errors) => return form_error_page(StatusCode::BAD_REQUEST, errors),
    };

    let report = match renderer::render_now(&record, raw.image.as_deref(), &state.config.font_dir)
    {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Report rendering failed: {e}");
            return form_error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                vec![format!("보고서 생성에 실패했습니다: {e}")],
            );
        }
    };

    let outcome = email::dispatch(state.mailer.as_deref(), &record, &report.bytes).await;
    let recipient = state.mailer.as_ref().map(|m| m.recipient().to_string());

    let (outcome, detail) = match outcome {
        DispatchOutcome::Sent => ("sent", None),
        DispatchOutcome::Failed(diagnostic) => ("failed", Some(diagnostic)),
        DispatchOutcome::Skipped => ("skipped", None),
    };

    let page = ResultTemplate {
        outcome,
        detail,
        recipient,
        filename: report.filename.clone(),
        pdf_base64: BASE64.encode(&report.bytes),
    };
    Html(page.render().unwrap_or_default()).into_response()
}

fn form_error_page(status: StatusCode, errors: Vec<String>) -> Response {
    let page = FormTemplate::with_errors(errors);
    (status, Html(page.render().unwrap_or_default())).into_response()
}
