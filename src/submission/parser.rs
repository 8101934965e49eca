use axum::http::HeaderMap;
use bytes::Bytes;
use serde_json::{Map, Value};

use super::record::ReportForm;

/// The name of the multipart file field carrying the photo.
pub const PHOTO_FIELD: &str = "photo";

/// A parsed request body: the textual fields plus the optional photo bytes.
/// Only multipart bodies can carry a photo.
pub struct RawSubmission {
    pub form: ReportForm,
    pub image: Option<Bytes>,
}

/// Parse a request body based on its Content-Type header.
pub async fn parse(headers: &HeaderMap, body: Bytes) -> Result<RawSubmission, String> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json");

    if content_type.contains("multipart/form-data") {
        parse_multipart(headers, body).await
    } else if content_type.contains("application/x-www-form-urlencoded") {
        let fields = parse_form_urlencoded(&body)?;
        Ok(RawSubmission {
            form: form_from_value(fields)?,
            image: None,
        })
    } else {
        let fields: Value =
            serde_json::from_slice(&body).map_err(|e| format!("Invalid JSON: {e}"))?;
        Ok(RawSubmission {
            form: form_from_value(fields)?,
            image: None,
        })
    }
}

fn form_from_value(value: Value) -> Result<ReportForm, String> {
    serde_json::from_value(value).map_err(|e| format!("Unable to read form fields: {e}"))
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        map.insert(k.into_owned(), Value::String(v.into_owned()));
    }
    Ok(Value::Object(map))
}

/// Parse multipart form data using multer, splitting the photo field off
/// from the textual fields.
pub async fn parse_multipart(headers: &HeaderMap, body: Bytes) -> Result<RawSubmission, String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut map = Map::new();
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let name = field.name().unwrap_or("unknown").to_string();
        if name == PHOTO_FIELD || field.file_name().is_some() {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| format!("File read error: {e}"))?;
            // An empty file part means no photo was attached.
            if !bytes.is_empty() {
                image = Some(bytes);
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| format!("Field read error: {e}"))?;
            map.insert(name, Value::String(value));
        }
    }

    Ok(RawSubmission {
        form: form_from_value(Value::Object(map))?,
        image,
    })
}
