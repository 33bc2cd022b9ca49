use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{ErrorReport, PipelineError, PipelineErrorKind};
use crate::domain::{NormalizationOptions, PipelineResult, SourceKind, SpeedFactor, UnsupportedKind};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub kind: &'static str,
    pub message: String,
}

impl From<ErrorReport> for ErrorDetail {
    fn from(report: ErrorReport) -> Self {
        Self {
            kind: report.kind.as_str(),
            message: report.message,
        }
    }
}

/// A failed digest request, rendered as `{"error": {"kind", "message"}}`.
#[derive(Debug)]
pub enum DigestError {
    BadRequest(String),
    Pipeline(PipelineError),
}

impl From<PipelineError> for DigestError {
    fn from(error: PipelineError) -> Self {
        Self::Pipeline(error)
    }
}

impl IntoResponse for DigestError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            DigestError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    kind: "bad_request",
                    message,
                },
            ),
            DigestError::Pipeline(error) => {
                let status = match error.kind() {
                    PipelineErrorKind::Ingest | PipelineErrorKind::UnsupportedKind => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    PipelineErrorKind::Transcription | PipelineErrorKind::Generation => {
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, error.report().into())
            }
        };

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

#[derive(Default)]
struct DigestForm {
    data: Option<Vec<u8>>,
    content_type: Option<String>,
    filename: Option<String>,
    kind: Option<String>,
    recover_image_text: Option<bool>,
    speed_factor: Option<SpeedFactor>,
}

impl DigestForm {
    async fn read(mut multipart: Multipart) -> Result<Self, DigestError> {
        let mut form = DigestForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| DigestError::BadRequest(format!("Failed to read multipart: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    form.filename = field.file_name().map(str::to_string);
                    form.content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(|e| {
                        DigestError::BadRequest(format!("Failed to read file: {e}"))
                    })?;
                    form.data = Some(bytes.to_vec());
                }
                "kind" => form.kind = Some(read_text(field).await?),
                "recover_image_text" => {
                    let value = read_text(field).await?;
                    form.recover_image_text = Some(parse_flag(&value).ok_or_else(|| {
                        DigestError::BadRequest(format!(
                            "recover_image_text must be true or false, got {value:?}"
                        ))
                    })?);
                }
                "speed_factor" => {
                    let value = read_text(field).await?;
                    let factor = value
                        .trim()
                        .parse::<f32>()
                        .map_err(|e| DigestError::BadRequest(format!("speed_factor: {e}")))
                        .and_then(|v| {
                            SpeedFactor::new(v).map_err(|e| DigestError::BadRequest(e.to_string()))
                        })?;
                    form.speed_factor = Some(factor);
                }
                other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
            }
        }

        Ok(form)
    }

    /// Declared kind first, then the upload's MIME type, then its extension.
    fn source_kind(&self) -> Result<SourceKind, PipelineError> {
        if let Some(declared) = &self.kind {
            return Ok(declared.parse()?);
        }

        self.content_type
            .as_deref()
            .and_then(SourceKind::from_mime)
            .or_else(|| self.filename.as_deref().and_then(SourceKind::from_filename))
            .ok_or_else(|| {
                UnsupportedKind(
                    self.content_type
                        .clone()
                        .unwrap_or_else(|| "unknown".to_string()),
                )
                .into()
            })
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, DigestError> {
    field
        .text()
        .await
        .map_err(|e| DigestError::BadRequest(format!("Failed to read form field: {e}")))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn digest_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PipelineResult>, DigestError> {
    let mut form = DigestForm::read(multipart).await?;

    let Some(data) = form.data.take() else {
        tracing::warn!("Digest request with no file");
        return Err(DigestError::BadRequest("No file uploaded".to_string()));
    };

    let kind = form.source_kind()?;

    let mut options = NormalizationOptions::for_kind(kind)
        .with_image_text_recovery(form.recover_image_text.unwrap_or(false));
    if kind == SourceKind::Media {
        let configured = SpeedFactor::new(state.settings.media.speed_factor).unwrap_or_default();
        options = options.with_speed_factor(form.speed_factor.unwrap_or(configured));
    }

    tracing::info!(
        kind = %kind,
        bytes = data.len(),
        filename = form.filename.as_deref().unwrap_or("unknown"),
        "Digest requested"
    );

    let result = state
        .pipeline_service
        .run_pipeline(data, kind.as_str(), Some(options))
        .await?;

    Ok(Json(result))
}
