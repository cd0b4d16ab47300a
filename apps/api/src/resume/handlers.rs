//! Axum route handlers for the Resume API.
//!
//! The client owns the working `ResumeRecord` and sends it with every
//! request; nothing here is persisted.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::extract_pdf_text;
use crate::render::render_resume;
use crate::resume::auditor::audit_resume;
use crate::resume::cover_letter::compose_cover_letter;
use crate::resume::models::{AuditResult, ResumeRecord, Tone};
use crate::resume::parser::parse_resume;
use crate::resume::rewriter::{rewrite_entries, RewriteContext};
use crate::state::AppState;

const PDF_FILENAME: &str = "Resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub raw_text: String,
}

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub resume: ResumeRecord,
    pub target_role: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub tone: Option<Tone>,
}

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    pub resume: ResumeRecord,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub resume: ResumeRecord,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub resume: ResumeRecord,
}

/// Fields of a resume upload form.
struct Upload {
    file: Bytes,
    job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/parse
///
/// Multipart upload (`file`): extracts the PDF text and parses it into a
/// ResumeRecord. A blank record means the parse failed upstream.
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeRecord>, AppError> {
    let upload = read_upload(multipart).await?;
    let raw_text = extract_pdf_text(upload.file).await?;

    Ok(Json(parse_and_flag(&raw_text, &state).await))
}

/// POST /api/v1/resumes/parse-text
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }

    Ok(Json(parse_and_flag(&request.raw_text, &state).await))
}

/// POST /api/v1/resumes/rewrite
///
/// One rewrite pass over every experience entry. The rest of the record is
/// returned unchanged.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation("target_role cannot be empty".to_string()));
    }

    let mut resume = request.resume;
    let ctx = RewriteContext {
        target_role: request.target_role.trim(),
        job_description: request.job_description.as_deref().unwrap_or_default(),
        tone: request.tone.unwrap_or_default(),
    };

    let entries = std::mem::take(&mut resume.experience);
    resume.experience = rewrite_entries(entries, &ctx, state.llm.as_ref()).await;

    Ok(Json(resume))
}

/// POST /api/v1/resumes/audit
pub async fn handle_audit(
    State(state): State<AppState>,
    Json(request): Json<AuditRequest>,
) -> Result<Json<AuditResult>, AppError> {
    let jd = request.job_description.as_deref().unwrap_or_default();
    Ok(Json(audit_resume(&request.resume, jd, state.llm.as_ref()).await))
}

/// POST /api/v1/resumes/audit-pdf
///
/// Standalone scanner: multipart `file` plus an optional `job_description`
/// text field. Parses the upload, then audits the parsed record.
pub async fn handle_audit_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AuditResult>, AppError> {
    let upload = read_upload(multipart).await?;
    let raw_text = extract_pdf_text(upload.file).await?;

    let resume = parse_and_flag(&raw_text, &state).await;
    let result = audit_resume(&resume, &upload.job_description, state.llm.as_ref()).await;

    Ok(Json(result))
}

/// POST /api/v1/resumes/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let jd = request.job_description.as_deref().unwrap_or_default();
    let cover_letter = compose_cover_letter(&request.resume, jd, state.llm.as_ref()).await;

    Ok(Json(CoverLetterResponse { cover_letter }))
}

/// POST /api/v1/resumes/render
///
/// Returns the rendered PDF as a `Resume.pdf` attachment.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let layout = state.page_layout.clone();
    let resume = request.resume;

    let pdf = tokio::task::spawn_blocking(move || render_resume(&resume, &layout))
        .await
        .map_err(|e| AppError::Render(format!("Renderer aborted: {e}")))??;

    info!("Rendered resume PDF ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILENAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

/// A blank record is still returned to the client, which shows it as a
/// failed parse.
async fn parse_and_flag(raw_text: &str, state: &AppState) -> ResumeRecord {
    let resume = parse_resume(raw_text, state.llm.as_ref()).await;
    if resume.is_blank() {
        warn!(
            "Resume parse produced a blank record ({} chars of input)",
            raw_text.chars().count()
        );
    }
    resume
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                file = Some(bytes);
            }
            Some("job_description") => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job_description: {e}"))
                })?;
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    Ok(Upload {
        file,
        job_description,
    })
}
