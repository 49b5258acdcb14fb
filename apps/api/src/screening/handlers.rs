use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, info_span};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::prediction::ClassifyResponse;
use crate::models::upload::{DeclaredType, UploadedFile};
use crate::screening::categories::{all_categories, CategoryEntry};
use crate::screening::pipeline::screen;
use crate::state::AppState;

/// Multipart field carrying the résumé.
pub const UPLOAD_FIELD: &str = "resume";

/// POST /api/v1/classify
pub async fn handle_classify(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ClassifyResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let upload = read_upload(multipart).await?;

    let span = info_span!(
        "classify",
        %request_id,
        filename = %upload.filename,
        mime = upload.declared.as_mime()
    );

    // Runs inline: the runtime is single-threaded, so one upload finishes
    // before the next is read.
    let prediction = span.in_scope(|| {
        let prediction = screen(&state.models, &upload)?;
        info!(
            category_id = prediction.category_id,
            category = prediction.category,
            "Resume classified"
        );
        Ok::<_, AppError>(prediction)
    })?;

    Ok(Json(ClassifyResponse::new(
        request_id,
        upload.filename,
        prediction,
    )))
}

/// GET /api/v1/categories
pub async fn handle_list_categories() -> Json<Vec<CategoryEntry>> {
    Json(all_categories())
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("resume").to_string();
        let declared = DeclaredType::from_part(field.content_type(), &filename);
        let bytes = field.bytes().await?;
        return Ok(UploadedFile::new(filename, declared, bytes));
    }

    Err(AppError::Validation(format!(
        "No resume file provided (expected multipart field '{UPLOAD_FIELD}')"
    )))
}
