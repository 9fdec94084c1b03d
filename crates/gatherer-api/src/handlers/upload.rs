//! Multipart upload handler.

use std::io;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use futures::TryStreamExt;

use gatherer_core::error::{AppError, ErrorKind};
use gatherer_core::traits::content::ByteStream;
use gatherer_service::UploadRequest;

use crate::dto::response::UploadResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Name of the multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Room for multipart boundaries and part headers on top of the file ceiling.
pub const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// POST /upload
///
/// Streams the `file` part straight into the coordinator; the body is never
/// buffered whole.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let coordinator = &state.coordinator;

    if let Some(length) = content_length(&headers) {
        let ceiling = coordinator.max_upload_size().saturating_add(MULTIPART_OVERHEAD);
        if length > ceiling {
            return Err(AppError::invalid_input(format!(
                "File too large: request body of {length} bytes exceeds the maximum of {} bytes",
                coordinator.max_upload_size()
            ))
            .into());
        }
    }

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::invalid_input("Error retrieving file: no file name"))?;
        let request = UploadRequest {
            filename,
            mime_type: field.content_type().map(str::to_string),
            declared_size: None,
        };

        let stream: ByteStream<'_> = Box::pin(
            field.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.body_text())),
        );

        let saved = coordinator
            .save(request, stream)
            .await
            .map_err(|e| match e.kind {
                // A freshly generated id colliding is a server fault, not a client one.
                ErrorKind::Conflict => {
                    AppError::internal(format!("Generated item id collided: {}", e.message))
                }
                _ => e,
            })?;

        return Ok((StatusCode::CREATED, Json(UploadResponse::from(saved))));
    }

    Err(AppError::invalid_input(format!("Error retrieving file: missing '{FILE_FIELD}' field")).into())
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::invalid_input(format!("Malformed multipart body: {}", err.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_content_length_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_length(&headers), None);

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("1024"));
        assert_eq!(content_length(&headers), Some(1024));

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("lots"));
        assert_eq!(content_length(&headers), None);
    }
}
