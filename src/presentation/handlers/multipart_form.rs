use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartRejection};

use super::error::ApiError;

/// A file part of a multipart form.
#[derive(Debug, Default)]
pub struct FilePart {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Multipart form with one file field and any number of text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<FilePart>,
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    /// Trimmed value of a text field, `None` when missing or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn flag(&self, name: &str) -> bool {
        self.text(name)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

pub async fn read_form(
    multipart: Result<Multipart, MultipartRejection>,
    file_field: &str,
) -> Result<UploadForm, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!(error = %e, "Rejected multipart payload");
        ApiError::bad_request("Invalid request", "multipart/form-data payload required")
    })?;

    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request("Invalid request", format!("Failed reading multipart field: {e}"))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            form.file = read_file(field).await?;
        } else {
            let value = field.text().await.map_err(|e| {
                ApiError::bad_request(
                    "Invalid request",
                    format!("Failed reading multipart '{name}' field: {e}"),
                )
            })?;
            form.fields.push((name, value));
        }
    }

    Ok(form)
}

async fn read_file(field: Field<'_>) -> Result<Option<FilePart>, ApiError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(|e| {
        ApiError::bad_request("Invalid request", format!("Failed reading file bytes: {e}"))
    })?;

    if filename.is_empty() && bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(FilePart {
        filename,
        content_type,
        bytes: bytes.to_vec(),
    }))
}
