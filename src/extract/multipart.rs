//! File mode: multipart uploads with an args part.

use axum::body::Bytes;
use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Request};

use crate::config::ExtractConfig;
use crate::extract::args::{decode_args_text, Args};
use crate::extract::error::ExtractError;

/// A file part read from a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Name of the form field the file was sent under.
    pub field: String,
    /// Client-supplied filename, if any.
    pub filename: Option<String>,
    /// Declared content type of the part.
    pub content_type: Option<String>,
    /// Full contents of the part.
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Filename, falling back to the field name for parts sent without one.
    pub fn name(&self) -> &str {
        self.filename.as_deref().unwrap_or(&self.field)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Contents as UTF-8 text.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.bytes)
    }

    async fn read(field: Field<'_>) -> Result<Self, ExtractError> {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        Ok(Self {
            field: name,
            filename,
            content_type,
            bytes,
        })
    }
}

/// Extractor yielding the uploaded file and decoded args.
#[derive(Debug, Clone, PartialEq)]
pub struct FileArgs(pub UploadedFile, pub Args);

impl<S> FromRequest<S> for FileArgs
where
    S: Send + Sync,
{
    type Rejection = ExtractError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let config = ExtractConfig::from_extensions(req.extensions());
        let (file, args) = extract_file_args(req, &config).await?;
        Ok(FileArgs(file, args))
    }
}

/// Read a multipart request into `(file, args)`.
///
/// The file is the first part named `file_field`; without one, the first
/// other part carrying a filename is used. The args part may be a text field
/// or a file part. Repeated parts after the first are drained and ignored.
pub async fn extract_file_args(req: Request, config: &ExtractConfig) -> Result<(UploadedFile, Args), ExtractError> {
    let mut multipart = Multipart::from_request(req, &()).await?;

    let mut named = None;
    let mut fallback = None;
    let mut raw_args = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default();
        if name == config.args_field {
            if raw_args.is_none() {
                raw_args = Some(field.text().await?);
            }
        } else if name == config.file_field {
            if named.is_none() {
                named = Some(UploadedFile::read(field).await?);
            }
        } else if fallback.is_none() && field.file_name().is_some() {
            fallback = Some(UploadedFile::read(field).await?);
        }
    }

    let file = named
        .or(fallback)
        .ok_or_else(|| ExtractError::MissingFile(config.file_field.clone()))?;
    let args = match raw_args {
        Some(text) => decode_args_text(&text)?,
        None => Args::new(),
    };

    tracing::debug!(
        field = %file.field,
        filename = file.name(),
        size = file.len(),
        args = args.len(),
        "Extracted uploaded file"
    );

    Ok((file, args))
}
