//! Upload boundary — validates a submission before it reaches extraction
//! and the analysis engine.

use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;
use crate::extraction::{extension_of, DocumentKind};

pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_MIN_DESCRIPTION_CHARS: usize = 50;
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".doc", ".txt"];

const MIB: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadPolicy {
    pub max_file_size_bytes: usize,
    pub min_description_chars: usize,
    /// Lowercase, dot-prefixed.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            min_description_chars: DEFAULT_MIN_DESCRIPTION_CHARS,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Raw form fields as received; either may be absent.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub resume: Option<UploadedFile>,
    pub job_description: Option<String>,
}

/// A submission that passed every boundary check.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub resume: UploadedFile,
    pub kind: DocumentKind,
    pub job_description: String,
}

impl UploadPolicy {
    /// Checks, in order: file present, description present, description
    /// length, file type, file size.
    pub fn validate(&self, submission: Submission) -> Result<ValidatedSubmission, AppError> {
        let resume = submission
            .resume
            .ok_or_else(|| reject("No resume file uploaded".to_string()))?;

        let job_description = submission
            .job_description
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| reject("Job description is required".to_string()))?;

        if job_description.trim().chars().count() < self.min_description_chars {
            return Err(reject(format!(
                "Job description must be at least {} characters",
                self.min_description_chars
            )));
        }

        if !self.is_allowed_type(&resume) {
            warn!(file_name = %resume.file_name, content_type = ?resume.content_type, "Rejected upload type");
            return Err(AppError::UnsupportedFormat(
                "Invalid file type. Only PDF, DOCX, DOC, and TXT files are allowed.".to_string(),
            ));
        }

        if resume.data.len() > self.max_file_size_bytes {
            warn!(size = resume.data.len(), limit = self.max_file_size_bytes, "Rejected oversized upload");
            return Err(AppError::PayloadTooLarge(format!(
                "File size must be less than {}",
                describe_size(self.max_file_size_bytes)
            )));
        }

        let kind = DocumentKind::resolve(&resume.file_name, resume.content_type.as_deref())?;

        Ok(ValidatedSubmission {
            resume,
            kind,
            job_description,
        })
    }

    fn is_allowed_type(&self, file: &UploadedFile) -> bool {
        let extension_allowed = extension_of(&file.file_name)
            .map(|ext| self.allowed_extensions.iter().any(|a| *a == ext))
            .unwrap_or(false);

        // a MIME type only admits the format whose extension is allowed
        let mime_allowed = file
            .content_type
            .as_deref()
            .and_then(DocumentKind::from_mime)
            .map(|kind| self.allowed_extensions.iter().any(|a| a == kind.extension()))
            .unwrap_or(false);

        extension_allowed || mime_allowed
    }
}

fn reject(message: String) -> AppError {
    warn!("Rejected submission: {message}");
    AppError::Validation(message)
}

fn describe_size(bytes: usize) -> String {
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}
