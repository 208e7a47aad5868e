use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The only resume content types the service accepts.
pub const ACCEPTED_RESUME_TYPES: [&str; 2] = [PDF_MIME, DOCX_MIME];

/// Years-of-experience band picked on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experience {
    #[serde(rename = "0-1")]
    ZeroToOne,
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10+")]
    TenPlus,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown experience band '{0}'. Expected one of: 0-1, 1-3, 3-5, 5-10, 10+")]
pub struct UnknownExperience(pub String);

impl Experience {
    pub const ALL: [Experience; 5] = [
        Experience::ZeroToOne,
        Experience::OneToThree,
        Experience::ThreeToFive,
        Experience::FiveToTen,
        Experience::TenPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::ZeroToOne => "0-1",
            Experience::OneToThree => "1-3",
            Experience::ThreeToFive => "3-5",
            Experience::FiveToTen => "5-10",
            Experience::TenPlus => "10+",
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Experience {
    type Err = UnknownExperience;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Experience::ALL
            .into_iter()
            .find(|band| band.as_str() == s.trim())
            .ok_or_else(|| UnknownExperience(s.to_string()))
    }
}

/// A resume picked for upload, with the content type it was declared as.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a resume from disk. The declared content type is `content_type`
    /// when given, otherwise it is derived from the file extension.
    pub async fn from_path(path: &Path, content_type: Option<&str>) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        let content_type = content_type
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for(&file_name).to_string());

        Ok(Self::new(file_name, content_type, bytes))
    }

    pub fn is_accepted_type(&self) -> bool {
        ACCEPTED_RESUME_TYPES.contains(&self.content_type.as_str())
    }
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Content type a browser would declare for a file with this name.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match ext.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("docx") => DOCX_MIME,
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Everything the dashboard collects before an analysis is requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardInput {
    pub job_role: String,
    pub location: String,
    pub experience: Option<Experience>,
    pub resume: Option<ResumeFile>,
    pub job_description: String,
}
