//! Raw form input and its validation into store drafts.
//!
//! Validation runs before any store is touched, so a rejected form never
//! leaves a partial write behind.

use chrono::{DateTime, Utc};
use common::record::format_date;
use common::{
    AnnouncementBody, AnnouncementDraft, AnnouncementKind, Attachment, CourseDraft, CourseKind,
    PublicationDraft,
};
use url::Url;

use crate::error::ValidationError;

/// Trim a text field and reject it if nothing is left.
fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed.to_string())
}

/// An uploaded payload must be present and non-empty.
fn required_payload(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(data) if !data.trim().is_empty() => Ok(data),
        _ => Err(ValidationError::Missing(field)),
    }
}

#[derive(Debug, Clone, Default)]
pub struct PublicationForm {
    pub title: String,
    pub description: String,
    pub area: String,
    pub file: Option<Attachment>,
}

impl PublicationForm {
    pub fn into_draft(self, now: DateTime<Utc>) -> Result<PublicationDraft, ValidationError> {
        let title = required("titulo", &self.title)?;
        let description = required("descripcion", &self.description)?;
        let area = required("area", &self.area)?;
        let attachment = match self.file {
            Some(file) if !file.data.is_empty() => file,
            _ => return Err(ValidationError::Missing("archivo")),
        };

        Ok(PublicationDraft {
            title,
            description,
            area,
            attachment,
            date: format_date(now),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub title: String,
    pub description: String,
    /// `curso` or `seminario`.
    pub kind: String,
    pub image: Option<String>,
}

impl CourseForm {
    pub fn into_draft(self, now: DateTime<Utc>) -> Result<CourseDraft, ValidationError> {
        let title = required("titulo", &self.title)?;
        let description = required("descripcion", &self.description)?;
        let raw_kind = required("tipo", &self.kind)?;
        let kind: CourseKind = raw_kind
            .parse()
            .map_err(|_| ValidationError::Unsupported {
                field: "tipo",
                value: raw_kind.clone(),
            })?;
        let image = required_payload("imagen", self.image)?;

        Ok(CourseDraft {
            title,
            description,
            kind,
            image,
            date: format_date(now),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnouncementForm {
    pub title: String,
    pub description: String,
    /// `imagen` or `url`.
    pub kind: String,
    pub image: Option<String>,
    pub url: String,
}

impl AnnouncementForm {
    pub fn into_draft(self, now: DateTime<Utc>) -> Result<AnnouncementDraft, ValidationError> {
        let title = required("titulo", &self.title)?;
        let description = required("descripcion", &self.description)?;
        let raw_kind = required("tipo", &self.kind)?;
        let kind: AnnouncementKind = raw_kind
            .parse()
            .map_err(|_| ValidationError::Unsupported {
                field: "tipo",
                value: raw_kind.clone(),
            })?;

        let body = match kind {
            AnnouncementKind::Image => {
                AnnouncementBody::Image(required_payload("imagen", self.image)?)
            }
            AnnouncementKind::Url => {
                let url = required("url", &self.url)?;
                Url::parse(&url).map_err(|e| ValidationError::Invalid {
                    field: "url",
                    reason: e.to_string(),
                })?;
                AnnouncementBody::Url(url)
            }
        };

        Ok(AnnouncementDraft {
            title,
            description,
            body,
            date: format_date(now),
        })
    }
}
