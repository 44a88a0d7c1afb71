use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::Record;

/// Store-local record identifier, assigned on insert.
///
/// Ids are unique only within a single store. Anything that mixes records from
/// several stores must key them by `(Origin, RecordId)`.
pub type RecordId = u64;

/// Which store a record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Publication,
    Announcement,
    Course,
}

impl Origin {
    /// All origins, in aggregation order.
    pub const ALL: &'static [Origin] = &[Self::Publication, Self::Announcement, Self::Course];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publication => "publication",
            Self::Announcement => "announcement",
            Self::Course => "course",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publication" => Ok(Self::Publication),
            "announcement" => Ok(Self::Announcement),
            "course" => Ok(Self::Course),
            other => Err(format!("unknown origin: {other}")),
        }
    }
}

/// Parse a stored `fecha` string. Accepts RFC 3339 with any offset.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a timestamp the way records store it (`2024-03-01T12:00:00.000Z`).
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// A file attached to a publication, kept inline as data-URL text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    /// Declared MIME type, e.g. `image/png`.
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
    pub data: String,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// A research publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: RecordId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    pub area: String,
    #[serde(rename = "archivo", default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(rename = "fecha")]
    pub date: String,
}

/// Validated input for a new publication.
#[derive(Debug, Clone)]
pub struct PublicationDraft {
    pub title: String,
    pub description: String,
    pub area: String,
    pub attachment: Attachment,
    pub date: String,
}

/// How an announcement carries its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnouncementKind {
    #[serde(rename = "imagen")]
    Image,
    #[serde(rename = "url")]
    Url,
}

impl FromStr for AnnouncementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "imagen" => Ok(Self::Image),
            "url" => Ok(Self::Url),
            other => Err(format!("unknown announcement type: {other}")),
        }
    }
}

/// A competition (ICPC) announcement. Exactly one of `image` / `url` is set,
/// matching `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: RecordId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: AnnouncementKind,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "fecha")]
    pub date: String,
}

/// Payload of a new announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnouncementBody {
    Image(String),
    Url(String),
}

/// Validated input for a new announcement.
#[derive(Debug, Clone)]
pub struct AnnouncementDraft {
    pub title: String,
    pub description: String,
    pub body: AnnouncementBody,
    pub date: String,
}

/// Course sub-type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseKind {
    Curso,
    Seminario,
}

impl CourseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Curso => "curso",
            Self::Seminario => "seminario",
        }
    }
}

impl FromStr for CourseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "curso" => Ok(Self::Curso),
            "seminario" => Ok(Self::Seminario),
            other => Err(format!("unknown course type: {other}")),
        }
    }
}

/// A course or seminar. Always has an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: RecordId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: CourseKind,
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(rename = "fecha")]
    pub date: String,
}

/// Validated input for a new course.
#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub kind: CourseKind,
    pub image: String,
    pub date: String,
}

impl Record for Publication {
    type Draft = PublicationDraft;
    const ORIGIN: Origin = Origin::Publication;

    fn id(&self) -> RecordId {
        self.id
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn from_draft(id: RecordId, draft: PublicationDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            area: draft.area,
            attachment: Some(draft.attachment),
            date: draft.date,
        }
    }
}

impl Record for Announcement {
    type Draft = AnnouncementDraft;
    const ORIGIN: Origin = Origin::Announcement;

    fn id(&self) -> RecordId {
        self.id
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn from_draft(id: RecordId, draft: AnnouncementDraft) -> Self {
        let (kind, image, url) = match draft.body {
            AnnouncementBody::Image(data) => (AnnouncementKind::Image, Some(data), None),
            AnnouncementBody::Url(url) => (AnnouncementKind::Url, None, Some(url)),
        };
        Self {
            id,
            title: draft.title,
            description: draft.description,
            kind,
            image,
            url,
            date: draft.date,
        }
    }
}

impl Record for Course {
    type Draft = CourseDraft;
    const ORIGIN: Origin = Origin::Course;

    fn id(&self) -> RecordId {
        self.id
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn from_draft(id: RecordId, draft: CourseDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            kind: draft.kind,
            image: draft.image,
            date: draft.date,
        }
    }
}
