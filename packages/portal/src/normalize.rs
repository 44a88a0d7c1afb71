//! Conversion of raw store records into the shapes the views consume.
//!
//! [`normalize`] produces carousel slides and decides carousel eligibility.
//! [`summarize`] produces the display-oriented [`FeedEntry`] used by the
//! recent list, for every record regardless of eligibility.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{Announcement, AnnouncementKind, Course, CourseKind, Origin, Publication, RecordId};
use url::Url;

/// Descriptions longer than this are cut in the recent list.
pub const SUMMARY_MAX_CHARS: usize = 100;

/// Read-only view of a record as it came out of its store.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceRecord {
    Publication(Publication),
    Announcement(Announcement),
    Course(Course),
}

impl SourceRecord {
    pub fn origin(&self) -> Origin {
        match self {
            Self::Publication(_) => Origin::Publication,
            Self::Announcement(_) => Origin::Announcement,
            Self::Course(_) => Origin::Course,
        }
    }

    pub fn id(&self) -> RecordId {
        match self {
            Self::Publication(p) => p.id,
            Self::Announcement(a) => a.id,
            Self::Course(c) => c.id,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.origin(), self.id())
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Publication(p) => &p.title,
            Self::Announcement(a) => &a.title,
            Self::Course(c) => &c.title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Publication(p) => &p.description,
            Self::Announcement(a) => &a.description,
            Self::Course(c) => &c.description,
        }
    }

    /// Raw `fecha` string.
    pub fn date(&self) -> &str {
        match self {
            Self::Publication(p) => &p.date,
            Self::Announcement(a) => &a.date,
            Self::Course(c) => &c.date,
        }
    }
}

impl From<Publication> for SourceRecord {
    fn from(p: Publication) -> Self {
        Self::Publication(p)
    }
}

impl From<Announcement> for SourceRecord {
    fn from(a: Announcement) -> Self {
        Self::Announcement(a)
    }
}

impl From<Course> for SourceRecord {
    fn from(c: Course) -> Self {
        Self::Course(c)
    }
}

/// Global identity of an item across stores.
///
/// Record ids repeat between stores, so the origin is part of the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub origin: Origin,
    pub id: RecordId,
}

impl ItemKey {
    pub fn new(origin: Origin, id: RecordId) -> Self {
        Self { origin, id }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.origin, self.id)
    }
}

/// Category label shown next to a title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Publication,
    Icpc,
    Course,
    Seminar,
}

impl Tag {
    pub fn of(source: &SourceRecord) -> Self {
        match source {
            SourceRecord::Publication(_) => Self::Publication,
            SourceRecord::Announcement(_) => Self::Icpc,
            SourceRecord::Course(c) => match c.kind {
                CourseKind::Curso => Self::Course,
                CourseKind::Seminario => Self::Seminar,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Publication => "#PUBLICACION",
            Self::Icpc => "#ICPC",
            Self::Course => "#CURSO",
            Self::Seminar => "#SEMINARIO",
        }
    }

    /// Style class used when rendering the tag.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Publication => "tag-publicacion",
            Self::Icpc => "tag-icpc",
            Self::Course => "tag-curso",
            Self::Seminar => "tag-seminario",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Section anchor a slide links to.
pub fn link_target(origin: Origin) -> &'static str {
    match origin {
        Origin::Publication => "#publicaciones",
        Origin::Announcement => "#icpc",
        Origin::Course => "#cursos",
    }
}

/// One carousel slide.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselItem {
    pub origin: Origin,
    pub id: RecordId,
    pub source: Arc<SourceRecord>,
    pub timestamp: DateTime<Utc>,
    /// Inline image data (data-URL text).
    pub image: String,
    pub title: String,
    pub alt: String,
    pub tag: Tag,
    pub link: &'static str,
}

impl CarouselItem {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.origin, self.id)
    }
}

/// What the recent list shows under an entry's description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Image(String),
    Link { url: String, host: Option<String> },
    File { name: String, content_type: String },
    None,
}

/// Display-oriented shape of any record, used by the recent list.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub origin: Origin,
    pub id: RecordId,
    pub source: Arc<SourceRecord>,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    /// Description, cut to [`SUMMARY_MAX_CHARS`].
    pub summary: String,
    /// Raw area: publication area, `icpc`, or the course sub-type.
    pub area: String,
    pub area_label: String,
    pub tag: Tag,
    pub preview: Preview,
}

impl FeedEntry {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.origin, self.id)
    }
}

/// Build a carousel slide, or `None` if the record has no displayable image.
///
/// - Publications qualify only when the attached file is declared as an image.
/// - Announcements qualify only when they are image announcements with a payload.
/// - Courses always qualify.
pub fn normalize(source: &Arc<SourceRecord>, timestamp: DateTime<Utc>) -> Option<CarouselItem> {
    let image = match source.as_ref() {
        SourceRecord::Publication(p) => p
            .attachment
            .as_ref()
            .filter(|file| file.is_image())
            .map(|file| file.data.clone())?,
        SourceRecord::Announcement(a) => match (a.kind, &a.image) {
            (AnnouncementKind::Image, Some(data)) if !data.is_empty() => data.clone(),
            _ => return None,
        },
        SourceRecord::Course(c) => c.image.clone(),
    };

    let origin = source.origin();
    let title = source.title().to_string();
    Some(CarouselItem {
        origin,
        id: source.id(),
        source: Arc::clone(source),
        timestamp,
        image,
        alt: title.clone(),
        title,
        tag: Tag::of(source),
        link: link_target(origin),
    })
}

/// Build the recent-list entry for any record.
pub fn summarize(source: &Arc<SourceRecord>, timestamp: DateTime<Utc>) -> FeedEntry {
    let (area, preview) = match source.as_ref() {
        SourceRecord::Publication(p) => {
            let preview = match &p.attachment {
                Some(file) => Preview::File {
                    name: file.name.clone(),
                    content_type: file.content_type.clone(),
                },
                None => Preview::None,
            };
            (p.area.clone(), preview)
        }
        SourceRecord::Announcement(a) => {
            let preview = match (a.kind, &a.image, &a.url) {
                (AnnouncementKind::Image, Some(data), _) => Preview::Image(data.clone()),
                (AnnouncementKind::Url, _, Some(url)) => Preview::Link {
                    url: url.clone(),
                    host: url_host(url),
                },
                _ => Preview::None,
            };
            ("icpc".to_string(), preview)
        }
        SourceRecord::Course(c) => (c.kind.as_str().to_string(), Preview::Image(c.image.clone())),
    };

    FeedEntry {
        origin: source.origin(),
        id: source.id(),
        source: Arc::clone(source),
        timestamp,
        title: source.title().to_string(),
        summary: summarize_text(source.description(), SUMMARY_MAX_CHARS),
        area_label: area_label(&area),
        area,
        tag: Tag::of(source),
        preview,
    }
}

fn url_host(raw: &str) -> Option<String> {
    Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

fn area_label(area: &str) -> String {
    match area {
        "icpc" => "ICPC".into(),
        "curso" => "Curso".into(),
        "seminario" => "Seminario".into(),
        "informatica" => "Informática".into(),
        "matematicas" => "Matemáticas".into(),
        other => other.to_string(),
    }
}

/// Cut `text` to `max` characters, marking the cut with `...`.
pub fn summarize_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
