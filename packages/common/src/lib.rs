pub mod config;
pub mod record;
pub mod storage;

pub use record::{
    Announcement, AnnouncementBody, AnnouncementDraft, AnnouncementKind, Attachment, Course,
    CourseDraft, CourseKind, Origin, Publication, PublicationDraft, RecordId,
};
