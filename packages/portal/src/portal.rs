//! The facade hosts drive: mutations, refresh, listings and downloads.
//!
//! Every successful mutation is followed by a full refresh of both views.
//! Refreshes are not serialized against each other: if a delete and a
//! refresh race, whichever pass finishes last decides what is shown until
//! the next one.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::record::parse_date;
use common::storage::{Record, StorageError, StoreSlot};
use common::{Announcement, AnnouncementKind, Course, Origin, Publication, RecordId};
use tracing::{error, info, warn};

use crate::aggregate::collect;
use crate::carousel::{Carousel, DEFAULT_CAROUSEL_SIZE, DEFAULT_INTERVAL, select_top};
use crate::config::PortalAppConfig;
use crate::context::AppContext;
use crate::error::{PortalError, Result, ValidationError};
use crate::forms::{AnnouncementForm, CourseForm, PublicationForm};
use crate::normalize::CarouselItem;
use crate::recent::{DEFAULT_RECENT_LIMIT, RecentList, recent_excluding};
use crate::surface::{CarouselView, Notice, Surface};
use crate::timer::Scheduler;

/// View sizes and timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalSettings {
    pub carousel_size: usize,
    pub interval: Duration,
    pub recent_limit: usize,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            carousel_size: DEFAULT_CAROUSEL_SIZE,
            interval: DEFAULT_INTERVAL,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl From<&PortalAppConfig> for PortalSettings {
    fn from(config: &PortalAppConfig) -> Self {
        Self {
            carousel_size: config.carousel.size,
            interval: config.carousel.interval(),
            recent_limit: config.recent.limit,
        }
    }
}

/// What one refresh put on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub carousel: Vec<CarouselItem>,
    pub recent: RecentList,
}

/// A file handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    /// Data-URL text, as stored.
    pub data: String,
}

pub struct Portal {
    ctx: Arc<AppContext>,
    surface: Arc<dyn Surface>,
    carousel: Carousel,
    settings: PortalSettings,
}

impl Portal {
    pub fn new<S: Surface + 'static>(
        ctx: Arc<AppContext>,
        surface: Arc<S>,
        scheduler: Arc<dyn Scheduler>,
        settings: PortalSettings,
    ) -> Self {
        let view: Arc<dyn CarouselView> = surface.clone();
        Self {
            ctx,
            surface,
            carousel: Carousel::new(view, scheduler, settings.interval),
            settings,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Re-read every store and repopulate the carousel and the recent list.
    ///
    /// The recent list excludes exactly the slides chosen in this pass.
    pub async fn refresh(&self) -> Refresh {
        let snapshot = collect(&self.ctx).await;

        let carousel = select_top(&snapshot.carousel_pool, self.settings.carousel_size);
        self.carousel.set_items(carousel.clone());

        let recent = recent_excluding(&snapshot.feed, &carousel, self.settings.recent_limit);
        self.surface.show_recent(&recent);

        Refresh { carousel, recent }
    }

    pub async fn create_publication(&self, form: PublicationForm) -> Result<RecordId> {
        let draft = self.validated(form.into_draft(Utc::now()))?;
        self.save(&self.ctx.publications, draft).await
    }

    pub async fn create_course(&self, form: CourseForm) -> Result<RecordId> {
        let draft = self.validated(form.into_draft(Utc::now()))?;
        self.save(&self.ctx.courses, draft).await
    }

    pub async fn create_announcement(&self, form: AnnouncementForm) -> Result<RecordId> {
        let draft = self.validated(form.into_draft(Utc::now()))?;
        self.save(&self.ctx.announcements, draft).await
    }

    /// Delete one record from the store `origin` names.
    ///
    /// Records with the same id in other stores are untouched.
    pub async fn delete(&self, origin: Origin, id: RecordId) -> Result<()> {
        let outcome = match origin {
            Origin::Publication => remove(&self.ctx.publications, id).await,
            Origin::Announcement => remove(&self.ctx.announcements, id).await,
            Origin::Course => remove(&self.ctx.courses, id).await,
        };

        match outcome {
            Ok(true) => {
                info!(%origin, id, "Record deleted");
                self.surface.notify(&Notice::Deleted { origin, id });
                self.refresh().await;
                Ok(())
            }
            Ok(false) => {
                warn!(%origin, id, "Delete of unknown record");
                self.surface.notify(&Notice::Missing { origin, id });
                Err(PortalError::NotFound { origin, id })
            }
            Err(e) => {
                error!(%origin, id, error = %e, "Failed to delete record");
                self.surface.notify(&Notice::WriteFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Publications, newest first.
    pub async fn publications(&self) -> Result<Vec<Publication>> {
        listing(&self.ctx.publications).await
    }

    /// Courses and seminars, newest first.
    pub async fn courses(&self) -> Result<Vec<Course>> {
        listing(&self.ctx.courses).await
    }

    /// Announcements, newest first.
    pub async fn announcements(&self) -> Result<Vec<Announcement>> {
        listing(&self.ctx.announcements).await
    }

    /// The file behind a record, if it has one.
    ///
    /// Url announcements and publications without an attachment have nothing
    /// to download.
    pub async fn download(&self, origin: Origin, id: RecordId) -> Result<Option<Download>> {
        let download = match origin {
            Origin::Publication => {
                let publication = fetch(&self.ctx.publications, id).await?;
                publication.attachment.map(|file| Download {
                    file_name: file.name,
                    data: file.data,
                })
            }
            Origin::Announcement => {
                let announcement = fetch(&self.ctx.announcements, id).await?;
                match (announcement.kind, announcement.image) {
                    (AnnouncementKind::Image, Some(data)) => Some(Download {
                        file_name: format!("icpc_{}.png", underscored(&announcement.title)),
                        data,
                    }),
                    _ => None,
                }
            }
            Origin::Course => {
                let course = fetch(&self.ctx.courses, id).await?;
                let file_name =
                    format!("{}_{}.png", course.kind.as_str(), underscored(&course.title));
                Some(Download {
                    file_name,
                    data: course.image,
                })
            }
        };
        Ok(download)
    }

    fn validated<D>(&self, draft: std::result::Result<D, ValidationError>) -> Result<D> {
        draft.map_err(|e| {
            warn!(error = %e, "Form rejected");
            self.surface.notify(&Notice::Invalid(e.to_string()));
            PortalError::from(e)
        })
    }

    async fn save<T: Record>(&self, slot: &StoreSlot<T>, draft: T::Draft) -> Result<RecordId> {
        let outcome = match slot.require() {
            Ok(store) => store.insert(draft).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(id) => {
                let origin = T::ORIGIN;
                info!(%origin, id, table = %slot.table(), "Record saved");
                self.surface.notify(&Notice::Saved { origin, id });
                self.refresh().await;
                Ok(id)
            }
            Err(e) => {
                error!(table = %slot.table(), error = %e, "Failed to save record");
                self.surface.notify(&Notice::WriteFailed(e.to_string()));
                Err(e.into())
            }
        }
    }
}

async fn remove<T: Record>(
    slot: &StoreSlot<T>,
    id: RecordId,
) -> std::result::Result<bool, StorageError> {
    slot.require()?.delete(id).await
}

async fn fetch<T: Record>(slot: &StoreSlot<T>, id: RecordId) -> Result<T> {
    let origin = T::ORIGIN;
    slot.require()?.get(id).await?.ok_or_else(|| {
        warn!(%origin, id, "Lookup of unknown record");
        PortalError::NotFound { origin, id }
    })
}

/// Every record of one store, newest first. A store still opening is empty.
async fn listing<T: Record>(slot: &StoreSlot<T>) -> Result<Vec<T>> {
    let Some(store) = slot.get() else {
        warn!(table = %slot.table(), "Store not ready, listing nothing");
        return Ok(Vec::new());
    };
    let mut records = store.list_all().await?;
    // Unparseable dates compare as `None` and end up last.
    records.sort_by_cached_key(|record| std::cmp::Reverse(parse_date(record.date())));
    Ok(records)
}

fn underscored(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join("_")
}
