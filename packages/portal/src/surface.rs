//! Collaborators that render what the portal computes.

use std::fmt;

use common::{Origin, RecordId};
use tracing::{info, warn};

use crate::normalize::CarouselItem;
use crate::recent::RecentList;

/// Renders the carousel.
///
/// Every call replaces what was shown before. `switch_slide` must deactivate
/// `from` and activate `to` as one step.
pub trait CarouselView: Send + Sync {
    fn show_slides(&self, items: &[CarouselItem], active: usize);
    fn show_empty(&self);
    fn switch_slide(&self, from: usize, to: usize);
}

/// Everything the portal pushes to its host.
pub trait Surface: CarouselView {
    fn show_recent(&self, recent: &RecentList);
    fn notify(&self, notice: &Notice);
}

/// Outcome of a mutation, for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved { origin: Origin, id: RecordId },
    Deleted { origin: Origin, id: RecordId },
    Invalid(String),
    WriteFailed(String),
    Missing { origin: Origin, id: RecordId },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { origin, id } => write!(f, "{origin} {id} saved"),
            Self::Deleted { origin, id } => write!(f, "{origin} {id} deleted"),
            Self::Invalid(msg) => write!(f, "invalid input: {msg}"),
            Self::WriteFailed(msg) => write!(f, "could not write: {msg}"),
            Self::Missing { origin, id } => write!(f, "{origin} {id} not found"),
        }
    }
}

/// Surface for the headless host: everything goes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSurface;

impl CarouselView for LogSurface {
    fn show_slides(&self, items: &[CarouselItem], active: usize) {
        let keys: Vec<String> = items.iter().map(|item| item.key().to_string()).collect();
        info!(slides = ?keys, active, "Carousel updated");
    }

    fn show_empty(&self) {
        info!("Carousel empty");
    }

    fn switch_slide(&self, from: usize, to: usize) {
        info!(from, to, "Carousel slide");
    }
}

impl Surface for LogSurface {
    fn show_recent(&self, recent: &RecentList) {
        match recent {
            RecentList::NoRecords => info!("Recent list: no records yet"),
            RecentList::AllInCarousel => info!("Recent list: everything is in the carousel"),
            RecentList::Entries(entries) => {
                for entry in entries {
                    info!(
                        key = %entry.key(),
                        tag = %entry.tag,
                        area = %entry.area_label,
                        title = %entry.title,
                        "Recent entry"
                    );
                }
            }
        }
    }

    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::Saved { .. } | Notice::Deleted { .. } => info!(%notice, "Notice"),
            _ => warn!(%notice, "Notice"),
        }
    }
}
