use std::collections::HashSet;

use crate::normalize::{CarouselItem, FeedEntry, ItemKey};

/// Default number of entries in the recent list.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// What the recent-activity panel should show.
#[derive(Debug, Clone, PartialEq)]
pub enum RecentList {
    /// No records exist in any store.
    NoRecords,
    /// Records exist, but every one of them is already in the carousel.
    AllInCarousel,
    Entries(Vec<FeedEntry>),
}

impl RecentList {
    pub fn entries(&self) -> &[FeedEntry] {
        match self {
            Self::Entries(entries) => entries,
            _ => &[],
        }
    }

    pub fn keys(&self) -> Vec<ItemKey> {
        self.entries().iter().map(FeedEntry::key).collect()
    }
}

/// Entries of `all` not shown in `carousel`, up to `limit`, keeping order.
///
/// `all` must already be sorted newest first. Membership is decided by
/// `(origin, id)`, never by id alone.
pub fn recent_excluding(all: &[FeedEntry], carousel: &[CarouselItem], limit: usize) -> RecentList {
    if all.is_empty() {
        return RecentList::NoRecords;
    }

    let shown: HashSet<ItemKey> = carousel.iter().map(CarouselItem::key).collect();
    let remaining: Vec<FeedEntry> = all
        .iter()
        .filter(|entry| !shown.contains(&entry.key()))
        .take(limit)
        .cloned()
        .collect();

    if remaining.is_empty() {
        RecentList::AllInCarousel
    } else {
        RecentList::Entries(remaining)
    }
}
