//! One aggregation pass: fetch every store, normalize, merge, sort.

use std::sync::Arc;

use common::record::parse_date;
use common::storage::{Record, StoreSlot};
use tracing::{error, info, warn};

use crate::context::AppContext;
use crate::normalize::{CarouselItem, FeedEntry, SourceRecord, normalize, summarize};

/// Everything one aggregation pass produced, newest first.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Carousel-eligible items across all stores.
    pub carousel_pool: Vec<CarouselItem>,
    /// Every record across all stores, in display form.
    pub feed: Vec<FeedEntry>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.feed.is_empty()
    }
}

/// All carousel-eligible items, newest first.
pub async fn aggregate(ctx: &AppContext) -> Vec<CarouselItem> {
    collect(ctx).await.carousel_pool
}

/// Fetch all three stores together and build both views' inputs from the
/// same set of records.
///
/// A store that is not open yet, or fails to read, contributes nothing.
pub async fn collect(ctx: &AppContext) -> Snapshot {
    let sources = fetch_all(ctx).await;

    let mut carousel_pool = Vec::new();
    let mut feed = Vec::with_capacity(sources.len());
    for source in &sources {
        let Some(timestamp) = parse_date(source.date()) else {
            warn!(
                key = %source.key(),
                fecha = %source.date(),
                "Skipping record with unparseable date"
            );
            continue;
        };
        if let Some(item) = normalize(source, timestamp) {
            carousel_pool.push(item);
        }
        feed.push(summarize(source, timestamp));
    }

    // Stable: ties keep store order (publications, announcements, courses).
    carousel_pool.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    info!(
        records = sources.len(),
        eligible = carousel_pool.len(),
        "Aggregation pass complete"
    );

    Snapshot {
        carousel_pool,
        feed,
    }
}

/// Raw records of every store, concatenated in store order.
pub async fn fetch_all(ctx: &AppContext) -> Vec<Arc<SourceRecord>> {
    let (publications, announcements, courses) = tokio::join!(
        list_or_empty(&ctx.publications),
        list_or_empty(&ctx.announcements),
        list_or_empty(&ctx.courses),
    );

    let mut sources: Vec<Arc<SourceRecord>> =
        Vec::with_capacity(publications.len() + announcements.len() + courses.len());
    sources.extend(publications.into_iter().map(|p| Arc::new(SourceRecord::from(p))));
    sources.extend(announcements.into_iter().map(|a| Arc::new(SourceRecord::from(a))));
    sources.extend(courses.into_iter().map(|c| Arc::new(SourceRecord::from(c))));
    sources
}

async fn list_or_empty<T: Record>(slot: &StoreSlot<T>) -> Vec<T> {
    let Some(store) = slot.get() else {
        warn!(table = %slot.table(), "Store not ready, treating as empty");
        return Vec::new();
    };
    match store.list_all().await {
        Ok(records) => records,
        Err(e) => {
            error!(table = %slot.table(), error = %e, "Failed to list store, treating as empty");
            Vec::new()
        }
    }
}
