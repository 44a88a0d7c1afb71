pub mod aggregate;
pub mod carousel;
pub mod config;
pub mod context;
pub mod error;
pub mod forms;
pub mod normalize;
pub mod portal;
pub mod recent;
pub mod surface;
pub mod timer;

pub use aggregate::{Snapshot, aggregate, collect};
pub use carousel::{Carousel, CarouselState, Transition};
pub use context::AppContext;
pub use error::{PortalError, ValidationError};
pub use normalize::{CarouselItem, FeedEntry, ItemKey, Preview, Tag};
pub use portal::{Download, Portal, PortalSettings, Refresh};
pub use recent::{RecentList, recent_excluding};
pub use surface::{CarouselView, LogSurface, Notice, Surface};
pub use timer::{Scheduler, TimerHandle, TokioScheduler};
