use std::sync::Arc;

use common::config::StorageAppConfig;
use common::storage::{MemoryRecordStore, RecordStore};
use common::{Course, Origin};
use portal::{AppContext, PortalSettings, RecentList, aggregate, collect};

use crate::support::{TestPortal, course, key, publication, seed_mixed};

mod merge_and_sort {
    use super::*;

    #[tokio::test]
    async fn eligible_items_across_stores_newest_first() {
        let ctx = AppContext::in_memory();
        seed_mixed(&ctx).await;

        let keys: Vec<_> = aggregate(&ctx).await.iter().map(|item| item.key()).collect();
        assert_eq!(
            keys,
            vec![
                key(Origin::Publication, 1),
                key(Origin::Announcement, 1),
                key(Origin::Course, 1),
                key(Origin::Publication, 2),
            ]
        );
    }

    #[tokio::test]
    async fn repeated_passes_agree() {
        let ctx = AppContext::in_memory();
        seed_mixed(&ctx).await;
        let courses = ctx.courses.require().unwrap();
        for day in [4, 4, 4] {
            courses
                .insert(course("Mismo día", common::CourseKind::Seminario, day))
                .await
                .unwrap();
        }

        let first = collect(&ctx).await;
        let second = collect(&ctx).await;
        let first_keys: Vec<_> = first.feed.iter().map(|e| e.key()).collect();
        let second_keys: Vec<_> = second.feed.iter().map(|e| e.key()).collect();
        assert_eq!(first_keys, second_keys);
        assert!(
            first
                .feed
                .windows(2)
                .all(|pair| pair[0].timestamp >= pair[1].timestamp)
        );
    }

    #[tokio::test]
    async fn pending_store_contributes_nothing() {
        let config = StorageAppConfig::default();
        let ctx = AppContext::pending(&config);
        let store: Arc<dyn RecordStore<Course>> = Arc::new(MemoryRecordStore::new("cursos"));
        assert!(ctx.courses.attach(store));
        ctx.courses
            .require()
            .unwrap()
            .insert(course("Rust", common::CourseKind::Curso, 1))
            .await
            .unwrap();

        let snapshot = collect(&ctx).await;
        assert_eq!(snapshot.feed.len(), 1);
        assert_eq!(snapshot.carousel_pool[0].origin, Origin::Course);
    }
}

mod views {
    use super::*;

    #[tokio::test]
    async fn mixed_stores_split_between_carousel_and_recent() {
        let app = TestPortal::in_memory();
        seed_mixed(app.portal.context()).await;

        let shown = app.portal.refresh().await;

        let carousel: Vec<_> = shown.carousel.iter().map(|item| item.key()).collect();
        assert_eq!(
            carousel,
            vec![
                key(Origin::Publication, 1),
                key(Origin::Announcement, 1),
                key(Origin::Course, 1),
                key(Origin::Publication, 2),
            ]
        );
        assert_eq!(
            shown.recent.keys(),
            vec![key(Origin::Announcement, 2), key(Origin::Publication, 3)]
        );
        assert_eq!(app.surface.last_recent(), Some(shown.recent));
    }

    #[tokio::test]
    async fn carousel_and_recent_never_overlap() {
        let app = TestPortal::in_memory();
        let ctx = app.portal.context();
        seed_mixed(ctx).await;
        let courses = ctx.courses.require().unwrap();
        for day in 7..=12 {
            courses
                .insert(course(&format!("Curso {day}"), common::CourseKind::Curso, day))
                .await
                .unwrap();
        }

        let shown = app.portal.refresh().await;
        assert_eq!(shown.carousel.len(), 5);
        for item in &shown.carousel {
            assert!(!shown.recent.keys().contains(&item.key()));
        }
        // Twelve records, five on the carousel.
        assert_eq!(shown.recent.entries().len(), 7);
    }

    #[tokio::test]
    async fn shared_ids_are_told_apart() {
        let app = TestPortal::with_settings(
            AppContext::in_memory(),
            PortalSettings {
                carousel_size: 1,
                ..Default::default()
            },
        );
        let ctx = app.portal.context();
        ctx.publications
            .require()
            .unwrap()
            .insert(publication("Grafos", "image/png", 2))
            .await
            .unwrap();
        ctx.courses
            .require()
            .unwrap()
            .insert(course("Rust", common::CourseKind::Curso, 1))
            .await
            .unwrap();

        let shown = app.portal.refresh().await;
        assert_eq!(shown.carousel[0].key(), key(Origin::Publication, 1));
        assert_eq!(shown.recent.keys(), vec![key(Origin::Course, 1)]);
    }

    #[tokio::test]
    async fn recent_is_capped() {
        let app = TestPortal::in_memory();
        let courses = app.portal.context().courses.require().unwrap();
        for day in 1..=20 {
            courses
                .insert(course(&format!("Curso {day}"), common::CourseKind::Curso, day))
                .await
                .unwrap();
        }

        let shown = app.portal.refresh().await;
        let ids: Vec<_> = shown.recent.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, (6..=15).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn empty_and_all_in_carousel_are_distinct() {
        let app = TestPortal::in_memory();
        assert_eq!(app.portal.refresh().await.recent, RecentList::NoRecords);

        app.portal
            .context()
            .courses
            .require()
            .unwrap()
            .insert(course("Rust", common::CourseKind::Curso, 1))
            .await
            .unwrap();
        assert_eq!(app.portal.refresh().await.recent, RecentList::AllInCarousel);
    }
}
