use std::sync::Arc;

use common::config::{StorageAppConfig, StorageBackend};
use common::storage::{MemoryRecordStore, RecordStore, StorageError};
use common::{Announcement, Course, CourseKind, Origin, Publication};
use portal::forms::{AnnouncementForm, CourseForm, PublicationForm};
use portal::{AppContext, Notice, PortalError, RecentList, ValidationError};

use crate::support::{FailingStore, Frame, TestPortal, course, key, seed_mixed};

fn course_form(title: &str) -> CourseForm {
    CourseForm {
        title: title.into(),
        description: "Temario".into(),
        kind: "curso".into(),
        image: Some("data:image/png;base64,AA".into()),
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn saved_record_shows_up_in_both_passes() {
        let app = TestPortal::in_memory();

        let id = app.portal.create_course(course_form("Rust")).await.unwrap();

        assert_eq!(id, 1);
        assert_eq!(
            app.surface.notices(),
            vec![Notice::Saved {
                origin: Origin::Course,
                id
            }]
        );
        assert_eq!(
            app.surface.frames(),
            vec![Frame::Slides(vec![key(Origin::Course, 1)], 0)]
        );
        assert_eq!(app.surface.last_recent(), Some(RecentList::AllInCarousel));
    }

    #[tokio::test]
    async fn url_announcement_lands_in_recent_only() {
        let app = TestPortal::in_memory();

        app.portal
            .create_announcement(AnnouncementForm {
                title: "Inscripciones".into(),
                description: "Abiertas".into(),
                kind: "url".into(),
                image: None,
                url: "https://icpc.global/regionals".into(),
            })
            .await
            .unwrap();

        assert_eq!(app.surface.frames(), vec![Frame::Empty]);
        let recent = app.surface.last_recent().unwrap();
        assert_eq!(recent.keys(), vec![key(Origin::Announcement, 1)]);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_store() {
        let app = TestPortal::in_memory();

        let err = app
            .portal
            .create_publication(PublicationForm {
                title: "Sin archivo".into(),
                description: "D".into(),
                area: "informatica".into(),
                file: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PortalError::Validation(ValidationError::Missing("archivo"))
        ));
        assert!(matches!(app.surface.notices()[..], [Notice::Invalid(_)]));
        assert_eq!(app.surface.recent_count(), 0);
        let store = app.portal.context().publications.require().unwrap();
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejected_write_is_reported() {
        let failing: Arc<dyn RecordStore<Course>> = Arc::new(FailingStore::new("cursos"));
        let ctx = AppContext::from_stores(
            Arc::new(MemoryRecordStore::<Publication>::new("publicaciones")),
            Arc::new(MemoryRecordStore::<Announcement>::new("icpc")),
            failing,
        );
        let app = TestPortal::new(ctx);

        let err = app.portal.create_course(course_form("Rust")).await.unwrap_err();

        assert!(matches!(err, PortalError::Storage(StorageError::Io(_))));
        assert!(matches!(app.surface.notices()[..], [Notice::WriteFailed(_)]));
        assert_eq!(app.surface.recent_count(), 0);
    }

    #[tokio::test]
    async fn store_still_opening_rejects_writes() {
        let app = TestPortal::new(AppContext::pending(&StorageAppConfig::default()));

        let err = app.portal.create_course(course_form("Rust")).await.unwrap_err();

        assert!(matches!(
            err,
            PortalError::Storage(StorageError::Unavailable(ref table)) if table == "cursos"
        ));
        assert!(matches!(app.surface.notices()[..], [Notice::WriteFailed(_)]));
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_only_the_named_store_record() {
        let app = TestPortal::in_memory();
        let ctx = app.portal.context();
        seed_mixed(ctx).await;

        app.portal.delete(Origin::Course, 1).await.unwrap();

        assert_eq!(ctx.courses.require().unwrap().len().await.unwrap(), 0);
        assert!(
            ctx.publications
                .require()
                .unwrap()
                .get(1)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            ctx.announcements
                .require()
                .unwrap()
                .get(1)
                .await
                .unwrap()
                .is_some()
        );

        let notices = app.surface.notices();
        assert_eq!(
            notices.last(),
            Some(&Notice::Deleted {
                origin: Origin::Course,
                id: 1
            })
        );
        assert_eq!(
            app.portal.carousel().items().iter().map(|i| i.key()).collect::<Vec<_>>(),
            vec![
                key(Origin::Publication, 1),
                key(Origin::Announcement, 1),
                key(Origin::Publication, 2),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_record_is_not_found() {
        let app = TestPortal::in_memory();

        let err = app.portal.delete(Origin::Publication, 42).await.unwrap_err();

        assert!(matches!(
            err,
            PortalError::NotFound {
                origin: Origin::Publication,
                id: 42
            }
        ));
        assert_eq!(
            app.surface.notices(),
            vec![Notice::Missing {
                origin: Origin::Publication,
                id: 42
            }]
        );
        assert_eq!(app.scheduler.started(), 0);
    }

    #[tokio::test]
    async fn deleting_the_last_slide_empties_the_carousel() {
        let app = TestPortal::in_memory();
        let id = app.portal.create_course(course_form("Rust")).await.unwrap();
        assert_eq!(app.scheduler.live(), 1);

        app.portal.delete(Origin::Course, id).await.unwrap();

        assert_eq!(app.surface.frames().last(), Some(&Frame::Empty));
        assert_eq!(app.scheduler.live(), 0);
        assert_eq!(app.surface.last_recent(), Some(RecentList::NoRecords));
    }
}

mod auto_advance {
    use super::*;

    #[tokio::test]
    async fn repeated_refresh_keeps_a_single_timer() {
        let app = TestPortal::in_memory();
        seed_mixed(app.portal.context()).await;

        app.portal.refresh().await;
        app.portal.refresh().await;

        assert_eq!(app.scheduler.started(), 2);
        assert_eq!(app.scheduler.live(), 1);
    }

    #[tokio::test]
    async fn no_timer_for_an_empty_carousel() {
        let app = TestPortal::in_memory();

        app.portal.refresh().await;

        assert_eq!(app.scheduler.started(), 0);
        assert_eq!(app.surface.frames(), vec![Frame::Empty]);
    }

    #[tokio::test]
    async fn tick_moves_to_the_next_slide() {
        let app = TestPortal::in_memory();
        seed_mixed(app.portal.context()).await;
        app.portal.refresh().await;

        app.scheduler.fire_latest();
        app.scheduler.fire_latest();

        assert_eq!(app.portal.carousel().current(), 2);
        let frames = app.surface.frames();
        assert_eq!(frames[frames.len() - 2..], [Frame::Switch(0, 1), Frame::Switch(1, 2)]);
    }

    #[tokio::test]
    async fn manual_navigation_wraps() {
        let app = TestPortal::in_memory();
        seed_mixed(app.portal.context()).await;
        app.portal.refresh().await;
        let carousel = app.portal.carousel();

        carousel.prev();
        assert_eq!(carousel.current(), 3);
        carousel.next();
        assert_eq!(carousel.current(), 0);
        assert_eq!(carousel.go_to(9), None);
        assert_eq!(carousel.current(), 0);
    }
}

mod sections {
    use super::*;

    #[tokio::test]
    async fn listings_are_newest_first() {
        let app = TestPortal::in_memory();
        let courses = app.portal.context().courses.require().unwrap();
        for (title, day) in [("b", 2), ("c", 3), ("a", 1)] {
            courses
                .insert(course(title, CourseKind::Curso, day))
                .await
                .unwrap();
        }

        let titles: Vec<_> = app
            .portal
            .courses()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
        assert!(app.portal.publications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn publication_download_uses_attachment_name() {
        let app = TestPortal::in_memory();
        seed_mixed(app.portal.context()).await;

        let download = app
            .portal
            .download(Origin::Publication, 3)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(download.file_name, "Tesis.bin");
        assert_eq!(download.data, "data:application/pdf;base64,AAAA");

        let poster = app
            .portal
            .download(Origin::Announcement, 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(poster.file_name, "icpc_Regional.png");
    }
}

mod file_backend {
    use super::*;

    #[tokio::test]
    async fn records_survive_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageAppConfig {
            backend: StorageBackend::File,
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        {
            let ctx = AppContext::pending(&config);
            ctx.connect(&config).await.unwrap();
            let app = TestPortal::new(ctx);
            app.portal.create_course(course_form("Rust")).await.unwrap();
            app.portal.create_course(course_form("Go")).await.unwrap();
            app.portal.delete(Origin::Course, 2).await.unwrap();
        }

        let ctx = AppContext::pending(&config);
        ctx.connect(&config).await.unwrap();
        let app = TestPortal::new(ctx);

        let shown = app.portal.refresh().await;
        assert_eq!(shown.carousel.len(), 1);
        assert_eq!(shown.carousel[0].title, "Rust");

        let id = app.portal.create_course(course_form("Zig")).await.unwrap();
        assert_eq!(id, 3);
    }
}
