use reportform::embedding::{
    ChildStatus, ContentFactory, DisposeOutcome, EmbeddedHostRegistry, EmbeddingError,
    HostLayout, MemoryViewer, MemoryWindowing, ViewerWindow, WindowHandle,
};
use reportform::shared::logging::MemoryLog;
use reportform::ui::{Bounds, HostUi, MemoryHost};
use std::sync::Arc;
use std::time::{Duration, Instant};

const HOST_ID: &str = "RPT_EMB_VIEWER";
const TITLE: &str = "Report Viewer";

struct CrashingViewer(WindowHandle);

impl ViewerWindow for CrashingViewer {
    fn window(&self) -> WindowHandle {
        self.0
    }

    fn pump(&mut self) -> bool {
        panic!("viewer message loop crashed");
    }

    fn close(&mut self) {}
}

fn layout() -> HostLayout {
    HostLayout {
        bounds: Bounds::new(300, 80, 900, 650),
        resolve_attempts: 3,
        resolve_backoff: Duration::from_millis(1),
    }
}

fn registry(windowing: &Arc<MemoryWindowing>, log: &Arc<MemoryLog>) -> EmbeddedHostRegistry {
    EmbeddedHostRegistry::new(windowing.clone(), log.clone(), layout())
}

fn viewer_factory(viewer: MemoryViewer) -> ContentFactory {
    Box::new(move || -> Result<Box<dyn ViewerWindow>, EmbeddingError> { Ok(Box::new(viewer)) })
}

fn failing_factory(message: &str) -> ContentFactory {
    let message = message.to_string();
    Box::new(move || -> Result<Box<dyn ViewerWindow>, EmbeddingError> {
        Err(EmbeddingError::Content(message))
    })
}

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(3);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[test]
fn creates_host_form_and_attaches_content() {
    let windowing = Arc::new(MemoryWindowing::new());
    let container = windowing.register_surface(TITLE, 0);
    let log = Arc::new(MemoryLog::new());
    let mut registry = registry(&windowing, &log);
    let mut host = MemoryHost::new();
    let viewer = MemoryViewer::new(windowing.allocate());
    let child = viewer.window();

    let record = registry
        .get_or_create(&mut host, HOST_ID, TITLE, viewer_factory(viewer))
        .expect("create host");
    assert_eq!(record.container, container);
    assert_eq!(
        record.wait_for_child(Duration::from_secs(3)),
        ChildStatus::Attached(child)
    );

    let form = host.form(HOST_ID).expect("host form");
    assert_eq!(form.spec.bounds, Bounds::new(300, 80, 900, 650));
    let journal = windowing.journal();
    assert_eq!(journal.stripped, vec![child]);
    assert_eq!(journal.reparented, vec![(child, container)]);
    assert!(registry.is_alive(&host, "rpt_emb_viewer"));
    assert!(log.has_event("embedding.host.created"));
}

#[test]
fn live_record_is_focused_and_reused() {
    let windowing = Arc::new(MemoryWindowing::new());
    windowing.register_surface(TITLE, 0);
    let log = Arc::new(MemoryLog::new());
    let mut registry = registry(&windowing, &log);
    let mut host = MemoryHost::new();

    registry
        .get_or_create(
            &mut host,
            HOST_ID,
            TITLE,
            viewer_factory(MemoryViewer::new(windowing.allocate())),
        )
        .expect("create")
        .wait_for_child(Duration::from_secs(3));
    host.create_form(reportform::ui::FormSpec {
        id: "other".to_string(),
        title: "other".to_string(),
        bounds: Bounds::default(),
        sizable: false,
        parent: None,
    })
    .expect("other form");

    registry
        .get_or_create(&mut host, HOST_ID, TITLE, failing_factory("must not run"))
        .expect("reuse");
    assert_eq!(host.focused(), Some(HOST_ID));
    assert_eq!(windowing.lookups(TITLE), 1);
    assert_eq!(registry.len(), 1);
    assert!(log.has_event("embedding.host.reused"));
}

#[test]
fn host_surface_is_resolved_with_bounded_retries() {
    let windowing = Arc::new(MemoryWindowing::new());
    windowing.register_surface(TITLE, 2);
    let log = Arc::new(MemoryLog::new());
    let mut registry = registry(&windowing, &log);
    let mut host = MemoryHost::new();

    registry
        .get_or_create(
            &mut host,
            HOST_ID,
            TITLE,
            viewer_factory(MemoryViewer::new(windowing.allocate())),
        )
        .expect("create after retries");
    assert_eq!(windowing.lookups(TITLE), 3);
}

#[test]
fn missing_host_surface_fails_and_closes_the_form() {
    let windowing = Arc::new(MemoryWindowing::new());
    let log = Arc::new(MemoryLog::new());
    let mut registry = registry(&windowing, &log);
    let mut host = MemoryHost::new();

    let err = registry
        .get_or_create(
            &mut host,
            HOST_ID,
            TITLE,
            viewer_factory(MemoryViewer::new(windowing.allocate())),
        )
        .expect_err("no surface");
    assert_eq!(
        err,
        EmbeddingError::HostSurfaceNotFound {
            title: TITLE.to_string(),
            attempts: 3,
        }
    );
    assert!(!host.form_exists(HOST_ID));
    assert!(registry.is_empty());
}

#[test]
fn missing_main_window_is_an_embedding_error() {
    let windowing = Arc::new(MemoryWindowing::without_main_window());
    windowing.register_surface(TITLE, 0);
    let log = Arc::new(MemoryLog::new());
    let mut registry = registry(&windowing, &log);
    let mut host = MemoryHost::new();

    let err = registry
        .get_or_create(
            &mut host,
            HOST_ID,
            TITLE,
            viewer_factory(MemoryViewer::new(windowing.allocate())),
        )
        .expect_err("no main window");
    assert!(matches!(err, EmbeddingError::MainWindowUnavailable(_)));
    assert!(!host.form_exists(HOST_ID));
}

#[test]
fn dispose_marshals_close_to_the_worker() {
    let windowing = Arc::new(MemoryWindowing::new());
    windowing.register_surface(TITLE, 0);
    let log = Arc::new(MemoryLog::new());
    let mut registry = registry(&windowing, &log);
    let mut host = MemoryHost::new();
    let viewer = MemoryViewer::new(windowing.allocate());
    let closed = viewer.closed_flag();

    registry
        .get_or_create(&mut host, HOST_ID, TITLE, viewer_factory(viewer))
        .expect("create")
        .wait_for_child(Duration::from_secs(3));

    assert_eq!(registry.dispose(HOST_ID), DisposeOutcome::Marshaled);
    assert!(registry.is_empty());
    assert!(wait_until(|| closed.load(std::sync::atomic::Ordering::SeqCst)));
    assert_eq!(registry.dispose(HOST_ID), DisposeOutcome::NotFound);
    assert!(windowing.journal().closed.is_empty());
}

#[test]
fn dead_worker_falls_back_to_closing_the_window_directly() {
    let windowing = Arc::new(MemoryWindowing::new());
    windowing.register_surface(TITLE, 0);
    let log = Arc::new(MemoryLog::new());
    let mut registry = registry(&windowing, &log);
    let mut host = MemoryHost::new();
    let child = windowing.allocate();
    let factory: ContentFactory =
        Box::new(move || -> Result<Box<dyn ViewerWindow>, EmbeddingError> {
            Ok(Box::new(CrashingViewer(child)))
        });

    registry
        .get_or_create(&mut host, HOST_ID, TITLE, factory)
        .expect("create");
    let record = registry.record(HOST_ID).expect("record");
    assert!(wait_until(|| record.worker_finished()));
    assert_eq!(record.child_status(), ChildStatus::Attached(child));

    assert_eq!(registry.dispose(HOST_ID), DisposeOutcome::DirectClose);
    assert_eq!(windowing.journal().closed, vec![child]);
    assert!(registry.is_empty());
    assert!(log.has_event("embedding.dispose.fallback"));
}

#[test]
fn failed_content_is_not_alive_and_gets_recreated() {
    let windowing = Arc::new(MemoryWindowing::new());
    windowing.register_surface(TITLE, 0);
    let log = Arc::new(MemoryLog::new());
    let mut registry = registry(&windowing, &log);
    let mut host = MemoryHost::new();

    let status = registry
        .get_or_create(&mut host, HOST_ID, TITLE, failing_factory("engine offline"))
        .expect("create")
        .wait_for_child(Duration::from_secs(3));
    assert!(matches!(status, ChildStatus::Failed(message) if message.contains("engine offline")));
    assert!(!registry.is_alive(&host, HOST_ID));
    assert!(log.has_event("embedding.worker.failed"));

    let viewer = MemoryViewer::new(windowing.allocate());
    let child = viewer.window();
    let status = registry
        .get_or_create(&mut host, HOST_ID, TITLE, viewer_factory(viewer))
        .expect("recreate")
        .wait_for_child(Duration::from_secs(3));
    assert_eq!(status, ChildStatus::Attached(child));
    assert_eq!(registry.len(), 1);
}

#[test]
fn closed_host_form_means_the_record_is_stale() {
    let windowing = Arc::new(MemoryWindowing::new());
    windowing.register_surface(TITLE, 0);
    let log = Arc::new(MemoryLog::new());
    let mut registry = registry(&windowing, &log);
    let mut host = MemoryHost::new();
    let first = MemoryViewer::new(windowing.allocate());
    let first_closed = first.closed_flag();

    registry
        .get_or_create(&mut host, HOST_ID, TITLE, viewer_factory(first))
        .expect("create")
        .wait_for_child(Duration::from_secs(3));
    host.close_form(HOST_ID).expect("user closes host");
    assert!(!registry.is_alive(&host, HOST_ID));

    registry
        .get_or_create(
            &mut host,
            HOST_ID,
            TITLE,
            viewer_factory(MemoryViewer::new(windowing.allocate())),
        )
        .expect("recreate");
    assert!(host.form_exists(HOST_ID));
    assert!(wait_until(|| first_closed.load(std::sync::atomic::Ordering::SeqCst)));
}

#[test]
fn dropping_the_registry_disposes_every_host() {
    let windowing = Arc::new(MemoryWindowing::new());
    windowing.register_surface(TITLE, 0);
    let log = Arc::new(MemoryLog::new());
    let mut host = MemoryHost::new();
    let viewer = MemoryViewer::new(windowing.allocate());
    let closed = viewer.closed_flag();

    {
        let mut registry = registry(&windowing, &log);
        registry
            .get_or_create(&mut host, HOST_ID, TITLE, viewer_factory(viewer))
            .expect("create")
            .wait_for_child(Duration::from_secs(3));
    }
    assert!(wait_until(|| closed.load(std::sync::atomic::Ordering::SeqCst)));
}
