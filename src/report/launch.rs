use super::engine::{ReportEngine, ReportError, ReportRequest};
use crate::embedding::{ContentFactory, EmbeddingError, PUMP_INTERVAL};
use crate::shared::logging::LogSink;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub const VIEWER_THREAD_NAME: &str = "report-viewer";

pub fn launch_standalone(
    engine: Arc<dyn ReportEngine>,
    log: Arc<dyn LogSink>,
    request: ReportRequest,
) -> Result<JoinHandle<()>, ReportError> {
    thread::Builder::new()
        .name(VIEWER_THREAD_NAME.to_string())
        .spawn(move || {
            let mut viewer = match engine.open(&request) {
                Ok(viewer) => viewer,
                Err(err) => {
                    log.error(
                        "report.viewer.failed",
                        &format!("could not open report `{}`", request.report_code),
                        &err,
                    );
                    return;
                }
            };
            log.info(
                "report.viewer.opened",
                &format!("report `{}` opened", request.report_code),
            );
            while viewer.pump() {
                thread::sleep(PUMP_INTERVAL);
            }
            viewer.close();
        })
        .map_err(|source| ReportError::Spawn { source })
}

pub fn embedded_factory(engine: Arc<dyn ReportEngine>, request: ReportRequest) -> ContentFactory {
    Box::new(move || {
        engine
            .open(&request)
            .map_err(|err| EmbeddingError::Content(err.to_string()))
    })
}
