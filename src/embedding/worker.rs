use super::backend::{ContentFactory, WindowHandle, WindowingBackend};
use crate::shared::logging::LogSink;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PUMP_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildStatus {
    Pending,
    Attached(WindowHandle),
    Failed(String),
    Disposed,
}

impl ChildStatus {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Pending | Self::Attached(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerCommand {
    Close,
}

#[derive(Debug, Clone)]
pub struct SharedStatus(Arc<Mutex<ChildStatus>>);

impl SharedStatus {
    pub fn pending() -> Self {
        Self(Arc::new(Mutex::new(ChildStatus::Pending)))
    }

    pub fn get(&self) -> ChildStatus {
        self.0
            .lock()
            .map(|status| status.clone())
            .unwrap_or(ChildStatus::Disposed)
    }

    pub fn set(&self, status: ChildStatus) {
        if let Ok(mut current) = self.0.lock() {
            *current = status;
        }
    }
}

pub(crate) struct EmbeddedWorker {
    pub host_id: String,
    pub container: WindowHandle,
    pub backend: Arc<dyn WindowingBackend>,
    pub log: Arc<dyn LogSink>,
    pub factory: ContentFactory,
    pub status: SharedStatus,
    pub commands: Receiver<WorkerCommand>,
}

impl EmbeddedWorker {
    pub fn run(self) {
        let Self {
            host_id,
            container,
            backend,
            log,
            factory,
            status,
            commands,
        } = self;

        let mut content = match factory() {
            Ok(content) => content,
            Err(err) => {
                log.error(
                    "embedding.worker.failed",
                    &format!("failed to build content for `{host_id}`"),
                    &err,
                );
                status.set(ChildStatus::Failed(err.to_string()));
                return;
            }
        };

        let window = content.window();
        let attached = backend
            .strip_decorations(window)
            .and_then(|_| backend.reparent(window, container));
        if let Err(err) = attached {
            log.error(
                "embedding.worker.failed",
                &format!("failed to embed content into `{host_id}`"),
                &err,
            );
            content.close();
            status.set(ChildStatus::Failed(err.to_string()));
            return;
        }
        status.set(ChildStatus::Attached(window));
        log.info(
            "embedding.worker.attached",
            &format!("content attached to `{host_id}`"),
        );

        loop {
            match commands.recv_timeout(PUMP_INTERVAL) {
                Ok(WorkerCommand::Close) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    if !content.pump() {
                        break;
                    }
                }
            }
        }

        content.close();
        status.set(ChildStatus::Disposed);
        log.info(
            "embedding.worker.stopped",
            &format!("content for `{host_id}` closed"),
        );
    }
}
