use super::backend::{ContentFactory, EmbeddingError, WindowHandle, WindowingBackend};
use super::worker::{ChildStatus, EmbeddedWorker, SharedStatus, WorkerCommand};
use crate::config::EmbeddedHostConfig;
use crate::shared::logging::LogSink;
use crate::ui::{Bounds, FormSpec, HostUi};
use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostLayout {
    pub bounds: Bounds,
    pub resolve_attempts: u32,
    pub resolve_backoff: Duration,
}

impl From<&EmbeddedHostConfig> for HostLayout {
    fn from(config: &EmbeddedHostConfig) -> Self {
        Self {
            bounds: Bounds::new(config.left, config.top, config.width, config.height),
            resolve_attempts: config.resolve_attempts.max(1),
            resolve_backoff: Duration::from_millis(config.resolve_backoff_ms),
        }
    }
}

impl Default for HostLayout {
    fn default() -> Self {
        Self::from(&EmbeddedHostConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposeOutcome {
    Marshaled,
    DirectClose,
    AlreadyClosed,
    NotFound,
}

#[derive(Debug)]
pub struct EmbeddedHostRecord {
    pub host_id: String,
    pub title: String,
    pub container: WindowHandle,
    status: SharedStatus,
    commands: Sender<WorkerCommand>,
    worker: JoinHandle<()>,
}

impl EmbeddedHostRecord {
    pub fn child_status(&self) -> ChildStatus {
        self.status.get()
    }

    pub fn child_window(&self) -> Option<WindowHandle> {
        match self.status.get() {
            ChildStatus::Attached(window) => Some(window),
            _ => None,
        }
    }

    pub fn worker_finished(&self) -> bool {
        self.worker.is_finished()
    }

    pub fn wait_for_child(&self, timeout: Duration) -> ChildStatus {
        let step = Duration::from_millis(5);
        let mut waited = Duration::ZERO;
        loop {
            let status = self.status.get();
            if status != ChildStatus::Pending || waited >= timeout {
                return status;
            }
            thread::sleep(step);
            waited += step;
        }
    }
}

pub struct EmbeddedHostRegistry {
    backend: Arc<dyn WindowingBackend>,
    log: Arc<dyn LogSink>,
    layout: HostLayout,
    records: HashMap<String, EmbeddedHostRecord>,
}

fn registry_key(host_id: &str) -> String {
    host_id.trim().to_ascii_lowercase()
}

impl EmbeddedHostRegistry {
    pub fn new(backend: Arc<dyn WindowingBackend>, log: Arc<dyn LogSink>, layout: HostLayout) -> Self {
        Self {
            backend,
            log,
            layout,
            records: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, host_id: &str) -> Option<&EmbeddedHostRecord> {
        self.records.get(&registry_key(host_id))
    }

    pub fn is_alive(&self, host: &dyn HostUi, host_id: &str) -> bool {
        self.record(host_id)
            .is_some_and(|record| host.form_exists(&record.host_id) && record.child_status().is_live())
    }

    pub fn get_or_create(
        &mut self,
        host: &mut dyn HostUi,
        host_id: &str,
        title: &str,
        factory: ContentFactory,
    ) -> Result<&EmbeddedHostRecord, EmbeddingError> {
        let key = registry_key(host_id);
        if self.is_alive(host, host_id) {
            let _ = host.focus_form(host_id);
            self.log.info(
                "embedding.host.reused",
                &format!("focused live embedded host `{host_id}`"),
            );
            return self
                .records
                .get(&key)
                .ok_or_else(|| EmbeddingError::Content(format!("host `{host_id}` vanished")));
        }
        if self.records.contains_key(&key) {
            self.dispose(host_id);
        }

        let main = self.backend.main_window()?;
        self.prepare_host_form(host, host_id, title)?;
        let container = match self.resolve_container(main, title) {
            Ok(container) => container,
            Err(err) => {
                let _ = host.close_form(host_id);
                return Err(err);
            }
        };

        let status = SharedStatus::pending();
        let (sender, receiver) = mpsc::channel();
        let worker = EmbeddedWorker {
            host_id: host_id.to_string(),
            container,
            backend: Arc::clone(&self.backend),
            log: Arc::clone(&self.log),
            factory,
            status: status.clone(),
            commands: receiver,
        };
        let name = format!("embedded-host-{host_id}");
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || worker.run())
            .map_err(|err| EmbeddingError::WorkerSpawn {
                name,
                message: err.to_string(),
            });
        let handle = match handle {
            Ok(handle) => handle,
            Err(err) => {
                self.log.error(
                    "embedding.worker.spawn_failed",
                    &format!("could not start worker for `{host_id}`"),
                    &err,
                );
                let _ = host.close_form(host_id);
                return Err(err);
            }
        };

        self.log.info(
            "embedding.host.created",
            &format!("embedded host `{host_id}` created"),
        );
        let record = EmbeddedHostRecord {
            host_id: host_id.to_string(),
            title: title.to_string(),
            container,
            status,
            commands: sender,
            worker: handle,
        };
        self.records.insert(key.clone(), record);
        self.records
            .get(&key)
            .ok_or_else(|| EmbeddingError::Content(format!("host `{host_id}` vanished")))
    }

    fn prepare_host_form(
        &self,
        host: &mut dyn HostUi,
        host_id: &str,
        title: &str,
    ) -> Result<(), EmbeddingError> {
        let result = if host.form_exists(host_id) {
            host.focus_form(host_id)
        } else {
            host.create_form(FormSpec {
                id: host_id.to_string(),
                title: title.to_string(),
                bounds: self.layout.bounds,
                sizable: false,
                parent: None,
            })
        };
        result.map_err(|source| EmbeddingError::HostForm {
            host_id: host_id.to_string(),
            source,
        })
    }

    fn resolve_container(
        &self,
        main: WindowHandle,
        title: &str,
    ) -> Result<WindowHandle, EmbeddingError> {
        let attempts = self.layout.resolve_attempts.max(1);
        for attempt in 1..=attempts {
            if let Some(window) = self.backend.find_window_by_title(main, title) {
                return Ok(window);
            }
            if attempt < attempts {
                thread::sleep(self.layout.resolve_backoff);
            }
        }
        Err(EmbeddingError::HostSurfaceNotFound {
            title: title.to_string(),
            attempts,
        })
    }

    pub fn dispose(&mut self, host_id: &str) -> DisposeOutcome {
        let Some(record) = self.records.remove(&registry_key(host_id)) else {
            return DisposeOutcome::NotFound;
        };
        let status = record.child_status();
        if !status.is_live() {
            return DisposeOutcome::AlreadyClosed;
        }
        if record.commands.send(WorkerCommand::Close).is_ok() {
            return DisposeOutcome::Marshaled;
        }

        self.log.warn(
            "embedding.dispose.fallback",
            &format!("worker for `{host_id}` is gone; closing its window directly"),
        );
        let Some(window) = record.child_window() else {
            return DisposeOutcome::AlreadyClosed;
        };
        if let Err(err) = self.backend.close_window(window) {
            self.log.error(
                "embedding.dispose.failed",
                &format!("direct close of `{host_id}` failed"),
                &err,
            );
        }
        DisposeOutcome::DirectClose
    }

    pub fn dispose_all(&mut self) {
        let ids = self
            .records
            .values()
            .map(|record| record.host_id.clone())
            .collect::<Vec<_>>();
        for host_id in ids {
            self.dispose(&host_id);
        }
    }
}

impl Drop for EmbeddedHostRegistry {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
