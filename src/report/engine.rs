use crate::config::DatabaseConfig;
use crate::embedding::{MemoryViewer, MemoryWindowing, ViewerWindow};
use crate::forms::TypedValue;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("no report file found for `{code}` under {base}")]
    FileNotFound { code: String, base: String },
    #[error("failed to read reports directory {path}: {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("report engine failed to open {path}: {message}")]
    Engine { path: String, message: String },
    #[error("failed to spawn report viewer worker: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseLogon {
    pub server: String,
    pub database: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl DatabaseLogon {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            user: config.user.clone(),
            password: config.password.clone(),
        }
    }

    pub fn integrated_security(&self) -> bool {
        self.user.trim().is_empty()
    }

    pub fn qualify(&self, location: &str) -> String {
        qualified_table_location(location, &self.database)
    }

    /// Connection info an engine applies to each table of an opened document.
    pub fn table_logons<S: AsRef<str>>(&self, locations: &[S]) -> Vec<TableLogon> {
        locations
            .iter()
            .map(|location| TableLogon {
                location: self.qualify(location.as_ref()),
                server: self.server.clone(),
                database: self.database.clone(),
                user: self.user.clone(),
                integrated_security: self.integrated_security(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLogon {
    pub location: String,
    pub server: String,
    pub database: String,
    pub user: String,
    pub integrated_security: bool,
}

pub fn qualified_table_location(location: &str, database: &str) -> String {
    if location.trim().is_empty() || database.trim().is_empty() {
        return location.to_string();
    }
    let table = location.rsplit('.').next().unwrap_or_default().trim();
    if table.is_empty() {
        return location.to_string();
    }
    format!("{database}.dbo.{table}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    pub report_code: String,
    pub file_path: PathBuf,
    pub parameters: BTreeMap<String, TypedValue>,
    pub logon: DatabaseLogon,
}

pub trait ReportEngine: Send + Sync {
    fn open(&self, request: &ReportRequest) -> Result<Box<dyn ViewerWindow>, ReportError>;
}

pub struct MemoryReportEngine {
    windowing: Arc<MemoryWindowing>,
    failure: Option<String>,
    tables: Vec<String>,
    applied_logons: Mutex<Vec<TableLogon>>,
    opened: Mutex<Vec<ReportRequest>>,
    viewers: Mutex<Vec<MemoryViewer>>,
}

impl MemoryReportEngine {
    pub fn new(windowing: Arc<MemoryWindowing>) -> Self {
        Self {
            windowing,
            failure: None,
            tables: Vec::new(),
            applied_logons: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
            viewers: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(windowing: Arc<MemoryWindowing>, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(windowing)
        }
    }

    pub fn with_tables(mut self, tables: &[&str]) -> Self {
        self.tables = tables.iter().map(|table| table.to_string()).collect();
        self
    }

    pub fn applied_logons(&self) -> Vec<TableLogon> {
        self.applied_logons
            .lock()
            .map(|logons| logons.clone())
            .unwrap_or_default()
    }

    pub fn opened(&self) -> Vec<ReportRequest> {
        self.opened
            .lock()
            .map(|opened| opened.clone())
            .unwrap_or_default()
    }

    pub fn viewers(&self) -> Vec<MemoryViewer> {
        self.viewers
            .lock()
            .map(|viewers| viewers.clone())
            .unwrap_or_default()
    }
}

impl ReportEngine for MemoryReportEngine {
    fn open(&self, request: &ReportRequest) -> Result<Box<dyn ViewerWindow>, ReportError> {
        if let Some(message) = &self.failure {
            return Err(ReportError::Engine {
                path: request.file_path.display().to_string(),
                message: message.clone(),
            });
        }
        if let Ok(mut applied) = self.applied_logons.lock() {
            applied.extend(request.logon.table_logons(self.tables.as_slice()));
        }
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(request.clone());
        }
        let viewer = MemoryViewer::new(self.windowing.allocate());
        if let Ok(mut viewers) = self.viewers.lock() {
            viewers.push(viewer.clone());
        }
        Ok(Box::new(viewer))
    }
}
