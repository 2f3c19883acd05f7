use super::ConfigError;
use crate::store::SqlDialect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchMode {
    #[default]
    Embedded,
    Standalone,
}

impl LaunchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::Standalone => "standalone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub dialect: SqlDialect,
    pub server: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub sqlite_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrincipalConfig {
    pub form_id: String,
    pub reports_grid: String,
    pub department_combo: String,
    pub department: Option<String>,
}

impl Default for PrincipalConfig {
    fn default() -> Self {
        Self {
            form_id: "RPT_MAIN".to_string(),
            reports_grid: "grd_rpts".to_string(),
            department_combo: "cmb_dpt".to_string(),
            department: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbeddedHostConfig {
    pub host_id: String,
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub left: i32,
    pub top: i32,
    pub resolve_attempts: u32,
    pub resolve_backoff_ms: u64,
}

impl Default for EmbeddedHostConfig {
    fn default() -> Self {
        Self {
            host_id: "RPT_EMB_VIEWER".to_string(),
            title: "Report Viewer".to_string(),
            width: 900,
            height: 650,
            left: 300,
            top: 80,
            resolve_attempts: 12,
            resolve_backoff_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub reports_base_path: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub launch_mode: LaunchMode,
    pub database: DatabaseConfig,
    pub principal: PrincipalConfig,
    pub embedded_host: EmbeddedHostConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reports_base_path: PathBuf::from("/srv/reports"),
            log_dir: None,
            launch_mode: LaunchMode::default(),
            database: DatabaseConfig::default(),
            principal: PrincipalConfig::default(),
            embedded_host: EmbeddedHostConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    pub require_reports_path_exists: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            require_reports_path_exists: true,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self, options: ValidationOptions) -> Result<(), ConfigError> {
        if self.reports_base_path.as_os_str().is_empty() {
            return Err(ConfigError::Settings(
                "`reports_base_path` must be non-empty".to_string(),
            ));
        }
        if options.require_reports_path_exists && !self.reports_base_path.is_dir() {
            return Err(ConfigError::Settings(format!(
                "`reports_base_path` `{}` is missing or not a directory",
                self.reports_base_path.display()
            )));
        }
        if self.principal.form_id.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`principal.form_id` must be non-empty".to_string(),
            ));
        }
        if self.principal.reports_grid.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`principal.reports_grid` must be non-empty".to_string(),
            ));
        }

        let host = &self.embedded_host;
        if host.host_id.trim().is_empty() || host.title.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`embedded_host.host_id` and `embedded_host.title` must be non-empty".to_string(),
            ));
        }
        if host.width <= 0 || host.height <= 0 {
            return Err(ConfigError::Settings(
                "`embedded_host` width and height must be positive".to_string(),
            ));
        }
        if host.resolve_attempts == 0 {
            return Err(ConfigError::Settings(
                "`embedded_host.resolve_attempts` must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolve_log_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => super::default_log_dir(),
        }
    }
}
