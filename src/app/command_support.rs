use crate::config::{default_global_config_path, ConfigError, Settings, ValidationOptions};
use crate::shared::logging::{JsonLineLog, LogSink};
use crate::store::{DataStoreError, SqliteStore};

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn map_store_err(err: DataStoreError) -> String {
    crate::shared::errors::error_chain(&err)
}

pub fn load_settings() -> Result<Settings, String> {
    let path = default_global_config_path().map_err(map_config_err)?;
    let settings = Settings::from_path(&path).map_err(map_config_err)?;
    settings
        .validate(ValidationOptions {
            require_reports_path_exists: false,
        })
        .map_err(map_config_err)?;
    Ok(settings)
}

pub fn open_store(settings: &Settings) -> Result<SqliteStore, String> {
    let Some(path) = settings.database.sqlite_path.as_deref() else {
        return Err("database.sqlite_path is not configured".to_string());
    };
    let store = SqliteStore::open(path).map_err(map_store_err)?;
    Ok(store.with_dialect(settings.database.dialect))
}

pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, String> {
    let Some(position) = args.iter().position(|arg| arg == flag) else {
        return Ok(None);
    };
    args.get(position + 1)
        .map(|value| Some(value.as_str()))
        .ok_or_else(|| format!("missing value for `{flag}`"))
}

pub fn runtime_log(settings: &Settings) -> Option<JsonLineLog> {
    settings.resolve_log_dir().ok().map(|dir| JsonLineLog::new(&dir))
}

pub fn log_store_failure(settings: &Settings, event: &str, err: DataStoreError) -> String {
    if let Some(log) = runtime_log(settings) {
        log.error(event, "command failed against the data store", &err);
    }
    map_store_err(err)
}
