use super::{default_global_config_path, ConfigError, Settings, ValidationOptions};
use std::path::Path;

pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    load_settings(&path, ValidationOptions::default())
}

pub fn load_settings(path: &Path, options: ValidationOptions) -> Result<Settings, ConfigError> {
    let settings = Settings::from_path(path)?;
    settings.validate(options)?;
    Ok(settings)
}
