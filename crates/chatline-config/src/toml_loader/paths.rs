//! Where chatline keeps `config.toml`, and writing the first-run template.

use std::io::Write;
use std::path::{Path, PathBuf};

use chatline_common::ConfigError;
use tracing::{debug, info};

use super::template::default_config_toml;

const APP_DIR: &str = "chatline";
const CONFIG_FILE: &str = "config.toml";

/// `<config dir>/chatline/config.toml`, e.g. `~/.config/chatline/config.toml`
/// on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or_else(|| {
        ConfigError::ParseError("no platform config directory for chatline".into())
    })?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Write the commented template to `path`, creating parent directories.
///
/// A file that already exists is left as it is.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_err = |what: &str, e: std::io::Error| {
        ConfigError::ParseError(format!("failed to {what} {}: {e}", path.display()))
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| io_err("create directory for", e))?;
    }

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "config already present, template not written");
            return Ok(());
        }
        Err(e) => return Err(io_err("create", e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_err("write template to", e))?;

    info!(path = %path.display(), "wrote default chatline config");
    Ok(())
}
