use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use arboard::Clipboard;
use rand::seq::IndexedRandom;
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;
use crate::error::SystemError;

const PASSWORD_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const LOG_FILE: &str = "netcfg.log";

pub(crate) fn set_clipboard(text: &str) -> Result<(), SystemError> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}

/// Alphanumeric password drawn from the thread-local CSPRNG.
pub(crate) fn generate_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .filter_map(|_| PASSWORD_CHARSET.choose(&mut rng))
        .map(|byte| char::from(*byte))
        .collect()
}

/// Sends `tracing` output to `~/.config/netcfg/netcfg.log`; the terminal belongs to the UI.
pub(crate) fn init_logging(filter: &str) -> Result<PathBuf, SystemError> {
    let dir = config_dir().ok_or(SystemError::NoHome)?;
    fs::create_dir_all(&dir).map_err(|source| SystemError::Io {
        path: dir.display().to_string(),
        source,
    })?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| SystemError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| SystemError::Logging(err.to_string()))?;
    Ok(path)
}

fn config_dir() -> Option<PathBuf> {
    let home = env::var_os("USERPROFILE")
        .or_else(|| env::var_os("HOME"))
        .map(PathBuf::from)?;
    Some(home.join(".config").join("netcfg"))
}
