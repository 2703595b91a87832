//! Path helpers for the Switchboard data directory.

use std::path::PathBuf;

/// Get the Switchboard data directory (e.g. `~/.switchboard/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".switchboard")
}

/// Default credential file path (e.g. `~/.switchboard/credentials.json`).
pub fn get_credentials_path() -> PathBuf {
    get_data_path().join("credentials.json")
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}
