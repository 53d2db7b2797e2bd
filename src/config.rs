use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RECORDS_DIR: &str = "attendance_records";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const LOG_FILE_NAME: &str = "attendance.log";

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub records_dir: PathBuf,
    pub admin_password: String,
    /// `None` when file logging is switched off with `ATTENDANCE_LOG_FILE=off`.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let records_dir = PathBuf::from(DEFAULT_RECORDS_DIR);
        Self {
            port: DEFAULT_PORT,
            log_file: Some(records_dir.join(LOG_FILE_NAME)),
            records_dir,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let records_dir = lookup("ATTENDANCE_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDS_DIR));

        let admin_password = lookup("ADMIN_PASSWORD")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string());

        let log_file = match lookup("ATTENDANCE_LOG_FILE") {
            Some(value) if value.eq_ignore_ascii_case("off") => None,
            Some(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
            _ => Some(records_dir.join(LOG_FILE_NAME)),
        };

        Self {
            port,
            records_dir,
            admin_password,
            log_file,
        }
    }
}
