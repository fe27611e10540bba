use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_NAME: &str = "hotrange";
const LOG_DIRECTORY_NAME: &str = "logs";

/// Console logging on stderr, plus a log file when `log_dir` is set.
///
/// Returns the path of the log file, if one was opened.
pub(crate) fn init_logging(verbose: bool, log_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, log_path) = match log_dir {
        Some(dir) => {
            let path = log_file_path(dir, Local::now());
            if let Some(parent) = path.parent() {
                create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {:?}", parent))?;
            }
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(log_path)
}

/// `<dir>/logs/hotrange/GENERAL/general_<timestamp>.log`, millisecond precision.
pub(crate) fn log_file_path(dir: &Path, now: DateTime<Local>) -> PathBuf {
    dir.join(LOG_DIRECTORY_NAME)
        .join(APP_NAME)
        .join("GENERAL")
        .join(format!("general_{}.log", now.format("%Y%m%d%H%M%S%3f")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_path() {
        let now = Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .unwrap()
            + chrono::Duration::milliseconds(42);

        let path = log_file_path(Path::new("/var/tmp"), now);

        assert_eq!(
            path,
            PathBuf::from("/var/tmp/logs/hotrange/GENERAL/general_20240309140507042.log")
        );
    }
}
